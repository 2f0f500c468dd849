//! Canonical asset keys.
//!
//! The game resolves most references by basename: a model referenced as `foo.md3` may be shipped
//! as `foo.mdr`, a texture referenced as `foo` or `foo.tga` may be shipped as `foo.jpg`. Keys
//! therefore get a synthetic extension per [`AssetType`], so every variant collides on one vertex.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AssetType {
    Audio,
    Map,
    /// Bot navigation data (`.aas`), always paired with a map.
    Aas,
    Model,
    /// Shader script (`.shader`).
    Script,
    Skin,
    /// Images and shaders alike, a shader name is looked up before falling back to an image.
    Texture,
    Misc,
}

pub fn sanitize(raw: &str) -> String {
    raw.to_lowercase().replace('\\', "/")
}

/// The extension of the last path component without the dot. Dotfiles have no extension.
pub fn extension(path: &str) -> Option<&str> {
    split_extension(path).1
}

fn split_extension(path: &str) -> (&str, Option<&str>) {
    let file_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[file_start..].rfind('.') {
        Some(0) | None => (path, None),
        Some(dot) => {
            let dot = file_start + dot;
            (&path[..dot], Some(&path[dot + 1..]))
        }
    }
}

/// Replaces the extension (if any) with `ext`, `ext` includes the dot.
pub fn replace_extension(path: &str, ext: &str) -> String {
    format!("{}{}", split_extension(path).0, ext)
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn generalize(path: &str, ty: AssetType) -> String {
    match ty {
        AssetType::Audio if extension(path).is_some() => replace_extension(path, ".audio"),
        AssetType::Model if extension(path).is_some() => replace_extension(path, ".model"),
        // textures are often referenced without an extension
        AssetType::Texture => replace_extension(path, ".texture"),
        AssetType::Audio
        | AssetType::Model
        | AssetType::Map
        | AssetType::Aas
        | AssetType::Script
        | AssetType::Skin
        | AssetType::Misc => path.to_string(),
    }
}

pub fn asset_key(raw: &str, ty: AssetType) -> String {
    generalize(&sanitize(raw), ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_uses_forward_slashes() {
        assert_eq!(sanitize("Textures\\Base_Wall/METAL.TGA"), "textures/base_wall/metal.tga");
    }

    #[test]
    fn texture_extension_is_replaced_or_appended() {
        assert_eq!(asset_key("textures/a/b.tga", AssetType::Texture), "textures/a/b.texture");
        assert_eq!(asset_key("textures/a/b.jpg", AssetType::Texture), "textures/a/b.texture");
        assert_eq!(asset_key("textures/a/b", AssetType::Texture), "textures/a/b.texture");
    }

    #[test]
    fn audio_and_model_use_synthetic_extensions() {
        assert_eq!(asset_key("sound/world/hum.WAV", AssetType::Audio), "sound/world/hum.audio");
        assert_eq!(asset_key("models/a/b.md3", AssetType::Model), "models/a/b.model");
        assert_eq!(asset_key("models/a/b.mdr", AssetType::Model), "models/a/b.model");
        assert_eq!(asset_key("models/a/b", AssetType::Model), "models/a/b");
    }

    #[test]
    fn other_types_keep_their_extension() {
        assert_eq!(asset_key("maps/Q3DM1.bsp", AssetType::Map), "maps/q3dm1.bsp");
        assert_eq!(asset_key("scripts/base.shader", AssetType::Script), "scripts/base.shader");
        assert_eq!(
            asset_key("models/a/b_default.skin", AssetType::Skin),
            "models/a/b_default.skin"
        );
    }

    #[test]
    fn only_the_last_component_carries_the_extension() {
        assert_eq!(extension("textures/some.dir/file"), None);
        assert_eq!(extension("textures/.hidden"), None);
        assert_eq!(extension("maps/q3dm1.bsp"), Some("bsp"));
        assert_eq!(
            asset_key("textures/some.dir/file", AssetType::Texture),
            "textures/some.dir/file.texture"
        );
        assert_eq!(file_name("maps/q3dm1.bsp"), "q3dm1.bsp");
        assert_eq!(file_name("q3dm1.bsp"), "q3dm1.bsp");
    }
}
