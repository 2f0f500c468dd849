use q3_files::bsp::types::BspMap;
use q3_files::md3::types::Md3Model;
use q3_files::shader::types::ShaderScript;

use crate::asset_graph::AssetGraph;
use crate::asset_graph::directed_graph::VertexId;
use crate::asset_graph::key::{AssetType, file_name, replace_extension};

const LEVELSHOT_DIR: &str = "levelshots";

impl AssetGraph {
    /// Registers the script and, for each shader it defines, the edges shader -> script and
    /// shader -> stage texture. Returns the script vertex.
    pub fn process_script(&mut self, name: &str, script: &ShaderScript) -> VertexId {
        let script_asset = self.register_asset(name, AssetType::Script);

        for shader in &script.shaders {
            // shaders are textures that reference other textures
            let shader_asset = self.register_asset(&shader.name, AssetType::Texture);
            self.add_reference(shader_asset, script_asset);

            for map in shader.stages.iter().flat_map(|stage| &stage.maps) {
                let stage_asset = self.register_asset(map, AssetType::Texture);
                self.add_reference(shader_asset, stage_asset);
            }
        }

        script_asset
    }

    // TODO: resolve the surface -> shader pairs inside the .skin text once skins get parsed
    pub fn process_skin(&mut self, name: &str) -> VertexId {
        self.register_asset(name, AssetType::Skin)
    }

    pub fn process_model(&mut self, name: &str, model: &Md3Model) -> VertexId {
        let model_asset = self.register_asset(name, AssetType::Model);

        // models often have bad data, including empty skin / shader names
        for skin in model.skins.iter().flatten().filter(|skin| !skin.is_empty()) {
            let skin_asset = self.process_skin(skin);
            self.add_reference(model_asset, skin_asset);
        }

        for texture in model
            .surfaces
            .iter()
            .flat_map(|surface| &surface.shaders)
            .flatten()
            .filter(|texture| !texture.is_empty())
        {
            let texture_asset = self.register_asset(texture, AssetType::Texture);
            self.add_reference(model_asset, texture_asset);
        }

        model_asset
    }

    pub fn process_map(&mut self, name: &str, map: &BspMap) -> VertexId {
        let map_asset = self.register_asset(name, AssetType::Map);
        let map_key = self.vertex(map_asset).data.key.clone();

        // bot navigation data is never referenced explicitly
        let aas = replace_extension(&map_key, ".aas");
        let aas_asset = self.register_asset(&aas, AssetType::Aas);
        self.add_reference(map_asset, aas_asset);

        let levelshot = format!(
            "{}/{}",
            LEVELSHOT_DIR,
            replace_extension(file_name(&map_key), ".tga")
        );
        let levelshot_asset = self.register_asset(&levelshot, AssetType::Texture);
        self.add_reference(map_asset, levelshot_asset);

        for entity in &map.entities {
            let mut assets = Vec::new();

            // music may name an intro and a loop track
            for track in entity.music().into_iter().flat_map(str::split_whitespace) {
                assets.push(self.register_asset(track, AssetType::Audio));
            }

            // "*falling1.wav" style noises are resolved per player model at runtime
            if let Some(noise) = entity
                .noise()
                .filter(|noise| !noise.is_empty() && !noise.starts_with('*'))
            {
                assets.push(self.register_asset(noise, AssetType::Audio));
            }

            // "*1" style models are brush models inside the bsp itself
            for model in [entity.model(), entity.model2()]
                .into_iter()
                .flatten()
                .filter(|model| !model.is_empty() && !model.starts_with('*'))
            {
                assets.push(self.register_asset(model, AssetType::Model));
            }

            for asset in assets {
                self.add_reference(map_asset, asset);
            }
        }

        for shader in &map.shaders {
            if shader.shader_name.is_empty() {
                continue;
            }
            let texture_asset = self.register_asset(&shader.shader_name, AssetType::Texture);
            self.add_reference(map_asset, texture_asset);
        }

        map_asset
    }
}
