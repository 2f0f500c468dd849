use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{trace, warn};

use crate::io::common::loader::RawAssetLoader;

/// Serves loose files from an unpacked game directory (e.g. an extracted `baseq3`).
pub struct FsLoader {
    base_dir: PathBuf,
    files: Vec<String>,
}

impl FsLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let mut files = Vec::new();
        FsLoader::collect_files(&base_dir, &base_dir, &mut files)?;
        trace!("Found {} files below {}", files.len(), base_dir.display());

        Ok(FsLoader {
            base_dir,
            // sorted, so ingestion (and thereby vertex ids) doesn't depend on the directory order
            files: files.into_iter().sorted().collect_vec(),
        })
    }

    fn collect_files(
        root: &Path,
        dir: &Path,
        files: &mut Vec<String>,
    ) -> Result<(), std::io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                FsLoader::collect_files(root, &path, files)?;
            } else if path.is_file() {
                // strip_prefix can't fail, read_dir only yields children of root
                let relative = path.strip_prefix(root).unwrap_or(&path);
                files.push(
                    relative
                        .components()
                        .map(|component| component.as_os_str().to_string_lossy())
                        .join("/"),
                );
            }
        }
        Ok(())
    }
}

impl RawAssetLoader for FsLoader {
    fn files(&self) -> &[String] {
        &self.files
    }

    fn load_raw_owned(&self, path: &str) -> Option<Vec<u8>> {
        match fs::read(self.base_dir.join(path)) {
            Ok(buf) => {
                trace!("Loaded {} ({} bytes)", path, buf.len());
                Some(buf)
            }
            Err(err) => {
                warn!("Could not read {}: {}", path, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::io::common::loader::RawAssetLoader;
    use crate::io::fs::loader::FsLoader;

    #[test]
    fn lists_nested_files_with_forward_slashes() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("q3-assets-fs-loader-{}", std::process::id()));
        fs::create_dir_all(root.join("maps"))?;
        fs::create_dir_all(root.join("textures/base_wall"))?;
        fs::write(root.join("maps/q3dm1.bsp"), b"bsp")?;
        fs::write(root.join("textures/base_wall/metal.tga"), b"tga")?;

        let loader = FsLoader::new(&root)?;
        assert_eq!(loader.files(), ["maps/q3dm1.bsp", "textures/base_wall/metal.tga"]);
        assert_eq!(loader.load_raw_owned("maps/q3dm1.bsp"), Some(b"bsp".to_vec()));
        assert_eq!(loader.load_raw_owned("maps/missing.bsp"), None);

        fs::remove_dir_all(&root)?;
        Ok(())
    }
}
