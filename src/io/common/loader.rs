pub trait RawAssetLoader {
    /// Every file the loader can provide, as game paths (forward slashes, relative to the root).
    fn files(&self) -> &[String];

    fn load_raw_owned(&self, path: &str) -> Option<Vec<u8>>;
}
