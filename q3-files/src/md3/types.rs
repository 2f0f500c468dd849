pub const FOURCC_MD3: u32 = u32::from_le_bytes(*b"IDP3");
pub const MD3_VERSION: i32 = 15;

/// Upper bounds from `qfiles.h`, anything above is a corrupt file rather than a big model.
pub const MD3_MAX_SURFACES: usize = 32;
pub const MD3_MAX_SHADERS: usize = 256;
/// `qfiles.h` has no skin limit since skin names are never stored, this mirrors the shader bound.
pub const MD3_MAX_SKINS: usize = 256;

#[derive(Debug, Clone)]
pub struct Md3Header {
    pub magic: u32,
    pub version: i32,
    pub name: String,
    pub flags: i32,
    pub num_frames: usize,
    pub num_tags: usize,
    pub num_surfaces: usize,
    pub num_skins: usize,
    pub ofs_frames: u32,
    pub ofs_tags: u32,
    pub ofs_surfaces: u32,
    pub ofs_end: u32,
}

#[derive(Debug, Clone)]
pub struct Md3Surface {
    pub name: String,
    /// Empty names are kept as `None`, exporters regularly leave unnamed slots behind.
    pub shaders: Vec<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct Md3Model {
    pub name: String,
    /// The header reserves a skin count but the format never stores skin names, so every slot
    /// comes back as `None`.
    pub skins: Vec<Option<String>>,
    pub surfaces: Vec<Md3Surface>,
}
