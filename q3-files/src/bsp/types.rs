use std::io::Read;

use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt};
use num_enum::IntoPrimitive;

use crate::common::reader::{read_qpath, Parseable};
use crate::ParserError;

pub const FOURCC_IBSP: u32 = u32::from_le_bytes(*b"IBSP");

/// Quake III Arena. Team Arena and most mods share the layout.
pub const BSP_VERSION_Q3: i32 = 46;
/// Return to Castle Wolfenstein / Quake Live, identical for the lumps we care about.
pub const BSP_VERSION_RTCW: i32 = 47;

pub const LUMP_COUNT: usize = 17;

/// Size of a single entry in the shaders lump: name, surface flags and content flags.
pub const SHADER_ENTRY_SIZE: usize = 72;

#[derive(Debug, Copy, Clone, Eq, PartialEq, IntoPrimitive)]
#[repr(usize)]
pub enum Lump {
    Entities = 0,
    Shaders = 1,
    Planes = 2,
    Nodes = 3,
    Leafs = 4,
    LeafSurfaces = 5,
    LeafBrushes = 6,
    Models = 7,
    Brushes = 8,
    BrushSides = 9,
    DrawVerts = 10,
    DrawIndexes = 11,
    Fogs = 12,
    Surfaces = 13,
    Lightmaps = 14,
    LightGrid = 15,
    Visibility = 16,
}

#[derive(Debug, Copy, Clone)]
pub struct LumpInfo {
    pub offset: u32,
    pub length: u32,
}

impl Parseable<LumpInfo> for LumpInfo {
    fn parse<R: Read>(rdr: &mut R) -> Result<LumpInfo, ParserError> {
        Ok(LumpInfo {
            offset: rdr.read_u32::<LittleEndian>()?,
            length: rdr.read_u32::<LittleEndian>()?,
        })
    }
}

bitflags! {
    /// The subset of `SURF_*` flags from `surfaceflags.h` that is interesting for tooling.
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    pub struct SurfaceFlags: u32 {
        const NODAMAGE = 0x1;
        const SLICK = 0x2;
        const SKY = 0x4;
        const LADDER = 0x8;
        const NOIMPACT = 0x10;
        const NOMARKS = 0x20;
        const FLESH = 0x40;
        const NODRAW = 0x80;
        const HINT = 0x100;
        const SKIP = 0x200;
        const NOLIGHTMAP = 0x400;
        const POINTLIGHT = 0x800;
        const METALSTEPS = 0x1000;
        const NOSTEPS = 0x2000;
        const NONSOLID = 0x4000;
        const LIGHTFILTER = 0x8000;
        const ALPHASHADOW = 0x10000;
        const NODLIGHT = 0x20000;
        const DUST = 0x40000;
    }
}

#[derive(Debug, Clone)]
pub struct BspShader {
    pub shader_name: String,
    pub surface_flags: SurfaceFlags,
    pub content_flags: u32,
}

impl Parseable<BspShader> for BspShader {
    fn parse<R: Read>(rdr: &mut R) -> Result<BspShader, ParserError> {
        Ok(BspShader {
            shader_name: read_qpath(rdr)?,
            surface_flags: SurfaceFlags::from_bits_retain(rdr.read_u32::<LittleEndian>()?),
            content_flags: rdr.read_u32::<LittleEndian>()?,
        })
    }
}

/// One `{ "key" "value" ... }` block of the entities lump. Pairs are kept in file order,
/// duplicate keys are legal and the first one wins on lookup, like the game does.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Entity {
    pub pairs: Vec<(String, String)>,
}

impl Entity {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    /// Background music of `worldspawn`, may contain a second intro track separated by a space.
    pub fn music(&self) -> Option<&str> {
        self.get("music")
    }

    /// Sound of `target_speaker` and friends.
    pub fn noise(&self) -> Option<&str> {
        self.get("noise")
    }

    pub fn model(&self) -> Option<&str> {
        self.get("model")
    }

    pub fn model2(&self) -> Option<&str> {
        self.get("model2")
    }
}

/// The parts of a BSP that reference other files. Geometry lumps are not decoded.
#[derive(Debug, Clone, Default)]
pub struct BspMap {
    pub version: i32,
    pub entities: Vec<Entity>,
    pub shaders: Vec<BspShader>,
}
