use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::common::reader::{read_count, read_qpath};
use crate::md3::types::{
    Md3Header, Md3Model, Md3Surface, FOURCC_MD3, MD3_MAX_SHADERS, MD3_MAX_SKINS, MD3_MAX_SURFACES,
    MD3_VERSION,
};
use crate::ParserError;

pub struct Md3Reader {}

impl Md3Reader {
    pub fn parse_header<R: Read>(rdr: &mut R) -> Result<Md3Header, ParserError> {
        let magic = rdr.read_u32::<LittleEndian>()?;
        if magic != FOURCC_MD3 {
            return Err(ParserError::InvalidMagicValue { magic });
        }

        let version = rdr.read_i32::<LittleEndian>()?;
        if version != MD3_VERSION {
            return Err(ParserError::UnsupportedVersion { version });
        }

        Ok(Md3Header {
            magic,
            version,
            name: read_qpath(rdr)?,
            flags: rdr.read_i32::<LittleEndian>()?,
            num_frames: read_count(rdr, "Negative frame count")?,
            num_tags: read_count(rdr, "Negative tag count")?,
            num_surfaces: read_count(rdr, "Negative surface count")?,
            num_skins: read_count(rdr, "Negative skin count")?,
            ofs_frames: rdr.read_u32::<LittleEndian>()?,
            ofs_tags: rdr.read_u32::<LittleEndian>()?,
            ofs_surfaces: rdr.read_u32::<LittleEndian>()?,
            ofs_end: rdr.read_u32::<LittleEndian>()?,
        })
    }

    /// Reads the header and the shader names of every surface. Vertex data is skipped.
    pub fn parse_model<R: Read + Seek>(rdr: &mut R) -> Result<Md3Model, ParserError> {
        let header = Md3Reader::parse_header(rdr)?;
        if header.num_surfaces > MD3_MAX_SURFACES {
            return Err(ParserError::FormatError {
                reason: "Surface count exceeds MD3_MAX_SURFACES",
            });
        }

        if header.num_skins > MD3_MAX_SKINS {
            return Err(ParserError::FormatError {
                reason: "Skin count exceeds MD3_MAX_SKINS",
            });
        }

        let mut surfaces = Vec::with_capacity(header.num_surfaces);
        let mut surface_start = header.ofs_surfaces as u64;
        for _ in 0..header.num_surfaces {
            rdr.seek(SeekFrom::Start(surface_start))?;
            let (surface, ofs_end) = Md3Reader::parse_surface(rdr, surface_start)?;
            surfaces.push(surface);

            if ofs_end == 0 {
                return Err(ParserError::FormatError {
                    reason: "Surface without size would loop forever",
                });
            }
            surface_start += ofs_end as u64;
        }

        Ok(Md3Model {
            name: header.name,
            skins: vec![None; header.num_skins],
            surfaces,
        })
    }

    /// Returns the surface together with its size (`ofsEnd`), which is the offset to the next one.
    fn parse_surface<R: Read + Seek>(
        rdr: &mut R,
        surface_start: u64,
    ) -> Result<(Md3Surface, u32), ParserError> {
        let magic = rdr.read_u32::<LittleEndian>()?;
        if magic != FOURCC_MD3 {
            return Err(ParserError::InvalidMagicValue { magic });
        }

        let name = read_qpath(rdr)?;
        let _flags = rdr.read_i32::<LittleEndian>()?;
        let _num_frames = read_count(rdr, "Negative surface frame count")?;
        let num_shaders = read_count(rdr, "Negative surface shader count")?;
        let _num_verts = read_count(rdr, "Negative surface vertex count")?;
        let _num_triangles = read_count(rdr, "Negative surface triangle count")?;
        let _ofs_triangles = rdr.read_u32::<LittleEndian>()?;
        let ofs_shaders = rdr.read_u32::<LittleEndian>()?;
        let _ofs_st = rdr.read_u32::<LittleEndian>()?;
        let _ofs_xyz_normals = rdr.read_u32::<LittleEndian>()?;
        let ofs_end = rdr.read_u32::<LittleEndian>()?;

        if num_shaders > MD3_MAX_SHADERS {
            return Err(ParserError::FormatError {
                reason: "Shader count exceeds MD3_MAX_SHADERS",
            });
        }

        let mut shaders = Vec::with_capacity(num_shaders);
        if num_shaders > 0 {
            rdr.seek(SeekFrom::Start(surface_start + ofs_shaders as u64))?;
        }
        for _ in 0..num_shaders {
            let shader = read_qpath(rdr)?;
            let _shader_index = rdr.read_i32::<LittleEndian>()?;
            shaders.push(Some(shader).filter(|s| !s.is_empty()));
        }

        Ok((Md3Surface { name, shaders }, ofs_end))
    }
}
