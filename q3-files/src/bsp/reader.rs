use std::io::{Cursor, Read, Seek};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::bsp::types::{
    BspMap, BspShader, Entity, Lump, LumpInfo, BSP_VERSION_Q3, BSP_VERSION_RTCW, FOURCC_IBSP,
    LUMP_COUNT, SHADER_ENTRY_SIZE,
};
use crate::common::lexer::Lexer;
use crate::common::reader::{read_at, read_chunk_array, Parseable};
use crate::ParserError;

pub struct BspReader {}

impl BspReader {
    /// Reads the header and only the lumps that carry references to other files: the entities and
    /// the shaders lump.
    pub fn parse_map<R: Read + Seek>(rdr: &mut R) -> Result<BspMap, ParserError> {
        let magic = rdr.read_u32::<LittleEndian>()?;
        if magic != FOURCC_IBSP {
            return Err(ParserError::InvalidMagicValue { magic });
        }

        let version = rdr.read_i32::<LittleEndian>()?;
        if version != BSP_VERSION_Q3 && version != BSP_VERSION_RTCW {
            return Err(ParserError::UnsupportedVersion { version });
        }

        let mut lumps = Vec::with_capacity(LUMP_COUNT);
        for _ in 0..LUMP_COUNT {
            lumps.push(LumpInfo::parse(rdr)?);
        }

        let entities_lump = lumps[usize::from(Lump::Entities)];
        let buf = read_at(rdr, entities_lump.offset as u64, entities_lump.length as usize)?;
        // q3map writes the lump NUL terminated, older tools also pad with garbage after it
        let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
        let entities = BspReader::parse_entities(&String::from_utf8_lossy(&buf[..end]))?;

        let shaders_lump = lumps[usize::from(Lump::Shaders)];
        if shaders_lump.length as usize % SHADER_ENTRY_SIZE != 0 {
            return Err(ParserError::FormatError {
                reason: "Shaders lump size is not a multiple of the entry size",
            });
        }
        let buf = read_at(rdr, shaders_lump.offset as u64, shaders_lump.length as usize)?;
        let shaders = read_chunk_array::<BspShader, _>(&mut Cursor::new(buf))?;

        Ok(BspMap {
            version,
            entities,
            shaders,
        })
    }

    pub fn parse_entities(text: &str) -> Result<Vec<Entity>, ParserError> {
        let mut lexer = Lexer::new(text);
        let mut entities = Vec::new();

        while let Some(token) = lexer.next() {
            if !token.is_open_brace() {
                return Err(ParserError::UnexpectedToken {
                    token: token.text.to_string(),
                    line: token.line,
                });
            }

            let mut entity = Entity::default();
            loop {
                let key = lexer.next().ok_or(ParserError::UnexpectedEnd { line: lexer.line() })?;
                if key.is_close_brace() {
                    break;
                }

                let value = lexer.next().ok_or(ParserError::UnexpectedEnd { line: lexer.line() })?;
                if key.is_open_brace() || value.is_open_brace() || value.is_close_brace() {
                    return Err(ParserError::UnexpectedToken {
                        token: value.text.to_string(),
                        line: value.line,
                    });
                }
                entity.pairs.push((key.text.to_string(), value.text.to_string()));
            }
            entities.push(entity);
        }

        Ok(entities)
    }
}
