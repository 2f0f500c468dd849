use std::io::Cursor;

use crate::bsp::reader::BspReader;
use crate::bsp::types::{SurfaceFlags, LUMP_COUNT, SHADER_ENTRY_SIZE};
use crate::ParserError;

fn qpath(name: &str) -> Vec<u8> {
    let mut buf = name.as_bytes().to_vec();
    buf.resize(64, 0);
    buf
}

/// Builds a BSP that only contains the entities and shaders lumps, all other lumps are empty.
fn build_bsp(version: i32, entities: &str, shaders: &[(&str, u32)]) -> Vec<u8> {
    let header_size = 8 + LUMP_COUNT * 8;

    let mut entities_lump = entities.as_bytes().to_vec();
    entities_lump.push(0);

    let mut shaders_lump = Vec::new();
    for (name, flags) in shaders {
        shaders_lump.extend(qpath(name));
        shaders_lump.extend(flags.to_le_bytes());
        shaders_lump.extend(1u32.to_le_bytes());
    }

    let mut buf = Vec::new();
    buf.extend(b"IBSP");
    buf.extend(version.to_le_bytes());
    let entities_offset = header_size as u32;
    let shaders_offset = entities_offset + entities_lump.len() as u32;
    buf.extend(entities_offset.to_le_bytes());
    buf.extend((entities_lump.len() as u32).to_le_bytes());
    buf.extend(shaders_offset.to_le_bytes());
    buf.extend((shaders_lump.len() as u32).to_le_bytes());
    for _ in 2..LUMP_COUNT {
        buf.extend(0u32.to_le_bytes());
        buf.extend(0u32.to_le_bytes());
    }
    buf.extend(entities_lump);
    buf.extend(shaders_lump);
    buf
}

#[test]
fn parse_entities_and_shaders() -> Result<(), anyhow::Error> {
    let entities = r#"{
"classname" "worldspawn"
"music" "music/sonic1.wav"
}
{
"classname" "misc_model"
"model" "models/mapobjects/gargoyle.md3"
}"#;
    let buf = build_bsp(
        46,
        entities,
        &[("textures/base_wall/metal", 0), ("textures/skies/blue", 0x4)],
    );

    let map = BspReader::parse_map(&mut Cursor::new(buf))?;
    assert_eq!(map.version, 46);
    assert_eq!(map.entities.len(), 2);
    assert_eq!(map.entities[0].classname(), Some("worldspawn"));
    assert_eq!(map.entities[0].music(), Some("music/sonic1.wav"));
    assert_eq!(map.entities[1].model(), Some("models/mapobjects/gargoyle.md3"));
    assert_eq!(map.entities[1].model2(), None);

    assert_eq!(map.shaders.len(), 2);
    assert_eq!(map.shaders[0].shader_name, "textures/base_wall/metal");
    assert!(map.shaders[1].surface_flags.contains(SurfaceFlags::SKY));
    assert_eq!(map.shaders[1].content_flags, 1);
    Ok(())
}

#[test]
fn rejects_wrong_magic() {
    let mut buf = build_bsp(46, "", &[]);
    buf[0..4].copy_from_slice(b"VBSP");
    let res = BspReader::parse_map(&mut Cursor::new(buf));
    assert!(matches!(res, Err(ParserError::InvalidMagicValue { .. })));
}

#[test]
fn rejects_unknown_version() {
    let buf = build_bsp(30, "", &[]);
    let res = BspReader::parse_map(&mut Cursor::new(buf));
    assert!(matches!(res, Err(ParserError::UnsupportedVersion { version: 30 })));
}

#[test]
fn rejects_truncated_shader_lump() {
    let mut buf = build_bsp(46, "", &[("textures/a", 0)]);
    // shrink the shaders lump length by one byte
    let length_pos = 8 + 8 + 4;
    let short = (SHADER_ENTRY_SIZE as u32 - 1).to_le_bytes();
    buf[length_pos..length_pos + 4].copy_from_slice(&short);
    let res = BspReader::parse_map(&mut Cursor::new(buf));
    assert!(matches!(res, Err(ParserError::FormatError { .. })));
}

#[test]
fn rejects_lump_beyond_end_of_file() {
    let mut buf = build_bsp(46, "", &[]);
    // entities lump length
    let length_pos = 8 + 4;
    buf[length_pos..length_pos + 4].copy_from_slice(&u32::MAX.to_le_bytes());
    let res = BspReader::parse_map(&mut Cursor::new(buf));
    assert!(matches!(res, Err(ParserError::FormatError { .. })));
}

#[test]
fn unterminated_entity_is_an_error() {
    let res = BspReader::parse_entities("{ \"classname\" \"worldspawn\"");
    assert!(matches!(res, Err(ParserError::UnexpectedEnd { .. })));
}

#[test]
fn first_duplicate_key_wins() -> Result<(), anyhow::Error> {
    let entities = BspReader::parse_entities("{ \"noise\" \"a.wav\" \"NOISE\" \"b.wav\" }")?;
    assert_eq!(entities[0].noise(), Some("a.wav"));
    Ok(())
}
