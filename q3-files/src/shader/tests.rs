use crate::shader::reader::ShaderReader;
use crate::ParserError;

const BASE_WALL: &str = r#"
// a comment before the first shader
textures/base_wall/comp3
{
	surfaceparm metalsteps
	{
		map $lightmap
		rgbGen identity
	}
	{
		map textures/base_wall/comp3.tga
		blendFunc GL_DST_COLOR GL_ZERO
	}
	{
		animMap 10 textures/sfx/flame1.tga textures/sfx/flame2.tga
	}
}

textures/base_wall/clamped
{
	qer_editorimage textures/base_wall/editor.tga
	{
		clampMap textures/base_wall/clamped.tga
	}
}
"#;

#[test]
fn parse_stages() -> Result<(), anyhow::Error> {
    let script = ShaderReader::parse_script(BASE_WALL)?;
    assert_eq!(script.shaders.len(), 2);

    let comp3 = &script.shaders[0];
    assert_eq!(comp3.name, "textures/base_wall/comp3");
    assert_eq!(comp3.stages.len(), 3);
    assert!(comp3.stages[0].maps.is_empty());
    assert_eq!(comp3.stages[1].maps, vec!["textures/base_wall/comp3.tga"]);
    assert_eq!(
        comp3.stages[2].maps,
        vec!["textures/sfx/flame1.tga", "textures/sfx/flame2.tga"]
    );

    let clamped = &script.shaders[1];
    assert_eq!(clamped.stages.len(), 1);
    assert_eq!(clamped.stages[0].maps, vec!["textures/base_wall/clamped.tga"]);
    Ok(())
}

#[test]
fn shader_without_stages() -> Result<(), anyhow::Error> {
    let script = ShaderReader::parse_script("textures/common/caulk { surfaceparm nodraw }")?;
    assert_eq!(script.shaders.len(), 1);
    assert!(script.shaders[0].stages.is_empty());
    Ok(())
}

#[test]
fn unbalanced_braces() {
    let res = ShaderReader::parse_script("textures/a {\n{\nmap textures/a.tga\n}\n");
    assert!(matches!(res, Err(ParserError::UnexpectedEnd { .. })));

    let res = ShaderReader::parse_script("textures/a\nmap textures/a.tga");
    assert!(matches!(res, Err(ParserError::UnexpectedToken { .. })));
}

#[test]
fn duplicate_shader_keeps_last_definition() -> Result<(), anyhow::Error> {
    let text = r#"
textures/a { { map textures/old.tga } }
textures/b { { map textures/b.tga } }
textures/a { { map textures/new.tga } }
"#;
    let script = ShaderReader::parse_script(text)?;
    assert_eq!(script.shaders.len(), 2);
    assert_eq!(script.shaders[0].name, "textures/a");
    assert_eq!(script.shaders[0].stages.len(), 1);
    assert_eq!(script.shaders[0].stages[0].maps, vec!["textures/new.tga"]);
    assert_eq!(script.shaders[1].name, "textures/b");
    Ok(())
}

#[test]
fn directive_arguments_are_skipped() -> Result<(), anyhow::Error> {
    let text = r#"
textures/sky
{
	skyparms env/sky 512 -
	surfaceparm sky
	{
		map textures/sky.tga
	}
}
"#;
    let script = ShaderReader::parse_script(text)?;
    assert_eq!(script.shaders[0].stages.len(), 1);
    assert_eq!(script.shaders[0].stages[0].maps, vec!["textures/sky.tga"]);
    Ok(())
}
