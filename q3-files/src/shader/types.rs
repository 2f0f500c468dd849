#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShaderStage {
    /// Every texture map the stage samples, `animMap` frames included. Engine provided images
    /// like `$lightmap` are not listed.
    pub maps: Vec<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Shader {
    pub name: String,
    pub stages: Vec<ShaderStage>,
}

/// A `.shader` file: shader definitions in the order they appear.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ShaderScript {
    pub shaders: Vec<Shader>,
}
