use crate::common::lexer::{Lexer, Token};
use crate::shader::types::{Shader, ShaderScript, ShaderStage};
use crate::ParserError;

pub struct ShaderReader {}

impl ShaderReader {
    pub fn parse_script(text: &str) -> Result<ShaderScript, ParserError> {
        let mut parser = ScriptParser::new(text);
        let mut shaders = Vec::new();

        while let Some(name) = parser.next() {
            if name.is_open_brace() || name.is_close_brace() {
                return Err(unexpected(&name));
            }

            let open = parser.next_or_end()?;
            if !open.is_open_brace() {
                return Err(unexpected(&open));
            }

            let mut shader = Shader {
                name: name.text.to_string(),
                stages: Vec::new(),
            };

            loop {
                let token = parser.next_or_end()?;
                if token.is_close_brace() {
                    break;
                }

                if token.is_open_brace() {
                    shader.stages.push(parser.parse_stage()?);
                } else {
                    // surfaceparm, cull, skyparms, ... don't reference stage maps
                    parser.skip_line(token.line);
                }
            }

            // the engine keeps the last definition of a name, it keeps its first position here
            match shaders.iter().position(|s: &Shader| s.name == shader.name) {
                Some(idx) => shaders[idx] = shader,
                None => shaders.push(shader),
            }
        }

        Ok(ShaderScript { shaders })
    }
}

fn unexpected(token: &Token) -> ParserError {
    ParserError::UnexpectedToken {
        token: token.text.to_string(),
        line: token.line,
    }
}

struct ScriptParser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token<'a>>,
}

impl<'a> ScriptParser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lexer: Lexer::new(text),
            peeked: None,
        }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        self.peeked.take().or_else(|| self.lexer.next())
    }

    fn peek(&mut self) -> Option<&Token<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next();
        }
        self.peeked.as_ref()
    }

    fn next_or_end(&mut self) -> Result<Token<'a>, ParserError> {
        self.next()
            .ok_or(ParserError::UnexpectedEnd { line: self.lexer.line() })
    }

    /// Consumes the arguments of a directive: every following token on the same line.
    fn rest_of_line(&mut self, line: usize) -> Vec<Token<'a>> {
        let mut args = Vec::new();
        while let Some(token) = self.next_on_line(line) {
            args.push(token);
        }
        args
    }

    fn skip_line(&mut self, line: usize) {
        while self.next_on_line(line).is_some() {}
    }

    fn next_on_line(&mut self, line: usize) -> Option<Token<'a>> {
        let token = self.peek()?;
        if token.line != line || token.is_open_brace() || token.is_close_brace() {
            return None;
        }
        self.next()
    }

    fn parse_stage(&mut self) -> Result<ShaderStage, ParserError> {
        let mut stage = ShaderStage::default();

        loop {
            let token = self.next_or_end()?;
            if token.is_close_brace() {
                return Ok(stage);
            }
            if token.is_open_brace() {
                return Err(unexpected(&token));
            }

            let args = self.rest_of_line(token.line);
            match token.text.to_ascii_lowercase().as_str() {
                "map" | "clampmap" => {
                    if let Some(map) = args.first() {
                        push_map(&mut stage, map.text);
                    }
                }
                // animMap <frequency> <map1> ... <map8>
                "animmap" => {
                    for map in args.iter().skip(1) {
                        push_map(&mut stage, map.text);
                    }
                }
                _ => {}
            }
        }
    }
}

fn push_map(stage: &mut ShaderStage, map: &str) {
    if !map.starts_with('$') {
        stage.maps.push(map.to_string());
    }
}
