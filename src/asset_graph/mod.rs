//! The dependency graph over game content.
//!
//! Every logical asset is one vertex, keyed by its canonical name (see [`key`]), and every
//! reference from one asset to another is a single edge. Walking the outgoing edges of a map
//! yields everything that has to be shipped together with it.
//!
//! Note on direction: edges point from the referencing asset to the referenced one, with one
//! twist. Shader scripts are never referenced by anything, the game only ever asks for shader
//! names. A shader therefore has an edge to the script that defines it, meaning "extracting this
//! shader requires the script", not "the script is built from the shader":
//!
//! ```text
//!                            / -> scripts/base_wall.shader
//! textures/base_wall/foobar -> textures/base_wall/foobar_stage1.texture
//!                            \ -> textures/base_wall/foobar_stage2.texture
//! ```
//!
//! The graph is append only and is built by feeding files through [`AssetGraph::add`] one by one.
//! Cycles are legal (a shader stage may sample a texture named like the shader itself).

pub mod directed_graph;
pub mod key;
mod processors;


use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;

use log::{info, trace, warn};

use q3_files::ParserError;
use q3_files::bsp::reader::BspReader;
use q3_files::md3::reader::Md3Reader;
use q3_files::shader::reader::ShaderReader;

use crate::asset_graph::directed_graph::{DirectedGraph, Edge, EdgeId, Vertex, VertexId};
use crate::asset_graph::key::{AssetType, asset_key, extension, sanitize};

#[derive(Debug, Clone)]
pub struct Asset {
    pub key: String,
    /// Every raw reference that resolved to `key`, first seen first.
    pub names: Vec<String>,
    pub ty: AssetType,
}

#[derive(Debug, Default)]
pub struct AssetGraph {
    graph: DirectedGraph<Asset>,
    // canonical key -> vertex, for the deduplication of references
    asset_vertices: HashMap<String, VertexId>,
    maps: BTreeMap<String, VertexId>,
}

impl AssetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the vertex for `name`, creating it on first sight. Repeated calls with names that
    /// normalize to the same key always return the same vertex.
    ///
    /// When the key is already known under a different type, the first classification is kept.
    pub fn register_asset(&mut self, name: &str, ty: AssetType) -> VertexId {
        let key = asset_key(name, ty);

        let id = match self.asset_vertices.get(&key) {
            Some(&id) => {
                let existing = self.graph.vertex(id).data.ty;
                if existing != ty {
                    warn!(
                        "{} is already known as {:?}, ignoring the reference as {:?} from {}",
                        key, existing, ty, name
                    );
                }
                id
            }
            None => {
                let id = self.graph.add_vertex(Asset {
                    key: key.clone(),
                    names: Vec::new(),
                    ty,
                });
                self.asset_vertices.insert(key, id);
                id
            }
        };

        let names = &mut self.graph.vertex_mut(id).data.names;
        if !names.iter().any(|known| known == name) {
            names.push(name.to_string());
        }

        id
    }

    /// Adds `source -> dest` unless that edge already exists. Returns the new edge, if any.
    pub fn add_reference(&mut self, source: VertexId, dest: VertexId) -> Option<EdgeId> {
        if self.graph.successors(source).any(|target| target == dest) {
            return None;
        }

        trace!(
            "adding reference from {} to {}",
            self.graph.vertex(source).data.key,
            self.graph.vertex(dest).data.key
        );
        Some(self.graph.add_edge(source, dest))
    }

    /// Ingests a single file. Maps, models and shader scripts are parsed for their references,
    /// everything else becomes a leaf. A parser error leaves whatever was added before it in place.
    pub fn add(&mut self, name: &str, content: &[u8]) -> Result<VertexId, ParserError> {
        let name = sanitize(name);

        let vertex = match extension(&name) {
            Some("wav") => self.register_asset(&name, AssetType::Audio),
            Some("bsp") => {
                info!("loading map {}", name);
                let map = BspReader::parse_map(&mut Cursor::new(content))?;
                let vertex = self.process_map(&name, &map);
                self.maps.insert(name.clone(), vertex);
                vertex
            }
            Some("aas") => self.register_asset(&name, AssetType::Aas),
            Some("md3") => {
                info!("loading model {}", name);
                let model = Md3Reader::parse_model(&mut Cursor::new(content))?;
                self.process_model(&name, &model)
            }
            Some("shader") => {
                info!("loading shader {}", name);
                let script = ShaderReader::parse_script(&String::from_utf8_lossy(content))?;
                self.process_script(&name, &script)
            }
            Some("skin") => self.register_asset(&name, AssetType::Skin),
            Some("jpg") | Some("tga") => self.register_asset(&name, AssetType::Texture),
            _ => self.register_asset(&name, AssetType::Misc),
        };

        Ok(vertex)
    }

    /// Every ingested map by its sanitized file name.
    pub fn maps(&self) -> &BTreeMap<String, VertexId> {
        &self.maps
    }

    /// All vertices matching `predicate` in ascending id order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Vertex<Asset>>
    where
        P: FnMut(&Vertex<Asset>) -> bool,
    {
        self.graph
            .vertices()
            .iter()
            .filter(|&vertex| predicate(vertex))
            .collect()
    }

    /// Looks up the vertex a reference would resolve to, without registering anything.
    pub fn lookup(&self, name: &str, ty: AssetType) -> Option<VertexId> {
        self.asset_vertices.get(&asset_key(name, ty)).copied()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex<Asset> {
        self.graph.vertex(id)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.graph.edge(id)
    }

    pub fn successors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.successors(id)
    }

    pub fn predecessors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.predecessors(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
