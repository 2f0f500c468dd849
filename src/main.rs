use std::collections::{HashMap, HashSet};

use anyhow::Context;
use clap::Parser;
use log::{error, info, trace};

use q3_assets::asset_graph::AssetGraph;
use q3_assets::asset_graph::key::sanitize;
use q3_assets::io::common::loader::RawAssetLoader;
use q3_assets::io::fs::loader::FsLoader;
use q3_assets::manifest;

use crate::settings::{CliArgs, Command, map_path};

mod settings;

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    trace!("Starting with args: {:?}", args);

    let loader = FsLoader::new(&args.base_dir)
        .with_context(|| format!("Failed to enumerate base directory {}", args.base_dir))?;
    let graph = ingest(&loader);
    info!(
        "Graph has {} assets and {} references",
        graph.vertex_count(),
        graph.edge_count()
    );

    match args.command {
        Command::Maps => {
            for name in graph.maps().keys() {
                println!("{}", name);
            }
        }
        Command::Deps { map_name, names_only } => {
            let path = map_path(&map_name);
            let &map = graph
                .maps()
                .get(&path)
                .with_context(|| format!("No map {} in {}", path, args.base_dir))?;

            if names_only {
                // the graph only knows sanitized names, print the files as they are on disk
                let on_disk: HashMap<String, &str> = loader
                    .files()
                    .iter()
                    .map(|file| (sanitize(file), file.as_str()))
                    .collect();
                let available: HashSet<&str> = on_disk.keys().map(String::as_str).collect();
                for file in manifest::files(&graph, map, &available) {
                    println!("{}", on_disk.get(file).copied().unwrap_or(file));
                }
            } else {
                for vertex in manifest::dependencies(&graph, map) {
                    let asset = &graph.vertex(vertex).data;
                    println!("{} ({:?})", asset.key, asset.ty);
                    for name in &asset.names {
                        println!("    {}", name);
                    }
                }
            }
        }
    }

    Ok(())
}

/// A file that fails to parse is logged and skipped, whatever it added so far stays in the graph.
fn ingest(loader: &impl RawAssetLoader) -> AssetGraph {
    let mut graph = AssetGraph::new();
    for name in loader.files() {
        let Some(buf) = loader.load_raw_owned(name) else {
            continue;
        };

        if let Err(err) = graph.add(name, &buf) {
            error!("Failed to load {}: {}", name, err);
        }
    }
    graph
}
