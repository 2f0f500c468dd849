use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "q3-assets")]
#[command(version)]
#[command(about = "Lists the files a Quake III map depends on")]
pub struct CliArgs {
    /// Unpacked game directory, every file below it gets ingested.
    #[arg(long, env = "Q3ASSETS_BASE_DIR", default_value_t = default_base_dir())]
    pub base_dir: String,

    #[command(subcommand)]
    pub command: Command,
}

pub fn default_base_dir() -> String {
    std::env::current_dir()
        .map(|dir| dir.join("baseq3").to_string_lossy().to_string())
        .unwrap_or_else(|_| "baseq3".to_string())
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lists every map found in the base directory.
    Maps,
    /// Prints everything a map transitively depends on.
    Deps {
        /// Either the full path (`maps/q3dm1.bsp`) or just the map name (`q3dm1`).
        map_name: String,
        /// Only print files that exist in the base directory, one per line.
        #[arg(long)]
        names_only: bool,
    },
}

/// `q3dm1` -> `maps/q3dm1.bsp`, full paths are only sanitized.
pub fn map_path(map_name: &str) -> String {
    let name = q3_assets::asset_graph::key::sanitize(map_name);
    let name = if name.contains('/') { name } else { format!("maps/{}", name) };
    if name.ends_with(".bsp") { name } else { format!("{}.bsp", name) }
}
