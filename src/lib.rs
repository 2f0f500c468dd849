pub mod asset_graph;
pub mod io;
pub mod manifest;

pub use q3_files;
