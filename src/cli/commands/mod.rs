//! CLI command implementations.

mod config;
mod convert;
mod doctor;
mod export;
mod render;
mod serve;

pub use config::run_config;
pub use convert::{format_conversion, run_convert, OutputFormat};
pub use doctor::run_doctor;
pub use export::run_export;
pub use render::run_render;
pub use serve::{router, run_serve};

use std::io::Read;

/// Read a file, or stdin when the path is `-`.
fn read_source(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}
