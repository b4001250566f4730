//! Compose file decoding: raw YAML shapes normalized into one model.

pub mod model;
pub mod parse;
pub mod raw;

pub use model::{Condition, Dependency, Document, Mount, MountKind};
pub use parse::parse;

use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Read and decode a compose file.
pub fn parse_file(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).context("could not read contents")?;
    parse(&bytes)
}
