pub mod output;

pub use output::{create_writer, OutputFormat, OutputWriter};

use crate::core::MetricsBlock;
use crate::errors::RecordError;
use std::fs;
use std::path::Path;

/// Read a count block from a JSON record file.
///
/// The parse is lenient about cell values (strings, nulls and other garbage
/// deserialize to coercible placeholders) but the file itself must be a
/// JSON object keyed by category.
pub fn read_block(path: &Path) -> Result<MetricsBlock, RecordError> {
    let content = fs::read_to_string(path).map_err(|err| RecordError::io(path, err))?;
    let block: MetricsBlock =
        serde_json::from_str(&content).map_err(|err| RecordError::parse(path, err))?;
    log::debug!(
        "Loaded {} categories from {}",
        block.len(),
        path.display()
    );
    Ok(block)
}
