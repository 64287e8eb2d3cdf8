//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_report_adapter;
pub mod text_report_adapter;

use std::fs;
use std::path::Path;

use crate::domain::error::QuantsimError;

/// Writes `contents` to `output_path`, creating parent directories.
pub(crate) fn write_output(output_path: &str, contents: &str) -> Result<(), QuantsimError> {
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
