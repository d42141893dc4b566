//! The `init` command: write a starter configuration file.

use crate::config::{default_config_template, CONFIG_FILE_NAME};
use crate::errors::RecordError;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(RecordError::ConfigExists { path }.into());
    }

    fs::write(&path, default_config_template())
        .map_err(|err| RecordError::write(&path, err))?;
    println!("Created {}", path.display());
    Ok(())
}
