//! Configuration display command

use std::path::Path;

use anyhow::Result;
use finpath_core::default_config_path;

use super::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!("⚙️  Engine configuration");
    println!("   Source: {}", source);
    if let Some(path) = default_config_path() {
        println!("   Override location: {}", path.display());
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
