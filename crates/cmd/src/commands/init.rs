use anyhow::{Context, Result};
use diagnostics::*;
use std::path::Path;

pub fn init_command(config_path: &Path) -> Result<()> {
    drivelist::create_example_config(config_path).with_context(|| {
        format!("Failed to create configuration file: {}", config_path.display())
    })?;

    let path = config_path.display().to_string();
    info!("Created example configuration file: {path}", path: path.as_str());
    println!("Created {path}");
    println!("Edit it to add your OAuth client and refresh token, then run:");
    println!("    drivelist list -c {path} -o result.csv");
    Ok(())
}
