use anyhow::{Context, Result};
use diagnostics::*;
use drivelist::{DriveClient, Fetcher, FileSink, KNOWN_FIELDS, load_config};
use std::path::Path;

pub fn list_command(config_path: &Path, out: &Path, fields: Vec<String>) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from: {}", config_path.display()))?;

    let fields = if fields.is_empty() {
        config.additional_fields.clone()
    } else {
        fields
    };
    for name in fields.iter().filter(|f| !KNOWN_FIELDS.contains(&f.as_str())) {
        let name = name.as_str();
        warn!(
            "Unknown additional field {name}, it will be written empty unless the service returns it",
            name: name
        );
    }

    let policy = config.retry_policy()?;
    let client = DriveClient::connect(&config).context("Failed to authenticate with Google Drive")?;
    let sink = FileSink::create(out)
        .with_context(|| format!("Failed to create result file: {}", out.display()))?;

    let mut fetcher = Fetcher::new(&client, fields, policy, sink);
    let summary = fetcher.run().context("Listing failed")?;

    println!(
        "Wrote {} of {} records to {} ({} skipped)",
        summary.emitted,
        summary.listed,
        out.display(),
        summary.skipped
    );
    Ok(())
}
