//! cricd-import: load ball-by-ball scorecards into the statistics API
//!
//! Imports every `*.yaml` scorecard already in the import directory, then
//! keeps watching it for new files. Imported files are renamed to
//! `<name>.complete`; files that fail stay where they are.

mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cricd_client::{ApiClient, ApiConfig};
use cricd_core::{CachingResolver, FileImporter, ImportConfig, DEFAULT_CHUNK_SIZE};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "cricd-import")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Import cricket scorecards as ball-by-ball match events", long_about = None)]
struct Cli {
    /// Directory scanned for scorecard files
    #[arg(long, env = "IMPORT_DIR", default_value = "import")]
    import_dir: PathBuf,

    /// Statistics API host
    #[arg(long, env = "API_HOST", default_value = "localhost")]
    api_host: String,

    /// Statistics API port
    #[arg(long, env = "API_PORT", default_value_t = 3001)]
    api_port: u16,

    /// Events per submission request
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Import what is there and exit instead of watching
    #[arg(long)]
    once: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn import_config(&self) -> ImportConfig {
        ImportConfig::new(&self.import_dir).with_chunk_size(self.chunk_size)
    }

    fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.api_host, self.api_port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    cricd_core::init_tracing(cli.json, level);

    let client = ApiClient::new(cli.api_config()).context("failed to build API client")?;
    info!(
        event = "importer.started",
        api = %client.config().base_url,
        dir = %cli.import_dir.display(),
        version = cricd_core::VERSION,
    );

    let api = Arc::new(client);
    let importer = FileImporter::new(
        cli.import_config(),
        Arc::new(CachingResolver::new(api.as_ref().clone())),
        api.clone(),
        api,
    );

    let summary = importer
        .import_all()
        .await
        .with_context(|| format!("failed to scan {}", cli.import_dir.display()))?;
    info!(
        event = "importer.batch_finished",
        imported = summary.imported.len(),
        failed = summary.failed.len(),
    );

    if cli.once {
        return Ok(());
    }
    watch::watch(&importer, &cli.import_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cricd-import"]).unwrap();
        assert_eq!(cli.chunk_size, 60);
        assert!(!cli.once);
        assert_eq!(cli.import_config().import_dir, PathBuf::from("import"));
    }

    #[test]
    fn test_flags_build_configs() {
        let cli = Cli::try_parse_from([
            "cricd-import",
            "--import-dir",
            "/data/scorecards",
            "--api-host",
            "stats",
            "--api-port",
            "8080",
            "--chunk-size",
            "12",
            "--once",
        ])
        .unwrap();

        assert_eq!(cli.api_config().base_url, "http://stats:8080");
        assert_eq!(cli.import_config().chunk_size, 12);
        assert!(cli.once);
    }
}
