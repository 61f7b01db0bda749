//! Command-line surface and pipeline driver.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::codegen;
use crate::error::GenerateError;
use crate::fetch;

/// Default path of the contract endpoint on the source server.
const DEFAULT_ENDPOINT: &str = "/__contract__";

/// Generate a typed TypeScript client from a server's API contract.
#[derive(Parser, Debug)]
#[command(name = "apigen", version, about)]
pub struct Cli {
    /// Base URL of the server exposing the contract document
    #[arg(long, value_name = "URL")]
    pub source: String,

    /// Output path for the generated client
    #[arg(long, value_name = "PATH", default_value = "src/api/client.ts")]
    pub output: PathBuf,

    /// Path of the contract endpoint on the source server
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Leading path prefix to strip from routes before grouping
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Run the full pipeline: fetch, generate, persist.
pub async fn run(cli: Cli) -> Result<(), GenerateError> {
    let document = fetch::fetch_contract(&cli.source, &cli.endpoint).await?;

    debug!(
        version = %document.version,
        prefix = cli.prefix.as_deref().unwrap_or(""),
        "Generating TypeScript client."
    );
    let ts_code = codegen::generate(&document, cli.prefix.as_deref());

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&cli.output, &ts_code)?;

    info!(
        output = %cli.output.display(),
        bytes = ts_code.len(),
        "TypeScript client generated."
    );
    Ok(())
}

/// Run the pipeline and map the result to a process exit code.
pub async fn run_cli(cli: Cli) -> i32 {
    match run(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
