use indexmap::IndexMap;
use reqrunner::errors::RunError;
use reqrunner::services::definitions::DefinitionStore;
use reqrunner::services::logger::Logger;
use reqrunner::services::runner::Runner;
use reqrunner::transport::direct::DirectTransport;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("reqrunner: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RunError> {
    let mut args = std::env::args().skip(1);
    let path = args.next().ok_or_else(|| {
        RunError::config("Usage: reqrunner <definition.json> [key=value ...]")
    })?;

    let mut params = IndexMap::new();
    for arg in args {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            RunError::config(format!("Invalid parameter '{}': expected key=value", arg))
        })?;
        params.insert(key.to_string(), value.to_string());
    }

    let logger = Logger::new("reqrunner");
    let base_dir = Path::new(&path).parent().map(Path::to_path_buf);
    let store = Arc::new(DefinitionStore::new(&logger, base_dir));
    let direct = Arc::new(DirectTransport::new(&logger)?);
    let runner = Runner::new(&logger, store, direct, None);

    let file_name = Path::new(&path)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RunError::config(format!("Invalid definition path: {}", path)))?;

    let outcome = runner.run_path(file_name, &params).await?;
    match outcome.parsed_string {
        Some(parsed) => println!("{}", parsed),
        None => println!("{}", outcome.response_string),
    }
    Ok(())
}
