mod application;
pub mod cli;
pub mod config;
mod constants;
mod domain;
mod infrastructure;

pub use application::{agent, capability, extraction};
pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use domain::types;
pub use infrastructure::model;

use agent::{AgentError, AgentFactory, Executor};
use extraction::{BatchRunner, ExtractionOrchestrator};
use model::factory::ProviderFactory;
use model::{DocumentStore, GenerationPort};
use serde_json::json;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing();
    info!("Starting scholar-agent");
    debug!(config = ?cli.config, command = ?cli.command, "CLI arguments parsed");

    let config_path = cli.config.as_deref().map(Path::new);
    let file_config = AppConfig::load(config_path)?;
    if let Some(path) = config_path {
        info!(path = %path.display(), "Loaded configuration from file");
    } else {
        info!("Loaded configuration from default path");
    }

    let client = ProviderFactory::create(&file_config.provider);
    let port: Arc<dyn GenerationPort> = client.clone();
    let store: Arc<dyn DocumentStore> = client;

    match cli.command {
        Command::Agent {
            agent,
            max_loops,
            prompt,
        } => {
            let query = prompt.join(" ").trim().to_string();
            if query.is_empty() {
                return Err(AgentError::validation("prompt must not be empty").into());
            }
            let factory = AgentFactory::new(&file_config, port);
            let mut executor: Box<dyn Executor> = match agent.as_deref() {
                Some(name) => Box::new(factory.agent(name)?),
                None => Box::new(factory.super_agent()?),
            };
            let loops = max_loops.unwrap_or(file_config.max_loops);
            info!(agent = ?agent, max_loops = loops, "Executing agent workflow from CLI");
            let response = match executor.execute(&query, loops).await {
                Ok(response) => response,
                Err(err) => {
                    error!(error = %err, "Agent workflow failed");
                    eprintln!("{}", err.user_message());
                    return Err(err.into());
                }
            };
            let output = json!({
                "agent": agent,
                "response": response,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Extract { paths } => {
            if paths.is_empty() {
                return Err(AgentError::validation("at least one document path is required").into());
            }
            let documents = resolve_documents(&paths, &file_config.documents_dir)?;
            info!(documents = documents.len(), "Extracting documents");
            let orchestrator =
                ExtractionOrchestrator::new(port, store, file_config.extraction.clone());
            let runner = BatchRunner::new(Arc::new(orchestrator));
            let results = runner.run(&documents).await;

            let output: Vec<_> = documents
                .iter()
                .zip(results)
                .map(|(document, result)| match result {
                    Ok(record) => json!({"document": document, "record": record}),
                    Err(err) => json!({"document": document, "error": err.to_string()}),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    info!("Execution finished");
    Ok(())
}

/// Expand directories into their PDFs and look relative paths that do not
/// exist up in `documents_dir`.
fn resolve_documents(paths: &[PathBuf], documents_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        let path = if path.exists() || path.is_absolute() {
            path.clone()
        } else {
            let stored = documents_dir.join(path);
            if stored.exists() { stored } else { path.clone() }
        };

        if path.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(&path)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|file| {
                    file.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
                })
                .collect();
            found.sort();
            if found.is_empty() {
                warn!(dir = %path.display(), "Directory contains no PDF files");
            }
            documents.extend(found);
        } else {
            documents.push(path);
        }
    }
    Ok(documents)
}

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
