use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "scholar-agent",
    version,
    about = "Tool-calling agents and structured extraction for scientific papers"
)]
pub struct Cli {
    /// Path to scholar.toml
    #[arg(long, global = true)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a query with the super agent, or with one named agent
    Agent {
        #[arg(long)]
        agent: Option<String>,
        #[arg(long)]
        max_loops: Option<usize>,
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Extract structured records from documents
    Extract {
        /// Files, or directories whose PDFs should be processed
        paths: Vec<PathBuf>,
    },
}
