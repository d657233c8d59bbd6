use clap::Parser;
use scholar_agent::Cli;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    scholar_agent::run(Cli::parse()).await
}
