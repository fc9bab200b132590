use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;

mod cli;
mod config;

use cli::Cli;
use config::Config;
use dispatchr::tools::KnowledgeBaseTool;
use dispatchr::{Dispatcher, Response};

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", env!("CARGO_PKG_NAME")));

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let kb_path = cli.kb.as_ref().unwrap_or(&config.knowledge_base.path);
    let mut kb = KnowledgeBaseTool::load(kb_path);

    if let Some((name, summary)) = cli.learn_entry() {
        handle_learn_command(&mut kb, name, summary)?;
    }

    let dispatcher = Dispatcher::standard(kb).context("Failed to build dispatcher")?;

    if cli.list_tools {
        handle_list_tools_command(&dispatcher);
    }

    if cli.query.is_empty() {
        return Ok(());
    }
    handle_query(cli, &dispatcher)
}

fn handle_learn_command(kb: &mut KnowledgeBaseTool, name: &str, summary: &str) -> Result<()> {
    info!("Learning knowledge base entry: {}", name);
    kb.add_entry(name, summary);
    kb.save().context("Failed to save knowledge base")?;
    match kb.path() {
        Some(path) => println!("{} {} ({})", "Learned:".green(), name, path.display()),
        None => println!("{} {}", "Learned:".green(), name),
    }
    Ok(())
}

fn handle_list_tools_command(dispatcher: &Dispatcher) {
    info!("Listing tools");
    for (name, description) in dispatcher.list_available_tools() {
        println!("{} {}", format!("{:<12}", name).cyan(), description);
    }
}

fn handle_query(cli: &Cli, dispatcher: &Dispatcher) -> Result<()> {
    let query = cli.query_text();
    info!("Answering query: {}", query);

    let response = dispatcher.process(&query);

    if cli.json {
        let json = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
        println!("{}", json);
        return Ok(());
    }

    if cli.is_verbose() {
        print_details(&response);
    }
    println!("{}", response.result);
    Ok(())
}

fn print_details(response: &Response) {
    if let Some(tool) = response.tool_used {
        eprintln!("{} {}", "Tool:".green(), tool);
    }
    if let Some(error) = &response.error {
        eprintln!("{} {}", "Error:".red(), error);
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Logging goes to a file so stdout carries only the answer
    if let Err(e) = setup_logging(&config) {
        eprintln!("{} logging disabled: {:#}", "Warning:".yellow(), e);
    }

    match &config.source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
