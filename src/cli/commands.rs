//! CLI definition using clap.
//!
//! One positional query (all remaining words) plus flags:
//! - --json: print the structured response
//! - --kb: knowledge base file
//! - --list-tools: print the available tools
//! - --learn: add a knowledge base entry

use clap::Parser;
use std::path::PathBuf;

/// Dispatchr - answer a question with the right tool
#[derive(Parser, Debug)]
#[command(name = "dispatchr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the full response as JSON
    #[arg(long)]
    pub json: bool,

    /// Knowledge base file (overrides config)
    #[arg(long, value_name = "PATH")]
    pub kb: Option<PathBuf>,

    /// List available tools and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Add an entry to the knowledge base and save it
    #[arg(long, num_args = 2, value_names = ["NAME", "SUMMARY"])]
    pub learn: Option<Vec<String>>,

    /// The question to answer
    #[arg(
        required_unless_present_any = ["list_tools", "learn"],
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub query: Vec<String>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Query words joined with single spaces
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    /// (name, summary) given to --learn
    pub fn learn_entry(&self) -> Option<(&str, &str)> {
        match self.learn.as_deref() {
            Some([name, summary]) => Some((name.as_str(), summary.as_str())),
            _ => None,
        }
    }
}
