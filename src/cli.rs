//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Extensions accepted for `--job`; each one is read as text or markdown
pub const JOB_DESCRIPTION_EXTENSIONS: [&str; 3] = ["txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank PDF resumes against a job description with a hosted LLM")]
#[command(long_about = "Score every resume against one job description with a Gemini model call per resume, then print a ranked table and per-resume details")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse and rank resumes against a job description
    Rank {
        /// PDF resumes to analyse, in upload order
        resumes: Vec<PathBuf>,

        /// Path to job description file (TXT, MD, MARKDOWN)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text
        #[arg(long)]
        job_text: Option<String>,

        /// Gemini API key (falls back to GOOGLE_API_KEY)
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Model identifier
        #[arg(short, long)]
        model: Option<String>,

        /// Sampling temperature, 0.0 to 1.0
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Output token limit, 256 to 4096 in steps of 256
        #[arg(long)]
        max_tokens: Option<u32>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show per-resume details in console output
        #[arg(short, long)]
        detailed: bool,

        /// Show only the ranking table in console output
        #[arg(long, conflicts_with = "detailed")]
        summary_only: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Record unreadable PDFs as failed rows instead of aborting
        #[arg(long)]
        skip_unreadable: bool,

        /// Re-extract text even for identical files
        #[arg(long)]
        no_cache: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
