//! Resume ranker: rank PDF resumes against a job description with a hosted LLM

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::Config;
use resume_ranker::error::{RankerError, Result};
use resume_ranker::input::InputManager;
use resume_ranker::llm::{Credential, GeminiClient, ModelConfig};
use resume_ranker::output::{RankingReport, ReportGenerator};
use resume_ranker::processing::batch::{run_session, BatchRunner, SessionInputs, SessionOutcome};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Rank {
            resumes,
            job,
            job_text,
            api_key,
            model,
            temperature,
            max_tokens,
            output,
            save,
            detailed,
            summary_only,
            no_color,
            skip_unreadable,
            no_cache,
        } => {
            // CLI flags override the configuration file
            if let Some(model) = model {
                config.model.name = model;
            }
            if let Some(temperature) = temperature {
                config.model.temperature = temperature;
            }
            if let Some(max_tokens) = max_tokens {
                config.model.max_tokens = max_tokens;
            }
            if let Some(format) = output {
                config.output.format = cli::parse_output_format(&format).map_err(RankerError::InvalidInput)?;
            }
            if detailed {
                config.output.detailed = true;
            }
            if summary_only {
                config.output.detailed = false;
            }
            if no_color {
                config.output.color_output = false;
            }
            config.processing.skip_unreadable |= skip_unreadable;
            if no_cache {
                config.processing.enable_cache = false;
            }
            config.validate()?;

            // Nothing else is looked at until a credential is present
            let api_key = api_key.or_else(|| std::env::var("GOOGLE_API_KEY").ok());
            if Credential::new(api_key.as_deref()).is_none() {
                if let Some(message) = SessionOutcome::NeedsCredential.message() {
                    println!("ℹ️  {}", message);
                }
                return Ok(());
            }

            let job_description = match job {
                Some(path) => {
                    cli::validate_file_extension(&path, &cli::JOB_DESCRIPTION_EXTENSIONS).map_err(|e| {
                        RankerError::InvalidInput(format!("Job description file: {}", e))
                    })?;
                    Some(InputManager::new().read_job_description(&path).await?)
                }
                None => job_text,
            };

            let inputs = SessionInputs {
                api_key,
                job_description,
                resumes,
            };

            let progress = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                progress.set_style(style);
            }
            progress.enable_steady_tick(Duration::from_millis(120));

            let manager = InputManager::new().with_cache(config.processing.enable_cache);
            let mut runner = BatchRunner::new(manager)
                .skip_unreadable(config.processing.skip_unreadable)
                .with_progress(progress.clone());

            let model_config = ModelConfig::from(&config.model);
            info!("Ranking {} resumes with {}", inputs.resumes.len(), model_config.model);

            let outcome = run_session(&inputs, &mut runner, |credential| {
                GeminiClient::new(credential, model_config.clone())
            })
            .await;
            progress.finish_and_clear();

            match outcome? {
                SessionOutcome::Ranked(batch) => {
                    let report = RankingReport::new(batch, &model_config.model);
                    let generator = ReportGenerator::new(config.output.color_output, config.output.detailed);
                    let content = generator.generate(&report, config.output.format)?;

                    match save {
                        Some(path) => {
                            generator.save_report(&content, &path)?;
                            println!("✅ Ranking saved to {}", path.display());
                        }
                        None => println!("{}", content),
                    }
                }
                halted => {
                    if let Some(message) = halted.message() {
                        println!("ℹ️  {}", message);
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Model: {}", config.model.name);
                println!("Endpoint: {}", config.model.endpoint);
                println!("Temperature: {:.2}", config.model.temperature);
                println!("Max Tokens: {}", config.model.max_tokens);
                if let Some(timeout) = config.model.request_timeout_secs {
                    println!("Request Timeout: {}s", timeout);
                }
                println!("\nProcessing:");
                println!("  Text cache: {}", config.processing.enable_cache);
                println!("  Skip unreadable PDFs: {}", config.processing.skip_unreadable);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}
