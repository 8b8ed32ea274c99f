//! Resume screener: score a resume against a job posting

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::input::InputManager;
use resume_screener::llm::suggestions::StaticSuggestions;
use resume_screener::output::formatter::{save_report_to_file, ReportGenerator};
use resume_screener::output::report::{AnalysisReport, ReportMetadata};
use resume_screener::{AnalysisEngine, Config};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Config::load().context("loading default configuration"),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            skills,
            output,
            save,
            detailed,
            no_llm,
        } => {
            let args = AnalyzeArgs {
                resume,
                job,
                skills,
                output,
                save,
                detailed,
                no_llm,
            };
            run_analyze(args, &config).await
        }
        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    let mut shown = config.clone();
                    if shown.suggestions.api_key.is_some() {
                        shown.suggestions.api_key = Some("********".to_string());
                    }
                    println!("{}", shown.to_toml()?);
                }
                ConfigAction::Reset => {
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Configuration reset: {}", path.display());
                }
                ConfigAction::Path => println!("{}", path.display()),
            }
            Ok(())
        }
    }
}

struct AnalyzeArgs {
    resume: PathBuf,
    job: PathBuf,
    skills: Option<String>,
    output: Option<String>,
    save: Option<PathBuf>,
    detailed: bool,
    no_llm: bool,
}

async fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    let start_time = Instant::now();

    cli::validate_file_extension(&args.resume, &["pdf", "docx", "txt", "md", "markdown"])
        .map_err(anyhow::Error::msg)
        .context("resume file")?;
    cli::validate_file_extension(&args.job, &["toml", "json", "pdf", "docx", "txt", "md", "markdown"])
        .map_err(anyhow::Error::msg)
        .context("job file")?;

    let output_format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg)?,
        None => config.output.format,
    };

    let mut input_manager = InputManager::new();
    let resume_text = input_manager
        .extract_text(&args.resume)
        .await
        .with_context(|| format!("reading resume {}", args.resume.display()))?;
    let posting = input_manager
        .load_job(&args.job, args.skills.as_deref())
        .await
        .with_context(|| format!("reading job {}", args.job.display()))?;

    info!(
        "Analyzing {} ({} chars) against {} required skills",
        args.resume.display(),
        resume_text.len(),
        posting.skills.len()
    );

    let engine = if args.no_llm {
        AnalysisEngine::new(Box::new(StaticSuggestions))
    } else {
        AnalysisEngine::from_config(config)
    };
    let result = engine
        .analyze_requirement(&resume_text, &posting.requirement())
        .await;

    let report = AnalysisReport::new(
        result,
        ReportMetadata {
            resume_path: args.resume.display().to_string(),
            job_path: args.job.display().to_string(),
            job_title: posting.title.clone(),
            required_skill_count: posting.skills.len(),
            generated_at: chrono::Utc::now(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        },
    );

    let generator = ReportGenerator::with_options(config.output.color_output, args.detailed, true, true);
    let rendered = generator.generate_report(&report, output_format)?;
    println!("{}", rendered);

    if let Some(path) = &args.save {
        // Saved files never carry terminal color codes
        let plain = ReportGenerator::with_options(false, args.detailed, true, true);
        let content = plain.generate_report(&report, output_format)?;
        save_report_to_file(&content, path)
            .with_context(|| format!("saving report to {}", path.display()))?;
        info!("Report saved to {}", path.display());
    }

    Ok(())
}
