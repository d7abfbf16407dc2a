//! Resume portfolio: extract structured portfolio data from a resume

use clap::Parser;
use log::{error, info};
use resume_portfolio::cli::{self, Cli, Commands, ConfigAction};
use resume_portfolio::config::Config;
use resume_portfolio::error::{PortfolioError, Result};
use resume_portfolio::input::InputManager;
use resume_portfolio::output::formatter::{save_output_to_file, suggest_filename, ProfileRenderer};
use resume_portfolio::processing::parser::ResumeParser;
use resume_portfolio::processing::skills::categorize_skill;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Extract {
            resume,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, &["pdf", "txt", "md", "markdown"])
                .map_err(|e| PortfolioError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(PortfolioError::InvalidInput)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let document = input_manager.read_document(&resume).await?;
            info!(
                "Decoded {} characters from {} ({})",
                document.text.chars().count(),
                document.source_name,
                document.file_type
            );

            let parser = ResumeParser::with_config(&config.extraction);
            let profile = parser.parse_document(&document.text, &document.source_name);

            // Files never get ANSI escapes
            let use_colors = config.output.color_output && save.is_none();
            let renderer = ProfileRenderer::with_options(
                use_colors,
                detailed || config.output.detailed,
                config.output.pretty_json,
            );
            let rendered = renderer.render(&profile, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &document.source_name))
                    } else {
                        path
                    };
                    save_output_to_file(&rendered, &path)?;
                    println!("✅ Portfolio saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Categorize { skills } => {
            for skill in skills {
                println!("{:<30} {}", skill, categorize_skill(&skill));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| PortfolioError::Configuration(e.to_string()))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
