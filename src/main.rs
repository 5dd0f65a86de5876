use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use std::path::PathBuf;

use swarm_config::swarm::loader::SwarmLoader;
use swarm_config::swarm::plan::SwarmPlan;
use swarm_config::swarm::prompts::PromptRegistry;
use swarm_config::swarm::settings::Settings;
use swarm_config::swarm::validation::validate;
use swarm_config::SwarmDocument;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a swarm document
    Validate {
        /// Path to the swarm document (defaults to $SWARM_CONFIG)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Directory of prompt templates (defaults to $SWARM_PROMPTS_DIR)
        #[arg(short, long)]
        prompts: Option<PathBuf>,
    },
    /// Re-serialize a swarm document
    Show {
        /// Path to the swarm document (defaults to $SWARM_CONFIG)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Print the stage ordering the swarm type implies
    Plan {
        /// Path to the swarm document (defaults to $SWARM_CONFIG)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the JSON Schema of the document format
    Schema,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let settings = Settings::from_env();

    match args.command {
        Commands::Validate { file, prompts } => {
            let path = file.unwrap_or_else(|| settings.config_path.clone());
            let doc = SwarmLoader::load(&path)?;
            let report = validate(&doc);

            for issue in &report.issues {
                println!("{}", issue);
            }

            if let Some(dir) = prompts.or_else(|| settings.prompts_dir.clone()) {
                let registry = PromptRegistry::load_dir(&dir)
                    .with_context(|| format!("loading prompts from {}", dir.display()))?;
                for agent in registry.unresolved(&doc) {
                    println!("warning: {}: unknown prompt template", agent);
                }
            }

            if !report.is_valid() {
                bail!(
                    "{} is invalid ({} error(s))",
                    path.display(),
                    report.error_count()
                );
            }
            println!(
                "{} is valid: {} agent(s), swarm '{}'",
                path.display(),
                doc.agents.len(),
                doc.swarm_architecture.name
            );
        }
        Commands::Show { file, format } => {
            let path = file.unwrap_or_else(|| settings.config_path.clone());
            let doc = SwarmLoader::load(&path)?;
            let out = match format {
                Format::Yaml => SwarmLoader::to_yaml(&doc)?,
                Format::Json => SwarmLoader::to_json(&doc)?,
            };
            println!("{}", out);
        }
        Commands::Plan { file } => {
            let path = file.unwrap_or_else(|| settings.config_path.clone());
            let doc = SwarmLoader::load_validated(&path)?;
            let plan = SwarmPlan::from_document(&doc)?;
            print!("{}", plan);
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(SwarmDocument);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}
