use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use perplexity_integration::{config::DEFAULT_SETTINGS_PATH, load_settings_from, PerplexityClient};
use refine_core::{EditingSession, Generator, RefinementController, RefinementHistory};
use shared::{
    domain::{ContentType, Platform, PresetInstruction},
    error::FailureReport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Parser, Debug)]
#[command(name = "refiner", about = "Draft and iteratively refine social media posts")]
struct Cli {
    /// Settings file; missing files fall back to defaults and environment.
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the preset refinement instructions.
    Presets,
    /// Generate a first version of a post about a topic.
    Draft {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "trend_analysis")]
        content_type: String,
        #[arg(long)]
        platform: Platform,
        #[arg(long)]
        json: bool,
    },
    /// Apply one or more refinement instructions in order.
    Refine {
        #[arg(long)]
        platform: Platform,
        #[command(flatten)]
        source: ContentSource,
        /// Free-form instruction, or `preset:<label>` for a preset.
        #[arg(short, long = "instruction", required = true)]
        instructions: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Interactive refinement with revert and redo.
    Session {
        #[arg(long)]
        platform: Platform,
        #[command(flatten)]
        source: ContentSource,
    },
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
struct ContentSource {
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    content_file: Option<PathBuf>,
    /// Draft the starting content from this topic.
    #[arg(long)]
    topic: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Presets => {
            for preset in PresetInstruction::ALL {
                println!("{:<16} {}", preset.label(), preset.text());
            }
        }
        Command::Draft {
            topic,
            content_type,
            platform,
            json,
        } => {
            let controller = connect(&cli.config)?;
            let history = controller
                .draft(&topic, &ContentType::parse(&content_type), platform)
                .await
                .map_err(report)?;
            emit(&history, json)?;
        }
        Command::Refine {
            platform,
            source,
            instructions,
            json,
        } => {
            let instructions = instructions
                .iter()
                .map(|raw| resolve_instruction(raw))
                .collect::<Result<Vec<_>>>()?;
            let controller = connect(&cli.config)?;
            let mut history = initial_history(&controller, &source, platform)
                .await?
                .ok_or_else(|| anyhow!("provide --content, --content-file or --topic"))?;
            for instruction in &instructions {
                controller
                    .refine(&mut history, instruction, platform)
                    .await
                    .map_err(report)?;
            }
            emit(&history, json)?;
        }
        Command::Session { platform, source } => {
            let controller = connect(&cli.config)?;
            let mut session = EditingSession::new();
            if let Some(history) = initial_history(&controller, &source, platform).await? {
                session.insert(platform, history);
            }
            info!(session = %session.id(), %platform, "editing session started");
            repl::run(&controller, &mut session, platform).await?;
        }
    }

    Ok(())
}

fn connect(config: &Path) -> Result<RefinementController<PerplexityClient>> {
    let settings = load_settings_from(config, |key| std::env::var(key).ok())?;
    let client = PerplexityClient::from_settings(&settings)?;
    info!(model = client.model(), endpoint = %client.endpoint(), "generation backend ready");
    Ok(RefinementController::new(client))
}

async fn initial_history<G: Generator>(
    controller: &RefinementController<G>,
    source: &ContentSource,
    platform: Platform,
) -> Result<Option<RefinementHistory>> {
    if let Some(content) = &source.content {
        return Ok(Some(RefinementHistory::with_original(content.clone())));
    }
    if let Some(path) = &source.content_file {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read content file '{}'", path.display()))?;
        return Ok(Some(RefinementHistory::with_original(content.trim_end())));
    }
    if let Some(topic) = &source.topic {
        let history = controller
            .draft(topic, &ContentType::TrendAnalysis, platform)
            .await
            .map_err(report)?;
        return Ok(Some(history));
    }
    Ok(None)
}

fn resolve_instruction(raw: &str) -> Result<String> {
    match raw.strip_prefix("preset:") {
        Some(label) => PresetInstruction::from_label(label)
            .map(|preset| preset.text().to_string())
            .ok_or_else(|| {
                let known: Vec<_> = PresetInstruction::ALL.iter().map(|p| p.label()).collect();
                anyhow!("unknown preset '{label}' (known: {})", known.join(", "))
            }),
        None if raw.trim().is_empty() => bail!("instructions must not be empty"),
        None => Ok(raw.to_string()),
    }
}

fn report(err: refine_core::RefineError) -> anyhow::Error {
    let report = FailureReport::from(&err);
    anyhow!("{:?}: {}", report.code, report.message)
}

fn emit(history: &RefinementHistory, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(history)?);
    } else if let Some(current) = history.current() {
        println!("{}", current.content);
    }
    Ok(())
}

pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
