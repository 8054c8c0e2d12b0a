//! Chess Coach Tutor (coach-tutor) - Main entry point
//!
//! Terminal front end for the tutorial catalog: list and validate tutorials,
//! or play one interactively with coach insights from the insight service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coach_common::config::load_module_config;
use coach_common::events::{EventBus, TutorEvent};
use coach_tutor::catalog::{find_piece, Catalog, PIECES};
use coach_tutor::commands::{TutorCommand, HELP};
use coach_tutor::config::{CliOverrides, TutorConfig};
use coach_tutor::cues::{terminal_bell, AudioCues};
use coach_tutor::{render, HttpInsightClient, InsightSource, TutorController};

const MODULE_NAME: &str = "coach-tutor";
const EVENT_CAPACITY: usize = 64;

/// Command-line arguments for coach-tutor
#[derive(Parser, Debug)]
#[command(name = "coach-tutor")]
#[command(about = "Interactive chess tutorials with an AI coach")]
#[command(version)]
struct Args {
    /// TOML config file (default: ~/.config/chess-coach/coach-tutor.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tutorial catalog JSON file (default: built-in tutorials)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tutorials in the catalog
    List,
    /// Replay every tutorial and report inconsistencies
    Validate,
    /// Play a tutorial interactively (default)
    Play(PlayArgs),
}

#[derive(clap::Args, Debug, Default)]
struct PlayArgs {
    /// Tutorial id to start with
    #[arg(short, long)]
    tutorial: Option<String>,

    /// Root URL of the insight service
    #[arg(long)]
    insights_url: Option<String>,

    /// Do not contact the insight service
    #[arg(long)]
    no_insights: bool,

    /// Delay in milliseconds before fetching an insight after navigation
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_module_config(args.config.as_deref(), MODULE_NAME)
        .context("Failed to load configuration")?;

    // Logs go to stderr so they do not interleave with the board on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| toml_config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = args.command.unwrap_or(Command::Play(PlayArgs::default()));
    let play_args = match &command {
        Command::Play(play) => Some(play),
        _ => None,
    };

    let config = TutorConfig::resolve(
        &CliOverrides {
            insights_url: play_args.and_then(|p| p.insights_url.clone()),
            delay_ms: play_args.and_then(|p| p.delay_ms),
            catalog: args.catalog.clone(),
        },
        &toml_config,
    );

    match command {
        Command::List => list(&config),
        Command::Validate => validate(&config),
        Command::Play(play) => run_play(&config, &play).await,
    }
}

fn load_catalog(config: &TutorConfig) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to read catalog {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn list(config: &TutorConfig) -> Result<()> {
    let catalog = load_catalog(config)?;
    for tutorial in catalog.iter() {
        println!(
            "{:<20} {:<13} {:>2} steps  {}",
            tutorial.id,
            tutorial.difficulty.as_str(),
            tutorial.total_steps(),
            tutorial.title
        );
    }
    Ok(())
}

fn validate(config: &TutorConfig) -> Result<()> {
    let catalog = load_catalog(config)?;
    let report = catalog.validate();
    println!("{}", report);

    if !report.is_clean() {
        anyhow::bail!("Catalog has {} issue(s)", report.issues.len());
    }
    Ok(())
}

async fn run_play(config: &TutorConfig, play: &PlayArgs) -> Result<()> {
    let catalog = Arc::new(
        Catalog::load_validated(config.catalog_path.as_deref())
            .context("Failed to load tutorial catalog")?,
    );

    let events = EventBus::new(EVENT_CAPACITY);
    let cues = AudioCues::new();
    let _player = cues.spawn_player(&events, terminal_bell);

    let source: Option<Arc<dyn InsightSource>> = if play.no_insights {
        info!("Coach insights disabled");
        None
    } else {
        let client = HttpInsightClient::new(&config.insights_url)
            .context("Failed to create insight client")?;
        info!("Coach insights from {}", client.endpoint());
        Some(Arc::new(client))
    };

    let controller =
        TutorController::initialize(catalog, events.clone(), source, config.insight_delay)
            .context("Failed to start tutorial session")?;

    if let Some(id) = &play.tutorial {
        if !controller.select_tutorial(id).await {
            warn!("Unknown tutorial '{}', starting with the first one", id);
        }
    }

    let _printer = spawn_insight_printer(&controller, &events);

    print!("{}", render::step(&controller.view().await));
    println!("\nType 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read input")?,
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        let command = match line.parse::<TutorCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let changed = match command {
            TutorCommand::Next => controller.next_step().await,
            TutorCommand::Previous => controller.previous_step().await,
            TutorCommand::GoTo(index) => controller.go_to_step(index).await,
            TutorCommand::Restart => controller.restart().await,
            TutorCommand::Select(id) => {
                let selected = controller.select_tutorial(&id).await;
                if !selected {
                    println!("No tutorial '{}'. Type 'list' to see them.", id);
                }
                selected
            }
            TutorCommand::List => {
                let current = controller.view().await.tutorial_id;
                controller
                    .with_session(|session| {
                        for tutorial in session.catalog().iter() {
                            let marker = if tutorial.id == current { '*' } else { ' ' };
                            println!(
                                " {} {:<20} {:<13} {}",
                                marker, tutorial.id, tutorial.difficulty.as_str(), tutorial.title
                            );
                        }
                    })
                    .await;
                false
            }
            TutorCommand::Insight => {
                if controller.insights_enabled() {
                    println!("Asking the coach...");
                    controller.fetch_insight().await;
                } else {
                    println!("Coach insights are disabled.");
                }
                false
            }
            TutorCommand::Mute => {
                let muted = cues.toggle_mute();
                println!("Sound {}.", if muted { "off" } else { "on" });
                false
            }
            TutorCommand::Pieces(None) => {
                print!("{}", render::piece_guide(&PIECES));
                false
            }
            TutorCommand::Pieces(Some(name)) => {
                match find_piece(&name) {
                    Some(piece) => print!("{}", render::piece_guide(std::slice::from_ref(piece))),
                    None => println!("No piece '{}'. Type 'pieces' to see them all.", name),
                }
                false
            }
            TutorCommand::Show => {
                let view = controller.view().await;
                print!("{}", render::step(&view));
                print!("{}", render::insight(&view));
                false
            }
            TutorCommand::Help => {
                println!("{}", HELP);
                false
            }
            TutorCommand::Quit => break,
        };

        if changed {
            print!("{}", render::step(&controller.view().await));
        }
    }

    info!("Tutor session ended");
    Ok(())
}

/// Print the coach panel whenever a current insight is stored
fn spawn_insight_printer(
    controller: &TutorController,
    events: &EventBus,
) -> tokio::task::JoinHandle<()> {
    let controller = controller.clone();
    let mut rx = events.subscribe();

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(TutorEvent::InsightUpdated { .. }) => {
                    print!("\n{}", render::insight(&controller.view().await));
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {}
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
