/// Snippets CLI - drive the card carousel from the terminal
use clap::{Parser, Subcommand};
use snippets_cli::{
    render::{render_event, render_text, window_view},
    JsonFileFeed, Script, Session, SnippetsConfig, Step,
};
use snippets_core::MessageFeed;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snippets-cli")]
#[command(about = "Snippets card carousel with simulated audio", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./snippets.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Message feed file (overrides feed.messages_path)
    #[arg(short, long, global = true)]
    feed: Option<PathBuf>,

    /// Conversation to show (overrides feed.conversation_id)
    #[arg(long, global = true)]
    conversation: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the carousel window for the current feed
    Window {
        /// Rotate by this many steps before printing
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        rotate: i64,
    },
    /// Replay a scripted interaction
    Replay {
        /// Script file (TOML, `[[step]]` tables)
        script: PathBuf,
    },
    /// Poll the feed and print every change
    Watch {
        /// Stop after this many polls
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snippets_cli=info,snippets_carousel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = SnippetsConfig::load(cli.config.as_deref())?;
    if let Some(feed) = cli.feed {
        config.feed.messages_path = feed;
    }
    if let Some(conversation) = cli.conversation {
        config.feed.conversation_id = Some(conversation);
    }
    config.validate()?;

    let mut session = Session::open(&config).await?;

    match cli.command {
        Commands::Window { rotate } => {
            window(&mut session, rotate, cli.json).await?;
        }
        Commands::Replay { script } => {
            replay(&mut session, &script, cli.json).await?;
        }
        Commands::Watch { ticks } => {
            watch(&mut session, &config, ticks, cli.json).await?;
        }
    }

    Ok(())
}

async fn window(
    session: &mut Session<JsonFileFeed>,
    rotate: i64,
    json: bool,
) -> anyhow::Result<()> {
    session.refresh().await?;
    session.carousel_mut().rotate(rotate);
    print_window(session, json)?;
    Ok(())
}

async fn replay(
    session: &mut Session<JsonFileFeed>,
    path: &std::path::Path,
    json: bool,
) -> anyhow::Result<()> {
    let script = Script::load(path).await?;
    tracing::info!("Replaying {} steps from {}", script.steps.len(), path.display());

    session.refresh().await?;
    print_events(session, json)?;

    for step in &script.steps {
        session.run_step(step).await?;
        print_events(session, json)?;
        if *step == Step::Show {
            print_window(session, json)?;
        }
    }

    Ok(())
}

async fn watch(
    session: &mut Session<JsonFileFeed>,
    config: &SnippetsConfig,
    ticks: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut interval = tokio::time::interval(Duration::from_millis(config.feed.poll_interval_ms));
    let mut polls = 0u64;

    tracing::info!(
        "Watching {} every {} ms",
        config.feed.messages_path.display(),
        config.feed.poll_interval_ms
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
            _ = interval.tick() => {
                match session.refresh().await {
                    Ok(true) => {
                        print_events(session, json)?;
                        print_window(session, json)?;
                    }
                    Ok(false) => {}
                    // Keep polling; the next read may succeed
                    Err(e) => tracing::warn!("Refresh failed: {}", e),
                }
                session.pump_audio();

                polls += 1;
                if ticks.is_some_and(|limit| polls >= limit) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn print_window<F: MessageFeed>(session: &Session<F>, json: bool) -> anyhow::Result<()> {
    match window_view(session.carousel()) {
        Some(view) if json => println!("{}", serde_json::to_string(&view)?),
        Some(view) => print!("{}", render_text(&view)),
        None => println!("(no cards)"),
    }
    Ok(())
}

fn print_events<F: MessageFeed>(session: &mut Session<F>, json: bool) -> anyhow::Result<()> {
    for event in session.drain_events() {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("* {}", render_event(&event));
        }
    }
    Ok(())
}
