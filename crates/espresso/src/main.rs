use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use espresso::commands::{self, theme::ThemeAction, AppContext};
use espresso::config::{espresso_dir, Config, ConfigOverrides};

#[derive(Parser)]
#[command(name = "espresso")]
#[command(version, about = "Read the daily RSS and arXiv digests in your terminal")]
struct Cli {
  /// Site serving data/index.json: an http(s) URL or a local directory
  #[arg(long, global = true, env = "ESPRESSO_SOURCE")]
  source: Option<String>,

  /// Public site URL used in shared links (defaults to the source)
  #[arg(long, global = true, env = "ESPRESSO_SITE_URL")]
  site_url: Option<String>,

  /// Base URL of the podcast audio files
  #[arg(long, global = true, env = "ESPRESSO_PODCAST_URL")]
  podcast_url: Option<String>,

  /// HTTP timeout in seconds
  #[arg(long, global = true)]
  timeout: Option<u64>,

  /// Show placeholder content when a document cannot be loaded
  #[arg(long, global = true)]
  demo: bool,

  /// Output width (defaults to the terminal width)
  #[arg(long, global = true)]
  width: Option<usize>,

  /// More diagnostics on stderr (-v, -vv)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Timeline of available days, newest first
  Index,
  /// Read one day's digest
  Day {
    /// Date of the digest, e.g. 2024-06-01
    date: String,
    /// Category to mark as active
    #[arg(short, long)]
    category: Option<String>,
  },
  /// List a day's categories
  Outline { date: String },
  /// Share a day's page link
  Share { date: String },
  /// Print a day's podcast link
  Podcast { date: String },
  /// Show or toggle the light/dark theme
  Theme {
    #[arg(value_enum, default_value_t = ThemeAction::Show)]
    action: ThemeAction,
  },
  /// Interactive reading session
  Browse,
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  crema::init_tracing("ESPRESSO_LOG", cli.verbose);

  if let Err(e) = run(cli).await {
    crema::error(&format!("{e:#}"));
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<()> {
  let dir = espresso_dir()?;
  let mut config = Config::load_from_dir(&dir)
    .with_context(|| format!("Failed to load configuration from {}", dir.display()))?;
  config.apply(ConfigOverrides {
    source: cli.source,
    site_url: cli.site_url,
    podcast_base_url: cli.podcast_url,
    timeout_secs: cli.timeout,
    demo: cli.demo,
  })?;

  if config.demo {
    crema::info("Demo mode: documents that fail to load are replaced with placeholder content");
  }

  let mut ctx = AppContext::from_config(config, &dir, cli.width)?;

  match cli.command {
    Commands::Index => commands::index::handle(&ctx).await,
    Commands::Day { date, category } => {
      commands::day::handle(&ctx, &date, category.as_deref()).await
    }
    Commands::Outline { date } => commands::outline::handle(&ctx, &date).await,
    Commands::Share { date } => commands::share::handle(&ctx, &date).await,
    Commands::Podcast { date } => commands::podcast::handle(&ctx, &date),
    Commands::Theme { action } => commands::theme::handle(&mut ctx, action),
    Commands::Browse => commands::browse::handle(&mut ctx).await,
  }
}
