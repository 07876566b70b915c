use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use agolabel::app::{Capabilities, event_loop};
use agolabel::display::{self, DisplayConfig, DisplayOptions, DistanceStyle};
use agolabel::ui::LineRenderer;
use agolabel::util::config::AppConfig;
use agolabel::util::time::parse_timestamp;

#[derive(Parser, Debug)]
#[command(
    name = "agolabel",
    version,
    about = "Relative \"time ago\" labels that keep themselves current"
)]
struct Cli {
    /// Target instant: RFC 3339, `YYYY-MM-DD[ HH:MM[:SS]]` or epoch milliseconds
    date: String,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Days in the past before switching to an absolute date
    #[arg(long)]
    past_threshold: Option<f64>,

    /// Days in the future before switching to an absolute date
    #[arg(long)]
    future_threshold: Option<f64>,

    /// Pattern for the date half of absolute renderings, e.g. `MM/dd/yy`
    #[arg(long)]
    date_format: Option<String>,

    /// Pattern for the time half of absolute renderings, e.g. `h:mm a`
    #[arg(long)]
    time_format: Option<String>,

    /// Keep the line up to date until interrupted
    #[arg(short, long)]
    watch: bool,

    /// Refresh interval in milliseconds when watching
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Pick the locale from the preferred-language list instead of the OS locale
    #[arg(short, long)]
    language_preference: bool,

    /// Use qualified phrases ("about 2h") instead of exact units
    #[arg(short, long)]
    approximate: bool,

    /// Enable debug logging to file
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    // Setup logging
    let _guard = setup_logging(&config, cli.debug)?;

    info!("agolabel starting");

    let date = parse_timestamp(&cli.date)?;
    let options = merge_options(&config.display, &cli);
    let display_config =
        DisplayConfig::from_options(date, &options).context("Invalid display options")?;
    let caps = Capabilities::system(config.catalog()?);

    if !cli.watch {
        let rendered = display::render_once(
            &display_config,
            caps.host.as_ref(),
            caps.clock.as_ref(),
            &caps.catalog,
        );
        println!("{}", rendered.text);
        return Ok(());
    }

    watch(display_config, caps).await
}

fn merge_options(base: &DisplayOptions, cli: &Cli) -> DisplayOptions {
    let mut options = base.clone();
    if let Some(days) = cli.past_threshold {
        options.days_passed_threshold = days;
    }
    if let Some(days) = cli.future_threshold {
        options.days_future_threshold = days;
    }
    if let Some(ref pattern) = cli.date_format {
        options.format_date = pattern.clone();
    }
    if let Some(ref pattern) = cli.time_format {
        options.format_time = pattern.clone();
    }
    if let Some(ms) = cli.interval_ms {
        options.time_update_interval_ms = ms;
    }
    if cli.language_preference {
        options.use_language_reference = true;
    }
    if cli.approximate {
        options.style = DistanceStyle::Approximate;
    }
    if cli.watch {
        options.use_time_updates = true;
    }
    options
}

async fn watch(config: DisplayConfig, caps: Capabilities) -> Result<()> {
    let handle = event_loop::mount(config, caps);
    let mut updates = handle.subscribe();

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut renderer = LineRenderer::new(stdout, styled);

    if let Some(rendered) = updates.borrow_and_update().clone() {
        renderer.draw(&rendered)?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(rendered) = updates.borrow_and_update().clone() {
                    renderer.draw(&rendered)?;
                }
            }
        }
    }

    handle.shutdown().await;
    renderer.finish()?;
    Ok(())
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        // Locale fallbacks still reach the terminal.
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("agolabel=warn")),
            )
            .without_time()
            .init();
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "agolabel.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("agolabel=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
