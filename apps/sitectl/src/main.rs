use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use shared::markup::PageMarkup;
use site_core::{
    analytics::{AnalyticsHook, TracingAnalytics},
    config::load_settings,
    drafts::{FileStorage, LocalStorage, MemoryStorage},
    submission::ChannelSink,
    Services, SiteRuntime,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::{interval, Instant, MissedTickBehavior},
};
use tracing::{info, warn};

mod outbox;
mod script;

use outbox::{spawn_outbox, JsonLinesOutbox, LogOutbox, SubmissionOutbox};

#[derive(Parser, Debug)]
struct Args {
    /// Page description (TOML).
    markup: PathBuf,
    #[arg(long, default_value = "site.toml")]
    settings: PathBuf,
    /// JSON-lines script to replay on a virtual clock; stdin drives the page in
    /// real time when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Persist form drafts to this JSON file instead of memory.
    #[arg(long)]
    drafts: Option<PathBuf>,
    /// Append completed submissions to this JSON-lines file.
    #[arg(long)]
    outbox: Option<PathBuf>,
    #[arg(long)]
    analytics: bool,
    /// Wall-clock tick for interactive mode, in milliseconds.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(&args.settings)?;
    let raw = fs::read_to_string(&args.markup)
        .with_context(|| format!("failed to read markup '{}'", args.markup.display()))?;
    let markup: PageMarkup = toml::from_str(&raw)
        .with_context(|| format!("failed to parse markup '{}'", args.markup.display()))?;

    let outbox: Box<dyn SubmissionOutbox> = match &args.outbox {
        Some(path) => Box::new(JsonLinesOutbox::open(path).await?),
        None => Box::new(LogOutbox),
    };
    let (tx, rx) = mpsc::unbounded_channel();
    let delivery = spawn_outbox(outbox, rx);

    let storage: Box<dyn LocalStorage> = match &args.drafts {
        Some(path) => Box::new(FileStorage::new(path.clone())),
        None => Box::new(MemoryStorage::default()),
    };
    let services = Services {
        storage,
        sink: Box::new(ChannelSink::new(tx)),
        analytics: args
            .analytics
            .then(|| Box::new(TracingAnalytics) as Box<dyn AnalyticsHook>),
    };

    let mut runtime = SiteRuntime::start(&markup, settings, services);
    runtime.track_page_view();

    match &args.script {
        Some(path) => {
            let script = fs::read_to_string(path)
                .with_context(|| format!("failed to read script '{}'", path.display()))?;
            let mut stdout = io::stdout().lock();
            let steps = script::run_script(&mut runtime, &script, &mut stdout)?;
            stdout.flush()?;
            info!(steps, "script finished");
        }
        None => run_interactive(&mut runtime, Duration::from_millis(args.tick_ms)).await?,
    }

    // Dropping the runtime closes the submission channel.
    drop(runtime);
    let delivered = delivery.await?;
    info!(delivered, "outbox drained");
    Ok(())
}

/// Reads steps from stdin while the page clock follows wall time.
async fn run_interactive(runtime: &mut SiteRuntime, tick: Duration) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    info!("reading page steps from stdin");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let now = Instant::now();
                runtime.advance(now - last);
                last = now;

                match script::parse_line(&line) {
                    Ok(Some(step)) => {
                        let report = script::apply(runtime, step);
                        println!("{}", serde_json::to_string(&report)?);
                    }
                    Ok(None) => {}
                    Err(error) => warn!(%error, "ignoring step"),
                }
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                runtime.advance(now - last);
                last = now;
            }
        }
    }
    Ok(())
}
