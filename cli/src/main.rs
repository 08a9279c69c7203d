//! CLI entrypoint for gavel
//!
//! This is the session host binary that wires together all layers using
//! dependency injection: the in-memory store behind the store port, the
//! notification center behind the failure side-channel, the JSONL log
//! behind the procedural record, and the presentation bridge behind the
//! projection port.

use anyhow::Result;
use clap::Parser;
use gavel_application::{
    ConnectionState, DocumentStore, NoSessionEventLog, SessionController, SessionEventLog,
    TimerEngine, encode,
};
use gavel_domain::CommitteeState;
use gavel_infrastructure::{
    AccessRules, ConfigLoader, JsonlSessionLog, MemoryDocumentStore, NotificationCenter,
};
use gavel_presentation::{Cli, ConsoleFormatter, PresentationBridge, PresentationWindow, TimerGauge};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config_paths {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // The appender guard must outlive the session for the log to flush
    let _log_guard = match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .init();
            None
        }
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let committee_id = cli
        .committee
        .clone()
        .unwrap_or_else(|| config.session.committee.clone());
    let chair = cli
        .chair
        .clone()
        .unwrap_or_else(|| config.session.chair.clone());
    let defaults = config.defaults.to_session_defaults();

    info!("Hosting committee {} with {} in the chair", committee_id, chair);

    // === Dependency Injection ===
    let notifications = Arc::new(NotificationCenter::new());
    let store = Arc::new(MemoryDocumentStore::with_rules(
        AccessRules::allow_all(),
        notifications.clone(),
    ));

    let event_log: Arc<dyn SessionEventLog> = if config.log.events {
        let dir = config
            .log
            .dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("gavel")))
            .unwrap_or_else(|| PathBuf::from("."));
        match JsonlSessionLog::for_committee(&dir, &committee_id) {
            Some(log) => {
                info!("Procedural record at {}", log.path().display());
                Arc::new(log)
            }
            None => Arc::new(NoSessionEventLog),
        }
    } else {
        Arc::new(NoSessionEventLog)
    };

    // Seed the committee document before any viewer subscribes
    store.write(
        &format!("committees/{}", committee_id),
        encode(&CommitteeState::new(&config.session.name, &chair)),
    );

    let bridge = Arc::new(PresentationBridge::new());
    let window = bridge.open_window();

    let controller = SessionController::start(
        store.clone(),
        &committee_id,
        &chair,
        defaults,
        bridge.clone(),
        event_log,
    )
    .await;
    let timer = TimerEngine::start(
        store.clone(),
        format!("committees/{}/timer", committee_id),
    )
    .await;

    // Render loop: redraw on every replica update until Ctrl-C
    let gauge = TimerGauge::new();
    let mut committee_watch = controller.watch();
    let mut timer_watch = timer.watch();
    let mut connection = controller.connection();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = committee_watch.changed() => {
                if changed.is_err() {
                    break;
                }
                if !cli.quiet {
                    render(&controller, &notifications, &window);
                }
            }
            changed = timer_watch.changed() => {
                if changed.is_err() {
                    break;
                }
                if !cli.quiet {
                    gauge.update(&timer.current());
                }
            }
            changed = connection.changed() => {
                if changed.is_err() {
                    break;
                }
                if !cli.quiet && *connection.borrow() == ConnectionState::Connecting {
                    println!("{}", ConsoleFormatter::disconnected());
                }
            }
        }
    }

    // Teardown: every subscription and interval is released here
    gauge.finish();
    window.close();
    timer.shutdown();
    controller.shutdown();
    info!("Session host stopped");

    Ok(())
}

fn render(
    controller: &SessionController,
    notifications: &NotificationCenter,
    window: &PresentationWindow,
) {
    println!();
    println!("{}", ConsoleFormatter::stats(&controller.stats()));
    println!("{}", ConsoleFormatter::motions(&controller.ranked_motions()));

    if let Some(committee) = controller.current()
        && let Some(caucus) = committee.caucuses.values().last()
    {
        println!("{}", ConsoleFormatter::queue(caucus));
    }

    println!("Projector: {}", window.current().label());

    let pending = notifications.active();
    if !pending.is_empty() {
        println!("{}", ConsoleFormatter::notices(&pending));
    }
}
