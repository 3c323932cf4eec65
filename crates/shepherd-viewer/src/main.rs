//! Terminal viewer for the shepherd vs wolves simulation.
//!
//! Environment:
//! - `SHEPHERD_CONFIG`: path to a JSON [`ViewerConfig`]; defaults otherwise
//! - `SHEPHERD_HEADLESS`: run one simulation to the end without a UI
//! - `SHEPHERD_REPORT`: in headless mode, also write the run report here

mod app;
mod controls;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use shepherd_core::ViewerConfig;
use shepherd_world::Simulation;
use std::io::{self, Stdout};
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

use crate::app::App;
use crate::controls::{intent_for_event, Layout};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = load_config()?;

    if std::env::var_os("SHEPHERD_HEADLESS").is_some() {
        telemetry::init_stderr()?;
        return run_headless(config);
    }

    telemetry::init_file(&config.log_file)?;
    info!(
        rows = config.simulation.rows,
        cols = config.simulation.cols,
        ticks_per_second = config.ticks_per_second,
        "Starting shepherd viewer"
    );

    run_interactive(config).await
}

fn load_config() -> Result<ViewerConfig> {
    match std::env::var_os("SHEPHERD_CONFIG") {
        Some(path) => ViewerConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.to_string_lossy())),
        None => Ok(ViewerConfig::default()),
    }
}

fn run_headless(config: ViewerConfig) -> Result<()> {
    let mut simulation = Simulation::new(config.simulation)?;
    let report = simulation.run();
    let json = serde_json::to_string_pretty(&report)?;

    if let Some(path) = std::env::var_os("SHEPHERD_REPORT") {
        std::fs::write(&path, &json)
            .with_context(|| format!("failed to write report to {}", path.to_string_lossy()))?;
        info!(path = %path.to_string_lossy(), "Report written");
    }

    println!("{}", json);
    Ok(())
}

async fn run_interactive(config: ViewerConfig) -> Result<()> {
    let mut app = App::new(config.simulation.clone())?;
    let grid = *app.simulation().state().grid();
    let layout = Layout::new(grid.rows, grid.cols);

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)
        .context("failed to enter alternate screen")?;

    let result = run_event_loop(&mut app, &layout, &mut stdout, config.ticks_per_second).await;

    if let Err(err) = execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }

    info!(tick = app.snapshot().tick, "Viewer closed");
    result
}

async fn run_event_loop(
    app: &mut App,
    layout: &Layout,
    stdout: &mut Stdout,
    ticks_per_second: u32,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut frames = interval(Duration::from_secs_f64(1.0 / f64::from(ticks_per_second)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                app.on_frame();
                render::draw(stdout, layout, &app.snapshot(), app.is_running())?;
            }
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                let event = event.context("failed to read terminal event")?;

                if let Some(intent) = intent_for_event(&event, layout) {
                    app.apply(intent)?;
                    if app.should_quit() {
                        break;
                    }
                    render::draw(stdout, layout, &app.snapshot(), app.is_running())?;
                }
            }
            _ = &mut shutdown => {
                break;
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(?err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(?err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
