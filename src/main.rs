//! RepFlow - Workout Sequencing and Timer Engine
//!
//! Runs a workout document in the terminal. Commands are read from stdin, one
//! per line: `p` pause/resume, `n` next, `b` back, `s` stop, `c` complete set,
//! `+`/`-` adjust rest, `t <exercise id> <set id>` toggle a set.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use repflow::execution::driver::{spawn_session, RunningSession, SessionHandle};
use repflow::execution::session::{ExecutionSession, SessionCommand, TickOutcome};
use repflow::execution::{AerobicSession, AutoplaySession, StrictSession};
use repflow::metrics::summary::{AerobicPlan, AutoplayPlan, StrictPlan};
use repflow::storage::config::{load_config, AppConfig};
use repflow::workouts::aerobic::{AerobicEditor, Sport};
use repflow::workouts::document::{load_document, WorkoutDocument};
use repflow::workouts::duration::{format_compact, format_time};
use repflow::workouts::ids::default_ids;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RepFlow v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;

    let document = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_document(&path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            tracing::info!("No workout given, using the default aerobic plan");
            let editor = AerobicEditor::with_default_plan("Default plan", Sport::Running, default_ids());
            WorkoutDocument::Aerobic(editor.into_workout())
        }
    };

    match document {
        WorkoutDocument::Aerobic(workout) => {
            let plan = AerobicPlan::from_workout(&workout);
            tracing::info!(
                "'{}': {} blocks, {} steps, {}",
                workout.name,
                plan.block_count,
                plan.step_count,
                format_compact(plan.planned_seconds)
            );
            let summary = drive(AerobicSession::new(&workout)?, &config).await?;
            tracing::info!("Finished in {}", summary.elapsed_display);
            for zone in &summary.zones {
                tracing::info!("  {}: {}", zone.zone, format_time(zone.seconds));
            }
            tracing::info!("Blocks completed: {}/{}", summary.blocks_completed, summary.total_blocks);
        }
        WorkoutDocument::Autoplay(workout) => {
            let plan = AutoplayPlan::from_workout(&workout);
            tracing::info!(
                "'{}': {} items, {} total",
                workout.name,
                plan.item_count,
                format_compact(plan.total_seconds())
            );
            let session = AutoplaySession::new(&workout, config.execution.prestart_count)?;
            let summary = drive(session, &config).await?;
            tracing::info!(
                "Finished in {}: work {}, rest {}",
                summary.elapsed_display,
                format_time(summary.work_seconds),
                format_time(summary.rest_seconds)
            );
        }
        WorkoutDocument::Strict(workout) => {
            let plan = StrictPlan::from_exercises(&workout.exercises);
            tracing::info!(
                "'{}': {} exercises, {} sets, {} supersets, {} planned",
                workout.name,
                plan.exercise_count,
                plan.set_count,
                plan.superset_count,
                plan.volume_display()
            );
            let summary = drive(StrictSession::new(workout.exercises)?, &config).await?;
            tracing::info!(
                "Finished in {}: {}/{} sets, volume {}",
                summary.elapsed_display,
                summary.completed_sets,
                summary.total_sets,
                summary.volume_display
            );
        }
    }

    Ok(())
}

/// Run a session to completion while logging its events.
async fn drive<S>(session: S, config: &AppConfig) -> anyhow::Result<S::Summary>
where
    S: ExecutionSession + Send + 'static,
    S::Summary: Send + 'static,
{
    let RunningSession { handle, mut events, task } = spawn_session(session, config.execution.clone());

    spawn_console(handle.clone(), config.execution.rest_adjust_step_secs);

    let logger = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event.outcome {
                TickOutcome::Counted => {
                    tracing::debug!("{} ({})", format_time(event.display_seconds), event.elapsed_seconds)
                }
                TickOutcome::PrestartCount(0) => tracing::info!("GO"),
                TickOutcome::Finished => break,
                outcome => tracing::info!("{:?} at step {} [{}]", outcome, event.cursor, event.status),
            }
        }
    });

    let summary = task.await.context("Session task failed")?;
    drop(handle);
    let _ = logger.await;
    Ok(summary)
}

/// Forward stdin lines as commands. Runs on a plain thread so a pending read
/// never holds up runtime shutdown.
fn spawn_console(handle: SessionHandle, rest_step: u32) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match SessionCommand::parse(&line, rest_step) {
                Some(command) => {
                    if handle.blocking_send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => tracing::warn!("Unknown command '{}'", line.trim()),
            }
        }
    });
}
