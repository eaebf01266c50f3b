//! Async driver running a session against wall-clock time.
//!
//! One interval drives ticks; commands arrive on an mpsc channel and are
//! applied between ticks. Every step change or resume restarts the interval,
//! so a fresh step always gets a full first second.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, Interval, MissedTickBehavior};

use crate::execution::session::{ExecutionSession, SessionCommand, TickOutcome};
use crate::storage::config::ExecutionSettings;
use crate::workouts::types::SessionStatus;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 64;
/// Shortest tick period; a zero interval from config is raised to this.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Published after every tick or command that did something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub outcome: TickOutcome,
    pub status: SessionStatus,
    pub cursor: usize,
    /// Value of the main clock
    pub display_seconds: u32,
    pub elapsed_seconds: u32,
}

impl SessionEvent {
    fn capture<S: ExecutionSession>(session: &S, outcome: TickOutcome) -> Self {
        Self {
            outcome,
            status: session.status(),
            cursor: session.cursor(),
            display_seconds: session.display_seconds(),
            elapsed_seconds: session.elapsed_seconds(),
        }
    }
}

/// Driver errors.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Session has already ended")]
    SessionEnded,
}

/// Controller for a running session. Dropping every handle stops it.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Deliver a command to the session task.
    pub async fn send(&self, command: SessionCommand) -> Result<(), DriverError> {
        self.commands.send(command).await.map_err(|_| DriverError::SessionEnded)
    }

    /// Deliver a command from a thread outside the runtime.
    pub fn blocking_send(&self, command: SessionCommand) -> Result<(), DriverError> {
        self.commands.blocking_send(command).map_err(|_| DriverError::SessionEnded)
    }

    pub async fn toggle_pause(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::TogglePause).await
    }

    pub async fn skip_forward(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::SkipForward).await
    }

    pub async fn skip_backward(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::SkipBackward).await
    }

    pub async fn stop(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::Stop).await
    }

    pub async fn complete_set(&self) -> Result<(), DriverError> {
        self.send(SessionCommand::CompleteSet).await
    }

    pub async fn toggle_set(
        &self,
        exercise_id: impl Into<String>,
        set_id: impl Into<String>,
    ) -> Result<(), DriverError> {
        self.send(SessionCommand::ToggleSet {
            exercise_id: exercise_id.into(),
            set_id: set_id.into(),
        })
        .await
    }

    pub async fn adjust_rest(&self, delta: i32) -> Result<(), DriverError> {
        self.send(SessionCommand::AdjustRest(delta)).await
    }

    /// Receive events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

/// A session spawned onto the runtime.
pub struct RunningSession<T> {
    pub handle: SessionHandle,
    /// Subscribed before the first tick, so nothing is missed
    pub events: broadcast::Receiver<SessionEvent>,
    /// Resolves to the summary once the session finishes
    pub task: JoinHandle<T>,
}

/// Spawn `session` onto the tokio runtime.
pub fn spawn_session<S>(session: S, settings: ExecutionSettings) -> RunningSession<S::Summary>
where
    S: ExecutionSession + Send + 'static,
    S::Summary: Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, event_rx) = broadcast::channel(EVENT_BUFFER);

    let task = tokio::spawn(run_session(session, settings, command_rx, event_tx.clone()));

    RunningSession {
        handle: SessionHandle {
            commands: command_tx,
            events: event_tx,
        },
        events: event_rx,
        task,
    }
}

fn interval_for(period: Duration) -> Interval {
    let period = period.max(MIN_PERIOD);
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn publish<S: ExecutionSession>(events: &broadcast::Sender<SessionEvent>, session: &S, outcome: TickOutcome) {
    if outcome == TickOutcome::Idle {
        return;
    }
    // No subscribers is fine.
    let _ = events.send(SessionEvent::capture(session, outcome));
}

/// Drive `session` until it finishes or every command sender is dropped.
pub async fn run_session<S: ExecutionSession>(
    mut session: S,
    settings: ExecutionSettings,
    mut commands: mpsc::Receiver<SessionCommand>,
    events: broadcast::Sender<SessionEvent>,
) -> S::Summary {
    let mut period = session.tick_period(&settings);
    let mut interval = interval_for(period);

    tracing::info!(steps = session.len(), period_ms = period.as_millis() as u64, "Session driver started");

    while !session.is_finished() {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = session.tick();
                if let TickOutcome::StepChanged { from, to } = &outcome {
                    tracing::debug!(from, to, "Step expired");
                }
                publish(&events, &session, outcome);
            }
            command = commands.recv() => match command {
                Some(command) => {
                    tracing::debug!(?command, "Applying command");
                    let outcome = session.handle(&command);
                    if outcome.restarts_timer() {
                        interval.reset();
                    }
                    publish(&events, &session, outcome);
                }
                None => {
                    tracing::info!("All session handles dropped, stopping");
                    let outcome = session.stop();
                    publish(&events, &session, outcome);
                }
            }
        }

        let next = session.tick_period(&settings);
        if next != period {
            period = next;
            interval = interval_for(period);
        }
    }

    tracing::info!(
        elapsed_seconds = session.elapsed_seconds(),
        completed = session.completed_count(),
        total = session.total_count(),
        "Session finished"
    );
    session.summary()
}
