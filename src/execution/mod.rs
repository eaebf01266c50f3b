//! Session state machines and their async driver.

pub mod aerobic;
pub mod autoplay;
pub mod driver;
pub mod session;
pub mod strict;
pub mod timer;

pub use aerobic::AerobicSession;
pub use autoplay::AutoplaySession;
pub use driver::{spawn_session, RunningSession, SessionEvent, SessionHandle};
pub use session::{ExecutionSession, SessionCommand, TickOutcome};
pub use strict::StrictSession;
pub use timer::{StepTimer, TimerMode};
