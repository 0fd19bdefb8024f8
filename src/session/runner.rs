//! Async driver for a live session.
//!
//! One tokio task owns the engine and waits on two inputs at once: requests
//! from [`SessionHandle`]s and ticks from the engine's [`IntervalTicker`].
//! Each input is handled to completion before the next is looked at, so no
//! two engine mutations ever interleave.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::engine::{PomodoroEngine, SessionSnapshot};
use super::error::SessionError;
use super::ticker::IntervalTicker;
use crate::tasks::TaskId;

const REQUEST_BUFFER: usize = 32;

#[derive(Debug)]
enum SessionCommand {
    SelectTask(TaskId),
    Toggle,
    Reset,
    FastForward,
    Snapshot,
    Shutdown,
}

#[derive(Debug)]
struct SessionRequest {
    command: SessionCommand,
    reply: oneshot::Sender<SessionSnapshot>,
}

// ============================================================================
// SessionHandle
// ============================================================================

/// Cloneable handle for sending user operations to a running session.
///
/// Every call returns the snapshot taken right after the operation applied.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionRequest>,
}

impl SessionHandle {
    async fn send(&self, command: SessionCommand) -> Result<SessionSnapshot, SessionError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(SessionRequest { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    pub async fn select_task(&self, task_id: TaskId) -> Result<SessionSnapshot, SessionError> {
        self.send(SessionCommand::SelectTask(task_id)).await
    }

    /// Starts or pauses the countdown.
    pub async fn toggle(&self) -> Result<SessionSnapshot, SessionError> {
        self.send(SessionCommand::Toggle).await
    }

    pub async fn reset(&self) -> Result<SessionSnapshot, SessionError> {
        self.send(SessionCommand::Reset).await
    }

    pub async fn fast_forward(&self) -> Result<SessionSnapshot, SessionError> {
        self.send(SessionCommand::FastForward).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.send(SessionCommand::Snapshot).await
    }

    /// Stops the runner. The returned snapshot is the final state.
    pub async fn shutdown(&self) -> Result<SessionSnapshot, SessionError> {
        self.send(SessionCommand::Shutdown).await
    }
}

// ============================================================================
// SessionRunner
// ============================================================================

/// Owns an engine and serializes everything that mutates it.
#[derive(Debug)]
pub struct SessionRunner {
    engine: PomodoroEngine<IntervalTicker>,
    requests: mpsc::Receiver<SessionRequest>,
}

impl SessionRunner {
    pub fn new(engine: PomodoroEngine<IntervalTicker>) -> (Self, SessionHandle) {
        let (tx, requests) = mpsc::channel(REQUEST_BUFFER);
        (Self { engine, requests }, SessionHandle { tx })
    }

    /// Spawns the runner on the current tokio runtime.
    pub fn spawn(
        engine: PomodoroEngine<IntervalTicker>,
    ) -> (SessionHandle, JoinHandle<SessionSnapshot>) {
        let (runner, handle) = Self::new(engine);
        (handle, tokio::spawn(runner.run()))
    }

    /// Runs until shutdown or until every handle is dropped.
    ///
    /// Returns the final snapshot.
    pub async fn run(mut self) -> SessionSnapshot {
        tracing::debug!("session runner started");

        loop {
            tokio::select! {
                request = self.requests.recv() => {
                    let Some(SessionRequest { command, reply }) = request else {
                        tracing::debug!("all session handles dropped");
                        break;
                    };
                    let shutdown = matches!(command, SessionCommand::Shutdown);
                    self.apply(command);
                    if reply.send(self.engine.snapshot()).is_err() {
                        tracing::trace!("requester went away before the reply");
                    }
                    if shutdown {
                        break;
                    }
                }
                _ = self.engine.ticker_mut().tick() => self.engine.tick(),
            }
        }

        tracing::debug!("session runner stopped");
        self.engine.snapshot()
    }

    fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::SelectTask(task_id) => self.engine.select_task(task_id),
            SessionCommand::Toggle => self.engine.toggle_timer(),
            SessionCommand::Reset => self.engine.reset_timer(),
            SessionCommand::FastForward => self.engine.fast_forward(),
            SessionCommand::Snapshot | SessionCommand::Shutdown => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
