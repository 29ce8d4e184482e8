use tokio::sync::{mpsc, oneshot};

use crate::rotation::RotatorSnapshot;
use crate::{Error, Result};

/// Requests understood by `RotatorService`
#[derive(Debug)]
pub enum RotatorCommand {
    Advance,
    Retreat,
    JumpTo(i64),
    Wheel,
    Pause,
    Resume,
    HoverEnter,
    HoverLeave,
    CompleteTransition,
    SetInterval(u64),
    Snapshot(oneshot::Sender<RotatorSnapshot>),
}

/// Cloneable remote control for a running `RotatorService`
///
/// Commands are fire-and-forget; their effect is reported on the service's
/// event channel.
#[derive(Debug, Clone)]
pub struct RotatorHandle {
    tx: mpsc::UnboundedSender<RotatorCommand>,
}

impl RotatorHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<RotatorCommand>) -> Self {
        Self { tx }
    }

    fn send(&self, command: RotatorCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| Error::ServiceClosed)
    }

    pub fn advance(&self) -> Result<()> {
        self.send(RotatorCommand::Advance)
    }

    pub fn retreat(&self) -> Result<()> {
        self.send(RotatorCommand::Retreat)
    }

    pub fn jump_to(&self, target: i64) -> Result<()> {
        self.send(RotatorCommand::JumpTo(target))
    }

    pub fn wheel(&self) -> Result<()> {
        self.send(RotatorCommand::Wheel)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(RotatorCommand::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(RotatorCommand::Resume)
    }

    pub fn hover_enter(&self) -> Result<()> {
        self.send(RotatorCommand::HoverEnter)
    }

    pub fn hover_leave(&self) -> Result<()> {
        self.send(RotatorCommand::HoverLeave)
    }

    /// Signal that the renderer finished the current transition
    pub fn complete_transition(&self) -> Result<()> {
        self.send(RotatorCommand::CompleteTransition)
    }

    pub fn set_interval(&self, interval_ms: u64) -> Result<()> {
        self.send(RotatorCommand::SetInterval(interval_ms))
    }

    /// Ask the service for its current state
    pub async fn snapshot(&self) -> Result<RotatorSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(RotatorCommand::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| Error::ServiceClosed)
    }

    /// Whether the service has stopped accepting commands
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
