use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::handle::{RotatorCommand, RotatorHandle};
use crate::rotation::{
    DropReason, PollReport, RotationState, Rotator, TriggerOutcome, TriggerSource,
};
use crate::Result;

/// Events emitted by the service so a UI or log sink can follow the rotator
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RotatorEvent {
    /// A transition was accepted; `state` is the new state
    Rotated {
        name: String,
        source: TriggerSource,
        state: RotationState,
    },
    /// The in-flight transition finished (`forced` when released as stuck)
    Completed { name: String, forced: bool },
    /// A trigger was ignored
    Dropped {
        name: String,
        source: TriggerSource,
        reason: DropReason,
    },
    /// A command failed, e.g. an out-of-range jump
    Rejected { name: String, message: String },
}

/// Background task that drives one rotator until shutdown
pub struct RotatorService {
    rotator: Rotator,
    commands: mpsc::UnboundedReceiver<RotatorCommand>,
    event_tx: Option<mpsc::UnboundedSender<RotatorEvent>>,
}

impl RotatorService {
    /// Wrap a rotator; the returned handle talks to the service once it runs
    pub fn new(rotator: Rotator) -> (Self, RotatorHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Self {
            rotator,
            commands: rx,
            event_tx: None,
        };
        (service, RotatorHandle::new(tx))
    }

    /// Set the event sender for UI notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<RotatorEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Send an event (if event channel is configured)
    fn send_event(&self, event: RotatorEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send rotator event: receiver dropped");
            }
        }
    }

    /// Start the rotator and drive it until the shutdown signal
    ///
    /// Keeps rotating when every handle is dropped; only shutdown stops it.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Rotator service '{}' started: {} items, interval={}ms",
            self.rotator.name(),
            self.rotator.state().len(),
            self.rotator.config().interval_ms
        );

        if let Some(outcome) = self.rotator.start() {
            self.report(TriggerSource::Timer, outcome);
        }

        let mut commands_open = true;

        loop {
            let deadline = self.rotator.next_deadline();

            tokio::select! {
                // Handle shutdown signal
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Rotator service '{}' received shutdown signal", self.rotator.name());
                        break;
                    }
                }

                command = self.commands.recv(), if commands_open => {
                    match command {
                        Some(command) => self.handle(command),
                        None => {
                            debug!("All handles for '{}' dropped", self.rotator.name());
                            commands_open = false;
                        }
                    }
                }

                _ = wait_until(deadline) => {
                    let report = self.rotator.poll();
                    self.report_poll(report);
                }
            }
        }

        self.rotator.teardown();
        info!("Rotator service '{}' stopped", self.rotator.name());
    }

    fn handle(&mut self, command: RotatorCommand) {
        debug!("Rotator '{}' command: {:?}", self.rotator.name(), command);
        match command {
            RotatorCommand::Advance => {
                let outcome = self.rotator.advance();
                self.report(TriggerSource::Manual, outcome);
            }
            RotatorCommand::Retreat => {
                let result = self.rotator.retreat();
                self.report_result(TriggerSource::Manual, result);
            }
            RotatorCommand::JumpTo(target) => {
                let result = self.rotator.jump_to(target);
                self.report_result(TriggerSource::Manual, result);
            }
            RotatorCommand::Wheel => {
                let outcome = self.rotator.wheel();
                self.report(TriggerSource::Wheel, outcome);
            }
            RotatorCommand::Pause => {
                self.rotator.pause();
            }
            RotatorCommand::Resume => {
                self.rotator.resume();
            }
            RotatorCommand::HoverEnter => self.rotator.hover_enter(),
            RotatorCommand::HoverLeave => self.rotator.hover_leave(),
            RotatorCommand::CompleteTransition => {
                if self.rotator.complete_transition() {
                    self.send_event(RotatorEvent::Completed {
                        name: self.rotator.name().to_string(),
                        forced: false,
                    });
                }
            }
            RotatorCommand::SetInterval(interval_ms) => {
                if let Err(e) = self.rotator.set_interval(interval_ms) {
                    self.reject(e);
                }
            }
            RotatorCommand::Snapshot(reply) => {
                // Caller may have given up waiting
                let _ = reply.send(self.rotator.snapshot());
            }
        }
    }

    fn report(&self, source: TriggerSource, outcome: TriggerOutcome) {
        let name = self.rotator.name().to_string();
        let event = match outcome {
            TriggerOutcome::Accepted => RotatorEvent::Rotated {
                name,
                source,
                state: self.rotator.state().clone(),
            },
            TriggerOutcome::Dropped(reason) => RotatorEvent::Dropped {
                name,
                source,
                reason,
            },
        };
        self.send_event(event);
    }

    fn report_result(&self, source: TriggerSource, result: Result<TriggerOutcome>) {
        match result {
            Ok(outcome) => self.report(source, outcome),
            Err(e) => self.reject(e),
        }
    }

    fn report_poll(&self, report: PollReport) {
        if report.completed || report.forced {
            self.send_event(RotatorEvent::Completed {
                name: self.rotator.name().to_string(),
                forced: report.forced,
            });
        }
        if let Some(outcome) = report.tick {
            self.report(TriggerSource::Timer, outcome);
        }
    }

    fn reject(&self, error: crate::Error) {
        warn!("Rotator '{}' rejected command: {}", self.rotator.name(), error);
        self.send_event(RotatorEvent::Rejected {
            name: self.rotator.name().to_string(),
            message: error.to_string(),
        });
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
