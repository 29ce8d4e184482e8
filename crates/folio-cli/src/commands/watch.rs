use std::time::Duration;

use anyhow::Result;
use clap::ValueEnum;
use tokio::sync::{mpsc, watch};
use tracing::info;

use folio_core::rotation::{CompletionMode, RotatorConfig};
use folio_core::{AppConfig, Rotator, RotatorEvent, RotatorService};
use folio_tui::content::{CORE_SKILLS, PROJECTS, SKILL_CATEGORIES};

/// Panels that can be driven headless
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    Skills,
    Capabilities,
    Cards,
}

impl Panel {
    fn name(self) -> &'static str {
        match self {
            Panel::Skills => "skills",
            Panel::Capabilities => "capabilities",
            Panel::Cards => "cards",
        }
    }

    fn rotator_config(self, config: &AppConfig) -> RotatorConfig {
        let carousel = &config.carousel;
        match self {
            Panel::Skills => carousel.skills.to_rotator_config(SKILL_CATEGORIES.len()),
            Panel::Capabilities => carousel
                .capabilities
                .to_rotator_config(CORE_SKILLS.len()),
            Panel::Cards => {
                // Nothing renders the swap here, so let its declared duration end it
                RotatorConfig {
                    completion: CompletionMode::Timed,
                    ..carousel.cards.to_rotator_config(PROJECTS.len())
                }
            }
        }
    }

    fn item_label(self, index: usize) -> &'static str {
        let label = match self {
            Panel::Skills => SKILL_CATEGORIES.get(index).map(|c| c.title),
            Panel::Capabilities => CORE_SKILLS.get(index).copied(),
            Panel::Cards => PROJECTS.get(index).map(|p| p.title),
        };
        label.unwrap_or("?")
    }
}

/// Drive one panel's rotator through the async service and print its events
pub async fn run(config: &AppConfig, panel: Panel, seconds: Option<u64>, json: bool) -> Result<()> {
    let rotator = Rotator::new(panel.name(), panel.rotator_config(config))?;
    let interval_ms = rotator.config().interval_ms;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (service, _handle) = RotatorService::new(rotator);
    let service = service.with_event_sender(event_tx);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Setup signal handler for graceful shutdown
    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = signal_tx.send(true);
    });

    if let Some(seconds) = seconds {
        let timer_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            let _ = timer_tx.send(true);
        });
    }

    if !json {
        println!(
            "Watching '{}' (interval {}ms). Press Ctrl+C to stop.",
            panel.name(),
            interval_ms
        );
    }

    let task = tokio::spawn(service.run(shutdown_rx));

    // The channel closes once the service task has stopped and dropped its sender
    while let Some(event) = event_rx.recv().await {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{}", describe(panel, &event));
        }
    }

    task.await?;
    if !json {
        println!("Stopped.");
    }
    Ok(())
}

/// One human-readable line per event
fn describe(panel: Panel, event: &RotatorEvent) -> String {
    match event {
        RotatorEvent::Rotated { source, state, .. } => format!(
            "rotated ({:?}) -> {} [{}]",
            source,
            panel.item_label(state.current()),
            state
                .order()
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(",")
        ),
        RotatorEvent::Completed { forced: true, .. } => "completed (forced)".to_string(),
        RotatorEvent::Completed { .. } => "completed".to_string(),
        RotatorEvent::Dropped { source, reason, .. } => {
            format!("dropped ({:?}): {:?}", source, reason)
        }
        RotatorEvent::Rejected { message, .. } => format!("rejected: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::rotation::RotationMode;

    #[test]
    fn test_cards_complete_on_their_own() {
        let config = Panel::Cards.rotator_config(&AppConfig::default());
        assert_eq!(config.completion, CompletionMode::Timed);
        assert_eq!(config.mode(), RotationMode::Queue);
    }

    #[test]
    fn test_panel_intervals() {
        let config = AppConfig::default();
        assert_eq!(Panel::Skills.rotator_config(&config).interval_ms, 5000);
        assert_eq!(Panel::Capabilities.rotator_config(&config).interval_ms, 3000);
    }

    #[test]
    fn test_item_labels() {
        assert_eq!(Panel::Cards.item_label(0), "JobSpring");
        assert_eq!(Panel::Skills.item_label(9), "?");
    }
}
