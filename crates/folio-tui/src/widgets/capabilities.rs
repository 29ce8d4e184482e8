use folio_core::rotation::Scheduler;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use tokio::time::Instant;

use super::dots;
use crate::app::{App, Focus};
use crate::content::CORE_SKILLS;

pub struct CapabilitiesWidget;

impl CapabilitiesWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Capabilities;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(" Core Skills ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 3 {
            return;
        }

        let state = app.capabilities.state();
        let index = state.index();
        let color = theme.item_color(index);
        let name = CORE_SKILLS.get(index).copied().unwrap_or_default();

        let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if app.capabilities.is_transitioning() {
            style = style.add_modifier(Modifier::DIM);
        }
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(name, style))).alignment(Alignment::Center),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );

        // Time left until the next automatic rotation
        let ratio = countdown_ratio(app.capabilities.scheduler(), Instant::now());
        let label = if app.capabilities.scheduler().is_running() {
            ""
        } else {
            "paused"
        };
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(color).bg(theme.bg1))
                .ratio(ratio)
                .label(label),
            Rect::new(inner.x + 2, inner.y + 2, inner.width.saturating_sub(4), 1),
        );

        frame.render_widget(
            Paragraph::new(dots(state.len(), index)).style(Style::default().fg(color)),
            app.areas.capabilities_dots,
        );
    }
}

/// Elapsed share of the current interval, 0 when the scheduler is stopped
pub(crate) fn countdown_ratio(scheduler: &Scheduler, now: Instant) -> f64 {
    let Some(due) = scheduler.next_due() else {
        return 0.0;
    };
    let interval = scheduler.interval().as_secs_f64();
    if interval <= 0.0 {
        return 0.0;
    }
    let left = due.saturating_duration_since(now).as_secs_f64();
    (1.0 - left / interval).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ratio() {
        let mut scheduler = Scheduler::from_millis(3000).unwrap();
        assert_eq!(countdown_ratio(&scheduler, Instant::now()), 0.0);

        scheduler.start(Instant::now());
        tokio::time::advance(Duration::from_millis(1500)).await;
        let ratio = countdown_ratio(&scheduler, Instant::now());
        assert!((ratio - 0.5).abs() < 1e-6);
    }
}
