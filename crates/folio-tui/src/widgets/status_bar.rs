use folio_core::rotation::Rotator;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Normal if app.paused => "PAUSED",
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(
                " {} | {} | {}",
                mode_str,
                app.focus.label(),
                app.rotators()
                    .iter()
                    .map(|r| rotator_summary(r))
                    .collect::<Vec<_>>()
                    .join("  ")
            )
        };

        let help_hint = " q:quit h/l:move tab:focus space:pause ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// "skills 2/4 ▶" style summary of one rotator
fn rotator_summary(rotator: &Rotator) -> String {
    let state = rotator.state();
    let marker = if rotator.is_transitioning() {
        "~"
    } else if rotator.is_running() {
        "▶"
    } else {
        "‖"
    };
    format!(
        "{} {}/{} {}",
        rotator.name(),
        state.current() + 1,
        state.len(),
        marker
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::rotation::RotatorConfig;

    #[tokio::test(start_paused = true)]
    async fn test_rotator_summary() {
        let mut rotator = Rotator::new("skills", RotatorConfig::new(4)).unwrap();
        assert_eq!(rotator_summary(&rotator), "skills 1/4 ‖");

        rotator.start();
        assert_eq!(rotator_summary(&rotator), "skills 1/4 ▶");

        rotator.advance();
        assert_eq!(rotator_summary(&rotator), "skills 2/4 ~");
    }
}
