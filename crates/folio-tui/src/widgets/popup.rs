use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keymap = &app.config.keymap;
        let area = frame.area();

        let entries = [
            (keymap.next.as_str(), "next item in focused panel"),
            (keymap.prev.as_str(), "previous item (not for cards)"),
            ("1-9", "jump to item"),
            (keymap.cycle_focus.as_str(), "cycle focus"),
            (keymap.toggle_pause.as_str(), "pause / resume all"),
            (keymap.swap_card.as_str(), "swap project card"),
            ("wheel", "swap card (over projects)"),
            ("click", "spark, arrows and dots"),
            (keymap.quit.as_str(), "quit"),
        ];

        let popup_width = 46u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>9}  ", key),
                        Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled("press any key", Style::default().fg(theme.grey1)))
                .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
