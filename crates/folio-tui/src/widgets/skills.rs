use folio_core::motion::EasingType;
use folio_core::rotation::{Direction, TransitionSnapshot};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::dots;
use crate::app::{App, Focus};
use crate::content::{SkillCategory, SKILL_CATEGORIES};
use crate::theme::Theme;

pub struct SkillsWidget;

impl SkillsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Skills;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let state = app.skills.state();
        let index = state.index();
        let Some(category) = SKILL_CATEGORIES.get(index) else {
            return;
        };
        let color = theme.item_color(index);

        let block = Block::default()
            .title(format!(" Skills {}/{} ", index + 1, state.len()))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 6 || inner.height < 2 {
            return;
        }

        // Arrows on the vertical middle of their click columns
        let arrow_style = Style::default().fg(theme.grey2);
        let mid = inner.y + inner.height / 2;
        frame.render_widget(
            Paragraph::new(Span::styled("‹", arrow_style)),
            Rect::new(app.areas.skills_prev.x, mid, 1, 1),
        );
        frame.render_widget(
            Paragraph::new(Span::styled("›", arrow_style)),
            Rect::new(app.areas.skills_next.x, mid, 1, 1),
        );

        let content = Rect::new(
            inner.x + 2,
            inner.y,
            inner.width - 4,
            inner.height - 1,
        );
        let lines = page_lines(category, theme, color, content.width);
        let transition = app.skills.transition();
        let (offset, motion) = slide_offset(transition, content.width);

        let dim = transition.is_some();
        let mut page = Paragraph::new(lines);
        if dim {
            page = page.style(Style::default().add_modifier(Modifier::DIM));
        }

        // The incoming page slides in from the side it is moving towards
        let visible = content.width - offset;
        match motion {
            Direction::Forward => {
                let rect = Rect::new(content.x + offset, content.y, visible, content.height);
                frame.render_widget(page, rect);
            }
            Direction::Backward => {
                let rect = Rect::new(content.x, content.y, visible, content.height);
                frame.render_widget(page.scroll((0, offset)), rect);
            }
        }

        frame.render_widget(
            Paragraph::new(dots(state.len(), index)).style(Style::default().fg(color)),
            app.areas.skills_dots,
        );
    }
}

/// Columns the incoming page is still away from its resting place
pub(crate) fn slide_offset(transition: Option<TransitionSnapshot>, width: u16) -> (u16, Direction) {
    match transition {
        Some(t) => {
            let remaining = 1.0 - EasingType::Cubic.apply(t.progress);
            let offset = (remaining * width as f64).round() as u16;
            (offset.min(width), t.motion)
        }
        None => (0, Direction::Forward),
    }
}

fn page_lines(category: &SkillCategory, theme: &Theme, color: Color, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            category.title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(category.experience, Style::default().fg(theme.fg1)),
            Span::styled("  ·  ", Style::default().fg(theme.grey0)),
            Span::styled(category.projects, Style::default().fg(theme.fg1)),
        ]),
        Line::default(),
    ];

    // Two columns when there is room
    let column = (width / 2) as usize;
    let two_columns = category.skills.iter().all(|s| s.width() + 3 <= column);
    if two_columns {
        for pair in category.skills.chunks(2) {
            let left = pair[0];
            let mut spans = vec![
                Span::styled("• ", Style::default().fg(color)),
                Span::styled(left, Style::default().fg(theme.fg0)),
                Span::raw(" ".repeat(column.saturating_sub(left.width() + 2))),
            ];
            if let Some(right) = pair.get(1) {
                spans.push(Span::styled("• ", Style::default().fg(color)));
                spans.push(Span::styled(*right, Style::default().fg(theme.fg0)));
            }
            lines.push(Line::from(spans));
        }
    } else {
        for skill in category.skills {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(color)),
                Span::styled(*skill, Style::default().fg(theme.fg0)),
            ]));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("★ ", Style::default().fg(theme.yellow)),
        Span::styled(
            category.highlight,
            Style::default().fg(theme.grey2).add_modifier(Modifier::ITALIC),
        ),
    ]));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(progress: f64, motion: Direction) -> TransitionSnapshot {
        TransitionSnapshot {
            progress,
            duration_ms: 600,
            motion,
            frozen: false,
        }
    }

    #[test]
    fn test_slide_starts_off_panel_and_settles() {
        assert_eq!(slide_offset(Some(snapshot(0.0, Direction::Forward)), 40), (40, Direction::Forward));
        assert_eq!(slide_offset(Some(snapshot(1.0, Direction::Backward)), 40), (0, Direction::Backward));
        assert_eq!(slide_offset(None, 40), (0, Direction::Forward));
    }

    #[test]
    fn test_slide_is_monotonic() {
        let mut last = u16::MAX;
        for step in 0..=10 {
            let (offset, _) = slide_offset(Some(snapshot(step as f64 / 10.0, Direction::Forward)), 80);
            assert!(offset <= last);
            last = offset;
        }
    }
}
