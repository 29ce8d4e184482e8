use folio_core::motion::{CardPose, SlotLayout};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::truncate_str;
use crate::app::{App, Focus};
use crate::content::PROJECTS;

/// Layout units per terminal column / row
const UNITS_PER_COLUMN: f64 = 6.0;
const UNITS_PER_ROW: f64 = 14.0;

pub struct CardStackWidget;

impl CardStackWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Cards;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };
        let title = if app.cards.is_hovered() && app.cards.config().pause_on_hover {
            " Projects (hold) "
        } else {
            " Projects "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = app.swap_plan.layout();
        let Some(geometry) = StackGeometry::fit(inner, layout) else {
            return;
        };

        let order = app.cards.state().order();
        let swap_time = app.swap_time();

        let mut poses: Vec<(usize, CardPose)> = order
            .iter()
            .enumerate()
            .map(|(position, &project)| {
                let pose = match swap_time {
                    Some(t) => app.swap_plan.pose(position, t),
                    None => CardPose::from(layout.slot(position)),
                };
                (project, pose)
            })
            .collect();
        // Back to front
        poses.sort_by_key(|(_, pose)| pose.z_index);

        let front = order.first().copied();
        for (project, pose) in poses {
            let Some(rect) = geometry.place(&pose) else {
                continue;
            };
            let Some(info) = PROJECTS.get(project) else {
                continue;
            };
            let color = theme.item_color(project);
            let is_front = Some(project) == front && swap_time.is_none();

            let card = Block::default()
                .title(format!(" {} ", truncate_str(info.title, rect.width.saturating_sub(4) as usize)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme.bg1));

            let mut lines = vec![
                Line::from(Span::styled(
                    info.subtitle,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::default(),
            ];
            if is_front {
                lines.push(Line::from(Span::styled(info.problem, Style::default().fg(theme.grey2))));
                lines.push(Line::from(Span::styled(info.solution, Style::default().fg(theme.fg0))));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    info.tech.join(" · "),
                    Style::default().fg(theme.blue),
                )));
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(info.impact, Style::default().fg(theme.green))));
            }

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(lines).wrap(Wrap { trim: true }).block(card),
                rect,
            );
        }
    }
}

/// Mapping of stack poses onto a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StackGeometry {
    clip: Rect,
    /// Top-left of the front card
    origin_x: i32,
    origin_y: i32,
    card_width: u16,
    card_height: u16,
}

impl StackGeometry {
    /// Size cards so the whole resting stack fits in `area`
    pub(crate) fn fit(area: Rect, layout: &SlotLayout) -> Option<Self> {
        let back = layout.back();
        let span_x = (back.x / UNITS_PER_COLUMN).round().max(0.0) as u16;
        let span_y = (-back.y / UNITS_PER_ROW).round().max(0.0) as u16;

        let card_width = area.width.checked_sub(span_x)?;
        let card_height = area.height.checked_sub(span_y)?;
        if card_width < 12 || card_height < 4 {
            return None;
        }

        Some(Self {
            clip: area,
            origin_x: area.x as i32,
            origin_y: (area.y + span_y) as i32,
            card_width,
            card_height,
        })
    }

    /// Screen rectangle of a card, clipped to the panel
    pub(crate) fn place(&self, pose: &CardPose) -> Option<Rect> {
        let x = self.origin_x + (pose.x / UNITS_PER_COLUMN).round() as i32;
        let y = self.origin_y + (pose.y / UNITS_PER_ROW).round() as i32;

        let left = x.max(self.clip.x as i32);
        let top = y.max(self.clip.y as i32);
        let right = (x + self.card_width as i32).min(self.clip.right() as i32);
        let bottom = (y + self.card_height as i32).min(self.clip.bottom() as i32);
        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::motion::{SwapEasing, SwapPlan};

    fn geometry() -> StackGeometry {
        StackGeometry::fit(Rect::new(0, 0, 60, 30), &SlotLayout::new(4)).unwrap()
    }

    #[test]
    fn test_resting_stack_fits() {
        let layout = SlotLayout::new(4);
        let g = geometry();
        for i in 0..4 {
            let rect = g.place(&CardPose::from(layout.slot(i))).unwrap();
            assert_eq!(rect.width, g.card_width);
            assert_eq!(rect.height, g.card_height);
        }
        // Deeper cards sit right and up
        let front = g.place(&CardPose::from(layout.slot(0))).unwrap();
        let back = g.place(&CardPose::from(layout.back())).unwrap();
        assert!(back.x > front.x);
        assert!(back.y < front.y);
    }

    #[test]
    fn test_dropping_card_leaves_panel() {
        let plan = SwapPlan::new(SwapEasing::Smooth, SlotLayout::new(4));
        let g = geometry();
        // Smooth drop has finished by the time the return starts
        let pose = plan.pose(3, plan.return_at() - 0.001);
        assert!(g.place(&pose).is_none());
    }

    #[test]
    fn test_too_small_panel() {
        assert!(StackGeometry::fit(Rect::new(0, 0, 20, 10), &SlotLayout::new(4)).is_none());
    }
}
