mod capabilities;
mod card_stack;
mod popup;
mod skills;
mod spark_overlay;
mod status_bar;

pub use capabilities::CapabilitiesWidget;
pub use card_stack::CardStackWidget;
pub use popup::PopupWidget;
pub use skills::SkillsWidget;
pub use spark_overlay::SparkOverlayWidget;
pub use status_bar::StatusBarWidget;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::PanelAreas;

/// Split the screen into panels and record the clickable regions
///
/// Left column: skills carousel above the capability rotator. Right column:
/// the project card stack. One status line at the bottom.
pub fn layout(size: Rect, skill_count: usize, capability_count: usize) -> PanelAreas {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_layout[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(7)])
        .split(columns[0]);

    let skills = left[0];
    let capabilities = left[1];
    let skills_inner = inner(skills);
    let capabilities_inner = inner(capabilities);

    PanelAreas {
        skills,
        skills_prev: Rect::new(skills_inner.x, skills_inner.y, 1u16.min(skills_inner.width), skills_inner.height),
        skills_next: Rect::new(
            skills_inner.right().saturating_sub(1),
            skills_inner.y,
            1u16.min(skills_inner.width),
            skills_inner.height,
        ),
        skills_dots: dot_row(skills_inner, skill_count),
        capabilities,
        capabilities_dots: dot_row(capabilities_inner, capability_count),
        cards: columns[1],
        status: main_layout[1],
    }
}

/// Area inside a one-cell border
fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

/// Centered row of `count` dots on the last line of `area`
fn dot_row(area: Rect, count: usize) -> Rect {
    if area.height == 0 || count == 0 {
        return Rect::default();
    }
    let width = ((count * 2 - 1) as u16).min(area.width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.bottom() - 1,
        width,
        1,
    )
}

/// Dots for a rotator position: "● ○ ○ ○"
pub(crate) fn dots(count: usize, current: usize) -> String {
    (0..count)
        .map(|i| if i == current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::dot_at;

    #[test]
    fn test_layout_regions_do_not_overlap() {
        let areas = layout(Rect::new(0, 0, 100, 30), 4, 8);
        assert!(!areas.skills.intersects(areas.cards));
        assert!(!areas.capabilities.intersects(areas.skills));
        assert_eq!(areas.status, Rect::new(0, 29, 100, 1));
        assert!(areas.skills.contains(ratatui::layout::Position::new(
            areas.skills_dots.x,
            areas.skills_dots.y
        )));
    }

    #[test]
    fn test_dot_row_matches_rendered_dots() {
        let areas = layout(Rect::new(0, 0, 100, 30), 4, 8);
        let dots_text = dots(4, 0);
        assert_eq!(dots_text.chars().count() as u16, areas.skills_dots.width);

        let last = areas.skills_dots.x + areas.skills_dots.width - 1;
        assert_eq!(dot_at(areas.skills_dots, last, areas.skills_dots.y, 4), Some(3));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_str("JobSpring", 20), "JobSpring");
        assert_eq!(truncate_str("Google Business Profile", 10), "Google ...");
    }
}
