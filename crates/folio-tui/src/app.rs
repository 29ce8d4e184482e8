use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use folio_core::motion::SwapPlan;
use folio_core::rotation::{CompletionMode, PollReport, Rotator, TriggerOutcome};
use folio_core::AppConfig;
use ratatui::layout::{Position, Rect};
use tokio::time::Instant;
use tracing::debug;

use crate::content::{CORE_SKILLS, PROJECTS, SKILL_CATEGORIES};
use crate::input::Action;
use crate::spark::SparkField;
use crate::theme::Theme;

/// Panel that receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Skills,
    Capabilities,
    Cards,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Skills => Focus::Capabilities,
            Focus::Capabilities => Focus::Cards,
            Focus::Cards => Focus::Skills,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Skills => Focus::Cards,
            Focus::Capabilities => Focus::Skills,
            Focus::Cards => Focus::Capabilities,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Skills => "Skills",
            Focus::Capabilities => "Capabilities",
            Focus::Cards => "Projects",
        }
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// Screen regions of the last frame, used for mouse hit-testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelAreas {
    pub skills: Rect,
    pub skills_prev: Rect,
    pub skills_next: Rect,
    pub skills_dots: Rect,
    pub capabilities: Rect,
    pub capabilities_dots: Rect,
    pub cards: Rect,
    pub status: Rect,
}

impl PanelAreas {
    pub fn panel_at(&self, column: u16, row: u16) -> Option<Focus> {
        let pos = Position::new(column, row);
        if self.skills.contains(pos) {
            Some(Focus::Skills)
        } else if self.capabilities.contains(pos) {
            Some(Focus::Capabilities)
        } else if self.cards.contains(pos) {
            Some(Focus::Cards)
        } else {
            None
        }
    }
}

/// Index of the dot under `column` in a dot row drawn as "● ○ ○"
pub fn dot_at(dots: Rect, column: u16, row: u16, count: usize) -> Option<usize> {
    if !dots.contains(Position::new(column, row)) {
        return None;
    }
    let offset = (column - dots.x) as usize;
    if offset % 2 != 0 {
        return None;
    }
    let index = offset / 2;
    (index < count).then_some(index)
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Current focus panel
    pub focus: Focus,
    /// Current application mode
    pub mode: Mode,
    /// Skill category carousel
    pub skills: Rotator,
    /// Core skill rotator
    pub capabilities: Rotator,
    /// Project card stack
    pub cards: Rotator,
    /// Timeline used to draw card swaps
    pub swap_plan: SwapPlan,
    pub sparks: SparkField,
    pub areas: PanelAreas,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Global pause toggled from the keyboard
    pub paused: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Result<Self> {
        let carousel = &config.carousel;

        let skills = Rotator::new(
            "skills",
            carousel.skills.to_rotator_config(SKILL_CATEGORIES.len()),
        )?;
        let capabilities = Rotator::new(
            "capabilities",
            carousel.capabilities.to_rotator_config(CORE_SKILLS.len()),
        )?;
        let cards = Rotator::new("cards", carousel.cards.to_rotator_config(PROJECTS.len()))?;
        let swap_plan = carousel.cards.swap_plan(PROJECTS.len());

        Ok(Self {
            config,
            theme: Theme::default(),
            focus: Focus::Skills,
            mode: Mode::Normal,
            skills,
            capabilities,
            cards,
            swap_plan,
            sparks: SparkField::new(),
            areas: PanelAreas::default(),
            should_quit: false,
            status_message: None,
            paused: false,
        })
    }

    /// Start every rotator's scheduler
    pub fn start(&mut self) {
        for rotator in self.rotators_mut() {
            rotator.start();
        }
    }

    pub fn rotators(&self) -> [&Rotator; 3] {
        [&self.skills, &self.capabilities, &self.cards]
    }

    pub fn rotators_mut(&mut self) -> [&mut Rotator; 3] {
        [&mut self.skills, &mut self.capabilities, &mut self.cards]
    }

    pub fn focused(&self) -> &Rotator {
        match self.focus {
            Focus::Skills => &self.skills,
            Focus::Capabilities => &self.capabilities,
            Focus::Cards => &self.cards,
        }
    }

    pub fn focused_mut(&mut self) -> &mut Rotator {
        match self.focus {
            Focus::Skills => &mut self.skills,
            Focus::Capabilities => &mut self.capabilities,
            Focus::Cards => &mut self.cards,
        }
    }

    /// Advance time: settle transitions, deliver due ticks, expire sparks
    pub fn tick(&mut self) {
        for rotator in self.rotators_mut() {
            let report = rotator.poll();
            log_report(rotator.name(), report);
        }

        // The card stack finishes its own swaps once the animation has played out
        if self.cards.config().completion == CompletionMode::Signalled && self.swap_finished() {
            self.cards.complete_transition();
        }

        self.sparks.prune(Instant::now());
    }

    /// Seconds into the current card swap, scaled onto the swap plan
    ///
    /// Follows the rotator's transition clock, so a hover freeze also
    /// freezes the animation.
    pub fn swap_time(&self) -> Option<f64> {
        let snapshot = self.cards.transition()?;
        Some(snapshot.progress * self.swap_plan.total_duration().as_secs_f64())
    }

    fn swap_finished(&self) -> bool {
        self.cards
            .transition()
            .is_some_and(|t| !t.frozen && t.progress >= 1.0)
    }

    /// Whether the next frame should come at animation rate
    pub fn is_animating(&self) -> bool {
        self.sparks.is_active() || self.rotators().iter().any(|r| r.is_transitioning())
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Next => {
                let outcome = self.focused_mut().advance();
                self.note_outcome(outcome);
            }
            Action::Prev => {
                let result = self.focused_mut().retreat();
                self.note_result(result);
            }
            Action::Jump(index) => {
                let result = self.focused_mut().jump_to(index as i64);
                self.note_result(result);
            }
            Action::SwapCard => {
                let outcome = self.cards.advance();
                self.note_outcome(outcome);
            }
            Action::CycleFocus => self.focus = self.focus.next(),
            Action::CycleFocusBack => self.focus = self.focus.prev(),
            Action::TogglePause => self.toggle_pause(),
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            Action::None => {}
        }
    }

    fn toggle_pause(&mut self) {
        let pausing = !self.paused;
        for rotator in self.rotators_mut() {
            if pausing {
                rotator.pause();
            } else {
                rotator.resume();
            }
        }
        self.paused = pausing;
        self.status_message = Some(if pausing { "Paused" } else { "Resumed" }.to_string());
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        self.update_hover(column, row);

        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                if self.areas.panel_at(column, row) == Some(Focus::Cards) {
                    let outcome = self.cards.wheel();
                    debug!("Wheel over cards: {:?}", outcome);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.config.ui.sparks {
                    self.sparks.spawn(column, row);
                }
                self.click(column, row);
            }
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let Some(panel) = self.areas.panel_at(column, row) else {
            return;
        };
        self.focus = panel;
        let pos = Position::new(column, row);

        match panel {
            Focus::Skills => {
                if self.areas.skills_prev.contains(pos) {
                    let result = self.skills.retreat();
                    self.note_result(result);
                } else if self.areas.skills_next.contains(pos) {
                    let outcome = self.skills.advance();
                    self.note_outcome(outcome);
                } else if let Some(index) =
                    dot_at(self.areas.skills_dots, column, row, self.skills.state().len())
                {
                    let result = self.skills.jump_to(index as i64);
                    self.note_result(result);
                }
            }
            Focus::Capabilities => {
                if let Some(index) = dot_at(
                    self.areas.capabilities_dots,
                    column,
                    row,
                    self.capabilities.state().len(),
                ) {
                    let result = self.capabilities.jump_to(index as i64);
                    self.note_result(result);
                }
            }
            Focus::Cards => {}
        }
    }

    /// Enter/leave hover for each panel based on the pointer position
    fn update_hover(&mut self, column: u16, row: u16) {
        let over = self.areas.panel_at(column, row);
        let targets = [Focus::Skills, Focus::Capabilities, Focus::Cards];
        for (rotator, panel) in self.rotators_mut().into_iter().zip(targets) {
            let inside = over == Some(panel);
            if inside && !rotator.is_hovered() {
                rotator.hover_enter();
            } else if !inside && rotator.is_hovered() {
                rotator.hover_leave();
            }
        }
    }

    fn note_outcome(&self, outcome: TriggerOutcome) {
        if let TriggerOutcome::Dropped(reason) = outcome {
            debug!("Trigger dropped: {:?}", reason);
        }
    }

    fn note_result(&mut self, result: folio_core::Result<TriggerOutcome>) {
        match result {
            Ok(outcome) => self.note_outcome(outcome),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Release all rotators before exit
    pub fn teardown(&mut self) {
        for rotator in self.rotators_mut() {
            rotator.teardown();
        }
        self.sparks.clear();
    }
}

fn log_report(name: &str, report: PollReport) {
    if report.forced {
        debug!("Rotator '{}' transition force-released", name);
    }
    if let Some(TriggerOutcome::Dropped(reason)) = report.tick {
        debug!("Rotator '{}' tick dropped: {:?}", name, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn app() -> App {
        let mut app = App::new(Arc::new(AppConfig::default())).unwrap();
        app.areas = PanelAreas {
            skills: Rect::new(0, 0, 40, 20),
            skills_prev: Rect::new(1, 1, 1, 18),
            skills_next: Rect::new(38, 1, 1, 18),
            skills_dots: Rect::new(16, 18, 7, 1),
            capabilities: Rect::new(0, 20, 40, 8),
            capabilities_dots: Rect::new(12, 26, 15, 1),
            cards: Rect::new(40, 0, 40, 28),
            status: Rect::new(0, 28, 80, 1),
        };
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_dot_hit_testing() {
        let dots = Rect::new(10, 5, 7, 1);
        assert_eq!(dot_at(dots, 10, 5, 4), Some(0));
        assert_eq!(dot_at(dots, 11, 5, 4), None);
        assert_eq!(dot_at(dots, 16, 5, 4), Some(3));
        assert_eq!(dot_at(dots, 16, 6, 4), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_card_swap_on_start() {
        let mut app = app();
        app.start();

        assert!(app.cards.is_transitioning());
        assert_eq!(app.cards.state().order(), &[1, 2, 3, 0]);
        assert!(!app.skills.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_swap_completes_after_animation() {
        let mut app = app();
        app.start();

        tokio::time::advance(Duration::from_millis(2400)).await;
        app.tick();
        assert!(app.cards.is_transitioning());

        tokio::time::advance(Duration::from_millis(150)).await;
        app.tick();
        assert!(!app.cards.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_freezes_card_swap() {
        let mut app = app();
        app.start();

        tokio::time::advance(Duration::from_millis(500)).await;
        app.handle_mouse(mouse(MouseEventKind::Moved, 60, 10));
        assert!(app.cards.is_hovered());

        let frozen_at = app.swap_time().unwrap();
        tokio::time::advance(Duration::from_millis(10_000)).await;
        app.tick();
        assert!(app.cards.is_transitioning());
        assert_eq!(app.swap_time().unwrap(), frozen_at);

        app.handle_mouse(mouse(MouseEventKind::Moved, 5, 5));
        assert!(!app.cards.is_hovered());
        assert!(app.skills.is_hovered());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_only_over_cards() {
        let mut app = app();

        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 5, 5));
        assert!(!app.cards.is_transitioning());

        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 60, 10));
        assert!(app.cards.is_transitioning());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_dot_jumps_and_sparks() {
        let mut app = app();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 18));
        assert_eq!(app.skills.state().index(), 2);
        assert_eq!(app.focus, Focus::Skills);
        assert!(app.sparks.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retreat_on_cards_reports_unsupported() {
        let mut app = app();
        app.focus = Focus::Cards;

        app.apply(Action::Prev);
        let message = app.status_message.clone().unwrap();
        assert!(message.contains("not supported"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_pause_stops_every_scheduler() {
        let mut app = app();
        app.start();

        app.apply(Action::TogglePause);
        assert!(app.rotators().iter().all(|r| !r.is_running()));

        app.apply(Action::TogglePause);
        assert!(app.skills.is_running());
        assert!(app.capabilities.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_makes_input_inert() {
        let mut app = app();
        app.start();
        app.teardown();

        app.apply(Action::Next);
        app.handle_mouse(mouse(MouseEventKind::ScrollDown, 60, 10));
        assert!(app.rotators().iter().all(|r| !r.is_transitioning()));
        assert_eq!(app.skills.state().index(), 0);
    }
}
