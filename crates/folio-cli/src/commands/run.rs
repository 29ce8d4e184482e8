use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use folio_core::AppConfig;
use folio_tui::{
    app::{App, Mode},
    content::{CORE_SKILLS, SKILL_CATEGORIES},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{
        self, CapabilitiesWidget, CardStackWidget, PopupWidget, SkillsWidget, SparkOverlayWidget,
        StatusBarWidget,
    },
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Create app state before touching the terminal so config errors print normally
    let mut app = App::new(config.clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create event handler with animation FPS support
    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.ui.animation_fps);

    app.start();
    info!("TUI started");

    let result = main_loop(&mut terminal, &mut app, &keymap, &event_handler);

    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("TUI stopped");
    result
}

fn main_loop(
    terminal: &mut Term,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Settle transitions and deliver due ticks before drawing
        app.tick();

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();
            app.areas = widgets::layout(size, SKILL_CATEGORIES.len(), CORE_SKILLS.len());
            let app = &*app;

            SkillsWidget::render(frame, app.areas.skills, app);
            CapabilitiesWidget::render(frame, app.areas.capabilities, app);
            CardStackWidget::render(frame, app.areas.cards, app);
            StatusBarWidget::render(frame, app.areas.status, app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, app);
            }

            SparkOverlayWidget::render(frame, size, app);
        })?;

        // Handle events (faster frame rate while anything is moving)
        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.apply(action);
                }
                AppEvent::Mouse(mouse) => app.handle_mouse(mouse),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
