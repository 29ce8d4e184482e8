use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::motion::{SlotLayout, SwapEasing, SwapPlan};
use crate::rotation::{CompletionMode, Direction, RotatorConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
    #[serde(default)]
    pub carousel: CarouselSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Spark bursts on mouse click
    #[serde(default = "default_true")]
    pub sparks: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            sparks: default_true(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-n>" (Ctrl+n), "<S-Tab>" (Shift+Tab), "<CR>", "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Advance the focused panel
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Step the focused panel back
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Move focus to the next panel
    #[serde(default = "default_key_cycle_focus")]
    pub cycle_focus: String,
    /// Pause or resume every panel
    #[serde(default = "default_key_toggle_pause")]
    pub toggle_pause: String,
    /// Swap the front project card
    #[serde(default = "default_key_swap_card")]
    pub swap_card: String,
    /// Show the help popup
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next: default_key_next(),
            prev: default_key_prev(),
            cycle_focus: default_key_cycle_focus(),
            toggle_pause: default_key_toggle_pause(),
            swap_card: default_key_swap_card(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_prev() -> String { "h".to_string() }
fn default_key_cycle_focus() -> String { "<Tab>".to_string() }
fn default_key_toggle_pause() -> String { "<Space>".to_string() }
fn default_key_swap_card() -> String { "s".to_string() }
fn default_key_help() -> String { "?".to_string() }

/// Per-panel rotation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSet {
    #[serde(default = "default_skills")]
    pub skills: CarouselConfig,
    #[serde(default = "default_capabilities")]
    pub capabilities: CarouselConfig,
    #[serde(default)]
    pub cards: CardStackConfig,
}

impl Default for CarouselSet {
    fn default() -> Self {
        Self {
            skills: default_skills(),
            capabilities: default_capabilities(),
            cards: CardStackConfig::default(),
        }
    }
}

/// Settings of an index-mode carousel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Automatic advance interval
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default = "default_true")]
    pub pausable: bool,
    /// Declared duration of one slide
    #[serde(default = "default_transition")]
    pub transition_ms: u64,
    #[serde(default)]
    pub completion: CompletionMode,
    #[serde(default)]
    pub pause_on_hover: bool,
    #[serde(default = "default_stuck_factor")]
    pub stuck_factor: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
            direction: Direction::default(),
            pausable: default_true(),
            transition_ms: default_transition(),
            completion: CompletionMode::default(),
            pause_on_hover: false,
            stuck_factor: default_stuck_factor(),
        }
    }
}

impl CarouselConfig {
    pub fn to_rotator_config(&self, item_count: usize) -> RotatorConfig {
        RotatorConfig {
            interval_ms: self.interval_ms,
            direction: self.direction,
            pausable: self.pausable,
            transition_ms: self.transition_ms,
            completion: self.completion,
            pause_on_hover: self.pause_on_hover,
            stuck_factor: self.stuck_factor,
            ..RotatorConfig::new(item_count)
        }
    }
}

/// Settings of the queue-mode card stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardStackConfig {
    /// Delay between automatic swaps
    #[serde(default = "default_interval")]
    pub interval_ms: u64,
    #[serde(default = "default_true")]
    pub pausable: bool,
    /// Swap feel: "elastic" or "smooth"
    #[serde(default)]
    pub easing: SwapEasing,
    /// Explicit swap duration; derived from the swap plan when absent
    #[serde(default)]
    pub transition_ms: Option<u64>,
    #[serde(default = "default_signalled")]
    pub completion: CompletionMode,
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    /// Swap on scroll wheel
    #[serde(default = "default_true")]
    pub wheel_enabled: bool,
    /// Minimum time between wheel swaps
    #[serde(default = "default_wheel_throttle")]
    pub wheel_throttle_ms: u64,
    #[serde(default = "default_stuck_factor")]
    pub stuck_factor: u32,
    /// Swap once as soon as the stack is shown
    #[serde(default = "default_true")]
    pub immediate: bool,
    /// Horizontal step between stacked cards
    #[serde(default = "default_card_distance")]
    pub card_distance: f64,
    /// Vertical step between stacked cards
    #[serde(default = "default_vertical_distance")]
    pub vertical_distance: f64,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
            pausable: default_true(),
            easing: SwapEasing::default(),
            transition_ms: None,
            completion: default_signalled(),
            pause_on_hover: default_true(),
            wheel_enabled: default_true(),
            wheel_throttle_ms: default_wheel_throttle(),
            stuck_factor: default_stuck_factor(),
            immediate: default_true(),
            card_distance: default_card_distance(),
            vertical_distance: default_vertical_distance(),
        }
    }
}

impl CardStackConfig {
    pub fn layout(&self, card_count: usize) -> SlotLayout {
        SlotLayout {
            card_distance: self.card_distance,
            vertical_distance: self.vertical_distance,
            card_count,
        }
    }

    pub fn swap_plan(&self, card_count: usize) -> SwapPlan {
        SwapPlan::new(self.easing, self.layout(card_count))
    }

    pub fn to_rotator_config(&self, card_count: usize) -> RotatorConfig {
        let transition_ms = self.transition_ms.unwrap_or_else(|| {
            self.swap_plan(card_count).total_duration().as_millis() as u64
        });

        RotatorConfig {
            interval_ms: self.interval_ms,
            pausable: self.pausable,
            queue_mode: true,
            transition_ms,
            completion: self.completion,
            pause_on_hover: self.pause_on_hover,
            wheel_enabled: self.wheel_enabled,
            wheel_throttle_ms: self.wheel_throttle_ms,
            stuck_factor: self.stuck_factor,
            immediate: self.immediate,
            ..RotatorConfig::new(card_count)
        }
    }
}

fn default_skills() -> CarouselConfig {
    CarouselConfig {
        interval_ms: 5000,
        transition_ms: 600,
        ..CarouselConfig::default()
    }
}

fn default_capabilities() -> CarouselConfig {
    CarouselConfig {
        interval_ms: 3000,
        transition_ms: 400,
        ..CarouselConfig::default()
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    30
}

fn default_interval() -> u64 {
    5000
}

fn default_transition() -> u64 {
    600
}

fn default_signalled() -> CompletionMode {
    CompletionMode::Signalled
}

fn default_wheel_throttle() -> u64 {
    800
}

fn default_stuck_factor() -> u32 {
    2
}

fn default_card_distance() -> f64 {
    60.0
}

fn default_vertical_distance() -> f64 {
    70.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Reject settings no rotator could run with
    pub fn validate(&self) -> crate::Result<()> {
        let intervals = [
            ("carousel.skills", self.carousel.skills.interval_ms),
            ("carousel.capabilities", self.carousel.capabilities.interval_ms),
            ("carousel.cards", self.carousel.cards.interval_ms),
        ];
        for (section, interval_ms) in intervals {
            if interval_ms == 0 {
                return Err(crate::Error::Config(format!(
                    "{}.interval_ms must be greater than 0",
                    section
                )));
            }
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(crate::Error::Config(
                "ui.tick_rate_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }

    /// Get the log file directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::RotationMode;

    #[test]
    fn test_panel_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.carousel.skills.interval_ms, 5000);
        assert_eq!(config.carousel.capabilities.interval_ms, 3000);

        let cards = &config.carousel.cards;
        assert_eq!(cards.easing, SwapEasing::Elastic);
        assert_eq!(cards.completion, CompletionMode::Signalled);
        assert_eq!(cards.wheel_throttle_ms, 800);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.keymap.quit, "q");
        assert_eq!(config.carousel.capabilities.transition_ms, 400);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml(
            r#"
            [carousel.skills]
            interval_ms = 2500
            direction = "backward"

            [carousel.cards]
            easing = "smooth"
            transition_ms = 900
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel.skills.interval_ms, 2500);
        assert_eq!(config.carousel.skills.direction, Direction::Backward);
        assert_eq!(config.carousel.cards.easing, SwapEasing::Smooth);
        assert_eq!(config.carousel.cards.to_rotator_config(4).transition_ms, 900);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = AppConfig::from_toml("[carousel.capabilities]\ninterval_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("carousel.capabilities.interval_ms"));
    }

    #[test]
    fn test_card_stack_duration_from_plan() {
        let cards = CardStackConfig::default();
        let rotator = cards.to_rotator_config(4);
        assert_eq!(rotator.mode(), RotationMode::Queue);
        assert!(rotator.wheel_enabled);
        assert!((2499..=2500).contains(&rotator.transition_ms));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.carousel.skills.interval_ms, config.carousel.skills.interval_ms);
        assert_eq!(parsed.keymap.toggle_pause, "<Space>");
    }
}
