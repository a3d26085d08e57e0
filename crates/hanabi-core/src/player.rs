//! Player session (current episode) and the layout derived from settings.

use serde::Serialize;

use crate::models::{Episode, Title};
use crate::playback::{playback_url, Mode};
use crate::settings::Settings;

pub const LIST_PANE_MIN: f32 = 300.0;
pub const LIST_PANE_MAX_RATIO: f32 = 0.5;
pub const LIST_PANE_INITIAL: f32 = 576.0;
pub const UTILITY_PANE_MIN: f32 = 250.0;
pub const UTILITY_PANE_MAX_RATIO: f32 = 0.4;
pub const UTILITY_PANE_INITIAL: f32 = 320.0;

/// Playback state for one opened title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSession {
    title: Title,
    current: usize,
}

impl PlayerSession {
    /// Open `title` at its first episode.
    pub fn open(title: Title) -> Self {
        Self { title, current: 0 }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.title.episodes.get(self.current)
    }

    /// Embed URL for the current episode.
    pub fn current_url(&self) -> Option<String> {
        self.current_episode()
            .map(|ep| playback_url(&ep.link, Mode::Player))
    }

    /// Jump to episode `index`. Out-of-range indices are ignored.
    pub fn select_episode(&mut self, index: usize) -> bool {
        if index < self.title.episodes.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn next_episode(&mut self) -> bool {
        self.select_episode(self.current + 1)
    }

    pub fn previous_episode(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.select_episode(index),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// Episode list, video and utility panels tiled on one page.
    Tiled,
    /// Full-screen video with a slide-out episode drawer.
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityPanel {
    Notes,
    Calendar,
    Todo,
    Stopwatch,
}

/// Grid arrangement of the utility pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelGrid {
    pub columns: u8,
    pub rows: u8,
}

impl PanelGrid {
    fn for_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self { columns: 1, rows: 1 }),
            2 => Some(Self { columns: 1, rows: 2 }),
            _ => Some(Self { columns: 2, rows: 2 }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerLayout {
    pub presentation: Presentation,
    /// Whether the embedded frame may open new windows.
    pub allow_popups: bool,
    /// Enabled utility panels in display order; empty in fullscreen mode.
    pub panels: Vec<UtilityPanel>,
    pub panel_grid: Option<PanelGrid>,
    pub resizable: bool,
    pub list_width: f32,
    pub utility_width: f32,
}

impl PlayerLayout {
    pub fn from_settings(settings: &Settings) -> Self {
        let presentation = if settings.disable_popup_player {
            Presentation::Fullscreen
        } else {
            Presentation::Tiled
        };

        let panels: Vec<UtilityPanel> = match presentation {
            Presentation::Fullscreen => Vec::new(),
            Presentation::Tiled => [
                (settings.show_notes, UtilityPanel::Notes),
                (settings.show_calendar, UtilityPanel::Calendar),
                (settings.show_todo_list, UtilityPanel::Todo),
                (settings.show_stopwatch, UtilityPanel::Stopwatch),
            ]
            .into_iter()
            .filter_map(|(on, panel)| on.then_some(panel))
            .collect(),
        };

        Self {
            presentation,
            allow_popups: !settings.block_new_tabs,
            panel_grid: PanelGrid::for_count(panels.len()),
            panels,
            resizable: settings.resizable_panes,
            list_width: LIST_PANE_INITIAL,
            utility_width: UTILITY_PANE_INITIAL,
        }
    }

    /// Resize the episode-list pane, clamped to the container.
    pub fn resize_list(&mut self, width: f32, container: f32) {
        if self.resizable {
            self.list_width = clamp_pane(width, LIST_PANE_MIN, container * LIST_PANE_MAX_RATIO);
        }
    }

    /// Resize the utility pane, clamped to the container.
    pub fn resize_utility(&mut self, width: f32, container: f32) {
        if self.resizable {
            self.utility_width =
                clamp_pane(width, UTILITY_PANE_MIN, container * UTILITY_PANE_MAX_RATIO);
        }
    }
}

// The minimum wins when the container is too narrow for both bounds.
fn clamp_pane(width: f32, min: f32, max: f32) -> f32 {
    width.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(episodes: usize) -> Title {
        let mut t = Title::new("Frieren");
        for i in 1..=episodes {
            t.episodes.push(Episode {
                name: "Frieren".into(),
                episode_title: format!("Tập {i}"),
                url: String::new(),
                link: format!("https://player.example/e/{i}"),
            });
        }
        t
    }

    #[test]
    fn test_session_starts_at_first_episode() {
        let session = PlayerSession::open(title(3));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_episode().unwrap().episode_title, "Tập 1");
        assert_eq!(
            session.current_url().unwrap(),
            "https://player.example/e/1?autoplay=1&mute=1"
        );
    }

    #[test]
    fn test_episode_navigation_bounds() {
        let mut session = PlayerSession::open(title(2));
        assert!(!session.previous_episode());
        assert!(session.next_episode());
        assert_eq!(session.current_index(), 1);
        assert!(!session.next_episode());
        assert_eq!(session.current_index(), 1);
        assert!(!session.select_episode(5));
        assert!(session.select_episode(0));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_empty_title_has_no_episode() {
        let session = PlayerSession::open(Title::new("Empty"));
        assert!(session.current_episode().is_none());
        assert!(session.current_url().is_none());
    }

    #[test]
    fn test_default_layout() {
        let layout = PlayerLayout::from_settings(&Settings::default());
        assert_eq!(layout.presentation, Presentation::Tiled);
        assert!(!layout.allow_popups);
        assert_eq!(layout.panels, [UtilityPanel::Notes]);
        assert_eq!(layout.panel_grid, Some(PanelGrid { columns: 1, rows: 1 }));
        assert!(!layout.resizable);
        assert_eq!(layout.list_width, LIST_PANE_INITIAL);
        assert_eq!(layout.utility_width, UTILITY_PANE_INITIAL);
    }

    #[test]
    fn test_panels_keep_order() {
        let settings = Settings {
            show_notes: false,
            show_calendar: true,
            show_todo_list: true,
            show_stopwatch: true,
            block_new_tabs: false,
            ..Default::default()
        };
        let layout = PlayerLayout::from_settings(&settings);
        assert!(layout.allow_popups);
        assert_eq!(
            layout.panels,
            [UtilityPanel::Calendar, UtilityPanel::Todo, UtilityPanel::Stopwatch]
        );
        assert_eq!(layout.panel_grid, Some(PanelGrid { columns: 2, rows: 2 }));
    }

    #[test]
    fn test_fullscreen_has_no_panels() {
        let settings = Settings {
            disable_popup_player: true,
            show_calendar: true,
            ..Default::default()
        };
        let layout = PlayerLayout::from_settings(&settings);
        assert_eq!(layout.presentation, Presentation::Fullscreen);
        assert!(layout.panels.is_empty());
        assert_eq!(layout.panel_grid, None);
    }

    #[test]
    fn test_resize_clamps() {
        let settings = Settings {
            resizable_panes: true,
            ..Default::default()
        };
        let mut layout = PlayerLayout::from_settings(&settings);

        layout.resize_list(100.0, 1600.0);
        assert_eq!(layout.list_width, 300.0);
        layout.resize_list(1200.0, 1600.0);
        assert_eq!(layout.list_width, 800.0);
        layout.resize_list(500.0, 1600.0);
        assert_eq!(layout.list_width, 500.0);

        layout.resize_utility(100.0, 1000.0);
        assert_eq!(layout.utility_width, 250.0);
        layout.resize_utility(900.0, 1000.0);
        assert_eq!(layout.utility_width, 400.0);

        // Narrow container: minimum wins.
        layout.resize_list(450.0, 400.0);
        assert_eq!(layout.list_width, 300.0);
    }

    #[test]
    fn test_resize_ignored_when_fixed() {
        let mut layout = PlayerLayout::from_settings(&Settings::default());
        layout.resize_list(900.0, 2000.0);
        assert_eq!(layout.list_width, LIST_PANE_INITIAL);
    }
}
