//! Top-level screen state machine.
//!
//! Transitions return an [`AudioCue`] instead of touching the audio
//! collaborator directly; the runtime applies it in one place.

use serde::{Deserialize, Serialize};

use crate::models::Title;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Glossary,
    Ranking,
    Schedule,
    Music,
}

impl View {
    pub const ALL: &[View] = &[
        Self::Home,
        Self::Glossary,
        Self::Ranking,
        Self::Schedule,
        Self::Music,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Glossary => "glossary",
            Self::Ranking => "ranking",
            Self::Schedule => "schedule",
            Self::Music => "music",
        }
    }

    /// Whether this view plays a background track while active.
    pub fn has_ambient_audio(&self) -> bool {
        matches!(self, Self::Ranking | Self::Schedule)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect requested of the ambient audio player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Leave playback as it is.
    Keep,
    /// Start (looping) the track associated with the view.
    Play(View),
    Stop,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active: View,
    pub selected: Option<Title>,
}

impl ViewState {
    pub fn player_open(&self) -> bool {
        self.selected.is_some()
    }
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn active(&self) -> View {
        self.state.active
    }

    pub fn selected(&self) -> Option<&Title> {
        self.state.selected.as_ref()
    }

    /// Open the player on `title`; always lands on Home.
    pub fn select_title(&mut self, title: Title) -> AudioCue {
        let left_audio_view = self.state.active.has_ambient_audio();
        self.state.active = View::Home;
        self.state.selected = Some(title);
        if left_audio_view {
            AudioCue::Stop
        } else {
            AudioCue::Keep
        }
    }

    /// Close the player without changing the active view.
    pub fn close_player(&mut self) -> AudioCue {
        if self.state.active == View::Home {
            self.state.selected = None;
        }
        AudioCue::Keep
    }

    /// Switch screens, always clearing the selection.
    pub fn navigate(&mut self, view: View) -> AudioCue {
        self.state.active = view;
        self.state.selected = None;
        if view.has_ambient_audio() {
            AudioCue::Play(view)
        } else {
            AudioCue::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(name: &str) -> Title {
        Title::new(name)
    }

    #[test]
    fn test_initial_state() {
        let vc = ViewController::new();
        assert_eq!(vc.active(), View::Home);
        assert!(!vc.state().player_open());
        assert!(vc.selected().is_none());
    }

    #[test]
    fn test_select_from_ranking_lands_on_home_with_player() {
        let mut vc = ViewController::new();
        vc.navigate(View::Ranking);
        let cue = vc.select_title(title("X"));

        assert_eq!(vc.active(), View::Home);
        assert!(vc.state().player_open());
        assert_eq!(vc.selected().unwrap().name, "X");
        assert_eq!(cue, AudioCue::Stop);
    }

    #[test]
    fn test_close_player_keeps_view() {
        let mut vc = ViewController::new();
        vc.select_title(title("X"));
        assert_eq!(vc.close_player(), AudioCue::Keep);
        assert_eq!(vc.active(), View::Home);
        assert!(!vc.state().player_open());

        // No-op when nothing is open.
        vc.close_player();
        assert_eq!(vc.state(), &ViewState::default());
    }

    #[test]
    fn test_navigate_clears_selection() {
        let mut vc = ViewController::new();
        vc.select_title(title("X"));
        vc.navigate(View::Glossary);
        assert_eq!(vc.active(), View::Glossary);
        assert!(vc.selected().is_none());

        vc.navigate(View::Home);
        assert!(vc.selected().is_none());
    }

    #[test]
    fn test_navigate_audio_cues() {
        let mut vc = ViewController::new();
        assert_eq!(vc.navigate(View::Schedule), AudioCue::Play(View::Schedule));
        assert_eq!(vc.navigate(View::Home), AudioCue::Stop);
        assert_eq!(vc.navigate(View::Ranking), AudioCue::Play(View::Ranking));
        assert_eq!(vc.navigate(View::Music), AudioCue::Stop);
        assert_eq!(vc.navigate(View::Glossary), AudioCue::Stop);
    }

    #[test]
    fn test_select_from_home_keeps_audio() {
        let mut vc = ViewController::new();
        assert_eq!(vc.select_title(title("A")), AudioCue::Keep);
        assert_eq!(vc.select_title(title("B")), AudioCue::Keep);
        assert_eq!(vc.selected().unwrap().name, "B");
    }
}
