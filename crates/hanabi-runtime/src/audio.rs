use hanabi_core::config::AudioConfig;
use hanabi_core::view::{AudioCue, View};

/// Background track player. Implementations loop the track until stopped.
pub trait AmbientAudio: Send + Sync {
    fn play(&self, track: &str);
    fn stop(&self);
}

/// Player that only logs; used when the host provides no audio output.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AmbientAudio for SilentAudio {
    fn play(&self, track: &str) {
        tracing::debug!(track, "ambient audio play (silent)");
    }

    fn stop(&self) {
        tracing::debug!("ambient audio stop (silent)");
    }
}

/// Track configured for `view`, if any.
pub fn track_for<'a>(config: &'a AudioConfig, view: View) -> Option<&'a str> {
    match view {
        View::Ranking => config.ranking.as_deref(),
        View::Schedule => config.schedule.as_deref(),
        _ => None,
    }
}

/// Carry out a cue returned by the view controller.
pub fn apply_cue(audio: &dyn AmbientAudio, config: &AudioConfig, cue: AudioCue) {
    match cue {
        AudioCue::Keep => {}
        AudioCue::Stop => audio.stop(),
        AudioCue::Play(view) => match track_for(config, view) {
            Some(track) => {
                tracing::debug!(%view, track, "starting ambient track");
                audio.play(track);
            }
            None => {
                tracing::debug!(%view, "no ambient track configured");
                audio.stop();
            }
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records calls for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAudio {
        pub(crate) calls: Mutex<Vec<String>>,
    }

    impl RecordingAudio {
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AmbientAudio for RecordingAudio {
        fn play(&self, track: &str) {
            self.calls.lock().unwrap().push(format!("play {track}"));
        }

        fn stop(&self) {
            self.calls.lock().unwrap().push("stop".into());
        }
    }

    fn config() -> AudioConfig {
        AudioConfig {
            ranking: Some("ranking.mp3".into()),
            schedule: Some("schedule.mp3".into()),
        }
    }

    #[test]
    fn test_apply_cues() {
        let audio = RecordingAudio::default();
        apply_cue(&audio, &config(), AudioCue::Play(View::Schedule));
        apply_cue(&audio, &config(), AudioCue::Keep);
        apply_cue(&audio, &config(), AudioCue::Stop);
        assert_eq!(audio.calls(), ["play schedule.mp3", "stop"]);
    }

    #[test]
    fn test_missing_track_stops() {
        let audio = RecordingAudio::default();
        apply_cue(&audio, &AudioConfig::default(), AudioCue::Play(View::Ranking));
        assert_eq!(audio.calls(), ["stop"]);
    }
}
