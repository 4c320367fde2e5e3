//! Audio cues and playback
//!
//! The scene never touches audio directly. The host maps each drained
//! [`GameEvent`] to an [`AudioCue`] and hands it to the [`AudioManager`]
//! (HTML audio elements, browser only).

use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Star picked up
    StarCollect,
    /// Craft destroyed
    Explosion,
}

impl SoundEffect {
    pub fn path(&self) -> &'static str {
        match self {
            SoundEffect::StarCollect => "audio/sfx_star.mp3",
            SoundEffect::Explosion => "audio/sfx_explosion.mp3",
        }
    }

    /// Level relative to the effects gain
    pub fn level(&self) -> f32 {
        match self {
            SoundEffect::StarCollect => 0.8,
            SoundEffect::Explosion => 1.0,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loop {
    Music,
    Engine,
}

impl Loop {
    pub fn path(&self) -> &'static str {
        match self {
            Loop::Music => "audio/music_bg.mp3",
            Loop::Engine => "audio/engine_loop.mp3",
        }
    }
}

/// What the audio layer should do in response to a game event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Play(SoundEffect),
    /// Stop the loops and rewind them
    StopLoops,
    /// Pause the loops in place
    SuspendLoops,
    /// Continue the loops from where they paused
    ResumeLoops,
}

/// Map a scene event to its audio cue, if any
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    match event {
        GameEvent::StarCollected { .. } => Some(AudioCue::Play(SoundEffect::StarCollect)),
        GameEvent::Explosion { .. } => Some(AudioCue::Play(SoundEffect::Explosion)),
        GameEvent::AmbientStopped => Some(AudioCue::StopLoops),
        GameEvent::AudioSuspended => Some(AudioCue::SuspendLoops),
        GameEvent::AudioResumed => Some(AudioCue::ResumeLoops),
        GameEvent::ScoreReported { .. } => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::HtmlAudioElement;

    use super::{AudioCue, Loop, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        music: Option<HtmlAudioElement>,
        engine: Option<HtmlAudioElement>,
        settings: Settings,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            let mut manager = Self {
                music: looping(Loop::Music),
                engine: looping(Loop::Engine),
                settings: settings.clone(),
                muted: false,
            };
            if manager.music.is_none() || manager.engine.is_none() {
                log::warn!("Failed to create audio elements - loops disabled");
            }
            manager.apply_volumes();
            manager
        }

        /// Start both loops from the top (needs a prior user gesture)
        pub fn start_loops(&self) {
            for el in self.loops() {
                el.set_current_time(0.0);
                play(el);
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.settings = settings.clone();
            self.apply_volumes();
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.apply_volumes();
        }

        pub fn handle(&self, cue: AudioCue) {
            match cue {
                AudioCue::Play(effect) => self.play(effect),
                AudioCue::StopLoops => {
                    for el in self.loops() {
                        el.pause().ok();
                        el.set_current_time(0.0);
                    }
                }
                AudioCue::SuspendLoops => {
                    for el in self.loops() {
                        el.pause().ok();
                    }
                }
                AudioCue::ResumeLoops => {
                    for el in self.loops() {
                        play(el);
                    }
                }
            }
        }

        /// Play a one-shot effect on a fresh element so overlaps don't cut off
        pub fn play(&self, effect: SoundEffect) {
            let vol = if self.muted {
                0.0
            } else {
                self.settings.sfx_gain() * effect.level()
            };
            if vol <= 0.0 {
                return;
            }

            match HtmlAudioElement::new_with_src(effect.path()) {
                Ok(el) => {
                    el.set_volume(vol as f64);
                    play(&el);
                }
                Err(e) => log::warn!("Could not play {:?}: {:?}", effect, e),
            }
        }

        fn loops(&self) -> impl Iterator<Item = &HtmlAudioElement> {
            self.music.iter().chain(self.engine.iter())
        }

        fn apply_volumes(&self) {
            let (music, engine) = if self.muted {
                (0.0, 0.0)
            } else {
                (self.settings.music_gain(), self.settings.engine_gain())
            };
            if let Some(el) = &self.music {
                el.set_volume(music as f64);
            }
            if let Some(el) = &self.engine {
                el.set_volume(engine as f64);
            }
        }
    }

    fn looping(track: Loop) -> Option<HtmlAudioElement> {
        let el = HtmlAudioElement::new_with_src(track.path()).ok()?;
        el.set_loop(true);
        Some(el)
    }

    /// Browsers reject playback before a user gesture; that is not an error here
    fn play(el: &HtmlAudioElement) {
        if let Err(e) = el.play() {
            log::debug!("Audio playback refused: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_event_cues() {
        let star = GameEvent::StarCollected {
            pos: Vec2::ZERO,
            score: 10,
        };
        assert_eq!(cue_for(&star), Some(AudioCue::Play(SoundEffect::StarCollect)));
        assert_eq!(cue_for(&GameEvent::AmbientStopped), Some(AudioCue::StopLoops));
        assert_eq!(cue_for(&GameEvent::AudioSuspended), Some(AudioCue::SuspendLoops));
        assert_eq!(cue_for(&GameEvent::AudioResumed), Some(AudioCue::ResumeLoops));
        assert_eq!(cue_for(&GameEvent::ScoreReported { score: 3 }), None);
    }

    #[test]
    fn test_effect_levels_in_range() {
        for effect in [SoundEffect::StarCollect, SoundEffect::Explosion] {
            assert!(effect.level() > 0.0 && effect.level() <= 1.0);
            assert!(effect.path().ends_with(".mp3"));
        }
    }
}
