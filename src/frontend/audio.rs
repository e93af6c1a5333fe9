use log::{debug, info};

use super::AudioSink;
use crate::quiz::session::{BackgroundCommand, Cue};

/// Audio sink for terminals without sound: records what would be playing and
/// logs every change.
#[derive(Debug, Default)]
pub struct LogAudio {
    cue: Option<Cue>,
    background: Option<BackgroundCommand>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_cue(&self) -> Option<Cue> {
        self.cue
    }

    pub fn background_playing(&self) -> bool {
        matches!(
            self.background,
            Some(BackgroundCommand::Start | BackgroundCommand::Resume)
        )
    }
}

impl AudioSink for LogAudio {
    fn play_cue(&mut self, cue: Cue) {
        debug!("Playing {:?} cue", cue);
        self.cue = Some(cue);
    }

    fn stop_cue(&mut self, cue: Cue) {
        debug!("Stopping {:?} cue", cue);
        if self.cue == Some(cue) {
            self.cue = None;
        }
    }

    fn background(&mut self, command: BackgroundCommand) {
        info!("Background music: {:?}", command);
        self.background = Some(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_background_state() {
        let mut audio = LogAudio::new();
        assert!(!audio.background_playing());
        audio.background(BackgroundCommand::Start);
        assert!(audio.background_playing());
        audio.background(BackgroundCommand::Pause);
        assert!(!audio.background_playing());
        audio.background(BackgroundCommand::Resume);
        assert!(audio.background_playing());
    }

    #[test]
    fn stopping_an_old_cue_keeps_the_new_one() {
        let mut audio = LogAudio::new();
        audio.play_cue(Cue::Wrong);
        audio.play_cue(Cue::Correct);
        audio.stop_cue(Cue::Wrong);
        assert_eq!(audio.current_cue(), Some(Cue::Correct));
        audio.stop_cue(Cue::Correct);
        assert_eq!(audio.current_cue(), None);
    }
}
