//! The collaborators the session talks to: something that draws, something
//! that plays sounds, and something that turns player actions into inputs.

pub mod audio;
pub mod terminal;

use std::io;

use crate::quiz::error::QuizError;
use crate::quiz::session::{BackgroundCommand, Cue, Frame};

pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Shows a recoverable error to the player.
    fn report(&mut self, error: &QuizError) -> io::Result<()>;
}

pub trait AudioSink {
    fn play_cue(&mut self, cue: Cue);
    fn stop_cue(&mut self, cue: Cue);
    fn background(&mut self, command: BackgroundCommand);
}
