//! Drives a [`QuizSession`]: fixed-rate ticks and typed lines go in, effects
//! come out and are handed to the render and audio sinks.
//!
//! The session lives inside [`Game`] and is only ever touched from
//! [`Game::run`], so ticks and inputs are processed one at a time.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;

use crate::frontend::terminal::{self, Command};
use crate::frontend::{AudioSink, RenderSink};
use crate::quiz::authoring;
use crate::quiz::error::QuizError;
use crate::quiz::session::{Effect, QuizSession};

pub type GameResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Reads stdin on a background thread and forwards each line.
///
/// The channel closes when stdin does.
pub fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub struct Game<R, A> {
    session: QuizSession,
    renderer: R,
    audio: A,
    lines: UnboundedReceiver<String>,
    tick: Duration,
}

impl<R: RenderSink, A: AudioSink> Game<R, A> {
    pub fn new(
        session: QuizSession,
        renderer: R,
        audio: A,
        lines: UnboundedReceiver<String>,
        tick: Duration,
    ) -> Self {
        Self {
            session,
            renderer,
            audio,
            lines,
            tick,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Runs until the player quits or the input closes.
    pub async fn run(&mut self) -> GameResult {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.renderer.render(&self.session.frame())?;
        loop {
            let effects = tokio::select! {
                _ = interval.tick() => self.session.tick(self.tick),
                line = self.lines.recv() => match line {
                    Some(line) => match terminal::parse_line(&line) {
                        Some(Command::Input(input)) => self.session.handle_input(input),
                        Some(Command::Quit) => {
                            info!("Player quit");
                            break;
                        }
                        None => Vec::new(),
                    },
                    None => {
                        info!("Input closed");
                        break;
                    }
                },
            };
            self.apply(effects)?;
            self.renderer.render(&self.session.frame())?;
        }
        Ok(())
    }

    fn apply(&mut self, effects: Vec<Effect>) -> GameResult {
        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::PlayCue(cue) => self.audio.play_cue(cue),
                Effect::StopCue(cue) => self.audio.stop_cue(cue),
                Effect::Background(command) => self.audio.background(command),
                Effect::ReportError(err) => self.renderer.report(&err)?,
                Effect::StartAuthoring => {
                    let result = self.author();
                    queue.extend(self.session.finish_authoring(result));
                }
            }
        }
        Ok(())
    }

    /// Runs the authoring prompt on the same line stream the game reads.
    ///
    /// This blocks the driver on purpose: no countdown runs while authoring.
    fn author(&mut self) -> Result<PathBuf, QuizError> {
        let catalog = self.session.catalog().clone();
        let lines = &mut self.lines;
        let result = tokio::task::block_in_place(|| {
            let mut input = BufReader::new(LineReader::new(lines));
            let mut output = io::stdout().lock();
            authoring::create_quiz(&mut input, &mut output, &catalog)
        });
        if let Err(err) = &result {
            warn!("Authoring did not complete: {}", err);
        }
        result
    }
}

/// Presents queued lines as a byte stream, one line per `read`.
struct LineReader<'a> {
    lines: &'a mut UnboundedReceiver<String>,
    pending: Vec<u8>,
    pos: usize,
}

impl<'a> LineReader<'a> {
    fn new(lines: &'a mut UnboundedReceiver<String>) -> Self {
        Self {
            lines,
            pending: Vec::new(),
            pos: 0,
        }
    }
}

impl Read for LineReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.pending.len() {
            let Some(line) = self.lines.blocking_recv() else {
                debug!("Line stream closed");
                return Ok(0);
            };
            self.pending = line.into_bytes();
            self.pending.push(b'\n');
            self.pos = 0;
        }
        let n = buf.len().min(self.pending.len() - self.pos);
        buf[..n].copy_from_slice(&self.pending[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
