//! The quiz session state machine.
//!
//! ```text
//! Idle ──start──> QuizSelect ──select──> InstructionsCountdown ──5s──> Active ──last question──> Ended
//!                   │    ^                                                                      │
//!                   │    └──────────────────────────── retry ───────────────────────────────────┘
//!                   └──author──> Authoring ──done──> QuizSelect
//! ```
//!
//! The session does no I/O besides loading banks. Every transition returns the
//! [`Effect`]s (sounds, authoring prompt, error reports) for the driver to
//! carry out, and the driver feeds time in through [`QuizSession::tick`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::catalog::{Catalog, MenuChoice};
use super::error::QuizError;
use super::{codec, shuffle, Question, QuestionBank, ANSWER_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    QuizSelect,
    Authoring,
    InstructionsCountdown,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    StartClicked,
    RetryClicked,
    Key(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Number keys; `1`..`6` pick from the menu, `1`..`4` answer questions.
    Digit(u8),
    /// The `R` key.
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Click,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundCommand {
    Start,
    Pause,
    Resume,
    Stop,
}

/// Side effects requested by a transition, in the order they should happen.
#[derive(Debug)]
pub enum Effect {
    PlayCue(Cue),
    StopCue(Cue),
    Background(BackgroundCommand),
    /// Run the interactive authoring prompt, then report back through
    /// [`QuizSession::finish_authoring`].
    StartAuthoring,
    ReportError(QuizError),
}

#[derive(Debug)]
pub enum SessionEvent {
    Input(Input),
    Tick(Duration),
    AuthoringFinished(Result<PathBuf, QuizError>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub question: Duration,
    pub instructions: Duration,
    /// How long an answer cue plays before the background track resumes.
    pub feedback: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            question: Duration::from_secs(10),
            instructions: Duration::from_secs(5),
            feedback: Duration::from_millis(400),
        }
    }
}

/// What the render sink gets to see each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub mode: Mode,
    pub question: Option<&'a Question>,
    /// 1-based.
    pub question_number: usize,
    pub total: usize,
    pub remaining_seconds: f64,
    pub question_seconds: f64,
    pub score: u32,
    pub custom_bank_available: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Background {
    Stopped,
    Playing,
    Paused,
}

/// An answer cue that is still playing.
#[derive(Debug, Clone, Copy)]
struct Feedback {
    cue: Cue,
    remaining: f64,
}

pub struct QuizSession {
    mode: Mode,
    bank: QuestionBank,
    current_index: usize,
    remaining: f64,
    score: u32,
    selected_bank: Option<PathBuf>,
    custom_bank: Option<PathBuf>,
    feedback: Option<Feedback>,
    background: Background,
    catalog: Catalog,
    timing: Timing,
    rng: StdRng,
}

impl QuizSession {
    pub fn new(catalog: Catalog, timing: Timing) -> Self {
        Self::with_rng(catalog, timing, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: Catalog, timing: Timing, rng: StdRng) -> Self {
        Self {
            mode: Mode::Idle,
            bank: QuestionBank::default(),
            current_index: 0,
            remaining: timing.question.as_secs_f64(),
            score: 0,
            selected_bank: None,
            custom_bank: None,
            feedback: None,
            background: Background::Stopped,
            catalog,
            timing,
            rng,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.bank.get(self.current_index)
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.remaining
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected_bank(&self) -> Option<&Path> {
        self.selected_bank.as_deref()
    }

    pub fn custom_bank(&self) -> Option<&Path> {
        self.custom_bank.as_deref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The authored bank, if it is still on disk.
    pub fn available_custom_bank(&self) -> Option<&Path> {
        self.custom_bank().filter(|p| p.exists())
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            mode: self.mode,
            question: match self.mode {
                Mode::Active => self.current_question(),
                _ => None,
            },
            question_number: self.current_index + 1,
            total: self.bank.len(),
            remaining_seconds: self.remaining,
            question_seconds: self.timing.question.as_secs_f64(),
            score: self.score,
            custom_bank_available: self.available_custom_bank().is_some(),
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Input(input) => self.handle_input(input),
            SessionEvent::Tick(elapsed) => self.tick(elapsed),
            SessionEvent::AuthoringFinished(result) => self.finish_authoring(result),
        }
    }

    pub fn handle_input(&mut self, input: Input) -> Vec<Effect> {
        match (self.mode, input) {
            (Mode::Idle, Input::StartClicked) => {
                self.show_quiz_selection();
                vec![Effect::PlayCue(Cue::Click)]
            }
            (Mode::QuizSelect, Input::Key(Key::Digit(key))) => match MenuChoice::from_key(key) {
                Some(choice) => self.select(choice),
                None => Vec::new(),
            },
            (Mode::Active, Input::Key(Key::Digit(key))) if (1..=ANSWER_COUNT as u8).contains(&key) => {
                self.answer(usize::from(key - 1))
            }
            (Mode::Ended, Input::RetryClicked)
            | (Mode::Ended | Mode::Active | Mode::InstructionsCountdown, Input::Key(Key::Retry)) => {
                let mut effects = vec![Effect::PlayCue(Cue::Click)];
                self.restart(&mut effects);
                effects
            }
            (mode, input) => {
                debug!("Ignoring {:?} while in {:?}", input, mode);
                Vec::new()
            }
        }
    }

    /// Advances every running countdown by `elapsed`.
    ///
    /// At most one question advance happens per tick, however large `elapsed`
    /// is, and the countdown never goes below zero.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<Effect> {
        let dt = elapsed.as_secs_f64();
        let mut effects = Vec::new();

        if let Some(feedback) = self.feedback.as_mut() {
            feedback.remaining -= dt;
            if feedback.remaining <= 0.0 {
                self.complete_feedback(&mut effects);
            }
        }

        match self.mode {
            Mode::InstructionsCountdown => {
                self.remaining = (self.remaining - dt).max(0.0);
                if self.remaining <= 0.0 {
                    self.start_quiz(&mut effects);
                }
            }
            Mode::Active => {
                self.remaining = (self.remaining - dt).max(0.0);
                if self.remaining <= 0.0 {
                    debug!("Time is up for question {}", self.current_index + 1);
                    self.advance(&mut effects);
                }
            }
            Mode::Idle | Mode::QuizSelect | Mode::Authoring | Mode::Ended => {}
        }
        effects
    }

    /// Reports the outcome of the authoring prompt started by
    /// [`Effect::StartAuthoring`].
    pub fn finish_authoring(&mut self, result: Result<PathBuf, QuizError>) -> Vec<Effect> {
        if self.mode != Mode::Authoring {
            warn!("Authoring finished while in {:?}, ignoring", self.mode);
            return Vec::new();
        }
        self.show_quiz_selection();
        match result {
            Ok(path) => {
                info!("Custom quiz saved as {}", path.display());
                self.custom_bank = Some(path);
                Vec::new()
            }
            Err(err) => {
                warn!("Quiz authoring failed: {}", err);
                vec![Effect::ReportError(err)]
            }
        }
    }

    fn select(&mut self, choice: MenuChoice) -> Vec<Effect> {
        let loaded = match choice {
            MenuChoice::Named(bank) => {
                let path = self.catalog.path_of(bank);
                codec::load_bank(&path).map(|b| (path, b))
            }
            MenuChoice::Random => {
                let pool = self.catalog.random_pool(self.custom_bank.as_deref());
                shuffle::build_random_quiz(&pool, &mut self.rng)
            }
            MenuChoice::Custom => match self.available_custom_bank() {
                Some(path) => {
                    let path = path.to_path_buf();
                    codec::load_bank(&path).map(|b| (path, b))
                }
                None => {
                    debug!("No custom quiz to play");
                    return Vec::new();
                }
            },
            MenuChoice::AuthorNew => {
                info!("Authoring a new quiz");
                self.mode = Mode::Authoring;
                return vec![Effect::StartAuthoring];
            }
        };

        match loaded {
            Ok((path, bank)) => {
                self.show_instructions(path, bank);
                Vec::new()
            }
            Err(err) => {
                warn!("Cannot start quiz: {}", err);
                let mut effects = Vec::new();
                self.restart(&mut effects);
                effects.push(Effect::ReportError(err));
                effects
            }
        }
    }

    fn show_quiz_selection(&mut self) {
        info!("Showing quiz selection");
        self.mode = Mode::QuizSelect;
    }

    fn show_instructions(&mut self, path: PathBuf, bank: QuestionBank) {
        info!("Starting {} ({} questions)", path.display(), bank.len());
        self.bank = bank;
        self.current_index = 0;
        self.score = 0;
        self.remaining = self.timing.instructions.as_secs_f64();
        self.selected_bank = Some(path);
        self.mode = Mode::InstructionsCountdown;
    }

    fn start_quiz(&mut self, effects: &mut Vec<Effect>) {
        info!("Quiz started");
        self.mode = Mode::Active;
        self.remaining = self.timing.question.as_secs_f64();
        self.background = Background::Playing;
        effects.push(Effect::Background(BackgroundCommand::Start));
    }

    fn answer(&mut self, answer: usize) -> Vec<Effect> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        let correct = question.is_correct(answer);

        let mut effects = Vec::new();
        if self.feedback.is_some() {
            self.complete_feedback(&mut effects);
        }

        let cue = if correct {
            self.score += 1;
            Cue::Correct
        } else {
            Cue::Wrong
        };
        debug!(
            "Answer {} to question {}: {:?}, score {}",
            answer + 1,
            self.current_index + 1,
            cue,
            self.score
        );

        if self.background == Background::Playing {
            self.background = Background::Paused;
            effects.push(Effect::Background(BackgroundCommand::Pause));
        }
        effects.push(Effect::PlayCue(cue));
        self.feedback = Some(Feedback {
            cue,
            remaining: self.timing.feedback.as_secs_f64(),
        });

        self.advance(&mut effects);
        effects
    }

    fn advance(&mut self, effects: &mut Vec<Effect>) {
        self.current_index += 1;
        if self.current_index >= self.bank.len() {
            self.current_index = self.bank.len();
            self.remaining = 0.0;
            self.mode = Mode::Ended;
            info!("Quiz over, final score {}/{}", self.score, self.bank.len());
            self.stop_background(effects);
        } else {
            self.remaining = self.timing.question.as_secs_f64();
        }
    }

    fn complete_feedback(&mut self, effects: &mut Vec<Effect>) {
        let Some(feedback) = self.feedback.take() else {
            return;
        };
        effects.push(Effect::StopCue(feedback.cue));
        if self.mode == Mode::Active && self.background == Background::Paused {
            self.background = Background::Playing;
            effects.push(Effect::Background(BackgroundCommand::Resume));
        }
    }

    fn stop_background(&mut self, effects: &mut Vec<Effect>) {
        if self.background != Background::Stopped {
            self.background = Background::Stopped;
            effects.push(Effect::Background(BackgroundCommand::Stop));
        }
    }

    /// Full reset back to the quiz menu. The authored bank is remembered.
    fn restart(&mut self, effects: &mut Vec<Effect>) {
        self.stop_background(effects);
        self.complete_feedback(effects);
        self.bank = QuestionBank::default();
        self.current_index = 0;
        self.score = 0;
        self.remaining = self.timing.question.as_secs_f64();
        self.selected_bank = None;
        self.show_quiz_selection();
    }
}
