use std::io::{self, Write};

use log::debug;

use super::RenderSink;
use crate::quiz::catalog::NamedBank;
use crate::quiz::error::QuizError;
use crate::quiz::session::{Frame, Input, Key, Mode};

const WRAP_WIDTH: usize = 30;

/// One line typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(Input),
    Quit,
}

/// Maps a typed line to a command. Unknown lines give `None`.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    let command = match line {
        "" | "start" => Command::Input(Input::StartClicked),
        "retry" => Command::Input(Input::RetryClicked),
        "r" | "R" => Command::Input(Input::Key(Key::Retry)),
        "q" | "quit" => Command::Quit,
        _ => match line.parse::<u8>() {
            Ok(digit @ 1..=9) => Command::Input(Input::Key(Key::Digit(digit))),
            _ => {
                debug!("Unrecognised input {:?}", line);
                return None;
            }
        },
    };
    Some(command)
}

/// Breaks `text` into lines of at most `width` characters where possible.
/// Words longer than `width` get a line of their own.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// What is visible on screen; a redraw only happens when this changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visible {
    mode: Mode,
    question_number: usize,
    score: u32,
    seconds: u64,
    custom_bank_available: bool,
}

impl Visible {
    fn of(frame: &Frame<'_>) -> Self {
        Self {
            mode: frame.mode,
            question_number: frame.question_number,
            score: frame.score,
            seconds: frame.remaining_seconds.ceil() as u64,
            custom_bank_available: frame.custom_bank_available,
        }
    }
}

/// Draws each screen as plain text.
pub struct TerminalRenderer<W> {
    out: W,
    last: Option<Visible>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let out = &mut self.out;
        match frame.mode {
            Mode::Idle => {
                writeln!(out, "\n=== Trivia Game ===")?;
                writeln!(out, "Press Enter to start (q to quit)")?;
            }
            Mode::QuizSelect => {
                writeln!(out, "\nSelect a Quiz:")?;
                for (i, bank) in NamedBank::ALL.iter().enumerate() {
                    writeln!(out, "{}. {}", i + 1, bank.title())?;
                }
                writeln!(out, "4. Random Quiz")?;
                writeln!(out, "5. Create New Quiz")?;
                if frame.custom_bank_available {
                    writeln!(out, "6. Play Custom Quiz")?;
                }
            }
            Mode::Authoring => {}
            Mode::InstructionsCountdown => {
                writeln!(out, "\nInstructions:")?;
                writeln!(out, "1. Use keys 1 to 4 to answer.")?;
                writeln!(
                    out,
                    "2. You have {} seconds per question!",
                    frame.question_seconds.round()
                )?;
                writeln!(out, "3. Aim for a high score!")?;
                writeln!(out, "Starting in {}...", frame.remaining_seconds.ceil())?;
            }
            Mode::Active => {
                let Some(question) = frame.question else {
                    return Ok(());
                };
                writeln!(
                    out,
                    "\nQuestion {}/{}   Score: {}   Time: {}",
                    frame.question_number,
                    frame.total,
                    frame.score,
                    frame.remaining_seconds.ceil()
                )?;
                for line in word_wrap(question.text(), WRAP_WIDTH) {
                    writeln!(out, "  {}", line)?;
                }
                for (i, answer) in question.answers().iter().enumerate() {
                    writeln!(out, "{}. {}", i + 1, answer)?;
                }
            }
            Mode::Ended => {
                writeln!(out, "\nGame Over!")?;
                writeln!(out, "Your final score: {}", frame.score)?;
                writeln!(out, "Type 'retry' or press 'R' to play again")?;
            }
        }
        out.flush()
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let visible = Visible::of(frame);
        if self.last == Some(visible) {
            return Ok(());
        }
        self.last = Some(visible);
        self.draw(frame)
    }

    fn report(&mut self, error: &QuizError) -> io::Result<()> {
        writeln!(self.out, "Error: {}", error)?;
        self.out.flush()?;
        // Make sure the menu is drawn again underneath the message.
        self.last = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{answers, Question};

    fn frame(mode: Mode, question: Option<&Question>, remaining: f64) -> Frame<'_> {
        Frame {
            mode,
            question,
            question_number: 1,
            total: 2,
            remaining_seconds: remaining,
            question_seconds: 10.0,
            score: 0,
            custom_bank_available: false,
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line(""), Some(Command::Input(Input::StartClicked)));
        assert_eq!(parse_line("retry\n"), Some(Command::Input(Input::RetryClicked)));
        assert_eq!(parse_line("R"), Some(Command::Input(Input::Key(Key::Retry))));
        assert_eq!(parse_line(" 3 "), Some(Command::Input(Input::Key(Key::Digit(3)))));
        assert_eq!(parse_line("quit"), Some(Command::Quit));
        assert_eq!(parse_line("0"), None);
        assert_eq!(parse_line("hello"), None);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = word_wrap("What is the capital city of the country France?", 20);
        assert_eq!(lines, vec!["What is the capital", "city of the country", "France?"]);
        assert_eq!(word_wrap("", 10), Vec::<String>::new());
        assert_eq!(word_wrap("supercalifragilistic ok", 5), vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn redraws_only_on_visible_change() {
        let q = Question::new("2+2?", answers("3", "4", "5", "6"), 1).unwrap();
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&frame(Mode::Active, Some(&q), 10.0)).unwrap();
        renderer.render(&frame(Mode::Active, Some(&q), 9.99)).unwrap();
        renderer.render(&frame(Mode::Active, Some(&q), 9.0)).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text.matches("Question 1/2").count(), 2);
        assert!(text.contains("2. 4"));
    }

    #[test]
    fn custom_option_only_when_available() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&frame(Mode::QuizSelect, None, 10.0)).unwrap();
        let mut with_custom = frame(Mode::QuizSelect, None, 10.0);
        with_custom.custom_bank_available = true;
        renderer.render(&with_custom).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text.matches("Select a Quiz:").count(), 2);
        assert_eq!(text.matches("6. Play Custom Quiz").count(), 1);
    }
}
