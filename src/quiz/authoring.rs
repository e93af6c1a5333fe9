use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::info;

use super::catalog::Catalog;
use super::codec;
use super::error::{AuthoringInvalid, QuizError};
use super::{Question, QuestionBank, ANSWER_COUNT};

/// Largest quiz the prompt will walk through.
pub const MAX_QUESTIONS: usize = 100;

/// Walks the player through writing a new quiz and saves it.
///
/// Every entry is validated on the spot and asked again until it is
/// acceptable. Returns the path the quiz was saved to.
pub fn create_quiz<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    catalog: &Catalog,
) -> Result<PathBuf, QuizError> {
    let mut prompt = Prompt { input, output };

    prompt.say("\n=== Create New Quiz ===")?;
    let file_name = prompt.ask("Enter quiz filename (e.g., myquiz.txt):", filename)?;
    let count = prompt.ask("\nHow many questions do you want to add?", question_count)?;

    let mut questions = Vec::new();
    for i in 0..count {
        prompt.say(&format!("\nQuestion {}:", i + 1))?;
        let text = prompt.ask("Enter the question:", |s| {
            text_field(s, AuthoringInvalid::EmptyQuestion)
        })?;

        let mut answers: [String; ANSWER_COUNT] = Default::default();
        for (j, answer) in answers.iter_mut().enumerate() {
            *answer = prompt.ask(&format!("Enter answer option {}:", j + 1), |s| {
                text_field(s, AuthoringInvalid::EmptyAnswer)
            })?;
        }

        let correct = prompt.ask("Enter the correct answer number (1-4):", correct_choice)?;
        questions.push(Question::new(text, answers, correct)?);
    }

    let path = catalog.resolve(&file_name);
    codec::save_bank(&path, &QuestionBank::new(questions))?;
    info!("Authored {} questions into {}", count, path.display());

    prompt.say("\nQuiz created successfully!")?;
    prompt.say(&format!("Your quiz has been saved as '{}'", file_name))?;
    Ok(path)
}

struct Prompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompt<'_, R, W> {
    fn say(&mut self, line: &str) -> Result<(), QuizError> {
        writeln!(self.output, "{}", line).map_err(QuizError::Terminal)?;
        self.output.flush().map_err(QuizError::Terminal)
    }

    fn ask<T>(
        &mut self,
        question: &str,
        validate: impl Fn(&str) -> Result<T, AuthoringInvalid>,
    ) -> Result<T, QuizError> {
        loop {
            self.say(question)?;
            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(QuizError::Terminal)?;
            if read == 0 {
                return Err(QuizError::AuthoringAborted);
            }
            match validate(line.trim_end_matches(['\r', '\n'])) {
                Ok(value) => return Ok(value),
                Err(invalid) => self.say(&invalid.to_string())?,
            }
        }
    }
}

fn filename(entry: &str) -> Result<String, AuthoringInvalid> {
    text_field(entry, AuthoringInvalid::EmptyFilename)
}

fn text_field(entry: &str, when_empty: AuthoringInvalid) -> Result<String, AuthoringInvalid> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(when_empty);
    }
    if !codec::is_encodable(entry) {
        return Err(AuthoringInvalid::ContainsSeparator);
    }
    Ok(entry.to_string())
}

fn question_count(entry: &str) -> Result<usize, AuthoringInvalid> {
    match entry.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_QUESTIONS).contains(&n) => Ok(n),
        _ => Err(AuthoringInvalid::InvalidCount),
    }
}

/// Takes a 1-based choice and returns the 0-based index.
fn correct_choice(entry: &str) -> Result<usize, AuthoringInvalid> {
    match entry.trim().parse::<usize>() {
        Ok(n) if (1..=ANSWER_COUNT).contains(&n) => Ok(n - 1),
        _ => Err(AuthoringInvalid::InvalidChoice),
    }
}
