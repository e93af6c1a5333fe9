//! Line-oriented quiz file format.
//!
//! One question per line:
//!
//! ```text
//! question;answer1;answer2;answer3;answer4;correct_index
//! ```
//!
//! `correct_index` is 0-based. Fields cannot contain `;` since the format has
//! no escaping. The first empty line (or the end of input) ends the bank.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::error::{ParseError, ParseErrorKind, QuizError};
use super::{Question, QuestionBank, ANSWER_COUNT};

const SEPARATOR: char = ';';
const FIELD_COUNT: usize = ANSWER_COUNT + 2;

pub fn parse(source: &str) -> Result<QuestionBank, ParseError> {
    let mut questions = Vec::new();
    for (i, line) in source.lines().enumerate() {
        if line.is_empty() {
            break;
        }
        let question = parse_record(line).map_err(|kind| ParseError { line: i + 1, kind })?;
        questions.push(question);
    }
    Ok(QuestionBank::new(questions))
}

fn parse_record(line: &str) -> Result<Question, ParseErrorKind> {
    let fields = line.split(SEPARATOR).collect::<Vec<_>>();
    if fields.len() != FIELD_COUNT {
        return Err(ParseErrorKind::FieldCount(fields.len()));
    }

    let index_field = fields[FIELD_COUNT - 1];
    let correct_index = match index_field.as_bytes() {
        [digit @ b'0'..=b'9'] => usize::from(digit - b'0'),
        _ => return Err(ParseErrorKind::InvalidIndex(index_field.to_string())),
    };
    let answers = std::array::from_fn(|i| fields[i + 1].to_string());

    Ok(Question::new(fields[0], answers, correct_index)?)
}

pub fn serialize(bank: &QuestionBank) -> String {
    let mut out = String::new();
    for question in bank.questions() {
        out.push_str(question.text());
        for answer in question.answers() {
            out.push(SEPARATOR);
            out.push_str(answer);
        }
        out.push(SEPARATOR);
        out.push_str(&question.correct_index().to_string());
        out.push('\n');
    }
    out
}

/// Reads a bank from disk.
///
/// A missing file is `BankNotFound` and a file without any record is
/// `BankEmpty`, so callers can tell the player what went wrong.
pub fn load_bank(path: &Path) -> Result<QuestionBank, QuizError> {
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => QuizError::BankNotFound {
            path: path.to_path_buf(),
        },
        _ => QuizError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let bank = parse(&source).map_err(|source| QuizError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if bank.is_empty() {
        return Err(QuizError::BankEmpty {
            path: path.to_path_buf(),
        });
    }

    info!("Loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

/// Writes a bank to disk, replacing any existing file at `path`.
///
/// The content goes to a sibling temp file first and is renamed into place.
pub fn save_bank(path: &Path, bank: &QuestionBank) -> Result<(), QuizError> {
    for question in bank.questions() {
        let fields = std::iter::once(question.text()).chain(question.answers().iter().map(String::as_str));
        for field in fields {
            if !is_encodable(field) {
                return Err(QuizError::UnencodableField {
                    field: field.to_string(),
                });
            }
        }
    }

    let io_err = |source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp_path = temp_path(path);
    fs::write(&tmp_path, serialize(bank)).map_err(io_err)?;
    fs::rename(&tmp_path, path).map_err(io_err)?;

    debug!("Saved {} questions to {}", bank.len(), path.display());
    Ok(())
}

pub fn is_encodable(field: &str) -> bool {
    !field.contains([SEPARATOR, '\n', '\r'])
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
