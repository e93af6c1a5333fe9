use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Anything that can go wrong while loading, saving or authoring a bank.
///
/// None of these are fatal: the session reports them and falls back to the
/// quiz menu.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("quiz file not found: {}", .path.display())]
    BankNotFound { path: PathBuf },

    #[error("quiz file is empty: {}", .path.display())]
    BankEmpty { path: PathBuf },

    #[error("malformed quiz file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("field {field:?} cannot be stored (contains ';' or a line break)")]
    UnencodableField { field: String },

    #[error("quiz authoring aborted: input ended")]
    AuthoringAborted,

    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),

    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number of the offending record.
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected 6 ';'-separated fields, found {0}")]
    FieldCount(usize),

    #[error("correct answer index {0:?} is not a single digit")]
    InvalidIndex(String),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Violations of the `Question` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("correct answer index {0} is out of range 0..=3")]
    IndexOutOfRange(usize),

    #[error("the correct answer is missing from the reordered answers")]
    CorrectAnswerMissing,
}

/// Reasons an authoring prompt rejects an entry and asks again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthoringInvalid {
    #[error("Filename cannot be empty. Please enter a valid filename:")]
    EmptyFilename,

    #[error("Question cannot be empty. Please enter a valid question.")]
    EmptyQuestion,

    #[error("Answer option cannot be empty. Please enter a valid answer.")]
    EmptyAnswer,

    #[error("';' cannot be used in a quiz. Please try again.")]
    ContainsSeparator,

    #[error("Please enter a whole number between 1 and 100.")]
    InvalidCount,

    #[error("Invalid choice. Please enter a number between 1 and 4.")]
    InvalidChoice,
}
