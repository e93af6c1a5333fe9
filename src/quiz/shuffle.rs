use std::path::{Path, PathBuf};

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use super::codec;
use super::error::QuizError;
use super::{Question, QuestionBank};

/// Puts the questions in a uniformly random order.
pub fn shuffle_questions<R: Rng + ?Sized>(bank: QuestionBank, rng: &mut R) -> QuestionBank {
    let mut bank = bank;
    bank.questions_mut().shuffle(rng);
    bank
}

/// Shuffles the answers of one question.
///
/// The correct answer is tracked by value, so the reshuffled `correct_index`
/// points at the first answer equal to the one that was correct before. With
/// duplicate answers that is always an equal string, so the question stays
/// answerable the same way.
pub fn shuffle_answers<R: Rng + ?Sized>(question: Question, rng: &mut R) -> Question {
    let mut question = question;
    let mut shuffled = question.answers().clone();
    shuffled.shuffle(rng);
    // A permutation always contains the correct answer.
    let reordered = question.reorder_answers(shuffled);
    debug_assert!(reordered.is_ok(), "shuffle lost the correct answer");
    question
}

/// Shuffles question order first, then the answers of every question.
pub fn randomize<R: Rng + ?Sized>(bank: QuestionBank, rng: &mut R) -> QuestionBank {
    shuffle_questions(bank, rng)
        .into_questions()
        .into_iter()
        .map(|q| shuffle_answers(q, rng))
        .collect()
}

/// Picks one of `pool` at random, loads it and randomizes it.
///
/// Returns the chosen path together with the bank so that errors and logs can
/// name the file.
pub fn build_random_quiz<R: Rng + ?Sized>(
    pool: &[PathBuf],
    rng: &mut R,
) -> Result<(PathBuf, QuestionBank), QuizError> {
    let path = pool
        .choose(rng)
        .ok_or_else(|| QuizError::BankNotFound {
            path: PathBuf::new(),
        })?
        .clone();
    let bank = randomize(codec::load_bank(&path)?, rng);
    info!("Random quiz picked {}", display_name(&path));
    Ok((path, bank))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
