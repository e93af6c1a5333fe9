pub mod authoring;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod session;
pub mod shuffle;

use error::QuestionError;

/// Every question offers exactly this many answers.
pub const ANSWER_COUNT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }

    pub(crate) fn questions_mut(&mut self) -> &mut [Question] {
        &mut self.questions
    }
}

impl FromIterator<Question> for QuestionBank {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A multiple-choice question.
///
/// `correct_index` always points at one of the four `answers`; the fields are
/// private so that they can only change together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: [String; ANSWER_COUNT],
    correct_index: usize,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        answers: [String; ANSWER_COUNT],
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        if correct_index >= ANSWER_COUNT {
            return Err(QuestionError::IndexOutOfRange(correct_index));
        }
        Ok(Self {
            text: text.into(),
            answers,
            correct_index,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answers(&self) -> &[String; ANSWER_COUNT] {
        &self.answers
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_index]
    }

    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }

    /// Swaps in a reordering of the answers and re-points `correct_index` at
    /// the first answer equal to the old correct one.
    ///
    /// Fails without touching `self` if the correct answer is not among the
    /// new answers.
    pub fn reorder_answers(
        &mut self,
        answers: [String; ANSWER_COUNT],
    ) -> Result<(), QuestionError> {
        let correct_index = answers
            .iter()
            .position(|a| a == self.correct_answer())
            .ok_or(QuestionError::CorrectAnswerMissing)?;
        self.answers = answers;
        self.correct_index = correct_index;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn answers(a: &str, b: &str, c: &str, d: &str) -> [String; ANSWER_COUNT] {
    [a.to_string(), b.to_string(), c.to_string(), d.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_index() {
        let err = Question::new("2+2?", answers("3", "4", "5", "6"), 4).unwrap_err();
        assert_eq!(err, QuestionError::IndexOutOfRange(4));
    }

    #[test]
    fn reorder_follows_the_correct_value() {
        let mut q = Question::new("2+2?", answers("3", "4", "5", "6"), 1).unwrap();
        q.reorder_answers(answers("6", "5", "4", "3")).unwrap();
        assert_eq!(q.correct_index(), 2);
        assert_eq!(q.correct_answer(), "4");
    }

    #[test]
    fn reorder_picks_first_duplicate() {
        let mut q = Question::new("pick", answers("a", "b", "b", "c"), 2).unwrap();
        q.reorder_answers(answers("c", "b", "a", "b")).unwrap();
        assert_eq!(q.correct_index(), 1);
    }

    #[test]
    fn reorder_refuses_foreign_answers() {
        let mut q = Question::new("2+2?", answers("3", "4", "5", "6"), 1).unwrap();
        let before = q.clone();
        let err = q.reorder_answers(answers("7", "8", "9", "10")).unwrap_err();
        assert_eq!(err, QuestionError::CorrectAnswerMissing);
        assert_eq!(q, before);
    }
}
