//! Property tests for the bank format, answer shuffling and the session's
//! counters.

use std::fs;
use std::time::Duration;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use trivia_quiz::quiz::catalog::Catalog;
use trivia_quiz::quiz::codec;
use trivia_quiz::quiz::session::{Input, Key, Mode, QuizSession, Timing};
use trivia_quiz::quiz::shuffle;
use trivia_quiz::quiz::{Question, QuestionBank};

fn field() -> impl Strategy<Value = String> + Clone {
    "[^;\r\n]{1,12}"
}

fn question_with(answer: impl Strategy<Value = String> + Clone) -> impl Strategy<Value = Question> {
    (
        field(),
        [answer.clone(), answer.clone(), answer.clone(), answer],
        0usize..4,
    )
        .prop_map(|(text, answers, correct)| Question::new(text, answers, correct).unwrap())
}

fn bank() -> impl Strategy<Value = QuestionBank> {
    prop::collection::vec(question_with(field()), 0..8).prop_map(QuestionBank::new)
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Tick(Duration),
    Key(u8),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u64..12_000).prop_map(|ms| Action::Tick(Duration::from_millis(ms))),
        (0u8..=6).prop_map(Action::Key),
    ]
}

#[test]
fn prop_serialize_then_parse_is_identity() {
    proptest!(|(bank in bank())| {
        let text = codec::serialize(&bank);
        prop_assert_eq!(text.lines().count(), bank.len());
        prop_assert_eq!(codec::parse(&text).unwrap(), bank);
    });
}

#[test]
fn prop_shuffled_answers_keep_correct_value() {
    // A tiny alphabet makes duplicate answers common.
    proptest!(|(question in question_with("[ab]{1,2}"), seed in any::<u64>())| {
        let mut rng = StdRng::seed_from_u64(seed);
        let shuffled = shuffle::shuffle_answers(question.clone(), &mut rng);

        prop_assert_eq!(shuffled.correct_answer(), question.correct_answer());
        prop_assert_eq!(shuffled.text(), question.text());

        let mut before = question.answers().to_vec();
        let mut after = shuffled.answers().to_vec();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    });
}

#[test]
fn prop_randomized_bank_keeps_every_question_answerable() {
    proptest!(|(bank in bank(), seed in any::<u64>())| {
        let mut rng = StdRng::seed_from_u64(seed);
        let randomized = shuffle::randomize(bank.clone(), &mut rng);
        let pairs = |b: &QuestionBank| {
            let mut pairs = b
                .questions()
                .iter()
                .map(|q| (q.text().to_string(), q.correct_answer().to_string()))
                .collect::<Vec<_>>();
            pairs.sort();
            pairs
        };
        prop_assert_eq!(pairs(&randomized), pairs(&bank));
    });
}

#[test]
fn prop_session_counters_stay_consistent() {
    let bank = "2+2?;3;4;5;6;1\nCapital of France?;Paris;Lyon;Nice;Rome;0\n3*3?;6;9;12;33;1\n";

    proptest!(|(actions in prop::collection::vec(action(), 0..60), seed in any::<u64>())| {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("math.txt"), bank).unwrap();
        let mut s = QuizSession::with_rng(
            Catalog::new(dir.path()),
            Timing::default(),
            StdRng::seed_from_u64(seed),
        );
        s.handle_input(Input::StartClicked);
        s.handle_input(Input::Key(Key::Digit(1)));

        for action in actions {
            let score_before = s.score();
            let index_before = s.current_index();
            let expected_gain = match action {
                Action::Key(k) if s.mode() == Mode::Active && (1..=4).contains(&k) => {
                    let correct = s.current_question().unwrap().is_correct(usize::from(k - 1));
                    u32::from(correct)
                }
                _ => 0,
            };

            match action {
                Action::Tick(elapsed) => {
                    s.tick(elapsed);
                }
                Action::Key(k) => {
                    s.handle_input(Input::Key(Key::Digit(k)));
                }
            }

            prop_assert_eq!(s.score(), score_before + expected_gain);
            prop_assert!(s.current_index() <= s.bank().len());
            prop_assert!(s.current_index() <= index_before + 1);
            prop_assert!(s.remaining_seconds() >= 0.0);
            prop_assert_eq!(
                s.mode() == Mode::Ended,
                s.current_index() == s.bank().len()
            );
        }
    });
}
