pub mod catalog;

pub use catalog::{list_quizzes, load_quiz, QuizDoc, QuizItem, QuizSummary, VocabItem};
