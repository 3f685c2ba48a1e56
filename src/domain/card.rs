use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::srs::{ReviewState, sm2::INITIAL_EASINESS};

/// Where a card sits in its review life. Derived from the counters,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPhase {
  New,
  Learning,
  Reviewing,
  Lapsed,
}

impl ReviewPhase {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::New => "new",
      Self::Learning => "learning",
      Self::Reviewing => "reviewing",
      Self::Lapsed => "lapsed",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "new" => Some(Self::New),
      "learning" => Some(Self::Learning),
      "reviewing" => Some(Self::Reviewing),
      "lapsed" => Some(Self::Lapsed),
      _ => None,
    }
  }
}

/// One favorited vocabulary word with its review schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteWord {
  pub id: i64,
  pub word: String,
  pub definition: String,
  pub example: String,
  pub easiness: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
  pub last_reviewed: Option<DateTime<Utc>>,
  pub favorited_at: DateTime<Utc>,
  pub total_reviews: i64,
  pub correct_reviews: i64,
}

impl FavoriteWord {
  /// A freshly favorited word: never reviewed, due immediately.
  pub fn new(word: String, definition: String, example: String) -> Self {
    let now = Utc::now();
    Self {
      id: 0,
      word,
      definition,
      example,
      easiness: INITIAL_EASINESS,
      interval_days: 1,
      repetitions: 0,
      next_review: now,
      last_reviewed: None,
      favorited_at: now,
      total_reviews: 0,
      correct_reviews: 0,
    }
  }

  /// Scheduling fields as the scheduler consumes them.
  pub fn scheduling(&self) -> ReviewState {
    ReviewState {
      easiness: self.easiness,
      interval_days: self.interval_days,
      repetitions: self.repetitions,
    }
  }

  pub fn phase(&self) -> ReviewPhase {
    match (self.repetitions, self.total_reviews) {
      (0, 0) => ReviewPhase::New,
      (0, _) => ReviewPhase::Lapsed,
      (1..=2, _) => ReviewPhase::Learning,
      _ => ReviewPhase::Reviewing,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_word_defaults() {
    let word = FavoriteWord::new(
      "serendipity".to_string(),
      "finding something good without looking for it".to_string(),
      "It was pure serendipity that we met.".to_string(),
    );

    assert_eq!(word.id, 0);
    assert!((word.easiness - 2.5).abs() < f64::EPSILON);
    assert_eq!(word.interval_days, 1);
    assert_eq!(word.repetitions, 0);
    assert!(word.last_reviewed.is_none());
    assert_eq!(word.total_reviews, 0);
    assert_eq!(word.correct_reviews, 0);
    // Due the moment it is favorited
    assert!(word.next_review <= Utc::now());
  }

  #[test]
  fn test_scheduling_view() {
    let word = FavoriteWord::new("a".to_string(), "b".to_string(), String::new());
    let state = word.scheduling();
    assert!((state.easiness - word.easiness).abs() < f64::EPSILON);
    assert_eq!(state.interval_days, word.interval_days);
    assert_eq!(state.repetitions, word.repetitions);
  }

  #[test]
  fn test_phase_new() {
    let word = FavoriteWord::new("a".to_string(), "b".to_string(), String::new());
    assert_eq!(word.phase(), ReviewPhase::New);
  }

  #[test]
  fn test_phase_learning() {
    let mut word = FavoriteWord::new("a".to_string(), "b".to_string(), String::new());
    word.repetitions = 1;
    word.total_reviews = 1;
    assert_eq!(word.phase(), ReviewPhase::Learning);
    word.repetitions = 2;
    word.total_reviews = 2;
    assert_eq!(word.phase(), ReviewPhase::Learning);
  }

  #[test]
  fn test_phase_reviewing() {
    let mut word = FavoriteWord::new("a".to_string(), "b".to_string(), String::new());
    word.repetitions = 3;
    word.total_reviews = 3;
    assert_eq!(word.phase(), ReviewPhase::Reviewing);
  }

  #[test]
  fn test_phase_lapsed_keeps_history_distinct_from_new() {
    let mut word = FavoriteWord::new("a".to_string(), "b".to_string(), String::new());
    word.repetitions = 0;
    word.total_reviews = 7;
    word.easiness = 1.7;
    assert_eq!(word.phase(), ReviewPhase::Lapsed);
  }

  #[test]
  fn test_phase_roundtrip() {
    for phase in [
      ReviewPhase::New,
      ReviewPhase::Learning,
      ReviewPhase::Reviewing,
      ReviewPhase::Lapsed,
    ] {
      assert_eq!(ReviewPhase::from_str(phase.as_str()), Some(phase));
    }
    assert_eq!(ReviewPhase::from_str("graduated"), None);
  }
}
