use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One submitted review, append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLog {
  pub id: i64,
  pub word_id: i64,
  pub quality: u8,
  pub is_correct: bool,
  pub reviewed_at: DateTime<Utc>,
}

impl ReviewLog {
  pub fn new(word_id: i64, quality: u8, is_correct: bool) -> Self {
    Self {
      id: 0,
      word_id,
      quality,
      is_correct,
      reviewed_at: Utc::now(),
    }
  }
}

/// One completed quiz, with the video metadata the account page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
  pub id: i64,
  pub slug: String,
  pub video_id: String,
  pub movie_title: String,
  pub channel_name: String,
  pub category: String,
  pub level: String,
  pub score: i64,
  pub total: i64,
  pub taken_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_review_log_new() {
    let log = ReviewLog::new(42, 4, true);
    assert_eq!(log.id, 0);
    assert_eq!(log.word_id, 42);
    assert_eq!(log.quality, 4);
    assert!(log.is_correct);
    assert!(log.reviewed_at <= Utc::now());
  }
}
