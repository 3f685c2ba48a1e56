//! Due-set selection over an in-memory card list.

use chrono::{DateTime, Utc};

use crate::domain::FavoriteWord;

/// True when the card's next scheduled review is at or before `now`.
pub fn is_due(word: &FavoriteWord, now: DateTime<Utc>) -> bool {
  word.next_review <= now
}

/// Filter `words` down to the cards due at `now`.
///
/// Input order is preserved, so callers that load cards in
/// storage-retrieval order review them in that same order.
pub fn select_due(words: &[FavoriteWord], now: DateTime<Utc>) -> Vec<&FavoriteWord> {
  words.iter().filter(|w| is_due(w, now)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn word_due_at(word: &str, next_review: DateTime<Utc>) -> FavoriteWord {
    let mut w = FavoriteWord::new(word.to_string(), "def".to_string(), String::new());
    w.next_review = next_review;
    w
  }

  #[test]
  fn test_includes_past_and_present_excludes_future() {
    let now = Utc::now();
    let words = vec![
      word_due_at("yesterday", now - Duration::days(1)),
      word_due_at("today", now),
      word_due_at("tomorrow", now + Duration::days(1)),
    ];

    let due = select_due(&words, now);
    assert_eq!(due.len(), 2);
    assert_eq!(due[0].word, "yesterday");
    assert_eq!(due[1].word, "today");
  }

  #[test]
  fn test_exactly_now_is_due() {
    let now = Utc::now();
    let words = vec![word_due_at("boundary", now)];
    assert!(is_due(&words[0], now));
    assert_eq!(select_due(&words, now).len(), 1);
  }

  #[test]
  fn test_empty_input() {
    assert!(select_due(&[], Utc::now()).is_empty());
  }

  #[test]
  fn test_preserves_input_order() {
    let now = Utc::now();
    let words = vec![
      word_due_at("c", now - Duration::hours(1)),
      word_due_at("a", now - Duration::days(3)),
      word_due_at("b", now - Duration::days(2)),
    ];

    let due = select_due(&words, now);
    let order: Vec<&str> = due.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
  }
}
