use chrono::{DateTime, Duration, Utc};

/// Easiness never drops below this, no matter how badly a review goes.
pub const MIN_EASINESS: f64 = 1.3;

/// Easiness assigned to a freshly favorited word.
pub const INITIAL_EASINESS: f64 = 2.5;

/// Quality scores at or above this count as a successful recall.
pub const PASS_THRESHOLD: u8 = 3;

/// Highest valid recall-quality score.
pub const MAX_QUALITY: u8 = 5;

/// Scheduling fields of a card, as read from the word store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewState {
  pub easiness: f64,
  pub interval_days: i64,
  pub repetitions: i64,
}

impl ReviewState {
  /// State of a card that has never been reviewed.
  pub fn new_card() -> Self {
    Self {
      easiness: INITIAL_EASINESS,
      interval_days: 1,
      repetitions: 0,
    }
  }
}

impl Default for ReviewState {
  fn default() -> Self {
    Self::new_card()
  }
}

/// Everything a single review changes about a card's schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleUpdate {
  pub easiness: f64,
  pub interval_days: i64,
  pub repetitions: i64,
  pub next_review: DateTime<Utc>,
  pub last_reviewed: DateTime<Utc>,
}

/// Contract violations surfaced by [`compute_next_state`].
/// Nothing is computed and the caller must not persist anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
  /// Recall quality outside the 0-5 scale.
  InvalidQuality(u8),
  /// Input state violates a scheduling invariant.
  InvalidState(&'static str),
}

impl std::fmt::Display for ScheduleError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::InvalidQuality(q) => write!(f, "recall quality {} is outside 0-5", q),
      Self::InvalidState(why) => write!(f, "invalid scheduling state: {}", why),
    }
  }
}

impl std::error::Error for ScheduleError {}

/// True when `quality` counts as a successful recall.
pub fn is_passing(quality: u8) -> bool {
  quality >= PASS_THRESHOLD
}

/// SM-2 update rule: compute a card's next schedule from one review.
///
/// `quality` is the learner's self-assessment, 0 (complete blackout)
/// to 5 (perfect recall).
///
/// Pure and deterministic - the clock is an argument, so `next_review`
/// always lands exactly `interval_days` after `last_reviewed`.
///
/// A failed recall (quality < 3) resets repetitions and the interval but
/// leaves easiness untouched; only successful reviews move it. Invalid
/// input is rejected, never clamped - the store boundary normalizes
/// whatever it reads before it gets here.
pub fn compute_next_state(
  quality: u8,
  state: ReviewState,
  now: DateTime<Utc>,
) -> Result<ScheduleUpdate, ScheduleError> {
  if quality > MAX_QUALITY {
    return Err(ScheduleError::InvalidQuality(quality));
  }
  if !(state.easiness >= MIN_EASINESS) {
    return Err(ScheduleError::InvalidState("easiness below 1.3"));
  }
  if state.repetitions < 0 {
    return Err(ScheduleError::InvalidState("negative repetitions"));
  }
  if state.interval_days < 1 {
    return Err(ScheduleError::InvalidState("interval below one day"));
  }

  let (easiness, interval_days, repetitions) = if quality < PASS_THRESHOLD {
    // Failed recall: back to the start, easiness unchanged
    (state.easiness, 1, 0)
  } else {
    let repetitions = state.repetitions + 1;
    // The interval grows from the easiness the card had going into this
    // review; the adjustment below only affects the next one
    let interval_days = match repetitions {
      1 => 1,
      2 => 6,
      _ => (state.interval_days as f64 * state.easiness).round() as i64,
    };
    let q = quality as f64;
    let easiness =
      (state.easiness + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASINESS);
    (easiness, interval_days, repetitions)
  };

  Ok(ScheduleUpdate {
    easiness,
    interval_days,
    repetitions,
    next_review: now + Duration::days(interval_days),
    last_reviewed: now,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn apply(quality: u8, state: ReviewState) -> ScheduleUpdate {
    compute_next_state(quality, state, Utc::now()).unwrap()
  }

  fn as_state(update: &ScheduleUpdate) -> ReviewState {
    ReviewState {
      easiness: update.easiness,
      interval_days: update.interval_days,
      repetitions: update.repetitions,
    }
  }

  #[test]
  fn test_first_review_perfect() {
    let result = apply(5, ReviewState::new_card());
    assert_eq!(result.repetitions, 1);
    assert_eq!(result.interval_days, 1);
    // 2.5 + (0.1 - 0 * (0.08 + 0)) = 2.6
    assert!((result.easiness - 2.6).abs() < 1e-9);
  }

  #[test]
  fn test_second_review_perfect() {
    let first = apply(5, ReviewState::new_card());
    let second = apply(5, as_state(&first));
    assert_eq!(second.repetitions, 2);
    assert_eq!(second.interval_days, 6);
    assert!((second.easiness - 2.7).abs() < 1e-9);
  }

  #[test]
  fn test_third_review_perfect() {
    let first = apply(5, ReviewState::new_card());
    let second = apply(5, as_state(&first));
    let third = apply(5, as_state(&second));
    assert_eq!(third.repetitions, 3);
    // round(6 * 2.7), the easiness going into the third review
    assert_eq!(third.interval_days, 16);
    assert!((third.easiness - 2.8).abs() < 1e-9);
  }

  #[test]
  fn test_failed_review_resets_regardless_of_history() {
    let mature = ReviewState {
      easiness: 2.1,
      interval_days: 40,
      repetitions: 10,
    };
    let result = apply(2, mature);
    assert_eq!(result.repetitions, 0);
    assert_eq!(result.interval_days, 1);
    // Easiness is not penalized on failure
    assert!((result.easiness - 2.1).abs() < 1e-9);
  }

  #[test]
  fn test_easiness_floor_on_barely_passing_review() {
    let state = ReviewState {
      easiness: MIN_EASINESS,
      interval_days: 6,
      repetitions: 2,
    };
    // 1.3 + (0.1 - 2 * (0.08 + 2 * 0.02)) = 1.16, clamped back up
    let result = apply(3, state);
    assert!((result.easiness - MIN_EASINESS).abs() < 1e-9);
    assert_eq!(result.repetitions, 3);
    // round(6 * 1.3)
    assert_eq!(result.interval_days, 8);
  }

  #[test]
  fn test_pass_threshold_boundary() {
    let state = ReviewState {
      easiness: 2.5,
      interval_days: 6,
      repetitions: 2,
    };
    let passed = apply(3, state);
    assert_eq!(passed.repetitions, 3);

    let failed = apply(2, state);
    assert_eq!(failed.repetitions, 0);
    assert_eq!(failed.interval_days, 1);
  }

  #[test]
  fn test_success_increments_repetitions_by_exactly_one() {
    for reps in [0, 1, 2, 7, 100] {
      let state = ReviewState {
        easiness: 2.5,
        interval_days: 10,
        repetitions: reps,
      };
      assert_eq!(apply(4, state).repetitions, reps + 1);
    }
  }

  #[test]
  fn test_next_review_derived_from_last_reviewed() {
    let now = Utc::now();
    for quality in 0..=MAX_QUALITY {
      let result = compute_next_state(
        quality,
        ReviewState {
          easiness: 2.5,
          interval_days: 15,
          repetitions: 3,
        },
        now,
      )
      .unwrap();
      assert_eq!(result.last_reviewed, now);
      assert_eq!(
        result.next_review,
        result.last_reviewed + Duration::days(result.interval_days)
      );
    }
  }

  #[test]
  fn test_invariants_hold_for_all_qualities() {
    let states = [
      ReviewState::new_card(),
      ReviewState {
        easiness: MIN_EASINESS,
        interval_days: 1,
        repetitions: 1,
      },
      ReviewState {
        easiness: 3.0,
        interval_days: 180,
        repetitions: 9,
      },
    ];
    for state in states {
      for quality in 0..=MAX_QUALITY {
        let result = apply(quality, state);
        assert!(result.easiness >= MIN_EASINESS);
        assert!(result.interval_days >= 1);
        if quality < PASS_THRESHOLD {
          assert_eq!(result.repetitions, 0);
          assert_eq!(result.interval_days, 1);
        }
      }
    }
  }

  #[test]
  fn test_not_idempotent() {
    // Re-reviewing the returned state must produce a different schedule -
    // this is an update rule, not a cache
    let first = apply(5, ReviewState::new_card());
    let again = apply(5, as_state(&first));
    assert_ne!(first.interval_days, again.interval_days);
    assert!(again.interval_days > first.interval_days);
  }

  #[test]
  fn test_interval_grows_over_good_reviews() {
    let mut state = ReviewState::new_card();
    for i in 0..5 {
      let result = apply(4, state);
      match i {
        0 => assert_eq!(result.interval_days, 1),
        1 => assert_eq!(result.interval_days, 6),
        _ => assert!(result.interval_days > 6),
      }
      state = as_state(&result);
    }
    assert!(state.interval_days > 30);
  }

  #[test]
  fn test_rejects_out_of_range_quality() {
    let result = compute_next_state(6, ReviewState::new_card(), Utc::now());
    assert_eq!(result, Err(ScheduleError::InvalidQuality(6)));
  }

  #[test]
  fn test_rejects_invalid_state() {
    let now = Utc::now();
    let low_easiness = ReviewState {
      easiness: 1.2,
      interval_days: 1,
      repetitions: 0,
    };
    assert!(matches!(
      compute_next_state(4, low_easiness, now),
      Err(ScheduleError::InvalidState(_))
    ));

    let negative_reps = ReviewState {
      easiness: 2.5,
      interval_days: 1,
      repetitions: -1,
    };
    assert!(matches!(
      compute_next_state(4, negative_reps, now),
      Err(ScheduleError::InvalidState(_))
    ));

    let zero_interval = ReviewState {
      easiness: 2.5,
      interval_days: 0,
      repetitions: 1,
    };
    assert!(matches!(
      compute_next_state(4, zero_interval, now),
      Err(ScheduleError::InvalidState(_))
    ));
  }

  #[test]
  fn test_is_passing() {
    assert!(!is_passing(0));
    assert!(!is_passing(2));
    assert!(is_passing(3));
    assert!(is_passing(5));
  }
}
