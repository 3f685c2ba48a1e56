//! Session-id generation for cookie sessions.
//!
//! Session records themselves live in the auth database; expired rows are
//! swept probabilistically on access (see `auth::middleware`).

use rand::Rng;

/// Generate a new random session ID (32 lowercase alphanumerics)
pub fn generate_session_id() -> String {
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
