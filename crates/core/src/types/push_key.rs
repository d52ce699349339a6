//! Time-ordered push keys for orders.
//!
//! A push key is 20 characters: 8 encode the creation time in milliseconds,
//! 12 are random. Keys generated within the same millisecond reuse the
//! previous random part incremented by one, so keys always sort in creation
//! order as plain strings.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use rand::Rng;

/// Alphabet in ASCII order so lexicographic order matches numeric order.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIME_CHARS: usize = 8;
const RANDOM_CHARS: usize = 12;

/// Length of a push key.
pub const PUSH_KEY_LENGTH: usize = TIME_CHARS + RANDOM_CHARS;

#[derive(Debug, Default)]
struct LastKey {
    millis: i64,
    random: [u8; RANDOM_CHARS],
}

/// Generator for monotonic push keys.
///
/// Safe to share between tasks; the last-issued state sits behind a mutex.
#[derive(Debug, Default)]
pub struct PushKeyGenerator {
    last: Mutex<LastKey>,
}

impl PushKeyGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a key for the current instant.
    #[must_use]
    pub fn generate(&self) -> String {
        self.generate_at(Utc::now())
    }

    /// Generate a key for the given instant.
    #[must_use]
    pub fn generate_at(&self, at: DateTime<Utc>) -> String {
        let millis = at.timestamp_millis().max(0);
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);

        if millis == last.millis {
            increment(&mut last.random);
        } else {
            let mut rng = rand::rng();
            for slot in &mut last.random {
                *slot = rng.random_range(0..64);
            }
            last.millis = millis;
        }

        let mut key = String::with_capacity(PUSH_KEY_LENGTH);
        let mut time_part = [0u8; TIME_CHARS];
        let mut remaining = millis;
        for slot in time_part.iter_mut().rev() {
            // remaining % 64 is always in 0..64
            *slot = u8::try_from(remaining % 64).unwrap_or(0);
            remaining /= 64;
        }
        for idx in time_part.iter().chain(last.random.iter()) {
            let c = PUSH_CHARS.get(usize::from(*idx)).copied().unwrap_or(b'-');
            key.push(char::from(c));
        }
        key
    }
}

/// Add one to the random part, carrying from the right.
fn increment(random: &mut [u8; RANDOM_CHARS]) {
    for slot in random.iter_mut().rev() {
        if *slot == 63 {
            *slot = 0;
        } else {
            *slot += 1;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_key_length() {
        let keys = PushKeyGenerator::new();
        assert_eq!(keys.generate().len(), PUSH_KEY_LENGTH);
    }

    #[test]
    fn test_keys_sort_in_creation_order_within_same_millisecond() {
        let keys = PushKeyGenerator::new();
        let at = Utc.timestamp_millis_opt(1_760_000_000_000).single();
        let Some(at) = at else {
            panic!("valid timestamp");
        };
        let generated: Vec<String> = (0..50).map(|_| keys.generate_at(at)).collect();
        let mut sorted = generated.clone();
        sorted.sort();
        assert_eq!(generated, sorted);
        sorted.dedup();
        assert_eq!(sorted.len(), 50);
    }

    #[test]
    fn test_later_time_sorts_after() {
        let keys = PushKeyGenerator::new();
        let early = keys.generate_at(Utc.timestamp_millis_opt(1_000).single().unwrap_or_default());
        let late = keys.generate_at(Utc.timestamp_millis_opt(2_000).single().unwrap_or_default());
        assert!(early < late);
    }

    #[test]
    fn test_increment_carries() {
        let mut random = [63u8; RANDOM_CHARS];
        random[0] = 5;
        increment(&mut random);
        assert_eq!(random[0], 6);
        assert!(random[1..].iter().all(|&v| v == 0));
    }
}
