use std::fmt;
use tracing::warn;

/// Why a call with one API key failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFailure {
    /// Quota or rate limit hit on this key.
    QuotaExhausted(String),
    /// Key refused by the provider.
    Unauthorized(String),
    /// Network or server-side failure.
    Transient(String),
    /// The request itself was refused; another key would fare no better.
    Fatal(String),
}

impl KeyFailure {
    fn rotates(&self) -> bool {
        !matches!(self, KeyFailure::Fatal(_))
    }

    fn message(&self) -> &str {
        match self {
            KeyFailure::QuotaExhausted(message)
            | KeyFailure::Unauthorized(message)
            | KeyFailure::Transient(message)
            | KeyFailure::Fatal(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    #[error("no API keys configured")]
    NoKeys,
    #[error("all {attempts} API keys failed; last error: {last}")]
    Exhausted { attempts: usize, last: String },
    #[error("request rejected: {0}")]
    Fatal(String),
}

/// Ordered API keys plus the position of the key to try first.
///
/// Each call walks the ring once starting at the cursor. The cursor stays on the key
/// that last succeeded, so an exhausted key is not retried first on the next job.
/// A call where every key fails leaves the cursor where it was.
#[derive(Clone, Default)]
pub struct KeyRing {
    keys: Vec<String>,
    cursor: usize,
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("keys", &self.keys.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl KeyRing {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn call<T, F>(&mut self, mut attempt: F) -> Result<T, RotationError>
    where
        F: FnMut(&str) -> Result<T, KeyFailure>,
    {
        if self.keys.is_empty() {
            return Err(RotationError::NoKeys);
        }

        let total = self.keys.len();
        let mut last = None;
        for offset in 0..total {
            let index = (self.cursor + offset) % total;
            match attempt(&self.keys[index]) {
                Ok(value) => {
                    self.cursor = index;
                    return Ok(value);
                }
                Err(failure) if failure.rotates() => {
                    warn!(
                        key = index + 1,
                        total,
                        reason = failure.message(),
                        "API key failed, trying next key"
                    );
                    last = Some(failure);
                }
                Err(failure) => return Err(RotationError::Fatal(failure.message().to_string())),
            }
        }

        Err(RotationError::Exhausted {
            attempts: total,
            last: last
                .map(|failure| failure.message().to_string())
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(keys: &[&str]) -> KeyRing {
        KeyRing::new(keys.iter().map(|key| key.to_string()).collect())
    }

    #[test]
    fn empty_ring_is_unavailable() {
        let mut keys = ring(&[]);
        let result: Result<(), _> = keys.call(|_| Ok(()));
        assert_eq!(result, Err(RotationError::NoKeys));
    }

    #[test]
    fn quota_rotates_and_cursor_sticks_to_working_key() {
        let mut keys = ring(&["k8", "k7", "base"]);
        let mut tried = Vec::new();

        let answer = keys
            .call(|key| {
                tried.push(key.to_string());
                match key {
                    "k8" => Err(KeyFailure::QuotaExhausted("429".into())),
                    "k7" => Err(KeyFailure::Transient("connection reset".into())),
                    _ => Ok("scores"),
                }
            })
            .expect("third key answers");

        assert_eq!(answer, "scores");
        assert_eq!(tried, vec!["k8", "k7", "base"]);
        assert_eq!(keys.cursor(), 2);

        let mut next = Vec::new();
        keys.call(|key| {
            next.push(key.to_string());
            Ok::<_, KeyFailure>(())
        })
        .expect("cursor key answers");
        assert_eq!(next, vec!["base"]);
    }

    #[test]
    fn fatal_failure_stops_rotation() {
        let mut keys = ring(&["a", "b"]);
        let mut calls = 0;
        let result: Result<(), _> = keys.call(|_| {
            calls += 1;
            Err(KeyFailure::Fatal("400 invalid argument".into()))
        });
        assert_eq!(
            result,
            Err(RotationError::Fatal("400 invalid argument".into()))
        );
        assert_eq!(calls, 1);
    }

    #[test]
    fn every_key_failing_reports_last_error() {
        let mut keys = ring(&["a", "b", "c"]);
        keys.call(|key| match key {
            "b" => Ok(()),
            _ => Err(KeyFailure::QuotaExhausted("429".into())),
        })
        .expect("second key answers");
        assert_eq!(keys.cursor(), 1);

        let result: Result<(), _> = keys.call(|key| {
            Err(KeyFailure::Unauthorized(format!("key {key} revoked")))
        });
        assert_eq!(
            result,
            Err(RotationError::Exhausted {
                attempts: 3,
                last: "key a revoked".into()
            })
        );
        assert_eq!(keys.cursor(), 1);
    }
}
