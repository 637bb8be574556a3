//! Instance identity tokens

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-local allocation counter; strictly increasing.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Identity of one mounted editor instance.
///
/// Tokens partition bus traffic, nothing more: they are collision resistant
/// but carry no security meaning. A token lives exactly as long as the
/// editor that allocated it and is never reused.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeToken(Arc<str>);

impl ScopeToken {
    /// Allocates a fresh token.
    ///
    /// Combines the wall-clock time in milliseconds, a process-local
    /// sequence number and a random 32-bit suffix.
    #[must_use]
    pub fn allocate() -> Self {
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let nonce: u32 = rand::random();

        Self(Arc::from(format!("scope-{millis:x}-{seq:x}-{nonce:08x}")))
    }

    /// Textual form, e.g. `scope-18c2f1a9b3e-2a-9f31c0de`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ScopeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopeToken").field(&&*self.0).finish()
    }
}

/// An event tagged with the scope of the editor it belongs to.
pub trait Scoped {
    /// The owning scope.
    fn scope(&self) -> &ScopeToken;

    /// Returns true if this event belongs to `scope`.
    fn is_in(&self, scope: &ScopeToken) -> bool {
        self.scope() == scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_have_the_documented_shape() {
        let token = ScopeToken::allocate();
        let parts: Vec<&str> = token.as_str().split('-').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "scope");
        assert_eq!(parts[3].len(), 8);
    }

    #[test]
    fn tokens_are_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..500)
                        .map(|_| ScopeToken::allocate())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for token in handle.join().unwrap() {
                assert!(seen.insert(token), "duplicate scope token");
            }
        }
        assert_eq!(seen.len(), 2_000);
    }

    #[test]
    fn clones_compare_equal() {
        let token = ScopeToken::allocate();
        assert_eq!(token.clone(), token);
        assert_ne!(ScopeToken::allocate(), token);
    }

    proptest! {
        #[test]
        fn batches_never_repeat_a_token(count in 1_usize..256) {
            let tokens: HashSet<ScopeToken> = (0..count).map(|_| ScopeToken::allocate()).collect();
            prop_assert_eq!(tokens.len(), count);
        }
    }
}
