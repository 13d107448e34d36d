//! TTL cache of authorizer decisions keyed by the raw session token.
//!
//! Bounded with LRU eviction. A cached `Allow` never outlives the token's
//! own expiry.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use lru::LruCache;
use moviedb_core::auth::AuthDecision;

#[derive(Debug, Clone)]
struct CachedDecision {
    decision: AuthDecision,
    valid_until: DateTime<Utc>,
}

#[derive(Debug)]
pub struct DecisionCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, CachedDecision>>,
}

impl DecisionCache {
    /// Creates a cache, or `None` when caching is disabled (TTL or size 0).
    pub fn new(ttl_seconds: u64, max_entries: usize) -> Option<Self> {
        if ttl_seconds == 0 {
            return None;
        }
        let capacity = NonZeroUsize::new(max_entries)?;
        let ttl = Duration::seconds(i64::try_from(ttl_seconds).ok()?);

        Some(Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn get(&self, token: &str, now: DateTime<Utc>) -> Option<AuthDecision> {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        match entries.get(token) {
            Some(cached) if cached.valid_until > now => Some(cached.decision.clone()),
            Some(_) => {
                entries.pop(token);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, token: &str, decision: &AuthDecision, now: DateTime<Utc>) {
        let mut valid_until = now + self.ttl;
        if let AuthDecision::Allow(principal) = decision {
            valid_until = valid_until.min(principal.expires_at);
        }
        if valid_until <= now {
            return;
        }

        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.put(
            token.to_string(),
            CachedDecision {
                decision: decision.clone(),
                valid_until,
            },
        );
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
