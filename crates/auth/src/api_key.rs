//! Static API-key gate with per-key usage counters.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use axum::http::HeaderMap;
use moviedb_core::auth::{ApiKeyGate, QuotaDecision};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Admits keys from a fixed set and counts their calls. Enforces no rate.
#[derive(Debug)]
pub struct StaticApiKeyGate {
    keys: HashSet<String>,
    usage: Mutex<HashMap<String, u64>>,
}

impl StaticApiKeyGate {
    pub fn new(keys: HashSet<String>) -> Self {
        Self {
            keys,
            usage: Mutex::new(HashMap::new()),
        }
    }

    /// Calls admitted so far for `api_key`.
    pub fn usage(&self, api_key: &str) -> u64 {
        let usage = match self.usage.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        usage.get(api_key).copied().unwrap_or(0)
    }
}

impl ApiKeyGate for StaticApiKeyGate {
    fn check(&self, api_key: Option<&str>) -> QuotaDecision {
        let Some(api_key) = api_key.filter(|key| self.keys.contains(*key)) else {
            return QuotaDecision::Deny;
        };

        let mut usage = match self.usage.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let count = usage.entry(api_key.to_string()).or_insert(0);
        *count += 1;
        QuotaDecision::Allow { usage: *count }
    }
}

/// The `x-api-key` header value, if present and valid UTF-8.
pub fn api_key_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
