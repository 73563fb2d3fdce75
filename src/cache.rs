//! Rebuild-needed cache for generated bundles.
//!
//! The cache is inverted: the *absence* of a key (or a `true` value) means
//! the bundle must be regenerated. A miss stores the fallback value under
//! the key with the given TTL and returns it, so concurrent requests racing
//! the same rebuild observe `true` until the artifact is on disk and the
//! caller explicitly writes `false`.

use anyhow::Result;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Cache collaborator guarding bundle rebuilds.
///
/// Backed by an in-process map by default; a distributed store can be
/// plugged in behind the same trait. A failing backend fails the whole
/// render call.
pub trait RebuildCache: Send + Sync {
    /// Look up `key`; on a miss, store `fallback` with `ttl` and return it.
    fn get_or(&self, key: &str, ttl: Duration, fallback: bool) -> Result<bool>;

    /// Store `value` under `key` with `ttl`, replacing any previous entry.
    fn set(&self, key: &str, value: bool, ttl: Duration) -> Result<()>;
}

struct Entry {
    value: bool,
    expires_at: Instant,
}

/// Expiry instant for a TTL, clamped so an oversized TTL cannot overflow.
fn expiry(now: Instant, ttl: Duration) -> Instant {
    const ONE_YEAR: Duration = Duration::from_secs(60 * 60 * 24 * 365);
    now.checked_add(ttl).unwrap_or(now + ONE_YEAR)
}

/// In-process TTL cache.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<FxHashMap<String, Entry>>,
}

impl RebuildCache for MemoryCache {
    fn get_or(&self, key: &str, ttl: Duration, fallback: bool) -> Result<bool> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(key)
                && entry.expires_at > now
            {
                return Ok(entry.value);
            }
        }

        let mut entries = self.entries.write();
        // another request may have populated the key between the locks
        if let Some(entry) = entries.get(key)
            && entry.expires_at > now
        {
            return Ok(entry.value);
        }
        entries.insert(
            key.to_owned(),
            Entry {
                value: fallback,
                expires_at: expiry(now, ttl),
            },
        );
        Ok(fallback)
    }

    fn set(&self, key: &str, value: bool, ttl: Duration) -> Result<()> {
        self.entries.write().insert(
            key.to_owned(),
            Entry {
                value,
                expires_at: expiry(Instant::now(), ttl),
            },
        );
        Ok(())
    }
}
