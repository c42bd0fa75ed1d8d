use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(30);
const DEFAULT_RETENTION: Duration = Duration::from_secs(180);

/// How long replies stay fresh, and how long stale ones linger before the
/// sweep removes them. Fixed for the lifetime of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub(crate) ttl: time::Duration,
    pub(crate) retention: time::Duration,
}
impl CacheConfig {
    /// Fails if `ttl` is zero or `retention` is shorter than `ttl`.
    pub fn new(ttl: Duration, retention: Duration) -> Result<Self> {
        if ttl.is_zero() {
            exn::bail!(ErrorKind::InvalidTtl);
        }
        if retention < ttl {
            exn::bail!(ErrorKind::InvalidRetention);
        }
        Ok(Self {
            ttl: time::Duration::try_from(ttl).or_raise(|| ErrorKind::InvalidTtl)?,
            retention: time::Duration::try_from(retention).or_raise(|| ErrorKind::InvalidRetention)?,
        })
    }

    /// Stale entries are swept as soon as they expire.
    pub fn with_ttl(ttl: Duration) -> Result<Self> {
        Self::new(ttl, ttl)
    }

    pub fn ttl(&self) -> time::Duration {
        self.ttl
    }

    pub fn retention(&self) -> time::Duration {
        self.retention
    }
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: time::Duration::seconds(DEFAULT_TTL.as_secs() as i64),
            retention: time::Duration::seconds(DEFAULT_RETENTION.as_secs() as i64),
        }
    }
}
