use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pricebot_cache::{CacheConfig, ResponseCache, Sweeper};
use pricebot_engine::{DEFAULT_USER, Engine, MatchQuery, Reply};
use pricebot_extract::{RawListing, normalize_all};
use pricebot_source::SourceHandle;
use pricebot_source::error::{ErrorKind as SourceErrorKind, Result as SourceResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Answers price queries, going to the listing source only when the reply
/// cache can't.
///
/// Never fails for business reasons: every outcome, including a broken or
/// slow source, ends up as a message for the user.
pub struct PriceLookup {
    pub(crate) engine: Engine,
    pub(crate) cache: Arc<ResponseCache<Reply>>,
    pub(crate) source: SourceHandle,
    pub(crate) default_user: String,
    pub(crate) fetch_timeout: Option<Duration>,
    pub(crate) sweep_interval: Option<Duration>,
    pub(crate) sweeper: Option<Sweeper>,
}
impl PriceLookup {
    /// Default tuning, a default cache and no fetch deadline.
    pub fn new(source: SourceHandle) -> Self {
        Self {
            engine: Engine::default(),
            cache: Arc::new(ResponseCache::new(CacheConfig::default())),
            source,
            default_user: DEFAULT_USER.to_string(),
            fetch_timeout: None,
            sweep_interval: None,
            sweeper: None,
        }
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Share an existing cache (and its clock). A running sweeper moves over
    /// to the new cache.
    pub fn with_cache(mut self, cache: Arc<ResponseCache<Reply>>) -> Self {
        self.cache = cache;
        if let Some(interval) = self.sweep_interval {
            self.sweeper = self
                .spawn_sweeper(interval)
                .inspect_err(|err| tracing::warn!(error = ?err, "Could not restart cache sweeper"))
                .ok();
        }
        self
    }

    pub fn with_default_user(mut self, user: impl Into<String>) -> Self {
        self.default_user = user.into();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Sweep the cache every `interval` for as long as this lookup lives.
    /// Must be called from within a Tokio runtime.
    pub fn with_sweeper(mut self, interval: Duration) -> Result<Self> {
        self.sweeper = Some(self.spawn_sweeper(interval)?);
        self.sweep_interval = Some(interval);
        Ok(self)
    }

    fn spawn_sweeper(&self, interval: Duration) -> Result<Sweeper> {
        if tokio::runtime::Handle::try_current().is_err() {
            tracing::error!("The cache sweeper needs a Tokio runtime");
            exn::bail!(ErrorKind::Construction);
        }
        Sweeper::spawn(&self.cache, interval).or_raise(|| ErrorKind::Construction)
    }

    pub fn cache(&self) -> &Arc<ResponseCache<Reply>> {
        &self.cache
    }

    pub fn default_user(&self) -> &str {
        &self.default_user
    }

    /// Look `query` up through the configured listing source, addressed to
    /// `user` (or the default user).
    pub async fn lookup(&self, query: &str, user: Option<&str>) -> String {
        let source = &self.source;
        self.resolve_with_cache(query, user, |query| async move { source.fetch(&query).await })
            .await
    }

    /// The cached reply for `query`, or a fresh one built from whatever
    /// `fetch` returns. Always produces a message.
    #[instrument(skip(self, user, fetch), fields(user))]
    pub async fn resolve_with_cache<F, Fut>(&self, query: &str, user: Option<&str>, fetch: F) -> String
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = SourceResult<Vec<RawListing>>>,
    {
        let user = user.map(str::trim).filter(|u| !u.is_empty()).unwrap_or(self.default_user.as_str());
        tracing::Span::current().record("user", user);
        match self.try_resolve(query, fetch).await {
            Ok(reply) => reply.for_user(user),
            Err(err) => {
                tracing::warn!(error = ?err, "Price lookup failed");
                err.reply(query).for_user(user)
            },
        }
    }

    /// Like [`resolve_with_cache`](Self::resolve_with_cache), but with
    /// failures left typed and the reply not yet addressed to anyone.
    ///
    /// Only successful resolutions are cached (including "nothing found");
    /// failures and timeouts are retried on the next request.
    pub async fn try_resolve<F, Fut>(&self, query: &str, fetch: F) -> Result<Reply>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = SourceResult<Vec<RawListing>>>,
    {
        let Some(query) = MatchQuery::new(query) else {
            exn::bail!(ErrorKind::EmptyQuery);
        };
        if let Some(reply) = self.cache.get(query.as_str()).await {
            tracing::debug!(key = query.cache_key(), "Cache hit");
            return Ok(reply);
        }
        tracing::debug!(key = query.cache_key(), "Cache miss");
        let raw = self.fetch(&query, fetch).await?;
        let listings = normalize_all(raw);
        let reply = self.engine.reply(&query, &listings);
        self.cache.insert(query.as_str(), reply.clone()).await;
        Ok(reply)
    }

    async fn fetch<F, Fut>(&self, query: &MatchQuery, fetch: F) -> Result<Vec<RawListing>>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = SourceResult<Vec<RawListing>>>,
    {
        let pending = fetch(query.as_str().to_string());
        let result = match self.fetch_timeout {
            Some(deadline) => match tokio::time::timeout(deadline, pending).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(?deadline, "Listing source missed the deadline");
                    exn::bail!(ErrorKind::Timeout);
                },
            },
            None => pending.await,
        };
        match result {
            Ok(raw) => Ok(raw),
            Err(err) => {
                let kind = match &*err {
                    SourceErrorKind::Timeout => ErrorKind::Timeout,
                    other => ErrorKind::Upstream(other.to_string()),
                };
                Err(err).or_raise(|| kind)
            },
        }
    }
}
impl std::fmt::Debug for PriceLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceLookup")
            .field("engine", &self.engine)
            .field("source", &self.source.name())
            .field("default_user", &self.default_user)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("sweep_interval", &self.sweep_interval)
            .finish_non_exhaustive()
    }
}
