use crate::PriceLookup;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use pricebot_cache::{CacheConfig, ResponseCache};
use pricebot_config::{Config, SourceSettings};
use pricebot_engine::{Engine, Matcher};
use pricebot_extract::{BoxStrategy, CardSelectors, Extractor};
use pricebot_source::SourceHandle;
use std::sync::Arc;

impl PriceLookup {
    /// Build a lookup from validated configuration, with the background sweep
    /// running. Must be called from within a Tokio runtime.
    pub fn from_config(config: &Config, source: SourceHandle) -> Result<Self> {
        let cache_config =
            CacheConfig::new(config.cache.ttl(), config.cache.retention()).or_raise(|| ErrorKind::Construction)?;
        let matcher = Matcher::new(config.matcher.coverage_threshold, config.matcher.length_tolerance);
        Self::new(source)
            .with_engine(Engine::new(matcher))
            .with_cache(Arc::new(ResponseCache::new(cache_config)))
            .with_default_user(config.lookup.default_user.trim())
            .with_fetch_timeout(config.lookup.fetch_timeout())
            .with_sweeper(config.cache.sweep_interval())
    }
}

/// The extraction cascade described by `settings`: the configured strategies
/// in order, or the built-in cascade when there are none.
pub fn extractor(settings: &SourceSettings) -> Result<Extractor> {
    if settings.strategies.is_empty() {
        return Ok(Extractor::default());
    }
    let strategies = settings
        .strategies
        .iter()
        .map(|s| {
            CardSelectors::parse(&s.name, &s.card, &s.title, &s.set_name, &s.price)
                .map(|strategy| Arc::new(strategy) as BoxStrategy)
                .or_raise(|| ErrorKind::Construction)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Extractor::new(strategies))
}
