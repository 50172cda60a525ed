//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::ResolutionCache;
use crate::planner::ResolverConfig;
use crate::query::QueryParser;
use crate::snapshot::SnapshotStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Published dataset snapshot
    pub snapshots: SnapshotStore,

    /// Resolution results keyed by snapshot generation
    pub cache: Arc<ResolutionCache>,

    /// Resolver configuration
    pub config: Arc<ResolverConfig>,

    /// Free-text query parser
    pub parser: Arc<QueryParser>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        snapshots: SnapshotStore,
        cache: ResolutionCache,
        config: ResolverConfig,
        parser: QueryParser,
    ) -> Self {
        Self {
            snapshots,
            cache: Arc::new(cache),
            config: Arc::new(config),
            parser: Arc::new(parser),
        }
    }
}
