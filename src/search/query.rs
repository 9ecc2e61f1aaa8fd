//! Overpass QL query construction

use crate::core::region::GeoBounds;
use crate::search::keywords::KeywordResolver;
use tracing::debug;

/// Default `[timeout:N]` embedded in every query (seconds)
pub const DEFAULT_QUERY_TIMEOUT: u64 = 25;

/// Element kinds queried for every tag-expression, in emission order
const GEOMETRIES: [&str; 3] = ["node", "way", "relation"];

/// Builds one bounded Overpass query per keyword
#[derive(Debug, Clone)]
pub struct RegionQueryBuilder {
    resolver: KeywordResolver,
    bounds: GeoBounds,
    timeout_secs: u64,
}

impl RegionQueryBuilder {
    pub fn new(resolver: KeywordResolver, bounds: GeoBounds) -> Self {
        Self {
            resolver,
            bounds,
            timeout_secs: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Set the server-side query timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn resolver(&self) -> &KeywordResolver {
        &self.resolver
    }

    /// Build the query for a keyword
    pub fn build(&self, keyword: &str) -> String {
        let expressions = self.resolver.resolve(keyword);
        let query = self.build_from_expressions(&expressions);
        debug!(keyword, filters = expressions.len(), "Built region query");
        query
    }

    /// Build a query from already-resolved tag-expressions, which must not
    /// be empty.
    ///
    /// Every expression yields a node, a way and a relation clause scoped
    /// to the bounds; `out center` collapses ways and relations to one point.
    fn build_from_expressions(&self, expressions: &[String]) -> String {
        debug_assert!(!expressions.is_empty());
        let clauses = self.clauses(expressions);
        format!(
            "[out:json][timeout:{}];\n(\n  {}\n);\nout center;",
            self.timeout_secs,
            clauses.join("\n  ")
        )
    }

    /// The individual `kind[expr](bbox);` clauses, in resolution order
    pub fn clauses(&self, expressions: &[String]) -> Vec<String> {
        let bbox = self.bounds.to_overpass_filter();
        expressions
            .iter()
            .flat_map(|expr| {
                let bbox = &bbox;
                GEOMETRIES
                    .iter()
                    .map(move |kind| format!("{}[{}]{};", kind, expr, bbox))
            })
            .collect()
    }
}
