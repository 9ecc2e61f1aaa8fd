pub mod keywords;
pub mod orchestrator;
pub mod query;
pub mod results;

pub use keywords::{KeywordResolver, KeywordTagMap};
pub use orchestrator::SearchOrchestrator;
pub use query::RegionQueryBuilder;
pub use results::{ElementKind, EnrichedPoi, RawPoi, SearchResult};
