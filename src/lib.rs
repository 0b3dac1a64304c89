uniffi::setup_scaffolding!();

pub mod config;
mod ffi;
pub mod insights;
pub mod matcher;
pub mod model;
pub mod ranker;
pub mod recommend;
pub mod search;
pub mod service;
pub mod source;

pub use config::{ConfigError, EngineConfig};
pub use matcher::{can_make, is_satisfied, score, MatchResult, DEFAULT_CAN_MAKE_THRESHOLD};
pub use model::*;
pub use ranker::{
    almost_makeable, best_match, rank_by_match, RankOptions, RankedRecipe, DEFAULT_MAX_MISSING,
};
pub use recommend::{recommend, RecommendError, RecommendedRecipe, Strategy, StrategyResults};
pub use search::{search, search_with_relevance, SearchOptions, SearchResult};
pub use service::{Recommender, ServiceError};
pub use source::{
    DirectoryRecipeSource, InMemoryPantrySource, InMemoryRecipeSource, PantrySource,
    RecipeSource, SourceError,
};
