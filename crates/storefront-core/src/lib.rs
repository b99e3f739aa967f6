//! Domain model shared by the storefront crates.
//!
//! Nothing in here touches the network: the region catalog, the records the
//! commerce API hands back, review draft validation, and environment-driven
//! configuration.

pub mod actor;
pub mod app_config;
pub mod catalog;
pub mod config;
pub mod fulfillment;
pub mod review;

pub use actor::{Actor, User};
pub use app_config::{AppConfig, Environment};
pub use catalog::{Region, RegionCatalog, RegionEntry, SubRegion};
pub use config::{load_app_config, load_app_config_from_env};
pub use fulfillment::{FulfillmentPoint, LocationSelection, PointId};
pub use review::{
    DraftError, ItemId, NewReview, Pagination, Review, ReviewDraft, ReviewPage, MAX_COMMENT_CHARS,
    MAX_TITLE_CHARS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[from] serde_yaml::Error),

    #[error("regions validation failed: {0}")]
    Validation(String),
}
