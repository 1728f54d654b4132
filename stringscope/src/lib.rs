pub mod analyzer;
pub mod config;
pub mod errors;
pub mod filters;
pub mod metrics;
pub mod search;
pub mod store;

pub use analyzer::{analyze, StringProperties, StringRecord};
pub use config::{CliOverrides, ServiceConfig};
pub use errors::{StoreError, StoreResult};
pub use filters::{matches, FilterParams, FilterSet};
pub use metrics::{StoreMetrics, StoreStats};
pub use search::{
    filter_by_natural_language, filter_records, translate, InterpretedQuery,
    NaturalLanguageOutput, QueryOutput,
};
pub use store::RecordStore;
