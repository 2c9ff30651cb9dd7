pub mod aggregator;
pub mod analyzers;
pub mod clock;
pub mod config;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod neo;
pub mod output;
pub mod parser;
pub mod services;

pub use aggregator::NeoAggregator;
pub use analyzers::filter::FilterCriteria;
pub use analyzers::types::DerivedViews;
pub use error::NeoError;
