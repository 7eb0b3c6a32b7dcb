//! Data module - CSV loading, schema and ranking

mod loader;
mod processor;
mod schema;

pub use loader::{load, normalize, parse_ratio, CountryTable, DatasetCache, LoaderError};
pub use processor::{
    country_profile, default_country, group_frame, group_sum, sorted_countries, to_percent,
    top_k, CountryRatio, ProcessorError, RankedEntry, RatioKey, TypeShare,
};
pub use schema::{is_mbti_code, SchemaError, TemperamentGroup, COUNTRY_COLUMN, MBTI_TYPES};
