//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (dates coerced, labels normalised)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Record>, immutable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterSelection → FilteredView (row indices)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate │  summary metrics, category counts, top-N articles
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use aggregate::{count_by, summarize, top_n, CategoryCounts, SummaryMetrics, DEFAULT_ARTICLE_LIMIT};
pub use error::DatasetError;
pub use filter::{apply_filters, DateRange, FilterSelection, FilteredView};
pub use model::{distinct_values, Dataset, LabelField, Record};
