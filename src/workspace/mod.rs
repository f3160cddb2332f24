//! Co-working space directory: read-only rows and the filter over them.

pub mod filter;
pub mod model;

pub use filter::{group_by_country, CountryGroup, WorkspaceFilters};
pub use model::{NoiseLevel, WifiQuality, Workspace};
