pub mod criteria;
pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod types;

pub use criteria::{build_predicate, FilterCriteria, PropertyQuery, SearchParams, LATEST_PAGE_SIZE};
pub use error::FilterError;
pub use filter::Filter;
pub use types::*;
