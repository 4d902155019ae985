pub mod calculations;
pub mod models;

pub use calculations::{EarningsBreakdown, EarningsConverter};
pub use models::*;
