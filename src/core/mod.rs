pub mod block;
pub mod numeric;

pub use block::{CategoryCounts, MetricsBlock};
pub use numeric::safe_count;
