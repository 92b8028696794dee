pub mod dsn;
pub mod pool;

pub use dsn::{format_dsn, format_dsn_masked};
pub use pool::{DbHandle, PoolSettings};
