pub mod log;
pub mod migrate;
pub mod pool;
pub mod sessions;
pub mod stats;

pub use pool::DbPool;
pub use sessions::{SessionOrder, SessionUpdate};
