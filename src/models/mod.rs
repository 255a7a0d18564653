pub mod field;
pub mod session;

pub use field::SessionField;
pub use session::{NewSession, Session};
