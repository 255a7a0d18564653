pub mod earnings;

pub use earnings::{Computed, compute, earnings_for, round2};
