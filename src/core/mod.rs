pub mod add;
pub mod backup;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod del;
pub mod edit;
pub mod log;
pub mod reconciler;
pub mod timer;
