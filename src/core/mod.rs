pub mod add;
pub mod backup;
pub mod calculator;
pub mod config;
pub mod del;
pub mod edit;
pub mod filter;
pub mod log;
pub mod select;
pub mod sort;
pub mod timer;
