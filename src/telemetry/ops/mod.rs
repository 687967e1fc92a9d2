pub mod search;
pub mod detail;
pub mod serve;
