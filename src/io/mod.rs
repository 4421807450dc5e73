/// CSV export of estimates.
pub mod export;
