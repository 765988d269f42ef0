/// CSV export of simulation frames.
pub mod export;
