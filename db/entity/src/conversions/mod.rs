pub mod lists;
pub mod listing_aggregation;
