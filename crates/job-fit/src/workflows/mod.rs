pub mod category;
pub mod dedup;
pub mod pipeline;
pub mod similarity;
pub mod tracker;
