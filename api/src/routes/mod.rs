pub mod ask;
pub mod search;
