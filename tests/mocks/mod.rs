pub mod caption_source;
pub mod generator;
