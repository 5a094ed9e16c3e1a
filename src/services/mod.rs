pub mod catalog;
pub mod listing;
pub mod ratchet;
pub mod s3;
pub mod search;
pub mod sitemap;
pub mod storage;
pub mod store;
