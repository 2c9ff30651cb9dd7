pub mod neo_feed;

pub use neo_feed::FeedSource;
