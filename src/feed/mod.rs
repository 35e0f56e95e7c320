pub mod reader;

pub use reader::{FeedDocument, FeedError, FeedItem, FeedReader};
