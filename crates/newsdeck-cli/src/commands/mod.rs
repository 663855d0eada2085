//! Command implementations for the newsdeck CLI.

mod blog;
mod news;
mod weather;

pub use blog::execute as manage_blog;
pub use news::{execute as show_news, read as read_article, search as search_news};
pub use weather::execute as show_weather;
