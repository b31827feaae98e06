//! Post content: loading, storage, and markdown rendering

pub mod loader;
pub mod markdown;
pub mod store;

pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use store::PostStore;
