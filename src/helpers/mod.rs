//! Helper functions shared by the page views

mod date;
mod html;

pub use date::*;
pub use html::*;
