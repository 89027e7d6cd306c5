pub mod chart;
pub mod markdown;

pub use markdown::{Block, DisplayTree, Span};
