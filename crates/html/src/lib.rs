//! Minimal DOM for the page runtime: a node tree with attributes and parsed inline style, a
//! markup tokenizer and tree builder, and query/mutation helpers.

pub mod dom_utils;

mod dom_builder;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_dom, parse_document, parse_inline_style};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};
