pub(crate) mod errors;
pub(crate) mod json;
pub(crate) mod parse;
pub(crate) mod reader;
pub(crate) mod scope_tree;
pub(crate) mod timeline;
pub(crate) mod types;
