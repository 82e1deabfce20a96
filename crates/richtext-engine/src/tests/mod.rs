//! Shared fixtures plus cross-module scenario tests.


use crate::models::{Document, Element, Leaf, block_kind};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// `[{type:'paragraph', children:[{text:'Hi'}]}]`
pub fn hi_doc() -> Document {
    text_doc("Hi")
}

/// Single paragraph with a single unmarked leaf
pub fn text_doc(text: &str) -> Document {
    doc_with_leaves(vec![Leaf::new(text)])
}

/// Single paragraph holding the given leaves
pub fn doc_with_leaves(leaves: Vec<Leaf>) -> Document {
    Document::new(vec![Element::new(
        block_kind::PARAGRAPH,
        leaves.into_iter().map(Into::into).collect(),
    )])
}

/// Paragraph with an inline element between two leaves, then a second paragraph
pub fn nested_doc() -> Document {
    let link = Element::new("link", vec![Leaf::new("link").into()]);
    Document::new(vec![
        Element::new(
            block_kind::PARAGRAPH,
            vec![Leaf::new("see ").into(), link.into(), Leaf::new("!").into()],
        ),
        Element::new(block_kind::PARAGRAPH, vec![Leaf::new("second").into()]),
    ])
}

/// Create a temporary directory for document files
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Write a raw document file into `dir`
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
