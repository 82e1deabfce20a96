// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use richtext_engine::{Document, Element, Leaf, Mark, block_kind};

/// `blocks` paragraphs, each with a handful of mixed-format leaves
#[allow(dead_code)]
pub fn generate_document(blocks: usize) -> Document {
    let paragraphs = (0..blocks)
        .map(|i| {
            Element::new(
                block_kind::PARAGRAPH,
                vec![
                    Leaf::new(format!("Paragraph {i} opens with plain text, ")).into(),
                    Leaf::new("then some bold words, ").with(Mark::Bold).into(),
                    Leaf::new("and closes in italics.").with(Mark::Italic).into(),
                ],
            )
        })
        .collect();
    Document::new(paragraphs)
}
