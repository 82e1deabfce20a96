//! Caret movement across the leaves of a document.
//!
//! The caret is a collapsed selection point. Horizontal moves step one
//! character and cross into neighbouring leaves at the edges; vertical moves
//! jump to the first leaf of the neighbouring block.

use richtext_engine::{Document, Leaf, Path, Point, leaf_paths, utf16_to_byte};

/// Start of the first leaf in the document
pub fn first(doc: &Document) -> Option<Point> {
    leaf_paths(doc)
        .into_iter()
        .next()
        .map(|(path, _)| Point::new(path, 0))
}

/// Nearest valid caret position: the same leaf with the offset clamped, the
/// first leaf of the same block, or the start of the document.
pub fn clamp(doc: &Document, point: &Point) -> Option<Point> {
    let leaves = leaf_paths(doc);
    if let Some((path, leaf)) = leaves.iter().find(|(path, _)| *path == point.path) {
        return Some(Point::new(path.clone(), point.offset.min(leaf.utf16_len())));
    }
    let block = point.path.first().copied();
    leaves
        .iter()
        .find(|(path, _)| path.first().copied() == block)
        .or_else(|| leaves.first())
        .map(|(path, _)| Point::new(path.clone(), 0))
}

pub fn left(doc: &Document, point: &Point) -> Point {
    let leaves = leaf_paths(doc);
    let Some(index) = position(&leaves, &point.path) else {
        return point.clone();
    };
    let leaf = leaves[index].1;
    let offset = point.offset.min(leaf.utf16_len());
    if let Some(width) = width_before(&leaf.text, offset) {
        return Point::new(point.path.clone(), offset - width);
    }
    match index.checked_sub(1).and_then(|previous| leaves.get(previous)) {
        Some((path, leaf)) => Point::new(path.clone(), leaf.utf16_len()),
        None => Point::new(point.path.clone(), 0),
    }
}

pub fn right(doc: &Document, point: &Point) -> Point {
    let leaves = leaf_paths(doc);
    let Some(index) = position(&leaves, &point.path) else {
        return point.clone();
    };
    let leaf = leaves[index].1;
    let offset = point.offset.min(leaf.utf16_len());
    if let Some(width) = width_after(&leaf.text, offset) {
        return Point::new(point.path.clone(), offset + width);
    }
    match leaves.get(index + 1) {
        Some((path, _)) => Point::new(path.clone(), 0),
        None => Point::new(point.path.clone(), offset),
    }
}

pub fn up(doc: &Document, point: &Point) -> Point {
    match point.path.first().and_then(|block| block.checked_sub(1)) {
        Some(block) => jump_to_block(doc, point, block),
        None => point.clone(),
    }
}

pub fn down(doc: &Document, point: &Point) -> Point {
    match point.path.first() {
        Some(block) => jump_to_block(doc, point, block + 1),
        None => point.clone(),
    }
}

fn jump_to_block(doc: &Document, point: &Point, block: usize) -> Point {
    leaf_paths(doc)
        .into_iter()
        .find(|(path, _)| path.first() == Some(&block))
        .map_or_else(
            || point.clone(),
            |(path, leaf)| Point::new(path, point.offset.min(leaf.utf16_len())),
        )
}

fn position(leaves: &[(Path, &Leaf)], path: &Path) -> Option<usize> {
    leaves.iter().position(|(candidate, _)| candidate == path)
}

fn width_before(text: &str, offset: usize) -> Option<usize> {
    let byte = utf16_to_byte(text, offset);
    text[..byte].chars().next_back().map(char::len_utf16)
}

fn width_after(text: &str, offset: usize) -> Option<usize> {
    let byte = utf16_to_byte(text, offset);
    text[byte..].chars().next().map(char::len_utf16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use richtext_engine::{Element, Node, block_kind};
    use rstest::rstest;

    fn paragraph(texts: &[&str]) -> Element {
        Element::new(
            block_kind::PARAGRAPH,
            texts.iter().map(|text| Node::from(Leaf::new(*text))).collect(),
        )
    }

    /// Two blocks: ["ab", "c"] and ["😀x"]
    fn doc() -> Document {
        Document::from(vec![paragraph(&["ab", "c"]), paragraph(&["😀x"])])
    }

    #[test]
    fn test_first() {
        assert_eq!(first(&doc()), Some(Point::new([0, 0], 0)));
        assert_eq!(first(&Document::default()), None);
    }

    #[rstest]
    #[case(Point::new([0, 0], 1), Point::new([0, 0], 0))]
    #[case(Point::new([0, 1], 0), Point::new([0, 0], 2))]
    #[case(Point::new([1, 0], 0), Point::new([0, 1], 1))]
    #[case(Point::new([1, 0], 3), Point::new([1, 0], 2))]
    #[case(Point::new([1, 0], 2), Point::new([1, 0], 0))]
    #[case(Point::new([0, 0], 0), Point::new([0, 0], 0))]
    fn test_left(#[case] from: Point, #[case] expected: Point) {
        assert_eq!(left(&doc(), &from), expected);
    }

    #[rstest]
    #[case(Point::new([0, 0], 0), Point::new([0, 0], 1))]
    #[case(Point::new([0, 0], 2), Point::new([0, 1], 0))]
    #[case(Point::new([1, 0], 0), Point::new([1, 0], 2))]
    #[case(Point::new([1, 0], 3), Point::new([1, 0], 3))]
    fn test_right(#[case] from: Point, #[case] expected: Point) {
        assert_eq!(right(&doc(), &from), expected);
    }

    #[test]
    fn test_vertical_moves_clamp_offset() {
        let doc = doc();
        assert_eq!(down(&doc, &Point::new([0, 1], 1)), Point::new([1, 0], 1));
        assert_eq!(up(&doc, &Point::new([1, 0], 3)), Point::new([0, 0], 2));
        assert_eq!(up(&doc, &Point::new([0, 0], 1)), Point::new([0, 0], 1));
        assert_eq!(down(&doc, &Point::new([1, 0], 1)), Point::new([1, 0], 1));
    }

    #[test]
    fn test_clamp_after_document_shrinks() {
        let doc = doc();
        assert_eq!(
            clamp(&doc, &Point::new([0, 1], 10)),
            Some(Point::new([0, 1], 1))
        );
        assert_eq!(
            clamp(&doc, &Point::new([1, 4], 2)),
            Some(Point::new([1, 0], 0))
        );
        assert_eq!(
            clamp(&doc, &Point::new([9, 0], 0)),
            Some(Point::new([0, 0], 0))
        );
    }
}
