use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Index sequence from the document root to a node.
///
/// `path[0]` indexes the top-level blocks, every further index walks into
/// the `children` of the element reached so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of the enclosing node, `None` for the root and top-level blocks' parent
    pub fn parent(&self) -> Option<Path> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Path(rest.to_vec())),
            _ => None,
        }
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Sibling path with the final index replaced
    pub fn with_last(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        if let Some(last) = indices.last_mut() {
            *last = index;
        }
        Path(indices)
    }

    /// Path of a child of this node
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

/// Renders as `0,1`, the form renderers use for `data-path` attributes
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Cursor position inside a leaf.
///
/// `offset` counts UTF-16 code units into the leaf text, matching the
/// offsets host selection APIs report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

/// Directionless anchor/focus pair.
///
/// Most edits only accept ranges whose anchor and focus sit in the same leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub anchor: Point,
    pub focus: Point,
}

impl Range {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// Caret: anchor and focus at the same point
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    /// Same-leaf range from `start` to `end` offsets
    pub fn within(path: impl Into<Path>, start: usize, end: usize) -> Self {
        let path = path.into();
        Self {
            anchor: Point::new(path.clone(), start),
            focus: Point::new(path, end),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Anchor and focus resolve to the same node
    pub fn is_same_leaf(&self) -> bool {
        self.anchor.path == self.focus.path
    }

    /// Same-leaf range whose anchor sits after its focus
    pub fn is_backward(&self) -> bool {
        self.is_same_leaf() && self.anchor.offset > self.focus.offset
    }

    /// Anchor/focus ordered by document position
    pub fn start_end(&self) -> (&Point, &Point) {
        let anchor_first = (&self.anchor.path, self.anchor.offset)
            <= (&self.focus.path, self.focus.offset);
        if anchor_first {
            (&self.anchor, &self.focus)
        } else {
            (&self.focus, &self.anchor)
        }
    }
}
