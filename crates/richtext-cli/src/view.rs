use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use richtext_engine::{
    DEFAULT_HEADING_LEVEL, Document, Element, Leaf, Mark, Point, block_kind, leaf_paths,
    utf16_to_byte,
};

/// Rendered document plus the caret cell relative to the text area
pub struct View<'a> {
    pub lines: Vec<Line<'a>>,
    pub cursor: Option<(u16, u16)>,
}

pub fn block_prefix(element: &Element) -> String {
    match element.kind.as_str() {
        block_kind::HEADING => {
            let level = element.level.unwrap_or(DEFAULT_HEADING_LEVEL);
            format!("{} ", "#".repeat(usize::from(level)))
        }
        block_kind::BLOCKQUOTE => "> ".to_string(),
        block_kind::BULLETED_LIST => "• ".to_string(),
        block_kind::NUMBERED_LIST => "1. ".to_string(),
        _ => String::new(),
    }
}

pub fn leaf_style(leaf: &Leaf) -> Style {
    let mut style = Style::default();
    for mark in Mark::ALL.into_iter().filter(|mark| leaf.is_marked(*mark)) {
        style = match mark {
            Mark::Bold => style.add_modifier(Modifier::BOLD),
            Mark::Italic => style.add_modifier(Modifier::ITALIC),
            Mark::Underline => style.add_modifier(Modifier::UNDERLINED),
            Mark::Code => style.fg(Color::Cyan),
        };
    }
    // Unknown color names are shown unstyled
    if let Some(color) = leaf.color.as_deref().and_then(|c| c.parse::<Color>().ok()) {
        style = style.fg(color);
    }
    style
}

/// One line per top-level block. Nested elements are flattened into their
/// block's line.
pub fn render<'a>(doc: &'a Document, caret: Option<&Point>, placeholder: &'a str) -> View<'a> {
    let leaves = leaf_paths(doc);
    let is_blank = leaves.iter().all(|(_, leaf)| leaf.text.is_empty());
    let mut lines = Vec::with_capacity(doc.len());
    let mut cursor = None;

    for (row, block) in doc.blocks().iter().enumerate() {
        let prefix = Span::styled(block_prefix(block), Style::default().fg(Color::DarkGray));
        let mut column = prefix.width();
        let mut spans = vec![prefix];

        for (path, leaf) in leaves.iter().filter(|(path, _)| path.first() == Some(&row)) {
            if let Some(caret) = caret
                && caret.path == *path
            {
                let byte = utf16_to_byte(&leaf.text, caret.offset);
                let before = Span::raw(&leaf.text[..byte]).width();
                cursor = Some((clamp_u16(column + before), clamp_u16(row)));
            }
            let span = Span::styled(leaf.text.as_str(), leaf_style(leaf));
            column += span.width();
            spans.push(span);
        }

        if is_blank && row == 0 {
            spans.push(Span::styled(
                placeholder,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        lines.push(Line::from(spans));
    }

    View { lines, cursor }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
