//! Key bindings.
//!
//! Without keyboard enhancement flags a terminal reports Ctrl-I as Tab and
//! Ctrl-` as Ctrl-Space, so every binding here is a key that arrives intact
//! as plain Ctrl+letter.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use richtext_engine::{Mark, block_kind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Save,
    Undo,
    Redo,
    ToggleMark(Mark),
    Insert(char),
    Backspace,
    Split,
    SetBlock(&'static str),
    Move(Motion),
}

/// Ctrl+letter that toggles each mark
pub fn mark_key(mark: Mark) -> char {
    match mark {
        Mark::Bold => 'b',
        Mark::Italic => 't',
        Mark::Underline => 'u',
        Mark::Code => 'k',
    }
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('q') if ctrl => Action::Quit,
        KeyCode::Char('s') if ctrl => Action::Save,
        KeyCode::Char('z') if ctrl => Action::Undo,
        KeyCode::Char('y') if ctrl => Action::Redo,
        KeyCode::Char(c) if ctrl => {
            let mark = Mark::ALL.into_iter().find(|mark| mark_key(*mark) == c)?;
            Action::ToggleMark(mark)
        }
        KeyCode::Char(c) => Action::Insert(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Enter => Action::Split,
        KeyCode::F(n) => Action::SetBlock(match n {
            1 => block_kind::PARAGRAPH,
            2 => block_kind::HEADING,
            3 => block_kind::BLOCKQUOTE,
            4 => block_kind::BULLETED_LIST,
            5 => block_kind::NUMBERED_LIST,
            _ => return None,
        }),
        KeyCode::Left => Action::Move(Motion::Left),
        KeyCode::Right => Action::Move(Motion::Right),
        KeyCode::Up => Action::Move(Motion::Up),
        KeyCode::Down => Action::Move(Motion::Down),
        _ => return None,
    };
    Some(action)
}
