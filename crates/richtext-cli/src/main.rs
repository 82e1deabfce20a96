mod caret;
mod keys;
mod view;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use keys::{Action, Motion};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use richtext_config::Config;
use richtext_engine::{
    Document, EditError, Editor, IoError, Mark, Point, Range, create_document, io, leaf_at_path,
};
use std::{
    env, fs,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

struct App {
    document_path: PathBuf,
    editor: Editor,
    placeholder: String,
    modified: bool,
    status: String,
}

impl App {
    fn new(document_path: PathBuf, document: Document, config: &Config) -> Self {
        let mut editor = config.editor(document);
        editor.set_selection(caret::first(editor.value()).map(Range::collapsed));

        let status = if editor.is_read_only() {
            "Read-only".to_string()
        } else {
            String::new()
        };

        Self {
            document_path,
            editor,
            placeholder: config.editor.placeholder.clone(),
            modified: false,
            status,
        }
    }

    fn caret(&self) -> Option<&Point> {
        self.editor.selection().map(|selection| &selection.focus)
    }

    fn move_caret(&mut self, step: fn(&Document, &Point) -> Point) {
        if let Some(caret) = self.caret() {
            let next = step(self.editor.value(), caret);
            self.editor.set_selection(Some(Range::collapsed(next)));
        }
    }

    /// Keep the caret on a real leaf after the document was swapped out
    fn sync_caret(&mut self) {
        let next = match self.caret() {
            Some(caret) => caret::clamp(self.editor.value(), caret),
            None => caret::first(self.editor.value()),
        };
        self.editor.set_selection(next.map(Range::collapsed));
    }

    fn edit(&mut self, result: Result<(), EditError>) {
        match result {
            Ok(()) => {
                self.modified = true;
                self.status.clear();
            }
            Err(e) => {
                log::debug!("edit rejected: {e}");
                self.status = e.to_string();
            }
        }
    }

    fn undo(&mut self) {
        if self.editor.undo() {
            self.modified = true;
            self.status.clear();
            self.sync_caret();
        } else {
            self.status = "Nothing to undo".to_string();
        }
    }

    fn redo(&mut self) {
        if self.editor.redo() {
            self.modified = true;
            self.status.clear();
            self.sync_caret();
        } else {
            self.status = "Nothing to redo".to_string();
        }
    }

    fn save(&mut self) {
        match io::write_document(&self.document_path, self.editor.value()) {
            Ok(()) => {
                self.modified = false;
                self.status = format!("Saved {}", self.document_path.display());
            }
            Err(e) => {
                log::error!("save failed: {e}");
                self.status = format!("Error saving: {e}");
            }
        }
    }

    fn toggle_mark(&mut self, mark: Mark) {
        let result = self.editor.toggle_mark(mark);
        self.edit(result);
        if self.status.is_empty()
            && let Some(caret) = self.caret()
            && let Some(leaf) = leaf_at_path(self.editor.value(), &caret.path)
        {
            let state = if leaf.is_marked(mark) { "on" } else { "off" };
            self.status = format!("{} {state}", mark.name());
        }
    }

    /// Returns false when the user asked to quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = keys::action_for(key) else {
            return true;
        };
        match action {
            Action::Quit => return false,
            Action::Save => self.save(),
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::ToggleMark(mark) => self.toggle_mark(mark),
            Action::Insert(c) => {
                let result = self.editor.insert_text(c.encode_utf8(&mut [0; 4]));
                self.edit(result);
            }
            Action::Backspace => {
                let result = self.editor.delete_backward();
                self.edit(result);
            }
            Action::Split => {
                let result = self.editor.split();
                self.edit(result);
            }
            Action::SetBlock(kind) => {
                let result = self.editor.set_block(kind);
                self.edit(result);
            }
            Action::Move(Motion::Left) => self.move_caret(caret::left),
            Action::Move(Motion::Right) => self.move_caret(caret::right),
            Action::Move(Motion::Up) => self.move_caret(caret::up),
            Action::Move(Motion::Down) => self.move_caret(caret::down),
        }
        true
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [document.json]", args[0]);
        process::exit(1);
    }
    let document_path = PathBuf::from(args.get(1).map_or("document.json", String::as_str));

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    init_logging(&config)?;
    log::info!("richtext starting up, config path: {}", Config::config_path().display());

    // A missing or empty file starts a fresh document
    let document = match io::read_document(&document_path) {
        Ok(document) if document.is_editable() => document,
        Ok(_) | Err(IoError::NotFound(_)) => create_document(),
        Err(e) => {
            eprintln!("Error: Could not open '{}': {e}", document_path.display());
            process::exit(1);
        }
    };
    log::info!(
        "opened {} with {} blocks",
        document_path.display(),
        document.len()
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(document_path, document, &config);

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Log to the configured file. Without one, logging stays off unless
/// `RUST_LOG` asks for it, since stderr shares the terminal with the UI.
fn init_logging(config: &Config) -> Result<()> {
    let default_filter = if config.log_file.is_some() {
        "info"
    } else {
        "off"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(log_file) = &config.log_file {
        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    // Document panel
    let view = view::render(app.editor.value(), app.caret(), &app.placeholder);
    let title = format!(
        "{}{}",
        app.document_path.display(),
        if app.modified { " [+]" } else { "" }
    );
    let content = Paragraph::new(view.lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    if let Some((x, y)) = view.cursor {
        let area = chunks[0];
        f.set_cursor_position((area.x + 1 + x, area.y + 1 + y));
    }

    // Status line
    let mut status = vec![];
    if app.editor.is_read_only() {
        status.push(Span::styled(
            "READ-ONLY ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    status.push(Span::raw(app.status.as_str()));
    f.render_widget(Paragraph::new(Line::from(status)), chunks[1]);

    // Instructions
    let marks: String = Mark::ALL
        .iter()
        .map(|mark| {
            let key = keys::mark_key(*mark).to_ascii_uppercase();
            format!("^{key}: {} | ", mark.name())
        })
        .collect();
    let help_text = Line::from(vec![
        Span::raw("Esc/^Q: Quit | "),
        Span::raw("^S: Save | "),
        Span::raw("^Z/^Y: Undo/Redo | "),
        Span::raw(marks),
        Span::raw("F1-F5: Block type"),
    ]);
    f.render_widget(
        Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
