//! # TUI Front End
//!
//! The ratatui-specific layer: terminal setup, the event loop, and the
//! two-pane view. This is the only module that knows about ratatui and
//! crossterm; the playground controller never sees a key event.
//!
//! Events arrive on one sequential stream and each edit is pushed through
//! [`Playground::on_change`] before the next event is read, so the output
//! pane always reflects the latest completed render of the latest source.

mod editor;

pub use editor::EditorState;

use crate::error::Result;
use crate::playground::Playground;
use crate::render::{Rendered, Transform};
use crate::share::Fragment;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run<T: Transform, F: Fragment>(playground: &mut Playground<T, F>) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut editor = EditorState::from_text(playground.source());
    let result = event_loop(&mut terminal, playground, &mut editor);
    ratatui::restore();
    result
}

fn event_loop<T: Transform, F: Fragment>(
    terminal: &mut DefaultTerminal,
    playground: &mut Playground<T, F>,
    editor: &mut EditorState,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, playground, editor))?;
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if is_quit(&key) {
            return Ok(());
        }
        if apply_key(&key, editor) {
            playground.on_change(&editor.text());
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') | KeyCode::Char('c') => {
            key.modifiers.contains(KeyModifiers::CONTROL)
        }
        _ => false,
    }
}

/// Translate one key event into an editor mutation. Returns true when the
/// buffer content changed (movement alone does not re-render).
fn apply_key(key: &KeyEvent, editor: &mut EditorState) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            editor.insert_char(c)
        }
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Tab => {
            editor.insert_char(' ');
            editor.insert_char(' ')
        }
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => {
            editor.move_left();
            false
        }
        KeyCode::Right => {
            editor.move_right();
            false
        }
        KeyCode::Up => {
            editor.move_up();
            false
        }
        KeyCode::Down => {
            editor.move_down();
            false
        }
        KeyCode::Home => {
            editor.move_home();
            false
        }
        KeyCode::End => {
            editor.move_end();
            false
        }
        _ => false,
    }
}

fn draw<T: Transform, F: Fragment>(
    frame: &mut Frame,
    playground: &Playground<T, F>,
    editor: &mut EditorState,
) {
    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(frame.area());
    let panes =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[0]);

    draw_input(frame, panes[0], editor);
    draw_output(frame, panes[1], playground);
    draw_status(frame, rows[1]);
}

fn draw_input(frame: &mut Frame, area: Rect, editor: &mut EditorState) {
    let block = Block::default().borders(Borders::ALL).title("query");
    let inner = block.inner(area);
    editor.ensure_visible(inner.height as usize);

    let lines: Vec<Line> = editor.lines().iter().map(|l| Line::raw(l.as_str())).collect();
    let input = Paragraph::new(lines)
        .block(block)
        .scroll((editor.scroll() as u16, 0));
    frame.render_widget(input, area);

    let (row, _) = editor.cursor();
    let x = inner
        .x
        .saturating_add(editor.cursor_screen_col())
        .min(inner.right().saturating_sub(1));
    let y = inner
        .y
        .saturating_add(row.saturating_sub(editor.scroll()) as u16)
        .min(inner.bottom().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, y));
}

fn draw_output<T: Transform, F: Fragment>(
    frame: &mut Frame,
    area: Rect,
    playground: &Playground<T, F>,
) {
    let style = match playground.rendered() {
        Rendered::Formatted(_) => Style::default(),
        Rendered::Error(_) => Style::default().fg(Color::Red),
    };
    let output = Paragraph::new(playground.output())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("formatted"));
    frame.render_widget(output, area);
}

fn draw_status(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" Ctrl-Q", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit   "),
        Span::styled("↑↓←→", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" move   edits re-format live and update the share token"),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}
