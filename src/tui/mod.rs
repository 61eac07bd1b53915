mod app;
mod ui;

use crate::session::Session;
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// Browse `session` interactively until the user quits
pub fn run(session: Session, title: String, initial_query: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    let mut app = App::new(session, title);

    if let Some(query) = initial_query {
        app.input = query;
        app.execute_search();
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        // Only handle key press events, not release or repeat
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Global keybindings
        if let (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) = (key.modifiers, key.code) {
            return Ok(());
        }

        let quit = match app.mode {
            app::Mode::Help => {
                // Any key closes help
                app.hide_help();
                false
            }
            app::Mode::Query => {
                handle_query_key(app, key);
                false
            }
            app::Mode::Browse => handle_browse_key(app, key),
        };

        if quit {
            return Ok(());
        }
    }
}

fn handle_query_key(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
        (KeyModifiers::CONTROL, KeyCode::Char('h')) => {
            app.input.pop();
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.input.clear(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc => app.cancel_query(),
            KeyCode::Enter => app.execute_search(),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(c) => app.input.push(c),
            KeyCode::F(1) => app.show_help(),
            _ => {}
        },
        _ => {}
    }
}

/// Returns true when the user asked to quit
fn handle_browse_key(app: &mut App, key: KeyEvent) -> bool {
    // Handle pending 'g' key for gg command
    if app.pending_key == Some('g') {
        app.clear_pending_key();
        if key.code == KeyCode::Char('g') {
            app.select_first();
            return false;
        }
        // If not 'g', fall through to normal handling
    }

    match (key.modifiers, key.code) {
        // Vim: Ctrl+d - page down
        (KeyModifiers::CONTROL, KeyCode::Char('d')) => app.select_page_down(),
        // Vim: Ctrl+u - page up
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => app.select_page_up(),
        (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::PageDown => app.select_page_down(),
            KeyCode::PageUp => app.select_page_up(),
            KeyCode::Home => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(),
            KeyCode::Char('g') => app.pending_key = Some('g'),
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('e') => app.expand_all(),
            KeyCode::Char('c') => app.collapse_all(),
            KeyCode::Char('r') => app.reset_view(),
            KeyCode::Char('/') => app.start_query(),
            KeyCode::Char('n') => app.next_highlight(),
            KeyCode::Char('N') => app.prev_highlight(),
            KeyCode::Char('?') | KeyCode::F(1) => app.show_help(),
            _ => {}
        },
        _ => {}
    }

    false
}
