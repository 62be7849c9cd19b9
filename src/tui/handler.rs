//! Async event loop for the TUI.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::{app::App, events::TuiEvent, ui::render_ui};
use crate::api::ApiClient;
use crate::config::Config;

/// Run the interactive interface, optionally submitting an initial question.
pub async fn run_tui(initial_question: Option<&str>) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!("TUI mode requires a proper terminal environment"));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let cfg = Config::load();
    let client = Arc::new(ApiClient::from_config(&cfg)?);
    let mut app = App::new();

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    if let Some(question) = initial_question {
        let _ = event_tx.send(TuiEvent::Submit(question.to_string()));
    }

    let result = run_app(&mut terminal, &mut app, client, event_tx, event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: Arc<ApiClient>,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if input_tx.send(TuiEvent::Key(key)).is_err() {
                        break; // Channel closed
                    }
                }
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        if let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &event_tx) {
                        break; // Quit requested
                    }
                }
                TuiEvent::Submit(text) => {
                    if let Some(question) = app.try_submit(&text) {
                        let client = client.clone();
                        let tx = event_tx.clone();
                        tokio::spawn(async move {
                            let result = client.ask(&question).await;
                            let _ = tx.send(TuiEvent::Completed(result));
                        });
                    }
                }
                TuiEvent::Completed(result) => {
                    app.apply_response(result);
                }
                TuiEvent::Quit => break,
            }
        }

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await;
    }

    Ok(())
}

/// Handle keyboard events. Returns true when the app should quit right away;
/// typing `exit()` quits through a `TuiEvent::Quit` on the event channel.
fn handle_key_event(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
) -> bool {
    if app.show_help {
        // any key closes the help overlay
        app.toggle_help();
        return false;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return app.handle_ctrl_c();
        }
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::Enter => {
            let input = app.input.clone();
            if input.trim() == "exit()" {
                app.clear_input();
                let _ = event_tx.send(TuiEvent::Quit);
                return false;
            }
            // the Submit branch performs validation and the single-flight
            // check; history only records what was actually typed
            app.push_history(input.clone());
            app.clear_input();
            let _ = event_tx.send(TuiEvent::Submit(input));
        }
        KeyCode::Up => app.history_prev(),
        KeyCode::Down => app.history_next(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, tx: &mpsc::UnboundedSender<TuiEvent>, text: &str) {
        for c in text.chars() {
            handle_key_event(app, key(KeyCode::Char(c)), tx);
        }
    }

    #[test]
    fn typing_exit_sends_quit_on_the_event_channel() {
        let mut app = App::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_text(&mut app, &tx, "exit()");
        assert!(!handle_key_event(&mut app, key(KeyCode::Enter), &tx));
        assert!(matches!(rx.try_recv(), Ok(TuiEvent::Quit)));
        assert!(app.input.is_empty());
    }

    #[test]
    fn enter_submits_the_typed_question_and_clears_the_input() {
        let mut app = App::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        type_text(&mut app, &tx, "top products");
        handle_key_event(&mut app, key(KeyCode::Enter), &tx);
        match rx.try_recv() {
            Ok(TuiEvent::Submit(q)) => assert_eq!(q, "top products"),
            other => panic!("expected a submission, got {:?}", other),
        }
        assert!(app.input.is_empty());
        assert_eq!(
            app.input_history.last().map(String::as_str),
            Some("top products")
        );
    }

    #[test]
    fn double_ctrl_c_quits_immediately() {
        let mut app = App::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!handle_key_event(&mut app, ctrl_c, &tx));
        assert!(handle_key_event(&mut app, ctrl_c, &tx));
    }
}
