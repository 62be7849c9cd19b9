//! Event types for the TUI.

use crossterm::event::KeyEvent;

use crate::api::QueryResponse;
use crate::error::ClientError;

#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// Submit a question to the backend
    Submit(String),
    /// Network round trip finished, successfully or not
    Completed(Result<QueryResponse, ClientError>),
    /// Request to quit the application
    Quit,
}
