//! TUI application state.

use crate::api::QueryResponse;
use crate::error::ClientError;
use crate::render::chart::{replace_chart, ChartModel};
use crate::render::table::TableView;
use crate::result::{classify, Classified};

const IDLE_STATUS: &str = "Enter to submit | ctrl+c twice to quit | F1 help";

/// What the result area currently shows. Exactly one variant is ever live,
/// so the chart pane, table pane, and error banner are mutually exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPane {
    Empty,
    Chart(ChartModel),
    Table(TableView),
    Error(String),
}

#[derive(Debug)]
pub struct App {
    /// Input buffer
    pub input: String,
    /// Cursor position in input (byte index, always on a char boundary)
    pub input_cursor: usize,
    /// Marks an attempted empty submission
    pub input_invalid: bool,
    /// Previously submitted questions
    pub input_history: Vec<String>,
    /// Current history index when navigating (None = new line)
    pub history_index: Option<usize>,
    /// Single-flight guard: true while a request is pending
    pub in_flight: bool,
    /// SQL generated for the last completed request
    pub sql_query: Option<String>,
    /// Current result visualization
    pub pane: ResultPane,
    /// Scroll offset for the result area
    pub result_scroll: usize,
    /// Status message to display
    pub status_message: String,
    /// Whether to show help
    pub show_help: bool,
    /// Timestamp of last Ctrl+C press for double Ctrl+C detection
    pub last_ctrl_c_time: Option<std::time::Instant>,
}

impl App {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            input_cursor: 0,
            input_invalid: false,
            input_history: Vec::new(),
            history_index: None,
            in_flight: false,
            sql_query: None,
            pane: ResultPane::Empty,
            result_scroll: 0,
            status_message: IDLE_STATUS.to_string(),
            show_help: false,
            last_ctrl_c_time: None,
        }
    }

    /// Validate a submission. Returns the trimmed question when a request
    /// should actually be issued; empty input marks the field invalid, and a
    /// pending request blocks new ones entirely.
    pub fn try_submit(&mut self, text: &str) -> Option<String> {
        let question = text.trim();
        if question.is_empty() {
            self.input_invalid = true;
            return None;
        }
        if self.in_flight {
            self.status_message = "a query is already running, hold on".to_string();
            return None;
        }
        self.input_invalid = false;
        self.in_flight = true;
        self.status_message = "running query...".to_string();
        Some(question.to_string())
    }

    /// Apply a completed round trip. The input unlocks unconditionally, on
    /// success and failure alike.
    pub fn apply_response(&mut self, result: Result<QueryResponse, ClientError>) {
        self.in_flight = false;
        self.result_scroll = 0;
        self.status_message = IDLE_STATUS.to_string();

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                self.pane = ResultPane::Error(e.to_string());
                return;
            }
        };

        // the SQL is shown even when execution failed server-side
        self.sql_query = Some(resp.sql_query);

        match classify(&resp.results) {
            Ok(Classified::ServerError(msg)) => {
                self.pane = ResultPane::Error(ClientError::Server(msg).to_string())
            }
            Ok(Classified::Chart(data)) => {
                // hand the previous chart back to the renderer so it is
                // disposed before its replacement exists
                let prev = match std::mem::replace(&mut self.pane, ResultPane::Empty) {
                    ResultPane::Chart(model) => Some(model),
                    _ => None,
                };
                self.pane = match replace_chart(prev, &data) {
                    Ok(model) => ResultPane::Chart(model),
                    Err(e) => ResultPane::Error(format!("error rendering chart: {}", e)),
                };
            }
            Ok(Classified::Table(data)) => {
                self.pane = match TableView::build(&data) {
                    Ok(view) => ResultPane::Table(view),
                    Err(e) => ResultPane::Error(format!("error rendering table: {}", e)),
                };
            }
            Ok(Classified::Unrecognized) => {
                self.pane = ResultPane::Error("no valid results to display".to_string());
            }
            Err(e) => self.pane = ResultPane::Error(e.to_string()),
        }
    }

    /// Clear input buffers
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
        self.history_index = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.result_scroll += 1;
    }

    // ----- Input editing helpers -----
    pub fn move_cursor_left(&mut self) {
        if let Some((i, _)) = self.input[..self.input_cursor].char_indices().last() {
            self.input_cursor = i;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.input[self.input_cursor..].chars().next() {
            self.input_cursor += c.len_utf8();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.input_cursor = self.input.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
        self.input_invalid = false;
    }

    pub fn backspace(&mut self) {
        if self.input_cursor > 0 {
            self.move_cursor_left();
            self.input.remove(self.input_cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.input_cursor < self.input.len() {
            self.input.remove(self.input_cursor);
        }
    }

    pub fn push_history(&mut self, line: String) {
        if !line.trim().is_empty()
            && self.input_history.last().map(String::as_str) != Some(line.as_str())
        {
            self.input_history.push(line);
        }
        self.history_index = None;
    }

    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let next_index = match self.history_index {
            None => self.input_history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(next_index);
        self.input = self.input_history[next_index].clone();
        self.move_cursor_end();
    }

    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 < self.input_history.len() => {
                let ni = i + 1;
                self.history_index = Some(ni);
                self.input = self.input_history[ni].clone();
                self.move_cursor_end();
            }
            Some(_) => {
                self.history_index = None;
                self.clear_input();
            }
        }
    }

    /// Handle Ctrl+C press and detect double press for quit.
    /// Returns true if should quit (double Ctrl+C), false otherwise.
    pub fn handle_ctrl_c(&mut self) -> bool {
        const DOUBLE_CTRL_C_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(500);

        let now = std::time::Instant::now();
        if let Some(last_time) = self.last_ctrl_c_time {
            if now.duration_since(last_time) <= DOUBLE_CTRL_C_TIMEOUT {
                self.last_ctrl_c_time = None;
                return true;
            }
        }

        // single Ctrl+C clears the input and records the timestamp
        self.clear_input();
        self.last_ctrl_c_time = Some(now);
        false
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
