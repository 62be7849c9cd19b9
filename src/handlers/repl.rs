//! Interactive handler: hands off to the ratatui interface.

use anyhow::Result;

pub async fn run(initial_question: Option<&str>) -> Result<()> {
    crate::tui::run_tui(initial_question).await
}
