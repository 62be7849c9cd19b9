//! One-shot handler: submit a single question, print the SQL and the result.

use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::ClientError;
use crate::render::chart::replace_chart;
use crate::render::table::TableView;
use crate::result::{classify, Classified};

pub async fn run(question: &str, color: bool) -> Result<()> {
    let cfg = Config::load();
    let client = ApiClient::from_config(&cfg)?;

    let resp = match client.ask(question).await {
        Ok(resp) => resp,
        // hand the bare message to main, which prints "Error: <message>"
        Err(ClientError::Transport(msg)) => return Err(anyhow!(msg)),
        Err(e) => return Err(anyhow!(e.to_string())),
    };

    if color {
        println!("{}", "Generated SQL".cyan().bold());
    } else {
        println!("Generated SQL");
    }
    println!("  {}", resp.sql_query);
    println!();

    present(&resp.results, color);
    Ok(())
}

/// Classify the payload and print exactly one of chart, table, or an error
/// banner.
fn present(results: &Value, color: bool) {
    match classify(results) {
        Ok(Classified::ServerError(msg)) => banner(&ClientError::Server(msg).to_string(), color),
        Ok(Classified::Chart(data)) => match replace_chart(None, &data) {
            Ok(model) => model.print_text(color),
            Err(e) => banner(&format!("error rendering chart: {}", e), color),
        },
        Ok(Classified::Table(data)) => match TableView::build(&data) {
            Ok(view) => view.print_text(color),
            Err(e) => banner(&format!("error rendering table: {}", e), color),
        },
        Ok(Classified::Unrecognized) => banner("no valid results to display", color),
        Err(e) => banner(&e.to_string(), color),
    }
}

fn banner(msg: &str, color: bool) {
    if color {
        eprintln!("{}", msg.red());
    } else {
        eprintln!("{}", msg);
    }
}
