//! Table path: build a `TableView` from table-shaped data, then paint it.

use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

use crate::error::ClientError;
use crate::result::{cell_text, Row, TableData};

/// A fully-materialized table: header plus body cells, already converted to
/// display strings. Built fresh on every render; never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub header: Vec<String>,
    pub body: Vec<Vec<String>>,
}

impl TableView {
    pub fn build(data: &TableData) -> Result<Self, ClientError> {
        if data.columns.is_empty() {
            return Err(ClientError::Format("invalid table data".into()));
        }

        let body = data
            .rows
            .iter()
            .map(|row| match row {
                // columns is the authoritative projection: missing keys
                // become empty cells, extra keys are dropped
                Row::Object(map) => data
                    .columns
                    .iter()
                    .map(|col| map.get(col).map(cell_text).unwrap_or_default())
                    .collect(),
                // positional, assumed pre-aligned to the column order
                Row::Array(cells) => cells.iter().map(cell_text).collect(),
            })
            .collect();

        Ok(TableView {
            header: data.columns.clone(),
            body,
        })
    }

    /// Paint an aligned grid to stdout.
    pub fn print_text(&self, color: bool) {
        let widths = self.column_widths();

        let header_line = self
            .header
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        if color {
            println!("{}", header_line.bold());
        } else {
            println!("{}", header_line);
        }
        println!(
            "{}",
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("  ")
        );

        for row in &self.body {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad(cell, widths.get(i).copied().unwrap_or(cell.width())))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{}", line);
        }
    }

    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.width()).collect();
        for row in &self.body {
            for (i, cell) in row.iter().enumerate() {
                let w = cell.width();
                if i < widths.len() {
                    widths[i] = widths[i].max(w);
                } else {
                    // array rows may run past the header columns
                    widths.push(w);
                }
            }
        }
        widths
    }
}

fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
