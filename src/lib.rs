//! askviz: terminal client for a natural-language analytics backend.
//!
//! Submits a question to `POST /consulta`, receives a generated SQL query
//! plus a result payload of unknown shape, classifies the payload
//! ([`result::classify`]), and renders it as a chart or a table
//! ([`render`]), one-shot or in a ratatui TUI.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod result;
pub mod tui;
