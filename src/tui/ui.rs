//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, ResultPane};
use crate::render::chart::{ChartModel, ChartStyle};
use crate::render::table::TableView;
use crate::result::fmt_number;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Question input
            Constraint::Length(3), // Generated SQL
            Constraint::Min(5),    // Result area
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_input_area(frame, app, main_layout[0]);
    render_sql_area(frame, app, main_layout[1]);
    render_result_area(frame, app, main_layout[2]);
    render_status_bar(frame, app, main_layout[3]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_input_area(frame: &mut Frame, app: &App, area: Rect) {
    let (title, border_style) = if app.input_invalid {
        (
            "Question (required)",
            Style::default().fg(Color::Red),
        )
    } else if app.in_flight {
        ("Question (waiting...)", Style::default().fg(Color::DarkGray))
    } else {
        ("Question", Style::default())
    };

    let input_paragraph = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input_paragraph, area);

    // place the terminal cursor inside the input box
    let cursor_x = area.x + 1 + app.input[..app.input_cursor].width() as u16;
    frame.set_cursor_position(Position::new(cursor_x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
}

fn render_sql_area(frame: &mut Frame, app: &App, area: Rect) {
    let content = match &app.sql_query {
        Some(sql) => Line::from(Span::styled(sql.clone(), Style::default().fg(Color::Cyan))),
        None => Line::from(Span::styled(
            "no query yet",
            Style::default().fg(Color::DarkGray),
        )),
    };
    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title("Generated SQL"));
    frame.render_widget(paragraph, area);
}

fn render_result_area(frame: &mut Frame, app: &App, area: Rect) {
    match &app.pane {
        ResultPane::Empty => {
            let paragraph = Paragraph::new(Span::styled(
                "ask a question to see results",
                Style::default().fg(Color::DarkGray),
            ))
            .block(Block::default().borders(Borders::ALL).title("Results"));
            frame.render_widget(paragraph, area);
        }
        ResultPane::Error(msg) => {
            let paragraph = Paragraph::new(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red),
            ))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Error")
                    .border_style(Style::default().fg(Color::Red)),
            );
            frame.render_widget(paragraph, area);
        }
        ResultPane::Chart(model) => render_chart(frame, app, model, area),
        ResultPane::Table(view) => render_table(frame, app, view, area),
    }
}

fn render_chart(frame: &mut Frame, app: &App, model: &ChartModel, area: Rect) {
    match model.style {
        ChartStyle::Magnitude => {
            let bars: Vec<Bar> = model
                .slices
                .iter()
                .map(|slice| {
                    let (r, g, b) = slice.color;
                    Bar::default()
                        .value(slice.value.max(0.0).round() as u64)
                        .text_value(fmt_number(slice.value))
                        .label(Line::from(slice.label.clone()))
                        .style(Style::default().fg(Color::Rgb(r, g, b)))
                })
                .collect();

            let n = bars.len().max(1) as u16;
            let bar_width = ((area.width.saturating_sub(2)) / n).saturating_sub(1).clamp(3, 9);
            let chart = BarChart::default()
                .block(Block::default().borders(Borders::ALL).title("Chart"))
                .data(BarGroup::default().bars(&bars))
                .bar_width(bar_width)
                .bar_gap(1);
            frame.render_widget(chart, area);
        }
        ChartStyle::Proportion => {
            let mut lines: Vec<Line> = model
                .slices
                .iter()
                .map(|slice| {
                    let (r, g, b) = slice.color;
                    Line::from(vec![
                        Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
                        Span::raw(slice.detail.clone()),
                    ])
                })
                .collect();

            if let Some(legend) = &model.legend {
                lines.push(Line::from(""));
                let mut spans = vec![Span::styled(
                    "legend: ",
                    Style::default().fg(Color::DarkGray),
                )];
                for (i, label) in legend.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::raw("  "));
                    }
                    let (r, g, b) = model.slices[i].color;
                    spans.push(Span::styled("■", Style::default().fg(Color::Rgb(r, g, b))));
                    spans.push(Span::raw(format!(" {}", label)));
                }
                lines.push(Line::from(spans));
            }

            let paragraph = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title("Chart"))
                .scroll((app.result_scroll as u16, 0));
            frame.render_widget(paragraph, area);
        }
    }
}

fn render_table(frame: &mut Frame, app: &App, view: &TableView, area: Rect) {
    let header = Row::new(
        view.header
            .iter()
            .map(|h| Cell::from(h.clone()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));

    let rows: Vec<Row> = view
        .body
        .iter()
        .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.clone())).collect::<Vec<_>>()))
        .collect();

    let widths: Vec<Constraint> = view
        .column_widths()
        .iter()
        .map(|w| Constraint::Length(*w as u16 + 2))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Results"));

    let mut state = TableState::default().with_offset(app.result_scroll);
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_paragraph = Paragraph::new(app.status_message.clone())
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(70, 60, area);

    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("askviz Help"),
        Line::from(""),
        Line::from("  Enter          - Submit question"),
        Line::from("  Up/Down        - Browse question history"),
        Line::from("  PageUp/Down    - Scroll results"),
        Line::from("  Ctrl+C Ctrl+C  - Quit (double press)"),
        Line::from("  exit()         - Quit"),
        Line::from("  F1             - Toggle this help"),
        Line::from(""),
        Line::from("Results with few categories render as a proportion"),
        Line::from("breakdown, bigger ones as a bar chart; anything"),
        Line::from("non-numeric renders as a table."),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
