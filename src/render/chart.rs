//! Chart path: build a `ChartModel` from chart-shaped data, then paint it.

use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthStr;

use super::PALETTE;
use crate::error::ClientError;
use crate::result::{fmt_number, ChartData};

/// At or below this many categories the chart conveys part-of-whole
/// (proportion style); above it, absolute quantities (magnitude style).
pub const PROPORTION_MAX_CATEGORIES: usize = 5;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Proportion,
    Magnitude,
}

/// One rendered category: label, value, its palette color, and the detail
/// text shown next to it (the tooltip equivalent).
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: (u8, u8, u8),
    pub detail: String,
}

/// Value-axis configuration. Only magnitude charts carry one: counts start
/// at zero and tick at whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub begin_at_zero: bool,
    pub integer_ticks: bool,
}

/// A fully-determined chart. Building one is pure and deterministic: the
/// same data always yields the same styles, colors, and detail strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub style: ChartStyle,
    pub slices: Vec<Slice>,
    pub legend: Option<Vec<String>>,
    pub axis: Option<Axis>,
}

impl ChartModel {
    pub fn build(data: &ChartData) -> Result<Self, ClientError> {
        if data.labels.is_empty() || data.values.is_empty() {
            return Err(ClientError::Format("invalid chart data".into()));
        }

        if data.labels.len() != data.values.len() {
            tracing::warn!(
                labels = data.labels.len(),
                values = data.values.len(),
                "chart label/value lengths differ; rendering the shorter side"
            );
        }

        let style = if data.labels.len() <= PROPORTION_MAX_CATEGORIES {
            ChartStyle::Proportion
        } else {
            ChartStyle::Magnitude
        };

        let pairs: Vec<(&String, &f64)> = data.labels.iter().zip(data.values.iter()).collect();
        // percentages are taken against the whole values series, even when
        // extra values have no matching label
        let total: f64 = data.values.iter().sum();

        let slices = pairs
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                let value = **value;
                let detail = match style {
                    ChartStyle::Proportion => {
                        let pct = if total == 0.0 {
                            0
                        } else {
                            (value / total * 100.0).round() as i64
                        };
                        format!("{}: {} ({}%)", label, fmt_number(value), pct)
                    }
                    ChartStyle::Magnitude => format!("{}: {}", label, fmt_number(value)),
                };
                Slice {
                    label: (*label).clone(),
                    value,
                    color: PALETTE[i % PALETTE.len()],
                    detail,
                }
            })
            .collect::<Vec<_>>();

        let legend = match style {
            ChartStyle::Proportion => {
                Some(slices.iter().map(|s| s.label.clone()).collect())
            }
            ChartStyle::Magnitude => None,
        };

        let axis = match style {
            ChartStyle::Magnitude => Some(Axis {
                begin_at_zero: true,
                integer_ticks: true,
            }),
            ChartStyle::Proportion => None,
        };

        Ok(ChartModel {
            style,
            slices,
            legend,
            axis,
        })
    }

    /// Paint to stdout. Magnitude charts get horizontal bars against a zero
    /// baseline; proportion charts get colored swatches with percentage
    /// details, followed by the legend.
    pub fn print_text(&self, color: bool) {
        match self.style {
            ChartStyle::Magnitude => self.print_bars(color),
            ChartStyle::Proportion => self.print_proportions(color),
        }
    }

    fn print_bars(&self, color: bool) {
        let label_width = self
            .slices
            .iter()
            .map(|s| s.label.width())
            .max()
            .unwrap_or(0);
        let max = self
            .slices
            .iter()
            .map(|s| s.value)
            .fold(0.0_f64, f64::max);

        for slice in &self.slices {
            let len = if max > 0.0 {
                (((slice.value.max(0.0)) / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let bar = "█".repeat(len);
            let pad = " ".repeat(label_width.saturating_sub(slice.label.width()));
            let (r, g, b) = slice.color;
            if color {
                println!(
                    "{}{} │{} {}",
                    pad,
                    slice.label,
                    bar.truecolor(r, g, b),
                    fmt_number(slice.value)
                );
            } else {
                println!("{}{} │{} {}", pad, slice.label, bar, fmt_number(slice.value));
            }
        }
        // zero baseline marker for the value axis
        println!("{}0 └{}", " ".repeat(label_width.saturating_sub(1)), "─".repeat(BAR_WIDTH));
    }

    fn print_proportions(&self, color: bool) {
        for slice in &self.slices {
            let (r, g, b) = slice.color;
            if color {
                println!("  {} {}", "■".truecolor(r, g, b), slice.detail);
            } else {
                println!("  ■ {}", slice.detail);
            }
        }
        if let Some(legend) = &self.legend {
            println!();
            println!("  {}", legend.join(" · "));
        }
    }
}

/// Install a new chart, disposing the previous one first. At most one model
/// is live at any time; when building the replacement fails, the previous
/// chart is already gone and nothing stays visible.
pub fn replace_chart(
    prev: Option<ChartModel>,
    data: &ChartData,
) -> Result<ChartModel, ClientError> {
    drop(prev);
    ChartModel::build(data)
}
