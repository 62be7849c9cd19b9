//! Visualization renderers: pure models built from classified data, painted
//! either as colored stdout text (oneshot) or as ratatui widgets (TUI).

pub mod chart;
pub mod table;

/// Fixed color palette. Category `i` always gets `PALETTE[i % 7]`, no matter
/// how many categories there are.
pub const PALETTE: [(u8, u8, u8); 7] = [
    (54, 162, 235),  // blue
    (255, 99, 132),  // red
    (255, 206, 86),  // yellow
    (75, 192, 192),  // teal
    (153, 102, 255), // purple
    (255, 159, 64),  // orange
    (199, 199, 199), // gray
];
