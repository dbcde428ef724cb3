use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// Format milliseconds as `m:ss`
pub fn format_duration(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / 1000;
    format!("{}:{:0>2}", seconds / 60, seconds % 60)
}

/// Move a list selection up, wrapping around
pub const fn select_previous(index: &mut usize, len: usize) {
    if len == 0 {
        return;
    }
    *index = if *index == 0 { len - 1 } else { *index - 1 }
}

/// Move a list selection down, wrapping around
pub const fn select_next(index: &mut usize, len: usize) {
    if len == 0 {
        return;
    }
    *index = (*index + 1) % len
}
