use crossterm::event::{Event, KeyCode};
use quill::LeaderboardEntry;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::{Cell, Paragraph, Row, Table},
};

use super::Message;
use crate::{
    config::Config,
    utils::{ROUNDED_BLOCK, center},
};

/// Page: Leaderboard
///
/// Best players by highest WPM.
#[derive(Debug)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub const fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }
}

// Rendering logic
impl Leaderboard {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(90));
        let block = ROUNDED_BLOCK.title("Leaderboard".to_span().bold());

        if self.entries.is_empty() {
            let empty = Paragraph::new("No results yet. Complete a session to get on the board.")
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let highlight = config.settings.theme.text.highlight;
        let header = Row::new(["#", "Player", "WPM", "Accuracy", "Games"])
            .style(Style::new().bold().fg(highlight));

        let rows = self.entries.iter().enumerate().map(|(rank, entry)| {
            Row::new([
                Cell::from((rank + 1).to_string()),
                Cell::from(entry.player.clone()),
                Cell::from(format!("{:.0}", entry.highest_wpm)),
                Cell::from(format!("{:.1}%", entry.highest_accuracy)),
                Cell::from(entry.games_played.to_string()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Fill(1),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(block);

        frame.render_widget(table, area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("<Enter> to return to menu"))
    }

    pub fn handle_events(&self, event: &Event, _config: &Config) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Reset);
        }

        None
    }
}
