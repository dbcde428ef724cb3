use crossterm::event::{Event, KeyCode};
use quill::{Language, SnippetProvider};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, Padding},
};

use super::Message;
use crate::{
    config::Config,
    utils::{center, select_next, select_previous},
};

/// Page: Main menu
///
/// Lists the languages of the catalog, followed by the leaderboard.
#[derive(Debug)]
pub struct Menu {
    languages: Vec<Language>,
    index: usize,
}

impl Menu {
    /// Creates a new menu with the default language selected
    pub fn new(config: &Config) -> Self {
        let languages = config.catalog.languages();
        let index = languages
            .iter()
            .position(|language| language.id == config.settings.default_language)
            .unwrap_or(0);

        Self { languages, index }
    }

    /// Languages plus the leaderboard entry
    const fn item_count(&self) -> usize {
        self.languages.len() + 1
    }
}

// Rendering logic
impl Menu {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let highlight = config.settings.theme.text.highlight;

        let language_items = self.languages.iter().map(|language| {
            let count = config.catalog.snippet_count(&language.id);
            let suffix = if count == 1 { "" } else { "s" };
            format!("{} ({count} snippet{suffix})", language.name)
        });

        let items = language_items
            .chain(std::iter::once("Leaderboard".to_string()))
            .enumerate()
            .map(|(i, label)| {
                let mut selector = "  ";
                let style = if i == self.index {
                    selector = "> ";
                    Style::new().fg(highlight).reversed()
                } else {
                    Style::new()
                };
                Line::from(Span::styled(format!("{selector}{label}"), style))
            });

        let list = List::new(items);
        let top = area.height.saturating_sub(list.len() as u16 + 1) / 2;
        let area = Block::new().padding(Padding::top(top)).inner(area);

        frame.render_widget(list.block(Block::new().title("Select Language")), area);
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };
        if !key.is_press() {
            return None;
        }

        let count = self.item_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => select_previous(&mut self.index, count),
            KeyCode::Down | KeyCode::Char('j') => select_next(&mut self.index, count),
            KeyCode::Enter => {
                return Some(
                    self.languages
                        .get(self.index)
                        .map_or(Message::Leaderboard, |language| {
                            Message::Start(language.id.clone())
                        }),
                );
            }
            _ => (),
        };

        None
    }
}
