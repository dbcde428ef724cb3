use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod error;
pub mod leaderboard;
pub mod menu;
pub mod results;
pub mod session;

pub use error::Error;
pub use leaderboard::Leaderboard;
pub use menu::Menu;
pub use results::Results;
pub use session::Session;

use crate::{app::Message, config::Config};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Menu, Session, Results, Leaderboard, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        match self {
            Self::Menu(page) => page.render(frame, area, config),
            Self::Session(page) => page.render(frame, area, config),
            Self::Results(page) => page.render(frame, area, config),
            Self::Leaderboard(page) => page.render(frame, area, config),
            Self::Error(page) => page.render(frame, area, config),
        }
    }

    pub fn render_top(&mut self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Menu(_) => None,
            Self::Session(page) => page.render_top(config),
            Self::Results(page) => page.render_top(config),
            Self::Leaderboard(page) => page.render_top(config),
            Self::Error(page) => page.render_top(config),
        }
    }

    pub fn handle_events(&mut self, event: &Event, config: &Config) -> Option<Message> {
        match self {
            Self::Menu(page) => page.handle_events(event, config),
            Self::Session(page) => page.handle_events(event, config),
            Self::Results(page) => page.handle_events(event, config),
            Self::Leaderboard(page) => page.handle_events(event, config),
            Self::Error(page) => page.handle_events(event, config),
        }
    }

    pub fn poll(&mut self, config: &Config) -> Option<Message> {
        match self {
            Self::Session(page) => page.poll(config),
            Self::Menu(_) | Self::Results(_) | Self::Leaderboard(_) | Self::Error(_) => None,
        }
    }
}
