use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use quill::provider::submit_detached;
use quill::{AuthEvent, IdentityProvider, Leaderboard, LiveStats, TypingResult};
use ratatui::{Frame, style::Stylize, text::ToLine, widgets::Padding};
use thiserror::Error;

use crate::config::Config;
use crate::identity::LocalIdentity;
use crate::page;
use crate::results::ResultStore;
use crate::utils::ROUNDED_BLOCK;

/// How long the loop waits for input before polling the page again
const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Debug, Error)]
#[error("No snippets available for '{0}'.\nPick another language from the menu.")]
pub struct NoSnippetError(String);

#[derive(Debug, Error)]
#[error("Saving results is disabled, so there is no leaderboard.\nEnable `results.save_enabled` in settings.toml.")]
pub struct LeaderboardDisabledError;

/// An app message
pub enum Message {
    /// Start a session with a random snippet of the language
    Start(String),
    /// A session completed
    Completed(TypingResult, Vec<LiveStats>),
    /// Show the leaderboard
    Leaderboard,
    /// Reset to the main menu
    Reset,
    /// Quit the application
    Quit,
}

/// The app itself
pub struct App {
    page: page::Page,
    config: Config,
    results: Option<ResultStore>,
    identity: LocalIdentity,
}

impl App {
    /// Creates a new `App`, starting a session right away if a language is given
    pub fn new(config: Config, language: Option<String>) -> Self {
        let results = config
            .settings
            .results
            .directory
            .clone()
            .filter(|_| config.settings.results.save_enabled)
            .and_then(|directory| match ResultStore::new(directory) {
                Ok(store) => Some(store),
                Err(error) => {
                    tracing::warn!(%error, "results will not be saved");
                    None
                }
            });

        let identity = LocalIdentity::new(config.settings.profile.clone());

        let mut app = Self {
            page: page::Menu::new(&config).into(),
            config,
            results,
            identity,
        };

        if let Some(language) = language {
            app.start(&language);
        }

        app
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        execute!(stdout(), SetCursorStyle::SteadyBar)?;

        loop {
            let event = event::poll(FRAME_TIME)?.then(event::read).transpose()?;
            if let Some(message) = self.handle_events(event)
                && !self.update(message)
            {
                break;
            }
            self.poll_identity();
            terminal.draw(|frame| self.draw(frame))?;
        }

        ratatui::restore();

        Ok(())
    }

    /// Applies a message, returning false once the app should quit
    fn update(&mut self, message: Message) -> bool {
        match message {
            Message::Start(language) => self.start(&language),
            Message::Completed(result, samples) => self.complete(result, samples),
            Message::Leaderboard => self.show_leaderboard(),
            Message::Reset => self.page = page::Menu::new(&self.config).into(),
            Message::Quit => return false,
        }

        true
    }

    /// Replace the current page with a fresh session for `language`
    fn start(&mut self, language: &str) {
        let settings = &self.config.settings;
        let snippet = self
            .config
            .catalog
            .snippet_or_fallback(language, &settings.fallback_language);

        self.page = match snippet {
            Some(snippet) => {
                tracing::info!(snippet = %snippet.id, "starting session");
                match page::Session::new(snippet, settings.session_configuration()) {
                    Ok(session) => session.into(),
                    Err(error) => page::Error::from(error).into(),
                }
            }
            None => page::Error::from(NoSnippetError(language.to_string())).into(),
        };
    }

    fn complete(&mut self, result: TypingResult, samples: Vec<LiveStats>) {
        if let Some(store) = &self.results {
            submit_detached(store, &result, self.identity.current());
        }
        self.page = page::Results::new(result, samples).into();
    }

    fn show_leaderboard(&mut self) {
        let limit = self.config.settings.results.leaderboard_size;
        self.page = match &self.results {
            Some(store) => match store.top(limit) {
                Ok(entries) => page::Leaderboard::new(entries).into(),
                Err(error) => page::Error::from(error).into(),
            },
            None => page::Error::from(LeaderboardDisabledError).into(),
        };
    }

    fn poll_identity(&mut self) {
        while let Some(event) = self.identity.poll_event() {
            match event {
                AuthEvent::SignedIn(identity) => {
                    tracing::info!(player = %identity.display_name, "signed in");
                }
                AuthEvent::SignedOut => tracing::info!("signed out"),
            }
        }
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let player = self.identity.current().map_or_else(
            || "anonymous".to_string(),
            |identity| identity.display_name.clone(),
        );
        let identity_hint = if self.identity.has_profile() {
            format!("{player} (<CTRL-L> to switch)")
        } else {
            player
        };

        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("CODETYPE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned())
            .title_bottom(identity_hint.to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| {
                self.page.handle_events(&event, &self.config).or_else(|| {
                    match event {
                        Event::Key(key) => self.handle_key_event(key),
                        _ => None,
                    }
                })
            })
            .or_else(|| self.page.poll(&self.config))
    }

    /// Global key events
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Message> {
        if !key.is_press() {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                self.identity.toggle();
                None
            }
            (KeyCode::Esc, KeyModifiers::NONE) => Some(Message::Reset),
            _ => None,
        }
    }
}
