use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyModifiers};
use quill::{
    CharStatus, Configuration, LiveStats, Phase, SessionError, Snippet, Transition, TypingSession,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use web_time::Instant;

use super::Message;
use crate::{
    config::Config,
    utils::{ROUNDED_BLOCK, format_duration},
};

const TAB_WIDTH: usize = 4;

/// Page: Session
///
/// The editor surface for one snippet.
#[derive(Debug)]
pub struct Session {
    typing_session: TypingSession,
    stats: LiveStats,
}

impl Session {
    pub fn new(snippet: Arc<Snippet>, configuration: Configuration) -> Result<Self, SessionError> {
        let typing_session = TypingSession::new(snippet)?.with_configuration(configuration);

        Ok(Self {
            typing_session,
            stats: LiveStats::default(),
        })
    }

    fn language(&self) -> &str {
        &self.typing_session.snippet().language
    }

    /// Whether the caret sits on a literal tab of the snippet
    fn expects_tab(&self) -> bool {
        let session = &self.typing_session;
        session.target().get(session.input_len()) == Some(&'\t')
    }

    /// First line to show so the caret line stays in view
    fn scroll_offset(&self, height: usize) -> usize {
        let line_count = self.typing_session.navigator().line_count();
        let active = self.typing_session.active_line();

        active
            .saturating_sub(height / 2)
            .min(line_count.saturating_sub(height))
    }
}

/// Plain and shifted keys type text, as does AltGr (reported as Ctrl+Alt)
fn is_text_input(modifiers: KeyModifiers) -> bool {
    let modifiers = modifiers.difference(KeyModifiers::SHIFT);
    modifiers.is_empty() || modifiers == KeyModifiers::CONTROL | KeyModifiers::ALT
}

// Rendering logic
impl Session {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let text_theme = &config.settings.theme.text;
        let untyped = config.settings.theme.untyped();
        let snippet = self.typing_session.snippet();

        let [editor, footer] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let block = ROUNDED_BLOCK.title(format!(" {} ({}) ", snippet.title, snippet.difficulty));
        let code_area = block.inner(editor);
        frame.render_widget(block, editor);

        let height = code_area.height as usize;
        let first_line = self.scroll_offset(height);
        let line_count = self.typing_session.navigator().line_count();
        let number_width = line_count.to_string().len();

        let mut cursor_position: Option<(u16, u16)> = None;
        let mut lines = self.typing_session.render_lines(|line| {
            if line.line_index < first_line || line.line_index >= first_line + height {
                return None;
            }

            let row = (line.line_index - first_line) as u16;
            let number_style = if line.is_active() {
                Style::new().fg(text_theme.highlight).bold()
            } else {
                Style::new().fg(text_theme.line_number)
            };
            let mut spans = vec![Span::styled(
                format!("{:>number_width$} ", line.line_index + 1),
                number_style,
            )];

            let mut column = number_width + 1;
            for ctx in &line.contents {
                if ctx.has_cursor {
                    cursor_position = Some((column as u16, row));
                }

                let style = match ctx.status {
                    CharStatus::Correct => Style::new().fg(text_theme.success),
                    CharStatus::Incorrect if ctx.character.is_whitespace() => {
                        Style::new().bg(text_theme.error)
                    }
                    CharStatus::Incorrect => Style::new().fg(text_theme.error).bold(),
                    CharStatus::Untyped => Style::new().fg(untyped),
                };

                let text = match ctx.character {
                    // Only a mistyped newline is visible
                    '\n' if ctx.status == CharStatus::Incorrect => " ".to_string(),
                    '\n' => String::new(),
                    '\t' => " ".repeat(TAB_WIDTH),
                    c => c.to_string(),
                };
                column += text.chars().count();
                spans.push(Span::styled(text, style));
            }

            Some(Line::from(spans))
        });

        // Characters typed past the end of the snippet
        let overrun = self.typing_session.overrun();
        if !overrun.is_empty()
            && first_line + height >= line_count
            && let Some(last) = lines.last_mut()
        {
            let text: String = overrun.iter().collect();
            last.push_span(Span::styled(text, Style::new().bg(text_theme.error)));
        }

        frame.render_widget(Paragraph::new(lines), code_area);

        if let Some((x, y)) = cursor_position {
            frame.set_cursor_position((code_area.x + x, code_area.y + y));
        }

        let [path, errors] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(16)]).areas(footer);
        frame.render_widget(Paragraph::new(snippet.file_name()), path);
        frame.render_widget(
            Paragraph::new(format!("Errors: {}", self.typing_session.error_count()))
                .right_aligned(),
            errors,
        );
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        if self.typing_session.phase() == Phase::Idle {
            return Some(Line::raw("Start typing... Press <Tab> to restart"));
        }

        let elapsed = self.typing_session.elapsed_ms(Instant::now());
        Some(Line::raw(format!(
            "{} | WPM: {:.0} | Accuracy: {:.0}% | {:.0}% done",
            format_duration(elapsed),
            self.stats.wpm,
            self.stats.accuracy,
            self.typing_session.completion_percentage(),
        )))
    }

    pub fn poll(&mut self, _config: &Config) -> Option<Message> {
        if let Some(stats) = self.typing_session.poll_tick(Instant::now()) {
            self.stats = stats;
        }

        None
    }

    pub fn handle_events(&mut self, event: &Event, _config: &Config) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };
        if !key.is_press() {
            return None;
        }

        let outcome = match key.code {
            KeyCode::Tab if self.expects_tab() => self.typing_session.type_char('\t'),
            KeyCode::Tab => return Some(Message::Start(self.language().to_string())),
            KeyCode::Char(character) if is_text_input(key.modifiers) => {
                self.typing_session.type_char(character)
            }
            KeyCode::Backspace => self.typing_session.backspace(),
            KeyCode::Enter => self.typing_session.line_break(),
            _ => return None,
        };

        match outcome {
            Ok(Transition::Completed(result)) => Some(Message::Completed(
                result,
                self.typing_session.samples().to_vec(),
            )),
            Ok(Transition::Started) => {
                self.stats = self.typing_session.live_stats_at(Instant::now());
                None
            }
            Ok(Transition::Idle | Transition::Progressed) => None,
            Err(error) => {
                tracing::trace!(%error, "ignored key");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEvent;
    use quill::Difficulty;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Settings;

    fn config() -> Config {
        Config {
            settings: Settings::default(),
            catalog: Catalog::default(),
        }
    }

    fn page(code: &str) -> Session {
        let snippet = Arc::new(Snippet::new("t", "go", Difficulty::Easy, "Test", code));
        Session::new(snippet, Configuration::default()).unwrap()
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn type_text(page: &mut Session, config: &Config, text: &str) -> Option<Message> {
        let mut last = None;
        for c in text.chars() {
            let event = match c {
                '\n' => key(KeyCode::Enter, KeyModifiers::NONE),
                c => key(KeyCode::Char(c), KeyModifiers::NONE),
            };
            last = page.handle_events(&event, config);
        }
        last
    }

    #[test]
    fn test_typing_completes() {
        let config = config();
        let mut page = page("if x {\n  y\n}");

        // Enter supplies the indentation
        let message = type_text(&mut page, &config, "if x {\ny\n}");
        let Some(Message::Completed(result, _)) = message else {
            panic!("expected the session to complete");
        };
        assert_eq!(result.error_count, 0);
        assert_eq!(result.language, "go");
    }

    #[test]
    fn test_tab_restarts_language() {
        let config = config();
        let mut page = page("abc");
        type_text(&mut page, &config, "ab");

        let message = page.handle_events(&key(KeyCode::Tab, KeyModifiers::NONE), &config);
        assert!(matches!(message, Some(Message::Start(language)) if language == "go"));
    }

    #[test]
    fn test_control_keys_are_not_typed() {
        let config = config();
        let mut page = page("abc");

        let message = page.handle_events(&key(KeyCode::Char('q'), KeyModifiers::CONTROL), &config);
        assert!(message.is_none());
        assert_eq!(page.typing_session.input_len(), 0);

        // Escape is left to the global handler
        assert!(page.handle_events(&key(KeyCode::Esc, KeyModifiers::NONE), &config).is_none());
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        let config = config();
        let mut page = page("A");

        let message = page.handle_events(&key(KeyCode::Char('A'), KeyModifiers::SHIFT), &config);
        assert!(matches!(message, Some(Message::Completed(..))));
    }

    #[test]
    fn test_scroll_offset_follows_caret() {
        let config = config();
        let code = (0..20).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n");
        let mut page = page(&code);

        assert_eq!(page.scroll_offset(10), 0);

        type_text(&mut page, &config, "l0\nl1\nl2\nl3\nl4\nl5\nl6\nl7\n");
        assert_eq!(page.typing_session.active_line(), 8);
        assert_eq!(page.scroll_offset(10), 3);

        // Never scrolls past the last page
        assert_eq!(page.scroll_offset(30), 0);
    }

    #[test]
    fn test_tab_types_literal_tab() {
        let config = config();
        let mut page = page("a\tb");
        type_text(&mut page, &config, "a");

        let message = page.handle_events(&key(KeyCode::Tab, KeyModifiers::NONE), &config);
        assert!(message.is_none());
        assert_eq!(page.typing_session.input_len(), 2);

        let message = type_text(&mut page, &config, "b");
        assert!(matches!(message, Some(Message::Completed(result, _)) if result.error_count == 0));
    }

    #[test]
    fn test_altgr_characters_are_typed() {
        let config = config();
        let mut page = page("f{}");
        type_text(&mut page, &config, "f");

        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        page.handle_events(&key(KeyCode::Char('{'), altgr), &config);
        assert_eq!(page.typing_session.input_len(), 2);

        let shifted = key(KeyCode::Char('}'), altgr | KeyModifiers::SHIFT);
        let message = page.handle_events(&shifted, &config);
        assert!(matches!(message, Some(Message::Completed(..))));
    }
}
