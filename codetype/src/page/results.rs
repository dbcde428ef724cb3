use crossterm::event::{Event, KeyCode};
use quill::{LiveStats, TypingResult};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{Axis, Chart, Dataset, GraphType, Padding, Paragraph},
};

use super::Message;
use crate::{
    config::Config,
    utils::{ROUNDED_BLOCK, format_duration},
};

type PlotData = Vec<(f64, f64)>;

/// Page: Results
///
/// Shows the figures of a completed session.
#[derive(Debug, Clone)]
pub struct Results {
    result: TypingResult,
    wpm: PlotData,
    accuracy: PlotData,
    wpm_high: f64,
}

impl Results {
    pub fn new(result: TypingResult, samples: Vec<LiveStats>) -> Self {
        let seconds = |sample: &LiveStats| sample.elapsed_ms as f64 / 1000.0;

        let mut wpm: PlotData = samples.iter().map(|s| (seconds(s), s.wpm)).collect();
        let mut accuracy: PlotData = samples.iter().map(|s| (seconds(s), s.accuracy)).collect();

        // The final figures close both lines
        let end = result.elapsed_ms as f64 / 1000.0;
        wpm.push((end, result.wpm));
        accuracy.push((end, result.accuracy));

        let wpm_high = wpm.iter().map(|(_, wpm)| *wpm).fold(0.0, f64::max);

        Self {
            result,
            wpm,
            accuracy,
            wpm_high,
        }
    }

    fn summary(&self, config: &Config) -> Vec<Line<'static>> {
        let result = &self.result;
        let language = config
            .catalog
            .language(&result.language)
            .map_or_else(|| result.language.clone(), |language| language.name.clone());
        let consistency = result
            .consistency
            .map_or_else(|| "-".to_string(), |c| format!("{:.0}%", c.percent));

        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::raw(format!("{label:<13}")),
                Span::raw(value).bold(),
            ])
        };

        vec![
            row("Speed", format!("{:.0} WPM", result.wpm)),
            row("Accuracy", format!("{:.1}%", result.accuracy)),
            row("Time", format_duration(result.elapsed_ms)),
            row("Errors", result.error_count.to_string()),
            row("Language", language),
            row("Consistency", consistency),
        ]
    }
}

// Rendering logic
impl Results {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let [text, charts] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)])
                .areas(area);
        let [wpm_area, accuracy_area] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(charts);

        let summary = Paragraph::new(self.summary(config)).block(
            ROUNDED_BLOCK
                .title("Result".to_span().bold())
                .padding(Padding::uniform(1)),
        );
        frame.render_widget(summary, text);

        let theme = &config.settings.theme.plot;
        let duration = self.result.elapsed_ms as f64 / 1000.0;
        let time_axis = || {
            Axis::default()
                .title("Seconds")
                .style(Style::default().fg(Color::Gray))
                .labels([
                    Span::raw("0"),
                    Span::raw(duration.trunc().to_string()),
                ])
                .bounds([0.0, duration])
        };

        let wpm = Dataset::default()
            .name("Wpm")
            .marker(theme.line_symbol.as_marker())
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.wpm))
            .data(&self.wpm);

        let wpm_chart = Chart::new(vec![wpm])
            .block(ROUNDED_BLOCK.title("Words/min".to_span().bold()))
            .x_axis(time_axis())
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .labels([
                        Span::raw("0"),
                        Span::raw((self.wpm_high / 2.0).trunc().to_string()),
                        Span::raw(self.wpm_high.trunc().to_string()),
                    ])
                    .bounds([0.0, self.wpm_high.max(1.0)]),
            );

        let accuracy = Dataset::default()
            .name("Accuracy")
            .marker(theme.line_symbol.as_marker())
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.accuracy))
            .data(&self.accuracy);

        let accuracy_chart = Chart::new(vec![accuracy])
            .block(ROUNDED_BLOCK.title("Accuracy".to_span().bold()))
            .x_axis(time_axis())
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .labels([Span::raw("0"), Span::raw("50"), Span::raw("100")])
                    .bounds([0.0, 100.0]),
            );

        frame.render_widget(wpm_chart, wpm_area);
        frame.render_widget(accuracy_chart, accuracy_area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("<Enter> to try again | <L> for the leaderboard"))
    }

    pub fn handle_events(&self, event: &Event, _config: &Config) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };
        if !key.is_press() {
            return None;
        }

        match key.code {
            KeyCode::Enter => Some(Message::Start(self.result.language.clone())),
            KeyCode::Char('l') => Some(Message::Leaderboard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_data() {
        let result = TypingResult {
            wpm: 42.0,
            accuracy: 96.0,
            elapsed_ms: 2_000,
            error_count: 1,
            language: "rust".to_string(),
            snippet_id: "rust1".to_string(),
            consistency: None,
        };
        let samples = vec![
            LiveStats {
                wpm: 30.0,
                accuracy: 100.0,
                elapsed_ms: 500,
                error_count: 0,
            },
            LiveStats {
                wpm: 55.0,
                accuracy: 90.0,
                elapsed_ms: 1_000,
                error_count: 1,
            },
        ];

        let results = Results::new(result, samples);
        assert_eq!(results.wpm, [(0.5, 30.0), (1.0, 55.0), (2.0, 42.0)]);
        assert_eq!(results.accuracy.last(), Some(&(2.0, 96.0)));
        assert_eq!(results.wpm_high, 55.0);
    }
}
