use ratatui::{style::Color, symbols::Marker};
use serde::{Deserialize, Serialize};
use terminal_colorsaurus::QueryOptions;

/// How far untyped code is faded from the foreground towards the background
const UNTYPED_FADE: f32 = 0.55;

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub plot: PlotTheme,
    /// Terminal colors, detected at startup
    #[serde(skip)]
    pub palette: Option<Palette>,
}

impl Theme {
    /// Color of code that has not been typed yet
    pub fn untyped(&self) -> Color {
        self.text
            .untyped
            .or_else(|| self.palette.map(|palette| palette.fade(UNTYPED_FADE)))
            .unwrap_or(Color::DarkGray)
    }
}

/// Foreground and background reported by the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: (u8, u8, u8),
    pub background: (u8, u8, u8),
}

impl Palette {
    /// Asks the terminal for its colors
    pub fn detect() -> Option<Self> {
        match terminal_colorsaurus::color_palette(QueryOptions::default()) {
            Ok(palette) => Some(Self {
                foreground: palette.foreground.scale_to_8bit(),
                background: palette.background.scale_to_8bit(),
            }),
            Err(error) => {
                tracing::debug!(%error, "terminal palette unavailable");
                None
            }
        }
    }

    /// The foreground moved `amount` (0 to 1) of the way to the background
    pub fn fade(&self, amount: f32) -> Color {
        let amount = amount.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            (f32::from(fg) + (f32::from(bg) - f32::from(fg)) * amount).round() as u8
        };

        let (fr, fg, fb) = self.foreground;
        let (br, bg, bb) = self.background;
        Color::Rgb(mix(fr, br), mix(fg, bg), mix(fb, bb))
    }
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub success: Color,
    pub error: Color,
    /// Code that has not been typed yet. Faded terminal text when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untyped: Option<Color>,
    pub highlight: Color,
    pub line_number: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            success: Color::Green,
            error: Color::Red,
            untyped: None,
            highlight: Color::Blue,
            line_number: Color::DarkGray,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum PlotSymbol {
    Dot,
    Block,
    HalfBlock,
    Braille,
    Bar,
}

impl PlotSymbol {
    /// Returns the marker that the symbol corresponds to.
    pub const fn as_marker(self) -> Marker {
        match self {
            Self::Dot => Marker::Dot,
            Self::Bar => Marker::Bar,
            Self::Block => Marker::Block,
            Self::Braille => Marker::Braille,
            Self::HalfBlock => Marker::HalfBlock,
        }
    }
}

/// Results chart colors and symbols
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotTheme {
    pub wpm: Color,
    pub accuracy: Color,
    pub line_symbol: PlotSymbol,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            wpm: Color::Yellow,
            accuracy: Color::Gray,
            line_symbol: PlotSymbol::Braille,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: Palette = Palette {
        foreground: (255, 255, 255),
        background: (0, 0, 0),
    };

    #[test]
    fn test_fade() {
        assert_eq!(PALETTE.fade(0.0), Color::Rgb(255, 255, 255));
        assert_eq!(PALETTE.fade(1.0), Color::Rgb(0, 0, 0));
        assert_eq!(PALETTE.fade(0.5), Color::Rgb(128, 128, 128));
        assert_eq!(PALETTE.fade(7.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_untyped_color() {
        let mut theme = Theme::default();
        assert_eq!(theme.untyped(), Color::DarkGray);

        theme.palette = Some(PALETTE);
        assert_eq!(theme.untyped(), PALETTE.fade(UNTYPED_FADE));

        theme.text.untyped = Some(Color::Magenta);
        assert_eq!(theme.untyped(), Color::Magenta);
    }
}
