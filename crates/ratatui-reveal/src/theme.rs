use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Below this opacity, text whose colours cannot be blended is drawn dim.
const DIM_THRESHOLD: f64 = 0.5;

/// Colours for revealed text.
///
/// Terminals have no alpha channel, so opacity is rendered by blending the text colour toward
/// `background`. That only works when both are [`Color::Rgb`]; for any other pair the widget
/// falls back to [`Modifier::DIM`] for mostly-transparent characters.
#[derive(Clone, Debug)]
pub struct RevealTheme {
    pub text: Style,
    pub background: Color,
    pub text_muted: Style,
    pub accent: Style,
}

impl Default for RevealTheme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text: Style::default().fg(Color::Rgb(0xe6, 0xe6, 0xe6)),
            background: Color::Rgb(0x12, 0x12, 0x14),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
        }
    }
}

impl RevealTheme {
    /// Style of a character drawn at `opacity` over the theme background.
    ///
    /// `base` is the caller's style for the paragraph, patched over [`RevealTheme::text`].
    pub fn style_for_opacity(&self, base: Style, opacity: f64) -> Style {
        let style = self.text.patch(base).bg(self.background);
        let fg = style.fg.unwrap_or(Color::Reset);
        match blend(self.background, fg, opacity) {
            Some(color) => style.fg(color),
            None if opacity < DIM_THRESHOLD => style.add_modifier(Modifier::DIM),
            None => style,
        }
    }
}

/// Linear blend from `from` to `to`. `None` unless both colours are RGB.
pub fn blend(from: Color, to: Color, t: f64) -> Option<Color> {
    let (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) = (from, to) else {
        return None;
    };
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Some(Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1)))
}
