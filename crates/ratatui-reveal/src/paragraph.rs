use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui_reveal_core::opacity::GHOST_OPACITY;
use ratatui_reveal_core::opacity::revealed_opacity;
use ratatui_reveal_core::progress::ProgressSource;
use ratatui_reveal_core::text::RevealText;

use crate::render;
use crate::theme::RevealTheme;
use crate::wrapping::Glyph;
use crate::wrapping::WrapCache;

#[derive(Clone, Copy, Debug)]
pub struct RevealParagraphOptions {
    /// Patched over [`RevealTheme::text`] for every character.
    pub style: Style,
    /// Opacity of the ghost copy that stays visible before a character is revealed.
    pub ghost_opacity: f64,
}

impl Default for RevealParagraphOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            ghost_opacity: GHOST_OPACITY,
        }
    }
}

/// A paragraph whose characters fade in one after another as progress goes from 0 to 1.
///
/// The widget does not own progress. Each render reads the latest value from a
/// [`ProgressSource`], so rendering twice with different readings, in either direction, always
/// reflects the reading passed in.
///
/// Every character is drawn as two stacked layers: a ghost copy at
/// [`RevealParagraphOptions::ghost_opacity`] and the animated copy above it. A terminal cell holds
/// one glyph, so the two layers are composited into a single colour.
#[derive(Clone, Debug, Default)]
pub struct RevealParagraph {
    text: RevealText,
    wrap: WrapCache,
    options: RevealParagraphOptions,
}

impl RevealParagraph {
    pub fn new(paragraph: &str) -> Self {
        Self {
            text: RevealText::new(paragraph),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: RevealParagraphOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the paragraph. `None` renders nothing.
    pub fn set_text(&mut self, paragraph: Option<&str>) {
        self.text = RevealText::from_optional(paragraph);
        self.wrap.invalidate();
    }

    pub fn text(&self) -> &RevealText {
        &self.text
    }

    pub fn options(&self) -> &RevealParagraphOptions {
        &self.options
    }

    pub fn set_style(&mut self, style: Style) {
        self.options.style = style;
    }

    /// Rows needed to show the whole paragraph at `width` columns.
    pub fn height_for_width(&mut self, width: u16) -> u16 {
        self.wrap.set_width(&self.text, width);
        self.wrap.content_height()
    }

    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &RevealTheme,
        progress: &(impl ProgressSource + ?Sized),
    ) {
        self.render_rows(area, buf, theme, progress, 0);
    }

    /// Renders the paragraph starting at wrapped row `skip`, for a paragraph partly scrolled out
    /// above `area`.
    pub fn render_rows(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &RevealTheme,
        progress: &(impl ProgressSource + ?Sized),
        skip: u16,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(theme.background));

        let progress = progress.progress();
        let ghost = self.options.ghost_opacity;
        let base = self.options.style;
        let max_x = area.x.saturating_add(area.width);
        self.wrap.set_width(&self.text, area.width);

        let rows = self
            .wrap
            .rows()
            .iter()
            .skip(skip as usize)
            .take(area.height as usize);
        for (dy, row) in rows.enumerate() {
            let y = area.y + dy as u16;
            let mut x = area.x;
            for glyph in &row.glyphs {
                match *glyph {
                    Glyph::Space => x = x.saturating_add(1),
                    Glyph::Char { word, index } => {
                        let c = &self.text.words()[word].chars()[index];
                        let opacity = revealed_opacity(progress, c.interval, ghost);
                        let style = theme.style_for_opacity(base, opacity);
                        x = x.saturating_add(render::put_char(buf, x, y, max_x, c.ch, style));
                    }
                }
            }
        }
    }
}
