use ratatui_reveal_core::text::RevealText;
use unicode_width::UnicodeWidthChar;

/// One cell-producing item on a wrapped row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Character `index` of word `word`.
    Char { word: usize, index: usize },
    /// The separator between two words.
    Space,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub glyphs: Vec<Glyph>,
    pub width: u16,
}

/// Word-wrapped rows of a [`RevealText`], rebuilt only when the width changes.
#[derive(Clone, Debug, Default)]
pub struct WrapCache {
    rows: Vec<Row>,
    wrap_cols: Option<u16>,
}

impl WrapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached rows; the next [`WrapCache::set_width`] rebuilds them.
    pub fn invalidate(&mut self) {
        self.rows.clear();
        self.wrap_cols = None;
    }

    pub fn set_width(&mut self, text: &RevealText, width: u16) {
        if self.wrap_cols == Some(width) {
            return;
        }
        self.wrap_cols = Some(width);
        self.rows = wrap(text, width);
        log::trace!("wrapped to {} rows at width {width}", self.rows.len());
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn content_height(&self) -> u16 {
        self.rows.len().min(u16::MAX as usize) as u16
    }
}

/// Greedy word wrap. A width of 0 disables wrapping.
///
/// Words wider than the row are hard-broken between characters. The separator at a wrap point is
/// dropped. Zero-width characters take no cell and are skipped.
pub fn wrap(text: &RevealText, width: u16) -> Vec<Row> {
    let max_cols = if width == 0 {
        usize::MAX
    } else {
        width as usize
    };
    let mut rows: Vec<Row> = Vec::new();
    let mut line: Vec<Glyph> = Vec::new();
    let mut line_cols = 0usize;

    let flush = |rows: &mut Vec<Row>, line: &mut Vec<Glyph>, line_cols: &mut usize| {
        while line.last() == Some(&Glyph::Space) {
            line.pop();
            *line_cols -= 1;
        }
        if line.is_empty() {
            return;
        }
        rows.push(Row {
            glyphs: std::mem::take(line),
            width: (*line_cols).min(u16::MAX as usize) as u16,
        });
        *line_cols = 0;
    };

    for (word_idx, word) in text.words().iter().enumerate() {
        let word_cols: usize = word
            .chars()
            .iter()
            .map(|c| UnicodeWidthChar::width(c.ch).unwrap_or(0))
            .sum();

        if word_idx > 0 {
            let needs_break = !line.is_empty()
                && word_cols > 0
                && line_cols.saturating_add(1 + word_cols) > max_cols
                && word_cols <= max_cols;
            if needs_break {
                flush(&mut rows, &mut line, &mut line_cols);
            } else if (!line.is_empty() || rows.is_empty()) && line_cols < max_cols {
                line.push(Glyph::Space);
                line_cols += 1;
            }
        }

        for (index, c) in word.chars().iter().enumerate() {
            let w = UnicodeWidthChar::width(c.ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if line_cols.saturating_add(w) > max_cols && !line.is_empty() {
                flush(&mut rows, &mut line, &mut line_cols);
            }
            line.push(Glyph::Char {
                word: word_idx,
                index,
            });
            line_cols += w;
        }
    }

    if !line.is_empty() {
        flush(&mut rows, &mut line, &mut line_cols);
    }
    rows
}
