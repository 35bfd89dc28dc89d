use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

/// Draws a one-column scrollbar for the page. The track stays blank while the page fits.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    let thumb = scrollbar_thumb(area.height, state);
    for dy in 0..area.height {
        let ch = match thumb {
            Some(ref rows) if rows.contains(&dy) => "█",
            _ => " ",
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Track rows covered by the thumb, or `None` when there is nothing to scroll.
fn scrollbar_thumb(track_h: u16, state: &ViewportState) -> Option<std::ops::Range<u16>> {
    let max_y = state.max_y();
    if track_h == 0 || max_y == 0 {
        return None;
    }
    let track = track_h as f64;
    let thumb_h = (track * state.viewport_h as f64 / state.content_h as f64)
        .round()
        .clamp(1.0, track) as u16;
    let travel = track_h - thumb_h;
    let top = (travel as f64 * state.y as f64 / max_y as f64).round() as u16;
    let top = top.min(travel);
    Some(top..top + thumb_h)
}

/// Writes one character at `(x, y)` and returns the number of columns it took.
///
/// Wide characters also claim the following cell. Nothing is written (and 0 is returned) for
/// zero-width characters or when the character would cross `max_x`.
pub fn put_char(buf: &mut Buffer, x: u16, y: u16, max_x: u16, ch: char, style: Style) -> u16 {
    let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
    if w == 0 || x.saturating_add(w) > max_x {
        return 0;
    }

    let mut tmp = [0u8; 4];
    let s = ch.encode_utf8(&mut tmp);
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_style(style);
        cell.set_symbol(s);
    }
    if w == 2 {
        if let Some(cell) = buf.cell_mut((x + 1, y)) {
            cell.set_style(style);
            cell.set_symbol("");
        }
    }
    w
}
