use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_reveal::crossterm_input::input_event_from_crossterm;
use ratatui_reveal::input::InputEvent;
use ratatui_reveal::input::KeyCode;
use ratatui_reveal::paragraph::RevealParagraph;
use ratatui_reveal::progress::ProgressSource;
use ratatui_reveal::progress::Region;
use ratatui_reveal::progress::ScrollOffsets;
use ratatui_reveal::progress::ScrollTracker;
use ratatui_reveal::render::render_scrollbar;
use ratatui_reveal::scroll::ScrollBindings;
use ratatui_reveal::theme::RevealTheme;
use ratatui_reveal::viewport::ViewportState;
use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

const LEAD_ROWS: u32 = 40;
const TAIL_ROWS: u32 = 40;

const DEFAULT_TEXT: &str = "Terminals cannot fade text, but they can blend colours. Every \
character here owns a thin slice of the scroll range and brightens while the page moves \
through it. Scroll back up and the words sink into the background again.";

struct App {
    paragraph: RevealParagraph,
    tracker: ScrollTracker,
    viewport: ViewportState,
    bindings: ScrollBindings,
    theme: RevealTheme,
}

fn main() -> io::Result<()> {
    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let text = if text.is_empty() {
        DEFAULT_TEXT.to_string()
    } else {
        text
    };

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        paragraph: RevealParagraph::new(&text),
        tracker: ScrollTracker::new(Region::default(), ScrollOffsets::default()),
        viewport: ViewportState::default(),
        bindings: ScrollBindings::default(),
        theme: RevealTheme::default(),
    };

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let dirty = Rc::new(Cell::new(true));
    let redraw = dirty.clone();
    let _progress_sub = app.tracker.value().on_change(move |_| redraw.set(true));

    loop {
        let size = terminal.size()?;
        let page_h = size.height.saturating_sub(1);
        let text_w = size.width.saturating_sub(1);
        let para_h = app.paragraph.height_for_width(text_w) as u32;
        app.viewport.set_viewport(page_h);
        app.viewport.set_content(LEAD_ROWS + para_h + TAIL_ROWS);
        app.tracker.set_region(Region::new(LEAD_ROWS, para_h));
        app.tracker.update(app.viewport.y, page_h);

        if dirty.replace(false) {
            terminal.draw(|f| {
                let area = f.area();
                draw(f.buffer_mut(), area, app, para_h);
            })?;
        }

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if let InputEvent::Key(key) = &ev {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                return Ok(());
            }
        }
        if app.bindings.handle_event(&mut app.viewport, &ev)
            || matches!(ev, InputEvent::Resize { .. })
        {
            dirty.set(true);
        }
    }
}

fn draw(buf: &mut Buffer, area: Rect, app: &mut App, para_h: u32) {
    if area.height < 2 || area.width < 2 {
        return;
    }
    let page = Rect::new(area.x, area.y, area.width - 1, area.height - 1);
    let scrollbar = Rect::new(area.x + area.width - 1, area.y, 1, area.height - 1);
    let status = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    buf.set_style(page, Style::default().bg(app.theme.background));

    let para_top = LEAD_ROWS;
    let para_bottom = LEAD_ROWS + para_h;
    for (dy, row) in app.viewport.visible_rows().enumerate() {
        let y = page.y + dy as u16;
        if row < para_top || row >= para_bottom {
            let label = filler_line(row, para_top, para_bottom);
            buf.set_stringn(
                page.x,
                y,
                label,
                page.width as usize,
                app.theme.text_muted.bg(app.theme.background),
            );
        }
    }

    // Paragraph rows that fall inside the viewport.
    let visible = app.viewport.visible_rows();
    let first = visible.start.max(para_top);
    let last = visible.end.min(para_bottom);
    if first < last {
        let rect = Rect::new(
            page.x,
            page.y + (first - visible.start) as u16,
            page.width,
            (last - first) as u16,
        );
        let skip = (first - para_top) as u16;
        app.paragraph.render_rows(rect, buf, &app.theme, &app.tracker, skip);
    }

    render_scrollbar(scrollbar, buf, &app.viewport, app.theme.accent);

    let pct = (app.tracker.progress() * 100.0).round();
    let line = format!(
        " reveal {pct:>3}%  scroll {}/{}  (j/k, wheel, PgUp/PgDn, g/G, q)",
        app.viewport.y,
        app.viewport.content_h.saturating_sub(app.viewport.viewport_h as u32)
    );
    let span = Span::styled(line, app.theme.accent);
    buf.set_span(status.x, status.y, &span, status.width);
}

fn filler_line(row: u32, para_top: u32, para_bottom: u32) -> String {
    if row < para_top {
        let left = para_top - row;
        if left % 5 == 0 {
            format!("  ↓  {left} rows to go")
        } else {
            "  ·".to_string()
        }
    } else if (row - para_bottom) % 5 == 4 {
        "  ↑  scroll back up to hide it again".to_string()
    } else {
        "  ·".to_string()
    }
}
