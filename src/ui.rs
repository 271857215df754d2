//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a vertical stack: title, stats, data source, error
//!   banner, the feed table, the pagination bar and a one-line status bar.
//! * Only the columns that fit are drawn; `←`/`→` move the window while the
//!   `#` column stays pinned.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, InputMode};
use crate::schema::Column;

/// Widest a field column is allowed to grow.
const MAX_COLUMN_WIDTH: usize = 40;
const MIN_COLUMN_WIDTH: usize = 4;
const COLUMN_SPACING: usize = 2;
const HIGHLIGHT_SYMBOL: &str = "▸ ";

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [title_area, stats_area, source_area, error_area, table_area, pager_area, status_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Span::styled(
            " M&A Feed",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title_area,
    );
    draw_stats(app, frame, stats_area);
    draw_source(app, frame, source_area);
    draw_error(app, frame, error_area);
    draw_table(app, frame, table_area);
    draw_pager(app, frame, pager_area);
    draw_status_bar(app, frame, status_area);
}

fn draw_stats(app: &App, frame: &mut Frame, area: Rect) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(" Rows: ", label),
        Span::raw(app.items.len().to_string()),
        Span::styled("  Columns: ", label),
        Span::raw(app.columns().len().to_string()),
        Span::styled("  Total Items: ", label),
        Span::raw(group_thousands(app.total_items)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_source(app: &App, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Data Source: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(app.source.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  (t to switch)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_error(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(err) = &app.error {
        let banner = Paragraph::new(Span::styled(
            format!(" Error: {err}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(banner, area);
    }
}

/// Render the feed table, or a placeholder when there is nothing to show.
fn draw_table(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Feed ").borders(Borders::ALL);

    if app.loading {
        frame.render_widget(Paragraph::new(" Loading…").block(block), area);
        return;
    }

    let columns = app.columns();
    if columns.is_empty() {
        // An empty page is not an error; the table is simply not shown.
        let note = if app.error.is_some() { "" } else { " No records on this page" };
        frame.render_widget(
            Paragraph::new(Span::styled(note, Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let mut visible: Vec<&Column> = columns
        .iter()
        .take(1)
        .chain(columns.iter().skip(1 + app.column_offset))
        .collect();

    let mut rows: Vec<Vec<String>> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let ordinal = app.ordinal(i);
            visible.iter().map(|col| col.cell(item, ordinal)).collect()
        })
        .collect();

    let mut widths: Vec<usize> = visible
        .iter()
        .enumerate()
        .map(|(c, col)| {
            let widest = rows
                .iter()
                .map(|r| r[c].chars().count())
                .chain(std::iter::once(col.header().chars().count()))
                .max()
                .unwrap_or(0);
            widest.clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect();

    // Drop trailing columns rather than letting the layout squeeze them all.
    let budget = usize::from(area.width).saturating_sub(2 + HIGHLIGHT_SYMBOL.chars().count());
    let keep = columns_that_fit(&widths, budget);
    visible.truncate(keep);
    widths.truncate(keep);
    rows.iter_mut().for_each(|r| r.truncate(keep));

    let header = Row::new(visible.iter().map(|col| Cell::from(col.header().to_string())))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let widths = widths.into_iter().map(|w| Constraint::Length(w as u16));
    let table = Table::new(rows.into_iter().map(Row::new), widths)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING as u16)
        .row_highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// How many leading columns fit in `budget` cells, spacing included.
///
/// The `#` column and the first field column are always kept.
fn columns_that_fit(widths: &[usize], budget: usize) -> usize {
    let mut used = 0;
    for (i, width) in widths.iter().enumerate() {
        let needed = if i == 0 { *width } else { used + COLUMN_SPACING + width };
        if needed > budget && i >= 2 {
            return i;
        }
        used = needed;
    }
    widths.len()
}

/// Render the first/prev/next/last controls, page counter, jump field and
/// page size.
fn draw_pager(app: &App, frame: &mut Frame, area: Rect) {
    let button = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };
    let last_enabled = app.page_number != app.total_pages() && !app.loading;

    let jump_style = match app.mode {
        InputMode::PageJump => Style::default().fg(Color::Black).bg(Color::Yellow),
        InputMode::Browse => Style::default().fg(Color::Yellow),
    };

    let line = Line::from(vec![
        Span::raw(" "),
        button("<<", app.can_go_back()),
        Span::raw(" "),
        button("<", app.can_go_back()),
        Span::raw(" "),
        button(">", app.can_go_forward()),
        Span::raw(" "),
        button(">>", last_enabled),
        Span::raw(format!(
            "  Page: {} of {}  |  Go to page ",
            app.page_number,
            app.total_pages()
        )),
        Span::styled(format!("[{:>3}]", app.page_input), jump_style),
        Span::raw(format!("  |  Page size: {}", app.page_size)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let help = match app.mode {
        InputMode::Browse => {
            "  q: quit  ↑/↓: rows  ←/→: columns  p/n: page  [/]: first/last  :: go to  s: size  t: source"
        }
        InputMode::PageJump => "  Enter: go  Esc: cancel",
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw(help),
    ]));
    frame.render_widget(status, area);
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::fetch::FetchMsg;
    use crate::pagination::PageSize;
    use crate::source::{FeedItem, PageResponse, SourceKind};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(140, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    fn resolve(app: &mut App, result: crate::error::Result<PageResponse>) {
        let ticket = app.take_pending_fetch().unwrap();
        app.apply_fetch(FetchMsg {
            seq: ticket.seq,
            source: ticket.source,
            result,
        });
    }

    fn sample_page(total: usize) -> PageResponse {
        let items: Vec<FeedItem> = (1..=3)
            .map(|i| {
                serde_json::from_value(json!({
                    "Acquirer Company": format!("Buyer {i}"),
                    "Acquisition Type": {"Acquisition Type": "Merger", "Acquisition Sub Type": "Vertical"},
                }))
                .unwrap()
            })
            .collect();
        PageResponse {
            total_items: total,
            page_number: 1,
            page_size: 50,
            items,
        }
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn draw_while_loading_shows_indicator() {
        let mut app = App::new(SourceKind::Remote, PageSize::Fifty);
        let text = render(&mut app);
        assert!(text.contains("Loading"));
    }

    #[test]
    fn draw_table_with_rows() {
        let mut app = App::new(SourceKind::Remote, PageSize::Fifty);
        resolve(&mut app, Ok(sample_page(1500)));

        let text = render(&mut app);
        assert!(text.contains("Acquirer Company"));
        assert!(text.contains("Buyer 2"));
        assert!(text.contains("Merger - Vertical"));
        assert!(text.contains("Total Items: 1,500"));
        assert!(text.contains("Page: 1 of 30"));
    }

    #[test]
    fn draw_error_keeps_rows() {
        let mut app = App::new(SourceKind::Remote, PageSize::Fifty);
        resolve(&mut app, Ok(sample_page(200)));
        app.next_page();
        resolve(
            &mut app,
            Err(SourceError::Status {
                status: 404,
                reason: "Not Found".into(),
            }),
        );

        let text = render(&mut app);
        assert!(text.contains("Error: API request failed: Not Found"));
        assert!(text.contains("Buyer 1"));
    }

    #[test]
    fn draw_empty_page_has_no_table() {
        let mut app = App::new(SourceKind::Local, PageSize::TwentyFive);
        resolve(&mut app, Ok(PageResponse::default()));

        let text = render(&mut app);
        assert!(text.contains("No records on this page"));
        assert!(!text.contains("Error"));
        assert!(text.contains("Columns: 0"));
    }

    fn wide_app(fields: usize) -> App {
        let record: serde_json::Map<String, serde_json::Value> = (0..fields)
            .map(|i| {
                (
                    format!("Field {i:02}"),
                    json!(format!("value-{i:02}-xxxxxxxxxxxxxxxxxxxxx")),
                )
            })
            .collect();
        let mut app = App::new(SourceKind::Local, PageSize::Fifty);
        resolve(
            &mut app,
            Ok(PageResponse {
                total_items: 1,
                page_number: 1,
                page_size: 50,
                items: vec![serde_json::from_value(record.into()).unwrap()],
            }),
        );
        app
    }

    #[test]
    fn wide_records_show_whole_columns_that_fit() {
        let mut app = wide_app(20);
        let text = render(&mut app);

        assert!(text.contains("Field 00"));
        assert!(text.contains("value-00-xxxxxxxxxxxxxxxxxxxxx"));
        assert!(text.contains("value-03-xxxxxxxxxxxxxxxxxxxxx"));
        assert!(!text.contains("Field 05"), "overflowing columns are dropped");
    }

    #[test]
    fn scrolled_table_keeps_ordinal_column() {
        let mut app = wide_app(20);
        app.scroll_right();
        app.scroll_right();
        let text = render(&mut app);

        assert!(text.contains('#'));
        assert!(!text.contains("Field 00"));
        assert!(!text.contains("Field 01"));
        assert!(text.contains("Field 02"));
        assert!(text.contains("value-02-xxxxxxxxxxxxxxxxxxxxx"));
    }

    #[test]
    fn columns_that_fit_stops_at_budget() {
        // "#" (4) + 30 + 2 + 30 = 66
        assert_eq!(columns_that_fit(&[4, 30, 30, 30], 66), 3);
        assert_eq!(columns_that_fit(&[4, 30, 30, 30], 100), 4);
        assert_eq!(columns_that_fit(&[4, 30, 30], 10), 2, "# and one field always kept");
        assert_eq!(columns_that_fit(&[4], 0), 1);
    }

    #[test]
    fn source_has_its_own_line() {
        let mut app = wide_app(1);
        let text = render(&mut app);
        assert!(text.contains("Data Source: Local File"));
    }

    #[test]
    fn draw_does_not_panic_on_tiny_terminal() {
        let mut app = App::new(SourceKind::Remote, PageSize::Fifty);
        resolve(&mut app, Ok(sample_page(3)));
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
    }
}
