//! UI rendering for the `StudyApp`.
//!
//! Every draw rebuilds the whole frame from the current state; clickable
//! regions are recorded as hitboxes during the draw, so mouse dispatch is
//! keyed by stable identities (deck positions, span ordinals) instead of
//! screen-scraping.

use super::app::{HitTarget, StudyApp, APP_NAME};
use super::events::{handle_key_event, handle_mouse_event, Event, EventHandler};
use super::theme::ColorScheme;
use super::widgets::{
    check_terminal_size, mask_blocks, pad_to_width, render_size_warning, toggle_indicator,
    truncate_to_width, MIN_HEIGHT, MIN_WIDTH,
};
use crate::model::ContentSegment;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{self, stdout};
use unicode_width::UnicodeWidthStr;

/// Width of the category column in the list view.
const CATEGORY_COL: usize = 16;

/// Run the `StudyApp` TUI.
pub fn run_study_tui(app: &mut StudyApp) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Event handler
    let events = EventHandler::default();
    let mut last_title = String::new();

    // Main loop
    loop {
        // The terminal title is the page identity label: the app name on
        // the list view, "<topic> - <app name>" on a detail view.
        let title = app.title();
        if title != last_title {
            execute!(terminal.backend_mut(), SetTitle(&title))?;
            last_title = title;
        }

        // Render
        terminal.draw(|frame| render(frame, app))?;

        // Handle events
        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            Event::Resize(_, _) => {}
            Event::Tick => {
                app.tick += 1;
            }
        }

        // Drain the queued navigation through the router
        if let Some(route) = app.take_pending_route() {
            app.apply_route(&route);
        }

        if app.should_quit() {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

/// Main render function.
fn render(frame: &mut Frame, app: &mut StudyApp) {
    let area = frame.area();
    app.clear_hitboxes();

    // The disguise applies at the outermost scope, independent of view
    let scheme = ColorScheme::for_mode(app.stealth_mode());

    if check_terminal_size(area.width, area.height).is_err() {
        render_size_warning(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app, &scheme);

    if app.current_topic().is_some() {
        render_detail(frame, chunks[1], app, &scheme);
    } else {
        render_list(frame, chunks[1], app, &scheme);
    }

    render_status_bar(frame, chunks[2], app, &scheme);
    render_footer(frame, chunks[3], app, &scheme);

    if app.show_help() {
        render_help_overlay(frame, area, &scheme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &StudyApp, scheme: &ColorScheme) {
    let mut spans = vec![Span::styled(
        APP_NAME,
        Style::default().fg(scheme.primary).bold(),
    )];

    if let Some(topic) = app.current_topic() {
        spans.push(Span::styled(" │ ", Style::default().fg(scheme.muted)));
        spans.push(Span::styled(
            topic.title.clone(),
            Style::default().fg(scheme.text).bold(),
        ));
    } else {
        spans.push(Span::styled(" │ ", Style::default().fg(scheme.muted)));
        spans.push(Span::styled(
            format!("{} topics", app.deck().len()),
            Style::default().fg(scheme.text_muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ============================================================================
// List view
// ============================================================================

fn render_list(frame: &mut Frame, area: Rect, app: &mut StudyApp, scheme: &ColorScheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border))
        .title(Span::styled(" Topics ", Style::default().fg(scheme.primary)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.deck().is_empty() {
        let empty = Paragraph::new("Deck is empty")
            .style(Style::default().fg(scheme.text_muted))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    // Keep the selection visible
    let visible = inner.height as usize;
    if visible == 0 {
        return;
    }
    let selected = app.list_selected();
    if selected < app.list_offset {
        app.list_offset = selected;
    } else if selected >= app.list_offset + visible {
        app.list_offset = selected - visible + 1;
    }
    let offset = app.list_offset;

    let title_width = (inner.width as usize).saturating_sub(CATEGORY_COL + 3);
    let mut lines = Vec::with_capacity(visible);

    for (row, topic) in app
        .deck()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, t)| (i, t.clone()))
        .collect::<Vec<_>>()
    {
        let is_selected = row == selected;
        let row_style = if is_selected {
            Style::default().bg(scheme.selection_bg)
        } else {
            Style::default()
        };

        let category = pad_to_width(topic.category_label(), CATEGORY_COL);
        let line = Line::from(vec![
            Span::styled(
                category,
                row_style.fg(if is_selected {
                    scheme.accent
                } else {
                    scheme.text_muted
                }),
            ),
            Span::styled(" │ ", row_style.fg(scheme.muted)),
            Span::styled(
                truncate_to_width(&topic.title, title_width),
                row_style.fg(scheme.text),
            ),
        ]);
        lines.push(line);

        let y = inner.y + (row - offset) as u16;
        app.push_hitbox(
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
            HitTarget::ListRow(row),
        );
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

// ============================================================================
// Detail view
// ============================================================================

fn render_detail(frame: &mut Frame, area: Rect, app: &mut StudyApp, scheme: &ColorScheme) {
    let Some(topic) = app.current_topic().cloned() else {
        return;
    };

    // The container carries the mask-active visual: a mask-colored border
    let border_color = if app.mask_mode() {
        scheme.mask
    } else {
        scheme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", truncate_to_width(&topic.title, area.width.saturating_sub(4) as usize)),
            Style::default().fg(scheme.primary).bold(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Content body
        ])
        .split(inner);

    render_detail_controls(frame, chunks[0], app, scheme);
    render_detail_body(frame, chunks[2], app, scheme);
}

/// The controls line: mode toggles and the back control.
fn render_detail_controls(frame: &mut Frame, area: Rect, app: &mut StudyApp, scheme: &ColorScheme) {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut x = area.x;

    let mask_group = toggle_indicator("mask", 'm', app.mask_mode(), scheme);
    let w = spans_width(&mask_group);
    app.push_hitbox(
        Rect { x, y: area.y, width: w, height: 1 },
        HitTarget::MaskToggle,
    );
    spans.extend(mask_group);
    x += w;

    let gap = Span::raw("   ");
    x += 3;
    spans.push(gap);

    let stealth_group = toggle_indicator("stealth", 's', app.stealth_mode(), scheme);
    let w = spans_width(&stealth_group);
    app.push_hitbox(
        Rect { x, y: area.y, width: w, height: 1 },
        HitTarget::StealthToggle,
    );
    spans.extend(stealth_group);
    x += w;

    x += 3;
    spans.push(Span::raw("   "));

    let back = Span::styled("← back to list", Style::default().fg(scheme.text_muted));
    let w = back.content.width() as u16;
    app.push_hitbox(Rect { x, y: area.y, width: w, height: 1 }, HitTarget::Back);
    spans.push(back);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The content body: text and memory spans, plus a trailing back control.
fn render_detail_body(frame: &mut Frame, area: Rect, app: &mut StudyApp, scheme: &ColorScheme) {
    let content = app.content().clone();
    let mask_mode = app.mask_mode();
    let cursor = app.span_cursor();

    let mut lines: Vec<Line> = Vec::with_capacity(content.lines().len() + 2);
    // (line index, x offset, width, ordinal) for every rendered span
    let mut span_cells: Vec<(usize, u16, u16, usize)> = Vec::new();

    for (line_idx, segments) in content.lines().iter().enumerate() {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut x_off: u16 = 0;

        for segment in segments {
            match segment {
                ContentSegment::Text(text) => {
                    let w = text.width() as u16;
                    spans.push(Span::styled(
                        text.clone(),
                        Style::default().fg(scheme.text),
                    ));
                    x_off += w;
                }
                ContentSegment::Memory { ordinal, text } => {
                    let hidden = app.is_span_hidden(*ordinal);
                    let rendered = if hidden { mask_blocks(text) } else { text.clone() };
                    let w = rendered.width() as u16;

                    let mut style = if hidden {
                        Style::default().fg(scheme.mask)
                    } else {
                        Style::default().fg(scheme.revealed).underlined()
                    };
                    if mask_mode && *ordinal == cursor {
                        style = style.bg(scheme.selection_bg);
                    }

                    spans.push(Span::styled(rendered, style));
                    span_cells.push((line_idx, x_off, w, *ordinal));
                    x_off += w;
                }
            }
        }

        lines.push(Line::from(spans));
    }

    // Trailing back control, as at the end of the original page
    lines.push(Line::default());
    let back_line_idx = lines.len();
    lines.push(Line::from(Span::styled(
        "← back to list",
        Style::default().fg(scheme.text_muted),
    )));

    // Clamp scrolling to the content
    let max_scroll = (lines.len() as u16).saturating_sub(area.height);
    app.clamp_detail_scroll(max_scroll);
    let scroll = app.detail_scroll();

    // Record hitboxes for the rows that are actually on screen
    for (line_idx, x_off, width, ordinal) in span_cells {
        if let Some(y) = visible_row(area, line_idx, scroll) {
            app.push_hitbox(
                Rect { x: area.x + x_off, y, width, height: 1 },
                HitTarget::Span(ordinal),
            );
        }
    }
    if let Some(y) = visible_row(area, back_line_idx, scroll) {
        app.push_hitbox(
            Rect { x: area.x, y, width: "← back to list".width() as u16, height: 1 },
            HitTarget::Back,
        );
    }

    let body = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(body, area);
}

/// Screen row of a content line under the given scroll, if visible.
fn visible_row(area: Rect, line_idx: usize, scroll: u16) -> Option<u16> {
    let line_idx = u16::try_from(line_idx).ok()?;
    if line_idx < scroll {
        return None;
    }
    let y = area.y + (line_idx - scroll);
    (y < area.y + area.height).then_some(y)
}

fn spans_width(spans: &[Span<'_>]) -> u16 {
    spans.iter().map(|s| s.content.width() as u16).sum()
}

// ============================================================================
// Status bar and footer
// ============================================================================

fn render_status_bar(frame: &mut Frame, area: Rect, app: &StudyApp, scheme: &ColorScheme) {
    if let Some(msg) = app.status_message() {
        let status = Paragraph::new(Span::styled(
            format!(" {msg}"),
            Style::default().fg(scheme.warning),
        ));
        frame.render_widget(status, area);
        return;
    }

    let mut spans = vec![Span::styled(
        format!(" {} topics", app.deck().len()),
        Style::default().fg(scheme.text_muted),
    )];

    if app.current_topic().is_some() {
        spans.push(Span::styled(" │ ", Style::default().fg(scheme.muted)));
        spans.push(Span::styled(
            format!(
                "spans {}/{} revealed",
                app.revealed_count(),
                app.content().span_count()
            ),
            Style::default().fg(scheme.text_muted),
        ));
        spans.push(Span::styled(" │ ", Style::default().fg(scheme.muted)));
        spans.push(Span::styled(
            if app.mask_mode() { "mask on" } else { "mask off" },
            Style::default().fg(if app.mask_mode() {
                scheme.mask
            } else {
                scheme.text_muted
            }),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &StudyApp, scheme: &ColorScheme) {
    let hints = if app.current_topic().is_some() {
        " m mask · s stealth · Tab/n next span · Enter reveal · Esc back · ? help · q quit"
    } else {
        " ↑↓ move · Enter open · ? help · q quit"
    };
    let footer = Paragraph::new(Span::styled(
        hints,
        Style::default().fg(scheme.muted),
    ));
    frame.render_widget(footer, area);
}

// ============================================================================
// Help overlay
// ============================================================================

fn render_help_overlay(frame: &mut Frame, area: Rect, scheme: &ColorScheme) {
    let popup = centered_rect(52, 15, area);
    frame.render_widget(Clear, popup);

    let key_style = Style::default().fg(scheme.accent);
    let text_style = Style::default().fg(scheme.text);
    let entry = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!("  {key:<12}"), key_style),
            Span::styled(desc.to_string(), text_style),
        ])
    };

    let lines = vec![
        entry("↑/↓, j/k", "move / scroll"),
        entry("Enter", "open topic / reveal span"),
        entry("Tab, n/p", "next / previous span"),
        entry("m", "toggle mask mode"),
        entry("s", "toggle stealth mode"),
        entry("Esc, b", "back to list"),
        entry("g/G", "first / last topic"),
        entry("?", "toggle this help"),
        entry("q", "quit"),
        Line::default(),
        Line::from(Span::styled(
            "  Click spans and rows with the mouse, too.",
            Style::default().fg(scheme.text_muted),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.border_focused))
            .title(Span::styled(" Help ", Style::default().fg(scheme.primary))),
    );
    frame.render_widget(help, popup);
}

/// A centered rect of fixed size, clamped to the frame.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
