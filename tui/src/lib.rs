//! TUI rendering for quip using ratatui.

mod input;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Palette, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use quip_engine::{App, Control, InputMode, PageView, ViewBody};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette(app.ui_options());
    let view = app.view();

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Page
            Constraint::Length(3), // Address / hints
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, &view, chunks[0], &palette);
    draw_page(frame, app, &view, chunks[1], &palette);
    draw_footer(frame, app, chunks[2], &palette);
    draw_status_bar(frame, app, chunks[3], &palette);
}

fn draw_header(frame: &mut Frame, app: &App, view: &PageView, area: Rect, palette: &Palette) {
    let name = format!(" {} ", app.app_title());
    let title = format!(" {}", view.title);
    let budget = usize::from(area.width).saturating_sub(name.width() + title.width() + 3);
    let path = truncate_to_width(&view.path, budget);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(name, styles::title(palette)),
        Span::styled(" ", Style::default()),
        Span::styled(path, Style::default().fg(palette.text_secondary)),
        Span::styled(" │", Style::default().fg(palette.bg_border)),
        Span::styled(title, Style::default().fg(palette.text_primary)),
    ]));
    frame.render_widget(header, area);
}

fn draw_page(frame: &mut Frame, app: &App, view: &PageView, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1));

    let mut lines: Vec<Line> = Vec::new();
    if let Some(heading) = view.heading {
        lines.push(Line::from(Span::styled(heading, styles::heading(palette))));
        lines.push(Line::from(""));
    }
    lines.extend(body_lines(&view.body, app.tick_count(), palette));

    let page = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(page, area);
}

fn body_lines(body: &ViewBody, tick: usize, palette: &Palette) -> Vec<Line<'static>> {
    let text = Style::default().fg(palette.text_primary);
    let muted = Style::default().fg(palette.text_muted);

    match body {
        ViewBody::Counter { count } => vec![
            Line::from(Span::styled(format!("Counter: {count}"), text)),
            Line::from(""),
            button_line(Control::IncreaseMe, palette),
        ],
        ViewBody::Loading => vec![Line::from(Span::styled(
            format!("{} Loading...", spinner_frame(tick)),
            Style::default().fg(palette.primary),
        ))],
        ViewBody::Joke {
            text: joke,
            cached,
            fresh_for,
        } => {
            let freshness = match (cached, fresh_for) {
                (_, None) => "not cached".to_string(),
                (true, Some(left)) => format!("cached, fresh for {}s", left.as_secs()),
                (false, Some(left)) => format!("fetched, fresh for {}s", left.as_secs()),
            };
            vec![
                Line::from(Span::styled(joke.clone(), text)),
                Line::from(""),
                Line::from(Span::styled(freshness, muted)),
            ]
        }
        ViewBody::Post { id } => vec![Line::from(vec![
            Span::styled("POST ID: ", muted),
            Span::styled(id.clone(), text.add_modifier(Modifier::BOLD)),
        ])],
        ViewBody::Failed => vec![
            Line::from(Span::styled(
                "Something went wrong",
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            button_line(Control::TryAgain, palette),
        ],
        ViewBody::NotFound { path } => vec![
            Line::from(vec![
                Span::styled(
                    "404",
                    Style::default()
                        .fg(palette.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" │ ", Style::default().fg(palette.bg_border)),
                Span::styled("This page could not be found.", text),
            ]),
            Line::from(Span::styled(path.clone(), muted)),
        ],
    }
}

fn button_line(control: Control, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {} ", control.label()), styles::button(palette)),
        Span::styled("  Enter", styles::key_highlight(palette)),
    ])
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let (mode, mode_style, border) = match app.input_mode() {
        InputMode::Normal => (" NORMAL ", styles::mode_normal(palette), palette.bg_border),
        InputMode::Navigate => (" GO TO ", styles::mode_navigate(palette), palette.warning),
    };

    let content = match app.address_text() {
        Some(address) => Line::from(vec![
            Span::styled(address.to_string(), Style::default().fg(palette.text_primary)),
            Span::styled("█", Style::default().fg(palette.warning)),
        ]),
        None => key_hints(palette),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(mode, mode_style))
        .title_alignment(Alignment::Left);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn key_hints(palette: &Palette) -> Line<'static> {
    const HINTS: &[(&str, &str)] = &[
        ("Enter", "activate"),
        ("g", "go to"),
        ("h", "home"),
        ("j", "jokes"),
        ("⌫", "back"),
        ("r", "reload"),
        ("q", "quit"),
    ];

    let mut spans = Vec::with_capacity(HINTS.len() * 3);
    for (i, (key, action)) in HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", styles::key_hint(palette)));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }
    Line::from(spans)
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let (status_text, status_style) = if let Some(msg) = app.status_message() {
        (msg.to_string(), Style::default().fg(palette.text_secondary))
    } else if app.is_loading() {
        (
            format!("{} Fetching...", spinner_frame(app.tick_count())),
            Style::default().fg(palette.primary),
        )
    } else {
        ("● Ready".to_string(), Style::default().fg(palette.success))
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(status_text, status_style),
    ]));
    frame.render_widget(status, area);
}

/// Cut `text` to at most `max_width` columns, marking the cut with `…`.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
