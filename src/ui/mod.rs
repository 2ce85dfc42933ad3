mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup};
use crate::convert::Base;
use crate::theme::Theme;
use components::{centered_rect, field_block};

// Resolved once from config at startup
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme before the first draw; later calls are ignored
pub fn init_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn danger() -> Color { theme().danger }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Length(3), // Base selector
            Constraint::Length(3), // Number input
            Constraint::Length(3), // Convert button
            Constraint::Length(5), // Converted values (three targets)
            Constraint::Min(3),    // Explanation
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_base_selector(f, app, chunks[1]);
    draw_input(f, app, chunks[2]);
    draw_convert_button(f, app, chunks[3]);
    draw_results(f, app, chunks[4]);
    draw_explanation(f, app, chunks[5]);
    draw_footer(f, app, chunks[6]);

    // Draw popups on top
    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(accent())))
    } else {
        Line::from(vec![
            Span::styled("Number Converter", Style::default().fg(header()).add_modifier(Modifier::BOLD)),
            Span::styled(" │ ", Style::default().fg(text_dim())),
            Span::styled(format!("from {}", app.base), Style::default().fg(text_dim())),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_base_selector(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.field == Field::BaseSelector && app.popup == Popup::None;
    let block = field_block("Numbering System", focused, accent(), inactive());

    let mut spans = vec![Span::raw(" ")];
    for (i, base) in Base::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        let style = if *base == app.base {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(text_dim())
        };
        spans.push(Span::styled(format!(" {} ", base.label()), style));
    }

    let selector = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(selector, area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.is_typing();
    let block = field_block("Number", focused, accent(), inactive());

    let cursor = if focused { "_" } else { "" };
    let line = if app.input.is_empty() && !focused {
        Line::from(Span::styled(
            format!("Enter a {} number", app.base),
            Style::default().fg(text_dim()),
        ))
    } else {
        Line::from(vec![
            Span::styled(app.input.as_str(), Style::default().fg(text())),
            Span::styled(cursor, Style::default().fg(accent())),
        ])
    };

    // Keep the tail (and cursor) visible when the number is wider than the box
    let inner_width = area.width.saturating_sub(2) as usize;
    let overflow = (app.input.chars().count() + cursor.len()).saturating_sub(inner_width);

    let input = Paragraph::new(line)
        .scroll((0, overflow.min(u16::MAX as usize) as u16))
        .block(block);
    f.render_widget(input, area);
}

fn draw_convert_button(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.field == Field::ConvertButton && app.popup == Popup::None;
    let style = if focused {
        Style::default().bg(bg_selected()).fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(text())
    };

    let button = Paragraph::new(Line::from(Span::styled("[ Convert ]", style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused { accent() } else { inactive() })),
        );
    f.render_widget(button, area);
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    let block = field_block("Converted Values", false, accent(), inactive());

    let lines: Vec<Line> = match &app.result {
        Some(result) => result
            .conversions
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(format!(" {}: ", c.base), Style::default().fg(header()).add_modifier(Modifier::BOLD)),
                    Span::styled(c.digits.as_str(), Style::default().fg(success())),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(" -", Style::default().fg(text_dim())))],
    };

    let results = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(results, area);
}

fn draw_explanation(f: &mut Frame, app: &App, area: Rect) {
    let block = field_block("Explanation", false, accent(), inactive());

    let color = if app.error { danger() } else { text() };
    let lines: Vec<Line> = app
        .explanation
        .lines()
        .map(|line| Line::styled(format!(" {}", line), Style::default().fg(color)))
        .collect();

    let explanation = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(explanation, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.field {
        Field::BaseSelector => &[("←/→", "base"), ("b/d/o/x", "pick"), ("Tab", "next"), ("Enter", "convert"), ("?", "help"), ("q", "quit")],
        Field::Input => &[("Enter", "convert"), ("Esc", "clear"), ("Tab", "next"), ("F1", "help"), ("Ctrl-C", "quit")],
        Field::ConvertButton => &[("Space/Enter", "convert"), ("Tab", "next"), ("?", "help"), ("q", "quit")],
    };

    let mut spans = Vec::new();
    for (i, (keys, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(inactive())));
        }
        spans.push(Span::styled(*keys, Style::default().fg(accent())));
        spans.push(Span::styled(format!(" {}", action), Style::default().fg(text_dim())));
    }

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 30 { 95 } else { 75 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let key_line = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().fg(accent())),
            Span::raw(desc),
        ])
    };
    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        key_line("  Tab/S-Tab   ", "Move between selector, number and button"),
        key_line("  Enter       ", "Convert from any field"),
        Line::from(""),
        section("═══ Numbering System ═══"),
        key_line("  ←/→ h/l     ", "Previous/next base"),
        key_line("  b d o x     ", "Binary, decimal, octal, hexadecimal"),
        Line::from(""),
        section("═══ Number ═══"),
        key_line("  Backspace   ", "Delete last digit"),
        key_line("  Esc/Ctrl-U  ", "Clear the field"),
        Line::from(vec![Span::raw("              Leading zeros are allowed")]),
        Line::from(vec![Span::raw("              Hexadecimal accepts a-f and A-F")]),
        Line::from(""),
        section("═══ One-shot ═══"),
        key_line("  radixform -b hex FF        ", "Print the explanation"),
        key_line("  radixform -b bin 1010 --json", " JSON output"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("?", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("F1", Style::default().fg(accent())),
            Span::styled("/", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" radixform Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}
