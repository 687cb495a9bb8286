//! Shared drawing helpers for panels, popups and hint bars.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::common::truncate_with_ellipsis;

/// Centers a `width` x `height` box inside `area`, clamped to fit.
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Clears `area`, draws a titled border and returns the inner area.
pub fn render_popup(frame: &mut Frame, area: Rect, title: &str, border_color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = titled_block(title, border_color);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Bordered block with a bold title in `color`.
pub fn titled_block(title: &str, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Renders a centered line of keyboard hints.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint], highlight_color: Color) {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, area);
}

/// Configuration for a labelled single-line text field.
pub struct InputLine<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub focused: bool,
}

/// Renders `label: value█`, or the placeholder when empty.
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let label_color = if input.focused { Color::Cyan } else { Color::Gray };
    let prefix = format!("{:<10}", input.label);
    let max_text_width = (area.width as usize).saturating_sub(prefix.len() + 1);

    let mut spans = vec![Span::styled(prefix, Style::default().fg(label_color))];
    if input.value.is_empty() {
        if input.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        if let Some(placeholder) = input.placeholder {
            spans.push(Span::styled(
                truncate_with_ellipsis(placeholder, max_text_width),
                Style::default().fg(Color::DarkGray),
            ));
        }
    } else {
        spans.push(Span::styled(
            truncate_with_ellipsis(input.value, max_text_width),
            Style::default().fg(Color::White),
        ));
        if input.focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Yellow marker appended to titles of sections showing fixture rows.
pub fn sample_badge() -> Span<'static> {
    Span::styled(" sample data ", Style::default().fg(Color::Black).bg(Color::Yellow))
}
