use crate::core::app::App;
use crate::core::check::Suggestion;
use crate::core::constants::{
    APP_TITLE, SUGGESTIONS_HEADING, TRIGGER_BUSY_LABEL, TRIGGER_IDLE_LABEL,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn ui(f: &mut Frame, app: &App) {
    let suggestions = app.check.suggestions();

    let mut constraints = vec![
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(3),
    ];
    if !suggestions.is_empty() {
        constraints.push(Constraint::Percentage(50));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let title = Line::from(vec![
        Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" v{} • {}", env!("CARGO_PKG_VERSION"), app.language),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    f.render_widget(app.ui.textarea(), chunks[1]);

    render_trigger(f, chunks[2], app.check.is_busy(), app.can_trigger_check());

    if !suggestions.is_empty() {
        let list = Paragraph::new(build_suggestion_lines(suggestions))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(SUGGESTIONS_HEADING),
            )
            .wrap(Wrap { trim: false })
            .scroll((app.ui.suggestion_scroll, 0));
        f.render_widget(list, chunks[3]);
    }

    if let Some(message) = app.ui.alert() {
        render_alert(f, message);
    }
}

pub fn trigger_label(busy: bool) -> &'static str {
    if busy {
        TRIGGER_BUSY_LABEL
    } else {
        TRIGGER_IDLE_LABEL
    }
}

fn render_trigger(f: &mut Frame, area: Rect, busy: bool, enabled: bool) {
    let style = if enabled {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let button = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", trigger_label(busy)),
        style,
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

/// One entry per suggestion: the message, then the joined replacements when
/// there are any.
pub fn build_suggestion_lines(suggestions: &[Suggestion]) -> Vec<Line<'static>> {
    let error_style = Style::default().fg(Color::Red);
    let fix_style = Style::default().fg(Color::Green);
    let mut lines = Vec::new();

    for (index, suggestion) in suggestions.iter().enumerate() {
        if index > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(vec![
            Span::styled("Error: ", error_style.add_modifier(Modifier::BOLD)),
            Span::styled(suggestion.message.clone(), error_style),
        ]));
        if let Some(summary) = suggestion.replacement_summary() {
            lines.push(Line::from(vec![
                Span::styled("Suggestion: ", fix_style.add_modifier(Modifier::BOLD)),
                Span::styled(summary, fix_style),
            ]));
        }
    }

    lines
}

fn render_alert(f: &mut Frame, message: &str) {
    const HINT: &str = "Press Enter to dismiss";
    let area = f.area();
    let content_width = message.width().max(HINT.width()) as u16 + 4;
    let width = content_width.min(area.width.saturating_sub(2)).max(1);
    let height = 6_u16.min(area.height);
    let popup = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let body = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(HINT, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    );

    f.render_widget(Clear, popup);
    f.render_widget(body, popup);
}
