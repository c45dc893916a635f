//! Rendering for the riddle TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, OutputView};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(6), // form
            Constraint::Min(5),    // output
            Constraint::Length(1), // status
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_output(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "🐢 海龟汤谜题生成器",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  ←/→ 选择  Tab 切换  Enter 生成  Esc 退出"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let selector_line = |label: &str, value: &str, focused: bool| {
        let value_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(format!("◀ {value} ▶"), value_style),
        ])
    };

    let key_display = if app.key_input().is_empty() {
        Span::styled("（未配置）", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.key_input().to_string())
    };
    let mut key_spans = vec![Span::raw("API Key: "), key_display];
    if app.focus == Focus::ApiKey {
        key_spans.push(Span::styled("▎", Style::default().fg(Color::Yellow)));
        key_spans.push(Span::styled(
            "  (Enter 保存)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.key_saved_feedback() {
        key_spans.push(Span::styled(
            "  ✅ 已保存",
            Style::default().fg(Color::Green),
        ));
    }

    let lines = vec![
        selector_line(
            "谜题类型",
            app.selected_category().label(),
            app.focus == Focus::Category,
        ),
        selector_line("背景设定", app.selected_era().label(), app.focus == Focus::Era),
        selector_line(
            "复杂度",
            app.selected_difficulty().label(),
            app.focus == Focus::Difficulty,
        ),
        Line::from(key_spans),
    ];

    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("设置"));
    frame.render_widget(form, area);
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.display.view() {
        OutputView::Hidden => (
            "按 Enter 生成海龟汤谜题".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        OutputView::Loading => (
            "🤖 MiniMax-M2 正在创作海龟汤...".to_string(),
            Style::default().fg(Color::Cyan),
        ),
        OutputView::Content(content) => (content, Style::default()),
    };

    let output = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("谜题"));
    frame.render_widget(output, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.generating {
        "🤖 MiniMax-M2 正在创作海龟汤..."
    } else {
        app.status_message().unwrap_or("")
    };
    let status = Paragraph::new(message).style(Style::default().fg(Color::Gray));
    frame.render_widget(status, area);
}
