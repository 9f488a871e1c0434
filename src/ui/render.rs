use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Gauge, Paragraph},
};

use crate::ui::app::{App, SHORTCUTS, Status};

pub fn draw(frame: &mut Frame, app: &App) {
    let [info, progress, buttons, help, _] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let (text, color) = match &app.status {
        Status::Loading => ("Loading...".to_string(), Color::Yellow),
        Status::Track(line) => (line.clone(), Color::Green),
        Status::Error(msg) => (msg.clone(), Color::Red),
    };
    frame.render_widget(
        Paragraph::new(Line::from(text).style(Style::default().fg(color)))
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" sporltui ")),
        info,
    );

    if let Some(ratio) = app.progress_ratio() {
        frame.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(ratio)
                .label(""),
            progress,
        );
    }

    let play_label = if app.is_playing() {
        "⏸ Pause (p)"
    } else {
        "▶ Play (p)"
    };
    let [prev, play, next] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(buttons);
    for (label, area) in [("◀ Previous (b)", prev), (play_label, play), ("Next ▶ (n)", next)] {
        frame.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::bordered()),
            area,
        );
    }

    frame.render_widget(
        Paragraph::new(SHORTCUTS)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        help,
    );
}
