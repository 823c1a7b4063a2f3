pub mod screens;

use crate::app::App;
use crate::config::ScreenKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if app.dark_mode() {
        frame.render_widget(
            Block::default().style(Style::default().bg(Color::Black).fg(Color::Gray)),
            area,
        );
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(frame, chunks[0], app.current());
    app.active_screen().render(frame, chunks[1]);
    render_status_bar(frame, chunks[2], app.status());
}

fn render_tabs(frame: &mut Frame, area: Rect, current: ScreenKind) {
    let titles: Vec<Line> = ScreenKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| Line::from(format!("{} {}", i + 1, kind.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" shutterfeed "),
        )
        .select(current.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, status: Option<&str>) {
    let line = match status {
        Some(msg) => Line::from(Span::styled(msg, Style::default().fg(Color::Yellow))),
        None => Line::from(Span::styled(
            "Tab/1-5: switch screen | q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub fn center_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Clears `area` and draws a bordered modal frame, returning the inner area.
pub fn modal_frame(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = center_rect(60, 50, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 10);
    }
}
