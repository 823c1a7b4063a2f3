use super::{step_selection, Screen, ScreenAction};
use crate::config::ScreenKind;
use crate::feeds::{FixtureData, Photographer};
use crate::ui::border_style;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

/// One chat row per photographer. There is no message transport behind it.
pub struct MessagesScreen {
    data: Arc<FixtureData>,
    list_state: ListState,
    open_chat: Option<String>,
}

impl MessagesScreen {
    pub fn new(data: Arc<FixtureData>) -> Self {
        let mut list_state = ListState::default();
        if !data.photographers.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            data,
            list_state,
            open_chat: None,
        }
    }

    pub fn open_chat(&self) -> Option<&str> {
        self.open_chat.as_deref()
    }

    /// Opens the conversation pane for `id` and moves the list cursor onto it.
    pub fn select_chat(&mut self, id: &str) {
        if let Some(index) = self.data.photographers.iter().position(|p| p.id == id) {
            self.list_state.select(Some(index));
            self.open_chat = Some(id.to_string());
        }
    }

    fn chat_partner(&self) -> Option<&Photographer> {
        let id = self.open_chat.as_deref()?;
        self.data.photographers.iter().find(|p| p.id == id)
    }

    fn render_conversation(&self, frame: &mut Frame, area: Rect) {
        let Some(partner) = self.chat_partner() else {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(false));
            let hint = Paragraph::new("Select a chat and press Enter")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(hint, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(true))
            .title(format!(" {} ", partner.name));

        let text = vec![
            Line::from(Span::styled(
                format!("{} | {}", partner.specialty, partner.price),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(format!("No messages yet. Say hello to {}!", partner.name)),
            Line::from(""),
            Line::from(Span::styled(
                "Messaging is not connected in this build.",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Esc to close",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }
}

impl Screen for MessagesScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Messages
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(self.open_chat.is_none()))
            .title(" Messages ");

        let items: Vec<ListItem> = self
            .data
            .photographers
            .iter()
            .map(|p| {
                let name_line = Line::from(vec![
                    Span::styled(
                        p.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("  Now", Style::default().fg(Color::DarkGray)),
                ]);
                let preview = Line::from(Span::styled(
                    "Click to start chatting...",
                    Style::default().fg(Color::Gray),
                ));
                ListItem::new(vec![name_line, preview, Line::from("")])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[0], &mut state);

        self.render_conversation(frame, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => {
                if let Some(id) = self
                    .list_state
                    .selected()
                    .and_then(|i| self.data.photographers.get(i))
                    .map(|p| p.id.clone())
                {
                    self.open_chat = Some(id);
                }
            }
            KeyCode::Esc => self.open_chat = None,
            _ => {}
        }
        ScreenAction::None
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.list_state.selected() {
            let len = self.data.photographers.len();
            self.list_state
                .select(Some(step_selection(selected, len, false)));
        }
    }

    fn scroll_down(&mut self) {
        if let Some(selected) = self.list_state.selected() {
            let len = self.data.photographers.len();
            self.list_state.select(Some(step_selection(selected, len, true)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::fixture::builtin_fixture;
    use crate::ui::screens::test_support::{key, render_to_string};

    #[test]
    fn test_enter_opens_selected_chat() {
        let mut screen = MessagesScreen::new(Arc::new(builtin_fixture()));
        assert!(screen.open_chat().is_none());

        screen.scroll_down();
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.open_chat(), Some("2"));

        let rendered = render_to_string(&screen, 100, 20);
        assert!(rendered.contains("Say hello to Marcus Chen"));

        screen.handle_key(key(KeyCode::Esc));
        assert!(screen.open_chat().is_none());
    }

    #[test]
    fn test_select_chat_ignores_unknown_id() {
        let mut screen = MessagesScreen::new(Arc::new(builtin_fixture()));
        screen.select_chat("42");
        assert!(screen.open_chat().is_none());
        screen.select_chat("1");
        assert_eq!(screen.open_chat(), Some("1"));
    }

    #[test]
    fn test_render_lists_every_photographer() {
        let screen = MessagesScreen::new(Arc::new(builtin_fixture()));
        let rendered = render_to_string(&screen, 100, 20);
        assert!(rendered.contains("Sarah Johnson"));
        assert!(rendered.contains("Marcus Chen"));
        assert!(rendered.contains("Click to start chatting..."));
    }
}
