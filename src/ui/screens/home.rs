use super::{step_selection, Screen, ScreenAction};
use crate::config::ScreenKind;
use crate::feeds::{FixtureData, Photographer};
use crate::interactions::InteractionTracker;
use crate::ui::{border_style, center_rect, modal_frame};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

/// The photographer feed. Owns the session's [`InteractionTracker`].
pub struct HomeScreen {
    data: Arc<FixtureData>,
    tracker: InteractionTracker,
    list_state: ListState,
    composing: bool,
}

impl HomeScreen {
    pub fn new(data: Arc<FixtureData>) -> Self {
        let mut list_state = ListState::default();
        if !data.photographers.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            data,
            tracker: InteractionTracker::new(),
            list_state,
            composing: false,
        }
    }

    pub fn tracker(&self) -> &InteractionTracker {
        &self.tracker
    }

    fn photographers(&self) -> &[Photographer] {
        &self.data.photographers
    }

    fn selected(&self) -> Option<&Photographer> {
        self.list_state
            .selected()
            .and_then(|i| self.photographers().get(i))
    }

    fn selected_id(&self) -> Option<String> {
        self.selected().map(|p| p.id.clone())
    }

    /// Moves the selection to the card with `id`, if it exists.
    pub fn focus(&mut self, id: &str) {
        if let Some(index) = self.photographers().iter().position(|p| p.id == id) {
            self.composing = false;
            self.list_state.select(Some(index));
        }
    }

    fn handle_hire_dialog_key(&mut self, key: KeyEvent) -> ScreenAction {
        let target = self
            .tracker
            .hire()
            .selected_item_id()
            .map(|id| id.to_string());
        match key.code {
            KeyCode::Char('c') => {
                self.tracker.close_hire_dialog();
                target.map_or(ScreenAction::None, ScreenAction::OpenChat)
            }
            KeyCode::Char('b') | KeyCode::Enter | KeyCode::Esc => {
                self.tracker.close_hire_dialog();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn handle_compose_key(&mut self, id: &str, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Char(c) => self.tracker.push_draft_char(c),
            KeyCode::Backspace => self.tracker.pop_draft_char(),
            KeyCode::Enter => self.tracker.submit_draft(id),
            KeyCode::Esc => self.composing = false,
            _ => {}
        }
        ScreenAction::None
    }
}

impl Screen for HomeScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Home
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(true))
            .title(" Feed ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        if self.photographers().is_empty() {
            frame.render_widget(Paragraph::new("No photographers to show"), chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .photographers()
                .iter()
                .map(|p| ListItem::new(self.card_lines(p)))
                .collect();

            let list = List::new(items)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("▌");
            let mut state = self.list_state.clone();
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        let help = if self.composing {
            "Type a comment | Enter: post | Esc: done"
        } else {
            "↑↓: select | l: like | c: comments | i: write | h: hire | s: share | o: open image"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
            chunks[1],
        );

        if let Some(target) = self.tracker.hire_target(self.photographers()) {
            self.render_hire_dialog(frame, area, target);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if self.tracker.hire().is_open() {
            return self.handle_hire_dialog_key(key);
        }

        let Some(id) = self.selected_id() else {
            return ScreenAction::None;
        };

        if self.composing {
            return self.handle_compose_key(&id, key);
        }

        match key.code {
            KeyCode::Char('l') => self.tracker.toggle_like(&id),
            KeyCode::Char('c') => self.tracker.toggle_comments_visible(&id),
            KeyCode::Char('i') => {
                if self.tracker.comments_visible(&id) {
                    self.composing = true;
                } else {
                    return ScreenAction::Status("Open comments with 'c' first".to_string());
                }
            }
            KeyCode::Char('h') | KeyCode::Enter => self.tracker.select_for_hire(&id),
            KeyCode::Char('s') => {
                if let Some(p) = self.selected() {
                    return ScreenAction::Status(format!("Sharing {}'s profile", p.name));
                }
            }
            KeyCode::Char('o') => {
                if let Some(url) = self.selected().and_then(|p| p.images.first()) {
                    return ScreenAction::OpenUrl(url.clone());
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn scroll_up(&mut self) {
        if self.composing || self.tracker.hire().is_open() {
            return;
        }
        let len = self.photographers().len();
        if let Some(selected) = self.list_state.selected() {
            self.list_state
                .select(Some(step_selection(selected, len, false)));
        }
    }

    fn scroll_down(&mut self) {
        if self.composing || self.tracker.hire().is_open() {
            return;
        }
        let len = self.photographers().len();
        if let Some(selected) = self.list_state.selected() {
            self.list_state
                .select(Some(step_selection(selected, len, true)));
        }
    }

    fn captures_input(&self) -> bool {
        self.composing || self.tracker.hire().is_open()
    }
}

impl HomeScreen {
    fn card_lines(&self, p: &Photographer) -> Vec<Line<'static>> {
        let liked = self.tracker.is_liked(&p.id);
        let mut lines = Vec::new();

        let mut header = vec![Span::styled(
            p.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if p.is_verified {
            header.push(Span::styled(" ✔", Style::default().fg(Color::Blue)));
        }
        header.push(Span::styled(
            format!("  {}", p.location),
            Style::default().fg(Color::DarkGray),
        ));
        header.push(Span::styled(
            format!("  [{}]", p.price),
            Style::default().fg(Color::Green),
        ));
        lines.push(Line::from(header));

        lines.push(Line::from(vec![
            Span::raw(format!("  {}", p.specialty)),
            Span::styled(
                format!("  ★ {:.1} ({} reviews)", p.rating, p.reviews),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  {} photos", p.images.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        let (heart, heart_style) = if liked {
            ("♥", Style::default().fg(Color::Red))
        } else {
            ("♡", Style::default().fg(Color::White))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", heart), heart_style),
            Span::styled(
                format!("{} likes", self.tracker.effective_likes(p)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} comments", p.comments),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        if self.tracker.comments_visible(&p.id) {
            for (i, comment) in self.tracker.comments(&p.id).iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("    User {} ", i + 1),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(comment.clone()),
                ]));
            }

            let is_target = self.composing && self.selected().is_some_and(|s| s.id == p.id);
            let input = if is_target {
                Line::from(vec![
                    Span::styled("    > ", Style::default().fg(Color::Cyan)),
                    Span::raw(self.tracker.draft().to_string()),
                    Span::styled("_", Style::default().fg(Color::Cyan)),
                ])
            } else {
                Line::from(Span::styled(
                    "    Add a comment... (i)",
                    Style::default().fg(Color::DarkGray),
                ))
            };
            lines.push(input);
        }

        lines.push(Line::from(""));
        lines
    }

    fn render_hire_dialog(&self, frame: &mut Frame, area: Rect, p: &Photographer) {
        let modal_area = center_rect(60, 60, area);
        let inner = modal_frame(frame, modal_area, "Hire Photographer");

        let mut text = vec![
            Line::from(Span::styled(
                p.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                p.specialty.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                p.price.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        let width = inner.width.saturating_sub(1).max(10) as usize;
        for line in textwrap::wrap(&p.about, width) {
            text.push(Line::from(line.into_owned()));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("[c] ", Style::default().fg(Color::Cyan)),
            Span::raw("Chat with Photographer"),
        ]));
        text.push(Line::from(vec![
            Span::styled("[b] ", Style::default().fg(Color::Cyan)),
            Span::raw("Book Now"),
        ]));
        text.push(Line::from(Span::styled(
            "Esc to close",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::fixture::builtin_fixture;
    use crate::ui::screens::test_support::{ch, key, render_to_string};

    fn screen() -> HomeScreen {
        HomeScreen::new(Arc::new(builtin_fixture()))
    }

    fn type_text(screen: &mut HomeScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(ch(c));
        }
    }

    #[test]
    fn test_like_key_updates_rendered_count() {
        let mut screen = screen();
        assert!(render_to_string(&screen, 100, 30).contains("1234 likes"));

        screen.handle_key(ch('l'));
        assert!(render_to_string(&screen, 100, 30).contains("1235 likes"));

        screen.handle_key(ch('l'));
        assert!(render_to_string(&screen, 100, 30).contains("1234 likes"));
    }

    #[test]
    fn test_scroll_selects_next_card() {
        let mut screen = screen();
        screen.scroll_down();
        screen.handle_key(ch('l'));
        assert!(screen.tracker().is_liked("2"));
        assert!(!screen.tracker().is_liked("1"));

        screen.scroll_down();
        assert_eq!(screen.selected_id().as_deref(), Some("2"));
    }

    #[test]
    fn test_compose_requires_visible_comments() {
        let mut screen = screen();
        let action = screen.handle_key(ch('i'));
        assert!(matches!(action, ScreenAction::Status(_)));
        assert!(!screen.captures_input());
    }

    #[test]
    fn test_compose_and_post_comment() {
        let mut screen = screen();
        screen.handle_key(ch('c'));
        screen.handle_key(ch('i'));
        assert!(screen.captures_input());

        // 'l' and 'q' are text while composing
        type_text(&mut screen, "lovely q");
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.tracker().comments("1"), ["lovely q"]);
        assert!(!screen.tracker().is_liked("1"));
        assert_eq!(screen.tracker().draft(), "");

        type_text(&mut screen, "   ");
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.tracker().comments("1").len(), 1);

        screen.handle_key(key(KeyCode::Esc));
        assert!(!screen.captures_input());

        let rendered = render_to_string(&screen, 100, 30);
        assert!(rendered.contains("User 1 lovely q"));
    }

    #[test]
    fn test_hire_dialog_open_and_close() {
        let mut screen = screen();
        screen.handle_key(ch('h'));
        assert!(screen.captures_input());
        let rendered = render_to_string(&screen, 100, 30);
        assert!(rendered.contains("Hire Photographer"));
        assert!(rendered.contains("$200/hr"));

        // keys other than the dialog's own are swallowed
        screen.handle_key(ch('l'));
        assert!(!screen.tracker().is_liked("1"));

        screen.handle_key(key(KeyCode::Esc));
        assert!(!screen.tracker().hire().is_open());
        assert_eq!(screen.tracker().hire().selected_item_id(), Some("1"));
        assert!(!render_to_string(&screen, 100, 30).contains("Hire Photographer"));
    }

    #[test]
    fn test_hire_chat_opens_conversation() {
        let mut screen = screen();
        screen.scroll_down();
        screen.handle_key(ch('h'));
        let action = screen.handle_key(ch('c'));
        assert_eq!(action, ScreenAction::OpenChat("2".to_string()));
        assert!(!screen.tracker().hire().is_open());
    }

    #[test]
    fn test_share_and_open_actions() {
        let mut screen = screen();
        assert_eq!(
            screen.handle_key(ch('s')),
            ScreenAction::Status("Sharing Sarah Johnson's profile".to_string())
        );
        match screen.handle_key(ch('o')) {
            ScreenAction::OpenUrl(url) => assert!(url.contains("seed=456")),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_focus_selects_card() {
        let mut screen = screen();
        screen.focus("2");
        assert_eq!(screen.selected_id().as_deref(), Some("2"));
        screen.focus("missing");
        assert_eq!(screen.selected_id().as_deref(), Some("2"));
    }
}
