use super::{Screen, ScreenAction};
use crate::config::ScreenKind;
use crate::feeds::User;
use crate::ui::border_style;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTab {
    Photos,
    Saved,
}

impl ProfileTab {
    fn label(self) -> &'static str {
        match self {
            ProfileTab::Photos => "Photos",
            ProfileTab::Saved => "Saved",
        }
    }

    fn toggled(self) -> Self {
        match self {
            ProfileTab::Photos => ProfileTab::Saved,
            ProfileTab::Saved => ProfileTab::Photos,
        }
    }
}

pub struct ProfileScreen {
    user: User,
    tab: ProfileTab,
}

impl ProfileScreen {
    pub fn new(user: User) -> Self {
        Self {
            user,
            tab: ProfileTab::Photos,
        }
    }

    pub fn tab(&self) -> ProfileTab {
        self.tab
    }
}

impl Screen for ProfileScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Profile
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        let mut name_line = vec![Span::styled(
            self.user.name.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )];
        if self.user.is_photographer {
            name_line.push(Span::styled(
                "  Photographer",
                Style::default().fg(Color::Blue),
            ));
        }

        let header = vec![
            Line::from(name_line),
            Line::from(Span::styled(
                self.user.email.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(self.user.bio.clone().unwrap_or_default()),
            Line::from(vec![
                Span::styled(
                    format!("{}", self.user.following.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Following   "),
                Span::styled(
                    format!("{}", self.user.followers.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" Followers"),
            ]),
            Line::from(Span::styled(
                "[e] Edit Profile",
                Style::default().fg(Color::Cyan),
            )),
        ];
        frame.render_widget(
            Paragraph::new(header).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(true))
                    .title(" Profile "),
            ),
            chunks[0],
        );

        let tabs = Tabs::new(vec![ProfileTab::Photos.label(), ProfileTab::Saved.label()])
            .block(Block::default().borders(Borders::ALL))
            .select(match self.tab {
                ProfileTab::Photos => 0,
                ProfileTab::Saved => 1,
            })
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, chunks[1]);

        let empty = Paragraph::new(format!("No {} yet", self.tab.label().to_lowercase()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Left | KeyCode::Right => self.tab = self.tab.toggled(),
            KeyCode::Char('p') => self.tab = ProfileTab::Photos,
            KeyCode::Char('s') => self.tab = ProfileTab::Saved,
            KeyCode::Char('e') => {
                return ScreenAction::Status("Profile editing is not available".to_string())
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn scroll_up(&mut self) {}

    fn scroll_down(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::fixture::builtin_fixture;
    use crate::ui::screens::test_support::{ch, key, render_to_string};

    #[test]
    fn test_render_counts_and_empty_state() {
        let screen = ProfileScreen::new(builtin_fixture().current_user);
        let rendered = render_to_string(&screen, 80, 20);
        assert!(rendered.contains("John Doe"));
        assert!(rendered.contains("john@example.com"));
        assert!(rendered.contains("2 Following"));
        assert!(rendered.contains("1 Followers"));
        assert!(rendered.contains("No photos yet"));
    }

    #[test]
    fn test_tab_switching() {
        let mut screen = ProfileScreen::new(builtin_fixture().current_user);
        screen.handle_key(key(KeyCode::Right));
        assert_eq!(screen.tab(), ProfileTab::Saved);
        assert!(render_to_string(&screen, 80, 20).contains("No saved yet"));

        screen.handle_key(ch('p'));
        assert_eq!(screen.tab(), ProfileTab::Photos);
        screen.handle_key(key(KeyCode::Left));
        assert_eq!(screen.tab(), ProfileTab::Saved);
    }
}
