use super::{step_selection, Screen, ScreenAction};
use crate::config::{NotificationsConfig, ScreenKind, SettingsConfig};
use crate::ui::{border_style, center_rect, modal_frame};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub const LANGUAGES: [&str; 5] = ["English", "Spanish", "French", "German", "Chinese"];
pub const CURRENCIES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "CNY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Private,
    DarkMode,
    NotifyMessages,
    NotifyLikes,
    NotifyComments,
    NotifyMentions,
    NotifyBookings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Select {
    Language,
    Currency,
}

impl Select {
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Select::Language => &LANGUAGES,
            Select::Currency => &CURRENCIES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Action,
    Toggle(Toggle),
    Select(Select),
    LogOut,
}

struct SettingItem {
    label: &'static str,
    kind: ItemKind,
}

struct Section {
    title: &'static str,
    items: &'static [SettingItem],
}

static SECTIONS: [Section; 3] = [
    Section {
        title: "Account",
        items: &[
            SettingItem {
                label: "Edit Profile",
                kind: ItemKind::Action,
            },
            SettingItem {
                label: "Password & Security",
                kind: ItemKind::Action,
            },
            SettingItem {
                label: "Privacy",
                kind: ItemKind::Toggle(Toggle::Private),
            },
            SettingItem {
                label: "Log Out",
                kind: ItemKind::LogOut,
            },
        ],
    },
    Section {
        title: "Notifications",
        items: &[
            SettingItem {
                label: "Messages",
                kind: ItemKind::Toggle(Toggle::NotifyMessages),
            },
            SettingItem {
                label: "Likes",
                kind: ItemKind::Toggle(Toggle::NotifyLikes),
            },
            SettingItem {
                label: "Comments",
                kind: ItemKind::Toggle(Toggle::NotifyComments),
            },
            SettingItem {
                label: "Mentions",
                kind: ItemKind::Toggle(Toggle::NotifyMentions),
            },
            SettingItem {
                label: "Bookings",
                kind: ItemKind::Toggle(Toggle::NotifyBookings),
            },
        ],
    },
    Section {
        title: "Preferences",
        items: &[
            SettingItem {
                label: "Dark Mode",
                kind: ItemKind::Toggle(Toggle::DarkMode),
            },
            SettingItem {
                label: "Language",
                kind: ItemKind::Select(Select::Language),
            },
            SettingItem {
                label: "Currency",
                kind: ItemKind::Select(Select::Currency),
            },
        ],
    },
];

fn all_items() -> impl Iterator<Item = &'static SettingItem> {
    SECTIONS.iter().flat_map(|s| s.items.iter())
}

fn item_at(index: usize) -> Option<&'static SettingItem> {
    all_items().nth(index)
}

/// Current settings values. Seeded from the config file, never written back.
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub private_account: bool,
    pub dark_mode: bool,
    pub language: String,
    pub currency: String,
    pub notifications: NotificationsConfig,
}

impl From<&SettingsConfig> for SettingsState {
    fn from(config: &SettingsConfig) -> Self {
        Self {
            private_account: config.private_account,
            dark_mode: config.dark_mode,
            language: config.language.clone(),
            currency: config.currency.clone(),
            notifications: config.notifications.clone(),
        }
    }
}

impl SettingsState {
    fn flag_mut(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::Private => &mut self.private_account,
            Toggle::DarkMode => &mut self.dark_mode,
            Toggle::NotifyMessages => &mut self.notifications.messages,
            Toggle::NotifyLikes => &mut self.notifications.likes,
            Toggle::NotifyComments => &mut self.notifications.comments,
            Toggle::NotifyMentions => &mut self.notifications.mentions,
            Toggle::NotifyBookings => &mut self.notifications.bookings,
        }
    }

    pub fn flag(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Private => self.private_account,
            Toggle::DarkMode => self.dark_mode,
            Toggle::NotifyMessages => self.notifications.messages,
            Toggle::NotifyLikes => self.notifications.likes,
            Toggle::NotifyComments => self.notifications.comments,
            Toggle::NotifyMentions => self.notifications.mentions,
            Toggle::NotifyBookings => self.notifications.bookings,
        }
    }

    pub fn toggle(&mut self, toggle: Toggle) {
        let flag = self.flag_mut(toggle);
        *flag = !*flag;
    }

    pub fn choice(&self, select: Select) -> &str {
        match select {
            Select::Language => &self.language,
            Select::Currency => &self.currency,
        }
    }

    pub fn set_choice(&mut self, select: Select, value: &str) {
        match select {
            Select::Language => self.language = value.to_string(),
            Select::Currency => self.currency = value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Picker {
    select: Select,
    index: usize,
}

pub struct SettingsScreen {
    state: SettingsState,
    selected: usize,
    picker: Option<Picker>,
    confirm_logout: bool,
}

impl SettingsScreen {
    pub fn new(config: &SettingsConfig) -> Self {
        Self {
            state: SettingsState::from(config),
            selected: 0,
            picker: None,
            confirm_logout: false,
        }
    }

    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    fn activate(&mut self) -> ScreenAction {
        let Some(item) = item_at(self.selected) else {
            return ScreenAction::None;
        };
        match item.kind {
            ItemKind::Toggle(toggle) => {
                self.state.toggle(toggle);
                tracing::debug!(setting = item.label, value = self.state.flag(toggle), "toggled");
                ScreenAction::None
            }
            ItemKind::Select(select) => {
                let current = self.state.choice(select);
                let index = select
                    .options()
                    .iter()
                    .position(|o| *o == current)
                    .unwrap_or(0);
                self.picker = Some(Picker { select, index });
                ScreenAction::None
            }
            ItemKind::Action => {
                ScreenAction::Status(format!("{} is not available yet", item.label))
            }
            ItemKind::LogOut => {
                self.confirm_logout = true;
                ScreenAction::None
            }
        }
    }

    fn handle_picker_key(&mut self, mut picker: Picker, key: KeyEvent) {
        let options = picker.select.options();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                picker.index = step_selection(picker.index, options.len(), false);
                self.picker = Some(picker);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                picker.index = step_selection(picker.index, options.len(), true);
                self.picker = Some(picker);
            }
            KeyCode::Enter => {
                self.state.set_choice(picker.select, options[picker.index]);
                self.picker = None;
            }
            KeyCode::Esc => self.picker = None,
            _ => {}
        }
    }

    fn value_span(&self, kind: ItemKind) -> Span<'static> {
        match kind {
            ItemKind::Toggle(toggle) => {
                if self.state.flag(toggle) {
                    Span::styled("[on] ", Style::default().fg(Color::Green))
                } else {
                    Span::styled("[off]", Style::default().fg(Color::DarkGray))
                }
            }
            ItemKind::Select(select) => Span::styled(
                format!("{} ›", self.state.choice(select)),
                Style::default().fg(Color::Cyan),
            ),
            ItemKind::Action | ItemKind::LogOut => {
                Span::styled("›", Style::default().fg(Color::DarkGray))
            }
        }
    }

    fn render_picker(&self, frame: &mut Frame, area: Rect, picker: Picker) {
        let modal_area = center_rect(40, 50, area);
        let title = match picker.select {
            Select::Language => "Language",
            Select::Currency => "Currency",
        };
        let inner = modal_frame(frame, modal_area, title);

        let items: Vec<ListItem> = picker
            .select
            .options()
            .iter()
            .map(|o| ListItem::new(*o))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(picker.index));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn render_logout_confirm(&self, frame: &mut Frame, area: Rect) {
        let modal_area = center_rect(40, 30, area);
        let inner = modal_frame(frame, modal_area, "Log Out");
        let text = vec![
            Line::from("Are you sure you want to log out?"),
            Line::from(""),
            Line::from(Span::styled(
                "y: log out | n: cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }
}

impl Screen for SettingsScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Settings
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(true))
            .title(" Settings ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let mut items = Vec::new();
        let mut selected_row = None;
        let mut index = 0;
        for section in SECTIONS.iter() {
            if !items.is_empty() {
                items.push(ListItem::new(""));
            }
            items.push(ListItem::new(Line::from(Span::styled(
                section.title.to_uppercase(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ))));
            for item in section.items {
                if index == self.selected {
                    selected_row = Some(items.len());
                }
                items.push(ListItem::new(Line::from(vec![
                    Span::raw(format!("  {:<24}", item.label)),
                    self.value_span(item.kind),
                ])));
                index += 1;
            }
        }

        let list = List::new(items)
            .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));
        // Header rows are not selectable, so the list row differs from `selected`.
        let mut state = ListState::default();
        state.select(selected_row);
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let help = Paragraph::new(Line::from(Span::styled(
            "↑↓: select | Enter/Space: change",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(help, chunks[1]);

        if let Some(picker) = self.picker {
            self.render_picker(frame, area, picker);
        } else if self.confirm_logout {
            self.render_logout_confirm(frame, area);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if let Some(picker) = self.picker {
            self.handle_picker_key(picker, key);
            return ScreenAction::None;
        }

        if self.confirm_logout {
            return match key.code {
                KeyCode::Char('y') => ScreenAction::Quit,
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_logout = false;
                    ScreenAction::None
                }
                _ => ScreenAction::None,
            };
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => ScreenAction::None,
        }
    }

    fn scroll_up(&mut self) {
        if let Some(picker) = self.picker {
            self.handle_picker_key(picker, KeyEvent::from(KeyCode::Up));
        } else if !self.confirm_logout {
            self.selected = step_selection(self.selected, all_items().count(), false);
        }
    }

    fn scroll_down(&mut self) {
        if let Some(picker) = self.picker {
            self.handle_picker_key(picker, KeyEvent::from(KeyCode::Down));
        } else if !self.confirm_logout {
            self.selected = step_selection(self.selected, all_items().count(), true);
        }
    }

    fn captures_input(&self) -> bool {
        self.picker.is_some() || self.confirm_logout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::test_support::{ch, key, render_to_string};

    fn screen() -> SettingsScreen {
        SettingsScreen::new(&SettingsConfig::default())
    }

    fn select_label(screen: &mut SettingsScreen, label: &str) {
        let index = all_items().position(|i| i.label == label).unwrap();
        screen.selected = index;
    }

    #[test]
    fn test_toggle_item_flips_value() {
        let mut screen = screen();
        select_label(&mut screen, "Dark Mode");
        assert!(!screen.state().dark_mode);
        screen.handle_key(key(KeyCode::Enter));
        assert!(screen.state().dark_mode);
        screen.handle_key(ch(' '));
        assert!(!screen.state().dark_mode);
    }

    #[test]
    fn test_notification_toggles_are_independent() {
        let mut screen = screen();
        select_label(&mut screen, "Likes");
        screen.handle_key(key(KeyCode::Enter));
        assert!(!screen.state().notifications.likes);
        assert!(screen.state().notifications.comments);
        assert!(screen.state().notifications.messages);
    }

    #[test]
    fn test_picker_applies_choice() {
        let mut screen = screen();
        select_label(&mut screen, "Currency");
        screen.handle_key(key(KeyCode::Enter));
        assert!(screen.captures_input());
        assert!(render_to_string(&screen, 80, 30).contains("JPY"));

        screen.scroll_down();
        screen.scroll_down();
        screen.handle_key(key(KeyCode::Enter));
        assert!(!screen.captures_input());
        assert_eq!(screen.state().currency, "GBP");
    }

    #[test]
    fn test_picker_starts_at_current_value_and_cancels() {
        let mut config = SettingsConfig::default();
        config.language = "French".to_string();
        let mut screen = SettingsScreen::new(&config);
        select_label(&mut screen, "Language");
        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.picker.map(|p| p.index), Some(2));

        screen.handle_key(key(KeyCode::Down));
        screen.handle_key(key(KeyCode::Esc));
        assert_eq!(screen.state().language, "French");
    }

    #[test]
    fn test_action_item_reports_status() {
        let mut screen = screen();
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            ScreenAction::Status("Edit Profile is not available yet".to_string())
        );
    }

    #[test]
    fn test_logout_confirm() {
        let mut screen = screen();
        select_label(&mut screen, "Log Out");
        screen.handle_key(key(KeyCode::Enter));
        assert!(screen.captures_input());
        assert!(render_to_string(&screen, 80, 30).contains("Are you sure"));

        screen.handle_key(ch('n'));
        assert!(!screen.captures_input());

        screen.handle_key(key(KeyCode::Enter));
        assert_eq!(screen.handle_key(ch('y')), ScreenAction::Quit);
    }

    #[test]
    fn test_selected_row_visible_on_short_terminal() {
        let mut screen = screen();
        for _ in 0..all_items().count() {
            screen.scroll_down();
        }
        let rendered = render_to_string(&screen, 80, 16);
        assert!(rendered.contains("Currency"));
        assert!(rendered.contains("USD"));
        assert!(rendered.contains("Enter/Space: change"));
    }

    #[test]
    fn test_scroll_stays_in_bounds() {
        let mut screen = screen();
        screen.scroll_up();
        assert_eq!(screen.selected, 0);
        for _ in 0..50 {
            screen.scroll_down();
        }
        assert_eq!(screen.selected, all_items().count() - 1);
    }
}
