use crate::config::{Config, ScreenKind};
use crate::feeds::FixtureData;
use crate::ui;
use crate::ui::screens::{
    explore::ExploreScreen, home::HomeScreen, messages::MessagesScreen, profile::ProfileScreen,
    settings::SettingsScreen, Screen, ScreenAction,
};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;

/// How many ticks a status message stays on screen.
const STATUS_TICKS: u32 = 12;

pub struct App {
    home: HomeScreen,
    explore: ExploreScreen,
    messages: MessagesScreen,
    profile: ProfileScreen,
    settings: SettingsScreen,
    current: ScreenKind,
    status: Option<String>,
    status_ticks: u32,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, data: FixtureData) -> Self {
        let profile = ProfileScreen::new(data.current_user.clone());
        let data = Arc::new(data);

        Self {
            home: HomeScreen::new(data.clone()),
            explore: ExploreScreen::new(data.clone()),
            messages: MessagesScreen::new(data),
            profile,
            settings: SettingsScreen::new(&config.settings),
            current: config.general.start_screen,
            status: None,
            status_ticks: 0,
            should_quit: false,
        }
    }

    pub fn current(&self) -> ScreenKind {
        self.current
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn dark_mode(&self) -> bool {
        self.settings.state().dark_mode
    }

    pub fn home(&self) -> &HomeScreen {
        &self.home
    }

    pub fn messages(&self) -> &MessagesScreen {
        &self.messages
    }

    pub fn active_screen(&self) -> &dyn Screen {
        match self.current {
            ScreenKind::Home => &self.home,
            ScreenKind::Explore => &self.explore,
            ScreenKind::Messages => &self.messages,
            ScreenKind::Profile => &self.profile,
            ScreenKind::Settings => &self.settings,
        }
    }

    fn active_screen_mut(&mut self) -> &mut dyn Screen {
        match self.current {
            ScreenKind::Home => &mut self.home,
            ScreenKind::Explore => &mut self.explore,
            ScreenKind::Messages => &mut self.messages,
            ScreenKind::Profile => &mut self.profile,
            ScreenKind::Settings => &mut self.settings,
        }
    }

    pub fn switch_to(&mut self, kind: ScreenKind) {
        if self.current != kind {
            tracing::debug!(from = ?self.current, to = ?kind, "switching screen");
            self.current = kind;
        }
    }

    fn cycle_screen(&mut self, forward: bool) {
        let len = ScreenKind::ALL.len();
        let index = self.current.index();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.switch_to(ScreenKind::ALL[next]);
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(message);
        self.status_ticks = STATUS_TICKS;
    }

    pub fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status = None;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let captured = self.active_screen().captures_input();

        if !captured {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Tab => {
                    self.cycle_screen(true);
                    return;
                }
                KeyCode::BackTab => {
                    self.cycle_screen(false);
                    return;
                }
                KeyCode::Char(c @ '1'..='5') => {
                    let index = c as usize - '1' as usize;
                    self.switch_to(ScreenKind::ALL[index]);
                    return;
                }
                KeyCode::Char('k') => {
                    self.active_screen_mut().scroll_up();
                    return;
                }
                KeyCode::Char('j') => {
                    self.active_screen_mut().scroll_down();
                    return;
                }
                _ => {}
            }
        }

        let action = match key.code {
            KeyCode::Up => {
                self.active_screen_mut().scroll_up();
                ScreenAction::None
            }
            KeyCode::Down => {
                self.active_screen_mut().scroll_down();
                ScreenAction::None
            }
            _ => self.active_screen_mut().handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Status(message) => self.set_status(message),
            ScreenAction::OpenUrl(url) => {
                if let Err(e) = open::that(&url) {
                    tracing::warn!(url = %url, error = %e, "failed to open browser");
                    self.set_status(format!("Could not open {}: {}", url, e));
                } else {
                    self.set_status(format!("Opened {}", url));
                }
            }
            ScreenAction::OpenChat(id) => {
                self.messages.select_chat(&id);
                self.switch_to(ScreenKind::Messages);
            }
            ScreenAction::FocusPhotographer(id) => {
                self.home.focus(&id);
                self.switch_to(ScreenKind::Home);
            }
            ScreenAction::Quit => self.should_quit = true,
        }
    }
}

/// Drives the UI until the user quits: one redraw per key event or tick.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(tick_rate);

    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            _ = ticker.tick() => app.tick(),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    Ok(())
}
