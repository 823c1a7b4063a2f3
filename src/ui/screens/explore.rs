use super::{step_selection, Screen, ScreenAction};
use crate::config::ScreenKind;
use crate::feeds::{FixtureData, Photographer};
use crate::ui::border_style;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};
use std::sync::Arc;

pub const CATEGORIES: [&str; 7] = [
    "All", "Wedding", "Portrait", "Street", "Nature", "Events", "Fashion",
];

const GRID_COLUMNS: usize = 2;

/// Photographers matching both the free-text query and the category chip.
///
/// The query is matched case-insensitively against name, specialty and
/// location. A category other than `All` must appear in the specialty.
pub fn filter_photographers<'a>(
    items: &'a [Photographer],
    query: &str,
    category: &str,
) -> Vec<&'a Photographer> {
    let query = query.trim().to_lowercase();
    let category = category.to_lowercase();

    items
        .iter()
        .filter(|p| {
            category == "all" || p.specialty.to_lowercase().contains(&category)
        })
        .filter(|p| {
            query.is_empty()
                || p.name.to_lowercase().contains(&query)
                || p.specialty.to_lowercase().contains(&query)
                || p.location.to_lowercase().contains(&query)
        })
        .collect()
}

/// Moves the grid cursor one row up or down, keeping the column when the
/// target row has one. A short last row catches the cursor at its final item.
fn step_row(current: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        let next = current + GRID_COLUMNS;
        if next < len {
            next
        } else if current / GRID_COLUMNS < (len - 1) / GRID_COLUMNS {
            len - 1
        } else {
            current
        }
    } else if current >= GRID_COLUMNS {
        current - GRID_COLUMNS
    } else {
        current
    }
}

pub struct ExploreScreen {
    data: Arc<FixtureData>,
    query: String,
    category: usize,
    searching: bool,
    selected: usize,
}

impl ExploreScreen {
    pub fn new(data: Arc<FixtureData>) -> Self {
        Self {
            data,
            query: String::new(),
            category: 0,
            searching: false,
            selected: 0,
        }
    }

    pub fn category(&self) -> &'static str {
        CATEGORIES[self.category]
    }

    fn results(&self) -> Vec<&Photographer> {
        filter_photographers(&self.data.photographers, &self.query, self.category())
    }

    fn cycle_category(&mut self, forward: bool) {
        let len = CATEGORIES.len();
        self.category = if forward {
            (self.category + 1) % len
        } else {
            (self.category + len - 1) % len
        };
        self.selected = 0;
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.query.push(c),
            KeyCode::Backspace => {
                self.query.pop();
            }
            KeyCode::Enter | KeyCode::Esc => self.searching = false,
            _ => {}
        }
        self.selected = 0;
    }
}

impl Screen for ExploreScreen {
    fn kind(&self) -> ScreenKind {
        ScreenKind::Explore
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        let search_text = if self.query.is_empty() && !self.searching {
            Line::from(Span::styled(
                "Search photographers... (/)",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let mut spans = vec![Span::raw(self.query.clone())];
            if self.searching {
                spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
            }
            Line::from(spans)
        };
        let search = Paragraph::new(search_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(self.searching))
                .title(" Search "),
        );
        frame.render_widget(search, chunks[0]);

        let chips = Tabs::new(CATEGORIES.to_vec())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Category (←/→) "),
            )
            .select(self.category)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(chips, chunks[1]);

        let results = self.results();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(!self.searching))
            .title(format!(
                " {} photographers (↑↓ rows, h/l items) ",
                results.len()
            ));

        if results.is_empty() {
            frame.render_widget(
                Paragraph::new("No photographers match").block(block),
                chunks[2],
            );
            return;
        }

        let rows: Vec<Row> = results
            .chunks(GRID_COLUMNS)
            .enumerate()
            .map(|(row_idx, row)| {
                let cells: Vec<Cell> = row
                    .iter()
                    .enumerate()
                    .map(|(col_idx, p)| {
                        let index = row_idx * GRID_COLUMNS + col_idx;
                        let style = if index == self.selected {
                            Style::default().bg(Color::DarkGray)
                        } else {
                            Style::default()
                        };
                        Cell::from(Text::from(vec![
                            Line::from(Span::styled(
                                p.name.clone(),
                                Style::default().add_modifier(Modifier::BOLD),
                            )),
                            Line::from(Span::styled(
                                p.specialty.clone(),
                                Style::default().fg(Color::Gray),
                            )),
                            Line::from(Span::styled(
                                format!("{} photos | {}", p.images.len(), p.price),
                                Style::default().fg(Color::DarkGray),
                            )),
                        ]))
                        .style(style)
                    })
                    .collect();
                Row::new(cells).height(4)
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Percentage(50), Constraint::Percentage(50)],
        )
        .block(block)
        .column_spacing(1);
        frame.render_widget(table, chunks[2]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if self.searching {
            self.handle_search_key(key);
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Left => self.cycle_category(false),
            KeyCode::Right => self.cycle_category(true),
            KeyCode::Char('h') => {
                let len = self.results().len();
                self.selected = step_selection(self.selected, len, false);
            }
            KeyCode::Char('l') => {
                let len = self.results().len();
                self.selected = step_selection(self.selected, len, true);
            }
            KeyCode::Esc => {
                self.query.clear();
                self.selected = 0;
            }
            KeyCode::Enter => {
                if let Some(p) = self.results().get(self.selected) {
                    return ScreenAction::FocusPhotographer(p.id.clone());
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    fn scroll_up(&mut self) {
        let len = self.results().len();
        self.selected = step_row(self.selected, len, false);
    }

    fn scroll_down(&mut self) {
        let len = self.results().len();
        self.selected = step_row(self.selected, len, true);
    }

    fn captures_input(&self) -> bool {
        self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::fixture::builtin_fixture;
    use crate::ui::screens::test_support::{ch, key, render_to_string};

    fn names(items: &[&Photographer]) -> Vec<String> {
        items.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_filter_all_with_empty_query() {
        let data = builtin_fixture();
        assert_eq!(filter_photographers(&data.photographers, "", "All").len(), 2);
    }

    #[test]
    fn test_filter_by_category() {
        let data = builtin_fixture();
        let hits = filter_photographers(&data.photographers, "", "Street");
        assert_eq!(names(&hits), ["Marcus Chen"]);
        assert!(filter_photographers(&data.photographers, "", "Fashion").is_empty());
    }

    #[test]
    fn test_filter_query_is_case_insensitive() {
        let data = builtin_fixture();
        let by_location = filter_photographers(&data.photographers, "  new york ", "All");
        assert_eq!(names(&by_location), ["Sarah Johnson"]);
        let by_name = filter_photographers(&data.photographers, "CHEN", "All");
        assert_eq!(names(&by_name), ["Marcus Chen"]);
        assert!(filter_photographers(&data.photographers, "chen", "Wedding").is_empty());
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let mut screen = ExploreScreen::new(Arc::new(builtin_fixture()));
        screen.handle_key(ch('/'));
        assert!(screen.captures_input());
        for c in "sarah".chars() {
            screen.handle_key(ch(c));
        }
        screen.handle_key(key(KeyCode::Enter));
        assert!(!screen.captures_input());
        assert_eq!(screen.results().len(), 1);

        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            ScreenAction::FocusPhotographer("1".to_string())
        );

        screen.handle_key(key(KeyCode::Esc));
        assert_eq!(screen.results().len(), 2);
    }

    #[test]
    fn test_vertical_keys_move_by_grid_row() {
        assert_eq!(step_row(0, 5, true), 2);
        assert_eq!(step_row(2, 5, true), 4);
        assert_eq!(step_row(4, 5, true), 4);
        assert_eq!(step_row(1, 3, true), 2);
        assert_eq!(step_row(3, 5, false), 1);
        assert_eq!(step_row(1, 5, false), 1);
        assert_eq!(step_row(0, 0, true), 0);

        let mut screen = ExploreScreen::new(Arc::new(builtin_fixture()));
        screen.scroll_down();
        assert_eq!(screen.selected, 0);
        screen.handle_key(ch('l'));
        assert_eq!(screen.selected, 1);
        screen.handle_key(ch('h'));
        assert_eq!(screen.selected, 0);
    }

    #[test]
    fn test_category_cycles_both_ways() {
        let mut screen = ExploreScreen::new(Arc::new(builtin_fixture()));
        screen.handle_key(key(KeyCode::Left));
        assert_eq!(screen.category(), "Fashion");
        screen.handle_key(key(KeyCode::Right));
        screen.handle_key(key(KeyCode::Right));
        assert_eq!(screen.category(), "Wedding");
    }

    #[test]
    fn test_render_shows_empty_state() {
        let mut screen = ExploreScreen::new(Arc::new(builtin_fixture()));
        let rendered = render_to_string(&screen, 90, 20);
        assert!(rendered.contains("Sarah Johnson"));
        assert!(rendered.contains("Marcus Chen"));

        screen.handle_key(key(KeyCode::Left));
        let rendered = render_to_string(&screen, 90, 20);
        assert!(rendered.contains("No photographers match"));
    }
}
