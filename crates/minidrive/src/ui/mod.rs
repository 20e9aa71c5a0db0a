pub mod breadcrumb;
mod types;

pub use types::View;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

use crate::catalog::{Catalog, Entry};
use crate::navigator::Navigator;
use crate::settings::UiSettings;

const EMPTY_FOLDER_MESSAGE: &str = "This folder is empty. Upload files to get started.";
const PAGE_SIZE: usize = 10;

pub struct App<'c> {
    nav: Navigator<'c>,
    view: View,
    previous_view: View,
    list_state: ListState,
    status_message: String,
    ui: UiSettings,
    /// Track if 'g' was pressed for 'gg' sequence
    g_pressed: bool,
    /// File shown in the detail view
    detail_file: Option<Entry>,
    /// Digits typed so far for a breadcrumb jump
    jump_digits: String,
}

impl<'c> App<'c> {
    pub fn new(catalog: &'c Catalog, ui: UiSettings) -> Self {
        let mut app = Self {
            nav: Navigator::new(catalog),
            view: View::Browser,
            previous_view: View::Browser,
            list_state: ListState::default(),
            status_message: String::from("Enter: open | Backspace: back | ?: help"),
            ui,
            g_pressed: false,
            detail_file: None,
            jump_digits: String::new(),
        };
        app.reset_selection();
        app
    }

    pub fn navigator(&self) -> &Navigator<'c> {
        &self.nav
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn selected_entry(&self) -> Option<&'c Entry> {
        self.list_state
            .selected()
            .and_then(|i| self.nav.current_items().get(i))
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        tracing::info!("browser session started");
        let result = self.run_event_loop(&mut terminal);
        tracing::info!(folder_id = self.nav.current_folder_id(), "browser session ended");

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if self.handle_key(key.code) {
                    return Ok(());
                }
            }
        }
    }

    /// Apply one key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.view {
            View::Browser => return self.handle_browser_key(code),
            View::FileDetail => match code {
                KeyCode::Char('q') => return true,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                    self.detail_file = None;
                    self.view = View::Browser;
                }
                KeyCode::Char('?') => {
                    self.previous_view = View::FileDetail;
                    self.view = View::Help;
                }
                _ => {}
            },
            View::Help => {
                // Any key closes help
                self.view = self.previous_view;
            }
        }
        false
    }

    fn handle_browser_key(&mut self, code: KeyCode) -> bool {
        if !self.jump_digits.is_empty() {
            match code {
                KeyCode::Char('0'..='9') => {}
                KeyCode::Enter => {
                    self.commit_jump();
                    return false;
                }
                KeyCode::Esc => {
                    self.jump_digits.clear();
                    self.status_message.clear();
                    return false;
                }
                _ => {
                    self.jump_digits.clear();
                    self.status_message.clear();
                }
            }
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.previous_view = View::Browser;
                self.view = View::Help;
            }
            KeyCode::Char('g') => {
                if self.g_pressed {
                    self.list_top();
                    self.g_pressed = false;
                } else {
                    self.g_pressed = true;
                }
                return false;
            }
            KeyCode::Char('G') => self.list_bottom(),
            KeyCode::Down | KeyCode::Char('j') => self.list_next(),
            KeyCode::Up | KeyCode::Char('k') => self.list_previous(),
            KeyCode::PageDown | KeyCode::Char('d') => self.list_page_down(),
            KeyCode::PageUp => self.list_page_up(),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.open_selected(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_back(),
            KeyCode::Char('~') => self.jump_to_breadcrumb(0),
            KeyCode::Char(c @ '0'..='9') => self.push_jump_digit(c),
            KeyCode::Char('u') => {
                self.status_message = "Upload is not available".to_string();
            }
            _ => {}
        }
        self.g_pressed = false;
        false
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };

        if self.nav.open_entry(entry) {
            self.status_message = format!("Opened {}", entry.name);
            self.reset_selection();
        } else {
            self.detail_file = Some(entry.clone());
            self.view = View::FileDetail;
        }
    }

    fn go_back(&mut self) {
        if !self.nav.can_go_back() {
            self.status_message = "Already at the top".to_string();
            return;
        }

        let left = self.nav.breadcrumb().last().cloned();
        self.nav.go_back_one_level();
        self.status_message.clear();

        // Keep the cursor on the folder we just left
        match left.and_then(|name| self.nav.current_items().iter().position(|e| e.name == name)) {
            Some(idx) => self.list_state.select(Some(idx)),
            None => self.reset_selection(),
        }
    }

    /// Jumps as soon as no further digit could name a position, otherwise
    /// waits for another digit or Enter.
    fn push_jump_digit(&mut self, digit: char) {
        self.jump_digits.push(digit);
        let Ok(index) = self.jump_digits.parse::<usize>() else {
            self.commit_jump();
            return;
        };

        if index == 0 || index.saturating_mul(10) >= self.nav.breadcrumb().len() {
            self.commit_jump();
        } else {
            self.status_message = format!(
                "Jump to {}... (Enter to confirm, Esc to cancel)",
                self.jump_digits
            );
        }
    }

    fn commit_jump(&mut self) {
        let digits = std::mem::take(&mut self.jump_digits);
        match digits.parse::<usize>() {
            Ok(index) if index < self.nav.breadcrumb().len() => self.jump_to_breadcrumb(index),
            _ => self.status_message = format!("No breadcrumb at position {}", digits),
        }
    }

    fn jump_to_breadcrumb(&mut self, index: usize) {
        self.nav.jump_to_breadcrumb(index);
        self.status_message.clear();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        if self.nav.current_items().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Breadcrumb
                Constraint::Min(0),    // Main content
                Constraint::Length(6), // Info pane
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_breadcrumb(f, chunks[1]);

        match self.view {
            View::Browser => self.render_items(f, chunks[2]),
            View::FileDetail => self.render_file_detail(f, chunks[2]),
            View::Help => self.render_help(f, chunks[2]),
        }

        self.render_info(f, chunks[3]);
        self.render_status_bar(f, chunks[4]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(
                " GD ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" Drive", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("   u: upload", Style::default().fg(Color::DarkGray)),
        ]);

        f.render_widget(Paragraph::new(header), area);
    }

    fn render_breadcrumb(&self, f: &mut Frame, area: Rect) {
        let line = breadcrumb::line(self.nav.breadcrumb(), self.nav.can_go_back());
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_items(&mut self, f: &mut Frame, area: Rect) {
        let items = self.nav.current_items();
        let title = format!(
            "{} ({} items)",
            self.nav.breadcrumb().last().map(String::as_str).unwrap_or(""),
            items.len()
        );

        if items.is_empty() {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from("📂"),
                Line::from(""),
                Line::from(Span::styled(
                    EMPTY_FOLDER_MESSAGE,
                    Style::default().fg(Color::Gray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });

            f.render_widget(paragraph, area);
            return;
        }

        let name_width = items
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);

        let rows: Vec<ListItem> = items
            .iter()
            .map(|entry| {
                let (icon, name_style) = if entry.is_folder() {
                    ("📁", Style::default().fg(Color::LightBlue))
                } else {
                    ("📄", Style::default().fg(Color::Yellow))
                };

                let mut spans = vec![
                    Span::raw(format!("{} ", icon)),
                    Span::styled(format!("{:<width$}", entry.name, width = name_width), name_style),
                ];
                if self.ui.show_size {
                    spans.push(Span::styled(
                        format!("  {:>8}", entry.size().unwrap_or("")),
                        Style::default().fg(Color::Gray),
                    ));
                }
                if self.ui.show_modified {
                    spans.push(Span::styled(
                        format!("  {}", entry.modified_date),
                        Style::default().fg(Color::Gray),
                    ));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(rows)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_info(&self, f: &mut Frame, area: Rect) {
        let entry = match self.view {
            View::FileDetail => self.detail_file.as_ref(),
            _ => self.selected_entry(),
        };

        let info_text = match entry {
            Some(entry) => entry_lines(entry),
            None => vec![Line::from("Nothing selected")],
        };

        let paragraph = Paragraph::new(info_text)
            .block(Block::default().borders(Borders::ALL).title("Info"))
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn render_file_detail(&self, f: &mut Frame, area: Rect) {
        let Some(entry) = &self.detail_file else {
            return;
        };

        let mut lines = vec![
            Line::from(vec![Span::styled(
                format!("📄 {}", entry.name),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];
        lines.extend(entry_lines(entry));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            "Esc to go back",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("File"))
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(vec![Span::styled(
                "Drive - Keyboard Shortcuts",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Navigation:",
                Style::default().fg(Color::Yellow),
            )]),
            Line::from("  j/↓         Move down one item"),
            Line::from("  k/↑         Move up one item"),
            Line::from("  d/PgDn      Page down (10 items)"),
            Line::from("  PgUp        Page up (10 items)"),
            Line::from("  gg          Jump to top"),
            Line::from("  G           Jump to bottom"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Folders:",
                Style::default().fg(Color::Yellow),
            )]),
            Line::from("  Enter/l/→   Open folder or show file"),
            Line::from("  Backspace/h Go back one level"),
            Line::from("  0-9         Jump to breadcrumb position"),
            Line::from("              (more digits, then Enter, for deep paths)"),
            Line::from("  ~           Back to My Drive"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "General:",
                Style::default().fg(Color::Yellow),
            )]),
            Line::from("  u           Upload"),
            Line::from("  ?           Show this help"),
            Line::from("  q           Quit"),
            Line::from("  Esc         Close file view"),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Press any key to close",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )]),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help (?)"))
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let help_text = match self.view {
            View::Browser => "q: quit | Enter: open | Backspace: back | 0-9: breadcrumb | ?: help",
            View::FileDetail => "Esc: back to folder",
            View::Help => "Press any key to close help",
        };

        let status_line = if self.status_message.is_empty() {
            Line::from(vec![Span::styled(
                help_text,
                Style::default().fg(Color::Gray),
            )])
        } else {
            Line::from(vec![
                Span::styled(&self.status_message, Style::default().fg(Color::Yellow)),
                Span::raw(" | "),
                Span::styled(help_text, Style::default().fg(Color::Gray)),
            ])
        };

        f.render_widget(Paragraph::new(vec![status_line]), area);
    }

    fn list_next(&mut self) {
        let count = self.nav.current_items().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= count - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn list_previous(&mut self) {
        let count = self.nav.current_items().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) => count - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn list_top(&mut self) {
        if !self.nav.current_items().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    fn list_bottom(&mut self) {
        let count = self.nav.current_items().len();
        if count > 0 {
            self.list_state.select(Some(count - 1));
        }
    }

    fn list_page_down(&mut self) {
        let count = self.nav.current_items().len();
        if count == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + PAGE_SIZE).min(count - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn list_page_up(&mut self) {
        if self.nav.current_items().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(PAGE_SIZE),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}

fn entry_lines(entry: &Entry) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));

    let mut lines = vec![
        Line::from(vec![
            label("Type: "),
            Span::raw(if entry.is_folder() { "Folder" } else { "File" }),
        ]),
        Line::from(vec![label("Name: "), Span::raw(entry.name.clone())]),
    ];

    if let Some(size) = entry.size() {
        lines.push(Line::from(vec![label("Size: "), Span::raw(size.to_string())]));
    }
    lines.push(Line::from(vec![
        label("Modified: "),
        Span::raw(entry.modified_date.clone()),
    ]));
    if let Some(url) = entry.url() {
        lines.push(Line::from(vec![label("URL: "), Span::raw(url.to_string())]));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ROOT_ID;
    use ratatui::backend::TestBackend;

    fn create_test_app(catalog: &Catalog) -> App<'_> {
        App::new(catalog, UiSettings::default())
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            assert!(!app.handle_key(*key), "unexpected quit on {:?}", key);
        }
    }

    fn rendered(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_starts_at_root_with_first_item_selected() {
        let catalog = Catalog::sample();
        let app = create_test_app(&catalog);

        assert_eq!(app.view(), View::Browser);
        assert_eq!(app.navigator().current_folder_id(), ROOT_ID);
        assert_eq!(app.selected(), Some(0));
        assert_eq!(app.selected_entry().unwrap().name, "Projects");
    }

    #[test]
    fn test_enter_opens_folder() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.navigator().breadcrumb(), ["My Drive", "Projects"]);
        assert_eq!(app.selected(), Some(0));

        // Design System.figma, then Web App
        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('l')]);
        assert_eq!(app.navigator().current_folder_id(), "folder-3");
        assert_eq!(
            app.navigator().breadcrumb(),
            ["My Drive", "Projects", "Web App"]
        );
    }

    #[test]
    fn test_back_keeps_cursor_on_left_folder() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter]);
        assert_eq!(app.navigator().current_folder_id(), "folder-2");

        press(&mut app, &[KeyCode::Backspace]);
        assert_eq!(app.navigator().breadcrumb(), ["My Drive"]);
        assert_eq!(app.selected_entry().unwrap().name, "Personal");
    }

    #[test]
    fn test_back_at_root_reports_status() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('h')]);
        assert!(app.navigator().state().is_at_root());
        assert_eq!(app.status_message(), "Already at the top");
    }

    #[test]
    fn test_digit_jumps_to_breadcrumb() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(
            &mut app,
            &[KeyCode::Enter, KeyCode::Char('j'), KeyCode::Enter],
        );
        assert_eq!(app.navigator().breadcrumb().len(), 3);

        press(&mut app, &[KeyCode::Char('1')]);
        assert_eq!(app.navigator().current_folder_id(), "folder-1");
        assert_eq!(app.navigator().breadcrumb(), ["My Drive", "Projects"]);

        press(&mut app, &[KeyCode::Char('5')]);
        assert_eq!(app.navigator().current_folder_id(), "folder-1");
        assert_eq!(app.status_message(), "No breadcrumb at position 5");

        press(&mut app, &[KeyCode::Char('0')]);
        assert_eq!(app.navigator().current_folder_id(), ROOT_ID);
    }

    fn create_deep_catalog(depth: usize) -> Catalog {
        let mut catalog = Catalog::new();
        let mut parent = ROOT_ID.to_string();
        for level in 0..depth {
            let id = format!("level-{}", level);
            catalog.insert_folder(&parent, vec![Entry::folder(&id, &format!("L{}", level), "")]);
            parent = id;
        }
        catalog
    }

    #[test]
    fn test_two_digit_breadcrumb_jump() {
        let catalog = create_deep_catalog(12);
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Enter; 12]);
        assert_eq!(app.navigator().breadcrumb().len(), 13);

        // "1" could still become 10-12, so nothing happens yet
        press(&mut app, &[KeyCode::Char('1')]);
        assert_eq!(app.navigator().current_folder_id(), "level-11");
        assert!(app.status_message().starts_with("Jump to 1"));

        press(&mut app, &[KeyCode::Char('0')]);
        assert_eq!(app.navigator().current_folder_id(), "level-9");
        assert_eq!(app.navigator().breadcrumb().len(), 11);
        assert_eq!(app.navigator().breadcrumb()[10], "L9");
        assert!(app.status_message().is_empty());
    }

    #[test]
    fn test_pending_jump_confirm_and_cancel() {
        let catalog = create_deep_catalog(12);
        let mut app = create_test_app(&catalog);
        press(&mut app, &[KeyCode::Enter; 12]);

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Esc]);
        assert_eq!(app.navigator().breadcrumb().len(), 13);
        assert!(app.status_message().is_empty());

        press(&mut app, &[KeyCode::Char('1'), KeyCode::Enter]);
        assert_eq!(app.navigator().current_folder_id(), "level-0");
        assert_eq!(app.navigator().breadcrumb(), ["My Drive", "L0"]);

        press(&mut app, &[KeyCode::Enter; 11]);
        press(&mut app, &[KeyCode::Char('1'), KeyCode::Char('5')]);
        assert_eq!(app.status_message(), "No breadcrumb at position 15");
        assert_eq!(app.navigator().breadcrumb().len(), 13);
    }

    #[test]
    fn test_tilde_returns_home() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Enter, KeyCode::Char('~')]);
        assert!(app.navigator().state().is_at_root());
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn test_file_opens_detail_view() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('G'), KeyCode::Enter]);
        assert_eq!(app.view(), View::FileDetail);
        assert!(app.navigator().state().is_at_root());

        let screen = rendered(&mut app);
        assert!(screen.contains("Presentation.pptx"));
        assert!(screen.contains("https://www.example.com/presentation.pptx"));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.view(), View::Browser);
    }

    #[test]
    fn test_list_wraps_around() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('k')]);
        assert_eq!(app.selected(), Some(3));
        press(&mut app, &[KeyCode::Char('j')]);
        assert_eq!(app.selected(), Some(0));
        press(&mut app, &[KeyCode::Char('G')]);
        assert_eq!(app.selected(), Some(3));
        press(&mut app, &[KeyCode::Char('g'), KeyCode::Char('g')]);
        assert_eq!(app.selected(), Some(0));
        press(&mut app, &[KeyCode::Char('d')]);
        assert_eq!(app.selected(), Some(3));
        press(&mut app, &[KeyCode::PageUp]);
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.view(), View::Help);
        press(&mut app, &[KeyCode::Char('x')]);
        assert_eq!(app.view(), View::Browser);
    }

    #[test]
    fn test_q_quits() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn test_upload_is_inert() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('u')]);
        assert_eq!(app.status_message(), "Upload is not available");
        assert_eq!(app.navigator().current_items().len(), 4);
    }

    #[test]
    fn test_empty_folder_rendering() {
        let mut catalog = Catalog::sample();
        catalog.insert_folder("folder-2", Vec::new());
        let mut app = create_test_app(&catalog);

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Enter]);
        assert_eq!(app.selected(), None);
        assert!(app.selected_entry().is_none());

        let screen = rendered(&mut app);
        assert!(screen.contains("This folder is empty"));
    }

    #[test]
    fn test_render_browser() {
        let catalog = Catalog::sample();
        let mut app = create_test_app(&catalog);
        press(&mut app, &[KeyCode::Enter]);

        let screen = rendered(&mut app);
        assert!(screen.contains("My Drive"));
        assert!(screen.contains("Projects"));
        assert!(screen.contains("README.md"));
        assert!(screen.contains("4.2 KB"));
    }

    #[test]
    fn test_render_hides_columns_per_settings() {
        let catalog = Catalog::sample();
        let ui = UiSettings {
            show_size: false,
            show_modified: false,
        };
        let mut app = App::new(&catalog, ui);

        let screen = rendered(&mut app);
        assert!(screen.contains("Budget 2025.xlsx"));
        // Only the info pane for the selected folder shows a date
        assert!(!screen.contains("Nov 12, 2024"));
        assert!(!screen.contains("2.4 MB"));
    }
}
