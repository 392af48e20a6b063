//! Interactive member discovery TUI using ratatui.
//!
//! A two-pane browser over the SkillSwap directory: type to search with
//! live debounced results, or page through the browse listing with skill
//! and location filters. The screen only submits intents to the
//! [`DiscoveryController`] and renders its view-model snapshots; no
//! retrieval logic lives here.

use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::sync::watch;

use crate::discovery::{DiscoveryController, Mode, PageItem, Pagination, ViewModel};
use crate::error::{Result, ScoutError};
use crate::model::UserPreview;

/// Focus state for TUI panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    List,
    Detail,
}

impl FocusPanel {
    const fn toggle(self) -> Self {
        match self {
            Self::List => Self::Detail,
            Self::Detail => Self::List,
        }
    }
}

/// Which text input currently captures keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputTarget {
    None,
    /// The live search box; every edit goes straight to the controller.
    Query,
    /// The skill filter prompt; submitted on Enter.
    SkillFilter,
    /// The location filter prompt; submitted on Enter.
    LocationFilter,
}

/// Action to take after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Quit,
    Continue,
}

/// TUI application state.
pub struct DiscoverTui {
    controller: DiscoveryController,
    vm_rx: watch::Receiver<ViewModel>,
    /// Latest snapshot; refreshed from the watch channel between frames.
    vm: ViewModel,
    /// Local echo of the query string being typed.
    query_input: String,
    input: InputTarget,
    /// Buffer for the filter prompts.
    input_buffer: String,
    list_state: ListState,
    focus: FocusPanel,
    detail_scroll: u16,
    show_help: bool,
}

impl DiscoverTui {
    /// Create the screen over a running controller.
    #[must_use]
    pub fn new(controller: DiscoveryController) -> Self {
        let vm_rx = controller.subscribe();
        let vm = controller.snapshot();
        let mut list_state = ListState::default();
        if !vm.users.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            controller,
            vm_rx,
            vm,
            query_input: String::new(),
            input: InputTarget::None,
            input_buffer: String::new(),
            list_state,
            focus: FocusPanel::List,
            detail_scroll: 0,
            show_help: false,
        }
    }

    /// Run the TUI main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            self.sync_view_model();
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match self.handle_key(key.code, key.modifiers) {
                        Action::Quit => return Ok(()),
                        Action::Continue => {}
                    }
                }
            }
        }
    }

    /// Pull the latest snapshot if the controller published one.
    fn sync_view_model(&mut self) {
        if self.vm_rx.has_changed().unwrap_or(false) {
            self.vm = self.vm_rx.borrow_and_update().clone();
            self.clamp_selection();
        }
    }

    fn clamp_selection(&mut self) {
        if self.vm.users.is_empty() {
            self.list_state.select(None);
        } else {
            let last = self.vm.users.len() - 1;
            match self.list_state.selected() {
                Some(i) if i <= last => {}
                _ => self.list_state.select(Some(0)),
            }
        }
    }

    fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Search bar
                Constraint::Length(1), // Filter chips
                Constraint::Min(10),   // Main content
                Constraint::Length(1), // Pagination
                Constraint::Length(1), // Help bar
            ])
            .split(f.area());

        self.draw_title_bar(f, chunks[0]);
        self.draw_search_bar(f, chunks[1]);
        self.draw_filter_bar(f, chunks[2]);
        self.draw_main_content(f, chunks[3]);
        self.draw_pagination_bar(f, chunks[4]);
        self.draw_help_bar(f, chunks[5]);

        if self.show_help {
            self.draw_help_overlay(f);
        }
    }

    fn draw_title_bar(&self, f: &mut Frame, area: Rect) {
        let mode = match self.vm.mode {
            Mode::Browse => "browse",
            Mode::Search => "search",
        };
        let busy = if self.vm.loading || self.vm.search_loading {
            " | fetching..."
        } else {
            ""
        };
        let notice = self
            .vm
            .error
            .as_deref()
            .map(|e| format!(" | {e}"))
            .unwrap_or_default();

        let title = Line::from(vec![
            Span::styled(
                "skillscout discover",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " | {} member(s) | {mode}{busy}",
                self.vm.pagination.total_count
            )),
            Span::styled(notice, Style::default().fg(Color::Red)),
        ]);

        let paragraph = Paragraph::new(title).style(Style::default().fg(Color::Cyan));
        f.render_widget(paragraph, area);
    }

    fn draw_search_bar(&self, f: &mut Frame, area: Rect) {
        let focused = self.input == InputTarget::Query;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let search_text = if focused {
            format!("{}_", self.query_input)
        } else if self.query_input.is_empty() {
            "Type / to search by name, skill, or location...".to_string()
        } else {
            self.query_input.clone()
        };

        let paragraph = Paragraph::new(search_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Search "),
            )
            .style(if self.query_input.is_empty() && !focused {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            });

        f.render_widget(paragraph, area);
    }

    fn draw_filter_bar(&self, f: &mut Frame, area: Rect) {
        let mut spans: Vec<Span<'static>> = Vec::new();

        match self.input {
            InputTarget::SkillFilter => {
                spans.push(Span::styled(
                    format!("skill filter: {}_", self.input_buffer),
                    Style::default().fg(Color::Yellow),
                ));
            }
            InputTarget::LocationFilter => {
                spans.push(Span::styled(
                    format!("location filter: {}_", self.input_buffer),
                    Style::default().fg(Color::Yellow),
                ));
            }
            _ => {
                if let Some(skill) = &self.vm.skill_filter {
                    spans.push(Span::styled(
                        format!("[skill: {skill}] "),
                        Style::default().fg(Color::Green),
                    ));
                }
                if let Some(location) = &self.vm.location_filter {
                    spans.push(Span::styled(
                        format!("[location: {location}] "),
                        Style::default().fg(Color::Green),
                    ));
                }
                if !self.vm.popular_skills.is_empty() {
                    spans.push(Span::styled("chips: ", Style::default().fg(Color::DarkGray)));
                    for (i, stat) in self.vm.popular_skills.iter().take(9).enumerate() {
                        spans.push(Span::styled(
                            format!("{}:{} ", i + 1, stat.skill_name),
                            Style::default().fg(Color::Magenta),
                        ));
                    }
                }
            }
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_main_content(&mut self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        self.draw_list_panel(f, columns[0]);
        self.draw_detail_panel(f, columns[1]);
    }

    fn draw_list_panel(&mut self, f: &mut Frame, area: Rect) {
        let is_focused = self.focus == FocusPanel::List && self.input == InputTarget::None;
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let items: Vec<ListItem> = self
            .vm
            .users
            .iter()
            .map(|user| {
                let mut spans = vec![Span::raw(truncate(&user.name, 24))];
                if let Some(location) = &user.location {
                    spans.push(Span::styled(
                        format!("  {}", truncate(location, 18)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if let Some(skill) = user.top_offered_skills.first() {
                    spans.push(Span::styled(
                        format!("  [{}]", truncate(&skill.skill_name, 14)),
                        Style::default().fg(Color::Green),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let title = match self.vm.results_mode {
            Mode::Browse => " Members ",
            Mode::Search => " Matches ",
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_detail_panel(&mut self, f: &mut Frame, area: Rect) {
        let is_focused = self.focus == FocusPanel::Detail && self.input == InputTarget::None;
        let border_style = if is_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let content = self.selected_detail();

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(" Profile "),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.detail_scroll, 0));

        f.render_widget(paragraph, area);
    }

    fn draw_pagination_bar(&self, f: &mut Frame, area: Rect) {
        // Search results are a single unpaginated page; show nothing.
        if self.vm.results_mode.is_search() {
            return;
        }

        let mut spans: Vec<Span<'static>> = vec![Span::raw("page: ")];
        for (label, current) in pagination_labels(&self.vm.pagination) {
            if current {
                spans.push(Span::styled(
                    format!("[{label}] "),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw(format!("{label} ")));
            }
        }
        if self.vm.pagination.has_next {
            spans.push(Span::styled(
                "(n: next)",
                Style::default().fg(Color::DarkGray),
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_help_bar(&self, f: &mut Frame, area: Rect) {
        let help_text = match self.input {
            InputTarget::Query => "type to search (debounced)  Enter: done  Esc: clear query",
            InputTarget::SkillFilter | InputTarget::LocationFilter => {
                "Enter: apply filter  Esc: cancel  Backspace: delete"
            }
            InputTarget::None => {
                "j/k: navigate  /: search  n/p: page  f: skill  o: location  c: clear  1-9: chip  ?: help  q: quit"
            }
        };

        let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
    }

    fn draw_help_overlay(&self, f: &mut Frame) {
        let area = f.area();

        let help_width = 62.min(area.width.saturating_sub(4));
        let help_height = 20.min(area.height.saturating_sub(4));
        let x = (area.width - help_width) / 2;
        let y = (area.height - help_height) / 2;
        let help_area = Rect::new(x, y, help_width, help_height);

        f.render_widget(Clear, help_area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  j / Down     Move down in list"),
            Line::from("  k / Up       Move up in list"),
            Line::from("  Tab          Switch focus between panels"),
            Line::from("  PgUp/PgDn    Scroll profile pane"),
            Line::from(""),
            Line::from("Retrieval:"),
            Line::from("  /            Focus the search box (live, debounced)"),
            Line::from("  Esc          Clear the query, back to browsing"),
            Line::from("  n / Right    Next browse page"),
            Line::from("  p / Left     Previous browse page"),
            Line::from("  f            Set skill filter"),
            Line::from("  o            Set location filter"),
            Line::from("  c            Clear all filters"),
            Line::from("  1-9          Apply a popular-skill chip"),
            Line::from("  r            Re-fetch the current view"),
            Line::from(""),
            Line::from("Press ? or Esc to close this help"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Help "),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, help_area);
    }

    fn selected_detail(&self) -> Text<'static> {
        let Some(selected) = self.list_state.selected() else {
            return Text::from("No member selected");
        };
        let Some(user) = self.vm.users.get(selected) else {
            return Text::from("No member selected");
        };

        let mut lines: Vec<Line<'static>> = vec![
            Line::from(Span::styled(
                user.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("ID: {}", user.id)),
            Line::from(""),
        ];

        if let Some(location) = &user.location {
            lines.push(Line::from(format!("Location: {location}")));
        }
        if let Some(member_since) = &user.member_since {
            lines.push(Line::from(format!(
                "Member since: {}",
                member_since.format("%Y-%m-%d")
            )));
        }
        if let Some(availability) = &user.availability {
            if !availability.is_empty() {
                lines.push(Line::from(format!(
                    "Availability: {}",
                    availability.join(", ")
                )));
            }
        }
        lines.push(Line::from(""));

        if !user.top_offered_skills.is_empty() {
            lines.push(Line::from(Span::styled(
                "Offers:".to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
            for skill in &user.top_offered_skills {
                let level = skill
                    .proficiency_level
                    .as_deref()
                    .map(|l| format!(" ({l})"))
                    .unwrap_or_default();
                lines.push(Line::from(format!("  {}{level}", skill.skill_name)));
            }
            lines.push(Line::from(""));
        }

        if !user.top_wanted_skills.is_empty() {
            lines.push(Line::from(Span::styled(
                "Wants:".to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            for skill in &user.top_wanted_skills {
                let urgency = skill
                    .urgency_level
                    .as_deref()
                    .map(|u| format!(" ({u})"))
                    .unwrap_or_default();
                lines.push(Line::from(format!("  {}{urgency}", skill.skill_name)));
            }
        }

        Text::from(lines)
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Action {
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter) {
                self.show_help = false;
            }
            return Action::Continue;
        }

        match self.input {
            InputTarget::Query => return self.handle_query_key(key),
            InputTarget::SkillFilter | InputTarget::LocationFilter => {
                return self.handle_filter_key(key);
            }
            InputTarget::None => {}
        }

        match key {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit;
            }
            KeyCode::Char('/') => self.input = InputTarget::Query,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.focus = self.focus.toggle(),
            KeyCode::Esc => {
                if !self.query_input.is_empty() {
                    self.query_input.clear();
                    self.controller.submit_query("");
                }
            }
            KeyCode::Char('f') => {
                self.input = InputTarget::SkillFilter;
                self.input_buffer = self.vm.skill_filter.clone().unwrap_or_default();
            }
            KeyCode::Char('o') => {
                self.input = InputTarget::LocationFilter;
                self.input_buffer = self.vm.location_filter.clone().unwrap_or_default();
            }
            KeyCode::Char('c') => self.controller.clear_filters(),
            KeyCode::Char('r') => self.controller.refresh(),
            KeyCode::Char('n') | KeyCode::Right => {
                if self.vm.pagination.has_next {
                    self.controller.submit_page(self.vm.pagination.page + 1);
                }
            }
            KeyCode::Char('p') | KeyCode::Left => {
                if self.vm.pagination.has_previous {
                    self.controller
                        .submit_page(self.vm.pagination.page.saturating_sub(1));
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let chip = self
                    .vm
                    .popular_skills
                    .get(index)
                    .map(|stat| stat.skill_name.clone());
                if let Some(name) = chip {
                    self.query_input.clear();
                    self.controller.apply_skill_chip(&name);
                }
            }
            _ => {
                return match self.focus {
                    FocusPanel::List => self.handle_list_key(key),
                    FocusPanel::Detail => self.handle_detail_key(key),
                };
            }
        }
        Action::Continue
    }

    fn handle_query_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Enter => {
                self.input = InputTarget::None;
            }
            KeyCode::Esc => {
                // Esc abandons the search entirely: clear and go browse.
                self.input = InputTarget::None;
                self.query_input.clear();
                self.controller.submit_query("");
            }
            KeyCode::Char(c) => {
                self.query_input.push(c);
                self.controller.submit_query(&self.query_input);
            }
            KeyCode::Backspace => {
                self.query_input.pop();
                self.controller.submit_query(&self.query_input);
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_filter_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input_buffer);
                match self.input {
                    InputTarget::SkillFilter => self.controller.submit_filters(Some(&value), None),
                    InputTarget::LocationFilter => {
                        self.controller.submit_filters(None, Some(&value));
                    }
                    _ => {}
                }
                self.input = InputTarget::None;
            }
            KeyCode::Esc => {
                self.input = InputTarget::None;
                self.input_buffer.clear();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_list_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('G') => {
                if !self.vm.users.is_empty() {
                    self.list_state.select(Some(self.vm.users.len() - 1));
                    self.detail_scroll = 0;
                }
            }
            KeyCode::Char('g') => {
                if !self.vm.users.is_empty() {
                    self.list_state.select(Some(0));
                    self.detail_scroll = 0;
                }
            }
            _ => {}
        }
        Action::Continue
    }

    fn handle_detail_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(3);
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(3);
            }
            _ => {}
        }
        Action::Continue
    }

    fn select_next(&mut self) {
        if self.vm.users.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= self.vm.users.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
        self.detail_scroll = 0;
    }

    fn select_prev(&mut self) {
        if self.vm.users.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.vm.users.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.detail_scroll = 0;
    }
}

/// Page-strip labels for display: `(label, is_current_page)` pairs.
fn pagination_labels(pagination: &Pagination) -> Vec<(String, bool)> {
    pagination
        .window()
        .into_iter()
        .map(|item| match item {
            PageItem::Page(n) => (n.to_string(), n == pagination.page),
            PageItem::Ellipsis => ("...".to_string(), false),
        })
        .collect()
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    } else {
        s.to_string()
    }
}

/// RAII guard to ensure terminal state is restored even on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

/// Run the discovery TUI until the user quits.
pub fn run_discover_tui(controller: DiscoveryController) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(ScoutError::Validation(
            "browse command requires an interactive terminal".to_string(),
        ));
    }

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let app = DiscoverTui::new(controller);
    app.run(&mut terminal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_pagination_labels_mark_current() {
        let pagination = Pagination {
            page: 2,
            page_size: 12,
            total_count: 40,
            total_pages: 4,
            has_next: true,
            has_previous: true,
        };
        let labels = pagination_labels(&pagination);
        assert_eq!(
            labels,
            vec![
                ("1".to_string(), false),
                ("2".to_string(), true),
                ("3".to_string(), false),
                ("4".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_pagination_labels_include_ellipsis() {
        let pagination = Pagination {
            page: 5,
            page_size: 12,
            total_count: 120,
            total_pages: 10,
            has_next: true,
            has_previous: true,
        };
        let labels: Vec<String> = pagination_labels(&pagination)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["1", "...", "4", "5", "6", "...", "10"]);
    }

    #[test]
    fn test_focus_toggle() {
        assert_eq!(FocusPanel::List.toggle(), FocusPanel::Detail);
        assert_eq!(FocusPanel::Detail.toggle(), FocusPanel::List);
    }
}
