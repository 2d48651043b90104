use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Terminal;
use unicode_width::UnicodeWidthStr;

use crate::data::{AutoConfirm, ListName, ListStore, MetadataService, PageFetcher, Video};
use crate::paginator::SearchPaginator;
use crate::view::{ChunkRequest, IncrementalListView, VideoSurface, UNSAVE_CONFIRM_MESSAGE};

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Start fetching the next search page when the selection gets this close
/// to the end of the loaded results.
const SEARCH_PREFETCH_MARGIN: usize = 3;

#[derive(Clone)]
pub struct Options {
    pub status_message: String,
    pub fetcher: Arc<dyn PageFetcher>,
    pub metadata: Arc<dyn MetadataService>,
    pub store: Arc<dyn ListStore>,
    pub start_tab: ListName,
    pub config_path: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Search,
    Shelf,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    Replace,
    Append,
}

struct PendingSearch {
    request_id: u64,
    mode: LoadMode,
}

enum AsyncResponse {
    Search {
        request_id: u64,
        mode: LoadMode,
        result: Result<Option<Vec<Video>>>,
    },
    Chunk {
        request: ChunkRequest,
        result: Result<Vec<Video>>,
    },
}

/// One rendered row on the shelf: either a resolved video or a skeleton
/// standing in for an id whose metadata is still in flight.
#[derive(Clone)]
enum ShelfRow {
    Video(Video),
    Skeleton,
}

#[derive(Debug, Clone, PartialEq)]
enum Placeholder {
    Empty,
    Error(String),
}

/// The shelf's render surface: an ordered row list plus an optional
/// full-pane placeholder.
#[derive(Default)]
struct ShelfSurface {
    rows: Vec<ShelfRow>,
    placeholder: Option<Placeholder>,
}

impl ShelfSurface {
    fn video_at(&self, index: usize) -> Option<&Video> {
        match self.rows.get(index) {
            Some(ShelfRow::Video(video)) => Some(video),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

impl VideoSurface for ShelfSurface {
    fn show_skeletons(&mut self, count: usize) {
        self.placeholder = None;
        self.rows.extend(std::iter::repeat_with(|| ShelfRow::Skeleton).take(count));
    }

    fn replace_skeletons(&mut self, videos: &[Video]) {
        self.rows.retain(|row| matches!(row, ShelfRow::Video(_)));
        self.rows
            .extend(videos.iter().cloned().map(ShelfRow::Video));
    }

    fn remove_video(&mut self, id: &str) {
        self.rows
            .retain(|row| !matches!(row, ShelfRow::Video(video) if video.id == id));
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.placeholder = None;
    }

    fn show_empty(&mut self) {
        self.rows.clear();
        self.placeholder = Some(Placeholder::Empty);
    }

    fn show_error(&mut self, message: &str) {
        self.placeholder = Some(Placeholder::Error(message.to_string()));
    }
}

pub struct Model {
    screen: Screen,
    should_quit: bool,
    status_message: String,
    config_path: String,

    search_input: String,
    editing: bool,
    results: Vec<Video>,
    search_selected: usize,
    paginator: Arc<Mutex<SearchPaginator>>,
    pending_search: Option<PendingSearch>,
    // Mirrors the paginator's exhausted flag so drawing never has to take
    // the mutex a worker fetch may be holding.
    search_exhausted: bool,

    store: Arc<dyn ListStore>,
    metadata: Arc<dyn MetadataService>,
    shelf: IncrementalListView,
    surface: ShelfSurface,
    shelf_selected: usize,
    pending_chunk: Option<ChunkRequest>,
    confirm_target: Option<String>,

    response_tx: Sender<AsyncResponse>,
    response_rx: Receiver<AsyncResponse>,
    next_request_id: u64,
}

impl Model {
    pub fn new(opts: Options) -> Result<Self> {
        let (response_tx, response_rx) = unbounded();
        let shelf = IncrementalListView::new(opts.store.clone(), opts.start_tab)?;
        let mut model = Self {
            screen: Screen::Search,
            should_quit: false,
            status_message: opts.status_message,
            config_path: opts.config_path,
            search_input: String::new(),
            editing: true,
            results: Vec::new(),
            search_selected: 0,
            paginator: Arc::new(Mutex::new(SearchPaginator::new(opts.fetcher))),
            pending_search: None,
            search_exhausted: false,
            store: opts.store,
            metadata: opts.metadata,
            shelf,
            surface: ShelfSurface::default(),
            shelf_selected: 0,
            pending_chunk: None,
            confirm_target: None,
            response_tx,
            response_rx,
            next_request_id: 1,
        };
        let initial = model.shelf.begin_chunk(&mut model.surface);
        if let Some(request) = initial {
            model.spawn_chunk(request);
        }
        Ok(model)
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("create terminal")?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode().ok();
        execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.drain_responses();
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(EVENT_POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn drain_responses(&mut self) {
        while let Ok(message) = self.response_rx.try_recv() {
            self.handle_async_response(message);
        }
    }

    fn handle_async_response(&mut self, message: AsyncResponse) {
        match message {
            AsyncResponse::Search {
                request_id,
                mode,
                result,
            } => {
                let Some(pending) = &self.pending_search else {
                    return;
                };
                if pending.request_id != request_id {
                    return;
                }
                self.pending_search = None;
                self.search_exhausted = self.paginator.lock().is_exhausted();
                match result {
                    Ok(Some(items)) => {
                        match mode {
                            LoadMode::Replace => {
                                self.results = items;
                                self.search_selected = 0;
                            }
                            LoadMode::Append => self.results.extend(items),
                        }
                        self.status_message = format!(
                            "{} results for \"{}\"",
                            self.results.len(),
                            self.paginator.lock().query()
                        );
                    }
                    Ok(None) => {
                        self.status_message = "End of results.".to_string();
                    }
                    Err(err) => {
                        self.status_message = format!("Search failed: {err}");
                    }
                }
            }
            AsyncResponse::Chunk { request, result } => {
                if self.pending_chunk.as_ref() == Some(&request) {
                    self.pending_chunk = None;
                }
                self.shelf.complete_chunk(&mut self.surface, request, result);
                self.clamp_shelf_selection();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.confirm_target.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.editing {
            return self.handle_edit_key(key);
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.screen = Screen::Search,
            KeyCode::Char('2') => self.screen = Screen::Shelf,
            _ => match self.screen {
                Screen::Search => self.handle_search_key(key)?,
                Screen::Shelf => self.handle_shelf_key(key)?,
            },
        }
        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.editing = false,
            KeyCode::Enter => {
                self.editing = false;
                self.start_search();
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => self.search_input.push(c),
            _ => {}
        }
        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.confirm_target.take() {
                    // The modal already collected the user's consent.
                    let removed =
                        self.shelf
                            .unsave(&mut self.surface, &AutoConfirm(true), &id)?;
                    if removed {
                        self.status_message = "Removed from your shelf.".to_string();
                    }
                    self.clamp_shelf_selection();
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_target = None;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('i') => self.editing = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.results.is_empty() {
                    self.search_selected =
                        (self.search_selected + 1).min(self.results.len() - 1);
                    self.maybe_load_more_results();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.search_selected = self.search_selected.saturating_sub(1);
            }
            KeyCode::Char('s') | KeyCode::Enter => self.save_selected_result()?,
            _ => {}
        }
        Ok(())
    }

    fn handle_shelf_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab => {
                let target = self.shelf.other_list();
                let request = self.shelf.switch_tab(&mut self.surface, target)?;
                self.shelf_selected = 0;
                if let Some(request) = request {
                    self.spawn_chunk(request);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.surface.len() > 0 {
                    self.shelf_selected = (self.shelf_selected + 1).min(self.surface.len() - 1);
                }
                // The last row doubles as the end-of-list sentinel.
                if self.shelf_selected + 1 >= self.surface.len() {
                    self.maybe_load_more_shelf();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.shelf_selected = self.shelf_selected.saturating_sub(1);
            }
            KeyCode::Char('m') => {
                if let Some(video) = self.surface.video_at(self.shelf_selected) {
                    let id = video.id.clone();
                    self.shelf.mark_watched(&mut self.surface, &id)?;
                    self.status_message = format!(
                        "Moved to {}.",
                        self.shelf.other_list().display_name()
                    );
                    self.clamp_shelf_selection();
                }
            }
            KeyCode::Char('x') => {
                if let Some(video) = self.surface.video_at(self.shelf_selected) {
                    self.confirm_target = Some(video.id.clone());
                }
            }
            KeyCode::Char('r') => {
                let request = self.shelf.reconcile(&mut self.surface)?;
                if let Some(request) = request {
                    self.spawn_chunk(request);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn start_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            self.status_message = "Type a query first.".to_string();
            return;
        }
        if self.pending_search.is_some() {
            return;
        }
        let request_id = self.next_request_id();
        self.pending_search = Some(PendingSearch {
            request_id,
            mode: LoadMode::Replace,
        });
        self.status_message = format!("Searching for \"{query}\"...");
        let paginator = self.paginator.clone();
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let result = paginator.lock().search(&query).map(Some);
            let _ = tx.send(AsyncResponse::Search {
                request_id,
                mode: LoadMode::Replace,
                result,
            });
        });
    }

    fn maybe_load_more_results(&mut self) {
        if self.pending_search.is_some() {
            return;
        }
        if self.search_selected + SEARCH_PREFETCH_MARGIN < self.results.len() {
            return;
        }
        if self.search_exhausted {
            return;
        }
        let request_id = self.next_request_id();
        self.pending_search = Some(PendingSearch {
            request_id,
            mode: LoadMode::Append,
        });
        let paginator = self.paginator.clone();
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let result = paginator.lock().load_more();
            let _ = tx.send(AsyncResponse::Search {
                request_id,
                mode: LoadMode::Append,
                result,
            });
        });
    }

    fn save_selected_result(&mut self) -> Result<()> {
        let Some(video) = self.results.get(self.search_selected) else {
            return Ok(());
        };
        let id = video.id.clone();
        let title = video.title.clone();
        self.store.add(ListName::Unwatched, &id)?;
        // The shelf may be showing the list we just changed.
        if self.shelf.current_list() == ListName::Unwatched {
            let request = self.shelf.reconcile(&mut self.surface)?;
            if let Some(request) = request {
                self.spawn_chunk(request);
            }
        }
        self.status_message = format!("Saved \"{}\".", fit_width(&title, 40));
        Ok(())
    }

    fn maybe_load_more_shelf(&mut self) {
        if self.pending_chunk.is_some() {
            return;
        }
        let request = self.shelf.on_end_reached(&mut self.surface);
        if let Some(request) = request {
            self.spawn_chunk(request);
        }
    }

    fn spawn_chunk(&mut self, request: ChunkRequest) {
        self.pending_chunk = Some(request.clone());
        let metadata = self.metadata.clone();
        let tx = self.response_tx.clone();
        thread::spawn(move || {
            let result = metadata.resolve(&request.ids);
            let _ = tx.send(AsyncResponse::Chunk { request, result });
        });
    }

    fn next_request_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    fn clamp_shelf_selection(&mut self) {
        if self.surface.len() == 0 {
            self.shelf_selected = 0;
        } else {
            self.shelf_selected = self.shelf_selected.min(self.surface.len() - 1);
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(frame.size());

        self.draw_screen_tabs(frame, chunks[0]);
        match self.screen {
            Screen::Search => self.draw_search(frame, chunks[1]),
            Screen::Shelf => self.draw_shelf(frame, chunks[1]),
        }
        self.draw_status(frame, chunks[2]);

        if self.confirm_target.is_some() {
            self.draw_confirm_modal(frame);
        }
    }

    fn draw_screen_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let titles = vec![Line::from("[1] Search"), Line::from("[2] Shelf")];
        let selected = match self.screen {
            Screen::Search => 0,
            Screen::Shelf => 1,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(Block::default().borders(Borders::ALL).title("vidstash"))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, area);
    }

    fn draw_search(&self, frame: &mut ratatui::Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let input_title = if self.editing {
            "Query (Enter to search, Esc to stop editing)"
        } else {
            "Query (/ to edit)"
        };
        let mut input_text = self.search_input.clone();
        if self.editing {
            input_text.push('_');
        }
        let input = Paragraph::new(input_text)
            .block(Block::default().borders(Borders::ALL).title(input_title));
        frame.render_widget(input, chunks[0]);

        let list_title = if self.pending_search.is_some() {
            "Results (loading...)"
        } else if self.search_exhausted {
            "Results (end)"
        } else {
            "Results"
        };
        let width = chunks[1].width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .results
            .iter()
            .map(|video| ListItem::new(video_line(video, width)))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(list_title))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !self.results.is_empty() {
            state.select(Some(self.search_selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_shelf(&self, frame: &mut ratatui::Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let current = self.shelf.current_list();
        let titles = vec![
            Line::from(ListName::Unwatched.display_name()),
            Line::from(ListName::Watched.display_name()),
        ];
        let selected = match current {
            ListName::Unwatched => 0,
            ListName::Watched => 1,
        };
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Shelf (Tab to switch)"),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(current.display_name());

        if let Some(placeholder) = &self.surface.placeholder {
            let (text, style) = match placeholder {
                Placeholder::Empty => (
                    "No saved videos here yet.\nSearch with [1] and press s to save one."
                        .to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Placeholder::Error(message) => (
                    format!("Could not load this list.\n{message}"),
                    Style::default().fg(Color::Red),
                ),
            };
            let paragraph = Paragraph::new(text)
                .style(style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        let width = chunks[1].width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .surface
            .rows
            .iter()
            .map(|row| match row {
                ShelfRow::Video(video) => ListItem::new(video_line(video, width)),
                ShelfRow::Skeleton => ListItem::new(Line::from(Span::styled(
                    skeleton_line(width),
                    Style::default().fg(Color::DarkGray),
                ))),
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if self.surface.len() > 0 {
            state.select(Some(self.shelf_selected));
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_status(&self, frame: &mut ratatui::Frame, area: Rect) {
        let hints = match self.screen {
            Screen::Search => "s save  j/k move  / edit  q quit",
            Screen::Shelf => "m watched  x remove  r refresh  j/k move  q quit",
        };
        let width = area.width as usize;
        let left = fit_width(&self.status_message, width.saturating_sub(hints.len() + 1));
        let padding = width
            .saturating_sub(UnicodeWidthStr::width(left.as_str()))
            .saturating_sub(hints.len());
        let line = Line::from(vec![
            Span::raw(left),
            Span::raw(" ".repeat(padding)),
            Span::styled(hints, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_confirm_modal(&self, frame: &mut ratatui::Frame) {
        let area = centered_rect(50, 5, frame.size());
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(format!("{UNSAVE_CONFIRM_MESSAGE}\n\n[y] remove   [n] keep"))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Confirm"));
        frame.render_widget(paragraph, area);
    }
}

fn video_line(video: &Video, width: usize) -> Line<'static> {
    let date = video.published_at.format("%Y-%m-%d").to_string();
    let suffix = format!("  {}  {}", video.channel, date);
    let title_width = width.saturating_sub(UnicodeWidthStr::width(suffix.as_str()));
    Line::from(vec![
        Span::styled(
            fit_width(&video.title, title_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(suffix, Style::default().fg(Color::DarkGray)),
    ])
}

fn skeleton_line(width: usize) -> String {
    "\u{2592}".repeat(width.clamp(8, 24))
}

/// Truncates to `max` display columns, appending an ellipsis when cut.
fn fit_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn video(id: &str) -> Video {
        Video {
            id: id.into(),
            title: format!("title {id}"),
            channel: "chan".into(),
            thumbnail: String::new(),
            published_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn fit_width_passes_short_text_through() {
        assert_eq!(fit_width("abc", 5), "abc");
    }

    #[test]
    fn fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("abcdef", 4), "abc\u{2026}");
    }

    #[test]
    fn fit_width_counts_wide_glyphs() {
        let fitted = fit_width("🦀🦀🦀", 4);
        assert!(UnicodeWidthStr::width(fitted.as_str()) <= 4);
        assert!(fitted.ends_with('\u{2026}'));
    }

    #[test]
    fn surface_replaces_skeletons_in_order() {
        let mut surface = ShelfSurface::default();
        surface.show_skeletons(2);
        assert_eq!(surface.len(), 2);
        surface.replace_skeletons(&[video("a"), video("b")]);
        let ids: Vec<_> = surface
            .rows
            .iter()
            .filter_map(|row| match row {
                ShelfRow::Video(v) => Some(v.id.as_str()),
                ShelfRow::Skeleton => None,
            })
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn surface_keeps_existing_rows_when_appending_a_chunk() {
        let mut surface = ShelfSurface::default();
        surface.show_skeletons(1);
        surface.replace_skeletons(&[video("a")]);
        surface.show_skeletons(2);
        surface.replace_skeletons(&[video("b"), video("c")]);
        assert_eq!(surface.len(), 3);
        assert!(surface.video_at(0).is_some());
    }

    #[test]
    fn surface_remove_targets_one_id() {
        let mut surface = ShelfSurface::default();
        surface.show_skeletons(2);
        surface.replace_skeletons(&[video("a"), video("b")]);
        surface.remove_video("a");
        assert_eq!(surface.len(), 1);
        assert_eq!(surface.video_at(0).unwrap().id, "b");
    }

    #[test]
    fn skeleton_placeholder_dismissed_on_new_chunk() {
        let mut surface = ShelfSurface::default();
        surface.show_empty();
        assert_eq!(surface.placeholder, Some(Placeholder::Empty));
        surface.show_skeletons(1);
        assert!(surface.placeholder.is_none());
    }
}
