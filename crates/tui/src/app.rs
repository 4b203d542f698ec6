use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use showcase_core::{
    bootstrap,
    view::{CardView, TagChip},
    AccentColor, AppConfig, CatalogSource, ModalHit, ModalState, Overlay, Showcase, Surface,
};
use tokio::{sync::mpsc, time::Instant as TokioInstant};
use tracing::{debug, error, info};

use crate::{
    layout::{self, OverlayLayout, ScreenLayout, ACTION_LABEL, CLOSE_LABEL},
    watch::CatalogWatcher,
};

const CARD_HEIGHT: u16 = 8;
const IDLE_WAKE: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct Theme {
    background: AccentColor,
    primary_fg: Color,
    muted: Color,
    chip_fg: Color,
    selection: Color,
    accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: AccentColor::new(0, 0, 0),
            primary_fg: Color::White,
            muted: Color::Gray,
            chip_fg: Color::LightBlue,
            selection: Color::Yellow,
            accent: Color::Cyan,
        }
    }
}

fn to_color(color: AccentColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub(crate) enum AppEvent {
    Input(Event),
    Tick,
    CatalogReloaded(u64),
    CatalogFailed(String),
}

/// Click targets recorded during the last draw. Replaced wholesale each frame.
#[derive(Default)]
struct HitMap {
    cards: Vec<(Rect, usize)>,
    icons: Vec<(Rect, String)>,
}

struct UiState {
    cursor: usize,
    offset: usize,
    visible_cards: usize,
    status: String,
    loaded_at: DateTime<Local>,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            cursor: 0,
            offset: 0,
            visible_cards: 1,
            status: "Ready".to_string(),
            loaded_at: Local::now(),
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn move_cursor(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, total as isize - 1);
        self.cursor = idx as usize;
        self.ensure_cursor_visible(total);
    }

    fn clamp_cursor(&mut self, total: usize) {
        if total == 0 {
            self.cursor = 0;
            self.offset = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
        self.ensure_cursor_visible(total);
    }

    fn ensure_cursor_visible(&mut self, total: usize) {
        let height = self.visible_cards.max(1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        self.offset = self.offset.min(total.saturating_sub(height));
    }
}

/// Set up the terminal, bootstrap the showcase and run until the user quits.
pub async fn run(source: CatalogSource, config: AppConfig) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enter raw mode")?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    terminal.hide_cursor()?;
    terminal.clear()?;

    let result = run_app(&mut terminal, source, config).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    source: CatalogSource,
    config: AppConfig,
) -> Result<()> {
    let layout = ScreenLayout::compute(terminal.size()?);
    let showcase =
        bootstrap(&layout, source.snapshot(), &config).context("failed to bootstrap showcase")?;
    let mut app = ShowcaseApp::new(showcase, source, config, layout);
    app.event_loop(terminal).await
}

/// Terminal frontend driving a [`Showcase`].
pub struct ShowcaseApp {
    showcase: Showcase,
    source: CatalogSource,
    config: AppConfig,
    layout: ScreenLayout,
    state: UiState,
    hits: HitMap,
    theme: Theme,
    watcher: Option<CatalogWatcher>,
}

impl ShowcaseApp {
    fn new(
        showcase: Showcase,
        source: CatalogSource,
        config: AppConfig,
        layout: ScreenLayout,
    ) -> Self {
        let mut state = UiState::default();
        state.set_status(format!("Loaded {} games", showcase.catalog().len()));
        Self {
            showcase,
            source,
            config,
            layout,
            state,
            hits: HitMap::default(),
            theme: Theme::default(),
            watcher: None,
        }
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone(), self.config.tick_rate());

        if self.config.watch_catalog {
            match CatalogWatcher::spawn(self.source.clone(), event_tx.clone()) {
                Ok(Some(watcher)) => {
                    info!(path = %watcher.path().display(), "Watching catalog file");
                    self.watcher = Some(watcher);
                }
                Ok(None) => {}
                Err(err) => {
                    error!(?err, "Catalog watch disabled");
                    self.state.set_status(format!("Catalog watch disabled: {err}"));
                }
            }
        }
        drop(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let wake = self
                .showcase
                .next_deadline()
                .map(TokioInstant::from_std)
                .unwrap_or_else(|| TokioInstant::now() + IDLE_WAKE);

            tokio::select! {
                maybe_event = event_rx.recv() => {
                    if !self.process_app_event(maybe_event) {
                        break;
                    }
                }
                _ = tokio::time::sleep_until(wake) => {}
            }

            self.showcase.poll(std::time::Instant::now());
        }

        self.watcher = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                self.handle_input(event);
                true
            }
            Some(AppEvent::Tick) => true,
            Some(AppEvent::CatalogReloaded(revision)) => {
                self.showcase.replace_catalog(self.source.snapshot());
                self.state.loaded_at = Local::now();
                let total = self.showcase.list().cards().len();
                self.state.clamp_cursor(total);
                info!(revision, total, "List re-rendered after catalog change");
                self.state.set_status(format!("Catalog reloaded ({total} games)"));
                true
            }
            Some(AppEvent::CatalogFailed(message)) => {
                error!(%message, "Catalog reload failed");
                self.state.set_status(format!("Catalog reload failed: {message}"));
                true
            }
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.layout = ScreenLayout::compute(Rect::new(0, 0, width, height));
                debug!(width, height, "Terminal resized");
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let now = std::time::Instant::now();
        if key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.state.should_quit = true;
            return;
        }

        match self.showcase.top_overlay() {
            Some(overlay) => match key.code {
                KeyCode::Esc | KeyCode::Char('x') => {
                    self.showcase.close(overlay, now);
                }
                KeyCode::Enter | KeyCode::Char('w') if overlay == Overlay::Detail => {
                    self.trigger_primary_action(now);
                }
                _ => {}
            },
            None => {
                let total = self.showcase.list().cards().len();
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => self.state.move_cursor(-1, total),
                    KeyCode::Down | KeyCode::Char('j') => self.state.move_cursor(1, total),
                    KeyCode::Home | KeyCode::Char('g') => {
                        self.state.move_cursor(isize::MIN / 2, total)
                    }
                    KeyCode::End | KeyCode::Char('G') => {
                        self.state.move_cursor(isize::MAX / 2, total)
                    }
                    KeyCode::Enter => self.open_card(self.state.cursor),
                    KeyCode::Char('r') => {
                        self.showcase.rerender();
                        self.state.clamp_cursor(self.showcase.list().cards().len());
                        self.state.set_status("List re-rendered".to_string());
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let now = std::time::Instant::now();
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(overlay) = self.showcase.top_overlay() {
                    self.click_overlay(overlay, column, row, now);
                    return;
                }
                let hit = self
                    .hits
                    .cards
                    .iter()
                    .find(|(rect, _)| layout::contains(*rect, column, row))
                    .map(|(_, index)| *index);
                if let Some(index) = hit {
                    self.state.cursor = index;
                    self.open_card(index);
                }
            }
            MouseEventKind::ScrollDown if self.showcase.top_overlay().is_none() => {
                self.state.move_cursor(1, self.showcase.list().cards().len());
            }
            MouseEventKind::ScrollUp if self.showcase.top_overlay().is_none() => {
                self.state.move_cursor(-1, self.showcase.list().cards().len());
            }
            MouseEventKind::Moved => {
                let tooltip = self
                    .hits
                    .icons
                    .iter()
                    .find(|(rect, _)| layout::contains(*rect, column, row))
                    .map(|(_, tooltip)| tooltip.clone());
                if let Some(tooltip) = tooltip {
                    self.state.set_status(tooltip);
                }
            }
            _ => {}
        }
    }

    fn click_overlay(&mut self, overlay: Overlay, column: u16, row: u16, now: std::time::Instant) {
        let regions = self.overlay_regions(overlay);
        if layout::contains(regions.close, column, row) {
            self.showcase.close(overlay, now);
            return;
        }
        if let Some(action) = regions.action {
            if overlay == Overlay::Detail && layout::contains(action, column, row) {
                self.trigger_primary_action(now);
                return;
            }
        }
        let hit = if layout::contains(regions.content, column, row) {
            ModalHit::Content
        } else {
            ModalHit::Backdrop
        };
        self.showcase.click(overlay, hit, now);
    }

    /// Regions as currently drawn; a closing overlay uses its shrunken panel.
    fn overlay_regions(&self, overlay: Overlay) -> OverlayLayout {
        let regions = *self.layout.overlay(overlay);
        let state = match overlay {
            Overlay::Detail => self.showcase.detail().modal().state(),
            Overlay::Wiki => self.showcase.wiki().modal().state(),
        };
        if state == ModalState::Closing {
            regions.shrunk()
        } else {
            regions
        }
    }

    fn open_card(&mut self, index: usize) {
        if self.showcase.activate_card(index) {
            if let Some(view) = self.showcase.detail().modal().content() {
                info!(id = view.id, title = %view.title, "Detail opened");
                self.state.set_status(format!("Viewing {}", view.title));
            }
        }
    }

    fn trigger_primary_action(&mut self, now: std::time::Instant) {
        if self.showcase.primary_action(now) {
            if let Some(view) = self.showcase.wiki().modal().content() {
                self.state.set_status(view.header.clone());
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        self.layout = ScreenLayout::compute(frame.size());
        self.hits = HitMap::default();

        self.draw_header(frame, self.layout.header);
        self.draw_list(frame, self.layout.list);
        self.draw_status(frame, self.layout.status);

        if let Some(missing) = self.layout.first_missing() {
            let warning = Paragraph::new(format!("Terminal too small ({missing} hidden)"))
                .style(Style::default().fg(Color::Red));
            frame.render_widget(warning, self.layout.status);
            return;
        }

        if self.showcase.detail().modal().is_visible() {
            self.draw_detail(frame);
        }
        if self.showcase.wiki().modal().is_visible() {
            self.draw_wiki(frame);
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Our Games",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ·  catalog loaded {}", self.state.loaded_at.format("%H:%M:%S")),
                Style::default().fg(self.theme.muted),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        frame.render_widget(header, area);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let list = self.showcase.list().clone();
        if list.shows_empty_state() {
            let empty = Paragraph::new("No games available yet. Check back soon!")
                .style(Style::default().fg(self.theme.muted))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Games"));
            frame.render_widget(empty, area);
            return;
        }

        let cards = list.cards();
        self.state.visible_cards = usize::from((area.height / CARD_HEIGHT).max(1));
        self.state.clamp_cursor(cards.len());

        let end = (self.state.offset + self.state.visible_cards).min(cards.len());
        for (slot, index) in (self.state.offset..end).enumerate() {
            let y = area.y + slot as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.y + area.height - y);
            let rect = Rect::new(area.x, y, area.width, height);
            self.draw_card(frame, rect, &cards[index], index == self.state.cursor);
            self.hits.cards.push((rect, index));
        }
    }

    fn draw_card(&mut self, frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
        let accent = to_color(card.accent);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        if selected {
            block = block
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(self.theme.selection));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let title = Span::styled(
            card.title.clone(),
            Style::default()
                .fg(self.theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        );
        let icons: Vec<Span> = card
            .platforms
            .iter()
            .map(|icon| Span::raw(format!("{:<2}", icon.glyph.unwrap_or(""))))
            .collect();
        let icons_width: usize = icons.iter().map(|span| span.width() + 1).sum();
        let padding = usize::from(inner.width).saturating_sub(title.width() + icons_width);

        let mut icon_x = inner.x + (title.width() + padding) as u16;
        let mut first_line = vec![title, Span::raw(" ".repeat(padding))];
        for (icon, span) in card.platforms.iter().zip(icons) {
            let width = span.width() as u16;
            if icon_x + width <= inner.x + inner.width {
                self.hits
                    .icons
                    .push((Rect::new(icon_x, inner.y, width, 1), icon.tooltip.clone()));
            }
            icon_x += width + 1;
            first_line.push(span);
            first_line.push(Span::raw(" "));
        }

        let mut lines = vec![
            Line::from(first_line),
            Line::from(Span::styled(
                card.release.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
        ];
        for text in clamp_lines(&card.description, usize::from(inner.width), card.line_clamp) {
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(self.theme.muted),
            )));
        }
        while lines.len() < 2 + card.line_clamp {
            lines.push(Line::default());
        }
        lines.push(Line::from(self.chip_spans(&card.tags)));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn chip_spans(&self, chips: &[TagChip]) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(chips.len() * 4);
        for chip in chips {
            let border =
                Style::default().fg(to_color(chip.border.blend_over(self.theme.background)));
            spans.push(Span::styled("(", border));
            spans.push(Span::styled(
                chip.label.clone(),
                Style::default().fg(self.theme.chip_fg),
            ));
            spans.push(Span::styled(")", border));
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn draw_backdrop(frame: &mut Frame, area: Rect) {
        frame.buffer_mut().set_style(
            area,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        );
    }

    fn draw_detail(&self, frame: &mut Frame) {
        let modal = self.showcase.detail().modal();
        let Some(view) = modal.content() else {
            return;
        };
        let regions = self.overlay_regions(Overlay::Detail);
        Self::draw_backdrop(frame, regions.root);

        let content = regions.content;
        frame.render_widget(Clear, content);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                format!(" {} ", view.title),
                Style::default()
                    .fg(to_color(view.title_color))
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(content);
        frame.render_widget(block, content);

        let body = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height.saturating_sub(2),
        );
        let lines = vec![
            Line::from(Span::styled(
                view.release_line.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(view.description.clone()),
            Line::default(),
            Line::from(vec![
                Span::styled("Platforms: ", Style::default().fg(self.theme.muted)),
                Span::raw(view.platforms.clone()),
            ]),
            Line::default(),
            Line::from(self.chip_spans(&view.tags)),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);

        frame.render_widget(
            Paragraph::new(CLOSE_LABEL).style(Style::default().fg(self.theme.primary_fg)),
            regions.close,
        );
        if let Some(action) = regions.action {
            frame.render_widget(
                Paragraph::new(ACTION_LABEL).style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(to_color(view.title_color))
                        .add_modifier(Modifier::BOLD),
                ),
                action,
            );
        }
    }

    fn draw_wiki(&self, frame: &mut Frame) {
        let modal = self.showcase.wiki().modal();
        let Some(view) = modal.content() else {
            return;
        };
        let regions = self.overlay_regions(Overlay::Wiki);
        Self::draw_backdrop(frame, regions.root);

        let content = regions.content;
        frame.render_widget(Clear, content);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Span::styled(
                format!(" {} ", view.header),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(block, content);

        frame.render_widget(
            Paragraph::new(CLOSE_LABEL).style(Style::default().fg(self.theme.primary_fg)),
            regions.close,
        );
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.showcase.top_overlay() {
            Some(Overlay::Detail) => "Enter/w wiki · Esc close · q quit",
            Some(Overlay::Wiki) => "Esc close · q quit",
            None => "↑/↓ select · Enter open · r re-render · q quit",
        };
        let line = Line::from(vec![
            Span::styled(
                self.state.status.clone(),
                Style::default().fg(self.theme.primary_fg),
            ),
            Span::styled(format!("  │  {hints}"), Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Word-wrap `text` to `width` and keep at most `max_lines`, marking the cut
/// with an ellipsis. The source text is never modified.
fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();
        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        current = word.chars().take(width).collect();
    }
    if !truncated && !current.is_empty() {
        if lines.len() == max_lines {
            truncated = true;
        } else {
            lines.push(current);
        }
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            let mut kept: String = last.chars().take(width.saturating_sub(1)).collect();
            kept.push('…');
            *last = kept;
        }
    }
    lines
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>, tick_rate: Duration) {
    thread::spawn(move || loop {
        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use showcase_core::Catalog;

    fn test_app() -> Result<(ShowcaseApp, Terminal<TestBackend>)> {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40));
        let config = AppConfig {
            transition_ms: 60_000,
            ..AppConfig::default()
        };
        let source = CatalogSource::in_memory(Catalog::builtin());
        let showcase = bootstrap(&layout, source.snapshot(), &config)?;
        let app = ShowcaseApp::new(showcase, source, config, layout);
        let terminal = Terminal::new(TestBackend::new(120, 40))?;
        Ok((app, terminal))
    }

    fn redraw(app: &mut ShowcaseApp, terminal: &mut Terminal<TestBackend>) -> Result<()> {
        terminal.draw(|frame| app.draw(frame))?;
        Ok(())
    }

    fn click(app: &mut ShowcaseApp, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn open_first_card(app: &mut ShowcaseApp, terminal: &mut Terminal<TestBackend>) -> Result<()> {
        redraw(app, terminal)?;
        let (card, _) = app.hits.cards[0];
        click(app, card.x + 1, card.y + 1);
        redraw(app, terminal)
    }

    fn text_at(terminal: &Terminal<TestBackend>, rect: Rect) -> String {
        let buffer = terminal.backend().buffer();
        (rect.x..rect.x + rect.width)
            .map(|x| buffer.get(x, rect.y).symbol())
            .collect()
    }

    fn detail_state(app: &ShowcaseApp) -> ModalState {
        app.showcase.detail().modal().state()
    }

    fn wiki_state(app: &ShowcaseApp) -> ModalState {
        app.showcase.wiki().modal().state()
    }

    #[test]
    fn card_click_opens_detail_once() -> Result<()> {
        let (mut app, mut terminal) = test_app()?;
        redraw(&mut app, &mut terminal)?;
        redraw(&mut app, &mut terminal)?;
        assert_eq!(app.hits.cards.len(), 1);

        open_first_card(&mut app, &mut terminal)?;
        assert_eq!(detail_state(&app), ModalState::Open);
        assert_eq!(wiki_state(&app), ModalState::Closed);
        assert_eq!(app.state.status, "Viewing PETS");
        let close = app.layout.detail.close;
        assert_eq!(text_at(&terminal, close), CLOSE_LABEL);
        Ok(())
    }

    #[test]
    fn content_click_keeps_detail_and_backdrop_dismisses() -> Result<()> {
        let (mut app, mut terminal) = test_app()?;
        open_first_card(&mut app, &mut terminal)?;

        let content = app.layout.detail.content;
        click(&mut app, content.x + 2, content.y + 3);
        assert_eq!(detail_state(&app), ModalState::Open);

        click(&mut app, 0, 0);
        assert_eq!(detail_state(&app), ModalState::Closing);
        Ok(())
    }

    #[test]
    fn close_button_starts_close() -> Result<()> {
        let (mut app, mut terminal) = test_app()?;
        open_first_card(&mut app, &mut terminal)?;

        let close = app.layout.detail.close;
        click(&mut app, close.x + 1, close.y);
        assert_eq!(detail_state(&app), ModalState::Closing);
        assert_eq!(wiki_state(&app), ModalState::Closed);
        Ok(())
    }

    #[test]
    fn closing_detail_only_reacts_where_buttons_are_drawn() -> Result<()> {
        let (mut app, mut terminal) = test_app()?;
        open_first_card(&mut app, &mut terminal)?;
        click(&mut app, 0, 0);
        redraw(&mut app, &mut terminal)?;
        assert_eq!(detail_state(&app), ModalState::Closing);

        let open_action = app.layout.detail.action.expect("detail action");
        let shrunk = app.layout.detail.shrunk();
        let action = shrunk.action.expect("shrunk detail action");
        assert_eq!(text_at(&terminal, action), ACTION_LABEL);
        assert_eq!(text_at(&terminal, shrunk.close), CLOSE_LABEL);

        click(&mut app, open_action.x + 1, open_action.y);
        assert_eq!(wiki_state(&app), ModalState::Closed);

        click(&mut app, action.x + 1, action.y);
        assert_eq!(wiki_state(&app), ModalState::Open);
        assert_eq!(
            app.showcase.wiki().modal().content().map(|w| w.header.as_str()),
            Some("PETS - Official Wiki")
        );
        Ok(())
    }

    #[test]
    fn wiki_on_top_takes_backdrop_clicks() -> Result<()> {
        let (mut app, mut terminal) = test_app()?;
        open_first_card(&mut app, &mut terminal)?;
        let action = app.layout.detail.action.expect("detail action");
        click(&mut app, action.x + 1, action.y);
        assert_eq!(wiki_state(&app), ModalState::Open);

        click(&mut app, 0, 0);
        assert_eq!(wiki_state(&app), ModalState::Closing);
        assert_eq!(detail_state(&app), ModalState::Closing);
        Ok(())
    }

    #[test]
    fn short_text_is_not_clamped() {
        assert_eq!(clamp_lines("hello world", 20, 3), vec!["hello world"]);
    }

    #[test]
    fn long_text_is_clamped_with_ellipsis() {
        let text = "one two three four five six seven eight nine ten";
        let lines = clamp_lines(text, 10, 3);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "one two");
        assert_eq!(lines[1], "three four");
        assert!(lines[2].ends_with('…'));
        assert!(lines.iter().all(|line| line.chars().count() <= 10));
    }

    #[test]
    fn exact_fit_has_no_ellipsis() {
        let lines = clamp_lines("aa bb cc", 2, 3);
        assert_eq!(lines, vec!["aa", "bb", "cc"]);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = UiState {
            visible_cards: 2,
            ..UiState::default()
        };
        state.move_cursor(5, 3);
        assert_eq!(state.cursor, 2);
        assert_eq!(state.offset, 1);
        state.move_cursor(-10, 3);
        assert_eq!((state.cursor, state.offset), (0, 0));
        state.clamp_cursor(0);
        assert_eq!(state.cursor, 0);
    }
}
