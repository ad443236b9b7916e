use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;

use crate::client::api::{ApiError, PostApi};
use crate::client::types::{LikeResponse, Post};
use crate::media::MediaHandle;
use crate::session::Session;
use crate::ui::draw;

use super::detail::{DetailView, LikeAction, LikeOutcome, LikeTicket, Liveness};
use super::views::{View, ViewStack};

const PLAYBACK_HELP: &str = "space: play/pause · m: mute";
const LIKE_HELP: &str = "l: like/unlike · +/-: like/dislike";
const NAV_HELP: &str = "Esc: back · q: quit";

/// Result of a like/dislike write, routed back to the view that issued it.
pub struct LikeCompletion {
    pub seq: u64,
    pub liveness: Liveness,
    pub result: Result<LikeResponse, ApiError>,
}

pub struct App {
    pub api: Arc<dyn PostApi>,
    pub session: Session,
    pub view_stack: ViewStack,
    pub status_line: String,
    pub video_area: Rect,
    running: bool,
    like_sender: mpsc::Sender<LikeCompletion>,
    like_receiver: mpsc::Receiver<LikeCompletion>,
}

impl App {
    pub fn new(api: Arc<dyn PostApi>, session: Session) -> Self {
        let (like_sender, like_receiver) = mpsc::channel(16);
        Self {
            api,
            session,
            view_stack: ViewStack::new(),
            status_line: String::new(),
            video_area: Rect::default(),
            running: true,
            like_sender,
            like_receiver,
        }
    }

    /// Presents a loaded post. The session is handed to the view here and
    /// nowhere else.
    pub fn open_detail(&mut self, post: Post, media: Box<dyn MediaHandle>) {
        let detail = DetailView::new(post, media, self.session.clone());
        self.view_stack.push_detail_view(detail);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn current_detail(&mut self) -> Option<&mut DetailView> {
        self.view_stack.current_view().map(View::detail_mut)
    }

    pub fn has_notice(&mut self) -> bool {
        self.current_detail()
            .map(|detail| detail.notice().is_some())
            .unwrap_or(false)
    }

    fn spawn_like_task(&self, ticket: LikeTicket) {
        let api = Arc::clone(&self.api);
        let sender = self.like_sender.clone();

        tokio::spawn(async move {
            let result = api.update_like(&ticket.request).await;
            if !ticket.liveness.is_live() {
                log::info!("Like #{} resolved after its view closed", ticket.seq);
                return;
            }
            let completion = LikeCompletion {
                seq: ticket.seq,
                liveness: ticket.liveness,
                result,
            };
            if sender.send(completion).await.is_err() {
                log::warn!("Like #{} resolved after the app stopped", ticket.seq);
            }
        });
    }

    fn handle_like(&mut self, action: Option<LikeAction>) {
        let Some(detail) = self.current_detail() else {
            return;
        };
        let ticket = match action {
            Some(action) => detail.begin_like(action),
            None => detail.toggle_like(),
        };
        match ticket {
            Some(ticket) => self.spawn_like_task(ticket),
            None => log::info!("Like ignored: no viewer or view closed"),
        }
    }

    /// Applies a finished write to the view that issued it, if that view
    /// is still on the stack.
    pub fn apply_like_completion(&mut self, completion: LikeCompletion) -> LikeOutcome {
        if !completion.liveness.is_live() {
            return LikeOutcome::Discarded;
        }
        match self.view_stack.find_detail(&completion.liveness) {
            Some(detail) => detail.complete_like(completion.seq, completion.result),
            None => {
                log::warn!("Like #{} has no matching view", completion.seq);
                LikeOutcome::Discarded
            }
        }
    }

    fn drain_like_completions(&mut self) {
        while let Ok(completion) = self.like_receiver.try_recv() {
            self.apply_like_completion(completion);
        }
    }

    /// Waits for the next like/dislike write to come back and applies it.
    pub async fn next_like_completion(&mut self) -> Option<LikeOutcome> {
        let completion = self.like_receiver.recv().await?;
        Some(self.apply_like_completion(completion))
    }

    fn go_back(&mut self) {
        self.view_stack.pop_view();
        if self.view_stack.is_empty() {
            self.running = false;
        }
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if let Some(detail) = self.current_detail() {
            detail.dismiss_notice();
        }
        match key {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('p') => {
                if let Some(detail) = self.current_detail() {
                    detail.toggle_playback();
                }
            }
            KeyCode::Char('m') => {
                if let Some(detail) = self.current_detail() {
                    detail.toggle_mute();
                }
            }
            KeyCode::Char('l') => self.handle_like(None),
            KeyCode::Char('+') => self.handle_like(Some(LikeAction::Like)),
            KeyCode::Char('-') => self.handle_like(Some(LikeAction::Dislike)),
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            KeyCode::Char('q') => {
                while self.view_stack.pop_view().is_some() {}
                self.running = false;
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if self.video_area.contains(Position::new(mouse.column, mouse.row)) {
                if let Some(detail) = self.current_detail() {
                    detail.toggle_playback();
                }
            }
        }
    }

    pub async fn run(mut self) -> Result<()> {
        // Terminal initialization
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main event loop
        let result = self.event_loop(&mut terminal).await;

        // Cleanup
        self.cleanup(&mut terminal)?;

        // Return any error that occurred
        result
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(100);
        let mut last_tick = Instant::now();

        while self.running {
            self.drain_like_completions();

            terminal.draw(|f| draw(f, self))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_input(key.code);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                // Let spawned writes make progress between frames.
                tokio::task::yield_now().await;
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    fn cleanup<B: Backend + Write>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.view_stack.pop_view().is_some() {}
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    pub fn update_status(&mut self) {
        let (notice, pending) = match self.current_detail() {
            Some(detail) => (
                detail.notice().map(str::to_string),
                detail.like_control().is_some_and(|control| control.pending),
            ),
            None => (None, false),
        };
        self.status_line = match notice {
            Some(notice) => notice,
            None if pending => format!("Updating like… · {NAV_HELP}"),
            None if self.session.is_signed_in() => {
                format!("{PLAYBACK_HELP} · {LIKE_HELP} · {NAV_HELP}")
            }
            None => format!("{PLAYBACK_HELP} · {NAV_HELP}"),
        };
    }
}
