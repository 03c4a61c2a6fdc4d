//! Application state and key handling.

use crossterm::event::KeyCode;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

use crate::dispatcher::{DispatchStatus, MoveDispatcher, RequestKind};
use crate::game::Difficulty;
use crate::gateway::GameGateway;
use crate::screen::{self, Screen};
use crate::setup::{self, FormErrors};
use crate::store::GameProjection;

/// Completion notice from a spawned request.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A request finished.
    Completed {
        /// What was requested.
        kind: RequestKind,
        /// Error text on failure.
        error: Option<String>,
    },
}

/// Text entry state of the two-player form.
#[derive(Debug, Default)]
pub struct NewGameForm {
    /// First player name.
    pub player_1: String,
    /// Second player name.
    pub player_2: String,
    /// Focused field, 0 or 1.
    pub focus: usize,
    /// Errors from the last submission.
    pub errors: FormErrors,
}

/// Entry state of the vs-CPU form.
#[derive(Debug, Default)]
pub struct CpuForm {
    /// Player name.
    pub player_1: String,
    /// Index into the configured levels.
    pub difficulty: Option<usize>,
    /// Focused field: 0 name, 1 difficulty.
    pub focus: usize,
    /// Errors from the last submission.
    pub errors: FormErrors,
}

/// Main application state.
pub struct App<G> {
    dispatcher: MoveDispatcher<G>,
    store_rx: watch::Receiver<GameProjection>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    screen: Screen,
    cursor_column: u32,
    difficulties: Vec<Difficulty>,
    new_game_form: NewGameForm,
    cpu_form: CpuForm,
    message: Option<String>,
    quit: bool,
}

impl<G: GameGateway + 'static> App<G> {
    /// Creates the application on the landing screen.
    #[instrument(skip_all)]
    pub fn new(
        dispatcher: MoveDispatcher<G>,
        difficulties: Vec<Difficulty>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let store_rx = dispatcher.store().subscribe();
        Self {
            dispatcher,
            store_rx,
            event_tx,
            screen: Screen::Landing,
            cursor_column: 1,
            difficulties,
            new_game_form: NewGameForm::default(),
            cpu_form: CpuForm::default(),
            message: None,
            quit: false,
        }
    }

    /// Screen being shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Latest projection.
    pub fn projection(&self) -> GameProjection {
        self.store_rx.borrow().clone()
    }

    /// Dispatcher in-flight state.
    pub fn status(&self) -> DispatchStatus {
        self.dispatcher.status()
    }

    /// Column under the selector.
    pub fn cursor_column(&self) -> u32 {
        self.cursor_column
    }

    /// Configured CPU levels.
    pub fn difficulties(&self) -> &[Difficulty] {
        &self.difficulties
    }

    /// Two-player form state.
    pub fn new_game_form(&self) -> &NewGameForm {
        &self.new_game_form
    }

    /// Vs-CPU form state.
    pub fn cpu_form(&self) -> &CpuForm {
        &self.cpu_form
    }

    /// Status-line message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Re-routes if the store changed since the last call.
    #[instrument(skip(self))]
    pub fn sync_with_store(&mut self) {
        if !self.store_rx.has_changed().unwrap_or(false) {
            return;
        }
        let projection = self.store_rx.borrow_and_update().clone();
        self.screen = screen::follow(self.screen, &projection);
        if let Some(width) = projection.width {
            self.cursor_column = self.cursor_column.clamp(1, width.max(1));
        }
    }

    /// Handles a completion notice.
    #[instrument(skip(self))]
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Completed { kind, error: None } => {
                self.message = None;
                if kind == RequestKind::Create {
                    self.navigate(Screen::PlayGame);
                }
            }
            AppEvent::Completed {
                kind,
                error: Some(error),
            } => {
                warn!(?kind, error = %error, "Request failed");
                self.message = Some(error);
            }
        }
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen {
            Screen::Landing => self.landing_key(key),
            Screen::NewGame => self.new_game_key(key),
            Screen::NewGameCpu => self.cpu_key(key),
            Screen::PlayGame => self.play_key(key),
            Screen::GameOver => self.game_over_key(key),
        }
    }

    fn navigate(&mut self, requested: Screen) {
        let projection = self.projection();
        self.screen = screen::resolve(requested, &projection);
        info!(screen = %self.screen, "Navigated");
    }

    fn landing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('1') | KeyCode::Char('n') => self.navigate(Screen::NewGame),
            KeyCode::Char('2') | KeyCode::Char('c') => self.navigate(Screen::NewGameCpu),
            KeyCode::Char('p') => self.navigate(Screen::PlayGame),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn new_game_key(&mut self, key: KeyCode) {
        let form = &mut self.new_game_form;
        match key {
            KeyCode::Esc => self.navigate(Screen::Landing),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.focus = 1 - form.focus.min(1),
            KeyCode::Backspace => {
                field_mut(form).pop();
            }
            KeyCode::Char(c) => field_mut(form).push(c),
            KeyCode::Enter => match setup::two_player(&form.player_1, &form.player_2) {
                Ok(request) => {
                    form.errors = FormErrors::default();
                    let (player_info, difficulty) = request.into_parts();
                    self.spawn_create(player_info, difficulty);
                }
                Err(errors) => {
                    debug!(%errors, "Two-player form rejected");
                    form.errors = errors;
                }
            },
            _ => {}
        }

        fn field_mut(form: &mut NewGameForm) -> &mut String {
            if form.focus == 0 {
                &mut form.player_1
            } else {
                &mut form.player_2
            }
        }
    }

    fn cpu_key(&mut self, key: KeyCode) {
        let level_count = self.difficulties.len();
        let form = &mut self.cpu_form;
        match key {
            KeyCode::Esc => self.navigate(Screen::Landing),
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => form.focus = 1 - form.focus.min(1),
            KeyCode::Left | KeyCode::Right if form.focus == 1 && level_count > 0 => {
                let step = if key == KeyCode::Right { 1 } else { level_count - 1 };
                form.difficulty = Some(match form.difficulty {
                    Some(index) => (index + step) % level_count,
                    None => 0,
                });
            }
            KeyCode::Backspace if form.focus == 0 => {
                form.player_1.pop();
            }
            KeyCode::Char(c) if form.focus == 0 => form.player_1.push(c),
            KeyCode::Enter => {
                let level = form.difficulty.and_then(|i| self.difficulties.get(i));
                match setup::versus_cpu(&form.player_1, level) {
                    Ok(request) => {
                        form.errors = FormErrors::default();
                        let (player_info, difficulty) = request.into_parts();
                        self.spawn_create(player_info, difficulty);
                    }
                    Err(errors) => {
                        debug!(%errors, "CPU form rejected");
                        form.errors = errors;
                    }
                }
            }
            _ => {}
        }
    }

    fn play_key(&mut self, key: KeyCode) {
        let width = self.projection().width.unwrap_or(1).max(1);
        match key {
            KeyCode::Left => self.cursor_column = self.cursor_column.saturating_sub(1).max(1),
            KeyCode::Right => self.cursor_column = (self.cursor_column + 1).min(width),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.drop_disc(self.cursor_column),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(column) = c.to_digit(10).filter(|&d| d >= 1 && d <= width) {
                    self.cursor_column = column;
                    self.drop_disc(column);
                }
            }
            KeyCode::Char('r') => self.spawn_reset(),
            KeyCode::Char('g') => self.spawn_refresh(),
            KeyCode::Esc => self.navigate(Screen::Landing),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn game_over_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') => self.spawn_reset(),
            KeyCode::Char('n') => {
                let next = screen::rematch(&self.projection());
                self.navigate(next);
            }
            KeyCode::Esc => self.navigate(Screen::Landing),
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    /// Sends a move if the column is open and nothing is in flight.
    fn drop_disc(&mut self, column: u32) {
        if self.status().is_submitting() {
            debug!(column, "Selector disabled while a request is in flight");
            return;
        }
        if !self.projection().is_column_open(column) {
            self.message = Some(format!("Column {} is full", column));
            return;
        }
        let dispatcher = self.dispatcher.clone();
        self.spawn(RequestKind::Move { column }, async move {
            dispatcher.submit_current(column).await.map(|_| ())
        });
    }

    fn spawn_create(&mut self, player_info: crate::game::PlayerInfo, difficulty: Option<Difficulty>) {
        let dispatcher = self.dispatcher.clone();
        self.spawn(RequestKind::Create, async move {
            dispatcher
                .create_game(player_info, difficulty)
                .await
                .map(|_| ())
        });
    }

    fn spawn_reset(&mut self) {
        let dispatcher = self.dispatcher.clone();
        self.spawn(RequestKind::Reset, async move {
            dispatcher.reset_current().await.map(|_| ())
        });
    }

    fn spawn_refresh(&mut self) {
        let dispatcher = self.dispatcher.clone();
        let Some(game_id) = self.projection().id else {
            return;
        };
        self.spawn(RequestKind::Refresh, async move {
            dispatcher.refresh(&game_id).await.map(|_| ())
        });
    }

    /// Runs a request on its own task so drawing continues meanwhile.
    fn spawn<F>(&mut self, kind: RequestKind, request: F)
    where
        F: std::future::Future<Output = Result<(), crate::dispatcher::DispatchError>>
            + Send
            + 'static,
    {
        self.message = None;
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let error = request.await.err().map(|e| e.to_string());
            if event_tx.send(AppEvent::Completed { kind, error }).is_err() {
                debug!("App gone before request completed");
            }
        });
    }
}
