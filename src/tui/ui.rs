//! Stateless rendering of each screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::dispatcher::{DispatchStatus, RequestKind};
use crate::gateway::GameGateway;
use crate::screen::Screen;
use crate::setup::{FormErrors, FormField};

use super::app::App;
use super::board::render_board;

/// Draws the current screen.
pub fn draw<G: GameGateway + 'static>(frame: &mut Frame, app: &App<G>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Body
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new(format!("Connect Four - {}", app.screen()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::Landing => draw_landing(frame, chunks[1]),
        Screen::NewGame => draw_new_game(frame, chunks[1], app),
        Screen::NewGameCpu => draw_cpu_game(frame, chunks[1], app),
        Screen::PlayGame => draw_play(frame, chunks[1], app),
        Screen::GameOver => draw_game_over(frame, chunks[1], app),
    }

    draw_status(frame, chunks[2], app);
}

fn draw_landing(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from("Welcome to Connect Four"),
        Line::from(""),
        Line::from("1  New game (two players)"),
        Line::from("2  New game vs CPU"),
        Line::from("p  Resume current game"),
        Line::from("q  Quit"),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("{}: ", label)),
        Span::styled(format!("{:<20}", value), style),
    ])
}

fn error_line(errors: &FormErrors, field: FormField) -> Line<'static> {
    match errors.for_field(field) {
        Some(error) => Line::from(Span::styled(
            format!("  {}", error.message),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

fn draw_new_game<G: GameGateway + 'static>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let form = app.new_game_form();
    let text = vec![
        field_line("First Player Name ", &form.player_1, form.focus == 0),
        error_line(&form.errors, FormField::Player1),
        field_line("Second Player Name", &form.player_2, form.focus == 1),
        error_line(&form.errors, FormField::Player2),
        Line::from(""),
        Line::from("Tab switch field · Enter submit · Esc cancel"),
    ];
    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_cpu_game<G: GameGateway + 'static>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let form = app.cpu_form();
    let level = form
        .difficulty
        .and_then(|i| app.difficulties().get(i))
        .map(|d| format!("< {} >", d))
        .unwrap_or_else(|| "< select >".to_string());
    let text = vec![
        field_line("First Player Name", &form.player_1, form.focus == 0),
        error_line(&form.errors, FormField::Player1),
        field_line("Set Difficulty   ", &level, form.focus == 1),
        error_line(&form.errors, FormField::Difficulty),
        Line::from(""),
        Line::from("Tab switch field · ←/→ difficulty · Enter submit · Esc cancel"),
    ];
    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_play<G: GameGateway + 'static>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let projection = app.projection();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);

    let turn = projection
        .current_player
        .map(|player| format!("{}'s turn", projection.name_of(player)))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(turn)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        chunks[0],
    );

    render_board(
        frame,
        chunks[1],
        &projection,
        app.cursor_column(),
        &app.status(),
    );
}

fn draw_game_over<G: GameGateway + 'static>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let projection = app.projection();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(area);

    let text = vec![
        Line::from(Span::styled(
            projection.result_text().unwrap_or_default(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("r rematch (same players) · n new game · Esc quit to menu"),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        chunks[0],
    );
    render_board(frame, chunks[1], &projection, 0, &app.status());
}

fn draw_status<G: GameGateway + 'static>(frame: &mut Frame, area: Rect, app: &App<G>) {
    let (text, color) = match (app.status(), app.message()) {
        (DispatchStatus::Submitting(kind), _) => (pending_text(kind), Color::Yellow),
        (_, Some(message)) => (message.to_string(), Color::Red),
        (DispatchStatus::Failed(failure), None) => (failure.to_string(), Color::Red),
        (DispatchStatus::Idle, None) => (hint_text(app.screen()).to_string(), Color::Gray),
    };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn pending_text(kind: RequestKind) -> String {
    match kind {
        RequestKind::Create => "Creating game...".to_string(),
        RequestKind::Move { column } => format!("Dropping disc in column {}...", column),
        RequestKind::Reset => "Resetting board...".to_string(),
        RequestKind::Refresh => "Refreshing...".to_string(),
    }
}

fn hint_text(screen: Screen) -> &'static str {
    match screen {
        Screen::PlayGame => "←/→ choose column · Enter drop · r reset · g refresh · Esc menu",
        Screen::GameOver => "Game over",
        _ => "q quit",
    }
}
