//! Connect Four board rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::dispatcher::DispatchStatus;
use crate::game::Occupant;
use crate::store::GameProjection;

const DISC: &str = " ● ";
const HOLE: &str = " · ";

fn occupant_span(occupant: Occupant) -> Span<'static> {
    match occupant {
        Occupant::Empty => Span::styled(HOLE, Style::default().fg(Color::DarkGray)),
        Occupant::Player1 => Span::styled(
            DISC,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Occupant::Player2 => Span::styled(
            DISC,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    }
}

/// Columns the selector offers.
///
/// Empty once the game is over or while a request is in flight.
pub fn selectable_columns(projection: &GameProjection, status: &DispatchStatus) -> Vec<u32> {
    if projection.finished.is_some() || status.is_submitting() {
        return Vec::new();
    }
    projection.avail_cols.clone().unwrap_or_default()
}

/// Renders the grid with the column selector underneath.
///
/// Only open columns get a marker; none are shown once the game is over or
/// while a request is in flight.
pub fn render_board(
    f: &mut Frame,
    area: Rect,
    projection: &GameProjection,
    cursor_column: u32,
    status: &DispatchStatus,
) {
    let width = projection.width.unwrap_or(0);
    let mut lines: Vec<Line> = projection
        .grid()
        .into_iter()
        .map(|row| {
            let mut spans = vec![Span::styled("│", Style::default().fg(Color::Blue))];
            spans.extend(row.cells.into_iter().map(occupant_span));
            spans.push(Span::styled("│", Style::default().fg(Color::Blue)));
            Line::from(spans)
        })
        .collect();

    lines.push(Line::from(Span::styled(
        format!("└{}┘", "─".repeat(width as usize * 3)),
        Style::default().fg(Color::Blue),
    )));

    let selectable = selectable_columns(projection, status);
    let mut selector = vec![Span::raw(" ")];
    for column in 1..=width {
        let open = selectable.contains(&column);
        let label = if open {
            format!(" {} ", column)
        } else {
            "   ".to_string()
        };
        let style = if column == cursor_column && open {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default().fg(Color::Cyan)
        };
        selector.push(Span::styled(label, style));
    }
    lines.push(Line::from(selector));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Board"));
    f.render_widget(paragraph, area);
}

/// Plain-text board, top row first, for non-interactive output.
pub fn format_board(projection: &GameProjection) -> String {
    let mut result = String::new();
    for row in projection.grid() {
        result.push('|');
        for occupant in row.cells {
            result.push(match occupant {
                Occupant::Empty => '.',
                Occupant::Player1 => 'X',
                Occupant::Player2 => 'O',
            });
        }
        result.push_str("|\n");
    }
    let width = projection.width.unwrap_or(0);
    result.push('+');
    result.push_str(&"-".repeat(width as usize));
    result.push('+');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::RequestKind;
    use crate::game::{Board, Cell, GameId, GameState, Outcome, PlayerInfo};
    use ratatui::{Terminal, backend::TestBackend};

    fn fresh_projection() -> GameProjection {
        GameProjection::from_session(
            PlayerInfo::new("a".into(), "b".into()),
            GameState::fresh(GameId::from(1), 2, 2, None),
        )
    }

    fn rendered(projection: &GameProjection, status: &DispatchStatus) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).expect("Terminal failed");
        terminal
            .draw(|f| {
                let area = f.area();
                render_board(f, area, projection, 1, status);
            })
            .expect("Draw failed");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_selector_offers_open_columns_when_idle() {
        let projection = fresh_projection();
        assert_eq!(
            selectable_columns(&projection, &DispatchStatus::Idle),
            vec![1, 2]
        );
        let screen = rendered(&projection, &DispatchStatus::Idle);
        assert!(screen.contains('1'));
        assert!(screen.contains('2'));
    }

    #[test]
    fn test_selector_hidden_while_submitting() {
        let projection = fresh_projection();
        let status = DispatchStatus::Submitting(RequestKind::Move { column: 1 });
        assert!(selectable_columns(&projection, &status).is_empty());
        let screen = rendered(&projection, &status);
        assert!(!screen.contains('1'));
        assert!(!screen.contains('2'));
    }

    #[test]
    fn test_selector_hidden_once_finished() {
        let mut projection = fresh_projection();
        projection.finished = Some(Outcome::Draw);
        assert!(selectable_columns(&projection, &DispatchStatus::Idle).is_empty());
    }

    #[test]
    fn test_format_board_draws_bottom_row_last() {
        let mut state_board = Board::empty(2, 2);
        state_board.free.retain(|c| *c != Cell::new(1, 2));
        state_board.player_2.push(Cell::new(1, 2));
        let mut projection = GameProjection::from_session(
            PlayerInfo::new("a".into(), "b".into()),
            GameState::fresh(GameId::from(1), 2, 2, None),
        );
        projection.board = Some(state_board);

        assert_eq!(format_board(&projection), "|..|\n|.O|\n+--+");
    }
}
