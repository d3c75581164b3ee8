use crate::engine::TreeStats;
use crate::game::{Board, Cell, Coords, Outcome};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;

/// Everything the play screen shows for one frame.
pub struct GameView<'a> {
    pub title: &'static str,
    pub board: &'a Board,
    pub cursor: Coords,
    pub side_to_move: Cell,
    pub outcome: Option<Outcome>,
    pub stats: TreeStats,
    pub expanding: bool,
    pub message: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let board_rows = view.board.height() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header
            Constraint::Min(board_rows), // Board
            Constraint::Length(4),       // Tree stats
            Constraint::Length(3),       // Message
            Constraint::Length(3),       // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    board_widget::render_board(frame, view.board, Some(view.cursor), chunks[1]);
    render_stats(frame, view, chunks[2]);
    render_message(frame, view.message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn side_color(side: Cell) -> Color {
    match side {
        Cell::X => Color::Red,
        Cell::O => Color::Yellow,
        Cell::Empty => Color::White,
    }
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let (status, color) = match view.outcome {
        Some(Outcome::Winner(side)) => (format!("{} wins!", side.name()), side_color(side)),
        Some(Outcome::Draw) => ("It's a draw!".to_string(), Color::White),
        None => (
            format!("{} to move", view.side_to_move.name()),
            side_color(view.side_to_move),
        ),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(view.title));

    frame.render_widget(header, area);
}

fn render_stats(frame: &mut Frame, view: &GameView, area: Rect) {
    let stats = view.stats;
    let depth = match stats.max_depth {
        Some(max) => format!("{} / {}", stats.expanded_plies, max),
        None => stats.expanded_plies.to_string(),
    };
    let state = if view.expanding { "expanding" } else { "done" };

    let lines = vec![
        Line::from(format!("Nodes: {}  |  Frontier: {}", stats.nodes, stats.frontier)),
        Line::from(format!("Plies: {depth}  |  {state}")),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Search"));

    frame.render_widget(widget, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let text = "Arrows: Move  |  Enter: Place  |  A: Engine move  |  R: Restart  |  Q: Quit";
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
