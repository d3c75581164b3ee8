use crate::game::{Board, Cell, Coords};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn cell_style(cell: Cell) -> (&'static str, Color) {
    match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::X => (" X ", Color::Red),
        Cell::O => (" O ", Color::Yellow),
    }
}

/// Build the board lines from the raw cell bytes, highlighting `cursor`.
pub fn board_lines(board: &Board, cursor: Option<Coords>) -> Vec<Line<'static>> {
    let width = board.width() as usize;
    let inner = "═".repeat(width * 3 + 1);
    let mut lines = Vec::with_capacity(board.height() as usize + 2);

    lines.push(Line::from(format!("╔{inner}╗")));
    for (row, bytes) in board.as_bytes().chunks(width.max(1)).enumerate() {
        let mut spans = vec![Span::raw("║")];
        for (col, &byte) in bytes.iter().enumerate() {
            let cell = Cell::try_from(byte).unwrap_or_default();
            let (symbol, color) = cell_style(cell);
            let mut style = Style::default().fg(color);
            if cursor == Some(Coords::new(row as u32, col as u32)) {
                style = style.bg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(symbol, style));
        }
        spans.push(Span::raw(" ║"));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(format!("╚{inner}╝")));

    lines
}

/// Render the board centred in `area`.
pub fn render_board(frame: &mut Frame, board: &Board, cursor: Option<Coords>, area: Rect) {
    let widget = Paragraph::new(board_lines(board, cursor)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
