//! Stateless UI rendering for 2048.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_2048::{GameState, GameStatus};

use crate::app::App;

/// Width of one tile in terminal columns.
const CELL_WIDTH: u16 = 8;
/// Height of one tile in terminal rows.
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Title + scores
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Status
        ])
        .split(area);

    draw_header(frame, chunks[0], app.state());
    draw_board(frame, chunks[1], app.state());

    let hint = app
        .legal_moves()
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    let status = Paragraph::new(vec![
        Line::from(app.status_message()),
        Line::from(Span::styled(
            format!("legal: {hint}"),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .style(Style::default().fg(status_color(*app.state().status())))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, chunks[2]);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &GameState) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Strictly 2048",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   score {}   best {}   moves {}",
            state.score(),
            state.best_score(),
            state.moves()
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_board(frame: &mut Frame, area: Rect, state: &GameState) {
    let n = *state.size() as u16;
    let board_area = center_rect(area, n * CELL_WIDTH + 2, n * CELL_HEIGHT + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let rows = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); n as usize])
        .split(inner);

    for (r, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); n as usize])
            .split(*row_area);
        for (c, cell_area) in cols.iter().enumerate() {
            let value = state.grid()[r * n as usize + c];
            draw_tile(frame, *cell_area, value);
        }
    }
}

fn draw_tile(frame: &mut Frame, area: Rect, value: u32) {
    let (text, style) = if value == 0 {
        ("·".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (
            value.to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(tile_color(value))
                .add_modifier(Modifier::BOLD),
        )
    };

    // Middle line of the cell carries the number.
    let lines = vec![Line::from(""), Line::from(text), Line::from("")];
    let tile = Paragraph::new(lines)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(tile, area);
}

fn tile_color(value: u32) -> Color {
    match value {
        2 => Color::Rgb(238, 228, 218),
        4 => Color::Rgb(237, 224, 200),
        8 => Color::Rgb(242, 177, 121),
        16 => Color::Rgb(245, 149, 99),
        32 => Color::Rgb(246, 124, 95),
        64 => Color::Rgb(246, 94, 59),
        128 => Color::Rgb(237, 207, 114),
        256 => Color::Rgb(237, 204, 97),
        512 => Color::Rgb(237, 200, 80),
        1024 => Color::Rgb(237, 197, 63),
        2048 => Color::Rgb(237, 194, 46),
        _ => Color::Rgb(204, 192, 179),
    }
}

fn status_color(status: GameStatus) -> Color {
    match status {
        GameStatus::Playing => Color::Yellow,
        GameStatus::Won => Color::Green,
        GameStatus::Lost => Color::Red,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(LayoutDirection::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
