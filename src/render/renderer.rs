use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Position, SnakeGame};

const BODY_COLOR: Color = Color::Rgb(0, 128, 0);
const FOOD_COLOR: Color = Color::Rgb(80, 80, 255);
const HEAD_COLOR: Color = Color::Rgb(255, 255, 0);

/// Terminal columns used per grid cell, so cells come out roughly square
pub const CELL_COLUMNS: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R>(&self, frame: &mut Frame, game: &SnakeGame<R>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(game), chunks[0]);

        let game_area = centered(
            chunks[1],
            game.width() as u16 * CELL_COLUMNS + 2,
            game.height() as u16 + 2,
        );
        frame.render_widget(self.render_grid(game), game_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// One styled line per grid row
    pub fn grid_lines<R>(&self, game: &SnakeGame<R>) -> Vec<Line<'static>> {
        let head = game.head();

        (0..game.height() as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..game.width() as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            return Span::styled(
                                "██",
                                Style::default().fg(HEAD_COLOR).add_modifier(Modifier::BOLD),
                            );
                        }
                        match game.cell_at(pos) {
                            Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                            Cell::Food => Span::styled("██", Style::default().fg(FOOD_COLOR)),
                            _ => Span::styled("██", Style::default().fg(BODY_COLOR)),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_grid<R>(&self, game: &SnakeGame<R>) -> Paragraph<'static> {
        Paragraph::new(self.grid_lines(game)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_header<R>(&self, game: &SnakeGame<R>) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("Grid: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}x{}", game.width(), game.height()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Step: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}ms", game.config().step_rate.as_millis()),
                Style::default().fg(Color::White),
            ),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width`x`height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
