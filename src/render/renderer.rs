use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Direction, Game, GameStatus, StopReason};
use crate::metrics::GameMetrics;

#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, game: &Game, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(game, metrics), chunks[0]);

        match game.status() {
            GameStatus::Running => frame.render_widget(self.render_grid(game), chunks[1]),
            GameStatus::Stopped(reason) => {
                frame.render_widget(self.render_game_over(game, metrics, reason), chunks[1])
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Head glyph points along the heading
    fn head_glyph(direction: Direction) -> &'static str {
        match direction {
            Direction::Up => "▲ ",
            Direction::Down => "▼ ",
            Direction::Left => "◀ ",
            Direction::Right => "▶ ",
        }
    }

    fn render_grid(&self, game: &Game) -> Paragraph<'static> {
        let snake = game.snake();
        let field = game.field();
        let head = snake.head();
        let body: HashSet<Cell> = snake.tail().collect();

        let lines: Vec<Line> = (0..field.height() as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..field.width() as i32)
                    .map(|x| {
                        let cell = Cell::new(x, y);
                        if cell == head {
                            Span::styled(
                                Self::head_glyph(snake.direction()),
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if body.contains(&cell) {
                            Span::styled("■ ", Style::default().fg(Color::Green))
                        } else if field.is_apple_inside(cell) {
                            Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = format!(" Snake - level {} ", game.level() + 1);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, game: &Game, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let text = vec![Line::from(vec![
            label("Score: "),
            Span::styled(
                game.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            label("Level: "),
            value(format!("{}/{}", game.level() + 1, game.config().max_level)),
            Span::raw("    "),
            label("Speed: "),
            value(format!("{}ms", game.speed())),
            Span::raw("    "),
            label("Apples: "),
            value(game.field().len().to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
            Span::raw("    "),
            label("Best: "),
            value(metrics.high_score.to_string()),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        game: &Game,
        metrics: &GameMetrics,
        reason: StopReason,
    ) -> Paragraph<'static> {
        let (headline, color) = match reason {
            StopReason::Won => ("YOU WIN", Color::Green),
            StopReason::Died(_) | StopReason::Aborted => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    game.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Levels cleared: ", Style::default().fg(Color::Yellow)),
                Span::styled(game.level().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Games: ", Style::default().fg(Color::Gray)),
                Span::raw(metrics.games_played.to_string()),
                Span::styled("   Won: ", Style::default().fg(Color::Gray)),
                Span::raw(metrics.games_won.to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}
