//! Quote card grid - price, signed delta, and trend sparkline per symbol

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::super::App;
use crate::feed::FeedLink;
use crate::registry::QuoteState;
use crate::spark::{format_delta, format_price, is_gain, sparkline_points};
use crate::window::SlidingWindow;

const GRID_COLUMNS: usize = 2;

/// Draw the card grid, or the empty placeholder when nothing is
/// subscribed
pub fn draw<L: FeedLink>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let symbols = app.registry.symbols();

    if symbols.is_empty() {
        let empty = Paragraph::new(
            "\n No symbols subscribed.\n\n Pick a company from the sidebar or type a ticker and press Enter.",
        )
        .style(Style::default().add_modifier(Modifier::DIM))
        .block(Block::default().borders(Borders::ALL).title(" Quotes "));
        frame.render_widget(empty, area);
        return;
    }

    let rows = symbols.len().div_ceil(GRID_COLUMNS);
    let row_constraints: Vec<Constraint> =
        (0..rows).map(|_| Constraint::Ratio(1, rows as u32)).collect();
    let row_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row, row_area) in row_chunks.iter().enumerate() {
        let column_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(*row_area);

        for column in 0..GRID_COLUMNS {
            let index = row * GRID_COLUMNS + column;
            let Some(symbol) = symbols.get(index) else {
                continue;
            };
            if let Some(state) = app.registry.get(symbol) {
                draw_card(frame, state, index == app.selected_card, column_chunks[column]);
            }
        }
    }
}

fn draw_card(frame: &mut Frame, state: &QuoteState, selected: bool, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", state.symbol()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Price
            Constraint::Length(1), // Delta
            Constraint::Min(0),    // Sparkline
        ])
        .split(inner);

    match (state.last_price(), state.baseline()) {
        (Some(price), Some(baseline)) => {
            let price_line = Paragraph::new(format_price(price))
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(price_line, chunks[0]);

            let delta_color = if is_gain(baseline, price) {
                Color::Green
            } else {
                Color::Red
            };
            let delta_line = Paragraph::new(format_delta(baseline, price))
                .style(Style::default().fg(delta_color));
            frame.render_widget(delta_line, chunks[1]);
        }
        _ => {
            // No trade yet
            let waiting =
                Paragraph::new("-").style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(waiting, chunks[0]);
        }
    }

    draw_sparkline(frame, state.window(), chunks[2]);
}

fn draw_sparkline(frame: &mut Frame, window: &SlidingWindow, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let prices = window.to_vec();
    let width = f64::from(area.width);
    let height = f64::from(area.height);
    let points = sparkline_points(&prices, width, height);

    let canvas = Canvas::default()
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .marker(Marker::Braille)
        .paint(move |ctx| {
            for pair in points.windows(2) {
                // The polyline y grows downward, the canvas y upward
                ctx.draw(&CanvasLine {
                    x1: pair[0].0,
                    y1: height - pair[0].1,
                    x2: pair[1].0,
                    y2: height - pair[1].1,
                    color: Color::Cyan,
                });
            }
        });

    frame.render_widget(canvas, area);
}
