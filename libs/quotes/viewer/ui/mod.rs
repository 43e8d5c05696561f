//! UI widgets for the quote viewer

pub mod cards;
pub mod sidebar;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::App;
use crate::feed::FeedLink;
use feedsocket::ConnectionState;

/// Draw the main UI layout
pub fn draw<L: FeedLink>(frame: &mut Frame, app: &App<L>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header<L: FeedLink>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let (status, status_color) = match app.link().connection_state() {
        ConnectionState::Open => ("Connected", Color::Green),
        ConnectionState::Connecting => ("Connecting...", Color::Yellow),
        ConnectionState::Closed => ("Disconnected", Color::Red),
    };

    let feed = if app.feed_connected {
        "Feed: Connected"
    } else {
        "Feed: Disconnected"
    };

    let metrics = app.link().metrics();
    let header_text = format!(
        " Status: {} | {} | Symbols: {} | Msgs: {} | Reconnects: {}",
        status,
        feed,
        app.registry.len(),
        metrics.messages_received,
        metrics.reconnect_count
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(status_color))
        .block(Block::default().borders(Borders::ALL).title(" Quotedeck "));

    frame.render_widget(header, area);
}

fn draw_main<L: FeedLink>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(28), // Sidebar (preset shortcuts)
            Constraint::Min(0),     // Card grid
        ])
        .split(area);

    sidebar::draw(frame, app, chunks[0]);
    cards::draw(frame, app, chunks[1]);
}

fn draw_footer<L: FeedLink>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let footer_text = match &app.status_message {
        Some(note) => format!(" Symbol: {}_ | {}", app.input, note),
        None => format!(
            " Symbol: {}_ | Enter=subscribe | up/down=presets | left/right=cards | Del=remove | Esc=clear/quit",
            app.input
        ),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
