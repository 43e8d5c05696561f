//! Sidebar widget - quick-subscribe preset list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::super::App;
use crate::feed::FeedLink;
use crate::presets::PRESETS;

/// Draw the sidebar with the preset list
pub fn draw<L: FeedLink>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let items: Vec<ListItem> = PRESETS
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            let is_selected = i == app.preset_index;

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_selected { "> " } else { "  " };
            // Mark presets that already have a card
            let marker = if app.registry.get(preset.symbol).is_some() {
                "* "
            } else {
                "  "
            };

            let content = Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{:<13}", preset.name), style),
                Span::styled(marker, style),
                Span::styled(preset.symbol, style),
            ]);

            ListItem::new(content)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Companies "))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(app.preset_index));

    frame.render_stateful_widget(list, area, &mut state);
}
