//! Quotedeck - terminal dashboard for a live trade feed
//!
//! Subscribe to ticker symbols from the sidebar or the input line and
//! watch live prices, signed deltas, and trend sparklines per card.
//! The feed connection reconnects forever on a fixed delay.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use quotedeck::bin_common::{load_config_from_env, ConfigType};
use quotes::feed::{build_feed_client, FeedLink};
use quotes::viewer::{ui, App};
use quotes::ViewerConfig;

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Note: Logging is disabled for the TUI - it would corrupt the
    // alternate screen display

    let config_path = load_config_from_env(ConfigType::Viewer);
    let config = ViewerConfig::load(&config_path)?;

    // Create tokio runtime; the feed client task lives on it
    let runtime = tokio::runtime::Runtime::new()?;
    let client = runtime.block_on(build_feed_client(&config))?;

    let mut app = App::new(client, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Shutdown the feed client
    let client = app.into_link();
    runtime.block_on(client.shutdown())?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app<B, L>(terminal: &mut Terminal<B>, app: &mut App<L>) -> Result<()>
where
    B: ratatui::backend::Backend,
    L: FeedLink,
{
    loop {
        // Apply pending feed events, then draw
        app.drain_events();
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle input with 10ms timeout (for real-time updates)
        if event::poll(Duration::from_millis(10))? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.should_quit = true;
                        }
                        KeyCode::Enter => {
                            app.submit();
                        }
                        KeyCode::Esc => {
                            app.escape();
                        }
                        KeyCode::Backspace => {
                            app.backspace();
                        }
                        KeyCode::Up => {
                            app.prev_preset();
                        }
                        KeyCode::Down => {
                            app.next_preset();
                        }
                        KeyCode::Left => {
                            app.prev_card();
                        }
                        KeyCode::Right => {
                            app.next_card();
                        }
                        KeyCode::Delete => {
                            app.remove_selected();
                        }
                        KeyCode::Char(c) => {
                            app.push_input_char(c);
                        }
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
