//! Chart application and TUI event loop for health-log.
//!
//! [`App`] owns the theme and drives a blocking event loop that redraws the
//! chart until the user quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use health_data::plot::PlotData;

use crate::chart_view;
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Show `plot` full-screen until `q`, `Esc` or Ctrl+C is pressed.
    pub fn run_chart(self, plot: &PlotData) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| {
                let area = frame.area();
                chart_view::render_chart(frame, area, plot, &self.theme);
            }) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if is_quit_key(&key) => break Ok(()),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_other_keys_do_not_quit() {
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_new_resolves_theme_by_name() {
        assert!(!App::new("light").theme.bright_points);
        assert!(App::new("dark").theme.bright_points);
    }
}
