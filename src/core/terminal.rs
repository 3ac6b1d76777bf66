//! Terminal context and event loop for triptych.
//!
//! [TerminalContext] owns the ratatui terminal and remembers which image placement is
//! on screen. Placements are not part of the cell buffer, so they are managed here:
//! every change of the desired placement first deletes all placements, and teardown
//! deletes them before leaving the alternate screen.

use crate::app::{AppState, KeypressResult};
use crate::core::graphics::{DELETE_ALL, encode_at};
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Input poll timeout, which is also the tick interval.
const TICK: Duration = Duration::from_millis(16);

pub struct TerminalContext {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Generation and pane area of the image currently on screen.
    placed: Option<(u64, Rect)>,
}

impl TerminalContext {
    /// Enters raw mode and the alternate screen.
    pub fn init() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            placed: None,
        })
    }

    /// Deletes placements, then gives the terminal back.
    pub fn restore(&mut self) -> io::Result<()> {
        self.clear_graphics()?;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }

    /// Draws one frame and brings the image placement in line with it.
    pub fn draw(&mut self, app: &mut AppState) -> io::Result<()> {
        self.terminal.draw(|f| ui::render(f, app))?;
        self.sync_graphics(app)
    }

    fn sync_graphics(&mut self, app: &AppState) -> io::Result<()> {
        let desired = app.image_placement();
        let wanted = desired.map(|(generation, _, area)| (generation, area));
        if wanted == self.placed {
            return Ok(());
        }

        let out = self.terminal.backend_mut();
        out.write_all(DELETE_ALL.as_bytes())?;
        if let Some((generation, payload, area)) = desired {
            tracing::debug!(generation, bytes = payload.len(), "placing image");
            out.write_all(&encode_at(payload, area.y, area.x)?)?;
        }
        out.flush()?;
        self.placed = wanted;
        Ok(())
    }

    pub fn clear_graphics(&mut self) -> io::Result<()> {
        let out = self.terminal.backend_mut();
        out.write_all(DELETE_ALL.as_bytes())?;
        out.flush()?;
        self.placed = None;
        Ok(())
    }

    /// Full clear after another program used the terminal.
    pub fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()?;
        self.clear_graphics()
    }
}

/// Initializes the terminal and runs the main event loop until quit.
///
/// The terminal is restored even when the loop fails.
pub fn run_terminal(app: &mut AppState) -> io::Result<()> {
    let mut ctx = TerminalContext::init()?;
    let result = event_loop(&mut ctx, app);
    ctx.restore()?;
    result
}

fn event_loop(ctx: &mut TerminalContext, app: &mut AppState) -> io::Result<()> {
    app.tick();
    ctx.draw(app)?;

    loop {
        if app.tick() {
            ctx.draw(app)?;
        }

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match app.handle_keypress(key) {
                    KeypressResult::Quit => break,
                    KeypressResult::OpenedExternal => ctx.clear()?,
                    KeypressResult::Continue | KeypressResult::Consumed => {}
                }
                app.tick();
                ctx.draw(app)?;
            }
            Event::Resize(_, _) => {
                app.on_resize();
                ctx.clear_graphics()?;
                ctx.draw(app)?;
            }
            _ => {}
        }
    }
    Ok(())
}
