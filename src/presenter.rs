use crate::input::{self, Command};
use crate::options::Options;
use crate::render::layout::WindowSize;
use crate::render::Renderer;
use crate::roster::CHARACTERS;
use crate::showcase::Showcase;
use crate::terminal::TerminalGuard;
use crossterm::event;
use std::io;
use std::time::{Duration, Instant};

#[derive(thiserror::Error, Debug)]
pub enum PresenterError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Owns the terminal session and the event loop: one thread, crossterm
/// events polled with a frame-budget timeout, animations advanced off a
/// monotonic clock, redraws only when something changed.
pub struct Presenter {
    options: Options,
}

impl Presenter {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn present(&self) -> Result<(), PresenterError> {
        let (columns, rows) = crossterm::terminal::size()?;
        let guard = TerminalGuard::enter()?;

        let mut showcase = Showcase::new(CHARACTERS, rows, &self.options, Instant::now());
        let mut renderer =
            Renderer::new(io::stdout(), WindowSize::new(columns, rows), CHARACTERS.len());

        let frame_budget = self.options.frame_budget();
        let mut next_frame = Instant::now();
        let mut dirty = true;
        let mut running = true;

        while running {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                // Drain everything pending before painting so pointer moves
                // coalesce to the latest position per frame.
                loop {
                    if let Some(command) = input::map_event(&event::read()?, &self.options) {
                        match command {
                            Command::ScrollBy(delta) => {
                                showcase.handle_scroll(delta, Instant::now());
                                dirty = true;
                            }
                            Command::PointerMoved(column, row) => {
                                showcase.pointer_moved(column, row);
                                dirty = true;
                            }
                            Command::Resized(columns, rows) => {
                                showcase.resize(rows);
                                renderer.resize(WindowSize::new(columns, rows));
                                dirty = true;
                            }
                            Command::Quit => running = false,
                        }
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            let now = Instant::now();
            if now >= next_frame {
                if showcase.poll(now) {
                    dirty = true;
                }
                if dirty {
                    renderer.draw(&showcase)?;
                    dirty = false;
                }
                next_frame = now + frame_budget;
            }
        }

        showcase.shutdown();
        drop(guard);
        Ok(())
    }
}
