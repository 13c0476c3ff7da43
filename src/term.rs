use std::io::stdout;

use color_eyre::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// One-shot screen reset before the report is printed. Behind a trait so the
/// pipeline can run with a no-op in tests and non-interactive contexts.
pub trait ScreenReset {
    fn reset(&mut self) -> Result<()>;
}

pub struct CrosstermScreen;

impl ScreenReset for CrosstermScreen {
    fn reset(&mut self) -> Result<()> {
        execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}

/// Used when `--no-clear` is set and in tests.
pub struct NoopScreen;

impl ScreenReset for NoopScreen {
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}
