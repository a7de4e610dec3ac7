//! Terminal output

use crate::renderer::Frame;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufWriter, Stdout, Write, stdout};

/// Failure to get a frame onto the terminal
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write frame: {0}")]
    Io(#[from] io::Error),
}

impl RenderError {
    /// True when the reader went away (e.g. output piped into `head`)
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            RenderError::Io(e) => e.kind() == io::ErrorKind::BrokenPipe,
        }
    }
}

/// Buffered frame writer
///
/// Each frame goes out as cursor-home, clear-screen, then the frame text,
/// flushed in one go.
pub struct TerminalDisplay<W: Write> {
    buffer: BufWriter<W>,
    frames_written: u64,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self {
            buffer: BufWriter::new(writer),
            frames_written: 0,
        }
    }

    /// Clear the screen and draw `frame`
    pub fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
        // Home the cursor first: ESC[2J alone leaves it where the last frame
        // ended on most terminals, so frames would scroll instead of redraw
        queue!(self.buffer, MoveTo(0, 0), Clear(ClearType::All))?;

        // Frame text follows the clear directly, one row per line
        write!(self.buffer, "{}", frame)?;

        // One flush per frame so the terminal never shows half a frame
        self.buffer.flush()?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// The underlying writer; everything presented so far has been flushed to it
    pub fn get_ref(&self) -> &W {
        self.buffer.get_ref()
    }
}
