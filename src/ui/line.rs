use std::io::{self, Write};

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::display::Rendered;
use crate::ui::theme;

/// Keeps a single terminal line showing the latest rendering.
pub struct LineRenderer<W: Write> {
    out: W,
    styled: bool,
    drawn: bool,
}

impl<W: Write> LineRenderer<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self {
            out,
            styled,
            drawn: false,
        }
    }

    pub fn draw(&mut self, rendered: &Rendered) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        if self.styled {
            queue!(
                self.out,
                SetForegroundColor(theme::color_for(rendered.kind)),
                Print(&rendered.text),
                ResetColor
            )?;
        } else {
            queue!(self.out, Print(&rendered.text))?;
        }
        self.drawn = true;
        self.out.flush()
    }

    /// Leave the cursor on a fresh line.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.drawn {
            writeln!(self.out)?;
            self.drawn = false;
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
