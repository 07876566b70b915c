use crossterm::style::Color;

use crate::display::RenderKind;
use crate::locale::Direction;

pub const RELATIVE_PAST: Color = Color::White;

pub const RELATIVE_FUTURE: Color = Color::Cyan;

pub const ABSOLUTE: Color = Color::DarkGrey;

pub fn color_for(kind: RenderKind) -> Color {
    match kind {
        RenderKind::Relative(Direction::Past) => RELATIVE_PAST,
        RenderKind::Relative(Direction::Future) => RELATIVE_FUTURE,
        RenderKind::Absolute => ABSOLUTE,
    }
}
