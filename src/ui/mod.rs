pub mod line;
pub mod theme;

pub use line::LineRenderer;
