pub mod plot;
pub mod screens;
pub mod theme;

pub use screens::{DEFAULT_PLOT_SIZE, Palette, render};
pub use theme::{Theme, ThemeStyle};
