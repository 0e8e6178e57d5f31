//! Text rendering for each mode.
//!
//! Every renderer returns the full screen as a string so the session can
//! write it in one go. Colors come from the active theme and are skipped
//! entirely when the palette is disabled.

use crate::calculator::{
    BUTTONS, BasicCalc, CalculusCalc, DisplayState, GraphCalc, INVALID_EXPRESSION, MatrixOutcome,
    MatrixState, format_number, is_operator,
};
use crate::modes::{App, Mode, Screen};
use crate::ui::plot;
use crate::ui::theme::{Theme, ThemeStyle};
use colored::Colorize;
use std::fmt::Write;

/// Where each keypad row ends in [`BUTTONS`].
const KEYPAD_ROWS: [usize; 5] = [2, 6, 10, 14, 17];

/// Plot size used when the caller has no preference.
pub const DEFAULT_PLOT_SIZE: (usize, usize) = (61, 17);

/// Theme colors, or plain text when disabled.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    style: ThemeStyle,
    enabled: bool,
}

impl Palette {
    pub fn new(theme: Theme, enabled: bool) -> Self {
        Self {
            style: theme.style(),
            enabled,
        }
    }

    pub fn style(&self) -> &ThemeStyle {
        &self.style
    }

    fn paint(&self, s: &str, color: colored::Color) -> String {
        if self.enabled {
            s.color(color).to_string()
        } else {
            s.to_string()
        }
    }

    pub fn text(&self, s: &str) -> String {
        self.paint(s, self.style.text)
    }

    pub fn accent(&self, s: &str) -> String {
        if self.enabled {
            s.color(self.style.accent).bold().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn muted(&self, s: &str) -> String {
        self.paint(s, self.style.muted)
    }

    pub fn error(&self, s: &str) -> String {
        self.paint(s, self.style.error)
    }
}

/// Render whatever screen is active in `app`.
pub fn render(app: &App, palette: &Palette, plot_size: (usize, usize)) -> String {
    match app.screen() {
        Screen::Home => render_home(app.theme, palette),
        Screen::Basic(calc) => render_basic(calc, palette),
        Screen::Graph(graph) => render_graph(graph, palette, plot_size),
        Screen::Matrix(state) => render_matrix(state, palette),
        Screen::Calculus(calc) => render_calculus(calc, palette),
    }
}

fn header(mode: Mode, palette: &Palette) -> String {
    format!(
        "{}  {}\n",
        palette.accent(mode.title()),
        palette.muted("(:back home, :theme, :q quit)")
    )
}

pub fn render_home(theme: Theme, palette: &Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", palette.accent(Mode::Home.title()));
    for (i, mode) in Mode::MENU.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {} {:<11}{}",
            palette.accent(&format!("{}.", i + 1)),
            mode.title(),
            palette.muted(mode.description())
        );
    }
    let _ = writeln!(
        out,
        "{} {}",
        palette.muted(&format!("Theme: {} {}", theme, theme.style().glyph)),
        palette.muted("(t to cycle, q to quit)")
    );
    out
}

pub fn render_basic(calc: &BasicCalc, palette: &Palette) -> String {
    let mut out = header(Mode::Basic, palette);

    let display = calc.display();
    let shown = match display.state() {
        DisplayState::Error => palette.error(display.text()),
        _ => palette.text(display.text()),
    };
    let _ = writeln!(out, "  [ {} ]", shown);

    let mut start = 0;
    for end in KEYPAD_ROWS {
        let row: Vec<String> = BUTTONS[start..end]
            .iter()
            .map(|label| {
                let cell = format!("{:^3}", label);
                match *label {
                    "C" => palette.error(&cell),
                    "=" => palette.accent(&cell),
                    op if is_operator(op) => palette.accent(&cell),
                    _ => palette.text(&cell),
                }
            })
            .collect();
        let _ = writeln!(out, "  {}", row.join(" "));
        start = end;
    }

    if !calc.history().is_empty() {
        let _ = writeln!(out, "{}", palette.muted("History"));
        for entry in calc.history().iter() {
            let _ = writeln!(out, "  {}", palette.muted(&entry.to_string()));
        }
    }
    out
}

pub fn render_graph(graph: &GraphCalc, palette: &Palette, plot_size: (usize, usize)) -> String {
    let mut out = header(Mode::Graph, palette);
    let _ = writeln!(out, "  y = {}", palette.text(graph.equation()));

    let (width, height) = plot_size;
    let points = graph.points();
    for line in plot::render(points, width, height) {
        let line = if points.is_empty() {
            palette.error(&line)
        } else {
            palette.text(&line)
        };
        let _ = writeln!(out, "  {}", line);
    }
    let _ = writeln!(
        out,
        "  {}",
        palette.muted(&format!("{} points", points.len()))
    );
    out
}

pub fn render_matrix(state: &MatrixState, palette: &Palette) -> String {
    let mut out = header(Mode::Matrix, palette);
    for row in state.cells() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>10}", format_number(*v))).collect();
        let _ = writeln!(out, "  [{} ]", palette.text(&cells.join("")));
    }
    let _ = writeln!(
        out,
        "  {}",
        palette.muted("set i j value | row i a b c | det | inv")
    );
    if let Some(result) = state.result() {
        let text = result.to_string();
        let text = match result {
            MatrixOutcome::Failed(_) => palette.error(&text),
            _ => palette.text(&text),
        };
        let _ = writeln!(out, "{}", text);
    }
    out
}

pub fn render_calculus(calc: &CalculusCalc, palette: &Palette) -> String {
    let mut out = header(Mode::Calculus, palette);
    let _ = writeln!(out, "  f({}) = {}", calc.variable(), palette.text(calc.input()));
    if let Some(result) = calc.result() {
        let shown = if result == INVALID_EXPRESSION {
            palette.error(result)
        } else {
            palette.accent(result)
        };
        let _ = writeln!(out, "  d/d{} = {}", calc.variable(), shown);
    }
    out
}
