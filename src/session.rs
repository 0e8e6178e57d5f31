//! Interactive line-driven session.
//!
//! Reads one line at a time and feeds it to the active screen, then
//! redraws. Generic over the reader and writer so it runs the same on a
//! terminal and in tests.

use crate::calculator::{Focus, Key};
use crate::engine::ExpressionEvaluator;
use crate::modes::{App, Mode, Screen};
use crate::ui::{Palette, Theme, render};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Whether the session keeps going after a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Display options for a session.
#[derive(Clone, Copy, Debug)]
pub struct SessionOptions {
    pub theme: Theme,
    pub color: bool,
    pub plot_size: (usize, usize),
}

pub struct Session<E, R, W> {
    evaluator: E,
    input: R,
    output: W,
    app: App,
    color: bool,
    plot_size: (usize, usize),
    notice: Option<String>,
}

impl<E, R, W> Session<E, R, W>
where
    E: ExpressionEvaluator,
    R: BufRead,
    W: Write,
{
    pub fn new(evaluator: E, input: R, output: W, options: SessionOptions) -> Self {
        Self {
            evaluator,
            input,
            output,
            app: App::new(options.theme),
            color: options.color,
            plot_size: options.plot_size,
            notice: None,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Consume the session, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `q`, `:q`, or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.draw()?;
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                tracing::debug!("End of input");
                break;
            }

            let line = line.trim_end_matches(['\n', '\r']);
            if self.handle_line(line) == Control::Quit {
                break;
            }
            self.draw()?;
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let palette = Palette::new(self.app.theme, self.color);
        let screen = render(&self.app, &palette, self.plot_size);
        write!(self.output, "{}", screen).context("Failed to write output")?;
        if let Some(notice) = self.notice.take() {
            writeln!(self.output, "{}", palette.error(&notice)).context("Failed to write output")?;
        }
        write!(self.output, "> ").context("Failed to write output")?;
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    /// Apply one input line to the app.
    pub fn handle_line(&mut self, line: &str) -> Control {
        match line.trim() {
            ":q" => return Control::Quit,
            ":back" => {
                self.app.back();
                return Control::Continue;
            }
            ":theme" => {
                self.app.cycle_theme();
                return Control::Continue;
            }
            _ => {}
        }

        match self.app.mode() {
            Mode::Home => return self.handle_home(line.trim()),
            Mode::Basic => self.handle_basic(line),
            Mode::Graph => self.handle_graph(line.trim()),
            Mode::Matrix => self.handle_matrix(line.trim()),
            Mode::Calculus => self.handle_calculus(line.trim()),
        }
        Control::Continue
    }

    fn handle_home(&mut self, line: &str) -> Control {
        match line {
            "" => {}
            "q" | "quit" => return Control::Quit,
            "t" | "theme" => {
                self.app.cycle_theme();
            }
            query => match Mode::lookup(query) {
                Some(mode) => {
                    self.app.navigate(mode);
                    if let Screen::Graph(graph) = self.app.screen_mut() {
                        graph.plot(&self.evaluator);
                    }
                }
                None => self.notice = Some(format!("Unknown option: {}", query)),
            },
        }
        Control::Continue
    }

    /// Each character is a key press; an empty line is Enter.
    fn handle_basic(&mut self, line: &str) {
        let Screen::Basic(calc) = self.app.screen_mut() else {
            return;
        };
        if line.trim().is_empty() {
            calc.handle_key(Key::Enter, Focus::None, &self.evaluator);
            return;
        }
        for c in line.chars() {
            match c {
                'C' | 'c' => calc.handle_button("C", &self.evaluator),
                '=' => calc.handle_button("=", &self.evaluator),
                '<' => {
                    calc.handle_key(Key::Backspace, Focus::None, &self.evaluator);
                }
                c if c.is_whitespace() => {}
                c => {
                    calc.handle_key(Key::Char(c), Focus::None, &self.evaluator);
                }
            }
        }
    }

    fn handle_graph(&mut self, line: &str) {
        let Screen::Graph(graph) = self.app.screen_mut() else {
            return;
        };
        if !line.is_empty() {
            graph.set_equation(line);
        }
        graph.plot(&self.evaluator);
    }

    fn handle_matrix(&mut self, line: &str) {
        let Screen::Matrix(state) = self.app.screen_mut() else {
            return;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let outcome = match parts.as_slice() {
            [] => Ok(()),
            ["det"] => {
                state.determinant(&self.evaluator);
                Ok(())
            }
            ["inv"] => {
                state.inverse(&self.evaluator);
                Ok(())
            }
            ["set", row, col, value] => match (parse_index(row), parse_index(col)) {
                (Some(row), Some(col)) => state.set_cell(row, col, value).map_err(|e| e.to_string()),
                _ => Err("Row and column must be 1-3".to_string()),
            },
            ["row", row, values @ ..] => match parse_index(row) {
                Some(row) => state.set_row(row, values).map_err(|e| e.to_string()),
                None => Err("Row must be 1-3".to_string()),
            },
            _ => Err(format!("Unknown command: {}", line)),
        };
        if let Err(message) = outcome {
            self.notice = Some(message);
        }
    }

    fn handle_calculus(&mut self, line: &str) {
        let Screen::Calculus(calc) = self.app.screen_mut() else {
            return;
        };
        if !line.is_empty() {
            calc.set_input(line);
        }
        calc.differentiate(&self.evaluator);
    }
}

/// Parse a 1-based grid index into a 0-based one.
fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok()?.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MathEngine;
    use crate::ui::DEFAULT_PLOT_SIZE;
    use std::io::Cursor;

    fn options() -> SessionOptions {
        SessionOptions {
            theme: Theme::Dark,
            color: false,
            plot_size: DEFAULT_PLOT_SIZE,
        }
    }

    fn run_script(script: &str) -> String {
        let mut session = Session::new(MathEngine, Cursor::new(script.to_string()), Vec::new(), options());
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    fn session() -> Session<MathEngine, Cursor<String>, Vec<u8>> {
        Session::new(MathEngine, Cursor::new(String::new()), Vec::new(), options())
    }

    #[test]
    fn test_quit_from_home() {
        let out = run_script("q\nnever\n");
        assert!(out.starts_with("CalcFlow Pro\n"));
        assert!(!out.contains("Unknown option"));
    }

    #[test]
    fn test_basic_session() {
        let out = run_script("1\n2+3*4=\n:q\n");
        assert!(out.contains("[ 14 ]"));
        assert!(out.contains("2+3*4 = 14"));
    }

    #[test]
    fn test_basic_enter_and_backspace() {
        let mut session = session();
        session.handle_line("basic");
        session.handle_line("12<");
        session.handle_line("+1");
        session.handle_line("");
        match session.app().screen() {
            Screen::Basic(calc) => assert_eq!(calc.display().text(), "2"),
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_back_discards_state() {
        let mut session = session();
        session.handle_line("1");
        session.handle_line("99");
        session.handle_line(":back");
        assert_eq!(session.app().mode(), Mode::Home);
        session.handle_line("1");
        match session.app().screen() {
            Screen::Basic(calc) => assert_eq!(calc.display().text(), "0"),
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_graph_session() {
        let mut session = session();
        session.handle_line("graph");
        match session.app().screen() {
            Screen::Graph(graph) => assert_eq!(graph.points().len(), 101),
            other => panic!("unexpected screen {:?}", other),
        }
        session.handle_line("1/x");
        match session.app().screen() {
            Screen::Graph(graph) => {
                assert_eq!(graph.equation(), "1/x");
                assert_eq!(graph.points().len(), 100);
            }
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_matrix_session() {
        let out = run_script("3\nset 1 1 1\nset 2 2 1\nset 3 3 1\ndet\n:q\n");
        assert!(out.contains("1.0000"));

        let out = run_script("matrix\ninv\n:q\n");
        assert!(out.contains("Error: Cannot calculate inverse, determinant is zero"));

        let out = run_script("matrix\nset 4 1 2\n:q\n");
        assert!(out.contains("is outside the 3x3 grid"));

        let out = run_script("matrix\nset 0 x 2\ntranspose\n:q\n");
        assert!(out.contains("Row and column must be 1-3"));
        assert!(out.contains("Unknown command: transpose"));
    }

    #[test]
    fn test_matrix_rows() {
        let mut session = session();
        session.handle_line("matrix");
        session.handle_line("row 2 4 -2 5");
        match session.app().screen() {
            Screen::Matrix(state) => assert_eq!(state.cells()[1], [4.0, -2.0, 5.0]),
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_calculus_session() {
        let out = run_script("4\n\nsin(x)^2\n:q\n");
        let expected = MathEngine.derivative("x^2 + 3x + 1", "x").unwrap();
        assert!(out.contains(&format!("d/dx = {}", expected)));
        assert!(out.contains("f(x) = sin(x)^2"));
        assert!(!out.contains("Invalid expression"));

        let out = run_script("calc\nx +\n:q\n");
        assert!(out.contains("d/dx = Invalid expression"));
    }

    #[test]
    fn test_theme_cycling() {
        let mut session = session();
        session.handle_line("t");
        assert_eq!(session.app().theme, Theme::Light);
        session.handle_line("2");
        session.handle_line(":theme");
        assert_eq!(session.app().theme, Theme::Neon);
        assert_eq!(session.app().mode(), Mode::Graph);
    }

    #[test]
    fn test_unknown_home_option() {
        let out = run_script("7\n:q\n");
        assert!(out.contains("Unknown option: 7"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let out = run_script("1\n5*5=");
        assert!(out.contains("[ 25 ]"));
    }
}
