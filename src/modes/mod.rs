//! Top-level mode selector.
//!
//! Exactly one calculator component is live at a time. Navigating away
//! drops it, so returning to a mode always starts from fresh state.

use crate::calculator::{BasicCalc, CalculusCalc, Focus, GraphCalc, Key, MatrixState};
use crate::engine::ExpressionEvaluator;
use crate::ui::theme::Theme;

/// A selectable screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Home,
    Basic,
    Graph,
    Matrix,
    Calculus,
}

impl Mode {
    /// Modes listed on the home screen, in menu order.
    pub const MENU: [Mode; 4] = [Mode::Basic, Mode::Graph, Mode::Matrix, Mode::Calculus];

    /// Get the title shown in the header and menu.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "CalcFlow Pro",
            Self::Basic => "Calculator",
            Self::Graph => "Graph",
            Self::Matrix => "Matrix",
            Self::Calculus => "Calculus",
        }
    }

    /// Get the short name accepted on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Basic => "basic",
            Self::Graph => "graph",
            Self::Matrix => "matrix",
            Self::Calculus => "calc",
        }
    }

    /// Get the one-line description shown on the home screen.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Home => "",
            Self::Basic => "Keypad arithmetic with history",
            Self::Graph => "Plot y = f(x) over [-10, 10]",
            Self::Matrix => "3x3 determinant and inverse",
            Self::Calculus => "Symbolic derivatives",
        }
    }

    /// Look up a menu mode by 1-based index, title, or short name.
    pub fn lookup(query: &str) -> Option<Self> {
        let query = query.trim();
        if let Ok(index) = query.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| Self::MENU.get(i))
                .copied();
        }
        Self::MENU.iter().copied().find(|mode| {
            mode.title().eq_ignore_ascii_case(query) || mode.short_name().eq_ignore_ascii_case(query)
        })
    }
}

/// The live component for the active mode.
#[derive(Clone, Debug, Default)]
pub enum Screen {
    #[default]
    Home,
    Basic(BasicCalc),
    Graph(GraphCalc),
    Matrix(MatrixState),
    Calculus(CalculusCalc),
}

impl Screen {
    /// Fresh component state for a mode.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Home => Self::Home,
            Mode::Basic => Self::Basic(BasicCalc::new()),
            Mode::Graph => Self::Graph(GraphCalc::new()),
            Mode::Matrix => Self::Matrix(MatrixState::new()),
            Mode::Calculus => Self::Calculus(CalculusCalc::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::Home => Mode::Home,
            Self::Basic(_) => Mode::Basic,
            Self::Graph(_) => Mode::Graph,
            Self::Matrix(_) => Mode::Matrix,
            Self::Calculus(_) => Mode::Calculus,
        }
    }
}

/// Application state: the active screen and the theme.
#[derive(Clone, Debug, Default)]
pub struct App {
    pub theme: Theme,
    screen: Screen,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            screen: Screen::Home,
        }
    }

    pub fn mode(&self) -> Mode {
        self.screen.mode()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Switch modes. The previous component's state is discarded.
    pub fn navigate(&mut self, mode: Mode) {
        tracing::debug!(from = ?self.mode(), to = ?mode, "Navigate");
        self.screen = Screen::for_mode(mode);
    }

    pub fn back(&mut self) {
        self.navigate(Mode::Home);
    }

    pub fn cycle_theme(&mut self) -> Theme {
        self.theme = self.theme.next();
        self.theme
    }

    /// Route a key press to the active screen. Only the basic calculator
    /// listens to the keyboard; returns `true` if the key was handled.
    pub fn handle_key(
        &mut self,
        key: Key,
        focus: Focus,
        evaluator: &impl ExpressionEvaluator,
    ) -> bool {
        match &mut self.screen {
            Screen::Basic(calc) => calc.handle_key(key, focus, evaluator),
            _ => false,
        }
    }
}
