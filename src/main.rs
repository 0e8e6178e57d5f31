use anyhow::{Context, Result, bail};
use calcflow::calculator::{
    CalculusCalc, INVALID_EXPRESSION, MatrixOutcome, MatrixState, SampleSweep, evaluate_expression,
};
use calcflow::config::Config;
use calcflow::engine::MathEngine;
use calcflow::logging::init_logging;
use calcflow::session::{Session, SessionOptions};
use calcflow::ui::{Palette, Theme, plot};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "calcflow",
    version,
    about = "Multi-mode calculator: arithmetic, graphs, matrices and derivatives",
    long_about = "Multi-mode calculator: arithmetic, graphs, matrices and derivatives.\n\n\
                  Run without a subcommand for the interactive session."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Color theme (overrides the config file).
    #[arg(long, value_enum, global = true)]
    theme: Option<Theme>,

    /// Disable ANSI colors.
    #[arg(long, global = true)]
    no_color: bool,

    /// Read configuration from PATH instead of the default location.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate an expression.
    Eval {
        #[arg(required = true, allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Plot y = f(x) over [-10, 10].
    Plot {
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Print the sampled points as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Determinant or inverse of a 3x3 matrix given in row-major order.
    Matrix {
        #[arg(value_enum)]
        operation: MatrixOp,

        #[arg(num_args = 9, value_name = "VALUE", allow_negative_numbers = true)]
        values: Vec<String>,
    },

    /// Differentiate an expression.
    Derive {
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Variable to differentiate with respect to.
        #[arg(long = "var", default_value = "x")]
        variable: String,
    },

    /// List the available themes.
    Themes,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixOp {
    Det,
    Inv,
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(cli.verbose) {
        eprintln!("error: failed to initialize logging: {error:#}");
        std::process::exit(1);
    }

    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let theme = cli.theme.unwrap_or(config.theme);
    let color = config.color && !cli.no_color;
    let palette = Palette::new(theme, color);
    let engine = MathEngine::new();

    tracing::debug!(%theme, color, "Starting");

    let Some(command) = cli.command else {
        let options = SessionOptions {
            theme,
            color,
            plot_size: config.plot.size(),
        };
        let stdin = io::stdin();
        let mut session = Session::new(engine, stdin.lock(), io::stdout(), options);
        return session.run().context("Interactive session failed");
    };

    match command {
        Command::Eval { expression } => {
            let result = evaluate_expression(&engine, &expression.join(" "));
            if !result.is_success() {
                bail!("{}", result.display());
            }
            println!("{}", palette.text(result.display()));
        }
        Command::Plot { expression, json } => {
            let points = SampleSweep::default().plot(&engine, &expression);
            if json {
                let out = serde_json::to_string_pretty(&points)
                    .context("Failed to serialize points")?;
                println!("{}", out);
            } else {
                let (width, height) = config.plot.size();
                for line in plot::render(&points, width, height) {
                    println!("{}", palette.text(&line));
                }
            }
        }
        Command::Matrix { operation, values } => {
            let mut state = MatrixState::new();
            for (i, raw) in values.iter().enumerate() {
                state.set_cell(i / 3, i % 3, raw)?;
            }
            let outcome = match operation {
                MatrixOp::Det => state.determinant(&engine),
                MatrixOp::Inv => state.inverse(&engine),
            };
            if let MatrixOutcome::Failed(message) = outcome {
                bail!("{}", message);
            }
            println!("{}", palette.text(&outcome.to_string()));
        }
        Command::Derive {
            expression,
            variable,
        } => {
            let mut calc = CalculusCalc::new();
            calc.set_input(expression);
            calc.set_variable(variable);
            let result = calc.differentiate(&engine).to_string();
            if result == INVALID_EXPRESSION {
                bail!("{}: {}", INVALID_EXPRESSION, calc.input());
            }
            println!("{}", palette.accent(&result));
        }
        Command::Themes => {
            for t in Theme::ORDER {
                let marker = if t == theme { "*" } else { " " };
                let line = format!("{} {} {}", marker, t.style().glyph, t);
                let themed = Palette::new(t, color);
                println!("{}", themed.accent(&line));
            }
        }
    }
    Ok(())
}
