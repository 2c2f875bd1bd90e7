use std::fmt;
use std::io::{self, stdin, stdout, BufRead, Write};
use std::process::exit;

use clap::{crate_version, App, Arg, ArgMatches};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use scicalc::{
    eval, parse_keys, AngleMode, Calculator, DisplayValue, EvalError, KeyError,
};

const LOG_ENV: &str = "SCICALC_LOG";

pub enum RuntimeError {
    Eval(EvalError),
    Key(KeyError),
    Readline(ReadlineError),
    IO(io::Error),
}

impl From<EvalError> for RuntimeError {
    fn from(data: EvalError) -> RuntimeError {
        RuntimeError::Eval(data)
    }
}

impl From<KeyError> for RuntimeError {
    fn from(data: KeyError) -> RuntimeError {
        RuntimeError::Key(data)
    }
}

impl From<ReadlineError> for RuntimeError {
    fn from(data: ReadlineError) -> RuntimeError {
        RuntimeError::Readline(data)
    }
}

impl From<io::Error> for RuntimeError {
    fn from(data: io::Error) -> RuntimeError {
        RuntimeError::IO(data)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RuntimeError::Eval(ref e) => write!(f, "scicalc: {}", e),
            RuntimeError::Key(ref e) => write!(f, "scicalc: {}", e),
            RuntimeError::Readline(ref e) => write!(f, "scicalc: {}", e),
            RuntimeError::IO(ref e) => write!(f, "scicalc: {}", e),
        }
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("scicalc")
        .version(crate_version!())
        .about("Scientific calculator driven by key presses")
        .arg(
            Arg::with_name("degrees")
                .short("d")
                .long("degrees")
                .help("Start in degree mode instead of radians"),
        )
        .arg(
            Arg::with_name("inverse")
                .short("i")
                .long("inverse")
                .help("Start with sin, cos and tan inverted"),
        )
        .arg(
            Arg::with_name("eval")
                .short("e")
                .long("eval")
                .takes_value(true)
                .value_name("EXPR")
                .conflicts_with("KEYS")
                .help("Evaluate an expression directly and print the result"),
        )
        .arg(
            Arg::with_name("KEYS")
                .multiple(true)
                .allow_hyphen_values(true)
                .help("Key presses, e.g. `2 + 3 =` or `deg 90 sin`"),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn prompt(calc: &Calculator) -> String {
    if calc.inverse() {
        format!("[{} inv]> ", calc.angle_mode())
    } else {
        format!("[{}]> ", calc.angle_mode())
    }
}

pub fn render<W: Write>(out: &mut W, calc: &Calculator) -> io::Result<()> {
    let (pending, current) = calc.display();
    if !pending.is_empty() {
        writeln!(out, "{}", pending)?;
    }
    writeln!(out, "{}", current)
}

fn feed(calc: &mut Calculator, line: &str) -> Result<(), KeyError> {
    for key in parse_keys(line)? {
        calc.press(key);
    }
    Ok(())
}

fn repl(mut calc: Calculator) -> Result<(), RuntimeError> {
    let mut out = stdout();
    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline(&prompt(&calc)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        match line.trim() {
            "" => (),
            "exit" | "quit" => break,
            s => {
                editor.add_history_entry(s)?;
                match feed(&mut calc, s) {
                    Ok(()) => render(&mut out, &calc)?,
                    Err(e) => writeln!(out, "scicalc: {}", e)?,
                }
            }
        }
    }
    Ok(())
}

pub fn calc(matches: &ArgMatches) -> Result<(), RuntimeError> {
    let stdout = stdout();
    let mut stdout = stdout.lock();

    if let Some(expr) = matches.value_of("eval") {
        writeln!(stdout, "{}", DisplayValue(eval(expr)?))?;
        return Ok(());
    }

    let angle_mode = if matches.is_present("degrees") {
        AngleMode::Degrees
    } else {
        AngleMode::Radians
    };
    let mut calc =
        Calculator::with_modes(angle_mode, matches.is_present("inverse"));
    debug!(%angle_mode, inverse = calc.inverse(), "calculator ready");

    if let Some(keys) = matches.values_of("KEYS") {
        feed(&mut calc, &keys.collect::<Vec<_>>().join(" "))?;
        render(&mut stdout, &calc)?;
    } else if atty::is(atty::Stream::Stdin) {
        drop(stdout);
        repl(calc)?;
    } else {
        let stdin = stdin();
        run_lines(&mut calc, stdin.lock(), &mut stdout)?;
    }
    Ok(())
}

/// Feed key lines from a non-interactive source. A line with an unknown key
/// is reported and skipped, as in the REPL.
fn run_lines<R: BufRead, W: Write>(
    calc: &mut Calculator,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match feed(calc, &line) {
            Ok(()) => render(out, calc)?,
            Err(e) => writeln!(out, "scicalc: {}", e)?,
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    let matches = app().get_matches();
    let code = match calc(&matches) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };
    exit(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_do_not_end_the_session() {
        let mut calc = Calculator::new();
        let input = "2 + 3 =\n\n2 sinh\n+ 1 =\n";
        let mut out = Vec::new();
        run_lines(&mut calc, input.as_bytes(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "5\nscicalc: unknown key: sinh\n6\n"
        );
    }

    #[test]
    fn pending_is_rendered_above_the_operand() {
        let mut calc = Calculator::new();
        let mut out = Vec::new();
        run_lines(&mut calc, "12 ×".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "12×\n0\n");
    }
}
