use polycalc::{tokenize, Environment, Evaluator, Grammar, PolynomialInterpreter};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "\
usage: polycalc                          interactive calculator
       polycalc --lex                    interactive tokenizer
       polycalc EXPRESSION [NAME=VALUE]  evaluate once with the given bindings";

fn main() -> Result<(), String> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => run_repl().map_err(|e| e.to_string()),
        Some("--lex") => run_lexer_repl().map_err(|e| e.to_string()),
        Some("-h" | "--help") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(expression) => run_once(expression, &args[1..]),
    }
}

// Illegal characters are reported through `warn!`, so keep that level on
// unless RUST_LOG says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run_once(expression: &str, arguments: &[String]) -> Result<(), String> {
    let mut bindings = Vec::with_capacity(arguments.len());
    for argument in arguments {
        let Some((name, value)) = argument.split_once('=') else {
            return Err(format!("expected NAME=VALUE, got '{argument}'\n{USAGE}"));
        };
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("'{value}' is not a number"))?;
        bindings.push((name.trim().to_string(), value));
    }

    let p = PolynomialInterpreter::new(expression);
    let result = p.evaluate(bindings).map_err(|e| e.to_string())?;
    println!("Expression: {}", p.text());
    println!("Result: {result}");
    Ok(())
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    let grammar = Grammar::new();
    let env = Environment::new();
    loop {
        let readline = rl.readline("poly_calc > ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if line.trim().is_empty() {
                    continue;
                }
                // unbound names are completed interactively; Ctrl-C/Ctrl-D here
                // abandon only the current expression
                let mut ask = |name: &str| rl.readline(&format!("{name} = ")).ok();
                match Evaluator::with_resolver(&grammar, env.clone(), &mut ask).evaluate(&line) {
                    Ok(value) => println!("{value}"),
                    Err(err) => eprintln!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("KeyboardInterrupt");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("EOFError");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn run_lexer_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("lexer > ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                for token in tokenize(&line) {
                    println!("{token}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("KeyboardInterrupt");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("EOFError");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
