// ABOUTME: CLI entry point — REPL by default, or batch-load scripts and exit

use clap::Parser;
use minilisp::builtins::register_builtins;
use minilisp::env::Environment;
use minilisp::error::EvalError;
use minilisp::eval::eval;
use minilisp::reader::Reader;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::rc::Rc;

/// A minimalist Lisp interpreter with tail-call elimination and unhygienic macros
#[derive(Parser, Debug)]
#[command(name = "minilisp")]
#[command(version)]
#[command(about = "A minimalist Lisp/Scheme-dialect interpreter")]
struct CliArgs {
    /// Script files to load and execute, in order, against a shared environment.
    /// With none given, starts an interactive REPL instead.
    #[arg(value_name = "FILE")]
    scripts: Vec<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();

    let env = Environment::new();
    register_builtins(&env);

    if args.scripts.is_empty() {
        run_repl(env);
    } else {
        for path in &args.scripts {
            if let Err(e) = run_script(path, &env) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn run_script(path: &PathBuf, env: &Rc<Environment>) -> Result<(), EvalError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| EvalError::Io(format!("{}: {e}", path.display())))?;
    let mut reader = Reader::new(&source);
    while let Some(form) = reader.read_opt()? {
        eval(form, env.clone())?;
    }
    Ok(())
}

fn run_repl(env: Rc<Environment>) {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), _> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("error: failed to initialize REPL: {e}");
            return;
        }
    };

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match Reader::new(&line).read_opt() {
                    Ok(None) => continue,
                    Ok(Some(form)) => match eval(form, env.clone()) {
                        Ok(result) => println!("{result}"),
                        Err(e) => println!("error: {e}"),
                    },
                    Err(e) => println!("error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }
}

