//! Read-eval-print loop for minilisp
//!
//! Usage: minilisp [-c CODE] [--json] [PATH]

use std::fs::read_to_string;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;

use minilisp::{Expression, Session};

#[derive(Parser)]
#[command(version, about = "Evaluate minilisp expressions")]
struct Cli {
    /// Evaluate CODE and exit
    #[arg(short = 'c')]
    code: Option<String>,

    /// Print values as JSON
    #[arg(long)]
    json: bool,

    /// File with one expression per line
    path: Option<PathBuf>,
}

fn render(value: &Expression, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(value.to_string())
    }
}

fn run_file(session: &mut Session, path: &Path, json: bool) -> Result<bool> {
    let contents =
        read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        match session.eval(line) {
            Ok(value) => println!("{}", render(&value, json)?),
            Err(err) => {
                eprintln!("error: {}", err);
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn repl(session: &mut Session, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("lisp > ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match session.eval(&line) {
            Ok(value) => println!("{}", render(&value, json)?),
            Err(err) => println!("error: {}", err),
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let mut session = Session::new();

    if let Some(code) = args.code {
        match session.eval(&code) {
            Ok(value) => println!("{}", render(&value, args.json)?),
            Err(err) => {
                eprintln!("error: {}", err);
                exit(1);
            }
        }
    } else if let Some(path) = args.path {
        if !run_file(&mut session, &path, args.json)? {
            exit(1);
        }
    } else {
        repl(&mut session, args.json)?;
    }

    Ok(())
}
