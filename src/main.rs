use std::io;
use std::{env, process};

use lox_lang::lox;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut lox = lox::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            println!("Usage: lox [script]");
            process::exit(64);
        },
        2 => {
            lox.run_file(args[1].clone());

            if lox.had_error() {
                process::exit(65);
            }
            if lox.had_runtime_error() {
                process::exit(70);
            }
        },
        _ => lox.run_prompt(),
    };
}
