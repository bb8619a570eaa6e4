use std::io;
use std::{env, process};

use rune_lang::rune;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut rune = rune::new(&mut stdout);

    match args.len() {
        n if n > 2 => {
            println!("Usage: rune [script]");
            process::exit(64);
        },
        2 => rune.run_file(args[1].clone()),
        _ => rune.run_prompt(),
    };
}
