// src/cli.rs
use std::{env, path::PathBuf};

pub struct Params {
    pub input: PathBuf,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_cli()?;
    let json = crate::runner::run(&params)?;
    println!("{json}");
    Ok(())
}

fn parse_cli() -> Result<Params, Box<dyn std::error::Error>> {
    let mut input: Option<PathBuf> = None;

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-h" | "--help" => {
                eprintln!("Usage: colorconv <colors.html>");
                std::process::exit(0);
            }
            _ => {
                if input.is_some() {
                    return Err(format!("Unexpected arg: {}", a).into());
                }
                input = Some(PathBuf::from(&a));
            }
        }
    }

    let input = input.ok_or("Missing input file")?;
    Ok(Params { input })
}
