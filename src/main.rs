use anyhow::{Result, bail};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args();
    match args.nth(1) {
        None => bail!("Path to a program required as an argument."),
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(program_string) => {
                let (program, errors) = minic::parse(&program_string);
                if !errors.is_empty() {
                    for error in &errors {
                        eprintln!("{error}");
                    }
                    bail!("Found {} parse errors in {path}.", errors.len());
                }

                let result = minic::evaluate(&program)?;

                println!("{result}");
            }
            Err(err) => bail!("Failed to read program at {path}: {err}"),
        },
    }

    Ok(())
}
