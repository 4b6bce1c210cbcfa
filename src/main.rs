use anyhow::Context;
use clap::Parser;
use pocket_calc::{Calculator, Key};
use std::io::Write;

#[derive(Parser)]
#[command(name = "pocket_calc")]
#[command(version, about = "A pocket calculator for the terminal", long_about = None)]
struct Cli {
    /// Evaluate a single expression and exit
    #[arg(short, long, value_name = "EXPR")]
    expression: Option<String>,

    /// Press a whitespace separated key sequence such as "2 + 3 =" and exit
    #[arg(short, long, value_name = "KEYS", conflicts_with = "expression")]
    keys: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("pocket_calc=debug")
        } else {
            EnvFilter::new("pocket_calc=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn press_keys(calculator: &mut Calculator, keys: &str) -> anyhow::Result<()> {
    for key in keys.split_whitespace() {
        let key: Key = key.parse().with_context(|| format!("unknown key '{}'", key))?;
        calculator.press(key);
    }
    println!("{}", calculator.read_screen());
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut calculator = Calculator::new();

    if let Some(keys) = cli.keys {
        return press_keys(&mut calculator, &keys);
    }

    if let Some(expression) = cli.expression {
        calculator
            .parse_and_calculate(&expression)
            .with_context(|| format!("invalid expression '{}'", expression))?;
        println!("{}", calculator.read_screen());
        return Ok(());
    }

    println!("Enter an expression such as '(2+3)x4' or '1.5/3', or 'q' to quit.");
    prompt()?;

    for line in std::io::stdin().lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        match calculator.parse_and_calculate(&line) {
            Ok(()) => println!("Result: {}", calculator.read_screen()),
            Err(e) => println!("Invalid expression: {}", e),
        }
        calculator.press_clear_key();

        prompt()?;
    }

    Ok(())
}
