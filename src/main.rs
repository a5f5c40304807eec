use clap::{Parser as ClapParser, Subcommand};
use condex::cli::{self, CliError, CompileOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "condex")]
#[command(about = "Condex - compile composable boolean filters into scan condition expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a bracket-notation query string or a JSON filter document
    Compile {
        /// The input to compile (reads from stdin if not provided)
        input: Option<String>,

        /// Treat the input as a nested JSON filter document
        #[arg(long)]
        json: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            input,
            json,
            pretty,
        } => run_compile(input, json, pretty),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_compile(input: Option<String>, json: bool, pretty: bool) -> Result<(), CliError> {
    let input = match input {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CompileOptions { input, json };
    let expression = cli::execute_compile(&options)?;

    let output = if pretty {
        serde_json::to_string_pretty(&expression)
    } else {
        serde_json::to_string(&expression)
    }
    .map_err(CliError::Json)?;
    println!("{}", output);
    Ok(())
}
