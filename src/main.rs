use clap::Parser;
use passkeep::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Set {
            ref name,
            ref value,
        } => passkeep::cli::commands::set::execute(&cli, name, value.as_deref()),
        Commands::Get { ref name } => passkeep::cli::commands::get::execute(&cli, name),
        Commands::List => passkeep::cli::commands::list::execute(&cli),
        Commands::Delete { ref names, force } => {
            passkeep::cli::commands::delete::execute(&cli, names, force)
        }
        Commands::RotateKey => passkeep::cli::commands::rotate::execute(&cli),
        Commands::Completions { ref shell } => passkeep::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passkeep::cli::output::error(&e.to_string());
        std::process::exit(if e.is_canceled() { 2 } else { 1 });
    }
}
