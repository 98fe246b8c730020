use clap::Parser;
use miette::Result;
use spriteset::cli::{Cli, Commands};
use spriteset::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Check(args) => spriteset::cli::check::run(args, &printer)?,
        Commands::List(args) => spriteset::cli::list::run(args, &printer)?,
        Commands::Build(args) => spriteset::cli::build::run(args, &printer)?,
        Commands::Init(args) => spriteset::cli::init::run(args, &printer)?,
        Commands::Completions(args) => spriteset::cli::completions::run(args)?,
    }

    Ok(())
}
