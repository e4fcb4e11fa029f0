use clap::Parser;
use imgcss::cli::{Cli, Commands};
use imgcss::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => imgcss::cli::build::run(args, &printer)?,
        Commands::List(args) => imgcss::cli::list::run(args, &printer)?,
        Commands::Init(args) => imgcss::cli::init::run(args, &printer)?,
        Commands::Completions(args) => imgcss::cli::completions::run(args)?,
    }

    Ok(())
}
