pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod watch;

use clap::{Parser, Subcommand};

/// imgcss - Compile image assets into density-aware CSS
#[derive(Parser, Debug)]
#[command(name = "imgcss")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile images into a stylesheet
    Build(build::BuildArgs),

    /// List the rules a build would produce
    List(list::ListArgs),

    /// Initialize an imgcss project (generates imgcss.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::try_parse_from([
            "imgcss",
            "build",
            "images/*.png",
            "-o",
            "css/style.css",
            "--strict",
        ])
        .unwrap();

        let Commands::Build(args) = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(args.sources, vec!["images/*.png"]);
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("css/style.css")));
        assert!(args.strict);
        assert!(!args.watch);
    }
}
