use clap::Parser;

/// Menu-driven, in-memory simulation of a small discussion platform.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output, e.g. when piping the menu through tools.
    #[arg(long)]
    pub plain: bool,
}
