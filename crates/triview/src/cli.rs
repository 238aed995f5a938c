use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "triview",
    author,
    version,
    about = "Minimal GPU triangle viewer",
    arg_required_else_help = false
)]
pub struct Cli {
    /// Initial window size (e.g. `800x600`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Window title.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Present frames immediately instead of waiting for the display refresh.
    #[arg(long)]
    pub no_vsync: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}
