use clap::Parser;

#[derive(Parser)]
#[command(
    name = "instituto-admin",
    version,
    about = "Terminal admin client for institution records"
)]
pub struct Cli {
    /// Backend base URL (overrides the configured value)
    #[arg(long)]
    pub base_url: Option<String>,
}
