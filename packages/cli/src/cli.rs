use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line flags; each one overrides the matching environment variable
#[derive(Parser, Debug, Default)]
#[command(name = "todo-server")]
#[command(about = "HTTP backend for a single ordered todo list")]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// SQLite database file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Allowed CORS origin
    #[arg(long)]
    pub cors_origin: Option<String>,
}
