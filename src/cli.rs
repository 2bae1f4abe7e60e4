//! Command-line interface.
//!
//! Flags only override what the environment already configures; running
//! `tracksdb` with no arguments serves on port 8080.

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{ServiceConfig, DEFAULT_LISTEN_ADDR};

/// tracksdb: HTTP service for track metadata
#[derive(Parser, Debug)]
#[command(name = "tracksdb")]
#[command(about = "HTTP service for storing track metadata in a relational database")]
#[command(version)]
pub struct Cli {
    /// Address to listen on
    #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// Database URL, overriding MYSQL_USERNAME / MYSQL_DB / TRACKSDB_DATABASE_URL
    #[arg(short, long)]
    pub database_url: Option<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Applies the command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ServiceConfig) -> ServiceConfig {
        config.listen_addr = self.listen;
        if let Some(ref url) = self.database_url {
            config.database_url = Some(url.clone());
        }
        config
    }
}
