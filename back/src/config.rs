use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use eyre::WrapErr;
use serde::Deserialize;

#[derive(Debug, Default, Parser)]
#[command(about = "Task tracking HTTP service")]
pub struct Args {
    /// RON file to read settings from, overridden by the other arguments.
    #[arg(long, env = "TASKS_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "TASKS_PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_connections: Option<u32>,

    /// PEM certificate, serves TLS together with `--key`.
    #[arg(long, env = "SSL_CERT")]
    pub cert: Option<PathBuf>,

    #[arg(long, env = "SSL_KEY")]
    pub key: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: String::from("sqlite://tasks.db"),
            max_connections: 5,
            cert: None,
            key: None,
        }
    }
}

impl Config {
    pub fn load(args: Args) -> eyre::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply(args);
        eyre::ensure!(
            config.max_connections > 0,
            "max_connections must be at least 1"
        );

        Ok(config)
    }

    pub fn from_file(path: &Path) -> eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;

        ron::from_str(&text).wrap_err_with(|| format!("Invalid config {}", path.display()))
    }

    fn apply(&mut self, args: Args) {
        if let Some(port) = args.port {
            self.port = port;
        }

        if let Some(database_url) = args.database_url {
            self.database_url = database_url;
        }

        if let Some(max_connections) = args.max_connections {
            self.max_connections = max_connections;
        }

        if args.cert.is_some() {
            self.cert = args.cert;
        }

        if args.key.is_some() {
            self.key = args.key;
        }
    }

    /// Certificate and key paths, when both are configured.
    pub fn tls(&self) -> Option<(&Path, &Path)> {
        match (&self.cert, &self.key) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }
}
