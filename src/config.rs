use crate::api::{DEFAULT_BACKEND_URL, DEFAULT_TMDB_URL};
use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_GENRE: &str = "Action";

/// Terminal movie recommendations backed by a local recommendation server.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
pub struct Cli {
    /// Base URL of the recommendation backend
    #[arg(long, env = "MARQUEE_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Base URL of the TMDB v3 API
    #[arg(long, env = "MARQUEE_TMDB_URL", default_value = DEFAULT_TMDB_URL)]
    pub tmdb_url: String,

    /// TMDB API key used for trailer lookups
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,

    /// Genre listed on startup
    #[arg(long, default_value = DEFAULT_GENRE)]
    pub genre: String,

    /// Where the watch list and log file live
    #[arg(long, env = "MARQUEE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub tmdb_url: String,
    pub tmdb_api_key: Option<String>,
    pub initial_genre: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let data_dir = match cli.data_dir {
            Some(dir) => dir,
            None => match dirs::data_dir() {
                Some(base) => base.join("marquee"),
                None => bail!("Could not determine a data directory; pass --data-dir"),
            },
        };

        let initial_genre = match cli.genre.trim() {
            "" => DEFAULT_GENRE.to_string(),
            g => g.to_string(),
        };

        Ok(Self {
            backend_url: cli.backend_url,
            tmdb_url: cli.tmdb_url,
            tmdb_api_key: cli.tmdb_api_key.filter(|k| !k.trim().is_empty()),
            initial_genre,
            data_dir,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("marquee.log")
    }
}
