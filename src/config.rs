use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::network::builder::NetworkConfig;
use crate::network::render::RenderConfig;

/// Default stopword list location, relative to the working directory.
pub const DEFAULT_STOPWORDS_PATH: &str = "data/stopwords.txt";

/// Central configuration loaded from environment variables.
///
/// Everything has a default, so a bare `ponytalk` run works without a .env
/// file. The .env file (if any) is loaded at startup via dotenvy.
pub struct Config {
    /// Stopword file for the word count compiler (one word per line)
    pub stopwords_path: PathBuf,
    /// How many of the most frequent speakers become graph nodes
    pub top_speakers: usize,
    /// Words counted fewer times than this are dropped from the table
    pub min_frequency: u32,
    /// Length of each centrality ranking
    pub stats_top_n: usize,
    /// Side length of the rendered network image, in pixels
    pub image_size: u32,
    /// Seed for the spring layout's initial positions
    pub layout_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stopwords_path: PathBuf::from(DEFAULT_STOPWORDS_PATH),
            top_speakers: 101,
            min_frequency: 5,
            stats_top_n: 10,
            image_size: 4000,
            layout_seed: 42,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// A variable that is set but doesn't parse is an error, not a silent
    /// fallback.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            stopwords_path: env::var("PONYTALK_STOPWORDS")
                .map(PathBuf::from)
                .unwrap_or(defaults.stopwords_path),
            top_speakers: parse_var("PONYTALK_TOP_SPEAKERS", defaults.top_speakers)?,
            min_frequency: parse_var("PONYTALK_MIN_FREQUENCY", defaults.min_frequency)?,
            stats_top_n: parse_var("PONYTALK_STATS_TOP_N", defaults.stats_top_n)?,
            image_size: parse_var("PONYTALK_IMAGE_SIZE", defaults.image_size)?,
            layout_seed: parse_var("PONYTALK_LAYOUT_SEED", defaults.layout_seed)?,
        })
    }

    /// Graph builder settings derived from this configuration.
    pub fn network(&self) -> NetworkConfig {
        NetworkConfig {
            top_speakers: self.top_speakers,
            ..NetworkConfig::default()
        }
    }

    /// Rendering settings derived from this configuration.
    pub fn render(&self) -> RenderConfig {
        RenderConfig {
            image_size: self.image_size,
            seed: self.layout_seed,
            ..RenderConfig::default()
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
