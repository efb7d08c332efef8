//! Module `config` holds the engine-wide tunables named in spec §6: page
//! size, max COLA levels, and builder-pool size. Layering follows the
//! teacher's `robt_config.rs` pattern -- a plain `Config` struct with public
//! fields, `lazy_static` defaults, and environment-variable overrides
//! applied last, precedence `defaults < toml file < environment`.

use std::env;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::arena::DEFAULT_PAGE_SIZE;
use crate::cola::DEFAULT_MAX_LEVELS;
use crate::error::{Error, Result};

lazy_static! {
    static ref DEFAULT_CONFIG: Config = Config {
        page_size: DEFAULT_PAGE_SIZE,
        max_levels: DEFAULT_MAX_LEVELS,
        builder_pool_size: 16,
    };
}

/// Engine-wide configuration (spec §6 "Environment variables").
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub page_size: usize,
    pub max_levels: u32,
    pub builder_pool_size: usize,
}

impl Default for Config {
    fn default() -> Config {
        DEFAULT_CONFIG.clone()
    }
}

impl Config {
    pub fn new() -> Config {
        Config::default()
    }

    /// Overlay a TOML file's `[engine]` table on top of `self`, returning
    /// the merged configuration. Matches the teacher `Cargo.toml`'s
    /// existing `toml` dependency, used here for on-disk engine
    /// configuration instead of index configuration.
    pub fn load_toml(mut self, path: &str) -> Result<Config> {
        #[derive(Deserialize, Default)]
        struct File {
            #[serde(default)]
            engine: Partial,
        }
        #[derive(Deserialize, Default)]
        struct Partial {
            page_size: Option<usize>,
            max_levels: Option<u32>,
            builder_pool_size: Option<usize>,
        }

        let text = std::fs::read_to_string(path)?;
        let file: File = toml::from_str(&text).map_err(|e| Error::InvalidFormat(e.to_string()))?;
        if let Some(v) = file.engine.page_size {
            self.page_size = v;
        }
        if let Some(v) = file.engine.max_levels {
            self.max_levels = v;
        }
        if let Some(v) = file.engine.builder_pool_size {
            self.builder_pool_size = v;
        }
        Ok(self)
    }

    /// Apply `ENGINE_PAGE_SIZE`, `ENGINE_MAX_LEVELS`, `ENGINE_BUILDER_POOL_SIZE`
    /// on top of `self`, if set (spec §6). Applied last in the precedence
    /// chain: defaults < toml file < environment.
    pub fn with_env_overrides(mut self) -> Config {
        if let Some(v) = read_env_usize("ENGINE_PAGE_SIZE") {
            self.page_size = v;
        }
        if let Some(v) = read_env_usize("ENGINE_MAX_LEVELS") {
            self.max_levels = v as u32;
        }
        if let Some(v) = read_env_usize("ENGINE_BUILDER_POOL_SIZE") {
            self.builder_pool_size = v;
        }
        self
    }

    /// Build a `Config` from defaults, an optional toml file, and
    /// environment overrides, in that precedence order.
    pub fn from_env(toml_path: Option<&str>) -> Result<Config> {
        let cfg = Config::default();
        let cfg = match toml_path {
            Some(path) => cfg.load_toml(path)?,
            None => cfg,
        };
        Ok(cfg.with_env_overrides())
    }
}

fn read_env_usize(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
