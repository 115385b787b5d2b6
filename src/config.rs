use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct WikiConfig {
    pub listen_addr: SocketAddr,
    pub pages_dir: PathBuf,
    // None means the templates compiled into the binary
    pub templates_dir: Option<PathBuf>,
    pub serialize_saves: bool,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            pages_dir: PathBuf::from("."),
            templates_dir: None,
            serialize_saves: true,
        }
    }
}

impl WikiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // split out from from_env so tests don't have to touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("WIKI_LISTEN_ADDR") {
            Some(val) => val
                .parse::<SocketAddr>()
                .with_context(|| format!("WIKI_LISTEN_ADDR is not a valid address: {}", val))?,
            None => defaults.listen_addr,
        };

        let pages_dir = lookup("WIKI_PAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.pages_dir);

        let templates_dir = lookup("WIKI_TEMPLATES_DIR")
            .filter(|val| !val.is_empty())
            .map(PathBuf::from);

        let serialize_saves = match lookup("WIKI_SERIALIZE_SAVES") {
            Some(val) => parse_bool(&val)
                .with_context(|| format!("WIKI_SERIALIZE_SAVES must be true or false, got {}", val))?,
            None => defaults.serialize_saves,
        };

        Ok(Self {
            listen_addr,
            pages_dir,
            templates_dir,
            serialize_saves,
        })
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
