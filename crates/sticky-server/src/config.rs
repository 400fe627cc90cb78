use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use sticky_engine::EngineConfig;

/// Values that must never reach production.
const PLACEHOLDER_TOKENS: &[&str] = &["", "your-bot-token", "change-me", "YOUR_TOKEN_HERE"];

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub ingress_token: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub api_base: String,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("STICKY_BOT_TOKEN").unwrap_or_default();
        if PLACEHOLDER_TOKENS.contains(&bot_token.trim()) {
            bail!("STICKY_BOT_TOKEN is unset or still a placeholder");
        }

        let ingress_token = lookup("STICKY_INGRESS_TOKEN").unwrap_or_default();
        if PLACEHOLDER_TOKENS.contains(&ingress_token.trim()) {
            bail!("STICKY_INGRESS_TOKEN is unset or still a placeholder");
        }

        let host = lookup("STICKY_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("STICKY_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("STICKY_PORT must be a port number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", host, port))?;

        let defaults = EngineConfig::default();
        let millis = |key: &str, default: Duration| -> Result<Duration> {
            match lookup(key) {
                Some(v) => Ok(Duration::from_millis(
                    v.parse().with_context(|| format!("{} must be a number", key))?,
                )),
                None => Ok(default),
            }
        };
        let secs = |key: &str, default: Duration| -> Result<Duration> {
            match lookup(key) {
                Some(v) => Ok(Duration::from_secs(
                    v.parse().with_context(|| format!("{} must be a number", key))?,
                )),
                None => Ok(default),
            }
        };

        let engine = EngineConfig {
            quiet_interval: millis("STICKY_QUIET_MS", defaults.quiet_interval)?,
            draft_ttl: secs("STICKY_DRAFT_TTL_SECS", defaults.draft_ttl)?,
            draft_sweep_interval: secs("STICKY_DRAFT_SWEEP_SECS", defaults.draft_sweep_interval)?,
        };
        if engine.draft_sweep_interval.is_zero() {
            bail!("STICKY_DRAFT_SWEEP_SECS must be greater than zero");
        }

        Ok(Self {
            bot_token,
            ingress_token,
            db_path: lookup("STICKY_DB_PATH").unwrap_or_else(|| "sticky.db".into()).into(),
            addr,
            api_base: lookup("STICKY_API_BASE").unwrap_or_else(|| "https://discord.com/api/v10".into()),
            engine,
        })
    }
}
