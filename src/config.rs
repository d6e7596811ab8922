use std::{env, fmt::Display, str::FromStr};

/// Deployment settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
	pub database_url: String,
	pub host: String,
	pub port: u16,
	pub max_connections: u32,
	/// Whether to apply `migrations/` on startup.
	pub run_migrations: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{0} must be set")]
	Missing(&'static str),
	#[error("invalid {key} value {value:?}: {reason}")]
	Invalid {
		key: &'static str,
		value: String,
		reason: String,
	},
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		Ok(Self {
			database_url: lookup("DATABASE_URL").ok_or(Error::Missing("DATABASE_URL"))?,
			host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".into()),
			port: parse_or(&lookup, "PORT", 3000)?,
			max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
			run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", false)?,
		})
	}
}

fn parse_or<T>(
	lookup: &impl Fn(&str) -> Option<String>,
	key: &'static str,
	default: T,
) -> Result<T, Error>
where
	T: FromStr + Display,
	T::Err: Display,
{
	let Some(value) = lookup(key) else {
		tracing::info!("{key} not set, using default: {default}");
		return Ok(default);
	};

	value.trim().parse().map_err(|error: T::Err| Error::Invalid {
		key,
		reason: error.to_string(),
		value,
	})
}
