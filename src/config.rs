//! Process configuration, read from the environment once at startup.

use std::{env, str::FromStr};

use tracing::Level;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} has an invalid value {value:?}")]
	Invalid { name: &'static str, value: String },
	#[error("{name} is not valid unicode")]
	NotUnicode { name: &'static str },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
	pub host: String,
	pub port: u16,
	/// Falls back to the in-memory store when unset.
	pub database_url: Option<String>,
	pub database_max_connections: u32,
	/// Prefix for every hypermedia link, e.g. `https://board.example.com`.
	pub public_url: String,
	pub log_level: Level,
	/// Number of demo posts to insert at startup.
	pub seed_posts: u32,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".into(),
			port: 3000,
			database_url: None,
			database_max_connections: 5,
			public_url: String::new(),
			log_level: Level::INFO,
			seed_posts: 0,
		}
	}
}

impl Config {
	/// Loads the configuration from the environment, reading a `.env` file first if present.
	pub fn from_env() -> Result<Self, Error> {
		dotenvy::dotenv().ok();

		Self::from_lookup(|name| env::var(name))
	}

	fn from_lookup<F>(lookup: F) -> Result<Self, Error>
	where
		F: Fn(&'static str) -> Result<String, env::VarError>,
	{
		let var = |name: &'static str| match lookup(name) {
			Ok(value) if value.is_empty() => Ok(None),
			Ok(value) => Ok(Some(value)),
			Err(env::VarError::NotPresent) => Ok(None),
			Err(env::VarError::NotUnicode(..)) => Err(Error::NotUnicode { name }),
		};

		let defaults = Self::default();

		Ok(Self {
			host: var("HOST")?.unwrap_or(defaults.host),
			port: parse("PORT", var("PORT")?)?.unwrap_or(defaults.port),
			database_url: var("DATABASE_URL")?,
			database_max_connections: parse(
				"DATABASE_MAX_CONNECTIONS",
				var("DATABASE_MAX_CONNECTIONS")?,
			)?
			.unwrap_or(defaults.database_max_connections),
			public_url: var("PUBLIC_URL")?
				.map(|url| url.trim_end_matches('/').to_owned())
				.unwrap_or(defaults.public_url),
			log_level: parse("LOG_LEVEL", var("LOG_LEVEL")?)?.unwrap_or(defaults.log_level),
			seed_posts: parse("SEED_POSTS", var("SEED_POSTS")?)?.unwrap_or(defaults.seed_posts),
		})
	}
}

fn parse<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>, Error> {
	value
		.map(|value| {
			value
				.trim()
				.parse()
				.map_err(|_| Error::Invalid { name, value })
		})
		.transpose()
}

#[cfg(test)]
mod test {
	use std::{collections::HashMap, env};

	use super::*;

	fn lookup(
		vars: &[(&'static str, &'static str)],
	) -> impl Fn(&'static str) -> Result<String, env::VarError> {
		let vars = vars.iter().copied().collect::<HashMap<_, _>>();

		move |name| {
			vars.get(name)
				.map(|value| (*value).to_owned())
				.ok_or(env::VarError::NotPresent)
		}
	}

	#[test]
	fn test_defaults() {
		let config = Config::from_lookup(lookup(&[])).unwrap();

		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 3000);
		assert!(config.database_url.is_none());
		assert_eq!(config.public_url, "");
		assert_eq!(config.log_level, Level::INFO);
		assert_eq!(config.seed_posts, 0);
	}

	#[test]
	fn test_overrides() {
		let config = Config::from_lookup(lookup(&[
			("PORT", "8080"),
			("PUBLIC_URL", "https://board.example.com/"),
			("LOG_LEVEL", "debug"),
			("SEED_POSTS", "10"),
			("DATABASE_URL", "postgres://localhost/board"),
		]))
		.unwrap();

		assert_eq!(config.port, 8080);
		assert_eq!(config.public_url, "https://board.example.com");
		assert_eq!(config.log_level, Level::DEBUG);
		assert_eq!(config.seed_posts, 10);
		assert_eq!(
			config.database_url.as_deref(),
			Some("postgres://localhost/board")
		);
	}

	#[test]
	fn test_invalid_port() {
		let error = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();

		assert!(matches!(error, Error::Invalid { name: "PORT", .. }));
	}
}
