mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, LlmProviderConfig, Matching, Postgres, Providers, Search, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.page_size == 0 {
		return Err(Error::Validation {
			message: "search.page_size must be greater than zero.".to_string(),
		});
	}
	if cfg.search.overfetch_multiplier == 0 {
		return Err(Error::Validation {
			message: "search.overfetch_multiplier must be greater than zero.".to_string(),
		});
	}
	if !(0..=100).contains(&cfg.search.time_of_day_threshold) {
		return Err(Error::Validation {
			message: "search.time_of_day_threshold must be in the range 0-100.".to_string(),
		});
	}
	if cfg.matching.cache_ttl_days <= 0 {
		return Err(Error::Validation {
			message: "matching.cache_ttl_days must be greater than zero.".to_string(),
		});
	}
	if !(0..=100).contains(&cfg.matching.fallback_score) {
		return Err(Error::Validation {
			message: "matching.fallback_score must be in the range 0-100.".to_string(),
		});
	}

	for (label, provider) in
		[("parser", &cfg.providers.parser), ("matcher", &cfg.providers.matcher)]
	{
		if provider.api_key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
		if provider.model.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} model must be non-empty."),
			});
		}
		if !provider.temperature.is_finite() || !(0.0..=2.0).contains(&provider.temperature) {
			return Err(Error::Validation {
				message: format!("Provider {label} temperature must be in the range 0.0-2.0."),
			});
		}
		if provider.max_tokens == 0 {
			return Err(Error::Validation {
				message: format!("Provider {label} max_tokens must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for provider in [&mut cfg.providers.parser, &mut cfg.providers.matcher] {
		while provider.api_base.ends_with('/') {
			provider.api_base.pop();
		}
	}
}
