// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracing subscriber installation.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::ConfigError;
use crate::sections::{LogFormat, LoggingConfig};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Fails if a global subscriber is
/// already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ConfigError> {
	let filter = EnvFilter::try_from_default_env().or_else(|_| {
		EnvFilter::try_new(&config.level).map_err(|e| ConfigError::InvalidValue {
			key: "logging.level".to_string(),
			message: e.to_string(),
		})
	})?;

	let registry = tracing_subscriber::registry().with(filter);
	let result = match config.format {
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.try_init(),
	};

	result.map_err(|e| ConfigError::Logging(e.to_string()))
}
