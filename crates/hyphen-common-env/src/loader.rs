// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Layered `.env` file loading.
//!
//! Files are applied in this order, each later file overriding the earlier
//! ones:
//!
//! 1. `.env` (does not override variables already set in the process)
//! 2. `.env.local`
//! 3. `.env.<environment>`
//! 4. `.env.<environment>.local`
//!
//! Missing files are skipped. The `.local` files are only read when
//! [`EnvOptions::local`] is set.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::vars::{var, HYPHEN_ENVIRONMENT};

/// Errors raised while loading `.env` files.
#[derive(Debug, Error)]
pub enum EnvError {
	#[error("failed to determine current directory: {0}")]
	CurrentDir(#[source] std::io::Error),

	#[error("failed to load {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: dotenvy::Error,
	},
}

/// Options for [`load_env`].
#[derive(Debug, Clone)]
pub struct EnvOptions {
	/// Directory holding the `.env` files. Defaults to the current directory.
	pub path: Option<PathBuf>,
	/// Environment name. Defaults to `HYPHEN_ENVIRONMENT`.
	pub environment: Option<String>,
	/// Whether to read the `.local` variants.
	pub local: bool,
}

impl Default for EnvOptions {
	fn default() -> Self {
		Self {
			path: None,
			environment: None,
			local: true,
		}
	}
}

impl EnvOptions {
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
		self.environment = Some(environment.into());
		self
	}

	pub fn with_local(mut self, local: bool) -> Self {
		self.local = local;
		self
	}
}

/// Loads the layered `.env` files into the process environment.
///
/// Returns the files that were found and applied, in application order.
pub fn load_env(options: &EnvOptions) -> Result<Vec<PathBuf>, EnvError> {
	let dir = match &options.path {
		Some(path) => path.clone(),
		None => std::env::current_dir().map_err(EnvError::CurrentDir)?,
	};

	let mut loaded = Vec::new();

	apply(&dir.join(".env"), false, &mut loaded)?;
	if options.local {
		apply(&dir.join(".env.local"), true, &mut loaded)?;
	}

	let environment = options.environment.clone().or_else(|| var(HYPHEN_ENVIRONMENT));
	if let Some(environment) = environment {
		apply(&dir.join(format!(".env.{environment}")), true, &mut loaded)?;
		if options.local {
			apply(
				&dir.join(format!(".env.{environment}.local")),
				true,
				&mut loaded,
			)?;
		}
	}

	Ok(loaded)
}

fn apply(path: &Path, overriding: bool, loaded: &mut Vec<PathBuf>) -> Result<(), EnvError> {
	if !path.is_file() {
		return Ok(());
	}

	let result = if overriding {
		dotenvy::from_path_override(path)
	} else {
		dotenvy::from_path(path)
	};
	result.map_err(|source| EnvError::Parse {
		path: path.to_path_buf(),
		source,
	})?;

	debug!(path = %path.display(), overriding, "Loaded env file");
	loaded.push(path.to_path_buf());
	Ok(())
}
