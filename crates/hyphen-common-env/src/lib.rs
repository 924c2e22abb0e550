// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment configuration for the Hyphen SDK.
//!
//! This crate provides:
//!
//! - [`load_env`]: layered `.env` file loading (`.env`, `.env.local`,
//!   `.env.<environment>`, `.env.<environment>.local`)
//! - [`var`] and [`list_var`]: typed readers for already-resolved variables
//! - The names of the `HYPHEN_*` variables the SDK understands

pub mod loader;
pub mod vars;

pub use loader::{load_env, EnvError, EnvOptions};
pub use vars::{
	list_var, var, HYPHEN_APPLICATION_ID, HYPHEN_DEFAULT_TARGET_KEY, HYPHEN_ENVIRONMENT,
	HYPHEN_HORIZON_URLS, HYPHEN_PUBLIC_API_KEY,
};
