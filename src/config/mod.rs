//! Configuration modules for the GASO API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with development-friendly defaults.
//!
//! # Modules
//!
//! - [`admin`]: Admin-registration secret
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT authentication configuration
//! - [`rate_limit`]: API rate limiting configuration
//! - [`session`]: Session cookie and CSRF configuration

pub mod admin;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod rate_limit;
pub mod session;
