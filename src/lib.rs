//! # Usuarios GASO API
//!
//! A REST API for user management built with Rust, Axum, and PostgreSQL:
//! registration, JWT authentication, role-based authorization (USER/ADMIN)
//! and CRUD over user records, with CSRF protection (double-submit cookie),
//! rate limiting and request logging.
//!
//! ## Architecture
//!
//! The codebase follows a modular layout:
//!
//! ```text
//! src/
//! ├── config/           # Env-driven configuration (JWT, database, CORS, ...)
//! ├── middleware/       # Auth extractors and CSRF validation
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sign-up, sign-in, admin registration, CSRF token
//! │   └── users/       # User CRUD, filters, pagination
//! └── utils/           # Shared utilities (errors, JWT, hashing, envelope)
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `model.rs`: Data models and DTOs
//! - `router.rs`: Axum router configuration
//!
//! ## Authentication
//!
//! Bearer JWTs (1-day validity) carry the claims `{id, email, name, role,
//! iat, exp}`. Admin-only routes check the ADMIN role; admin accounts are
//! registered through `POST /auth/admin/{secret}` where a wrong secret fails
//! with one of four statuses chosen at random.
//!
//! ## Responses
//!
//! Success: `{ data, statusCode, message }` with every string HTML-stripped.
//! Errors: `{ statusCode, message, error }`.
//!
//! ## Security Considerations
//!
//! - Passwords are hashed with bcrypt and never serialized back to callers
//! - State-changing `/usuarios` requests require a CSRF token bound to the
//!   caller's session (double-submit cookie)
//! - Auth endpoints run behind a stricter rate-limit bucket

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
