//! Clap-free core library for vintf-bump.
//!
//! External collaborators are abstracted behind the
//! [`CommandRunner`](ports::CommandRunner) port so the pipeline can be
//! exercised against an in-memory recorder in tests; [`adapters`] provides
//! the process-backed default.
//!
//! # Entry point
//!
//! - [`Bump::run`](pipeline::Bump::run) — perform the five bump steps in order.

pub mod adapters;
pub mod identity;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use identity::VersionIdentity;
pub use pipeline::Bump;
pub use settings::BumpSettings;
