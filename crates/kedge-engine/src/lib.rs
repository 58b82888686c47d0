//! Kedge Engine - expands application specs into Kubernetes objects
//!
//! The engine is a pure, synchronous transformation. It takes an
//! [`AppSpec`](kedge_core::AppSpec), fills in defaults, expands the
//! shortcuts (`health`, `envFrom`, `portMappings`, `endpoint`, volume claim
//! `size`) and returns the resulting objects in a fixed order together with
//! the app's extra resource files.
//!
//! ```no_run
//! use kedge_engine::{Engine, EngineConfig};
//!
//! # fn run(app: kedge_core::AppSpec) -> kedge_engine::Result<()> {
//! let output = Engine::new(EngineConfig::default()).transform(app)?;
//! println!("{}", output.to_yaml()?);
//! # Ok(())
//! # }
//! ```

pub mod claims;
pub mod config;
pub mod controller;
pub mod engine;
pub mod env;
pub mod error;
pub mod names;
pub mod output;
pub mod probes;
pub mod resources;
pub mod services;
pub mod validate;
pub mod volumes;

pub use config::EngineConfig;
pub use engine::{Engine, transform};
pub use error::{Collection, ContainerLocation, EnvSourceKind, Result, TransformError};
pub use output::{Object, TransformOutput};
