//! Filesystem layer for spanpatch
//!
//! Reads target files as UTF-8 with a typed error taxonomy, writes them back
//! atomically, and loads patch configuration from TOML, JSON or YAML.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use path::NormalizedPath;
