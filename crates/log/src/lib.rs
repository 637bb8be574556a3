//! # keyward-log
//!
//! Tracing bootstrap shared by every keyward crate and by hosts embedding the
//! access editor.
//!
//! ```rust,ignore
//! use keyward_log::{Config, init};
//!
//! init(&Config::from_env())?;
//! tracing::info!("console ready");
//! ```
//!
//! Library crates never install a subscriber themselves; they only emit
//! through `tracing`. Tests call [`init_test`], which tolerates being invoked
//! from many test functions in the same binary.

mod builder;
mod config;
mod error;

pub use builder::{init, init_test};
pub use config::{Config, Format};
pub use error::{LogError, LogResult};
