//! Administrator settings for the calculator.
//!
//! A [`SettingsSource`] produces complete [`SettingsSnapshot`]s. A
//! [`SettingsRefresher`] polls the source with retry and swaps changed
//! snapshots into a [`SharedSettings`], which readers query through
//! [`SettingsProvider`].
//!
//! ```
//! use calc_settings::{SettingsProvider, SettingsSnapshot, SharedSettings};
//! use calc_core::{CapabilitySettings, keys};
//!
//! let shared = SharedSettings::default();
//! assert!(shared.current_settings().capabilities.is_enabled(keys::SIN));
//!
//! shared.replace(SettingsSnapshot::new(
//!     true,
//!     CapabilitySettings::new().with(keys::SIN, false),
//! ));
//! assert!(!shared.current_settings().capabilities.is_enabled(keys::SIN));
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod refresh;
pub mod retry;
pub mod snapshot;
pub mod source;

pub use config::SettingsConfig;
pub use error::{Result, SettingsError};
pub use provider::{SettingsProvider, SharedSettings};
pub use refresh::{DEFAULT_POLL_INTERVAL, RefreshHandle, SettingsRefresher};
pub use retry::{RetryPolicy, with_retry};
pub use snapshot::SettingsSnapshot;
pub use source::{FileFormat, FileSource, SettingsSource, StaticSource};
