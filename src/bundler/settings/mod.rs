//! Configuration structures for release builds.
//!
//! [`Settings`] holds everything one pipeline run needs: product metadata,
//! compiler inputs and the resolved build/dist/release directories. Build it
//! with [`SettingsBuilder`].

mod arch;
mod builder;
mod bundle;
mod core;
mod package;

pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use bundle::{BundleSettings, DataFile};
pub use self::core::Settings;
pub use package::PackageSettings;
