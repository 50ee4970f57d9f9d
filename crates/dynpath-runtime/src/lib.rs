//! Start-up JavaScript for bundles rewritten by dynpath.
//! Provides the initializer the rewritten public path statement calls.

pub mod public_path;

pub use public_path::{commonjs_source, initializer_source, DEFAULT_INITIALIZER};
