//! Infrastructure configuration modules.

pub mod enforcement;
pub mod logging;
pub mod settings;

pub use settings::Config;
