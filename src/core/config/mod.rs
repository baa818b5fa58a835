pub mod data;
pub mod io;
pub mod printing;

pub use data::{CheckSettings, Config};
pub use io::ConfigError;
