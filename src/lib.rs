pub mod config;
pub mod logging;
pub mod runner;
#[cfg(test)]
mod test_utils;

pub use config::*;
pub use runner::*;
