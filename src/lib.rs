pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod release;
pub mod scaffold;
pub mod simulator;
pub mod toolchain;
pub mod ui;
pub mod version_store;

pub use error::{DevError, Result};
