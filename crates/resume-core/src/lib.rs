pub mod build;
pub mod config;
pub mod converter;
pub mod error;
pub mod init;
pub mod io;
pub mod naming;
pub mod paths;
pub mod scaffold;
pub mod types;

pub use error::{ResumeError, Result};
