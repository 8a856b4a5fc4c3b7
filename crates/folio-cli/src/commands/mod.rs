//! CLI command implementations.

pub mod build;
pub mod init;
pub mod render;
pub mod version;

mod site;

pub use site::Site;
