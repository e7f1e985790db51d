//! CLI error types.

use crate::config::ConfigError;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The scenario has no user with this name.
    #[error("no user named '{0}' in scenario")]
    UnknownUser(String),

    /// The scenario has no blog with this name.
    #[error("no blog named '{0}' in scenario")]
    UnknownBlog(String),

    /// The scenario has no article with this title.
    #[error("no article titled '{0}' in scenario")]
    UnknownArticle(String),

    /// The scenario file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A permission query failed or was denied.
    #[error(transparent)]
    Authz(#[from] authz::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
