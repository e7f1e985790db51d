//! Scenario loading from authz.toml.

use crate::blog::{Article, Blog, BookReview, Document, MovieReview, User, World};
use serde::Deserialize;
use std::collections::btree_map::{Entry, VacantEntry};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level scenario file.
#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    /// Users, referenced by name from blogs and articles.
    #[serde(default, rename = "user")]
    pub users: Vec<UserConfig>,

    #[serde(default, rename = "blog")]
    pub blogs: Vec<BlogConfig>,

    #[serde(default, rename = "article")]
    pub articles: Vec<ArticleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct UserConfig {
    pub name: String,

    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct BlogConfig {
    pub name: String,

    /// Users allowed to add articles.
    #[serde(default)]
    pub writers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArticleConfig {
    pub title: String,

    pub author: String,

    #[serde(default)]
    pub kind: ArticleKind,
}

/// Which document type an article is loaded as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleKind {
    #[default]
    Article,
    BookReview,
    MovieReview,
}

impl Scenario {
    /// Load a scenario from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a scenario from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build the domain objects, checking that every referenced user exists.
    pub fn into_world(self) -> Result<World, ConfigError> {
        let mut world = World::default();

        for user in self.users {
            let entry = insert_unique(&mut world.users, "user", user.name.clone())?;
            entry.insert(User {
                name: user.name,
                is_admin: user.admin,
            });
        }

        for blog in self.blogs {
            for writer in &blog.writers {
                require_user(&world.users, writer, &blog.name)?;
            }
            let entry = insert_unique(&mut world.blogs, "blog", blog.name.clone())?;
            entry.insert(Blog {
                name: blog.name,
                writers: blog.writers,
            });
        }

        for article in self.articles {
            require_user(&world.users, &article.author, &article.title)?;
            let entry = insert_unique(&mut world.documents, "article", article.title.clone())?;
            let kind = article.kind;
            let article = Article {
                title: article.title,
                author: article.author,
            };
            entry.insert(match kind {
                ArticleKind::Article => Document::Article(article),
                ArticleKind::BookReview => Document::BookReview(BookReview(article)),
                ArticleKind::MovieReview => Document::MovieReview(MovieReview(article)),
            });
        }

        tracing::debug!(
            users = world.users.len(),
            blogs = world.blogs.len(),
            documents = world.documents.len(),
            "loaded scenario"
        );
        Ok(world)
    }
}

fn insert_unique<'a, V>(
    map: &'a mut BTreeMap<String, V>,
    kind: &'static str,
    name: String,
) -> Result<VacantEntry<'a, String, V>, ConfigError> {
    match map.entry(name) {
        Entry::Vacant(entry) => Ok(entry),
        Entry::Occupied(entry) => Err(ConfigError::Duplicate {
            kind,
            name: entry.key().clone(),
        }),
    }
}

fn require_user(
    users: &BTreeMap<String, User>,
    name: &str,
    referenced_by: &str,
) -> Result<(), ConfigError> {
    if users.contains_key(name) {
        Ok(())
    } else {
        Err(ConfigError::UnknownUser {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Parse(String),

    #[error("unknown user '{name}' referenced by '{referenced_by}'")]
    UnknownUser { name: String, referenced_by: String },

    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },
}
