//! Blog domain and its authorization rules.

use authz::{
    Authorization, GlobalPredicate, GlobalRule, ObjectPredicate, Predicates, Rule, Target,
};
use std::collections::BTreeMap;

/// A user of the blog platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone)]
pub struct Blog {
    pub name: String,
    pub writers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub author: String,
}

/// An article reviewing a book. Has its own rule registration.
#[derive(Debug, Clone)]
pub struct BookReview(pub Article);

/// An article reviewing a movie. Has its own rule registration.
#[derive(Debug, Clone)]
pub struct MovieReview(pub Article);

impl AsRef<Article> for Article {
    fn as_ref(&self) -> &Article {
        self
    }
}

impl AsRef<Article> for BookReview {
    fn as_ref(&self) -> &Article {
        &self.0
    }
}

impl AsRef<Article> for MovieReview {
    fn as_ref(&self) -> &Article {
        &self.0
    }
}

/// Anything published on a blog.
#[derive(Debug, Clone)]
pub enum Document {
    Article(Article),
    BookReview(BookReview),
    MovieReview(MovieReview),
}

impl Document {
    pub fn article(&self) -> &Article {
        match self {
            Document::Article(article) => article,
            Document::BookReview(review) => review.as_ref(),
            Document::MovieReview(review) => review.as_ref(),
        }
    }

    /// The concrete document, so queries route to the rule of its own type.
    pub fn target(&self) -> Target<'_> {
        match self {
            Document::Article(article) => Target::of(article),
            Document::BookReview(review) => Target::of(review),
            Document::MovieReview(review) => Target::of(review),
        }
    }
}

/// Permissions not tied to any object.
#[derive(Default)]
pub struct AppRule;

impl AppRule {
    fn can_add_blog(&self, user: &User) -> bool {
        user.is_admin
    }
}

impl GlobalRule<User> for AppRule {
    fn predicates(predicates: &mut Predicates<GlobalPredicate<Self, User>>) {
        predicates.add("add_blog", Self::can_add_blog);
    }
}

#[derive(Default)]
pub struct BlogRule;

impl BlogRule {
    fn can_add_article(&self, user: &User, blog: &Blog) -> bool {
        blog.writers.contains(&user.name)
    }

    fn can_add_author(&self, user: &User, _blog: &Blog) -> bool {
        user.is_admin
    }
}

impl Rule<User, Blog> for BlogRule {
    fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, Blog>>) {
        predicates
            .add("add_article", Self::can_add_article)
            .add("add_author", Self::can_add_author);
    }
}

/// Anyone reads, authors change their own work, everyone else rates it.
#[derive(Default)]
pub struct ArticleRule;

impl ArticleRule {
    fn can_read(&self, _user: &User, _article: &Article) -> bool {
        true
    }

    fn can_change(&self, user: &User, article: &Article) -> bool {
        article.author == user.name
    }

    fn can_rate(&self, user: &User, article: &Article) -> bool {
        article.author != user.name
    }
}

impl<T: AsRef<Article> + 'static> Rule<User, T> for ArticleRule {
    fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, T>>) {
        predicates
            .add("read", |rule, user, doc| rule.can_read(user, doc.as_ref()))
            .add("change", |rule, user, doc| rule.can_change(user, doc.as_ref()))
            .add("rate", |rule, user, doc| rule.can_rate(user, doc.as_ref()));
    }
}

/// Rules for the whole blog domain.
pub fn authorization() -> Authorization<User> {
    Authorization::builder()
        .global_rule::<AppRule>()
        .rule::<BlogRule, Blog>()
        .rule::<ArticleRule, Article>()
        .rule_for_each::<ArticleRule, (BookReview, MovieReview)>()
        .build()
}

/// Users, blogs and documents of one scenario, keyed by name or title.
#[derive(Debug, Default)]
pub struct World {
    pub users: BTreeMap<String, User>,
    pub blogs: BTreeMap<String, Blog>,
    pub documents: BTreeMap<String, Document>,
}
