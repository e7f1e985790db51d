//! Blog scenario: global, blog and article rules, with book and movie reviews
//! registered next to plain articles.

use authz::{
    Authorization, Error, GlobalPredicate, GlobalRule, ObjectPredicate, Permission, Predicates,
    Query, Rule, Target, TargetType,
};
use proptest::prelude::*;
use std::any::Any;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: u32,
    is_admin: bool,
}

impl User {
    fn new(id: u32) -> Self {
        Self {
            id,
            is_admin: false,
        }
    }

    fn admin(id: u32) -> Self {
        Self { id, is_admin: true }
    }
}

struct Blog {
    writers: Vec<u32>,
}

struct Article {
    author: u32,
}

struct BookReview(Article);

struct MovieReview(Article);

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

#[derive(Default)]
struct AppRule;

impl GlobalRule<User> for AppRule {
    fn predicates(predicates: &mut Predicates<GlobalPredicate<Self, User>>) {
        predicates.add("add_blog", |_, user| user.is_admin);
    }
}

#[derive(Default)]
struct BlogRule;

impl Rule<User, Blog> for BlogRule {
    fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, Blog>>) {
        predicates
            .add("add_article", |_, user, blog| blog.writers.contains(&user.id))
            .add("add_author", |_, user, _| user.is_admin);
    }
}

#[derive(Default)]
struct ArticleRule;

impl ArticleRule {
    fn can_read(&self, _user: &User, _article: &Article) -> bool {
        true
    }

    fn can_change(&self, user: &User, article: &Article) -> bool {
        article.author == user.id
    }

    fn can_rate(&self, user: &User, article: &Article) -> bool {
        article.author != user.id
    }
}

impl<T: AsRef<Article> + 'static> Rule<User, T> for ArticleRule {
    fn predicates(predicates: &mut Predicates<ObjectPredicate<Self, User, T>>) {
        predicates
            .add("read", |rule, user, article| rule.can_read(user, article.as_ref()))
            .add("change", |rule, user, article| rule.can_change(user, article.as_ref()))
            .add("rate", |rule, user, article| rule.can_rate(user, article.as_ref()));
    }
}

fn built() -> Authorization<User> {
    Authorization::builder()
        .global_rule::<AppRule>()
        .rule::<ArticleRule, Article>()
        .rule_for_each::<ArticleRule, (BookReview, MovieReview)>()
        .rule::<BlogRule, Blog>()
        .build()
}

fn registered() -> Authorization<User> {
    let mut authz = Authorization::new();
    authz
        .register_global::<AppRule>()
        .register::<ArticleRule, Article>()
        .register_each::<ArticleRule, (BookReview, MovieReview)>()
        .register::<BlogRule, Blog>();
    authz
}

fn configurations() -> [Authorization<User>; 2] {
    [built(), registered()]
}

struct Fixture<A> {
    blog: Blog,
    reader: User,
    writer1: User,
    writer2: User,
    writer1_article: A,
    writer2_article: A,
}

fn fixture<A>(wrap: fn(Article) -> A) -> Fixture<A> {
    Fixture {
        blog: Blog { writers: vec![1, 2] },
        reader: User::new(3),
        writer1: User::new(1),
        writer2: User::new(2),
        writer1_article: wrap(Article { author: 1 }),
        writer2_article: wrap(Article { author: 2 }),
    }
}

fn check_matrix<A: Any>(wrap: fn(Article) -> A) {
    let f = fixture(wrap);
    let cases: Vec<(&User, Target<'_>, Query, bool)> = vec![
        (&f.reader, Target::of(&f.blog), "add_article".into(), false),
        (&f.writer1, Target::of(&f.blog), "add_article".into(), true),
        (&f.writer1, Target::of(&f.writer1_article), "read".into(), true),
        (&f.writer1, Target::of(&f.writer1_article), "change".into(), true),
        (&f.writer1, Target::of(&f.writer1_article), "rate".into(), false),
        (&f.writer1, Target::of(&f.writer1_article), ["read", "change"].into(), true),
        (&f.writer1, Target::of(&f.writer1_article), ["read", "change", "rate"].into(), false),
        (&f.writer1, Target::of(&f.writer2_article), "read".into(), true),
        (&f.writer1, Target::of(&f.writer2_article), "change".into(), false),
        (&f.writer1, Target::of(&f.writer2_article), "rate".into(), true),
        (&f.writer2, Target::of(&f.writer1_article), "read".into(), true),
        (&f.writer2, Target::of(&f.writer1_article), "change".into(), false),
        (&f.writer2, Target::of(&f.writer1_article), "rate".into(), true),
        (&f.writer2, Target::of(&f.writer2_article), "read".into(), true),
        (&f.writer2, Target::of(&f.writer2_article), "change".into(), true),
        (&f.writer2, Target::of(&f.writer2_article), "rate".into(), false),
        (&f.writer2, Target::of(&f.writer2_article), ["read", "change"].into(), true),
        (&f.writer2, Target::of(&f.writer2_article), ["read", "change", "rate"].into(), false),
    ];

    for authz in configurations() {
        for (user, target, query, expected) in &cases {
            let allowed = authz.allows(user, query.clone(), *target).unwrap();
            assert_eq!(allowed, *expected, "allows({user:?}, {query}, {})", target.target_type());

            match authz.check(user, query.clone(), *target) {
                Ok(()) => assert!(*expected, "check passed for {user:?} {query}"),
                Err(Error::Denied { .. }) => assert!(!*expected, "check denied {user:?} {query}"),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}

fn names(permissions: &[&str]) -> BTreeSet<Permission> {
    permissions.iter().copied().map(Permission::from).collect()
}

fn check_permissions<A: Any>(wrap: fn(Article) -> A) {
    let f = fixture(wrap);
    let cases = [
        (&f.writer1, &f.writer1_article, names(&["read", "change"])),
        (&f.writer1, &f.writer2_article, names(&["read", "rate"])),
        (&f.writer2, &f.writer1_article, names(&["read", "rate"])),
        (&f.writer2, &f.writer2_article, names(&["read", "change"])),
    ];

    for authz in configurations() {
        for (user, article, expected) in &cases {
            assert_eq!(&authz.permissions(user, *article).unwrap(), expected);
        }
    }
}

#[test]
fn test_allows_and_check_for_articles() {
    check_matrix::<Article>(|article| article);
}

#[test]
fn test_allows_and_check_for_book_reviews() {
    check_matrix::<BookReview>(BookReview);
}

#[test]
fn test_allows_and_check_for_movie_reviews() {
    check_matrix::<MovieReview>(MovieReview);
}

#[test]
fn test_permissions_for_every_article_kind() {
    check_permissions::<Article>(|article| article);
    check_permissions::<BookReview>(BookReview);
    check_permissions::<MovieReview>(MovieReview);
}

#[test]
fn test_rule_without_associated_type() {
    for authz in configurations() {
        assert!(authz.allows(&User::admin(9), "add_blog", Target::None).unwrap());
        assert!(!authz.allows(&User::new(1), "add_blog", Target::None).unwrap());
        assert_eq!(authz.permissions(&User::admin(9), Target::None).unwrap(), names(&["add_blog"]));
        assert!(authz.permissions(&User::new(1), Target::None).unwrap().is_empty());
    }
}

#[test]
fn test_unknown_permission() {
    let article = Article { author: 1 };
    let author = User::new(1);
    for authz in configurations() {
        let err = authz.allows(&author, "unknown_permission", &article).unwrap_err();
        assert!(matches!(err, Error::UnknownPermission { .. }));

        let err = authz.check(&author, "unknown_permission", &article).unwrap_err();
        assert!(matches!(err, Error::UnknownPermission { .. }));
    }
}

#[test]
fn test_unknown_type() {
    let authz = Authorization::<User>::new();
    let article = Article { author: 1 };
    let author = User::new(1);

    let err = authz.allows(&author, "edit", &article).unwrap_err();
    assert!(matches!(err, Error::RuleNotFound { .. }));

    let err = authz.check(&author, "edit", &article).unwrap_err();
    assert!(matches!(err, Error::RuleNotFound { .. }));

    let err = authz.permissions(&author, Target::None).unwrap_err();
    assert!(matches!(err, Error::RuleNotFound { .. }));
}

#[test]
fn test_wrapper_types_need_their_own_registration() {
    let authz = Authorization::<User>::builder()
        .rule::<ArticleRule, Article>()
        .build();
    let review = BookReview(Article { author: 1 });

    let err = authz.allows(&User::new(1), "read", &review).unwrap_err();
    assert!(matches!(
        err,
        Error::RuleNotFound { target } if target == TargetType::of::<BookReview>()
    ));
    assert!(authz.allows(&User::new(1), "read", &review.0).unwrap());
}

#[test]
fn test_global_rule_is_not_used_for_objects() {
    let authz = Authorization::<User>::builder().global_rule::<AppRule>().build();
    let blog = Blog { writers: vec![] };

    let err = authz.allows(&User::admin(1), "add_blog", &blog).unwrap_err();
    assert!(matches!(err, Error::RuleNotFound { .. }));
}

#[test]
fn test_known_permissions() {
    let authz = built();
    assert_eq!(
        authz.known_permissions(TargetType::of::<MovieReview>()).unwrap(),
        [Permission::new("change"), Permission::new("rate"), Permission::new("read")]
    );
    assert_eq!(
        authz.known_permissions(TargetType::NoObject).unwrap(),
        [Permission::new("add_blog")]
    );
}

const ARTICLE_PERMISSIONS: [&str; 3] = ["read", "change", "rate"];

fn arb_query() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(ARTICLE_PERMISSIONS.to_vec(), 0..=3)
}

proptest! {
    #[test]
    fn check_denies_exactly_when_allows_is_false(
        user_id in 0u32..4,
        author in 0u32..4,
        query in arb_query(),
    ) {
        let authz = built();
        let user = User::new(user_id);
        let review = MovieReview(Article { author });

        let allowed = authz.allows(&user, query.clone(), &review).unwrap();
        match authz.check(&user, query, &review) {
            Ok(()) => prop_assert!(allowed),
            Err(err) => prop_assert!(err.is_denied() && !allowed),
        }
    }

    #[test]
    fn batch_is_conjunction_of_single_queries(
        user_id in 0u32..4,
        author in 0u32..4,
        query in arb_query(),
    ) {
        let authz = registered();
        let user = User::new(user_id);
        let article = Article { author };

        let batch = authz.allows(&user, query.clone(), &article).unwrap();
        let mut each = true;
        for permission in &query {
            each &= authz.allows(&user, *permission, &article).unwrap();
        }
        prop_assert_eq!(batch, each);
    }

    #[test]
    fn permissions_are_the_allowed_known_permissions(
        user_id in 0u32..4,
        author in 0u32..4,
    ) {
        let authz = built();
        let user = User::new(user_id);
        let review = BookReview(Article { author });

        let expected: BTreeSet<Permission> = authz
            .known_permissions(TargetType::of::<BookReview>())
            .unwrap()
            .into_iter()
            .filter(|permission| authz.allows(&user, permission, &review).unwrap())
            .collect();
        prop_assert_eq!(authz.permissions(&user, &review).unwrap(), expected);
    }

    #[test]
    fn unknown_permission_is_never_a_denial(
        user_id in 0u32..4,
        author in 0u32..4,
        name in "[a-z_]{1,12}",
    ) {
        prop_assume!(!ARTICLE_PERMISSIONS.contains(&name.as_str()));
        let authz = built();
        let user = User::new(user_id);
        let article = Article { author };

        let is_unknown = matches!(
            authz.allows(&user, name.as_str(), &article),
            Err(Error::UnknownPermission { .. })
        );
        prop_assert!(is_unknown);
    }
}
