mod blog;
mod config;
mod error;

use std::path::PathBuf;

use authz::{Authorization, Query, Target};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blog::{Document, User, World};
use config::Scenario;
use error::{Error, Result};

const SCENARIO_FILE: &str = "authz.toml";

#[derive(Parser)]
#[command(name = "authz")]
#[command(about = "Ask what users may do in a blog scenario", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file with users, blogs and articles
    #[arg(short, long, global = true, default_value = SCENARIO_FILE)]
    scenario: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print whether a user holds every given permission
    Allows(QueryArgs),
    /// Like `allows`, but fail when the permission is denied
    Check(QueryArgs),
    /// List the permissions a user holds
    Permissions {
        /// User name
        #[arg(short, long)]
        user: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// List users, blogs and articles in the scenario
    Show,
}

#[derive(Args)]
struct QueryArgs {
    /// User name
    #[arg(short, long)]
    user: String,
    /// Permission to check (repeat for a batch)
    #[arg(short, long = "permission", required = true)]
    permissions: Vec<String>,
    #[command(flatten)]
    target: TargetArgs,
}

/// Object to check against; neither means a permission without an object.
#[derive(Args, Default)]
struct TargetArgs {
    /// Blog name
    #[arg(long, conflicts_with = "article")]
    blog: Option<String>,
    /// Article title
    #[arg(long)]
    article: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let world = Scenario::load(&cli.scenario)?.into_world()?;
    let authz = blog::authorization();

    match cli.command {
        Commands::Allows(args) => {
            let allowed = cmd_allows(&authz, &world, &args)?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            Ok(())
        }
        Commands::Check(args) => {
            cmd_check(&authz, &world, &args)?;
            println!("ok");
            Ok(())
        }
        Commands::Permissions { user, target } => {
            for permission in cmd_permissions(&authz, &world, &user, &target)? {
                println!("{permission}");
            }
            Ok(())
        }
        Commands::Show => {
            cmd_show(&world);
            Ok(())
        }
    }
}

fn cmd_allows(authz: &Authorization<User>, world: &World, args: &QueryArgs) -> Result<bool> {
    let user = find_user(world, &args.user)?;
    let target = resolve_target(world, &args.target)?;
    Ok(authz.allows(user, query(&args.permissions), target)?)
}

fn cmd_check(authz: &Authorization<User>, world: &World, args: &QueryArgs) -> Result<()> {
    let user = find_user(world, &args.user)?;
    let target = resolve_target(world, &args.target)?;
    Ok(authz.check(user, query(&args.permissions), target)?)
}

fn cmd_permissions(
    authz: &Authorization<User>,
    world: &World,
    user: &str,
    target: &TargetArgs,
) -> Result<Vec<String>> {
    let user = find_user(world, user)?;
    let target = resolve_target(world, target)?;
    let granted = authz.permissions(user, target)?;
    Ok(granted.into_iter().map(|p| p.to_string()).collect())
}

fn cmd_show(world: &World) {
    println!("{:<12}  ADMIN", "USER");
    for user in world.users.values() {
        println!("{:<12}  {}", user.name, if user.is_admin { "yes" } else { "no" });
    }

    println!("\n{:<12}  WRITERS", "BLOG");
    for blog in world.blogs.values() {
        println!("{:<12}  {}", blog.name, blog.writers.join(", "));
    }

    println!("\n{:<12}  {:<12}  KIND", "ARTICLE", "AUTHOR");
    for document in world.documents.values() {
        let kind = match document {
            Document::Article(_) => "article",
            Document::BookReview(_) => "book review",
            Document::MovieReview(_) => "movie review",
        };
        let article = document.article();
        println!("{:<12}  {:<12}  {kind}", article.title, article.author);
    }
}

/// One permission is a single query; several are a batch.
fn query(permissions: &[String]) -> Query {
    match permissions {
        [one] => Query::one(one),
        many => Query::all(many),
    }
}

fn find_user<'w>(world: &'w World, name: &str) -> Result<&'w User> {
    world
        .users
        .get(name)
        .ok_or_else(|| Error::UnknownUser(name.to_string()))
}

fn resolve_target<'w>(world: &'w World, args: &TargetArgs) -> Result<Target<'w>> {
    if let Some(name) = &args.blog {
        let blog = world
            .blogs
            .get(name)
            .ok_or_else(|| Error::UnknownBlog(name.clone()))?;
        return Ok(Target::of(blog));
    }
    if let Some(title) = &args.article {
        let document = world
            .documents
            .get(title)
            .ok_or_else(|| Error::UnknownArticle(title.clone()))?;
        return Ok(document.target());
    }
    Ok(Target::None)
}
