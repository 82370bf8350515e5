//! Blogpost - submit blog posts over JSON and fetch them back by username

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures::TryStreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogpost::api::{self, AppState};
use blogpost::config::Config;
use blogpost::store;
use blogpost::types::{BlogPost, PostFilter};

#[derive(Parser)]
#[command(name = "blogpost")]
#[command(about = "Submit blog posts and fetch them by username")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Store a single post
    Submit {
        /// Author of the post
        username: String,

        /// Post body
        post: String,
    },

    /// List posts written by a user
    List {
        /// Username to look up
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("blogpost={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    // Load config; a missing connection URI stops here
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.http_port);
            let store = store::connect(&config).await?;
            let state = AppState::new(store, &config)?;

            tracing::info!(
                port,
                allowed_origin = %config.allowed_origin,
                strict_writes = config.strict_writes,
                "Starting HTTP server"
            );

            let router = api::create_router(state);
            let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

            println!("Blogpost server running at http://localhost:{}", port);
            println!("  Posts:    POST http://localhost:{}/blog_post", port);
            println!("  Fetch:    POST http://localhost:{}/get_blog_posts", port);
            println!("  API Docs: http://localhost:{}/api/docs", port);
            println!("  Health:   http://localhost:{}/health", port);

            axum::serve(listener, router).await?;
        }

        Commands::Submit { username, post } => {
            let store = store::connect(&config).await?;
            let post = BlogPost::new(username, post);
            store.insert(&post).await?;

            println!("{}", serde_json::to_string(&post)?);
        }

        Commands::List { username } => {
            let store = store::connect(&config).await?;
            let posts: Vec<BlogPost> = store
                .find(PostFilter::by_username(username.as_str()))
                .await?
                .try_collect()
                .await?;

            if posts.is_empty() {
                println!("No posts found for {}", username);
            } else {
                for post in posts {
                    println!("• {}", post.post);
                }
            }
        }
    }

    Ok(())
}
