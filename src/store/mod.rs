//! Storage layer for blog posts

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{BlogPost, PostFilter};

/// Lazy sequence of matching records, in the store's natural order
pub type PostStream = BoxStream<'static, Result<BlogPost>>;

/// Document store holding every submitted post in a single collection
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Append a post to the collection
    async fn insert(&self, post: &BlogPost) -> Result<()>;

    /// Stream whole records matching `filter`; callers project the fields they need
    async fn find(&self, filter: PostFilter) -> Result<PostStream>;
}

/// Open the store named by `config.mongodb_uri`
pub async fn connect(config: &Config) -> Result<Arc<dyn PostStore>> {
    let uri = config.mongodb_uri.trim();

    if uri.starts_with("memory://") {
        tracing::info!("Using in-memory post store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
        let store = MongoStore::connect(uri, &config.database, &config.collection).await?;
        return Ok(Arc::new(store));
    }

    // Only the scheme is reported; the rest of the URI may carry credentials
    let scheme = uri.split("://").next().unwrap_or_default();
    Err(Error::UnsupportedStore(format!("{}://", scheme)))
}
