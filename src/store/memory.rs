//! In-process post store, selected with a `memory://` URI

use async_trait::async_trait;
use futures::{stream, StreamExt};
use tokio::sync::RwLock;

use super::{PostStore, PostStream};
use crate::error::Result;
use crate::types::{BlogPost, PostFilter};

/// Keeps posts in insertion order for the lifetime of the process
#[derive(Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, post: &BlogPost) -> Result<()> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn find(&self, filter: PostFilter) -> Result<PostStream> {
        // Snapshot under the read lock so the stream does not borrow the store
        let matches: Vec<BlogPost> = self
            .posts
            .read()
            .await
            .iter()
            .filter(|post| filter.matches(post))
            .cloned()
            .collect();

        Ok(stream::iter(matches.into_iter().map(Ok)).boxed())
    }
}
