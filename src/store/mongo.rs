//! MongoDB-backed post store

use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use mongodb::{Client, Collection};

use super::{PostStore, PostStream};
use crate::error::{Error, Result};
use crate::types::{BlogPost, PostFilter};

/// Long-lived handle on one collection; the driver's client is internally pooled and `Send + Sync`
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<BlogPost>,
}

impl MongoStore {
    /// Build the client once at startup. The driver connects lazily, so an
    /// unreachable server surfaces on the first insert or find.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client.database(database).collection::<BlogPost>(collection);

        tracing::info!(database, collection = collection.name(), "MongoDB post store ready");

        Ok(Self { collection })
    }
}

#[async_trait]
impl PostStore for MongoStore {
    async fn insert(&self, post: &BlogPost) -> Result<()> {
        let result = self.collection.insert_one(post).await?;
        tracing::debug!(id = %result.inserted_id, username = %post.username, "Inserted post");
        Ok(())
    }

    async fn find(&self, filter: PostFilter) -> Result<PostStream> {
        let cursor = self.collection.find(filter.to_document()).await?;
        Ok(cursor.map_err(Error::from).boxed())
    }
}
