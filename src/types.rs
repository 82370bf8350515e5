//! Core types for the blogpost service

use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single blog post as submitted by the web client and stored in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlogPost {
    /// Author of the post; many posts may share one username
    pub username: String,
    /// Free-form post body
    pub post: String,
}

impl BlogPost {
    pub fn new(username: impl Into<String>, post: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            post: post.into(),
        }
    }
}

/// Selects posts by exact username equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFilter {
    pub username: String,
}

impl PostFilter {
    pub fn by_username(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Whether a post satisfies this filter
    pub fn matches(&self, post: &BlogPost) -> bool {
        post.username == self.username
    }

    /// Native query document for the MongoDB driver
    pub fn to_document(&self) -> Document {
        doc! { "username": self.username.as_str() }
    }
}
