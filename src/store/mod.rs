//! The remote store client.
//!
//! The forum keeps no canonical state of its own: every read and write goes
//! straight to the `posts` and `comments` tables through a [`Store`].

#[cfg(test)]
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use uuid::Uuid;

use crate::model::{Comment, NewComment, NewPost, Post, PostPatch, SortKey};

#[cfg(test)]
pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type SharedStore = Arc<dyn Store>;

/// A failed remote call.
///
/// A missing row is not an error: lookups return `Ok(None)` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("store unavailable during {0:?}")]
	Unavailable(Operation),
}

/// The remote operations the view models issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	ListPosts,
	GetPost,
	InsertPost,
	UpdatePost,
	DeletePost,
	ListComments,
	InsertComment,
}

/// Table-level access to posts and comments.
///
/// Calls carry no transactional guarantees across each other, and no
/// timeout or retry is applied on top of what the implementation does.
#[axum::async_trait]
pub trait Store: Send + Sync {
	/// Returns every post in the given order.
	async fn list_posts(&self, sort: SortKey) -> Result<Vec<Post>, Error>;

	async fn get_post(&self, id: Uuid) -> Result<Option<Post>, Error>;

	async fn insert_post(&self, post: NewPost) -> Result<Post, Error>;

	/// Applies the patch to the post, returning the updated row if it exists.
	async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, Error>;

	/// Returns `false` if no post had this id.
	async fn delete_post(&self, id: Uuid) -> Result<bool, Error>;

	/// Returns the comments of a post, newest first.
	async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, Error>;

	async fn insert_comment(&self, comment: NewComment) -> Result<Comment, Error>;
}
