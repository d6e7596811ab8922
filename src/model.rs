use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A single top-level discussion post.
///
/// Use this when fetching from the store and returning to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier of the post, assigned by the store.
	pub id: Uuid,
	pub title: String,
	/// Free-form body, `None` when left blank.
	pub content: Option<String>,
	/// Link to an image shown under the content, `None` when left blank.
	pub image_url: Option<String>,
	pub upvotes: i32,
	/// The creation time of the post, assigned by the store.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A reply scoped to exactly one [`Post`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
	pub id: Uuid,
	pub post_id: Uuid,
	pub content: String,
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The user-editable fields of a post, already trimmed and normalised.
///
/// Used both for inserts and for edits through [`PostPatch::Edit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewPost {
	#[validate(length(min = 1, message = "Title is required"))]
	pub title: String,
	pub content: Option<String>,
	#[validate(url(message = "Image URL must be a valid URL"))]
	pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
	pub post_id: Uuid,
	pub content: String,
}

/// An update applied to a single post row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostPatch {
	/// Replaces the title, content and image of the post.
	Edit(NewPost),
	/// Sets the upvote count to exactly this value.
	Upvotes(i32),
}

/// The order in which the home page lists posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
	/// Newest first.
	#[default]
	#[serde(rename = "created_at")]
	Recency,
	/// Most upvoted first.
	#[serde(rename = "upvotes")]
	Popularity,
}
