//! Page payloads shared by the routes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
	humanize,
	model::{Comment, Post},
	theme::Theme,
	view::Navigation,
};

/// A post as rendered on a page.
#[derive(Debug, Serialize)]
pub struct PostView {
	pub id: Uuid,
	pub title: String,
	pub content: Option<String>,
	pub image_url: Option<String>,
	pub upvotes: i32,
	pub created_at: DateTime<Utc>,
	/// Relative creation time, e.g. "5 minutes ago".
	pub posted: String,
	pub link: String,
}

impl PostView {
	pub fn new(post: &Post, now: DateTime<Utc>) -> Self {
		Self {
			id: post.id,
			title: post.title.clone(),
			content: post.content.clone(),
			image_url: post.image_url.clone(),
			upvotes: post.upvotes,
			created_at: post.created_at,
			posted: humanize::relative(post.created_at, now),
			link: Navigation::Post(post.id).path(),
		}
	}
}

#[derive(Debug, Serialize)]
pub struct CommentView {
	pub id: Uuid,
	pub content: String,
	pub created_at: DateTime<Utc>,
	pub posted: String,
}

impl CommentView {
	pub fn new(comment: &Comment, now: DateTime<Utc>) -> Self {
		Self {
			id: comment.id,
			content: comment.content.clone(),
			created_at: comment.created_at,
			posted: humanize::relative(comment.created_at, now),
		}
	}
}

/// The navbar state, present on every page.
#[derive(Debug, Serialize)]
pub struct Navbar {
	pub theme: Theme,
	pub home: String,
	pub create: String,
}

impl Navbar {
	pub fn new(theme: Theme) -> Self {
		Self {
			theme,
			home: Navigation::Home.path(),
			create: Navigation::Create.path(),
		}
	}
}
