use uuid::Uuid;

use super::Navigation;
use crate::{
	model::{Comment, NewComment, Post, PostPatch},
	store::Store,
};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this post?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
	Loading,
	Found(Post),
	/// Terminal. The post is missing or could not be fetched.
	NotFound,
}

/// A single post with its comments.
#[derive(Debug)]
pub struct DetailViewModel {
	id: Uuid,
	state: DetailState,
	comments: Vec<Comment>,
	draft: String,
}

impl DetailViewModel {
	pub fn new(id: Uuid) -> Self {
		Self {
			id,
			state: DetailState::Loading,
			comments: Vec::new(),
			draft: String::new(),
		}
	}

	#[cfg(test)]
	pub fn id(&self) -> Uuid {
		self.id
	}

	#[cfg(test)]
	pub fn state(&self) -> &DetailState {
		&self.state
	}

	pub fn post(&self) -> Option<&Post> {
		match &self.state {
			DetailState::Found(post) => Some(post),
			_ => None,
		}
	}

	/// Newest first.
	pub fn comments(&self) -> &[Comment] {
		&self.comments
	}

	pub fn draft(&self) -> &str {
		&self.draft
	}

	pub fn set_draft(&mut self, draft: impl Into<String>) {
		self.draft = draft.into();
	}

	/// Fetches the post and its comments concurrently.
	///
	/// Returns [`Navigation::Home`] when the post cannot be shown, whether it
	/// does not exist or the fetch failed. A failed comment fetch only
	/// leaves the comment list empty.
	pub async fn load(&mut self, store: &dyn Store) -> Option<Navigation> {
		let (post, comments) = tokio::join!(store.get_post(self.id), store.list_comments(self.id));

		match comments {
			Ok(comments) => self.comments = comments,
			Err(error) => tracing::error!(%error, post = %self.id, "error fetching comments"),
		}

		match post {
			Ok(Some(post)) => {
				self.state = DetailState::Found(post);
				None
			}
			Ok(None) => {
				tracing::info!(post = %self.id, "post not found");
				self.state = DetailState::NotFound;
				Some(Navigation::Home)
			}
			Err(error) => {
				tracing::error!(%error, post = %self.id, "error fetching post");
				self.state = DetailState::NotFound;
				Some(Navigation::Home)
			}
		}
	}

	/// Adds one to the held upvote count and writes it back.
	///
	/// The local count only changes once the store confirms the write.
	pub async fn upvote(&mut self, store: &dyn Store) {
		let DetailState::Found(post) = &mut self.state else {
			return;
		};

		let Some(upvotes) = post.upvotes.checked_add(1) else {
			tracing::warn!(
				post = %self.id,
				upvotes = post.upvotes,
				"upvote count is at its maximum"
			);
			return;
		};

		match store.update_post(self.id, PostPatch::Upvotes(upvotes)).await {
			Ok(Some(_)) => post.upvotes = upvotes,
			Ok(None) => tracing::warn!(post = %self.id, "upvoted post no longer exists"),
			Err(error) => tracing::error!(%error, post = %self.id, "error upvoting post"),
		}
	}

	/// Submits the draft as a new comment, placing it at the top of the list.
	///
	/// The draft is stored trimmed. A blank draft is ignored. On failure the
	/// draft is kept for a retry.
	pub async fn add_comment(&mut self, store: &dyn Store) {
		let content = self.draft.trim();

		if content.is_empty() {
			return;
		}

		let comment = NewComment {
			post_id: self.id,
			content: content.to_owned(),
		};

		match store.insert_comment(comment).await {
			Ok(comment) => {
				self.comments.insert(0, comment);
				self.draft.clear();
			}
			Err(error) => tracing::error!(%error, post = %self.id, "error adding comment"),
		}
	}

	/// Deletes the post once `confirm` accepts [`DELETE_PROMPT`].
	///
	/// Returns [`Navigation::Home`] on success. Declining, or a failed
	/// delete, leaves the page as it is.
	pub async fn delete(
		&mut self,
		store: &dyn Store,
		confirm: impl FnOnce(&str) -> bool,
	) -> Option<Navigation> {
		if !confirm(DELETE_PROMPT) {
			return None;
		}

		match store.delete_post(self.id).await {
			Ok(deleted) => {
				if !deleted {
					tracing::warn!(post = %self.id, "deleted post was already gone");
				}

				Some(Navigation::Home)
			}
			Err(error) => {
				tracing::error!(%error, post = %self.id, "error deleting post");
				None
			}
		}
	}
}
