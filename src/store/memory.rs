use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Error, Operation, Store};
use crate::model::{Comment, NewComment, NewPost, Post, PostPatch, SortKey};

/// An in-process [`Store`] with the same ordering contract as the database.
///
/// Every call is recorded, and individual operations can be made to fail,
/// which lets view models be driven through their error paths.
#[derive(Default)]
pub struct MemoryStore {
	inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
	posts: Vec<Post>,
	comments: Vec<Comment>,
	calls: Vec<Operation>,
	failing: HashSet<Operation>,
	clock: Option<DateTime<Utc>>,
}

impl Inner {
	/// Records the call, failing it if requested.
	fn call(&mut self, operation: Operation) -> Result<(), Error> {
		self.calls.push(operation);

		if self.failing.contains(&operation) {
			return Err(Error::Unavailable(operation));
		}

		Ok(())
	}

	/// Store-assigned timestamps, strictly increasing across inserts.
	fn now(&mut self) -> DateTime<Utc> {
		let now = Utc::now();
		let now = match self.clock {
			Some(last) if last >= now => last + Duration::milliseconds(1),
			_ => now,
		};

		self.clock = Some(now);
		now
	}
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a fully-formed post, bypassing the call log.
	pub async fn seed_post(&self, post: Post) {
		self.inner.lock().await.posts.push(post);
	}

	/// Inserts a fully-formed comment, bypassing the call log.
	pub async fn seed_comment(&self, comment: Comment) {
		self.inner.lock().await.comments.push(comment);
	}

	/// Makes every later call of `operation` fail until [`Self::recover`].
	pub async fn fail(&self, operation: Operation) {
		self.inner.lock().await.failing.insert(operation);
	}

	pub async fn recover(&self, operation: Operation) {
		self.inner.lock().await.failing.remove(&operation);
	}

	/// Every operation issued so far, in order.
	pub async fn calls(&self) -> Vec<Operation> {
		self.inner.lock().await.calls.clone()
	}

	pub async fn clear_calls(&self) {
		self.inner.lock().await.calls.clear();
	}

	pub async fn post(&self, id: Uuid) -> Option<Post> {
		let inner = self.inner.lock().await;

		inner.posts.iter().find(|post| post.id == id).cloned()
	}

	pub async fn comments(&self) -> Vec<Comment> {
		self.inner.lock().await.comments.clone()
	}
}

#[axum::async_trait]
impl Store for MemoryStore {
	async fn list_posts(&self, sort: SortKey) -> Result<Vec<Post>, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::ListPosts)?;

		let mut posts = inner.posts.clone();

		match sort {
			SortKey::Recency => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
			SortKey::Popularity => posts.sort_by(|a, b| {
				b.upvotes
					.cmp(&a.upvotes)
					.then_with(|| b.created_at.cmp(&a.created_at))
			}),
		}

		Ok(posts)
	}

	async fn get_post(&self, id: Uuid) -> Result<Option<Post>, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::GetPost)?;

		Ok(inner.posts.iter().find(|post| post.id == id).cloned())
	}

	async fn insert_post(&self, post: NewPost) -> Result<Post, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::InsertPost)?;

		let post = Post {
			id: Uuid::new_v4(),
			title: post.title,
			content: post.content,
			image_url: post.image_url,
			upvotes: 0,
			created_at: inner.now(),
		};

		inner.posts.push(post.clone());
		Ok(post)
	}

	async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::UpdatePost)?;

		let Some(post) = inner.posts.iter_mut().find(|post| post.id == id) else {
			return Ok(None);
		};

		match patch {
			PostPatch::Edit(edit) => {
				post.title = edit.title;
				post.content = edit.content;
				post.image_url = edit.image_url;
			}
			PostPatch::Upvotes(upvotes) => post.upvotes = upvotes,
		}

		Ok(Some(post.clone()))
	}

	async fn delete_post(&self, id: Uuid) -> Result<bool, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::DeletePost)?;

		let before = inner.posts.len();
		inner.posts.retain(|post| post.id != id);

		Ok(inner.posts.len() < before)
	}

	async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::ListComments)?;

		let mut comments = inner
			.comments
			.iter()
			.filter(|comment| comment.post_id == post_id)
			.cloned()
			.collect::<Vec<_>>();

		comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(comments)
	}

	async fn insert_comment(&self, comment: NewComment) -> Result<Comment, Error> {
		let mut inner = self.inner.lock().await;
		inner.call(Operation::InsertComment)?;

		// Mirrors the foreign key on comments.post_id.
		if !inner.posts.iter().any(|post| post.id == comment.post_id) {
			return Err(Error::Unavailable(Operation::InsertComment));
		}

		let comment = Comment {
			id: Uuid::new_v4(),
			post_id: comment.post_id,
			content: comment.content,
			created_at: inner.now(),
		};

		inner.comments.push(comment.clone());
		Ok(comment)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn post(title: &str, upvotes: i32, minutes_ago: i64) -> Post {
		Post {
			id: Uuid::new_v4(),
			title: title.into(),
			content: None,
			image_url: None,
			upvotes,
			created_at: Utc::now() - Duration::minutes(minutes_ago),
		}
	}

	#[tokio::test]
	async fn test_list_posts_order() {
		let store = MemoryStore::new();

		store.seed_post(post("old and loved", 10, 60)).await;
		store.seed_post(post("new", 1, 1)).await;
		store.seed_post(post("middle", 5, 30)).await;

		let recent = store.list_posts(SortKey::Recency).await.unwrap();
		assert!(recent
			.windows(2)
			.all(|pair| pair[0].created_at >= pair[1].created_at));

		let popular = store.list_posts(SortKey::Popularity).await.unwrap();
		assert!(popular.windows(2).all(|pair| pair[0].upvotes >= pair[1].upvotes));
		assert_eq!(popular[0].title, "old and loved");
	}

	#[tokio::test]
	async fn test_insert_assigns_defaults() {
		let store = MemoryStore::new();

		let first = store
			.insert_post(NewPost {
				title: "first".into(),
				content: None,
				image_url: None,
			})
			.await
			.unwrap();
		let second = store
			.insert_post(NewPost {
				title: "second".into(),
				content: Some("body".into()),
				image_url: None,
			})
			.await
			.unwrap();

		assert_eq!(first.upvotes, 0);
		assert!(second.created_at > first.created_at);
		assert_eq!(
			store.calls().await,
			vec![Operation::InsertPost, Operation::InsertPost]
		);
	}

	#[tokio::test]
	async fn test_failing_operation() {
		let store = MemoryStore::new();
		store.fail(Operation::ListPosts).await;

		assert!(matches!(
			store.list_posts(SortKey::Recency).await,
			Err(Error::Unavailable(Operation::ListPosts))
		));

		store.recover(Operation::ListPosts).await;
		assert!(store.list_posts(SortKey::Recency).await.is_ok());
	}

	#[tokio::test]
	async fn test_comment_requires_post() {
		let store = MemoryStore::new();

		let result = store
			.insert_comment(NewComment {
				post_id: Uuid::new_v4(),
				content: "orphan".into(),
			})
			.await;

		assert!(result.is_err());
		assert!(store.comments().await.is_empty());
	}

	#[tokio::test]
	async fn test_delete_missing_post() {
		let store = MemoryStore::new();

		assert!(!store.delete_post(Uuid::new_v4()).await.unwrap());
	}
}
