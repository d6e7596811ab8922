use uuid::Uuid;

use super::{Error, Store};
use crate::{
	model::{Comment, NewComment, NewPost, Post, PostPatch, SortKey},
	Database,
};

/// A [`Store`] backed by the managed Postgres database.
#[derive(Clone)]
pub struct PgStore {
	database: Database,
}

impl PgStore {
	pub fn new(database: Database) -> Self {
		Self { database }
	}
}

#[axum::async_trait]
impl Store for PgStore {
	async fn list_posts(&self, sort: SortKey) -> Result<Vec<Post>, Error> {
		// ORDER BY cannot be bound, so each key gets its own statement.
		let query = match sort {
			SortKey::Recency => "SELECT * FROM posts ORDER BY created_at DESC",
			SortKey::Popularity => "SELECT * FROM posts ORDER BY upvotes DESC, created_at DESC",
		};

		let posts = sqlx::query_as::<_, Post>(query)
			.fetch_all(&self.database)
			.await?;

		Ok(posts)
	}

	async fn get_post(&self, id: Uuid) -> Result<Option<Post>, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				SELECT * FROM posts
				WHERE id = $1
			"#,
		)
		.bind(id)
		.fetch_optional(&self.database)
		.await?;

		Ok(post)
	}

	async fn insert_post(&self, post: NewPost) -> Result<Post, Error> {
		let post = sqlx::query_as::<_, Post>(
			r#"
				INSERT INTO posts (title, content, image_url)
				VALUES ($1, $2, $3)
				RETURNING *
			"#,
		)
		.bind(post.title)
		.bind(post.content)
		.bind(post.image_url)
		.fetch_one(&self.database)
		.await?;

		Ok(post)
	}

	async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, Error> {
		let query = match patch {
			PostPatch::Edit(post) => sqlx::query_as::<_, Post>(
				r#"
					UPDATE posts
					SET title = $1, content = $2, image_url = $3
					WHERE id = $4
					RETURNING *
				"#,
			)
			.bind(post.title)
			.bind(post.content)
			.bind(post.image_url)
			.bind(id),
			PostPatch::Upvotes(upvotes) => sqlx::query_as::<_, Post>(
				r#"
					UPDATE posts
					SET upvotes = $1
					WHERE id = $2
					RETURNING *
				"#,
			)
			.bind(upvotes)
			.bind(id),
		};

		Ok(query.fetch_optional(&self.database).await?)
	}

	async fn delete_post(&self, id: Uuid) -> Result<bool, Error> {
		let result = sqlx::query(
			r#"
				DELETE FROM posts
				WHERE id = $1
			"#,
		)
		.bind(id)
		.execute(&self.database)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, Error> {
		let comments = sqlx::query_as::<_, Comment>(
			r#"
				SELECT * FROM comments
				WHERE post_id = $1
				ORDER BY created_at DESC
			"#,
		)
		.bind(post_id)
		.fetch_all(&self.database)
		.await?;

		Ok(comments)
	}

	async fn insert_comment(&self, comment: NewComment) -> Result<Comment, Error> {
		let comment = sqlx::query_as::<_, Comment>(
			r#"
				INSERT INTO comments (post_id, content)
				VALUES ($1, $2)
				RETURNING *
			"#,
		)
		.bind(comment.post_id)
		.bind(comment.content)
		.fetch_one(&self.database)
		.await?;

		Ok(comment)
	}
}

#[cfg(test)]
mod test {
	use chrono::{DateTime, Duration, Utc};

	use super::*;

	async fn seed(store: &PgStore, title: &str, upvotes: i32, minutes_ago: i64) -> Post {
		sqlx::query_as::<_, Post>(
			r#"
				INSERT INTO posts (title, upvotes, created_at)
				VALUES ($1, $2, $3)
				RETURNING *
			"#,
		)
		.bind(title)
		.bind(upvotes)
		.bind(Utc::now() - Duration::minutes(minutes_ago))
		.fetch_one(&store.database)
		.await
		.unwrap()
	}

	async fn seed_comment(store: &PgStore, post_id: Uuid, content: &str, at: DateTime<Utc>) {
		sqlx::query("INSERT INTO comments (post_id, content, created_at) VALUES ($1, $2, $3)")
			.bind(post_id)
			.bind(content)
			.bind(at)
			.execute(&store.database)
			.await
			.unwrap();
	}

	fn titles(posts: &[Post]) -> Vec<&str> {
		posts.iter().map(|post| post.title.as_str()).collect()
	}

	#[sqlx::test]
	async fn test_list_posts_order(pool: Database) {
		let store = PgStore::new(pool);

		seed(&store, "old and loved", 10, 60).await;
		seed(&store, "new", 1, 1).await;
		seed(&store, "middle", 5, 30).await;
		seed(&store, "older middle", 5, 45).await;

		let posts = store.list_posts(SortKey::Recency).await.unwrap();
		assert_eq!(
			titles(&posts),
			["new", "middle", "older middle", "old and loved"]
		);

		let posts = store.list_posts(SortKey::Popularity).await.unwrap();
		assert_eq!(
			titles(&posts),
			["old and loved", "middle", "older middle", "new"]
		);
	}

	#[sqlx::test]
	async fn test_insert_and_get_post(pool: Database) {
		let store = PgStore::new(pool);

		let post = store
			.insert_post(NewPost {
				title: "Season 2 discussion".into(),
				content: None,
				image_url: Some("https://example.com/s2.png".into()),
			})
			.await
			.unwrap();

		assert_eq!(post.title, "Season 2 discussion");
		assert_eq!(post.content, None);
		assert_eq!(post.image_url.as_deref(), Some("https://example.com/s2.png"));
		assert_eq!(post.upvotes, 0);

		assert_eq!(store.get_post(post.id).await.unwrap(), Some(post));
		assert_eq!(store.get_post(Uuid::new_v4()).await.unwrap(), None);
	}

	#[sqlx::test]
	async fn test_update_post(pool: Database) {
		let store = PgStore::new(pool);
		let post = seed(&store, "Frieren", 3, 10).await;

		let upvoted = store
			.update_post(post.id, PostPatch::Upvotes(4))
			.await
			.unwrap()
			.unwrap();

		assert_eq!(upvoted.upvotes, 4);
		assert_eq!(upvoted.title, post.title);
		assert_eq!(upvoted.created_at, post.created_at);

		let edited = store
			.update_post(
				post.id,
				PostPatch::Edit(NewPost {
					title: "Frieren S2".into(),
					content: Some("thoughts?".into()),
					image_url: None,
				}),
			)
			.await
			.unwrap()
			.unwrap();

		assert_eq!(edited.title, "Frieren S2");
		assert_eq!(edited.content.as_deref(), Some("thoughts?"));
		assert_eq!(edited.upvotes, 4);
		assert_eq!(edited.created_at, post.created_at);

		let missing = store
			.update_post(Uuid::new_v4(), PostPatch::Upvotes(1))
			.await
			.unwrap();

		assert_eq!(missing, None);
	}

	#[sqlx::test]
	async fn test_negative_upvotes_rejected(pool: Database) {
		let store = PgStore::new(pool);
		let post = seed(&store, "Frieren", 0, 10).await;

		let result = store.update_post(post.id, PostPatch::Upvotes(-1)).await;

		assert!(matches!(result, Err(Error::Database(..))));
		assert_eq!(store.get_post(post.id).await.unwrap().unwrap().upvotes, 0);
	}

	#[sqlx::test]
	async fn test_delete_post_cascades(pool: Database) {
		let store = PgStore::new(pool);
		let post = seed(&store, "Frieren", 0, 10).await;

		store
			.insert_comment(NewComment {
				post_id: post.id,
				content: "first!".into(),
			})
			.await
			.unwrap();

		assert!(store.delete_post(post.id).await.unwrap());
		assert!(!store.delete_post(post.id).await.unwrap());

		assert_eq!(store.get_post(post.id).await.unwrap(), None);
		assert!(store.list_comments(post.id).await.unwrap().is_empty());
	}

	#[sqlx::test]
	async fn test_comments_newest_first(pool: Database) {
		let store = PgStore::new(pool);
		let post = seed(&store, "Frieren", 0, 60).await;
		let other = seed(&store, "Dungeon Meshi", 0, 60).await;
		let now = Utc::now();

		seed_comment(&store, post.id, "older", now - Duration::minutes(30)).await;
		seed_comment(&store, post.id, "oldest", now - Duration::minutes(50)).await;
		seed_comment(&store, other.id, "elsewhere", now).await;

		let comment = store
			.insert_comment(NewComment {
				post_id: post.id,
				content: "newest".into(),
			})
			.await
			.unwrap();

		assert_eq!(comment.post_id, post.id);

		let comments = store.list_comments(post.id).await.unwrap();
		let contents = comments
			.iter()
			.map(|comment| comment.content.as_str())
			.collect::<Vec<_>>();

		assert_eq!(contents, ["newest", "older", "oldest"]);
	}

	#[sqlx::test]
	async fn test_comment_requires_post(pool: Database) {
		let store = PgStore::new(pool);

		let result = store
			.insert_comment(NewComment {
				post_id: Uuid::new_v4(),
				content: "anyone here?".into(),
			})
			.await;

		assert!(matches!(result, Err(Error::Database(..))));
	}
}
