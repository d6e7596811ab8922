use crate::{
	model::{Post, SortKey},
	store::{self, Store},
};

/// Keeps the posts whose title contains `query`, ignoring case.
///
/// An empty query keeps every post.
pub fn filter<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
	let query = query.to_lowercase();

	posts
		.iter()
		.filter(|post| post.title.to_lowercase().contains(&query))
		.collect()
}

/// Identifies one issued list fetch.
///
/// Only the result of the most recently issued ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
	sequence: u64,
	sort: SortKey,
}

/// The home page: every post in the chosen order, filtered by title.
#[derive(Debug)]
pub struct ListViewModel {
	posts: Vec<Post>,
	sort: SortKey,
	query: String,
	loading: bool,
	issued: u64,
}

impl Default for ListViewModel {
	fn default() -> Self {
		Self::new()
	}
}

impl ListViewModel {
	pub fn new() -> Self {
		Self {
			posts: Vec::new(),
			sort: SortKey::default(),
			query: String::new(),
			loading: true,
			issued: 0,
		}
	}

	pub fn sort(&self) -> SortKey {
		self.sort
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// The last loaded snapshot, unfiltered.
	#[cfg(test)]
	pub fn posts(&self) -> &[Post] {
		&self.posts
	}

	/// The posts to display, recomputed from the snapshot on every call.
	pub fn visible(&self) -> Vec<&Post> {
		filter(&self.posts, &self.query)
	}

	/// Whether to show the "create one" prompt instead of a list.
	pub fn is_empty_state(&self) -> bool {
		!self.loading && self.visible().is_empty()
	}

	/// Updates the search text. Never fetches.
	pub fn set_query(&mut self, query: impl Into<String>) {
		self.query = query.into();
	}

	/// Starts a fetch for `sort`, superseding any fetch still in flight.
	pub fn begin_load(&mut self, sort: SortKey) -> LoadTicket {
		self.issued += 1;
		self.sort = sort;
		self.loading = true;

		LoadTicket {
			sequence: self.issued,
			sort,
		}
	}

	/// Applies the result of a fetch, unless a newer one has been issued since.
	///
	/// Returns whether the result was applied. A failed fetch is logged and
	/// leaves the list empty.
	pub fn finish_load(
		&mut self,
		ticket: LoadTicket,
		result: Result<Vec<Post>, store::Error>,
	) -> bool {
		if ticket.sequence != self.issued {
			tracing::debug!(
				sequence = ticket.sequence,
				latest = self.issued,
				"discarding stale post list"
			);

			return false;
		}

		self.posts = match result {
			Ok(posts) => posts,
			Err(error) => {
				tracing::error!(%error, sort = ?ticket.sort, "error fetching posts");
				Vec::new()
			}
		};
		self.loading = false;

		true
	}

	/// Fetches every post in `sort` order, replacing the local list.
	pub async fn load(&mut self, store: &dyn Store, sort: SortKey) {
		let ticket = self.begin_load(sort);
		let result = store.list_posts(sort).await;

		self.finish_load(ticket, result);
	}

	/// Changes the sort order, re-fetching only when it actually changed.
	pub async fn set_sort(&mut self, store: &dyn Store, sort: SortKey) {
		if sort == self.sort && self.issued > 0 {
			return;
		}

		self.load(store, sort).await;
	}
}
