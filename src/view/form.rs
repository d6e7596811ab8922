use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::Navigation;
use crate::{
	model::{NewPost, Post, PostPatch},
	store::Store,
};

/// The raw contents of the post form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct PostDraft {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub image_url: String,
}

fn non_blank(value: &str) -> Option<String> {
	let value = value.trim();

	(!value.is_empty()).then(|| value.to_owned())
}

impl PostDraft {
	/// Trims every field, turning blank optional fields into `None`.
	pub fn normalize(&self) -> NewPost {
		NewPost {
			title: self.title.trim().to_owned(),
			content: non_blank(&self.content),
			image_url: non_blank(&self.image_url),
		}
	}
}

impl From<Post> for PostDraft {
	fn from(post: Post) -> Self {
		Self {
			title: post.title,
			content: post.content.unwrap_or_default(),
			image_url: post.image_url.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
	Create,
	Edit(Uuid),
}

/// The first message to show for a rejected draft, title errors first.
fn validation_message(errors: &ValidationErrors) -> String {
	let fields = errors.field_errors();

	["title", "image_url"]
		.iter()
		.filter_map(|field| fields.get(*field))
		.chain(fields.values())
		.flat_map(|errors| errors.iter())
		.find_map(|error| error.message.as_ref())
		.map_or_else(|| "Invalid post".into(), ToString::to_string)
}

/// The create and edit post forms.
#[derive(Debug)]
pub struct FormViewModel {
	mode: FormMode,
	draft: PostDraft,
	error: Option<String>,
	loading: bool,
	saving: bool,
}

impl FormViewModel {
	pub fn create() -> Self {
		Self {
			mode: FormMode::Create,
			draft: PostDraft::default(),
			error: None,
			loading: false,
			saving: false,
		}
	}

	/// An edit form, empty until [`Self::load`] fills it.
	pub fn edit(id: Uuid) -> Self {
		Self {
			mode: FormMode::Edit(id),
			draft: PostDraft::default(),
			error: None,
			loading: true,
			saving: false,
		}
	}

	/// An edit form resuming a draft the client already holds.
	pub fn resume(id: Uuid, draft: PostDraft) -> Self {
		Self {
			mode: FormMode::Edit(id),
			draft,
			error: None,
			loading: false,
			saving: false,
		}
	}

	pub fn mode(&self) -> FormMode {
		self.mode
	}

	pub fn draft(&self) -> &PostDraft {
		&self.draft
	}

	pub fn set_draft(&mut self, draft: PostDraft) {
		self.draft = draft;
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn is_loading(&self) -> bool {
		self.loading
	}

	pub fn is_saving(&self) -> bool {
		self.saving
	}

	/// Where the cancel button leads.
	pub fn cancel(&self) -> Navigation {
		match self.mode {
			FormMode::Create => Navigation::Home,
			FormMode::Edit(id) => Navigation::Post(id),
		}
	}

	/// Fills an edit form from the stored post.
	///
	/// Returns [`Navigation::Home`] if the post is missing or the fetch
	/// failed. Create forms have nothing to load.
	pub async fn load(&mut self, store: &dyn Store) -> Option<Navigation> {
		let FormMode::Edit(id) = self.mode else {
			return None;
		};

		let navigation = match store.get_post(id).await {
			Ok(Some(post)) => {
				self.draft = post.into();
				None
			}
			Ok(None) => {
				tracing::info!(post = %id, "post to edit not found");
				Some(Navigation::Home)
			}
			Err(error) => {
				tracing::error!(%error, post = %id, "error fetching post");
				Some(Navigation::Home)
			}
		};

		self.loading = false;
		navigation
	}

	/// Validates and saves the draft.
	///
	/// Returns the saved post's page on success. Otherwise the error is set
	/// and the draft is left untouched for another attempt.
	pub async fn submit(&mut self, store: &dyn Store) -> Option<Navigation> {
		self.error = None;

		let post = self.draft.normalize();

		if let Err(errors) = post.validate() {
			self.error = Some(validation_message(&errors));
			return None;
		}

		self.saving = true;

		let saved = match self.mode {
			FormMode::Create => store.insert_post(post).await.map(Some),
			FormMode::Edit(id) => store.update_post(id, PostPatch::Edit(post)).await,
		};

		self.saving = false;

		match saved {
			Ok(Some(post)) => Some(Navigation::Post(post.id)),
			Ok(None) => {
				tracing::warn!(mode = ?self.mode, "edited post no longer exists");
				self.error = Some(self.failure_message().into());
				None
			}
			Err(error) => {
				tracing::error!(%error, mode = ?self.mode, "error saving post");
				self.error = Some(self.failure_message().into());
				None
			}
		}
	}

	fn failure_message(&self) -> &'static str {
		match self.mode {
			FormMode::Create => "Failed to create post. Please try again.",
			FormMode::Edit(..) => "Failed to update post. Please try again.",
		}
	}
}
