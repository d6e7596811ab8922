//! View models: the in-memory state and operations behind each page.
//!
//! A view model holds a transient copy of what it fetched for the duration
//! of one page visit. Local state only changes after the store confirms a
//! write, and failures are reported through `tracing` rather than returned.

pub mod detail;
pub mod form;
pub mod home;

use uuid::Uuid;

/// A page a view model asks to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
	Home,
	Post(Uuid),
	Create,
	Edit(Uuid),
}

impl Navigation {
	pub fn path(&self) -> String {
		match self {
			Self::Home => "/".into(),
			Self::Post(id) => format!("/posts/{id}"),
			Self::Create => "/create".into(),
			Self::Edit(id) => format!("/edit/{id}"),
		}
	}
}
