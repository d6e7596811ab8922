use serde::{Deserialize, Serialize};

/// The key the theme is persisted under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

impl Theme {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().trim_matches('"') {
			"light" => Some(Self::Light),
			"dark" => Some(Self::Dark),
			_ => None,
		}
	}

	#[must_use]
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}
}

/// Persistent key-value storage for user preferences.
pub trait PreferenceStore {
	fn get(&self, key: &str) -> Option<String>;
	fn set(&mut self, key: &str, value: &str);
}

/// The active theme, passed explicitly to whatever needs to read or change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeContext {
	theme: Theme,
}

impl ThemeContext {
	/// Reads the persisted theme, falling back to the system preference and
	/// then to [`Theme::Light`].
	pub fn load(storage: &impl PreferenceStore, system: Option<Theme>) -> Self {
		let theme = storage
			.get(THEME_KEY)
			.as_deref()
			.and_then(Theme::parse)
			.or(system)
			.unwrap_or_default();

		Self { theme }
	}

	pub fn theme(&self) -> Theme {
		self.theme
	}

	/// Switches between light and dark, persisting the new theme.
	pub fn toggle(&mut self, storage: &mut impl PreferenceStore) -> Theme {
		self.theme = self.theme.toggled();
		storage.set(THEME_KEY, self.theme.as_str());

		tracing::debug!(theme = self.theme.as_str(), "theme toggled");

		self.theme
	}
}
