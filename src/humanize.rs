//! Relative timestamps, as shown next to posts and comments.

use chrono::{DateTime, Datelike, Utc};

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Describes the distance between `time` and `now` in words, such as
/// `"5 minutes ago"` or `"in about 2 hours"`.
pub fn relative(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
	if time <= now {
		format!("{} ago", distance(time, now))
	} else {
		format!("in {}", distance(now, time))
	}
}

fn plural(count: i64, unit: &str) -> String {
	if count == 1 {
		format!("1 {unit}")
	} else {
		format!("{count} {unit}s")
	}
}

fn distance(earlier: DateTime<Utc>, later: DateTime<Utc>) -> String {
	let seconds = (later - earlier).num_seconds();
	// Rounded to the nearest minute, halves up.
	let minutes = seconds.saturating_add(30) / 60;

	match minutes {
		0 => "less than a minute".into(),
		1..=44 => plural(minutes, "minute"),
		45..=89 => "about 1 hour".into(),
		90..=1439 => format!(
			"about {}",
			plural(round_div(minutes, MINUTES_IN_HOUR), "hour")
		),
		1440..=2519 => "1 day".into(),
		2520..=43_199 => plural(round_div(minutes, MINUTES_IN_DAY), "day"),
		_ if minutes < MINUTES_IN_TWO_MONTHS => format!(
			"about {}",
			plural(round_div(minutes, MINUTES_IN_MONTH), "month")
		),
		_ => {
			let months = calendar_months(earlier, later);

			if months < 12 {
				return plural(round_div(minutes, MINUTES_IN_MONTH), "month");
			}

			let years = months / 12;

			match months % 12 {
				0..=2 => format!("about {}", plural(years, "year")),
				3..=8 => format!("over {}", plural(years, "year")),
				_ => format!("almost {}", plural(years + 1, "year")),
			}
		}
	}
}

/// Whole calendar months from `earlier` to `later`.
///
/// The last month only counts once `later` reaches the same day and time
/// of month as `earlier`.
fn calendar_months(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
	let months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
		- i64::from(earlier.month());

	if (later.day(), later.time()) < (earlier.day(), earlier.time()) {
		months - 1
	} else {
		months
	}
}

fn round_div(value: i64, by: i64) -> i64 {
	(value + by / 2) / by
}
