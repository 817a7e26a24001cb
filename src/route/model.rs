use schemars::JsonSchema;
use serde::Deserialize;
use validator::Validate;

/// These can be removed when [`serde`] supports
/// literal defaults: <https://github.com/serde-rs/serde/issues/368>
#[inline]
fn ten() -> i64 {
	10
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct Paginate {
	/// The page number to return (0-indexed).
	#[validate(range(min = 0, max = 10_000))]
	#[serde(default)]
	pub page: i64,
	/// The number of items to return per page.
	#[validate(range(min = 1, max = 100))]
	#[serde(default = "ten")]
	pub size: i64,
}

impl Default for Paginate {
	fn default() -> Self {
		Self { page: 0, size: ten() }
	}
}

impl Paginate {
	pub fn offset(&self) -> i64 {
		self.page * self.size
	}

	pub fn limit(&self) -> i64 {
		self.size
	}
}

/// The sequential number of a post, taken from the path.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct IdInput {
	pub id: i64,
}

#[cfg(test)]
mod test {
	use validator::Validate;

	#[test]
	fn test_paginate_offset() {
		let mut paginate = super::Paginate { page: 0, size: 10 };

		assert_eq!(paginate.offset(), 0);

		paginate.page = 1;

		assert_eq!(paginate.offset(), 10);

		paginate.size = 5;

		assert_eq!(paginate.offset(), 5);

		paginate.page = 3;

		assert_eq!(paginate.offset(), 15);
	}

	#[test]
	fn test_paginate_limit() {
		let paginate = super::Paginate::default();

		assert_eq!(paginate.limit(), 10);
	}

	#[test]
	fn test_paginate_bounds() {
		assert!(super::Paginate { page: -1, size: 10 }.validate().is_err());
		assert!(super::Paginate { page: 0, size: 0 }.validate().is_err());
		assert!(super::Paginate { page: 0, size: 101 }.validate().is_err());
		assert!(super::Paginate { page: 2, size: 100 }.validate().is_ok());
	}
}
