// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Slash-delimited command path parsing.
//!
//! Clients address datasets with paths of the form `/datasets/{category}` or
//! `/datasets/{category}/{name}`. The parser is purely syntactic: it validates
//! the shape of the path and keeps the segments as strings. Category
//! resolution and action/shape compatibility are enforced by the API service,
//! which also supplies the action out-of-band.

use std::fmt;
use thiserror::Error;

/// The fixed root token every command path must start with.
pub const ROOT_TOKEN: &str = "datasets";

/// A parsed command address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAddress {
	/// Addresses a whole category: `/datasets/{category}`.
	Category { category: String },
	/// Addresses a single resource: `/datasets/{category}/{name}`.
	Resource { category: String, name: String },
}

impl CommandAddress {
	/// The category segment of the address.
	pub fn category(&self) -> &str {
		match self {
			CommandAddress::Category { category } => category,
			CommandAddress::Resource { category, .. } => category,
		}
	}

	/// The resource segment, if the address carries one.
	pub fn resource(&self) -> Option<&str> {
		match self {
			CommandAddress::Category { .. } => None,
			CommandAddress::Resource { name, .. } => Some(name),
		}
	}
}

impl fmt::Display for CommandAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CommandAddress::Category { category } => write!(f, "/{ROOT_TOKEN}/{category}"),
			CommandAddress::Resource { category, name } => {
				write!(f, "/{ROOT_TOKEN}/{category}/{name}")
			}
		}
	}
}

/// Syntax error for a command path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed command: {reason}")]
pub struct MalformedCommand {
	pub reason: String,
}

impl MalformedCommand {
	fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
		}
	}
}

/// Parses a command path into a [`CommandAddress`].
///
/// Leading and trailing separators are stripped, the path is split on `/`,
/// and the first segment must equal [`ROOT_TOKEN`]. One remaining segment is
/// a category address, two is a resource address; anything else is malformed.
pub fn parse(command: &str) -> Result<CommandAddress, MalformedCommand> {
	let trimmed = command.trim_matches('/');
	if trimmed.is_empty() {
		return Err(MalformedCommand::new("empty command path"));
	}

	let mut segments = trimmed.split('/');
	let root = segments.next().unwrap_or_default();
	if root != ROOT_TOKEN {
		return Err(MalformedCommand::new(format!(
			"expected root segment {ROOT_TOKEN:?}, got {root:?}"
		)));
	}

	let rest: Vec<&str> = segments.collect();
	if rest.iter().any(|s| s.is_empty()) {
		return Err(MalformedCommand::new("empty path segment"));
	}

	match rest.as_slice() {
		[category] => Ok(CommandAddress::Category {
			category: (*category).to_string(),
		}),
		[category, name] => Ok(CommandAddress::Resource {
			category: (*category).to_string(),
			name: (*name).to_string(),
		}),
		[] => Err(MalformedCommand::new("missing category segment")),
		_ => Err(MalformedCommand::new(format!(
			"too many segments ({} after root, at most 2 allowed)",
			rest.len()
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_category_address() {
		let addr = parse("/datasets/health").unwrap();
		assert_eq!(
			addr,
			CommandAddress::Category {
				category: "health".to_string()
			}
		);
		assert_eq!(addr.category(), "health");
		assert_eq!(addr.resource(), None);
	}

	#[test]
	fn parses_resource_address() {
		let addr = parse("/datasets/health/Q1.xlsx").unwrap();
		assert_eq!(
			addr,
			CommandAddress::Resource {
				category: "health".to_string(),
				name: "Q1.xlsx".to_string()
			}
		);
		assert_eq!(addr.resource(), Some("Q1.xlsx"));
	}

	#[test]
	fn strips_leading_and_trailing_separators() {
		assert_eq!(
			parse("datasets/education/"),
			parse("/datasets/education")
		);
	}

	#[test]
	fn root_only_is_malformed() {
		assert!(parse("/datasets").is_err());
		assert!(parse("/datasets/").is_err());
	}

	#[test]
	fn wrong_root_is_malformed() {
		let err = parse("/files/health").unwrap_err();
		assert!(err.reason.contains("root segment"));
	}

	#[test]
	fn extra_segments_are_malformed() {
		assert!(parse("/datasets/health/Q1.xlsx/extra").is_err());
	}

	#[test]
	fn empty_segments_are_malformed() {
		assert!(parse("/datasets//Q1.xlsx").is_err());
		assert!(parse("").is_err());
		assert!(parse("///").is_err());
	}

	#[test]
	fn display_round_trips() {
		for cmd in ["/datasets/health", "/datasets/health/Q1.xlsx"] {
			let addr = parse(cmd).unwrap();
			assert_eq!(addr.to_string(), cmd);
		}
	}

	mod property_tests {
		use super::*;
		use proptest::prelude::*;

		proptest! {
			/// The parser never panics, whatever the input.
			#[test]
			fn parse_never_panics(input in ".*") {
				let _ = parse(&input);
			}

			/// Well-formed category and resource paths always parse, and the
			/// parsed segments match the input.
			#[test]
			fn well_formed_paths_round_trip(
				category in "[a-z_]{1,20}",
				name in "[A-Za-z0-9_.-]{1,20}",
			) {
				let addr = parse(&format!("/datasets/{category}")).unwrap();
				prop_assert_eq!(addr.category(), category.as_str());

				let addr = parse(&format!("/datasets/{category}/{name}")).unwrap();
				prop_assert_eq!(addr.category(), category.as_str());
				prop_assert_eq!(addr.resource(), Some(name.as_str()));
			}

			/// Paths with three or more segments after the root never parse.
			#[test]
			fn deep_paths_are_rejected(
				segs in proptest::collection::vec("[a-z0-9]{1,8}", 3..6),
			) {
				let path = format!("/datasets/{}", segs.join("/"));
				prop_assert!(parse(&path).is_err());
			}
		}
	}
}
