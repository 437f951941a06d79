// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Organization access configuration: which categories each organization
//! may address.

use std::collections::BTreeMap;

use abacus_server_auth::OrgScope;
use serde::Deserialize;

use crate::error::ConfigError;

/// Access configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AccessConfig {
	pub organizations: BTreeMap<String, OrgScope>,
}

impl Default for AccessConfig {
	fn default() -> Self {
		let mut organizations = BTreeMap::new();
		organizations.insert(
			"aurak".to_string(),
			OrgScope::Categories(["education".to_string()].into()),
		);
		organizations.insert("rak statistics".to_string(), OrgScope::All);
		organizations.insert(
			"courts department".to_string(),
			OrgScope::Categories(
				[
					"justice_and_security".to_string(),
					"marriage_and_divorce".to_string(),
				]
				.into(),
			),
		);
		organizations.insert(
			"rak municipality".to_string(),
			OrgScope::Categories(
				[
					"health".to_string(),
					"mosques_and_endowments".to_string(),
				]
				.into(),
			),
		);
		Self { organizations }
	}
}

/// Declarative organization scope: the keyword `"all"` or an explicit
/// category list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrgScopeSpec {
	Keyword(String),
	Categories(Vec<String>),
}

impl OrgScopeSpec {
	fn resolve(self, organization: &str) -> Result<OrgScope, ConfigError> {
		match self {
			OrgScopeSpec::Keyword(keyword) if keyword == "all" => Ok(OrgScope::All),
			OrgScopeSpec::Keyword(keyword) => Err(ConfigError::InvalidValue {
				key: format!("access.organizations.{organization}"),
				message: format!("expected \"all\" or a category list, got '{keyword}'"),
			}),
			OrgScopeSpec::Categories(categories) => {
				for category in &categories {
					if !abacus_common_catalog::is_valid(category) {
						return Err(ConfigError::UnknownCategory {
							organization: organization.to_string(),
							category: category.clone(),
						});
					}
				}
				Ok(OrgScope::Categories(categories.into_iter().collect()))
			}
		}
	}
}

/// Access configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfigLayer {
	#[serde(default)]
	pub organizations: Option<BTreeMap<String, OrgScopeSpec>>,
}

impl AccessConfigLayer {
	pub fn merge(&mut self, other: AccessConfigLayer) {
		// An organization table replaces the previous one wholesale; partial
		// merges of access rules would be hard to audit.
		if other.organizations.is_some() {
			self.organizations = other.organizations;
		}
	}

	pub fn finalize(self) -> Result<AccessConfig, ConfigError> {
		let Some(specs) = self.organizations else {
			return Ok(AccessConfig::default());
		};
		let mut organizations = BTreeMap::new();
		for (name, spec) in specs {
			let scope = spec.resolve(&name)?;
			organizations.insert(name, scope);
		}
		Ok(AccessConfig { organizations })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_cover_known_organizations() {
		let config = AccessConfigLayer::default().finalize().unwrap();
		assert_eq!(config.organizations.len(), 4);
		assert_eq!(
			config.organizations.get("rak statistics"),
			Some(&OrgScope::All)
		);
		assert_eq!(
			config.organizations.get("aurak"),
			Some(&OrgScope::Categories(["education".to_string()].into()))
		);
	}

	#[test]
	fn test_all_keyword_resolves() {
		let layer: AccessConfigLayer = toml::from_str(
			r#"
			[organizations]
			"acme" = "all"
			"#,
		)
		.unwrap();
		let config = layer.finalize().unwrap();
		assert_eq!(config.organizations.get("acme"), Some(&OrgScope::All));
	}

	#[test]
	fn test_unknown_category_is_rejected() {
		let layer: AccessConfigLayer = toml::from_str(
			r#"
			[organizations]
			"acme" = ["health", "astrology"]
			"#,
		)
		.unwrap();
		let err = layer.finalize().unwrap_err();
		assert!(matches!(err, ConfigError::UnknownCategory { .. }));
	}

	#[test]
	fn test_bad_keyword_is_rejected() {
		let layer: AccessConfigLayer = toml::from_str(
			r#"
			[organizations]
			"acme" = "everything"
			"#,
		)
		.unwrap();
		let err = layer.finalize().unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { .. }));
	}
}
