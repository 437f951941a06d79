// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Build information for abacus-server.

/// Format version info for display.
pub fn format_version_info() -> String {
	format!(
		"abacus-server version: {}\n\
         Platform:              {}-{}",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::ARCH,
		std::env::consts::OS,
	)
}
