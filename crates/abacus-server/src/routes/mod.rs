// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod datasets;
pub mod health;
pub mod users;
