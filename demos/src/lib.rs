// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by the Understory block observer demos.

pub mod layout;
pub mod mock_api;
