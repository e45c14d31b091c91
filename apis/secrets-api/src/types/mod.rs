// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Secrets API type definitions

pub mod app;
pub mod common;
pub mod error;
pub mod secret;

pub use app::*;
pub use common::*;
pub use error::*;
pub use secret::*;
