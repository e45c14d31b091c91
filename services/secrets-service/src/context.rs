// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! API context for the secrets service

use std::sync::Arc;

use crate::controller::Controller;

/// API context shared across all request handlers
pub struct ApiContext {
    controller: Arc<dyn Controller>,
}

impl ApiContext {
    pub fn new(controller: Arc<dyn Controller>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &dyn Controller {
        self.controller.as_ref()
    }
}
