// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod gateway;
mod logging;

pub use gateway::{GatewayConfig, GatewayConfigLayer, DEFAULT_ATTRIBUTE_NAME_PATTERN};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
