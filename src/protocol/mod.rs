// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport and wire formats for the FlameConnect cloud API.
//!
//! The vendor exposes three HTTP endpoints under a fixed base path:
//!
//! - `VerifyGuestMode` (POST): guest-mode authentication
//! - `GetFireOverview` (GET): current device parameters
//! - `WriteWifiParameters` (POST): parameter write-back
//!
//! [`CloudClient`] performs the raw calls; the [`wire`] module holds
//! the typed request payloads and classifies responses into explicit
//! outcomes.

#[cfg(feature = "http")]
mod http;
pub mod wire;

#[cfg(feature = "http")]
pub use http::{CloudClient, CloudConfig};
pub use wire::{FetchOutcome, WriteOutcome};
