// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level fire abstraction.
//!
//! A [`Fire`] wraps one cloud-connected fireplace: it authenticates,
//! fetches the parameter overview, caches the derived power state in an
//! immutable snapshot, and pushes rewritten parameters on command.
//!
//! # Lifecycle
//!
//! ```no_run
//! use optiflame_lib::Fire;
//!
//! # async fn example() -> optiflame_lib::Result<()> {
//! // Login + initial overview fetch
//! let fire = Fire::builder("0004A3B2C1D0", "1234")
//!     .with_name("Living Room Fire")
//!     .connect()
//!     .await?;
//!
//! // Cached read, no remote call
//! let on = fire.is_on();
//!
//! // Remote write, snapshot updated on acceptance
//! fire.turn_on().await?;
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::FireBuilder;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::codec::rewrite_for_power;
use crate::error::{Error, ProtocolError, Result};
use crate::identity::{AccessCode, DeviceIdentity, FireId};
use crate::protocol::wire::{
    self, VerifyGuestModeRequest, WriteParametersEnvelope, WriteParametersRequest,
};
use crate::protocol::{CloudClient, FetchOutcome, WriteOutcome};
use crate::state::FireSnapshot;

/// How the login response is interpreted.
///
/// The vendor app never checks the `VerifyGuestMode` response; lenient
/// mode reproduces that. Strict mode turns a vendor-signalled exception
/// into an authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    /// Any structured response counts as success (vendor app behavior).
    #[default]
    Lenient,
    /// A truthy `IsException` in the response fails the login.
    Strict,
}

/// Static descriptive identity of a fire.
///
/// Exposed to hosting frameworks that want manufacturer/model strings
/// alongside the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireInfo {
    /// Appliance manufacturer.
    pub manufacturer: String,
    /// Appliance model line.
    pub model: String,
    /// User-facing display name.
    pub name: String,
}

impl FireInfo {
    /// Default manufacturer string.
    pub const MANUFACTURER: &'static str = "Glen Dimplex";
    /// Default model string.
    pub const MODEL: &'static str = "Optiflame";

    fn with_name(name: String) -> Self {
        Self {
            manufacturer: Self::MANUFACTURER.to_string(),
            model: Self::MODEL.to_string(),
            name,
        }
    }
}

/// A cloud-connected Optiflame fireplace exposed as a boolean switch.
///
/// State is cached in an immutable [`FireSnapshot`] replaced atomically
/// after each successful fetch or accepted write; [`is_on`](Self::is_on)
/// never touches the network. Writes are serialized per fire so
/// concurrent callers cannot interleave half-rewritten parameter lists.
#[derive(Debug)]
pub struct Fire {
    fire_id: FireId,
    access_code: AccessCode,
    identity: DeviceIdentity,
    info: FireInfo,
    login_mode: LoginMode,
    client: CloudClient,
    snapshot: RwLock<Option<FireSnapshot>>,
    write_lock: Mutex<()>,
}

impl Fire {
    /// Starts building a fire from its GDID and access code.
    #[must_use]
    pub fn builder(gdid: impl Into<FireId>, pin: impl Into<AccessCode>) -> FireBuilder {
        FireBuilder::new(gdid.into(), pin.into())
    }

    pub(crate) fn new(
        fire_id: FireId,
        access_code: AccessCode,
        info: FireInfo,
        login_mode: LoginMode,
        client: CloudClient,
    ) -> Self {
        let identity = DeviceIdentity::derive(&fire_id);
        Self {
            fire_id,
            access_code,
            identity,
            info,
            login_mode,
            client,
            snapshot: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the raw fire identifier (GDID).
    #[must_use]
    pub fn fire_id(&self) -> &FireId {
        &self.fire_id
    }

    /// Returns the derived device identity.
    #[must_use]
    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    /// Returns the descriptive identity for hosting frameworks.
    #[must_use]
    pub fn info(&self) -> &FireInfo {
        &self.info
    }

    // ========== Authentication ==========

    /// Verifies guest-mode access with the vendor API.
    ///
    /// In [`LoginMode::Lenient`] (default) the response is logged and
    /// treated as success; in [`LoginMode::Strict`] a vendor-signalled
    /// exception fails with [`ProtocolError::AuthenticationFailed`].
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, or on a rejected login in
    /// strict mode.
    pub async fn login(&self) -> Result<()> {
        let request = VerifyGuestModeRequest {
            device_id: self.identity.as_uuid(),
            identifier: self.fire_id.as_str(),
            access_code: self.access_code.expose(),
            is_validation_enabled: true,
        };

        let response = self.client.verify_guest_mode(&request).await?;

        if self.login_mode == LoginMode::Strict && wire::is_exception(&response) {
            tracing::warn!(fire_id = %self.fire_id, "Guest mode verification rejected");
            return Err(Error::Protocol(ProtocolError::AuthenticationFailed));
        }
        Ok(())
    }

    // ========== State Fetch ==========

    /// Fetches the fire overview and refreshes the cached snapshot.
    ///
    /// On a well-formed overview the retained parameters (kinds 321 and
    /// 323) and the derived power flag replace the snapshot atomically.
    /// A malformed payload leaves the snapshot untouched, is logged at
    /// error level, and is reported through the returned outcome.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, unparseable parameter
    /// entries, or an overview missing the flame power parameter.
    pub async fn refresh(&self) -> Result<FetchOutcome> {
        let response = self
            .client
            .get_fire_overview(self.identity.as_uuid(), self.fire_id.as_str())
            .await?;

        let outcome = FetchOutcome::classify(response).map_err(Error::Parse)?;
        match &outcome {
            FetchOutcome::Overview(parameters) => {
                let snapshot = FireSnapshot::from_overview(parameters.clone())?;
                tracing::debug!(power = snapshot.power(), "Fire overview refreshed");
                *self.snapshot.write() = Some(snapshot);
            }
            FetchOutcome::Malformed(raw) => {
                tracing::error!(body = %raw, "Malformed fire overview response");
            }
        }
        Ok(outcome)
    }

    // ========== State Read ==========

    /// Returns the cached power state, defaulting to off when no
    /// successful fetch or write has happened yet.
    ///
    /// Never performs a remote call.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power().unwrap_or(false)
    }

    /// Returns the cached power state, or `None` before the first
    /// successful fetch or write.
    #[must_use]
    pub fn power(&self) -> Option<bool> {
        self.snapshot.read().as_ref().map(FireSnapshot::power)
    }

    /// Returns a clone of the current snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<FireSnapshot> {
        self.snapshot.read().clone()
    }

    // ========== State Write ==========

    /// Turns the fire on.
    ///
    /// # Errors
    ///
    /// Returns error if the write cannot be issued.
    pub async fn turn_on(&self) -> Result<WriteOutcome> {
        self.set_on(true).await
    }

    /// Turns the fire off.
    ///
    /// # Errors
    ///
    /// Returns error if the write cannot be issued.
    pub async fn turn_off(&self) -> Result<WriteOutcome> {
        self.set_on(false).await
    }

    /// Writes the desired power state to the fire.
    ///
    /// Rewrites the retained parameters (flag byte of kind 321 set to
    /// the desired state, kind 323 zeroed), sorts them ascending by
    /// kind, and submits them. On acceptance the snapshot is replaced
    /// with the requested state; on rejection it is left unchanged and
    /// the outcome carries the vendor's reason. Writes are serialized:
    /// a second caller waits for the in-flight request to finish.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoParameters`] if no overview has been fetched
    /// yet, a codec error if a retained blob is undecodable, or a
    /// protocol error on transport failure.
    pub async fn set_on(&self, on: bool) -> Result<WriteOutcome> {
        let _guard = self.write_lock.lock().await;

        let retained = self
            .snapshot
            .read()
            .as_ref()
            .map(|s| s.parameters().to_vec())
            .ok_or(Error::NoParameters)?;

        let parameters = rewrite_for_power(&retained, on)?;
        let request = WriteParametersRequest {
            request: WriteParametersEnvelope {
                fire_id: self.fire_id.as_str(),
                parameters: &parameters,
            },
            device_id: self.identity.as_uuid(),
        };

        let response = self.client.write_parameters(&request).await?;
        let outcome = WriteOutcome::classify(&response);
        match &outcome {
            WriteOutcome::Accepted => {
                tracing::debug!(power = on, "Parameter write accepted");
                *self.snapshot.write() = Some(FireSnapshot::with_power(on, parameters));
            }
            WriteOutcome::Rejected(reason) => {
                tracing::warn!(reason = %reason, "Parameter write rejected");
            }
        }
        Ok(outcome)
    }
}
