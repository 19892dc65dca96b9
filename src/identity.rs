// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire identity types.
//!
//! A fireplace is addressed by two identifiers: the raw GDID printed on
//! the appliance (entered by the user during setup) and a synthetic
//! device identity derived from it. The vendor API expects both on every
//! request.

use std::fmt;

use uuid::Uuid;

/// The raw fireplace identifier (GDID) as printed on the appliance.
///
/// This is the `FireId` / `Identifier` field of the vendor API. It is
/// carried verbatim; the synthetic [`DeviceIdentity`] is derived from it.
///
/// # Examples
///
/// ```
/// use optiflame_lib::identity::FireId;
///
/// let id = FireId::new("0004A3B2C1D0");
/// assert_eq!(id.as_str(), "0004A3B2C1D0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FireId(String);

impl FireId {
    /// Creates a fire identifier from the raw GDID string.
    #[must_use]
    pub fn new(gdid: impl Into<String>) -> Self {
        Self(gdid.into())
    }

    /// Returns the raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FireId {
    fn from(gdid: &str) -> Self {
        Self::new(gdid)
    }
}

impl From<String> for FireId {
    fn from(gdid: String) -> Self {
        Self(gdid)
    }
}

/// The guest-mode access code (PIN) paired with a fire.
///
/// The code is carried opaquely and never logged: the `Debug`
/// representation is redacted so request payloads can be traced without
/// leaking it.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCode(String);

impl AccessCode {
    /// Creates an access code from the user-supplied PIN.
    #[must_use]
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }

    /// Returns the code for inclusion in a request payload.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessCode(REDACTED)")
    }
}

impl From<&str> for AccessCode {
    fn from(pin: &str) -> Self {
        Self::new(pin)
    }
}

impl From<String> for AccessCode {
    fn from(pin: String) -> Self {
        Self(pin)
    }
}

/// Synthetic device identity derived from a [`FireId`].
///
/// The vendor app identifies each installation with a name-based UUID
/// (version 5) of the GDID under the fixed OID namespace, so the same
/// fire always yields the same identity across restarts. Derivation is
/// pure and infallible.
///
/// # Examples
///
/// ```
/// use optiflame_lib::identity::{DeviceIdentity, FireId};
///
/// let fire_id = FireId::new("0004A3B2C1D0");
/// let a = DeviceIdentity::derive(&fire_id);
/// let b = DeviceIdentity::derive(&fire_id);
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceIdentity(Uuid);

impl DeviceIdentity {
    /// Derives the device identity for a fire.
    ///
    /// Uses UUID v5 (SHA-1, name-based) with the OID namespace, matching
    /// what the vendor app registers during setup.
    #[must_use]
    pub fn derive(fire_id: &FireId) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, fire_id.as_str().as_bytes()))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Show only first 8 characters for readability
        let short = &self.0.to_string()[..8];
        write!(f, "DeviceIdentity({short}...)")
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DeviceIdentity> for Uuid {
    fn from(identity: DeviceIdentity) -> Self {
        identity.0
    }
}
