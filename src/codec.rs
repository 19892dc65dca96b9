// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter codec for FlameConnect fires.
//!
//! Every device setting travels as a *parameter*: a numeric kind plus a
//! base64-encoded byte blob. The on/off state of the flame lives in a
//! single byte of the kind-321 blob. This module provides the wire type
//! ([`Parameter`]), the kind newtype ([`ParameterId`]) and the decoded
//! blob codec ([`ParameterBlob`]), independent of any HTTP concern.

use std::fmt;

use data_encoding::BASE64;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Byte offset of the on/off flag inside a parameter blob.
pub const FLAG_OFFSET: usize = 3;

/// Numeric kind of a fire parameter.
///
/// Only two kinds carry meaning for this library; everything else is
/// passed through untouched.
///
/// # Examples
///
/// ```
/// use optiflame_lib::codec::ParameterId;
///
/// assert_eq!(ParameterId::FLAME_POWER.value(), 321);
/// assert!(ParameterId::FLAME_POWER < ParameterId::SECONDARY_FLAG);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ParameterId(u32);

impl ParameterId {
    /// Primary flame/power flag parameter.
    pub const FLAME_POWER: Self = Self(321);
    /// Secondary flag parameter, zeroed on every write.
    pub const SECONDARY_FLAG: Self = Self(323);

    /// Creates a parameter kind from its raw numeric value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns `true` if this kind is one the library retains from an
    /// overview fetch.
    #[must_use]
    pub const fn is_retained(&self) -> bool {
        matches!(*self, Self::FLAME_POWER | Self::SECONDARY_FLAG)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParameterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A fire parameter as it appears on the wire.
///
/// The value is an opaque base64 string; use [`ParameterBlob`] to
/// inspect or mutate its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Numeric kind of the parameter.
    #[serde(rename = "ParameterId")]
    pub id: ParameterId,
    /// Base64-encoded byte blob.
    #[serde(rename = "Value")]
    pub value: String,
}

impl Parameter {
    /// Creates a parameter from a kind and an already-encoded value.
    #[must_use]
    pub fn new(id: ParameterId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    /// Creates a parameter by encoding raw bytes.
    #[must_use]
    pub fn from_bytes(id: ParameterId, bytes: &[u8]) -> Self {
        Self {
            id,
            value: BASE64.encode(bytes),
        }
    }

    /// Decodes this parameter's value into a [`ParameterBlob`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidBase64`] if the value is not valid
    /// base64.
    pub fn decode(&self) -> Result<ParameterBlob, CodecError> {
        ParameterBlob::decode(&self.value)
    }
}

/// Decoded byte blob of a parameter value.
///
/// Wraps the raw bytes with flag accessors so the on/off bit can be
/// read and rewritten without touching base64 at the call site.
///
/// # Examples
///
/// ```
/// use optiflame_lib::codec::{ParameterBlob, FLAG_OFFSET};
///
/// let mut blob = ParameterBlob::from_bytes(vec![0, 0, 0, 0]);
/// blob.set_flag(FLAG_OFFSET, true).unwrap();
/// assert_eq!(blob.flag(FLAG_OFFSET), Some(true));
///
/// let reparsed = ParameterBlob::decode(&blob.encode()).unwrap();
/// assert_eq!(reparsed.flag(FLAG_OFFSET), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBlob(Vec<u8>);

impl ParameterBlob {
    /// Decodes a base64 value into a blob.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidBase64`] if the input is not valid
    /// base64.
    pub fn decode(value: &str) -> Result<Self, CodecError> {
        BASE64
            .decode(value.as_bytes())
            .map(Self)
            .map_err(|_| CodecError::InvalidBase64(value.to_string()))
    }

    /// Wraps raw bytes without decoding.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Re-encodes the blob as base64.
    #[must_use]
    pub fn encode(&self) -> String {
        BASE64.encode(&self.0)
    }

    /// Returns the decoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Reads the flag byte at `offset`.
    ///
    /// Returns `None` if the blob is too short, `Some(true)` for any
    /// non-zero byte.
    #[must_use]
    pub fn flag(&self, offset: usize) -> Option<bool> {
        self.0.get(offset).map(|&b| b != 0)
    }

    /// Writes the flag byte at `offset` (0x01 for `true`, 0x00 for
    /// `false`).
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::OffsetOutOfRange`] if the blob has no byte
    /// at `offset`.
    pub fn set_flag(&mut self, offset: usize, on: bool) -> Result<(), CodecError> {
        let len = self.0.len();
        let byte = self
            .0
            .get_mut(offset)
            .ok_or(CodecError::OffsetOutOfRange { len, offset })?;
        *byte = u8::from(on);
        Ok(())
    }
}

/// Rewrites retained parameters for a write request.
///
/// Kind 321 gets its flag byte set to the desired power state, kind 323
/// gets its flag byte forced to zero, anything else passes through
/// unchanged. The result is sorted ascending by kind so the wire order
/// is deterministic.
///
/// # Errors
///
/// Returns a [`CodecError`] if a retained 321/323 value is not valid
/// base64 or is too short to hold the flag byte.
pub fn rewrite_for_power(
    parameters: &[Parameter],
    on: bool,
) -> Result<Vec<Parameter>, CodecError> {
    let mut rewritten = parameters
        .iter()
        .map(|p| match p.id {
            ParameterId::FLAME_POWER => rewrite_flag(p, on),
            ParameterId::SECONDARY_FLAG => rewrite_flag(p, false),
            _ => Ok(p.clone()),
        })
        .collect::<Result<Vec<_>, _>>()?;
    rewritten.sort_by_key(|p| p.id);
    Ok(rewritten)
}

fn rewrite_flag(parameter: &Parameter, on: bool) -> Result<Parameter, CodecError> {
    let mut blob = parameter.decode()?;
    blob.set_flag(FLAG_OFFSET, on)?;
    Ok(Parameter::new(parameter.id, blob.encode()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    #[test]
    fn set_flag_round_trip() {
        let mut blob = ParameterBlob::decode(&b64(&[0x10, 0x20, 0x30, 0x00, 0x40])).unwrap();
        blob.set_flag(FLAG_OFFSET, true).unwrap();

        let reparsed = ParameterBlob::decode(&blob.encode()).unwrap();
        assert_eq!(reparsed.flag(FLAG_OFFSET), Some(true));
        // Surrounding bytes untouched
        assert_eq!(reparsed.as_bytes(), &[0x10, 0x20, 0x30, 0x01, 0x40]);
    }

    #[test]
    fn flag_reads_nonzero_as_true() {
        let blob = ParameterBlob::from_bytes(vec![0, 0, 0, 0x7f]);
        assert_eq!(blob.flag(FLAG_OFFSET), Some(true));
    }

    #[test]
    fn flag_reads_zero_as_false() {
        let blob = ParameterBlob::from_bytes(vec![0, 0, 0, 0]);
        assert_eq!(blob.flag(FLAG_OFFSET), Some(false));
    }

    #[test]
    fn flag_on_short_blob_is_none() {
        let blob = ParameterBlob::from_bytes(vec![0, 0]);
        assert_eq!(blob.flag(FLAG_OFFSET), None);
    }

    #[test]
    fn set_flag_on_short_blob_fails() {
        let mut blob = ParameterBlob::from_bytes(vec![0, 0]);
        let err = blob.set_flag(FLAG_OFFSET, true).unwrap_err();
        assert_eq!(err, CodecError::OffsetOutOfRange { len: 2, offset: 3 });
    }

    #[test]
    fn decode_invalid_base64_fails() {
        let err = ParameterBlob::decode("not base64!").unwrap_err();
        assert!(matches!(err, CodecError::InvalidBase64(_)));
    }

    #[test]
    fn parameter_id_ordering() {
        assert!(ParameterId::FLAME_POWER < ParameterId::SECONDARY_FLAG);
        assert!(ParameterId::new(100) < ParameterId::FLAME_POWER);
    }

    #[test]
    fn parameter_id_retention() {
        assert!(ParameterId::FLAME_POWER.is_retained());
        assert!(ParameterId::SECONDARY_FLAG.is_retained());
        assert!(!ParameterId::new(100).is_retained());
    }

    #[test]
    fn parameter_serde_uses_vendor_field_names() {
        let parameter = Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 1]);
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json["ParameterId"], 321);
        assert_eq!(json["Value"], b64(&[0, 0, 0, 1]));
    }

    #[test]
    fn rewrite_sorts_ascending_and_zeroes_secondary() {
        // Retained out of order, both flags set
        let retained = vec![
            Parameter::from_bytes(ParameterId::SECONDARY_FLAG, &[0, 0, 0, 1]),
            Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 0]),
        ];

        let rewritten = rewrite_for_power(&retained, true).unwrap();

        assert_eq!(rewritten[0].id, ParameterId::FLAME_POWER);
        assert_eq!(rewritten[1].id, ParameterId::SECONDARY_FLAG);

        let power = rewritten[0].decode().unwrap();
        assert_eq!(power.flag(FLAG_OFFSET), Some(true));

        let secondary = rewritten[1].decode().unwrap();
        assert_eq!(secondary.flag(FLAG_OFFSET), Some(false));
    }

    #[test]
    fn rewrite_passes_unknown_kinds_through() {
        let retained = vec![
            Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 0]),
            Parameter::new(ParameterId::new(400), "opaque-not-even-base64"),
        ];

        let rewritten = rewrite_for_power(&retained, true).unwrap();
        assert_eq!(rewritten[1].value, "opaque-not-even-base64");
    }

    #[test]
    fn rewrite_off_clears_power_flag() {
        let retained = vec![Parameter::from_bytes(
            ParameterId::FLAME_POWER,
            &[0xaa, 0xbb, 0xcc, 0x01],
        )];

        let rewritten = rewrite_for_power(&retained, false).unwrap();
        let blob = rewritten[0].decode().unwrap();
        assert_eq!(blob.as_bytes(), &[0xaa, 0xbb, 0xcc, 0x00]);
    }

    #[test]
    fn rewrite_surfaces_codec_errors() {
        let retained = vec![Parameter::new(ParameterId::FLAME_POWER, "@@@")];
        let err = rewrite_for_power(&retained, true).unwrap_err();
        assert!(matches!(err, CodecError::InvalidBase64(_)));
    }
}
