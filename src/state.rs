// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire state tracking.

use crate::codec::{FLAG_OFFSET, Parameter, ParameterId};
use crate::error::{CodecError, Error, ParseError};

/// Immutable snapshot of a fire's last known state.
///
/// A snapshot is produced from a successful overview fetch or an
/// accepted write and replaced atomically; readers never observe a
/// partially updated state. State is only authoritative once a snapshot
/// exists.
///
/// # Examples
///
/// ```
/// use optiflame_lib::codec::{Parameter, ParameterId};
/// use optiflame_lib::state::FireSnapshot;
///
/// let parameters = vec![
///     Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 1]),
///     Parameter::from_bytes(ParameterId::SECONDARY_FLAG, &[0, 0, 0, 0]),
/// ];
/// let snapshot = FireSnapshot::from_overview(parameters).unwrap();
/// assert!(snapshot.power());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireSnapshot {
    power: bool,
    parameters: Vec<Parameter>,
}

impl FireSnapshot {
    /// Builds a snapshot from the parameters of an overview response.
    ///
    /// Filters the list down to the retained kinds (321 and 323), then
    /// derives the power flag from the kind-321 blob.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if no kind-321 parameter is
    /// present, or a [`CodecError`] if its value cannot be decoded or is
    /// too short to hold the flag byte.
    pub fn from_overview(parameters: Vec<Parameter>) -> Result<Self, Error> {
        let parameters: Vec<Parameter> = parameters
            .into_iter()
            .filter(|p| p.id.is_retained())
            .collect();

        let power_parameter = parameters
            .iter()
            .find(|p| p.id == ParameterId::FLAME_POWER)
            .ok_or_else(|| {
                ParseError::MissingField(format!("parameter {}", ParameterId::FLAME_POWER))
            })?;

        let blob = power_parameter.decode()?;
        let power = blob
            .flag(FLAG_OFFSET)
            .ok_or(CodecError::OffsetOutOfRange {
                len: blob.as_bytes().len(),
                offset: FLAG_OFFSET,
            })?;

        Ok(Self { power, parameters })
    }

    /// Builds a snapshot directly from a known power state and an
    /// already-rewritten parameter list (after an accepted write).
    #[must_use]
    pub fn with_power(power: bool, parameters: Vec<Parameter>) -> Self {
        Self { power, parameters }
    }

    /// Returns the cached power state.
    #[must_use]
    pub fn power(&self) -> bool {
        self.power
    }

    /// Returns the retained parameters (kinds 321 and 323 only).
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_true_from_nonzero_flag() {
        let parameters = vec![
            Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 1]),
            Parameter::from_bytes(ParameterId::SECONDARY_FLAG, &[0, 0, 0, 0]),
        ];
        let snapshot = FireSnapshot::from_overview(parameters).unwrap();
        assert!(snapshot.power());
        assert_eq!(snapshot.parameters().len(), 2);
    }

    #[test]
    fn power_false_from_zero_flag() {
        let parameters = vec![Parameter::from_bytes(
            ParameterId::FLAME_POWER,
            &[0, 0, 0, 0],
        )];
        let snapshot = FireSnapshot::from_overview(parameters).unwrap();
        assert!(!snapshot.power());
    }

    #[test]
    fn unrelated_kinds_are_filtered_out() {
        let parameters = vec![
            Parameter::from_bytes(ParameterId::new(100), &[1, 2, 3, 4]),
            Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 1]),
            Parameter::from_bytes(ParameterId::new(500), &[5, 6, 7, 8]),
            Parameter::from_bytes(ParameterId::SECONDARY_FLAG, &[0, 0, 0, 0]),
        ];
        let snapshot = FireSnapshot::from_overview(parameters).unwrap();
        let kinds: Vec<_> = snapshot.parameters().iter().map(|p| p.id).collect();
        assert_eq!(
            kinds,
            vec![ParameterId::FLAME_POWER, ParameterId::SECONDARY_FLAG]
        );
    }

    #[test]
    fn missing_power_parameter_fails() {
        let parameters = vec![Parameter::from_bytes(
            ParameterId::SECONDARY_FLAG,
            &[0, 0, 0, 0],
        )];
        let err = FireSnapshot::from_overview(parameters).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
    }

    #[test]
    fn short_power_blob_fails() {
        let parameters = vec![Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0])];
        let err = FireSnapshot::from_overview(parameters).unwrap_err();
        assert!(matches!(
            err,
            Error::Codec(CodecError::OffsetOutOfRange { len: 2, offset: 3 })
        ));
    }

    #[test]
    fn with_power_keeps_parameters() {
        let parameters = vec![Parameter::from_bytes(
            ParameterId::FLAME_POWER,
            &[0, 0, 0, 1],
        )];
        let snapshot = FireSnapshot::with_power(true, parameters.clone());
        assert!(snapshot.power());
        assert_eq!(snapshot.parameters(), &parameters[..]);
    }
}
