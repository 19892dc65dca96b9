// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire payloads for the FlameConnect API.
//!
//! The vendor speaks PascalCase JSON with an ad-hoc envelope per
//! endpoint. Requests are typed; responses are classified into explicit
//! outcome variants so malformed payloads cannot slip through as silent
//! no-ops.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::codec::Parameter;
use crate::error::ParseError;

/// Request body for the `VerifyGuestMode` endpoint.
#[derive(Debug, Serialize)]
pub struct VerifyGuestModeRequest<'a> {
    /// Derived device identity.
    #[serde(rename = "DeviceId")]
    pub device_id: Uuid,
    /// Raw fire identifier (GDID).
    #[serde(rename = "Identifier")]
    pub identifier: &'a str,
    /// Guest-mode access code (PIN).
    #[serde(rename = "AccessCode")]
    pub access_code: &'a str,
    /// Always `true`; mirrors the vendor app.
    #[serde(rename = "IsValidationEnabled")]
    pub is_validation_enabled: bool,
}

/// Request body for the `WriteWifiParameters` endpoint.
#[derive(Debug, Serialize)]
pub struct WriteParametersRequest<'a> {
    /// Inner envelope holding the target fire and the parameter list.
    #[serde(rename = "WriteWiFiParametersRequest")]
    pub request: WriteParametersEnvelope<'a>,
    /// Derived device identity.
    #[serde(rename = "DeviceId")]
    pub device_id: Uuid,
}

/// Inner envelope of a parameter write.
#[derive(Debug, Serialize)]
pub struct WriteParametersEnvelope<'a> {
    /// Raw fire identifier (GDID).
    #[serde(rename = "FireId")]
    pub fire_id: &'a str,
    /// Parameters to write, sorted ascending by kind.
    #[serde(rename = "Parameters")]
    pub parameters: &'a [Parameter],
}

/// Classified result of a `GetFireOverview` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response carried a `WifiFireOverview` with parameters.
    Overview(Vec<Parameter>),
    /// The response had no recognizable overview; raw payload retained
    /// for diagnostics.
    Malformed(Value),
}

impl FetchOutcome {
    /// Classifies a raw overview response.
    ///
    /// A payload without a `WifiFireOverview.Parameters` array is
    /// [`Malformed`](Self::Malformed). A payload that has the array but
    /// whose entries do not deserialize as parameters is a hard parse
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the parameter entries are
    /// malformed.
    pub fn classify(response: Value) -> Result<Self, ParseError> {
        let Some(parameters) = response
            .get("WifiFireOverview")
            .and_then(|overview| overview.get("Parameters"))
        else {
            return Ok(Self::Malformed(response));
        };

        let parameters: Vec<Parameter> = serde_json::from_value(parameters.clone())?;
        Ok(Self::Overview(parameters))
    }
}

/// Classified result of a `WriteWifiParameters` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The vendor accepted the write.
    Accepted,
    /// The vendor signalled an exception; the write did not take effect.
    Rejected(String),
}

impl WriteOutcome {
    /// Classifies a raw write response by its `IsException` field.
    ///
    /// The field is boolean-ish on the wire; absent or falsy values
    /// count as accepted, matching the vendor app's behavior.
    #[must_use]
    pub fn classify(response: &Value) -> Self {
        if is_exception(response) {
            let reason = response
                .get("ExceptionMessage")
                .and_then(Value::as_str)
                .map_or_else(|| response.to_string(), ToString::to_string);
            Self::Rejected(reason)
        } else {
            Self::Accepted
        }
    }

    /// Returns `true` for [`Accepted`](Self::Accepted).
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Returns `true` if the response carries a truthy `IsException` field.
pub(crate) fn is_exception(response: &Value) -> bool {
    response.get("IsException").is_some_and(truthy)
}

/// JavaScript-style truthiness for loosely typed vendor fields.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true") || s == "1",
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ParameterId;
    use serde_json::json;

    #[test]
    fn verify_guest_mode_serializes_vendor_fields() {
        let request = VerifyGuestModeRequest {
            device_id: Uuid::nil(),
            identifier: "0004A3B2C1D0",
            access_code: "1234",
            is_validation_enabled: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["DeviceId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["Identifier"], "0004A3B2C1D0");
        assert_eq!(json["AccessCode"], "1234");
        assert_eq!(json["IsValidationEnabled"], true);
    }

    #[test]
    fn write_request_nests_envelope() {
        let parameters = vec![Parameter::from_bytes(ParameterId::FLAME_POWER, &[0, 0, 0, 1])];
        let request = WriteParametersRequest {
            request: WriteParametersEnvelope {
                fire_id: "0004A3B2C1D0",
                parameters: &parameters,
            },
            device_id: Uuid::nil(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["WriteWiFiParametersRequest"]["FireId"], "0004A3B2C1D0");
        assert_eq!(
            json["WriteWiFiParametersRequest"]["Parameters"][0]["ParameterId"],
            321
        );
        assert!(json["DeviceId"].is_string());
    }

    #[test]
    fn fetch_outcome_overview() {
        let response = json!({
            "WifiFireOverview": {
                "Parameters": [
                    { "ParameterId": 321, "Value": "AAAAAQ==" }
                ]
            }
        });
        let outcome = FetchOutcome::classify(response).unwrap();
        let FetchOutcome::Overview(parameters) = outcome else {
            panic!("expected overview");
        };
        assert_eq!(parameters[0].id, ParameterId::FLAME_POWER);
    }

    #[test]
    fn fetch_outcome_malformed_without_overview() {
        let response = json!({ "Message": "An error has occurred." });
        let outcome = FetchOutcome::classify(response.clone()).unwrap();
        assert_eq!(outcome, FetchOutcome::Malformed(response));
    }

    #[test]
    fn fetch_outcome_bad_parameter_entries_is_parse_error() {
        let response = json!({
            "WifiFireOverview": { "Parameters": [{ "ParameterId": "nope" }] }
        });
        let err = FetchOutcome::classify(response).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn write_outcome_accepted_on_false_exception() {
        let outcome = WriteOutcome::classify(&json!({ "IsException": false }));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn write_outcome_accepted_on_missing_exception() {
        let outcome = WriteOutcome::classify(&json!({}));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn write_outcome_rejected_on_true_exception() {
        let outcome = WriteOutcome::classify(&json!({
            "IsException": true,
            "ExceptionMessage": "fire offline"
        }));
        assert_eq!(outcome, WriteOutcome::Rejected("fire offline".to_string()));
    }

    #[test]
    fn write_outcome_rejected_on_truthy_number() {
        let outcome = WriteOutcome::classify(&json!({ "IsException": 1 }));
        assert!(matches!(outcome, WriteOutcome::Rejected(_)));
    }

    #[test]
    fn truthiness() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("true")));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("no")));
        assert!(!truthy(&Value::Null));
    }
}
