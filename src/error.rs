// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Optiflame library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: parameter codec failures, cloud API communication, and
//! JSON response parsing.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when
/// interacting with a FlameConnect-connected fireplace.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during cloud API communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while decoding or encoding a parameter blob.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The fire has no retained parameters to write.
    ///
    /// Returned when a write is attempted before any successful overview
    /// fetch has populated the parameter set.
    #[error("no parameters retained; fetch the fire overview first")]
    NoParameters,
}

/// Errors related to cloud API communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the cloud API failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Guest-mode verification was rejected by the vendor API.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing FlameConnect responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to the parameter blob codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The parameter value is not valid base64.
    #[error("invalid base64 in parameter value: {0}")]
    InvalidBase64(String),

    /// The decoded blob is too short to hold the requested flag byte.
    #[error("blob of {len} bytes has no byte at offset {offset}")]
    OffsetOutOfRange {
        /// Length of the decoded blob.
        len: usize,
        /// The byte offset that was requested.
        offset: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
