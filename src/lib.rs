// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Optiflame Lib - A Rust library to control Optiflame electric
//! fireplaces through the FlameConnect cloud API.
//!
//! The fire is exposed as a boolean switch: authenticate in guest mode,
//! fetch the device parameter overview, derive on/off from a single
//! flag byte, and push rewritten parameters to change it.
//!
//! # How it works
//!
//! Each fire carries its settings as *parameters*: numeric kinds paired
//! with base64-encoded byte blobs. Two kinds matter here: kind 321
//! holds the flame power flag at byte offset 3, and kind 323 is a
//! secondary flag that is zeroed on every write. The library retains
//! exactly those two from the last overview fetch, caches the derived
//! power state in an immutable snapshot, and rewrites them (sorted
//! ascending by kind) when asked to switch the fire.
//!
//! # Quick Start
//!
//! ```no_run
//! use optiflame_lib::Fire;
//!
//! #[tokio::main]
//! async fn main() -> optiflame_lib::Result<()> {
//!     // Login + initial overview fetch
//!     let fire = Fire::builder("0004A3B2C1D0", "1234")
//!         .with_name("Living Room Fire")
//!         .connect()
//!         .await?;
//!
//!     // Cached state, no remote call
//!     println!("fire is on: {}", fire.is_on());
//!
//!     // Push a new state; the snapshot updates once the vendor accepts
//!     fire.turn_on().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Strict login
//!
//! The vendor app never checks the login response. If you would rather
//! fail fast on a bad access code, opt into strict mode:
//!
//! ```no_run
//! use optiflame_lib::Fire;
//!
//! # async fn example() -> optiflame_lib::Result<()> {
//! let fire = Fire::builder("0004A3B2C1D0", "1234")
//!     .strict_login()
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
#[cfg(feature = "http")]
mod fire;
pub mod identity;
pub mod protocol;
pub mod state;

pub use codec::{FLAG_OFFSET, Parameter, ParameterBlob, ParameterId};
pub use error::{CodecError, Error, ParseError, ProtocolError, Result};
#[cfg(feature = "http")]
pub use fire::{Fire, FireBuilder, FireInfo, LoginMode};
pub use identity::{AccessCode, DeviceIdentity, FireId};
#[cfg(feature = "http")]
pub use protocol::{CloudClient, CloudConfig};
pub use protocol::{FetchOutcome, WriteOutcome};
pub use state::FireSnapshot;
