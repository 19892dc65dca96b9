// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire builder.

use std::time::Duration;

use crate::error::Result;
use crate::fire::{Fire, FireInfo, LoginMode};
use crate::identity::{AccessCode, FireId};
use crate::protocol::CloudConfig;

/// Builder for [`Fire`] instances.
///
/// # Examples
///
/// ```no_run
/// use optiflame_lib::Fire;
///
/// # async fn example() -> optiflame_lib::Result<()> {
/// // Login + initial fetch against the production API
/// let fire = Fire::builder("0004A3B2C1D0", "1234")
///     .with_name("Living Room Fire")
///     .connect()
///     .await?;
///
/// // Construct without any network call
/// let fire = Fire::builder("0004A3B2C1D0", "1234")
///     .strict_login()
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FireBuilder {
    fire_id: FireId,
    access_code: AccessCode,
    name: Option<String>,
    login_mode: LoginMode,
    config: CloudConfig,
}

impl FireBuilder {
    pub(crate) fn new(fire_id: FireId, access_code: AccessCode) -> Self {
        Self {
            fire_id,
            access_code,
            name: None,
            login_mode: LoginMode::default(),
            config: CloudConfig::new(),
        }
    }

    /// Sets the user-facing display name.
    ///
    /// Defaults to the GDID when unset.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the cloud endpoint configuration.
    #[must_use]
    pub fn with_config(mut self, config: CloudConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the API base URL (for testing against a mock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Makes login fail on a vendor-signalled exception instead of
    /// ignoring the response.
    #[must_use]
    pub fn strict_login(mut self) -> Self {
        self.login_mode = LoginMode::Strict;
        self
    }

    /// Builds the fire without performing any network call.
    ///
    /// The power state stays unknown until [`Fire::refresh`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Fire> {
        let name = self
            .name
            .unwrap_or_else(|| self.fire_id.as_str().to_string());
        let client = self.config.into_client()?;
        Ok(Fire::new(
            self.fire_id,
            self.access_code,
            FireInfo::with_name(name),
            self.login_mode,
            client,
        ))
    }

    /// Builds the fire, logs in, and fetches the initial overview.
    ///
    /// Login and fetch run sequentially; a malformed overview leaves
    /// the state unknown but still yields a usable fire.
    ///
    /// # Errors
    ///
    /// Returns error if client creation, login, or the initial fetch
    /// fails.
    pub async fn connect(self) -> Result<Fire> {
        let fire = self.build()?;
        fire.login().await?;
        fire.refresh().await?;
        Ok(fire)
    }
}
