// Copyright (C) 2026  TlsHarness Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! TLS endpoint configuration from scenario bundles.
//!
//! This crate is the consumer side of the registry contract: it accepts the
//! [`CredentialBundle`](tlsharness_scenarios::CredentialBundle) descriptors a
//! scenario resolves to and produces ready-to-use rustls `ServerConfig` /
//! `ClientConfig` values for conformance tests.
//!
//! Only PEM bundles are materialised here. Keystore and PKCS#12 descriptors
//! exist for consumers with native support for those containers; handing one
//! to this layer yields [`EndpointError::UnsupportedFormat`].
//!
//! Mutual authentication is an explicit caller choice: the plain builders
//! ([`server_config`], [`client_config`]) query only the slots a one-way
//! handshake needs, while the `mutual_*` variants also query the peer-auth
//! slots and therefore fail loudly on scenarios that never modelled them.

pub mod config;
pub mod error;
mod pem;

pub use config::{
    client_config, insecure_client_config, mutual_client_config, mutual_server_config,
    pinned_client_config, server_config,
};
pub use error::{EndpointError, EndpointResult};
