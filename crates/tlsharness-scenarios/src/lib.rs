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

//! Closed registry of named TLS trust scenarios.
//!
//! Each scenario describes how an endpoint pair should be configured for a
//! handshake under conformance testing: the key/certificate material the
//! server presents, the trust anchors each side validates peers with, and
//! the client credential for mutual authentication. The registry is pure
//! data — it performs no I/O, no parsing and no cryptography; turning a
//! [`CredentialBundle`] into live endpoint configuration belongs to a
//! consumer such as `tlsharness-endpoint`.
//!
//! The subtlety of the lookup contract is the three-way outcome of every
//! accessor query:
//!
//! - `Ok(Some(bundle))` — the scenario supplies material for that role.
//! - `Ok(None)` — the scenario by design needs no such material; the caller
//!   skips that configuration step.
//! - `Err(`[`ScenarioError::UnsupportedAccess`]`)` — the scenario was never
//!   meant to supply that role's material; querying it is a bug in the test
//!   harness and must abort setup, never be coerced into the silent case.

pub mod bundle;
pub mod error;
pub mod registry;

pub use bundle::{CredentialBundle, CredentialFormat};
pub use error::{ScenarioError, ScenarioResult};
pub use registry::{
    resolve, AccessorResult, Role, Scenario, ScenarioId, FIXTURE_ROOT, STORE_PASSPHRASE,
};
