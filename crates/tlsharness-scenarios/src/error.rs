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

//! Registry error types.

use crate::registry::{Role, ScenarioId};
use thiserror::Error;

/// Errors surfaced by the scenario registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// An accessor was invoked on a scenario that never models material for
    /// that role. This signals a defect in the calling test harness, not a
    /// transient condition: setup must abort, not retry.
    #[error("scenario `{scenario}` does not supply `{role}` material; querying it is a harness bug")]
    UnsupportedAccess {
        /// Scenario that was queried.
        scenario: ScenarioId,
        /// Accessor role that was queried.
        role: Role,
    },

    /// A scenario name did not match any id in the closed set.
    #[error("unknown scenario name `{0}`")]
    UnknownScenario(String),

    /// A credential bundle violates the shape invariants for its format.
    #[error("malformed credential bundle: {0}")]
    InvalidBundle(String),
}

/// Convenience alias for registry results.
pub type ScenarioResult<T> = Result<T, ScenarioError>;
