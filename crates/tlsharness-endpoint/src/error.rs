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

//! Endpoint configuration error types.

use std::path::PathBuf;
use thiserror::Error;
use tlsharness_scenarios::{CredentialFormat, Role, ScenarioError, ScenarioId};

/// Errors building endpoint configuration from a scenario.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Registry-level failure, most importantly the unsupported-access
    /// signal. Propagated unchanged so the harness sees the original
    /// scenario and role.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// The bundle's container format cannot be materialised by this layer.
    #[error("cannot materialise a {format:?} bundle here; only PEM bundles are supported")]
    UnsupportedFormat {
        /// Format of the offending bundle.
        format: CredentialFormat,
    },

    /// Mutual authentication was requested for a scenario that models no
    /// material for the given role.
    #[error("scenario `{scenario}` models no `{role}` material for mutual authentication")]
    MissingMaterial {
        /// Scenario the configuration was built for.
        scenario: ScenarioId,
        /// Role the mutual setup needed.
        role: Role,
    },

    /// A bundle's paths do not match the shape its role requires.
    #[error("malformed PEM bundle: {0}")]
    MalformedBundle(String),

    /// A referenced fixture file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that failed to read or parse.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A PEM file contained no usable certificate.
    #[error("no certificates found in `{0}`")]
    NoCertificates(PathBuf),

    /// A PEM file contained no usable private key.
    #[error("no private key found in `{0}`")]
    NoPrivateKey(PathBuf),

    /// rustls rejected the assembled configuration.
    #[error("TLS configuration rejected: {0}")]
    Tls(#[from] rustls::Error),

    /// The client-certificate verifier could not be built.
    #[error("client certificate verifier: {0}")]
    Verifier(#[from] rustls::server::VerifierBuilderError),
}

/// Convenience alias for endpoint results.
pub type EndpointResult<T> = Result<T, EndpointError>;
