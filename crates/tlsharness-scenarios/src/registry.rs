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

//! The scenario table and its lookup contract.
//!
//! The set of scenarios is closed: [`ScenarioId`] enumerates exactly the
//! rows in the table and [`resolve`] is total over it. The table is built
//! once behind a [`LazyLock`] and is read-only afterwards; any number of
//! threads may resolve and query scenarios without coordination.

use crate::bundle::CredentialBundle;
use crate::error::{ScenarioError, ScenarioResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Root directory of the fixture tree, relative to the repository root.
pub const FIXTURE_ROOT: &str = "tls";

/// Passphrase shared by every keystore and PKCS#12 fixture.
///
/// Part of the external fixture contract: generators must protect all
/// binary stores with this literal (see `scripts/gen-fixtures.sh`).
pub const STORE_PASSPHRASE: &str = "wibble";

/// Identifier of one trust scenario. Closed set; kept in lockstep with the
/// rows built by the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    /// No TLS material at all; plaintext baseline.
    None,
    /// Self-signed certificates exchanged via JKS keystores, both directions.
    SelfSignedKeystore,
    /// Self-signed certificates exchanged via PKCS#12 containers.
    SelfSignedPkcs12,
    /// Self-signed certificates exchanged as PEM files.
    SelfSignedPem,
    /// Server certificate chained to a root CA, keystore format; the server
    /// performs no client verification.
    RootCaKeystore,
    /// Same shape as [`RootCaKeystore`](Self::RootCaKeystore), PKCS#12 format.
    RootCaPkcs12,
    /// Full mutual setup where both sides trust the common root CA, PEM.
    RootCaPem,
    /// Server certificate signed by an intermediate CA; both sides trust the
    /// intermediate directly.
    IntermediateCaPem,
    /// Server presents leaf + intermediate as a chain; trust anchor is the
    /// root CA.
    IntermediateCaChainPem,
    /// Server presents a valid certificate whose identity deliberately does
    /// not match the host under test.
    HostMismatch,
}

impl ScenarioId {
    /// Every scenario id, in table order.
    pub const ALL: [ScenarioId; 10] = [
        ScenarioId::None,
        ScenarioId::SelfSignedKeystore,
        ScenarioId::SelfSignedPkcs12,
        ScenarioId::SelfSignedPem,
        ScenarioId::RootCaKeystore,
        ScenarioId::RootCaPkcs12,
        ScenarioId::RootCaPem,
        ScenarioId::IntermediateCaPem,
        ScenarioId::IntermediateCaChainPem,
        ScenarioId::HostMismatch,
    ];

    /// Stable kebab-case name, usable in harness configuration files.
    pub fn name(self) -> &'static str {
        match self {
            ScenarioId::None => "none",
            ScenarioId::SelfSignedKeystore => "self-signed-keystore",
            ScenarioId::SelfSignedPkcs12 => "self-signed-pkcs12",
            ScenarioId::SelfSignedPem => "self-signed-pem",
            ScenarioId::RootCaKeystore => "root-ca-keystore",
            ScenarioId::RootCaPkcs12 => "root-ca-pkcs12",
            ScenarioId::RootCaPem => "root-ca-pem",
            ScenarioId::IntermediateCaPem => "intermediate-ca-pem",
            ScenarioId::IntermediateCaChainPem => "intermediate-ca-chain-pem",
            ScenarioId::HostMismatch => "host-mismatch",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioId {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_string()))
    }
}

/// The four credential slots a scenario exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Key+certificate material the server presents.
    ServerKeyCert,
    /// Trust anchors the server validates client certificates with.
    ServerTrust,
    /// Trust anchors the client validates the server with.
    ClientTrust,
    /// Key+certificate material the client presents for mutual auth.
    ClientKeyCert,
}

impl Role {
    /// Every accessor role.
    pub const ALL: [Role; 4] = [
        Role::ServerKeyCert,
        Role::ServerTrust,
        Role::ClientTrust,
        Role::ClientKeyCert,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Role::ServerKeyCert => "server-key-cert",
            Role::ServerTrust => "server-trust",
            Role::ClientTrust => "client-trust",
            Role::ClientKeyCert => "client-key-cert",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of querying one credential slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessorResult {
    /// The scenario supplies this material.
    Present(CredentialBundle),
    /// The scenario by design needs no such material; skip the step.
    NotApplicable,
    /// The scenario was never meant to supply this role's material;
    /// querying it is a caller error.
    Unsupported,
}

impl AccessorResult {
    /// The bundle, if this slot is populated.
    pub fn bundle(&self) -> Option<&CredentialBundle> {
        match self {
            AccessorResult::Present(bundle) => Some(bundle),
            _ => None,
        }
    }
}

/// One row of the scenario table.
///
/// Immutable after construction; equality is by value so idempotence of
/// [`resolve`] is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    id: ScenarioId,
    server_key_cert: AccessorResult,
    server_trust: AccessorResult,
    client_trust: AccessorResult,
    client_key_cert: AccessorResult,
}

impl Scenario {
    /// Identifier of this row.
    pub fn id(&self) -> ScenarioId {
        self.id
    }

    /// Key+certificate material the server presents.
    pub fn server_key_cert(&self) -> ScenarioResult<Option<&CredentialBundle>> {
        self.query(Role::ServerKeyCert)
    }

    /// Trust anchors the server validates client certificates with.
    pub fn server_trust(&self) -> ScenarioResult<Option<&CredentialBundle>> {
        self.query(Role::ServerTrust)
    }

    /// Trust anchors the client validates the server with.
    pub fn client_trust(&self) -> ScenarioResult<Option<&CredentialBundle>> {
        self.query(Role::ClientTrust)
    }

    /// Key+certificate material the client presents.
    pub fn client_key_cert(&self) -> ScenarioResult<Option<&CredentialBundle>> {
        self.query(Role::ClientKeyCert)
    }

    /// Query one slot by role.
    ///
    /// `Ok(None)` is the legitimate "nothing to configure" outcome;
    /// `Err` is the loud [`ScenarioError::UnsupportedAccess`] failure and
    /// must never be collapsed into the former.
    pub fn query(&self, role: Role) -> ScenarioResult<Option<&CredentialBundle>> {
        match self.slot(role) {
            AccessorResult::Present(bundle) => Ok(Some(bundle)),
            AccessorResult::NotApplicable => Ok(None),
            AccessorResult::Unsupported => Err(ScenarioError::UnsupportedAccess {
                scenario: self.id,
                role,
            }),
        }
    }

    /// Raw slot contents, for conformance checks that inspect the table
    /// without triggering the unsupported-access failure.
    pub fn slot(&self, role: Role) -> &AccessorResult {
        match role {
            Role::ServerKeyCert => &self.server_key_cert,
            Role::ServerTrust => &self.server_trust,
            Role::ClientTrust => &self.client_trust,
            Role::ClientKeyCert => &self.client_key_cert,
        }
    }
}

/// Look up the scenario for `id`.
///
/// Total over the closed id set; constant time. Repeated calls return the
/// same row.
pub fn resolve(id: ScenarioId) -> &'static Scenario {
    let scenario = &TABLE[id as usize];
    debug_assert_eq!(scenario.id, id);
    scenario
}

static TABLE: LazyLock<[Scenario; 10]> = LazyLock::new(build_table);

fn build_table() -> [Scenario; 10] {
    use AccessorResult::{NotApplicable, Unsupported};

    let jks = |path: &str| {
        AccessorResult::Present(CredentialBundle::keystore(path, STORE_PASSPHRASE))
    };
    let p12 = |path: &str| {
        AccessorResult::Present(CredentialBundle::pkcs12(path, STORE_PASSPHRASE))
    };
    let key_cert = |key: &str, cert: &str| {
        AccessorResult::Present(CredentialBundle::pem_key_cert(key, cert))
    };
    let trust = |certs: &[&str]| {
        AccessorResult::Present(CredentialBundle::pem_trust(certs.iter().copied()))
    };

    [
        Scenario {
            id: ScenarioId::None,
            server_key_cert: NotApplicable,
            server_trust: NotApplicable,
            client_trust: NotApplicable,
            client_key_cert: NotApplicable,
        },
        Scenario {
            id: ScenarioId::SelfSignedKeystore,
            server_key_cert: jks("tls/server-keystore.jks"),
            server_trust: jks("tls/server-truststore.jks"),
            client_trust: jks("tls/client-truststore.jks"),
            client_key_cert: jks("tls/client-keystore.jks"),
        },
        Scenario {
            id: ScenarioId::SelfSignedPkcs12,
            server_key_cert: p12("tls/server-keystore.p12"),
            server_trust: p12("tls/server-truststore.p12"),
            client_trust: p12("tls/client-truststore.p12"),
            client_key_cert: p12("tls/client-keystore.p12"),
        },
        Scenario {
            // Each side trusts the other's self-signed certificate directly.
            id: ScenarioId::SelfSignedPem,
            server_key_cert: key_cert("tls/server-key.pem", "tls/server-cert.pem"),
            server_trust: trust(&["tls/client-cert.pem"]),
            client_trust: trust(&["tls/server-cert.pem"]),
            client_key_cert: key_cert("tls/client-key.pem", "tls/client-cert.pem"),
        },
        Scenario {
            id: ScenarioId::RootCaKeystore,
            server_key_cert: jks("tls/server-keystore-root-ca.jks"),
            server_trust: Unsupported,
            client_trust: jks("tls/client-truststore-root-ca.jks"),
            client_key_cert: Unsupported,
        },
        Scenario {
            id: ScenarioId::RootCaPkcs12,
            server_key_cert: p12("tls/server-keystore-root-ca.p12"),
            server_trust: Unsupported,
            client_trust: p12("tls/client-truststore-root-ca.p12"),
            client_key_cert: Unsupported,
        },
        Scenario {
            id: ScenarioId::RootCaPem,
            server_key_cert: key_cert("tls/server-key.pem", "tls/server-cert-root-ca.pem"),
            server_trust: trust(&["tls/root-ca/ca-cert.pem"]),
            client_trust: trust(&["tls/root-ca/ca-cert.pem"]),
            client_key_cert: key_cert("tls/client-key.pem", "tls/client-cert-root-ca.pem"),
        },
        Scenario {
            id: ScenarioId::IntermediateCaPem,
            server_key_cert: key_cert("tls/server-key.pem", "tls/server-cert-int-ca.pem"),
            server_trust: trust(&["tls/int-ca/ca-cert.pem"]),
            client_trust: trust(&["tls/int-ca/ca-cert.pem"]),
            client_key_cert: Unsupported,
        },
        Scenario {
            // The served file holds leaf + intermediate; the peer only needs
            // the root.
            id: ScenarioId::IntermediateCaChainPem,
            server_key_cert: key_cert("tls/server-key.pem", "tls/server-cert-ca-chain.pem"),
            server_trust: trust(&["tls/root-ca/ca-cert.pem"]),
            client_trust: trust(&["tls/root-ca/ca-cert.pem"]),
            client_key_cert: Unsupported,
        },
        Scenario {
            id: ScenarioId::HostMismatch,
            server_key_cert: key_cert(
                "tls/server-key-host-mismatch.pem",
                "tls/server-cert-host-mismatch.pem",
            ),
            server_trust: NotApplicable,
            client_trust: NotApplicable,
            client_key_cert: NotApplicable,
        },
    ]
}
