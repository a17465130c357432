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

//! rustls configuration builders.
//!
//! The plain builders configure one-way server authentication and return
//! `Ok(None)` for scenarios that model no material for the queried side
//! (the plaintext baseline). The `mutual_*` builders additionally query the
//! peer-authentication slots; on scenarios that never modelled those, the
//! registry's unsupported-access error propagates unchanged.

use crate::error::{EndpointError, EndpointResult};
use crate::pem;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime};
use rustls::server::WebPkiClientVerifier;
use rustls::{
    ClientConfig, DigitallySignedStruct, RootCertStore, ServerConfig, SignatureScheme,
};
use std::path::Path;
use std::sync::Arc;
use tlsharness_scenarios::{CredentialBundle, CredentialFormat, Role, Scenario};
use tracing::debug;

fn ensure_pem(bundle: &CredentialBundle) -> EndpointResult<()> {
    if bundle.format != CredentialFormat::PemFiles {
        return Err(EndpointError::UnsupportedFormat {
            format: bundle.format,
        });
    }
    Ok(())
}

fn pem_pair(
    bundle: &CredentialBundle,
    base: &Path,
) -> EndpointResult<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>)> {
    ensure_pem(bundle)?;
    let key_path = bundle.pem_key_path().ok_or_else(|| {
        EndpointError::MalformedBundle("key+cert bundle must carry [key, cert] paths".into())
    })?;
    let cert_path = bundle.pem_cert_path().ok_or_else(|| {
        EndpointError::MalformedBundle("key+cert bundle must carry [key, cert] paths".into())
    })?;
    let certs = pem::load_certs(&base.join(cert_path))?;
    let key = pem::load_private_key(&base.join(key_path))?;
    Ok((certs, key))
}

fn trust_roots(bundle: &CredentialBundle, base: &Path) -> EndpointResult<RootCertStore> {
    ensure_pem(bundle)?;
    pem::root_store(&bundle.paths, base)
}

/// Server configuration without client-certificate verification.
///
/// `Ok(None)` when the scenario presents no server credential at all
/// (plaintext baseline).
pub fn server_config(scenario: &Scenario, base: &Path) -> EndpointResult<Option<Arc<ServerConfig>>> {
    let Some(key_cert) = scenario.server_key_cert()? else {
        return Ok(None);
    };
    let (certs, key) = pem_pair(key_cert, base)?;
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    debug!(scenario = %scenario.id(), "built server config");
    Ok(Some(Arc::new(config)))
}

/// Server configuration that requires and verifies client certificates
/// against the scenario's server trust anchors.
pub fn mutual_server_config(scenario: &Scenario, base: &Path) -> EndpointResult<Arc<ServerConfig>> {
    let Some(key_cert) = scenario.server_key_cert()? else {
        return Err(EndpointError::MissingMaterial {
            scenario: scenario.id(),
            role: Role::ServerKeyCert,
        });
    };
    let Some(trust) = scenario.server_trust()? else {
        return Err(EndpointError::MissingMaterial {
            scenario: scenario.id(),
            role: Role::ServerTrust,
        });
    };
    let roots = trust_roots(trust, base)?;
    let verifier = WebPkiClientVerifier::builder(Arc::new(roots)).build()?;
    let (certs, key) = pem_pair(key_cert, base)?;
    let config = ServerConfig::builder()
        .with_client_cert_verifier(verifier)
        .with_single_cert(certs, key)?;
    debug!(scenario = %scenario.id(), "built mutual-auth server config");
    Ok(Arc::new(config))
}

/// Client configuration that verifies the server against the scenario's
/// client trust anchors, presenting no credential of its own.
///
/// `Ok(None)` when the scenario models no client trust (plaintext baseline
/// or verification-bypass scenarios).
pub fn client_config(scenario: &Scenario, base: &Path) -> EndpointResult<Option<Arc<ClientConfig>>> {
    let Some(trust) = scenario.client_trust()? else {
        return Ok(None);
    };
    let roots = trust_roots(trust, base)?;
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    debug!(scenario = %scenario.id(), "built client config");
    Ok(Some(Arc::new(config)))
}

/// Client configuration that additionally presents the scenario's client
/// credential for mutual authentication.
pub fn mutual_client_config(scenario: &Scenario, base: &Path) -> EndpointResult<Arc<ClientConfig>> {
    let Some(trust) = scenario.client_trust()? else {
        return Err(EndpointError::MissingMaterial {
            scenario: scenario.id(),
            role: Role::ClientTrust,
        });
    };
    let roots = trust_roots(trust, base)?;
    let Some(key_cert) = scenario.client_key_cert()? else {
        return Err(EndpointError::MissingMaterial {
            scenario: scenario.id(),
            role: Role::ClientKeyCert,
        });
    };
    let (certs, key) = pem_pair(key_cert, base)?;
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_client_auth_cert(certs, key)?;
    debug!(scenario = %scenario.id(), "built mutual-auth client config");
    Ok(Arc::new(config))
}

/// Client configuration pinning a single certificate file as the only trust
/// anchor, with full verification (hostname included) still performed.
pub fn pinned_client_config(cert_path: &Path) -> EndpointResult<Arc<ClientConfig>> {
    let mut roots = RootCertStore::empty();
    for cert in pem::load_certs(cert_path)? {
        roots.add(cert)?;
    }
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}

/// Client configuration that skips server-certificate verification
/// entirely. Conformance-test use only: this is the "verification bypass"
/// side of the host-mismatch scenario.
pub fn insecure_client_config() -> Arc<ClientConfig> {
    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(InsecureServerVerifier))
        .with_no_client_auth();
    Arc::new(config)
}

#[derive(Debug)]
struct InsecureServerVerifier;

impl ServerCertVerifier for InsecureServerVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        rustls::crypto::ring::default_provider()
            .signature_verification_algorithms
            .supported_schemes()
    }
}
