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

//! PEM file loading.

use crate::error::{EndpointError, EndpointResult};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::RootCertStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

fn read(path: &Path) -> EndpointResult<Vec<u8>> {
    fs::read(path).map_err(|source| EndpointError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every certificate from a PEM file.
pub(crate) fn load_certs(path: &Path) -> EndpointResult<Vec<CertificateDer<'static>>> {
    let pem = read(path)?;
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| EndpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(EndpointError::NoCertificates(path.to_path_buf()));
    }
    debug!(path = %path.display(), count = certs.len(), "loaded certificates");
    Ok(certs)
}

/// Load the private key from a PEM file, trying PKCS#8 first and falling
/// back to legacy RSA encoding.
pub(crate) fn load_private_key(path: &Path) -> EndpointResult<PrivateKeyDer<'static>> {
    let pem = read(path)?;

    let pkcs8 = rustls_pemfile::pkcs8_private_keys(&mut &pem[..])
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| EndpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    if let Some(key) = pkcs8.into_iter().next() {
        return Ok(PrivateKeyDer::Pkcs8(key));
    }

    let rsa = rustls_pemfile::rsa_private_keys(&mut &pem[..])
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| EndpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    rsa.into_iter()
        .next()
        .map(PrivateKeyDer::Pkcs1)
        .ok_or_else(|| EndpointError::NoPrivateKey(path.to_path_buf()))
}

/// Build a root store from a trust bundle's certificate paths.
pub(crate) fn root_store(paths: &[PathBuf], base: &Path) -> EndpointResult<RootCertStore> {
    let mut roots = RootCertStore::empty();
    for path in paths {
        for cert in load_certs(&base.join(path))? {
            roots.add(cert)?;
        }
    }
    Ok(roots)
}
