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

//! Credential bundle descriptors.
//!
//! A [`CredentialBundle`] describes *where* one side's key+certificate or
//! trust-anchor material lives on disk and in which container format. It is
//! a pure descriptor: nothing here opens, parses or validates the files.

use crate::error::{ScenarioError, ScenarioResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kind of on-disk credential material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialFormat {
    /// Binary Java-style keystore (`.jks`), unlocked with a passphrase.
    Keystore,
    /// Binary PKCS#12 container (`.p12`), unlocked with a passphrase.
    Pkcs12Container,
    /// One or more plaintext PEM-encoded key/certificate files.
    PemFiles,
}

impl CredentialFormat {
    /// Whether this format bundles its material behind a passphrase.
    pub fn requires_passphrase(self) -> bool {
        matches!(self, Self::Keystore | Self::Pkcs12Container)
    }
}

/// Descriptor for obtaining one side's key+certificate or trust-anchor set.
///
/// Shape invariants, enforced by [`CredentialBundle::validate`]:
///
/// - `passphrase` is present (and non-empty) iff `format` is a binary store.
/// - A binary store carries exactly one path.
/// - A PEM key+certificate bundle carries exactly two paths, ordered
///   `[key, cert]`.
/// - A PEM trust-anchor bundle carries one or more certificate paths
///   (several anchors form a chain of trust).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Container format of the referenced files.
    pub format: CredentialFormat,
    /// Ordered file paths, relative to the repository root.
    pub paths: Vec<PathBuf>,
    /// Store passphrase for binary formats, `None` for PEM.
    pub passphrase: Option<String>,
}

impl CredentialBundle {
    /// Descriptor for a Java-style keystore.
    pub fn keystore(path: impl Into<PathBuf>, passphrase: impl Into<String>) -> Self {
        Self {
            format: CredentialFormat::Keystore,
            paths: vec![path.into()],
            passphrase: Some(passphrase.into()),
        }
    }

    /// Descriptor for a PKCS#12 container.
    pub fn pkcs12(path: impl Into<PathBuf>, passphrase: impl Into<String>) -> Self {
        Self {
            format: CredentialFormat::Pkcs12Container,
            paths: vec![path.into()],
            passphrase: Some(passphrase.into()),
        }
    }

    /// Descriptor for a PEM private key plus its certificate (or chain).
    pub fn pem_key_cert(key: impl Into<PathBuf>, cert: impl Into<PathBuf>) -> Self {
        Self {
            format: CredentialFormat::PemFiles,
            paths: vec![key.into(), cert.into()],
            passphrase: None,
        }
    }

    /// Descriptor for a set of PEM trust-anchor certificates.
    pub fn pem_trust<I, P>(certs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            format: CredentialFormat::PemFiles,
            paths: certs.into_iter().map(Into::into).collect(),
            passphrase: None,
        }
    }

    /// Key path of a PEM key+certificate bundle (`paths[0]`).
    ///
    /// `None` for binary stores and trust bundles.
    pub fn pem_key_path(&self) -> Option<&Path> {
        match self.format {
            CredentialFormat::PemFiles if self.paths.len() == 2 => {
                self.paths.first().map(PathBuf::as_path)
            }
            _ => None,
        }
    }

    /// Certificate path of a PEM key+certificate bundle (`paths[1]`).
    pub fn pem_cert_path(&self) -> Option<&Path> {
        match self.format {
            CredentialFormat::PemFiles if self.paths.len() == 2 => {
                self.paths.get(1).map(PathBuf::as_path)
            }
            _ => None,
        }
    }

    /// Check the shape invariants for this bundle's format.
    pub fn validate(&self) -> ScenarioResult<()> {
        if self.paths.is_empty() {
            return Err(ScenarioError::InvalidBundle(
                "bundle references no paths".into(),
            ));
        }
        if self.format.requires_passphrase() {
            match &self.passphrase {
                Some(p) if !p.is_empty() => {}
                _ => {
                    return Err(ScenarioError::InvalidBundle(format!(
                        "{:?} bundle requires a non-empty passphrase",
                        self.format
                    )))
                }
            }
            if self.paths.len() != 1 {
                return Err(ScenarioError::InvalidBundle(format!(
                    "{:?} bundle must reference exactly one store file",
                    self.format
                )));
            }
        } else if self.passphrase.is_some() {
            return Err(ScenarioError::InvalidBundle(
                "PEM bundle must not carry a passphrase".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystore_bundle_shape() {
        let bundle = CredentialBundle::keystore("tls/server-keystore.jks", "wibble");
        assert_eq!(bundle.format, CredentialFormat::Keystore);
        assert_eq!(bundle.paths.len(), 1);
        assert_eq!(bundle.passphrase.as_deref(), Some("wibble"));
        assert!(bundle.validate().is_ok());
        assert!(bundle.pem_key_path().is_none());
    }

    #[test]
    fn pem_key_cert_ordering() {
        let bundle = CredentialBundle::pem_key_cert("tls/server-key.pem", "tls/server-cert.pem");
        assert_eq!(
            bundle.pem_key_path(),
            Some(Path::new("tls/server-key.pem"))
        );
        assert_eq!(
            bundle.pem_cert_path(),
            Some(Path::new("tls/server-cert.pem"))
        );
        assert!(bundle.validate().is_ok());
    }

    #[test]
    fn pem_trust_allows_multiple_anchors() {
        let bundle =
            CredentialBundle::pem_trust(["tls/root-ca/ca-cert.pem", "tls/int-ca/ca-cert.pem"]);
        assert_eq!(bundle.paths.len(), 2);
        assert!(bundle.validate().is_ok());
        // Two-path trust bundles are not key+cert pairs in disguise; the
        // interpretation comes from the accessor role, not the helper.
        assert!(bundle.pem_key_path().is_some());
    }

    #[test]
    fn empty_passphrase_rejected() {
        let mut bundle = CredentialBundle::pkcs12("tls/server-keystore.p12", "wibble");
        bundle.passphrase = Some(String::new());
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn passphrase_on_pem_rejected() {
        let mut bundle = CredentialBundle::pem_trust(["tls/server-cert.pem"]);
        bundle.passphrase = Some("wibble".into());
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn pathless_bundle_rejected() {
        let bundle = CredentialBundle {
            format: CredentialFormat::PemFiles,
            paths: Vec::new(),
            passphrase: None,
        };
        assert!(bundle.validate().is_err());
    }
}
