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

//! Fixture tree location.
//!
//! Scenario bundles reference paths relative to the repository root
//! (`tls/...`). Tests run from a crate directory, so these helpers resolve
//! against the workspace root regardless of the invoking crate.

use std::path::{Path, PathBuf};

/// Absolute path of the workspace root (two levels above this crate).
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("crate lives under <root>/crates/")
        .to_path_buf()
}

/// Resolve a repository-relative fixture path, e.g. `tls/server-cert.pem`.
pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    workspace_root().join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_contains_fixture_tree() {
        assert!(workspace_root().join("tls").is_dir());
    }

    #[test]
    fn fixture_path_joins_relative_paths() {
        let path = fixture_path("tls/server-cert.pem");
        assert!(path.ends_with("tls/server-cert.pem"));
        assert!(path.is_absolute());
    }
}
