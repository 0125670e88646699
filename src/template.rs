//! Version-file template rendering
//!
//! The distribution carries a `version` file rendered from a template by
//! substituting four well-known tokens. Anything else in the template,
//! including other `${...}` sequences, passes through verbatim.

use crate::config::PackageConfig;
use crate::git::CommitInfo;

/// Token replaced with the package name
pub const NAME_TOKEN: &str = "${project.name}";
/// Token replaced with the package version
pub const VERSION_TOKEN: &str = "${project.version}";
/// Token replaced with the abbreviated commit SHA
pub const SHA_TOKEN: &str = "${VERSION_SHA}";
/// Token replaced with the commit date (`YYYY-MM-DD`)
pub const TIME_TOKEN: &str = "${VERSION_TIME}";

/// Values stamped into the `version` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub name: String,
    pub version: String,
    pub sha: String,
    pub date: String,
}

impl Stamp {
    /// Build a stamp from the manifest's package section and commit metadata
    pub fn for_package(package: &PackageConfig, commit: &CommitInfo) -> Self {
        Self {
            name: package.name.clone(),
            version: package.version.clone(),
            sha: commit.sha.clone(),
            date: commit.date(),
        }
    }
}

/// Substitute every occurrence of the four tokens into the template
pub fn render(template: &str, stamp: &Stamp) -> String {
    template
        .replace(NAME_TOKEN, &stamp.name)
        .replace(VERSION_TOKEN, &stamp.version)
        .replace(SHA_TOKEN, &stamp.sha)
        .replace(TIME_TOKEN, &stamp.date)
}
