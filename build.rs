// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");

    // Packaging builds (e.g. flatpak) inject the version directly
    let version = std::env::var("GEOSNAP_VERSION").unwrap_or_else(|_| git_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn git_version() -> String {
    let describe = Command::new("git")
        .args(["describe", "--tags", "--always", "--match", "v*"])
        .output();

    match describe {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            version.strip_prefix('v').unwrap_or(&version).to_string()
        }
        _ => format!("{}-unreleased", env!("CARGO_PKG_VERSION")),
    }
}
