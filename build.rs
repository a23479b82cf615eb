use std::{env, error::Error};

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PROFILE");

    // Outside a git checkout vergen emits placeholder values and a warning
    EmitBuilder::builder()
        .build_timestamp()
        .git_describe(false, true, None)
        .git_sha(false)
        .emit_and_set()?;

    let pkg_version = env::var("CARGO_PKG_VERSION")?;
    let sha = env::var("VERGEN_GIT_SHA").unwrap_or_else(|_| String::from("unknown"));
    let describe = env::var("VERGEN_GIT_DESCRIBE").unwrap_or_else(|_| String::from("unknown"));
    let build_timestamp =
        env::var("VERGEN_BUILD_TIMESTAMP").unwrap_or_else(|_| String::from("unknown"));
    let target = env::var("TARGET")?;
    let profile = env::var("PROFILE")?;

    // Example:
    //
    // ```text
    // aws-cred-env Version: 0.3.0
    // Commit SHA: 5186142d3bb4d1be7bb4ade548b77c8e2270717e (v0.3.0)
    // Build Timestamp: 2025-01-16T15:04:03.522021223Z
    // Build Target: x86_64-unknown-linux-gnu
    // Build Profile: release
    // ```
    println!("cargo:rustc-env=AWS_CRED_ENV_LONG_VERSION_0=Version: {pkg_version}");
    println!("cargo:rustc-env=AWS_CRED_ENV_LONG_VERSION_1=Commit SHA: {sha} ({describe})");
    println!("cargo:rustc-env=AWS_CRED_ENV_LONG_VERSION_2=Build Timestamp: {build_timestamp}");
    println!("cargo:rustc-env=AWS_CRED_ENV_LONG_VERSION_3=Build Target: {target}");
    println!("cargo:rustc-env=AWS_CRED_ENV_LONG_VERSION_4=Build Profile: {profile}");

    Ok(())
}
