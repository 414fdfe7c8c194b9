use std::process::Command;
use vergen::EmitBuilder;

/// Emits `VERGEN_BUILD_TIMESTAMP` always and `VERGEN_GIT_SHA` only when the
/// crate is built from a git checkout. Readers use `option_env!` for the SHA.
fn main() {
    let in_git_checkout = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    let mut builder = EmitBuilder::builder();
    builder.build_timestamp();
    if in_git_checkout {
        builder.git_sha(true);
    }

    if let Err(e) = builder.emit() {
        println!("cargo:warning=build metadata unavailable: {e}");
    }
}
