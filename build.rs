fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Stamp the binary with build time and commit for `/version`
    println!(
        "cargo:rustc-env=RISKSCOPE_BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339()
    );

    let commit = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string());

    if let Some(hash) = commit {
        println!("cargo:rustc-env=RISKSCOPE_GIT_HASH={hash}");
    }
}
