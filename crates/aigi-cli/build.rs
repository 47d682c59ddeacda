use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let commit = env::var("GITHUB_SHA")
        .ok()
        .filter(|v| !v.is_empty())
        .map(|full| full.chars().take(7).collect::<String>())
        .or_else(|| git(&["rev-parse", "--short", "HEAD"]))
        .map(|short| {
            if worktree_dirty() {
                format!("{short}-dirty")
            } else {
                short
            }
        })
        .unwrap_or_else(|| "unknown".to_string());

    let build_date = git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| "unknown".to_string());
    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=AIGI_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=AIGI_BUILD_DATE={build_date}");
    println!("cargo:rustc-env=AIGI_BUILD_TARGET={target}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

// Only tracked files count; build artifacts never mark the tree dirty.
fn worktree_dirty() -> bool {
    git(&["status", "--porcelain", "--untracked-files=no"]).is_some()
}
