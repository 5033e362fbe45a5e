//! Local bare-repository fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Run git in `dir` with a throwaway identity; panics on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args([
            "-c",
            "user.name=fixture",
            "-c",
            "user.email=fixture@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create `<root>/<name>.git` (bare, default branch `master`) holding one
/// commit with `files`.
pub fn seed_bare(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let bare = root.join(format!("{name}.git"));
    let seed = root.join(format!("{name}-seed"));
    git(root, &["init", "--quiet", "--bare", "-b", "master", path_str(&bare)]);
    git(root, &["init", "--quiet", "-b", "master", path_str(&seed)]);
    for (rel, content) in files {
        write(&seed, rel, content);
    }
    git(&seed, &["add", "--all"]);
    git(&seed, &["commit", "--quiet", "-m", "initial"]);
    git(&seed, &["push", "--quiet", path_str(&bare), "master"]);
    bare
}

/// Add a commit to `branch` of `bare` through a scratch clone.
pub fn commit_to(bare: &Path, branch: &str, rel: &str, content: &str) {
    let scratch = tempfile::TempDir::new().expect("scratch");
    git(scratch.path(), &["clone", "--quiet", path_str(bare), "."]);
    let exists = !git(scratch.path(), &["ls-remote", "--heads", "origin", branch]).is_empty();
    if exists {
        git(scratch.path(), &["checkout", "--quiet", branch]);
    } else {
        git(scratch.path(), &["checkout", "--quiet", "-b", branch]);
    }
    write(scratch.path(), rel, content);
    git(scratch.path(), &["add", "--all"]);
    git(scratch.path(), &["commit", "--quiet", "-m", &format!("update {rel}")]);
    git(scratch.path(), &["push", "--quiet", "origin", branch]);
}

pub fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write");
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}
