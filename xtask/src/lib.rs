use std::env;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Result};

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    /// Link the system FFTW instead of building it from source.
    pub system_fftw: bool,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }

    fn apply(&self, cmd: &mut Command) {
        if self.system_fftw {
            cmd.arg("--no-default-features");
        }
        if let Some(f) = self.features_arg() {
            cmd.arg("--features").arg(f);
        }
    }
}

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());
    let mut path = PathBuf::from(manifest_dir);
    path.pop(); // Go up from xtask to workspace root
    path
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let extra = env::var("FFTWTOOLS_FEATURES").unwrap_or_default();
    let forced = env::var("FFTWTOOLS_SYSTEM_FFTW").ok();
    let system = match forced.as_deref() {
        Some("1") | Some("true") => true,
        Some(_) => false,
        None => detect_system_fftw(),
    };
    compute_config(system, &extra)
}

fn detect_system_fftw() -> bool {
    Command::new("pkg-config")
        .args(["--exists", "fftw3"])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(system_fftw: bool, extra: &str) -> BuildConfig {
    let mut features = Vec::new();
    if system_fftw {
        // default features are dropped, so re-enable the C entry points
        features.push("capi".to_string());
        features.push("system-fftw".to_string());
    }
    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }
    BuildConfig {
        features,
        system_fftw,
    }
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");
    cfg.apply(&mut cmd);
    cmd
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    cfg.apply(&mut cmd);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--workspace", "--all-targets"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

pub fn bench_command(filter: Option<&str>) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["bench", "-p", "fftwtools-bench"]);
    if let Some(f) = filter {
        cmd.args(["--", f]);
    }
    cmd
}

/// Run `cmd` from the workspace root and fail on a non-zero exit.
pub fn run(mut cmd: Command) -> Result<()> {
    let status = cmd.current_dir(workspace_root()).status()?;
    if !status.success() {
        bail!("{:?} exited with {}", cmd.get_program(), status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_compute_source_build() {
        let cfg = compute_config(false, "");
        assert!(cfg.features.is_empty());
        assert!(!cfg.system_fftw);
        assert_eq!(args(&build_command(&cfg)), vec!["build"]);
    }

    #[test]
    fn test_compute_system_build() {
        let cfg = compute_config(true, "capi");
        assert_eq!(cfg.features, vec!["capi", "system-fftw"]);
        let a = args(&test_command(&cfg));
        assert_eq!(a[0], "test");
        assert!(a.contains(&"--no-default-features".to_string()));
        assert!(a.iter().any(|x| x.contains("system-fftw")));
    }

    #[test]
    fn test_extra_features_pass_through() {
        let cfg = compute_config(false, "capi  source");
        assert_eq!(cfg.features_arg().as_deref(), Some("capi source"));
    }

    #[test]
    fn test_other_commands() {
        assert!(clippy_command().get_args().any(|a| a == "clippy"));
        assert!(fmt_command().get_args().any(|a| a == "fmt"));
        let b = args(&bench_command(Some("effort")));
        assert!(b.contains(&"fftwtools-bench".to_string()));
        assert_eq!(b.last().map(String::as_str), Some("effort"));
    }
}
