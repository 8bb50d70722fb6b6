//! Shared test infrastructure: a shell script standing in for rubocop.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()))
}

/// The two-file report used across tests (`lib/bar.rb` has 2 offences).
pub fn sample_report() -> String {
    let path = manifest_dir().join("tests/fixtures/report.json");
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
}

/// Fake rubocop that writes `report` to the `--format json --out` path,
/// records its argv, and exits with `exit_code`.
pub struct FakeRubocop {
    dir: TempDir,
}

impl FakeRubocop {
    pub fn new(report: Option<&str>, exit_code: i32) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let args_log = dir.path().join("args.txt");
        let write_report = match report {
            Some(report) => format!("cat > \"$out\" <<'REPORT_EOF'\n{report}\nREPORT_EOF\n"),
            None => String::new(),
        };
        let script = format!(
            "#!/bin/sh\n\
             out=\"\"\n\
             prev=\"\"\n\
             prevprev=\"\"\n\
             : > \"{log}\"\n\
             for arg in \"$@\"; do\n\
             \x20 printf '%s\\n' \"$arg\" >> \"{log}\"\n\
             \x20 if [ \"$prevprev\" = \"json\" ] && [ \"$prev\" = \"--out\" ]; then out=\"$arg\"; fi\n\
             \x20 prevprev=\"$prev\"\n\
             \x20 prev=\"$arg\"\n\
             done\n\
             {write_report}\
             exit {exit_code}\n",
            log = args_log.display(),
        );
        let program = dir.path().join("rubocop");
        fs::write(&program, script).expect("write fake rubocop");
        make_executable(&program);
        Self { dir }
    }

    pub fn program(&self) -> String {
        self.dir.path().join("rubocop").display().to_string()
    }

    #[allow(dead_code)]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Arguments the script received on its last invocation.
    #[allow(dead_code)]
    pub fn recorded_args(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("args.txt"))
            .expect("read recorded args")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).expect("stat script").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod script");
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
