//! Deterministic construction of the RuboCop command line.

use std::fmt;

use crate::options::RunOptions;

const FORMAT_FLAGS: [&str; 2] = ["-f", "--format"];
const OUTPUT_FLAGS: [&str; 3] = ["-o", "--out", "--output"];
const CONSOLE_FORMATTER: &str = "progress";

/// One subprocess invocation; element 0 is the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs(Vec<String>);

impl CommandArgs {
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// The value following `--format json --out`, if present.
    pub fn json_output_path(&self) -> Option<&str> {
        self.0
            .windows(4)
            .find(|window| window[0] == "--format" && window[1] == "json" && window[2] == "--out")
            .map(|window| window[3].as_str())
    }
}

impl fmt::Display for CommandArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_words::join(&self.0))
    }
}

/// Build `<program> [--format progress] --format json --out <json_path> <cli...> <paths...>`.
pub fn build_command(options: &RunOptions, json_path: &str, paths: &[String]) -> CommandArgs {
    let user_args = options.cli_args();
    let mut argv = Vec::with_capacity(user_args.len() + paths.len() + 7);
    argv.push(options.program().to_string());
    if should_add_console_formatter(options) {
        argv.push("--format".to_string());
        argv.push(CONSOLE_FORMATTER.to_string());
    }
    argv.push("--format".to_string());
    argv.push("json".to_string());
    argv.push("--out".to_string());
    argv.push(json_path.to_string());
    argv.extend(user_args.iter().cloned());
    argv.extend(paths.iter().cloned());
    CommandArgs(argv)
}

fn should_add_console_formatter(options: &RunOptions) -> bool {
    !options.hide_stdout() && !include_formatter_for_console(options.cli_args())
}

/// Whether `args` already select a formatter that writes to the console.
///
/// Each `-f`/`--format` starts a group that runs until the next one; a group
/// containing `-o`/`--out`/`--output` is redirected to a file. Any group without
/// a redirection means the user already has console output.
pub fn include_formatter_for_console(args: &[String]) -> bool {
    let mut redirected: Vec<bool> = Vec::new();
    for arg in args {
        if FORMAT_FLAGS.contains(&arg.as_str()) {
            redirected.push(false);
        } else if OUTPUT_FLAGS.contains(&arg.as_str()) {
            if let Some(last) = redirected.last_mut() {
                *last = true;
            }
        }
    }
    redirected.iter().any(|paired| !paired)
}
