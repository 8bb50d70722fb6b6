//! RuboCop JSON report types and the private file they are written to.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::RunnerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionResult {
    pub files: Vec<InspectedFile>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub offence_count: u64,
    pub target_file_count: u64,
    pub inspected_file_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectedFile {
    pub path: String,
    #[serde(default)]
    pub offences: Vec<Offence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offence {
    pub severity: String,
    pub message: String,
    pub cop_name: String,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl InspectionResult {
    /// Paths with at least one offence, in report order.
    pub fn failed_paths(&self) -> Vec<String> {
        self.files
            .iter()
            .filter(|file| !file.offences.is_empty())
            .map(|file| file.path.clone())
            .collect()
    }

    pub fn offences(&self) -> impl Iterator<Item = (&str, &Offence)> {
        self.files.iter().flat_map(|file| {
            file.offences
                .iter()
                .map(move |offence| (file.path.as_str(), offence))
        })
    }

    /// Parse a report; `source` is only used in error messages.
    pub fn from_json(bytes: &[u8], source: &Path) -> Result<Self, RunnerError> {
        let result: InspectionResult = serde_json::from_slice(bytes)
            .map_err(|err| RunnerError::malformed(source, err.to_string()))?;
        let summary = &result.summary;
        if summary.inspected_file_count > summary.target_file_count {
            return Err(RunnerError::malformed(
                source,
                format!(
                    "inspected_file_count ({}) exceeds target_file_count ({})",
                    summary.inspected_file_count, summary.target_file_count
                ),
            ));
        }
        Ok(result)
    }
}

/// Owner-only temporary file the tool writes its JSON report into.
///
/// Created on first use and removed when the store is dropped. One store per
/// runner keeps concurrent runners from sharing a file.
#[derive(Debug, Default)]
pub struct ResultStore {
    file: Option<NamedTempFile>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the report file, creating it on first call.
    pub fn temporary_output_path(&mut self) -> Result<&Path, RunnerError> {
        let file = match self.file.take() {
            Some(file) => file,
            None => create_private_file()?,
        };
        Ok(self.file.insert(file).path())
    }

    /// Truncate the report file so a run that writes nothing cannot yield the
    /// previous run's report.
    pub fn clear(&mut self) -> Result<(), RunnerError> {
        self.temporary_output_path()?;
        if let Some(file) = &self.file {
            file.as_file()
                .set_len(0)
                .map_err(|source| RunnerError::TempFile { source })?;
        }
        Ok(())
    }

    pub fn load(&mut self) -> Result<InspectionResult, RunnerError> {
        let path = self.temporary_output_path()?.to_path_buf();
        let bytes = fs::read(&path)
            .map_err(|err| RunnerError::malformed(&path, format!("read failed: {err}")))?;
        let result = InspectionResult::from_json(&bytes, &path)?;
        tracing::debug!(
            path = %path.display(),
            offences = result.summary.offence_count,
            inspected = result.summary.inspected_file_count,
            "loaded inspection result"
        );
        Ok(result)
    }
}

/// The report path as passed to RuboCop; a lossy conversion would point the
/// tool at a different file than the one loaded afterwards.
pub(crate) fn utf8_path(path: &Path) -> Result<&str, RunnerError> {
    path.to_str().ok_or_else(|| RunnerError::TempFile {
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("non-UTF-8 path {}", path.display()),
        ),
    })
}

fn create_private_file() -> Result<NamedTempFile, RunnerError> {
    let file = tempfile::Builder::new()
        .prefix("rubocop-guard-")
        .suffix(".json")
        .tempfile()
        .map_err(|source| RunnerError::TempFile { source })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = file
            .as_file()
            .metadata()
            .map_err(|source| RunnerError::TempFile { source })?
            .permissions();
        perms.set_mode(0o600);
        fs::set_permissions(file.path(), perms)
            .map_err(|source| RunnerError::TempFile { source })?;
    }
    Ok(file)
}

#[cfg(test)]
pub(crate) const SAMPLE_REPORT: &str = r#"{
  "metadata": {
    "rubocop_version": "0.9.0",
    "ruby_engine": "ruby",
    "ruby_version": "2.0.0",
    "ruby_patchlevel": "195",
    "ruby_platform": "x86_64-darwin12.3.0"
  },
  "files": [{
      "path": "lib/foo.rb",
      "offences": []
    }, {
      "path": "lib/bar.rb",
      "offences": [{
          "severity": "convention",
          "message": "Line is too long. [81/79]",
          "cop_name": "LineLength",
          "location": { "line": 546, "column": 80 }
        }, {
          "severity": "warning",
          "message": "Unreachable code detected.",
          "cop_name": "UnreachableCode",
          "location": { "line": 15, "column": 9 }
        }
      ]
    }
  ],
  "summary": {
    "offence_count": 2,
    "target_file_count": 2,
    "inspected_file_count": 2
  }
}"#;
