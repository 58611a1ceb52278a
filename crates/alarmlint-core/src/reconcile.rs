//! Reconciliation of defined subcodes against documented ranges
//!
//! For every subcode the header defines, scan the documented ranges in
//! document order and take the first range with a matching alarm code
//! that contains the subcode. A definition with no containing range is
//! undocumented; one covered only by a catch-all range can optionally be
//! surfaced as a warning.
//!
//! The run fails iff at least one definition is undocumented. Heading
//! parse failures and catch-all warnings are reported but never change
//! the outcome.

use crate::catalog::SubcodeCatalog;
use crate::docs::{DocRanges, HeadingFailure};
use crate::enums::SourceLocation;
use crate::ranges::SubcodeRange;
use std::path::{Path, PathBuf};

/// Reconciliation mode switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Stop at the first undocumented definition instead of checking all
    pub fail_fast: bool,
    /// Emit a warning when a definition is documented only by a catch-all
    pub warn_catch_all: bool,
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One reportable finding, rendered in the compiler shape
/// `path:line:col: severity: message`.
#[derive(Debug, Clone)]
pub enum Diagnostic {
    /// An alarm heading that did not parse against the range grammar
    ParseFailure {
        doc: PathBuf,
        line: Option<usize>,
        heading: String,
    },
    /// A defined subcode with no containing documented range
    Undocumented {
        location: SourceLocation,
        alarm: i64,
        subcode: i64,
        doc: PathBuf,
    },
    /// A defined subcode documented only by a catch-all range
    CatchAll {
        location: SourceLocation,
        alarm: i64,
        subcode: i64,
        range: SubcodeRange,
    },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::ParseFailure { .. } | Diagnostic::Undocumented { .. } => Severity::Error,
            Diagnostic::CatchAll { .. } => Severity::Warning,
        }
    }

    fn from_failure(doc: &Path, failure: &HeadingFailure) -> Self {
        Diagnostic::ParseFailure {
            doc: doc.to_path_buf(),
            line: failure.line,
            heading: failure.heading.clone(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::ParseFailure { doc, line, heading } => {
                // "no line found" renders as line 0
                let line = line.map(|l| l + 1).unwrap_or(0);
                write!(
                    f,
                    "{}:{}:0: error: failed to parse '{}'",
                    doc.display(),
                    line,
                    heading
                )
            }
            Diagnostic::Undocumented {
                location,
                alarm,
                subcode,
                doc,
            } => {
                write!(
                    f,
                    "{}: error: no documentation for '{}[{}]' in '{}'",
                    location,
                    alarm,
                    subcode,
                    doc.display()
                )
            }
            Diagnostic::CatchAll {
                location,
                alarm,
                subcode,
                range,
            } => {
                write!(
                    f,
                    "{}: warning: '{}[{}]' documented by catch-all '{}'",
                    location, alarm, subcode, range
                )
            }
        }
    }
}

/// The outcome of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Diagnostics in reporting order: parse failures first, then
    /// per-definition findings in catalog order
    pub diagnostics: Vec<Diagnostic>,
    /// Definitions examined (all of them, unless fail-fast stopped early)
    pub checked: usize,
    /// Definitions with no containing documented range
    pub undocumented: usize,
}

impl Reconciliation {
    /// Check every cataloged definition against the documented ranges.
    ///
    /// `doc_path` is only used to label diagnostics.
    pub fn compute(
        catalog: &SubcodeCatalog,
        docs: &DocRanges,
        doc_path: &Path,
        options: &ReconcileOptions,
    ) -> Self {
        let mut result = Reconciliation::default();

        // Parse failures print before any reconciliation finding, in
        // both modes
        for failure in &docs.failures {
            result
                .diagnostics
                .push(Diagnostic::from_failure(doc_path, failure));
        }

        for def in &catalog.defs {
            result.checked += 1;

            // First match wins: with overlapping ranges for the same
            // code, the earliest one in the document governs reporting
            let hit = docs
                .ranges
                .iter()
                .find(|r| r.code == def.alarm && r.contains(def.subcode));

            match hit {
                None => {
                    result.undocumented += 1;
                    result.diagnostics.push(Diagnostic::Undocumented {
                        location: def.location.clone(),
                        alarm: def.alarm,
                        subcode: def.subcode,
                        doc: doc_path.to_path_buf(),
                    });
                    if options.fail_fast {
                        break;
                    }
                }
                Some(range) if range.is_catch_all() && options.warn_catch_all => {
                    result.diagnostics.push(Diagnostic::CatchAll {
                        location: def.location.clone(),
                        alarm: def.alarm,
                        subcode: def.subcode,
                        range: *range,
                    });
                }
                Some(_) => {}
            }
        }

        result
    }

    /// Whether every examined definition was documented.
    pub fn is_passing(&self) -> bool {
        self.undocumented == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderEnums;
    use std::collections::HashSet;
    use std::path::Path;

    const HEADER: &str = "\
typedef enum
{
    ALARM_TASK_CREATE_FAIL = 8010,
} ALARM_MAIN_CODE;

typedef enum
{
    SUBCODE_A = 1,
    SUBCODE_B,
} ALARM_TASK_CREATE_FAIL_SUBCODE; //8010
";

    fn catalog() -> SubcodeCatalog {
        let enums =
            HeaderEnums::parse(Path::new("test.h"), HEADER, &HashSet::new()).unwrap();
        SubcodeCatalog::build(&enums).unwrap()
    }

    fn run(doc: &str, options: ReconcileOptions) -> Reconciliation {
        let docs = DocRanges::extract(doc, false);
        Reconciliation::compute(&catalog(), &docs, Path::new("doc.md"), &options)
    }

    fn rendered(result: &Reconciliation) -> Vec<String> {
        result.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn undocumented_subcode_is_an_error() {
        // Header defines 8010[1] and 8010[2]; only [1] is documented
        let result = run("### Alarm: 8010[1]\n", ReconcileOptions::default());
        assert!(!result.is_passing());
        assert_eq!(result.checked, 2);
        assert_eq!(result.undocumented, 1);
        assert_eq!(
            rendered(&result),
            vec!["test.h:9:5: error: no documentation for '8010[2]' in 'doc.md'"]
        );
    }

    #[test]
    fn catch_all_documents_everything_silently() {
        let result = run("### Alarm: 8010[xx]\n", ReconcileOptions::default());
        assert!(result.is_passing());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn catch_all_warnings_when_enabled() {
        let options = ReconcileOptions {
            warn_catch_all: true,
            ..Default::default()
        };
        let result = run("### Alarm: 8010[xx]\n", options);
        assert!(result.is_passing());
        assert_eq!(
            rendered(&result),
            vec![
                "test.h:8:5: warning: '8010[1]' documented by catch-all '8010[xx]'",
                "test.h:9:5: warning: '8010[2]' documented by catch-all '8010[xx]'",
            ]
        );
        assert!(result.diagnostics.iter().all(|d| d.severity() == Severity::Warning));
    }

    #[test]
    fn explicit_range_beats_catch_all_when_first() {
        // First match wins: [1] is covered by the explicit heading, so
        // no catch-all warning is emitted for it
        let doc = "### Alarm: 8010[1]\n\n### Alarm: 8010[xx]\n";
        let options = ReconcileOptions {
            warn_catch_all: true,
            ..Default::default()
        };
        let result = run(doc, options);
        assert!(result.is_passing());
        assert_eq!(result.diagnostics.len(), 1);
        assert!(matches!(
            result.diagnostics[0],
            Diagnostic::CatchAll { subcode: 2, .. }
        ));
    }

    #[test]
    fn fail_fast_stops_at_the_first_error() {
        let result = run(
            "### Alarm: 9999[0]\n",
            ReconcileOptions {
                fail_fast: true,
                ..Default::default()
            },
        );
        assert_eq!(result.checked, 1);
        assert_eq!(result.undocumented, 1);
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn check_all_aggregates_every_gap() {
        let result = run("### Alarm: 9999[0]\n", ReconcileOptions::default());
        assert_eq!(result.checked, 2);
        assert_eq!(result.undocumented, 2);
    }

    #[test]
    fn parse_failures_precede_reconciliation_errors() {
        let doc = "### Alarm: 8010[1 or 2]\n";
        let result = run(doc, ReconcileOptions::default());
        let lines = rendered(&result);
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "doc.md:1:0: error: failed to parse 'Alarm: 8010[1 or 2]'"
        );
        assert!(lines[1].contains("no documentation for '8010[1]'"));
        assert!(lines[2].contains("no documentation for '8010[2]'"));
        // Parse failures alone do not fail the run outcome; the gaps do
        assert!(!result.is_passing());
    }

    #[test]
    fn parse_failures_still_print_in_fail_fast_mode() {
        let doc = "### Alarm: 8010[1 or 2]\n";
        let result = run(
            doc,
            ReconcileOptions {
                fail_fast: true,
                ..Default::default()
            },
        );
        let lines = rendered(&result);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("failed to parse"));
        assert!(lines[1].contains("no documentation for '8010[1]'"));
    }

    #[test]
    fn unlocatable_parse_failure_renders_line_zero() {
        let diag = Diagnostic::ParseFailure {
            doc: Path::new("doc.md").to_path_buf(),
            line: None,
            heading: "Alarm: odd".to_string(),
        };
        assert_eq!(diag.to_string(), "doc.md:0:0: error: failed to parse 'Alarm: odd'");
    }

    #[test]
    fn reversed_range_documents_nothing() {
        let result = run("### Alarm: 8010[2 - 1]\n", ReconcileOptions::default());
        assert_eq!(result.undocumented, 2);
    }
}
