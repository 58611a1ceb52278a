//! alarmlint-core - Core library for alarm documentation reconciliation
//!
//! This crate provides the building blocks for cross-checking a robot
//! controller's alarm header against its troubleshooting document:
//! - Extracting `typedef enum` alarm/subcode tables from the C header
//! - Extracting documented subcode ranges from markdown headings
//! - Reconciling the two and reporting every undocumented subcode
//!
//! # The two artifacts
//!
//! The header lists alarms in an enum named `ALARM_MAIN_CODE` and the
//! subcodes of each alarm `FOO` in a companion enum `FOO_SUBCODE`:
//!
//! ```c
//! typedef enum
//! {
//!     ALARM_TASK_CREATE_FAIL = 8010,
//!     ALARM_ASSERTION_FAIL,
//! } ALARM_MAIN_CODE;
//!
//! typedef enum
//! {
//!     SUBCODE_INITIALIZATION,
//!     SUBCODE_EXECUTOR,
//! } ALARM_TASK_CREATE_FAIL_SUBCODE;
//! ```
//!
//! The troubleshooting document carries one level-3 heading per
//! documented alarm/subcode combination:
//!
//! ```markdown
//! ### Alarm: 8010[0]
//! ### Alarm: 8010[1 - 2]
//! ### Alarm: 8011[xx]
//! ```
//!
//! # Parsing documented ranges
//!
//! ```
//! use alarmlint_core::SubcodeRange;
//!
//! let range = SubcodeRange::parse("Alarm: 8010[1 - 2]").unwrap();
//! assert_eq!((range.code, range.start, range.end), (8010, 1, 2));
//! assert!(range.contains(2));
//! assert!(!range.is_catch_all());
//!
//! let catch_all = SubcodeRange::parse("Alarm: 8011[xx]").unwrap();
//! assert!(catch_all.is_catch_all());
//! ```
//!
//! # Reconciling
//!
//! ```
//! use std::collections::HashSet;
//! use std::path::Path;
//! use alarmlint_core::{
//!     DocRanges, HeaderEnums, ReconcileOptions, Reconciliation, SubcodeCatalog,
//! };
//!
//! let header = "
//! typedef enum { ALARM_TASK_CREATE_FAIL = 8010 } ALARM_MAIN_CODE;
//! typedef enum { SUBCODE_INITIALIZATION } ALARM_TASK_CREATE_FAIL_SUBCODE;
//! ";
//! let enums = HeaderEnums::parse(Path::new("alarms.h"), header, &HashSet::new())?;
//! let catalog = SubcodeCatalog::build(&enums)?;
//!
//! let docs = DocRanges::extract("### Alarm: 8010[0]\n", false);
//! let result = Reconciliation::compute(
//!     &catalog,
//!     &docs,
//!     Path::new("troubleshooting.md"),
//!     &ReconcileOptions::default(),
//! );
//! assert!(result.is_passing());
//! # Ok::<(), eyre::Report>(())
//! ```

mod catalog;
mod docs;
mod enums;
mod header;
mod ranges;
mod reconcile;

pub use catalog::{MAIN_ENUM, SUBCODE_SUFFIX, SubcodeCatalog, SubcodeDef};
pub use docs::{ALARM_HEADING_PREFIX, DocRanges, HeadingFailure};
pub use enums::{EnumModel, Enumerator, RawEnumerator, SourceLocation};
pub use header::HeaderEnums;
pub use ranges::{SUBCODE_MAX, SUBCODE_MIN, SubcodeRange};
pub use reconcile::{Diagnostic, ReconcileOptions, Reconciliation, Severity};
