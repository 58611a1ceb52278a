//! Subcode catalog
//!
//! Flattens the parsed header enums into one record per defined
//! alarm/subcode pair. The enum named [`MAIN_ENUM`] lists the alarms;
//! each alarm `FOO` must come with a companion enum `FOO_SUBCODE` whose
//! enumerators are that alarm's subcodes.

use crate::enums::SourceLocation;
use crate::header::HeaderEnums;
use eyre::{Result, bail};

/// Name of the enum that designates the set of alarms.
pub const MAIN_ENUM: &str = "ALARM_MAIN_CODE";

/// Suffix appended to an alarm name to form its subcode enum name.
pub const SUBCODE_SUFFIX: &str = "_SUBCODE";

/// One defined alarm/subcode pair from the header.
#[derive(Debug, Clone)]
pub struct SubcodeDef {
    /// Enumerator name of the alarm (e.g. `ALARM_TASK_CREATE_FAIL`)
    pub alarm_name: String,
    /// Numeric alarm code (e.g. 8010)
    pub alarm: i64,
    /// Enumerator name of the subcode (e.g. `SUBCODE_INITIALIZATION`)
    pub subcode_name: String,
    /// Numeric subcode value
    pub subcode: i64,
    /// Declaration site of the subcode enumerator
    pub location: SourceLocation,
}

impl SubcodeDef {
    /// The `code[subcode]` form used in diagnostics.
    pub fn display_code(&self) -> String {
        format!("{}[{}]", self.alarm, self.subcode)
    }
}

/// Every subcode the header defines, in main-alarm order and then
/// subcode declaration order.
#[derive(Debug, Clone, Default)]
pub struct SubcodeCatalog {
    /// Flattened definitions
    pub defs: Vec<SubcodeDef>,
}

impl SubcodeCatalog {
    /// Build the catalog from the parsed header enums.
    ///
    /// # Errors
    ///
    /// Fails if [`MAIN_ENUM`] is missing, or if any alarm listed there
    /// has no companion `_SUBCODE` enum.
    pub fn build(enums: &HeaderEnums) -> Result<Self> {
        let Some(main) = enums.get(MAIN_ENUM) else {
            bail!("enum '{MAIN_ENUM}' not found in the alarm header");
        };

        let mut defs = Vec::new();
        for alarm in &main.enumerators {
            let subcode_enum = format!("{}{}", alarm.name, SUBCODE_SUFFIX);
            let Some(sub) = enums.get(&subcode_enum) else {
                bail!(
                    "no enum '{}' found for alarm '{}' ({})",
                    subcode_enum,
                    alarm.name,
                    alarm.value
                );
            };
            for e in &sub.enumerators {
                defs.push(SubcodeDef {
                    alarm_name: alarm.name.clone(),
                    alarm: alarm.value,
                    subcode_name: e.name.clone(),
                    subcode: e.value,
                    location: e.location.clone(),
                });
            }
        }

        Ok(Self { defs })
    }

    /// Number of defined subcodes
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the catalog holds no definitions
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    fn parse_header(source: &str) -> HeaderEnums {
        HeaderEnums::parse(Path::new("test.h"), source, &HashSet::new()).unwrap()
    }

    const HEADER: &str = "\
typedef enum
{
    ALARM_TASK_CREATE_FAIL = 8010,
    ALARM_ASSERTION_FAIL,
} ALARM_MAIN_CODE;

typedef enum
{
    SUBCODE_INITIALIZATION,
    SUBCODE_EXECUTOR,
} ALARM_TASK_CREATE_FAIL_SUBCODE; //8010

typedef enum
{
    SUBCODE_FAIL_NODE_INIT = 3,
    SUBCODE_FAIL_MEM_ALLOC,
} ALARM_ASSERTION_FAIL_SUBCODE; //8011
";

    #[test]
    fn flattens_in_declaration_order() {
        let catalog = SubcodeCatalog::build(&parse_header(HEADER)).unwrap();
        assert_eq!(catalog.len(), 4);

        let pairs: Vec<(i64, i64)> = catalog.defs.iter().map(|d| (d.alarm, d.subcode)).collect();
        assert_eq!(pairs, vec![(8010, 0), (8010, 1), (8011, 3), (8011, 4)]);

        assert_eq!(catalog.defs[0].alarm_name, "ALARM_TASK_CREATE_FAIL");
        assert_eq!(catalog.defs[0].subcode_name, "SUBCODE_INITIALIZATION");
        assert_eq!(catalog.defs[3].subcode_name, "SUBCODE_FAIL_MEM_ALLOC");
    }

    #[test]
    fn location_points_at_the_subcode_enumerator() {
        let catalog = SubcodeCatalog::build(&parse_header(HEADER)).unwrap();
        // SUBCODE_INITIALIZATION sits on line 9 of the snippet
        assert_eq!(catalog.defs[0].location.line, 9);
        assert_eq!(catalog.defs[0].location.column, 5);
    }

    #[test]
    fn display_code_form() {
        let catalog = SubcodeCatalog::build(&parse_header(HEADER)).unwrap();
        assert_eq!(catalog.defs[1].display_code(), "8010[1]");
    }

    #[test]
    fn missing_main_enum_is_fatal() {
        let enums = parse_header("typedef enum { SUBCODE_A } FOO_SUBCODE;\n");
        let err = SubcodeCatalog::build(&enums).unwrap_err();
        assert!(err.to_string().contains("ALARM_MAIN_CODE"));
    }

    #[test]
    fn missing_subcode_enum_is_fatal() {
        let enums = parse_header(
            "typedef enum { ALARM_LONESOME = 8020 } ALARM_MAIN_CODE;\n",
        );
        let err = SubcodeCatalog::build(&enums).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ALARM_LONESOME_SUBCODE"), "unexpected error: {msg}");
    }
}
