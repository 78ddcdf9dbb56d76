//! Verification report model.
//!
//! Pure data: the checks themselves run in `gearshare_db::verify`. A report
//! is built in memory, rendered once (text or JSON) and dropped.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::sql::Ident;

pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_TABLE: &str = "users";
pub const DEFAULT_COLUMN: &str = "role";
pub const DEFAULT_ENUM_TYPE: &str = "user_role";
pub const DEFAULT_INDEX: &str = "idx_users_role";

/// Catalog objects the verifier looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyTargets {
    pub schema: Ident,
    pub table: Ident,
    pub column: Ident,
    pub enum_type: Ident,
    pub index: Ident,
}

impl VerifyTargets {
    pub fn new(
        schema: &str,
        table: &str,
        column: &str,
        enum_type: &str,
        index: &str,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            schema: Ident::new(schema)?,
            table: Ident::new(table)?,
            column: Ident::new(column)?,
            enum_type: Ident::new(enum_type)?,
            index: Ident::new(index)?,
        })
    }

    /// Targets of the `users.role` migration.
    pub fn role_migration() -> Self {
        Self::new(
            DEFAULT_SCHEMA,
            DEFAULT_TABLE,
            DEFAULT_COLUMN,
            DEFAULT_ENUM_TYPE,
            DEFAULT_INDEX,
        )
        .expect("default identifiers are valid")
    }
}

/// Row count for one distinct value of the grouping column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// Text form of the value; `None` for SQL NULL.
    pub value: Option<String>,
    pub count: i64,
}

/// Check-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckDetail {
    Column {
        data_type: String,
        default: Option<String>,
    },
    EnumLabels {
        labels: Vec<String>,
    },
    Index {
        definition: String,
    },
    RowCounts {
        groups: Vec<GroupCount>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: Option<CheckDetail>,
}

impl CheckOutcome {
    pub fn passed(name: impl Into<String>, detail: CheckDetail) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: Some(detail),
        }
    }

    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: None,
        }
    }

    /// A failed check that still reports what was (not) found.
    pub fn failed_with(name: impl Into<String>, detail: CheckDetail) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail),
        }
    }
}

/// Ordered list of check outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub checks: Vec<CheckOutcome>,
}

impl VerificationReport {
    pub fn push(&mut self, outcome: CheckOutcome) {
        self.checks.push(outcome);
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn get(&self, name: &str) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for CheckDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckDetail::Column { data_type, default } => {
                write!(f, "type {data_type}")?;
                match default {
                    Some(default) => write!(f, ", default {default}"),
                    None => write!(f, ", no default"),
                }
            }
            CheckDetail::EnumLabels { labels } if labels.is_empty() => f.write_str("no values"),
            CheckDetail::EnumLabels { labels } => write!(f, "values {}", labels.join(", ")),
            CheckDetail::Index { definition } => f.write_str(definition),
            CheckDetail::RowCounts { groups } if groups.is_empty() => f.write_str("no rows"),
            CheckDetail::RowCounts { groups } => {
                for (i, group) in groups.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    let value = group.value.as_deref().unwrap_or("(null)");
                    write!(f, "{value}={}", group.count)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            let status = if check.passed { "exists" } else { "missing" };
            write!(f, "[{status:>7}] {}", check.name)?;
            if let Some(detail) = &check.detail {
                write!(f, ": {detail}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} of {} checks passed",
            self.checks.len() - self.failed_count(),
            self.checks.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VerificationReport {
        let mut report = VerificationReport::default();
        report.push(CheckOutcome::passed(
            "column public.users.role",
            CheckDetail::Column {
                data_type: "user_role".into(),
                default: Some("'user'::user_role".into()),
            },
        ));
        report.push(CheckOutcome::failed("enum user_role"));
        report.push(CheckOutcome::passed(
            "row counts users.role",
            CheckDetail::RowCounts {
                groups: vec![
                    GroupCount {
                        value: Some("admin".into()),
                        count: 2,
                    },
                    GroupCount {
                        value: None,
                        count: 1,
                    },
                ],
            },
        ));
        report
    }

    #[test]
    fn text_rendering_lists_every_check() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[ exists] column public.users.role: type user_role, default 'user'::user_role",
                "[missing] enum user_role",
                "[ exists] row counts users.role: admin=2, (null)=1",
                "2 of 3 checks passed",
            ]
        );
    }

    #[test]
    fn empty_row_counts_render_as_no_rows() {
        let detail = CheckDetail::RowCounts { groups: vec![] };
        assert_eq!(detail.to_string(), "no rows");
    }

    #[test]
    fn failed_check_can_carry_empty_labels() {
        let mut report = VerificationReport::default();
        report.push(CheckOutcome::failed_with(
            "enum public.user_role",
            CheckDetail::EnumLabels { labels: vec![] },
        ));

        assert_eq!(
            report.to_string(),
            "[missing] enum public.user_role: no values\n0 of 1 checks passed"
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["checks"][0]["passed"], false);
        assert_eq!(value["checks"][0]["detail"]["labels"], serde_json::json!([]));
    }

    #[test]
    fn failure_tracking() {
        let report = sample();
        assert!(!report.all_passed());
        assert_eq!(report.failed_count(), 1);
        assert!(report.get("enum user_role").is_some_and(|c| !c.passed));
        assert!(VerificationReport::default().all_passed());
    }

    #[test]
    fn json_uses_tagged_details() {
        let value = serde_json::to_value(sample()).unwrap();
        let checks = value["checks"].as_array().unwrap();
        assert_eq!(checks.len(), 3);
        assert_eq!(checks[0]["detail"]["kind"], "column");
        assert_eq!(checks[0]["detail"]["data_type"], "user_role");
        assert!(checks[1]["detail"].is_null());
        assert_eq!(checks[1]["passed"], false);
        assert_eq!(checks[2]["detail"]["groups"][1]["value"], serde_json::Value::Null);
    }

    #[test]
    fn default_targets_name_the_role_migration() {
        let targets = VerifyTargets::role_migration();
        assert_eq!(targets.table.as_str(), "users");
        assert_eq!(targets.enum_type.as_str(), "user_role");
        assert_eq!(targets.index.as_str(), "idx_users_role");
    }
}
