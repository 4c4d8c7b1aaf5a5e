//! Declarative field mapping rules.

use ardac_model::{SourceRow, TemplateSchema};

use crate::fields;

/// A lookup-table recode of one categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recode {
    pub pairs: &'static [(&'static str, &'static str)],
    pub default: Option<&'static str>,
    /// Trim the input before the lookup.
    pub trim_input: bool,
}

impl Recode {
    pub fn apply(&self, value: Option<&str>) -> Option<String> {
        let value = if self.trim_input {
            value.map(str::trim)
        } else {
            value
        };
        fields::categorical_recode(value, self.pairs, self.default)
    }
}

/// How a source value becomes an output value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Copy,
    Trim,
    SuffixAfterColon,
    YearOf,
    Recode(Recode),
    /// Days from the named start column of the same row to this rule's source.
    DaysSince(&'static str),
}

impl Transform {
    pub fn apply(&self, value: Option<&str>, row: &SourceRow) -> Option<String> {
        match self {
            Transform::Copy => value.map(str::to_string),
            Transform::Trim => fields::trim(value),
            Transform::SuffixAfterColon => fields::suffix_after_colon(value),
            Transform::YearOf => fields::year_of(value),
            Transform::Recode(recode) => recode.apply(value),
            Transform::DaysSince(start) => {
                fields::days_between(value, row.get(start)).map(|days| days.to_string())
            }
        }
    }
}

/// Maps one source column into one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub target: &'static str,
    pub source: &'static str,
    pub transform: Transform,
}

impl FieldRule {
    pub const fn new(target: &'static str, source: &'static str, transform: Transform) -> Self {
        Self {
            target,
            source,
            transform,
        }
    }

    /// Raw copy of `source` into `target`.
    pub const fn copy(target: &'static str, source: &'static str) -> Self {
        Self::new(target, source, Transform::Copy)
    }

    /// Output value for `row`. A column the row lacks reads as null.
    pub fn apply(&self, row: &SourceRow) -> Option<String> {
        self.transform.apply(row.get(self.source), row)
    }
}

/// Targets of `rules` that `schema` does not list, in rule order.
pub fn unmapped_targets(rules: &[FieldRule], schema: &TemplateSchema) -> Vec<&'static str> {
    rules
        .iter()
        .map(|rule| rule.target)
        .filter(|target| !schema.contains(target))
        .collect()
}

/// Logs mapping targets that will be dropped because the template lacks them.
pub(crate) fn log_unmapped_targets(node: &str, rules: &[FieldRule], schema: &TemplateSchema) {
    let dropped = unmapped_targets(rules, schema);
    if !dropped.is_empty() {
        tracing::debug!(node, columns = ?dropped, "mapping targets not in template, dropped");
    }
}
