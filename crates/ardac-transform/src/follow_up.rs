//! Follow-up node: visit records joined with the per-visit DCC tables.
//!
//! Records are materialized up front, one per case and scheduled visit, so
//! a visit that no table reports on still has a record until the QC filter
//! runs. Each auxiliary table is then matched on
//! `<subject key>_<study label><offset>`, which is exactly the id the
//! visit record was given.

use ardac_model::{
    CaseTable, KEY_DELIMITER, NodeKind, NodeTable, QcTable, SUBMITTER_ID_COLUMN, SourceTable,
    TemplateSchema, USUBJID_COLUMN, subject_key,
};

use crate::error::{Result, TransformError};
use crate::index::KeyIndex;
use crate::nodes::follow_up::{
    CASE_REFERENCE_COLUMN, DAYS_TO_FOLLOW_UP_COLUMN, DEMOGRAPHIC_REFERENCE_COLUMN,
    VISIT_DAY_COLUMN, VISIT_LABEL_COLUMN,
};
use crate::nodes::{
    AuxiliarySource, AuxiliarySpec, DEMOGRAPHIC_NODE, FOLLOW_UP_FIXED_COLUMNS,
    FOLLOW_UP_QC_LAYOUT, FollowUpPlan, NodeContext,
};
use crate::qc_filter::partition_empty;
use crate::reconcile::{NodeOutput, node_record, require_column};
use crate::rules::log_unmapped_targets;

/// One record per (case, visit), with only the fixed columns filled in.
///
/// Cases without an id are skipped.
pub fn materialize_visits(
    cases: &CaseTable,
    schema: &TemplateSchema,
    plan: &FollowUpPlan,
    ctx: &NodeContext<'_>,
) -> NodeTable {
    let mut table = NodeTable::new(schema.clone());
    let mut skipped = 0usize;

    for case in &cases.rows {
        let Some(case_id) = case.submitter_id.as_deref() else {
            skipped += 1;
            continue;
        };
        for visit in plan.visits {
            let mut record = node_record(&table, NodeKind::FollowUp, ctx);
            record.set_str(SUBMITTER_ID_COLUMN, &format!("{case_id}{}", visit.offset));
            record.set_str(CASE_REFERENCE_COLUMN, case_id);
            record.set_str(
                DEMOGRAPHIC_REFERENCE_COLUMN,
                &format!("{case_id}{}", DEMOGRAPHIC_NODE.submitter_suffix),
            );
            record.set_str(DAYS_TO_FOLLOW_UP_COLUMN, visit.day());
            record.set_str(VISIT_DAY_COLUMN, visit.day());
            table.push(record);
        }
    }

    if skipped > 0 {
        tracing::debug!(rows = skipped, "case rows without *submitter_id skipped");
    }
    table
}

/// Indexes an auxiliary table by the id of the visit record each row feeds.
///
/// Rows whose visit label is not on the schedule, or that lack an id or a
/// label, are left out.
pub fn visit_index<'a>(
    source: &'a SourceTable,
    plan: &FollowUpPlan,
    ctx: &NodeContext<'_>,
) -> KeyIndex<'a> {
    let label = ctx.study_label();
    KeyIndex::build(source, |row| {
        let id = row.get(USUBJID_COLUMN)?;
        let visit = plan.offset_for(row.get(VISIT_LABEL_COLUMN)?)?;
        Some(format!(
            "{}{KEY_DELIMITER}{label}{}",
            subject_key(id),
            visit.offset
        ))
    })
}

/// Copies one auxiliary table's fields into the matching visit records.
///
/// Returns the number of records that matched.
pub fn join_auxiliary(
    table: &mut NodeTable,
    source: &SourceTable,
    spec: &AuxiliarySpec,
    plan: &FollowUpPlan,
    ctx: &NodeContext<'_>,
) -> Result<usize> {
    let name = spec.source.display_name();
    require_column(source, name, USUBJID_COLUMN)?;
    require_column(source, name, VISIT_LABEL_COLUMN)?;

    let index = visit_index(source, plan, ctx);
    let mut matched = 0usize;
    for record in &mut table.records {
        let Some(row) = record
            .get(SUBMITTER_ID_COLUMN)
            .and_then(|id| index.get(id))
        else {
            continue;
        };
        for rule in spec.fields {
            record.set(rule.target, rule.apply(row));
        }
        matched += 1;
    }

    tracing::debug!(
        source = name,
        rows = source.len(),
        visits = index.len(),
        duplicates = index.duplicates(),
        matched,
        "auxiliary table joined"
    );
    Ok(matched)
}

/// Builds the follow-up node from the case table and the auxiliary tables.
///
/// `sources` must hold a table for every auxiliary the plan joins; tables
/// the plan does not use are ignored. Visit records left without data are
/// moved to QC.
pub fn build_follow_up_node(
    cases: &CaseTable,
    sources: &[(AuxiliarySource, &SourceTable)],
    schema: &TemplateSchema,
    plan: &FollowUpPlan,
    ctx: &NodeContext<'_>,
) -> Result<NodeOutput> {
    let node = NodeKind::FollowUp.type_name();
    let mut table = materialize_visits(cases, schema, plan, ctx);
    tracing::debug!(node, records = table.len(), "visit records materialized");

    for spec in plan.auxiliaries {
        let source = sources
            .iter()
            .find(|(kind, _)| *kind == spec.source)
            .map(|(_, table)| *table)
            .ok_or(TransformError::MissingAuxiliary(spec.source))?;
        log_unmapped_targets(node, spec.fields, schema);
        join_auxiliary(&mut table, source, spec, plan, ctx)?;
    }

    for (kind, _) in sources {
        if !plan.uses(*kind) {
            tracing::debug!(
                source = kind.display_name(),
                "table not joined for {}",
                ctx.subjects
            );
        }
    }

    let (table, empty) = partition_empty(table, FOLLOW_UP_FIXED_COLUMNS, CASE_REFERENCE_COLUMN);
    let mut qc = QcTable::new(FOLLOW_UP_QC_LAYOUT);
    qc.extend(empty);
    tracing::debug!(node, records = table.len(), qc_records = qc.len(), "follow-up built");

    Ok(NodeOutput { table, qc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ardac_model::{QcReason, ReleaseConfig, SourceRow, SubjectsType};

    use crate::nodes::follow_up_plan;

    fn schema() -> TemplateSchema {
        let columns = [
            "*type",
            "project_id",
            "*submitter_id",
            "cases.submitter_id",
            "demographics.submitter_id",
            "*days_to_follow_up",
            "visit_day",
            "meld_score",
            "weight",
            "ascites_culture",
        ];
        TemplateSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    fn visit_table(rows: &[(&str, &str, &[(&str, &str)])]) -> SourceTable {
        let mut table = SourceTable::new(vec!["usubjid".into(), "redcap_event_name".into()]);
        for (id, label, values) in rows {
            let mut row = SourceRow::new()
                .with("usubjid", id)
                .with("redcap_event_name", label);
            for (column, value) in *values {
                row = row.with(column, value);
            }
            table.push_row(row);
        }
        table
    }

    fn empty_sources() -> Vec<(AuxiliarySource, SourceTable)> {
        AuxiliarySource::ALL
            .iter()
            .map(|kind| (*kind, visit_table(&[])))
            .collect()
    }

    fn borrowed(
        sources: &[(AuxiliarySource, SourceTable)],
    ) -> Vec<(AuxiliarySource, &SourceTable)> {
        sources.iter().map(|(kind, table)| (*kind, table)).collect()
    }

    const TWO_WEEKS: FollowUpPlan = FollowUpPlan {
        visits: &[
            crate::nodes::VisitOffset {
                label: "Week 0",
                offset: "_0",
            },
            crate::nodes::VisitOffset {
                label: "Week 4",
                offset: "_28",
            },
        ],
        auxiliaries: &[],
    };

    #[test]
    fn unmatched_visits_all_go_to_qc() {
        let release = ReleaseConfig::default();
        let ctx = NodeContext::new(SubjectsType::Observational, &release);
        let cases = CaseTable::from_ids(["123_obs"]);

        let table = materialize_visits(&cases, &schema(), &TWO_WEEKS, &ctx);
        assert_eq!(
            table.column_values("*submitter_id"),
            vec![Some("123_obs_0"), Some("123_obs_28")]
        );
        assert_eq!(table.column_values("visit_day"), vec![Some("0"), Some("28")]);
        assert_eq!(
            table.records[0].get("demographics.submitter_id"),
            Some("123_obs_demographic")
        );

        let output = build_follow_up_node(&cases, &[], &schema(), &TWO_WEEKS, &ctx).unwrap();
        assert!(output.table.is_empty());
        let qc: Vec<_> = output
            .qc
            .records
            .iter()
            .map(|r| (r.key.as_deref(), r.submitter_id.as_deref(), r.reason))
            .collect();
        assert_eq!(
            qc,
            vec![
                (Some("123"), Some("123_obs_0"), QcReason::Empty),
                (Some("123"), Some("123_obs_28"), QcReason::Empty),
            ]
        );
    }

    #[test]
    fn auxiliary_rows_land_on_their_visit() {
        let release = ReleaseConfig::default();
        let ctx = NodeContext::new(SubjectsType::Observational, &release);
        let plan = follow_up_plan(SubjectsType::Observational);
        let cases = CaseTable::from_ids(["123_obs", "124_obs"]);

        let mut sources = empty_sources();
        sources[0].1 = visit_table(&[
            ("123", "Week 4", &[("meld", "21")]),
            ("123", "Week 4", &[("meld", "99")]),
            ("123", "Screening", &[("meld", "5")]),
            ("124", "Week 24", &[("meld", "30")]),
        ]);
        sources[2].1 = visit_table(&[("123", "Week 4", &[("weight", "80.5")])]);

        let output =
            build_follow_up_node(&cases, &borrowed(&sources), &schema(), plan, &ctx).unwrap();

        assert_eq!(
            output.table.column_values("*submitter_id"),
            vec![Some("123_obs_28"), Some("124_obs_168")]
        );
        let week4 = &output.table.records[0];
        assert_eq!(week4.get("meld_score"), Some("21"));
        assert_eq!(week4.get("weight"), Some("80.5"));
        assert_eq!(week4.get("*days_to_follow_up"), Some("28"));
        assert_eq!(output.table.records[1].get("meld_score"), Some("30"));
        assert_eq!(output.qc.len(), 6);
    }

    #[test]
    fn later_table_overwrites_shared_column() {
        let release = ReleaseConfig::default();
        let ctx = NodeContext::new(SubjectsType::Observational, &release);
        let plan = follow_up_plan(SubjectsType::Observational);
        let cases = CaseTable::from_ids(["7_obs"]);

        let mut sources = empty_sources();
        sources[1].1 = visit_table(&[
            ("7", "Week 0", &[("ascyn", "1")]),
            ("7", "Week 12", &[("ascyn", "0")]),
        ]);
        sources[3].1 = visit_table(&[("7", "Week 0", &[("socisacnd___999", "Not done")])]);

        let output =
            build_follow_up_node(&cases, &borrowed(&sources), &schema(), plan, &ctx).unwrap();

        let values = output.table.column_values("ascites_culture");
        assert_eq!(values, vec![Some("Not done"), Some("0")]);
    }

    #[test]
    fn clinical_plan_ignores_medical_info() {
        let release = ReleaseConfig::default();
        let ctx = NodeContext::new(SubjectsType::Clinical, &release);
        let plan = follow_up_plan(SubjectsType::Clinical);
        let cases = CaseTable::from_ids(["9_clinical"]);

        let mut sources = empty_sources();
        sources[1].1 = visit_table(&[("9", "Day 3", &[("ascyn", "1")])]);
        sources[2].1 = visit_table(&[("9", "Day 14", &[("weight", "70")])]);

        let output =
            build_follow_up_node(&cases, &borrowed(&sources), &schema(), plan, &ctx).unwrap();

        assert_eq!(
            output.table.column_values("*submitter_id"),
            vec![Some("9_clinical_14")]
        );
        assert_eq!(output.qc.len(), 7);
    }

    #[test]
    fn missing_auxiliary_is_an_error() {
        let release = ReleaseConfig::default();
        let ctx = NodeContext::new(SubjectsType::Observational, &release);
        let plan = follow_up_plan(SubjectsType::Observational);
        let err = build_follow_up_node(&CaseTable::default(), &[], &schema(), plan, &ctx)
            .unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingAuxiliary(AuxiliarySource::LiverScores)
        ));
    }

    #[test]
    fn auxiliary_without_visit_label_is_an_error() {
        let release = ReleaseConfig::default();
        let ctx = NodeContext::new(SubjectsType::Observational, &release);
        let plan = follow_up_plan(SubjectsType::Observational);
        let mut table = materialize_visits(&CaseTable::from_ids(["1_obs"]), &schema(), plan, &ctx);
        let source = SourceTable::new(vec!["usubjid".into()]);
        let err =
            join_auxiliary(&mut table, &source, &plan.auxiliaries[2], plan, &ctx).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingColumn { ref column, .. } if column == "redcap_event_name"
        ));
    }
}
