//! Node pipelines: check inputs, read, build, write.
//!
//! Every input path is checked before anything is read, and nothing is
//! written until the node and its QC table are fully built, so a failed run
//! leaves the output directory untouched.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ardac_ingest::{
    COMMA, load_template, read_case_table, read_source_table, require_dir, require_file,
};
use ardac_model::{
    CaseTable, NodeKind, ReleaseConfig, SourceTable, SubjectsType, TemplateSchema,
};
use ardac_output::{write_node_outputs, write_node_table};
use ardac_transform::{
    AUDIT_NODE, AuxiliarySource, DEMOGRAPHIC_NODE, LinkedNodeSpec, NodeContext, NodeOutput,
    build_case_node, build_follow_up_node, follow_up_plan, reconcile,
};
use tracing::{debug, info, info_span, warn};

use crate::types::NodeRunSummary;

/// Settings shared by every node run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub subjects: SubjectsType,
    pub release: ReleaseConfig,
    /// Directory holding the `submission_<node>_template.tsv` files.
    pub templates_dir: PathBuf,
    /// Directory node files are written to; also holds the case node input.
    pub output_dir: PathBuf,
}

impl RunContext {
    pub fn template_path(&self, kind: NodeKind) -> PathBuf {
        self.templates_dir.join(self.release.template_file_name(kind))
    }

    pub fn node_path(&self, kind: NodeKind) -> PathBuf {
        self.output_dir
            .join(self.release.node_file_name(kind, self.subjects))
    }

    pub fn qc_path(&self, kind: NodeKind) -> PathBuf {
        self.output_dir
            .join(self.release.qc_file_name(kind, self.subjects))
    }

    /// Case node written by an earlier `case` run.
    pub fn case_node_path(&self) -> PathBuf {
        self.node_path(NodeKind::Case)
    }

    fn node_context(&self) -> NodeContext<'_> {
        NodeContext::new(self.subjects, &self.release)
    }
}

/// DCC tables read by the follow-up node.
#[derive(Debug, Clone)]
pub struct FollowUpInputs {
    pub liver_scores: PathBuf,
    pub medical_info: PathBuf,
    pub vitals: PathBuf,
    pub standard_of_care: PathBuf,
    /// Read standard-of-care columns from the vitals file, as the legacy
    /// mapper did.
    pub soc_from_vitals: bool,
}

impl FollowUpInputs {
    fn path(&self, source: AuxiliarySource) -> &Path {
        match source {
            AuxiliarySource::LiverScores => self.liver_scores.as_path(),
            AuxiliarySource::MedicalInfo => self.medical_info.as_path(),
            AuxiliarySource::Vitals => self.vitals.as_path(),
            AuxiliarySource::StandardOfCare if self.soc_from_vitals => self.vitals.as_path(),
            AuxiliarySource::StandardOfCare => self.standard_of_care.as_path(),
        }
    }
}

/// DCC inputs of one node run.
#[derive(Debug, Clone)]
pub enum NodeInputs {
    Case { subjects_file: PathBuf },
    Audit { audit_file: PathBuf },
    Demographic { subjects_file: PathBuf },
    FollowUp(FollowUpInputs),
}

impl NodeInputs {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Case { .. } => NodeKind::Case,
            Self::Audit { .. } => NodeKind::Audit,
            Self::Demographic { .. } => NodeKind::Demographic,
            Self::FollowUp(_) => NodeKind::FollowUp,
        }
    }

    /// DCC files, in the order they are checked.
    pub fn dcc_files(&self) -> Vec<&Path> {
        match self {
            Self::Case { subjects_file } | Self::Demographic { subjects_file } => {
                vec![subjects_file.as_path()]
            }
            Self::Audit { audit_file } => vec![audit_file.as_path()],
            Self::FollowUp(inputs) => vec![
                inputs.liver_scores.as_path(),
                inputs.medical_info.as_path(),
                inputs.vitals.as_path(),
                inputs.standard_of_care.as_path(),
            ],
        }
    }
}

/// Checks every input of a run: template, DCC files, output directory and,
/// for nodes linked to cases, the case node file.
pub fn check_inputs(ctx: &RunContext, inputs: &NodeInputs) -> Result<()> {
    let kind = inputs.kind();
    let template = ctx.template_path(kind);
    require_file(&template)
        .with_context(|| format!("cannot find {} template", kind.display_name()))?;
    for path in inputs.dcc_files() {
        require_file(path).context("cannot find DCC input file")?;
    }
    require_dir(&ctx.output_dir).context("cannot find node output directory")?;
    if kind != NodeKind::Case {
        require_file(&ctx.case_node_path()).context("cannot find ARDaC case node file")?;
    }
    Ok(())
}

/// Runs one node pipeline end to end.
pub fn run_node(ctx: &RunContext, inputs: &NodeInputs) -> Result<NodeRunSummary> {
    let kind = inputs.kind();
    let span = info_span!("node", node = kind.type_name(), subjects = %ctx.subjects);
    let _guard = span.enter();
    let start = Instant::now();

    check_inputs(ctx, inputs)?;
    let schema = load_template(&ctx.template_path(kind))
        .with_context(|| format!("load {} template", kind.display_name()))?;
    info!("transforming {} {} data", ctx.subjects, kind.display_name());

    let node_file = ctx.node_path(kind);
    let (records, qc_records) = match inputs {
        NodeInputs::Case { subjects_file } => {
            let subjects = read_dcc_table(subjects_file)?;
            let table = build_case_node(&subjects, &schema, &ctx.node_context())
                .context("build case node")?;
            write_node_table(&table, &node_file)?;
            (table.len(), None)
        }
        NodeInputs::Audit { audit_file } => {
            let output = run_linked(ctx, &AUDIT_NODE, audit_file, &schema)?;
            write_outputs(ctx, kind, &output)?
        }
        NodeInputs::Demographic { subjects_file } => {
            let output = run_linked(ctx, &DEMOGRAPHIC_NODE, subjects_file, &schema)?;
            write_outputs(ctx, kind, &output)?
        }
        NodeInputs::FollowUp(follow_up) => {
            let output = run_follow_up(ctx, follow_up, &schema)?;
            write_outputs(ctx, kind, &output)?
        }
    };

    let summary = NodeRunSummary {
        node: kind,
        subjects: ctx.subjects,
        dcc_release: ctx.release.dcc_release_string(),
        records,
        qc_records,
        node_file,
        qc_file: qc_records.map(|_| ctx.qc_path(kind)),
        duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    info!(
        records = summary.records,
        qc_records = summary.qc_records.unwrap_or(0),
        duration_ms = summary.duration_ms,
        "node complete"
    );
    Ok(summary)
}

fn read_dcc_table(path: &Path) -> Result<SourceTable> {
    read_source_table(path, COMMA).with_context(|| format!("read {}", path.display()))
}

fn read_cases(ctx: &RunContext) -> Result<CaseTable> {
    let path = ctx.case_node_path();
    let cases = read_case_table(&path).with_context(|| format!("read {}", path.display()))?;
    let missing = cases.rows.iter().filter(|row| row.key.is_none()).count();
    if missing > 0 {
        warn!(rows = missing, "case rows without *submitter_id");
    }
    Ok(cases)
}

fn run_linked(
    ctx: &RunContext,
    spec: &LinkedNodeSpec,
    source_path: &Path,
    schema: &TemplateSchema,
) -> Result<NodeOutput> {
    let source = read_dcc_table(source_path)?;
    let cases = read_cases(ctx)?;
    reconcile(&cases, &source, schema, spec, &ctx.node_context())
        .with_context(|| format!("build {} node", spec.kind.display_name()))
}

fn run_follow_up(
    ctx: &RunContext,
    inputs: &FollowUpInputs,
    schema: &TemplateSchema,
) -> Result<NodeOutput> {
    let plan = follow_up_plan(ctx.subjects);
    if inputs.soc_from_vitals {
        warn!(
            path = %inputs.vitals.display(),
            "reading standard of care columns from the vitals file"
        );
    } else {
        debug!(
            path = %inputs.standard_of_care.display(),
            "standard of care read from its own file, not from vitals as in the legacy mapper"
        );
    }

    let mut tables = Vec::new();
    for source in AuxiliarySource::ALL {
        if plan.uses(source) {
            tables.push((source, read_dcc_table(inputs.path(source))?));
        } else {
            debug!(
                source = source.display_name(),
                "not joined for {} subjects, file not read",
                ctx.subjects
            );
        }
    }
    let cases = read_cases(ctx)?;

    let sources: Vec<(AuxiliarySource, &SourceTable)> =
        tables.iter().map(|(source, table)| (*source, table)).collect();
    build_follow_up_node(&cases, &sources, schema, plan, &ctx.node_context())
        .context("build follow-up node")
}

/// Writes the node and QC files together; returns their record counts.
fn write_outputs(
    ctx: &RunContext,
    kind: NodeKind,
    output: &NodeOutput,
) -> Result<(usize, Option<usize>)> {
    write_node_outputs(
        &output.table,
        &ctx.node_path(kind),
        &output.qc,
        &ctx.qc_path(kind),
    )?;
    Ok((output.table.len(), Some(output.qc.len())))
}
