use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use ardac_cli::pipeline::{FollowUpInputs, NodeInputs, RunContext, run_node};
use ardac_cli::types::NodeRunSummary;
use ardac_model::ReleaseConfig;

use crate::cli::{Cli, Command, NodeArgs, VersionArgs};

/// What a successful command produced.
pub enum CommandOutcome {
    Node(NodeRunSummary),
    Printed,
}

pub fn release_from_cli(cli: &Cli) -> ReleaseConfig {
    ReleaseConfig::default()
        .with_dcc_release(cli.dcc_release.clone())
        .with_mapping_version(cli.mapping_version.clone())
}

pub fn run_command(cli: &Cli) -> Result<CommandOutcome> {
    let release = release_from_cli(cli);
    let (node, inputs) = match &cli.command {
        Command::Version(args) => {
            println!("{}", version_line(&release, args));
            return Ok(CommandOutcome::Printed);
        }
        Command::Case(args) => (
            &args.node,
            NodeInputs::Case {
                subjects_file: args.dcc_subjects_file.clone(),
            },
        ),
        Command::Audit(args) => (
            &args.node,
            NodeInputs::Audit {
                audit_file: args.dcc_audit_file.clone(),
            },
        ),
        Command::Demographic(args) => (
            &args.node,
            NodeInputs::Demographic {
                subjects_file: args.dcc_subjects_file.clone(),
            },
        ),
        Command::FollowUp(args) => (
            &args.node,
            NodeInputs::FollowUp(FollowUpInputs {
                liver_scores: args.dcc_liver_scores_file.clone(),
                medical_info: args.dcc_med_info_file.clone(),
                vitals: args.dcc_vitals_file.clone(),
                standard_of_care: args.dcc_soc_file.clone(),
                soc_from_vitals: args.soc_from_vitals,
            }),
        ),
    };
    let ctx = run_context(node, release);
    let summary = run_node(&ctx, &inputs)?;
    if let Some(path) = &cli.summary_json {
        write_summary_json(&summary, path)?;
    }
    Ok(CommandOutcome::Node(summary))
}

fn run_context(args: &NodeArgs, release: ReleaseConfig) -> RunContext {
    RunContext {
        subjects: args.subjects_type,
        release,
        templates_dir: args.node_templates_path.clone(),
        output_dir: args.node_output_path.clone(),
    }
}

fn version_line(release: &ReleaseConfig, args: &VersionArgs) -> String {
    if args.dcc {
        release.dcc_release_string()
    } else if args.mapping {
        release.mapping_version_string()
    } else {
        release.version_string()
    }
}

fn write_summary_json(summary: &NodeRunSummary, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create summary {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .with_context(|| format!("write summary {}", path.display()))?;
    Ok(())
}
