//! CLI argument definitions for the ARDaC node mapper.

use std::path::PathBuf;

use ardac_cli::logging::LogFormat;
use ardac_model::{DEFAULT_DCC_RELEASE, DEFAULT_MAPPING_VERSION, SubjectsType};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "ardac-mapper",
    version,
    about = "Map DCC data extracts to ARDaC node files",
    long_about = "Map observational or clinical trial DCC data extracts (CSV) to ARDaC \
                  node files (TSV).\n\n\
                  Run `case` first: the audit, demographic and follow-up nodes read the \
                  case node file from the node output directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(
        long = "log-level",
        alias = "log_level",
        value_enum,
        ignore_case = true,
        global = true
    )]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// DCC data release the node files are named for.
    #[arg(
        long = "dcc-release",
        value_name = "VERSION",
        default_value = DEFAULT_DCC_RELEASE,
        global = true
    )]
    pub dcc_release: String,

    /// Version of the mapping rules.
    #[arg(
        long = "mapping-version",
        value_name = "VERSION",
        default_value = DEFAULT_MAPPING_VERSION,
        global = true
    )]
    pub mapping_version: String,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH", global = true)]
    pub summary_json: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the case node from a DCC subjects file.
    Case(CaseArgs),

    /// Generate the audit node and its QC file.
    Audit(AuditArgs),

    /// Generate the demographic node and its QC file.
    Demographic(DemographicArgs),

    /// Generate the follow-up node and its QC file.
    #[command(name = "follow-up", alias = "follow_up")]
    FollowUp(FollowUpArgs),

    /// Print the DCC release and mapping version.
    Version(VersionArgs),
}

/// Arguments every node command takes.
#[derive(Args)]
pub struct NodeArgs {
    /// Directory holding the ARDaC node template TSV files.
    #[arg(long = "node-templates-path", alias = "node_templates_path", value_name = "DIR")]
    pub node_templates_path: PathBuf,

    /// Whether the DCC data comes from observational study or clinical trial subjects.
    #[arg(long = "subjects-type", alias = "subjects_type", value_name = "TYPE")]
    pub subjects_type: SubjectsType,

    /// Directory node and QC files are written to. Also holds the case node
    /// file the other nodes read.
    #[arg(long = "node-output-path", alias = "node_output_path", value_name = "DIR")]
    pub node_output_path: PathBuf,
}

#[derive(Args)]
pub struct CaseArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// DCC subjects file (CSV).
    #[arg(long = "dcc-subjects-file", alias = "dcc_subjects_file", value_name = "PATH")]
    pub dcc_subjects_file: PathBuf,
}

#[derive(Args)]
pub struct AuditArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// DCC audit file (CSV).
    #[arg(long = "dcc-audit-file", alias = "dcc_audit_file", value_name = "PATH")]
    pub dcc_audit_file: PathBuf,
}

#[derive(Args)]
pub struct DemographicArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// DCC subjects file (CSV).
    #[arg(long = "dcc-subjects-file", alias = "dcc_subjects_file", value_name = "PATH")]
    pub dcc_subjects_file: PathBuf,
}

#[derive(Args)]
pub struct FollowUpArgs {
    #[command(flatten)]
    pub node: NodeArgs,

    /// DCC liver scores file (CSV).
    #[arg(
        long = "dcc-liver-scores-file",
        alias = "dcc_liver_scores_file",
        value_name = "PATH"
    )]
    pub dcc_liver_scores_file: PathBuf,

    /// DCC medical information file (CSV). Not joined for clinical subjects.
    #[arg(long = "dcc-med-info-file", alias = "dcc_med_info_file", value_name = "PATH")]
    pub dcc_med_info_file: PathBuf,

    /// DCC vitals file (CSV).
    #[arg(long = "dcc-vitals-file", alias = "dcc_vitals_file", value_name = "PATH")]
    pub dcc_vitals_file: PathBuf,

    /// DCC standard of care file (CSV).
    #[arg(long = "dcc-soc-file", alias = "dcc_soc_file", value_name = "PATH")]
    pub dcc_soc_file: PathBuf,

    /// Read standard of care columns from the vitals file instead of the SOC file.
    ///
    /// Reproduces the output of the legacy mapper, which read the vitals file
    /// for this join.
    #[arg(long = "soc-from-vitals")]
    pub soc_from_vitals: bool,
}

#[derive(Args)]
pub struct VersionArgs {
    /// Print only the DCC release string.
    #[arg(long = "dcc", conflicts_with = "mapping")]
    pub dcc: bool,

    /// Print only the mapping version string.
    #[arg(long = "mapping")]
    pub mapping: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    #[value(alias = "critical")]
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
