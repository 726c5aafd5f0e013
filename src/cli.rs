/// CLI argument definitions for the `rastro` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::deadcode::DeadKind;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(
    name = "rastro",
    version,
    about = "Repository reports: contributors, churn, dead code, security and compliance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Common arguments shared by the analysis commands.
#[derive(Args)]
pub struct CommonArgs {
    /// Repository to analyze (default: current directory)
    pub path: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Configuration file (default: <path>/rastro.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the full repository report
    #[command(long_about = "\
Build the full repository report.

Runs every analysis over the repository and prints one Markdown document
(or a single JSON object with --json): commit activity, technology stack,
commit kinds, contributor expertise with an area heatmap, file churn,
architecture inventory, dead-code candidates, security findings and
compliance indicators.

A short summary is produced by the command configured as
`summary_command` (the prompt is written to its stdin). Without one, or
when it fails, a summary is derived from the report itself.

A section that fails to compute is logged and left empty; only a
missing repository or a bad configuration aborts the run.")]
    Report {
        #[command(flatten)]
        common: CommonArgs,

        /// Only consider recent commits (e.g. 30d, 6m, 1y)
        #[arg(long)]
        since: Option<String>,

        /// Commits per contributor to classify (overrides history_depth)
        #[arg(long)]
        depth: Option<usize>,

        /// Skip the summary command and use the built-in summary
        #[arg(long)]
        no_summary: bool,
    },

    /// Profile contributor expertise from commit history
    #[command(long_about = "\
Profile contributor expertise from commit history.

Each author's most recent commits (up to --depth) are classified by the
words in their subject lines and by the paths they touch. A commit can
count towards several areas, and subject and file signals add up.

Columns:
  Commits  total commits by the author
  Focus    derived from the most-touched file extension
  Areas    the two directories the author works in most
  Radar    share of classified signals per expertise area")]
    Contributors {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of contributors to show
        #[arg(long, default_value = "20")]
        top: usize,

        /// Only consider recent commits (e.g. 30d, 6m, 1y)
        #[arg(long)]
        since: Option<String>,

        /// Commits per contributor to classify (overrides history_depth)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Rank files by how often they change
    Churn {
        #[command(flatten)]
        common: CommonArgs,

        /// Number of files to show (default: churn_top from config)
        #[arg(long)]
        top: Option<usize>,

        /// Only consider recent commits (e.g. 30d, 6m, 1y)
        #[arg(long)]
        since: Option<String>,
    },

    /// Find components, files and exports nothing references
    #[command(long_about = "\
Find components, files and exports nothing references.

A candidate is reported when its name appears in none of the import or
usage lines of the project. Entry points, framework-routed files, hooks,
configuration files, tests and very short names are never reported.

The lines searched are capped by occurrence_cap; when the cap is hit a
warning is logged and some dead code may go unreported. Results are
candidates for review, not proof.")]
    Deadcode {
        #[command(flatten)]
        common: CommonArgs,

        /// Only run one kind of check (default: all)
        #[arg(long, value_enum)]
        kind: Option<DeadKind>,

        /// Number of candidates to show
        #[arg(long, default_value = "50")]
        top: usize,
    },

    /// Check for common compliance artifacts
    #[command(long_about = "\
Check for common compliance artifacts.

Looks for evidence of privacy policies, terms of service, cookie consent,
data retention, data encryption, access control and audit logging, in
file names and in source/doc content. The score is the percentage of
categories with at least one piece of evidence.")]
    Compliance {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Scan for hardcoded secrets, injection patterns and exposed files
    Security {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
