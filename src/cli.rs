use clap::Parser;
use resgraph::application::dto::{OutputFormat, ViewKind};
use std::path::PathBuf;

/// Explore a cloud inventory snapshot as a resource dependency graph
#[derive(Parser, Debug)]
#[command(name = "resgraph")]
#[command(version)]
#[command(
    about = "Explore a cloud inventory snapshot as a resource dependency graph",
    long_about = None
)]
pub struct Args {
    /// Path to the inventory snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// View to render: summary, explorer, topology, security, edges or all
    #[arg(short, long)]
    pub view: Option<ViewKind>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Filter as DIMENSION=VALUE[,VALUE...]
    /// (dimensions: resourceGroup, type, location, category, name).
    /// Can be specified multiple times: --filter rg=rg-prod --filter location=eastus
    #[arg(short = 'F', long = "filter", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Name pattern (supports wildcards: *; plain text matches anywhere in the name)
    #[arg(short, long, value_name = "PATTERN")]
    pub name: Option<String>,

    /// Resource id to select; its one-hop neighbors are included in the output
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./resgraph.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Match embedded resource ids against the snapshot ignoring case
    #[arg(long)]
    pub case_insensitive_ids: bool,

    /// Only print warnings and errors to stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print debug diagnostics (dangling references, skipped records) to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_minimal_args() {
        let args = Args::try_parse_from(["resgraph", "--snapshot", "inventory.json"]).unwrap();
        assert_eq!(args.snapshot, PathBuf::from("inventory.json"));
        assert!(args.view.is_none());
        assert!(args.format.is_none());
        assert!(args.filters.is_empty());
        assert!(!args.case_insensitive_ids);
    }

    #[test]
    fn test_full_args() {
        let args = Args::try_parse_from([
            "resgraph",
            "-s",
            "inventory.json",
            "--view",
            "topology",
            "-f",
            "md",
            "-F",
            "rg=rg-prod",
            "--filter",
            "location=eastus,westus",
            "--name",
            "web-*",
            "--select",
            "/subscriptions/s/vm",
            "-o",
            "out.md",
            "--case-insensitive-ids",
        ])
        .unwrap();

        assert_eq!(args.view, Some(ViewKind::Topology));
        assert_eq!(args.format, Some(OutputFormat::Markdown));
        assert_eq!(args.filters, vec!["rg=rg-prod", "location=eastus,westus"]);
        assert_eq!(args.name.as_deref(), Some("web-*"));
        assert_eq!(args.select.as_deref(), Some("/subscriptions/s/vm"));
        assert_eq!(args.output, Some(PathBuf::from("out.md")));
        assert!(args.case_insensitive_ids);
    }

    #[test]
    fn test_snapshot_is_required() {
        let err = Args::try_parse_from(["resgraph"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_invalid_view_rejected() {
        let err =
            Args::try_parse_from(["resgraph", "-s", "x.json", "--view", "graph"]).unwrap_err();
        assert!(err.to_string().contains("Invalid view"));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result =
            Args::try_parse_from(["resgraph", "-s", "x.json", "--quiet", "--verbose"]);
        assert!(result.is_err());
    }
}
