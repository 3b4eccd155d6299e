mod cli;

use cli::Args;
use resgraph::adapters::outbound::console::StderrProgressReporter;
use resgraph::adapters::outbound::filesystem::FileSystemReader;
use resgraph::application::dto::ExploreRequest;
use resgraph::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use resgraph::application::use_cases::ExploreInventoryUseCase;
use resgraph::config::{self, ConfigFile};
use resgraph::inventory::domain::{FilterDimension, FilterState};
use resgraph::ports::outbound::ProgressReporter;
use resgraph::shared::error::ExitCode;
use resgraph::shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // clap exits with code 2 on usage errors
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

/// Diagnostics go to stderr; `--verbose` forces debug for this crate
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("resgraph=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let progress_reporter = StderrProgressReporter::new().quiet(args.quiet);

    // Load configuration: explicit path, or auto-discovery in the working directory
    let config_file = load_config(&args)?;
    for warning in config::unknown_field_warnings(&config_file) {
        progress_reporter.report_warning(&warning);
    }

    // Merge: command-line values override configured ones
    let format = args.format.or(config_file.format).unwrap_or_default();
    let view = args.view.or(config_file.view).unwrap_or_default();
    let request = build_request(&args, &config_file);

    // Create use case with injected dependencies
    let use_case = ExploreInventoryUseCase::new(FileSystemReader::new(), &progress_reporter);
    let response = use_case.execute(request)?;

    progress_reporter.report(FormatterFactory::progress_message(format));
    let formatter = FormatterFactory::create(format);
    let rendered = formatter.format(&response.read_model, view)?;

    let presenter_type = PresenterType::from_output(args.output.clone());
    let presenter = PresenterFactory::create(presenter_type.clone());
    presenter.present(&rendered)?;

    if let PresenterType::File(path) = presenter_type {
        progress_reporter.report_completion(&format!("✅ Output complete: {}", path.display()));
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    match &args.config {
        Some(path) => config::load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(config::discover_config(&cwd)?.unwrap_or_default())
        }
    }
}

/// Configured filters come first so that command-line expressions, applied
/// later, replace them dimension by dimension. The configured name pattern
/// applies only when the command line sets no name filter at all.
fn build_request(args: &Args, config: &ConfigFile) -> ExploreRequest {
    let mut filter_expressions = config
        .filters
        .as_ref()
        .map(|filters| filters.to_expressions())
        .unwrap_or_default();
    filter_expressions.extend(args.filters.iter().cloned());

    let cli_sets_name = args.name.is_some()
        || args.filters.iter().any(|expression| {
            FilterState::parse_expression(expression)
                .is_ok_and(|(dimension, _)| dimension == FilterDimension::Name)
        });
    let name_pattern = if cli_sets_name {
        args.name.clone()
    } else {
        config
            .filters
            .as_ref()
            .and_then(|filters| filters.name.clone())
    };

    let case_insensitive_ids =
        args.case_insensitive_ids || config.case_insensitive_ids.unwrap_or(false);

    ExploreRequest::new(args.snapshot.clone())
        .with_filters(filter_expressions)
        .with_name_pattern(name_pattern)
        .with_selection(args.select.clone())
        .with_case_insensitive_ids(case_insensitive_ids)
}
