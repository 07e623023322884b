use clap::Parser;
use std::process;
use unfollowcheck::{
    CheckOptions, Cli, OutputFormatter, OutputMode, SystemBrowser, UnfollowChecker, UnfollowError,
    UserFriendlyError,
};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(cli.verbosity_level());

    if let Err(e) = cli.validate() {
        print_startup_error(&e);
        return e.exit_code();
    }

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let checker = match UnfollowChecker::from_cli(&cli) {
        Ok(checker) => checker,
        Err(e) => {
            print_startup_error(&e);
            return e.exit_code();
        }
    };

    let archive = match cli.archive_path() {
        Ok(path) => path.clone(),
        Err(e) => {
            checker.handle_error(&e);
            return e.exit_code();
        }
    };

    if cli.dry_run {
        return handle_dry_run(&checker, &archive);
    }

    let report = match checker.check(&archive, &CheckOptions::from_cli(&cli)).await {
        Ok(report) => report,
        Err(e) => {
            checker.handle_error(&e);
            return e.exit_code();
        }
    };

    if cli.browse {
        return match checker.browse(&report, SystemBrowser) {
            Ok(model) => {
                log::info!("Viewer closed with {} entries", model.len());
                0
            }
            Err(e) => {
                checker.handle_error(&e);
                e.exit_code()
            }
        };
    }

    checker.output_formatter().print_check_report(&report);
    0
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "unfollowcheck.toml".to_string());

    match UnfollowChecker::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  unfollowcheck <archive.zip> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(checker: &UnfollowChecker, archive: &std::path::Path) -> i32 {
    // Dry run output is the point of the invocation, so it ignores --verbose
    let formatter = OutputFormatter::new(checker.output_formatter().mode(), 1, false);
    let config = checker.config();

    formatter.info("DRY RUN MODE - nothing will be extracted or saved");
    formatter.print_separator();

    let plan = match checker.plan(archive) {
        Ok(plan) => plan,
        Err(e) => {
            checker.handle_error(&e);
            return e.exit_code();
        }
    };

    println!("  Archive: {} ({} entries)", archive.display(), plan.entry_count);
    println!("  Extract to: {}", plan.extract_dir.display());
    println!(
        "  Following list: {} [{}]",
        config.archive.following_path.display(),
        if plan.following_present { "found" } else { "missing" }
    );
    println!(
        "  Followers list: {} [{}]",
        config.archive.followers_path.display(),
        if plan.followers_present { "found" } else { "missing" }
    );
    println!("  Username marker: {}", config.parser.marker);
    println!("  Results directory: {}", config.output.results_dir.display());

    formatter.print_separator();

    if plan.is_complete() {
        formatter.success("Archive has the expected layout");
        0
    } else {
        formatter.error("The archive is missing one of the username lists");
        formatter.warning("Request the export in HTML format, or adjust [archive] in your config.");
        4
    }
}

fn print_startup_error(error: &UnfollowError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "unfollowcheck=warn",
        1 => "unfollowcheck=info",
        _ => "unfollowcheck=debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
