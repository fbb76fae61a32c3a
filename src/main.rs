//! Cabinet CLI - compare and single-object deploy companion for NetSuite SDF projects
//!
//! Usage: cabinet <COMMAND>
//!
//! Commands:
//!   compare        Diff a local file against its File Cabinet copy
//!   deploy-object  Deploy a single SDF object via a narrowed deploy.xml
//!   version        Show version information

mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use cabinet::config::CONFIG_FILE;
use cabinet::ui::theme;
use cabinet::{
    run_compare, run_deploy_object, CabinetError, CabinetResult, CompareOptions, Config,
    ConfigWarning, DeployOptions, JsonSink, Report, ReportSink, SuiteCloudCli, TextSink,
};
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let sink: Box<dyn ReportSink> = if cli.json {
        Box::new(JsonSink::stdout())
    } else {
        Box::new(TextSink::auto(cli.verbose))
    };

    let (command, result) = match &cli.command {
        Commands::Compare { file, keep } => (
            "compare",
            cmd_compare(file, *keep, sink.as_ref(), cli.json),
        ),
        Commands::DeployObject { file, dry_run } => (
            "deploy-object",
            cmd_deploy_object(file, *dry_run, sink.as_ref(), cli.json),
        ),
        Commands::Version => ("version", cmd_version(cli.json)),
    };

    if let Err(err) = result {
        sink.emit(Report::Failed {
            command: command.to_string(),
            message: err.to_string(),
        });
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_compare(file: &Path, keep: bool, sink: &dyn ReportSink, json: bool) -> CabinetResult<()> {
    let document = resolve_document(file)?;
    let project_root = cabinet::paths::compare_project_root(&document);
    let tool = load_tool(&project_root, json)?;

    let options = CompareOptions {
        keep_remote_copy: keep,
    };
    run_compare(&document, &tool, sink, &options)?;
    Ok(())
}

fn cmd_deploy_object(
    file: &Path,
    dry_run: bool,
    sink: &dyn ReportSink,
    json: bool,
) -> CabinetResult<()> {
    let document = resolve_document(file)?;

    // Not an object file: quiet no-op, decided before the tool is even
    // looked up so a missing binary cannot turn the skip into a failure.
    let Some(project_root) = cabinet::paths::object_project_root(&document) else {
        sink.emit(Report::ObjectSkipped { document });
        return Ok(());
    };

    let tool = load_tool(&project_root, json)?;

    run_deploy_object(&document, &tool, sink, &DeployOptions { dry_run })?;
    Ok(())
}

fn cmd_version(json: bool) -> CabinetResult<()> {
    let (config, _) = Config::load(Path::new("."))?;
    let available = SuiteCloudCli::check_available(&config.suitecloud.binary);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "name": "cabinet",
                "version": env!("CARGO_PKG_VERSION"),
                "suitecloud": config.suitecloud.binary,
                "suitecloud_available": available,
            })
        );
    } else {
        println!("cabinet {}", env!("CARGO_PKG_VERSION"));
        println!(
            "suitecloud binary: {} ({})",
            config.suitecloud.binary,
            if available { "available" } else { "not found" }
        );
    }
    Ok(())
}

/// Resolve the command-line path to an absolute document path.
///
/// The marker-based derivations need the full path, not whatever relative
/// form the shell handed us.
fn resolve_document(file: &Path) -> CabinetResult<PathBuf> {
    file.canonicalize()
        .map_err(|_| CabinetError::DocumentNotFound {
            path: file.to_path_buf(),
        })
}

/// Load project config and build the SuiteCloud runner, checking that the
/// binary is actually spawnable before any file gets renamed.
fn load_tool(project_root: &Path, json: bool) -> CabinetResult<SuiteCloudCli> {
    use cabinet::suitecloud::SdfTool;

    let (config, warnings) = Config::load(project_root)?;
    if !json {
        print_config_warnings(&project_root.join(CONFIG_FILE), &warnings);
    }

    let tool = SuiteCloudCli::from_config(&config);
    if !tool.is_available() {
        return Err(CabinetError::ToolNotFound {
            binary: tool.name().to_string(),
        });
    }
    Ok(tool)
}

fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        eprintln!(
            "{} Unknown config key '{}' in {}",
            theme::icons::WARNING,
            w.key,
            path.display()
        );
    }
}
