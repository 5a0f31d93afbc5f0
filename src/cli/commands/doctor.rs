//! CLI command for `fwtask doctor`
//!
//! Checks the external tools and reports issues with suggestions. Works
//! outside a project with the default tool names.

use std::path::Path;

use anyhow::Result;

use super::project_root;
use crate::cli::output::{
    diagnostic_writer, is_json, is_quiet, print_detail, print_info, print_success, print_warning,
    status,
};
use crate::core::config::ToolsConfig;
use crate::core::doctor::run_doctor;
use crate::core::project::Project;

/// Execute the doctor command
pub fn execute(project_dir: Option<&Path>) -> Result<()> {
    let tools = match project_root(project_dir) {
        Ok(root) => Project::load(&root, &mut diagnostic_writer())?
            .config()
            .tools
            .clone(),
        Err(e) => {
            tracing::debug!("Using default tools: {e}");
            ToolsConfig::default()
        }
    };
    let report = run_doctor(&tools);

    // JSON output mode
    if is_json() {
        let json_result = serde_json::json!({
            "status": if report.all_passed() { "success" } else if report.all_required_passed() { "warning" } else { "error" },
            "checks": report.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "program": c.program,
                "passed": c.passed(),
                "required": c.required,
                "path": c.path,
                "suggestion": c.suggestion
            })).collect::<Vec<_>>(),
            "passed_count": report.passed_count(),
            "total_count": report.checks.len()
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);

        if !report.all_required_passed() {
            anyhow::bail!("Missing required tools");
        }
        return Ok(());
    }

    // Quiet mode - only show errors
    if is_quiet() {
        let failed_required = report.failed_required();
        if !failed_required.is_empty() {
            for check in failed_required {
                eprintln!("{} Missing required: {}", status::ERROR, check.program);
            }
            anyhow::bail!("Missing required tools");
        }
        return Ok(());
    }

    print_info("Checking external tools...");
    println!();

    for check in &report.checks {
        let required_str = if check.required { "" } else { " [optional]" };
        match &check.path {
            Some(path) => println!(
                "  {} {} ({}){required_str}",
                status::SUCCESS,
                check.name,
                path.display()
            ),
            None => {
                println!(
                    "  {} {}: '{}' not found{required_str}",
                    status::ERROR,
                    check.name,
                    check.program
                );
                if let Some(suggestion) = &check.suggestion {
                    print_detail(&format!("Suggestion: {suggestion}"));
                }
            }
        }
    }

    println!();
    let passed = report.passed_count();
    let total = report.checks.len();

    if report.all_passed() {
        print_success(&format!("All checks passed ({passed}/{total})"));
    } else if report.all_required_passed() {
        print_warning(&format!(
            "{passed}/{total} checks passed (optional tools missing)"
        ));
        print_detail("Building works; some probe or console commands will not.");
    } else {
        println!("{} {passed}/{total} checks passed", status::ERROR);
        anyhow::bail!("Missing required tools. Install them and run 'fwtask doctor' again.");
    }

    Ok(())
}
