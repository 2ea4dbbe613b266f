//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use marquee_core::view::Listing;
use marquee_core::{ListView, LoadError, PatchOp, PatchOperation, Submission};
use serde_json::{Value, json};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, destructive actions need `--yes`.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Run `work` behind a stderr spinner. Hidden when quiet or not a terminal.
pub async fn with_spinner<F: Future>(message: &str, global: &GlobalOpts, work: F) -> F::Output {
    if global.quiet || !std::io::stderr().is_terminal() {
        return work.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let out = work.await;
    spinner.finish_and_clear();
    out
}

/// Rows of the requested page, or of every page from there on with `all`.
///
/// A page past the end is clamped to the last one.
pub async fn collect_pages<P: Listing>(
    view: &mut ListView<P>,
    all: bool,
    resource_type: &str,
) -> Result<Vec<P::Item>, CliError> {
    fail_on_load_error(view.loader().error(), resource_type)?;
    if view.page() > view.page_max() {
        view.go_to(view.page()).await?;
        fail_on_load_error(view.loader().error(), resource_type)?;
    }

    let mut items = view.items();
    while all && view.page() < view.page_max() {
        view.next_page().await?;
        fail_on_load_error(view.loader().error(), resource_type)?;
        items.extend(view.items());
    }
    Ok(items)
}

fn fail_on_load_error(error: Option<LoadError>, resource_type: &str) -> Result<(), CliError> {
    match error {
        Some(err) => Err(CliError::from_load(err, resource_type, None)),
        None => Ok(()),
    }
}

/// `"Page 2 of 5 (47 movies)"`.
pub fn page_footer<P: Listing>(view: &ListView<P>) -> String {
    format!(
        "Page {} of {} ({} {})",
        view.page(),
        view.page_max(),
        view.total(),
        P::RESOURCE
    )
}

/// Print a successful write's notification, or turn a failed one into an error.
pub fn report(submission: Submission, global: &GlobalOpts) -> Result<(), CliError> {
    if submission.is_success() {
        output::print_notification(&submission.notification, &global.color, global.quiet);
        Ok(())
    } else {
        Err(CliError::from_submission(submission))
    }
}

/// `add /age 31`, one operation per line.
pub fn describe_patch(ops: &[PatchOperation]) -> String {
    ops.iter()
        .map(|op| match (op.op, &op.value) {
            (PatchOp::Add, Some(value)) => format!("add {} {value}", op.path),
            (PatchOp::Add, None) => format!("add {}", op.path),
            (PatchOp::Remove, _) => format!("remove {}", op.path),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `edit --dry-run`: the patch that would be sent and the document it yields.
pub fn print_dry_run(
    ops: &[PatchOperation],
    result: &Value,
    global: &GlobalOpts,
) {
    let preview = json!({ "patch": ops, "result": result });
    let out = output::render_single(
        &global.output,
        &preview,
        |_| {
            let patch = if ops.is_empty() {
                "(no changes)".to_owned()
            } else {
                describe_patch(ops)
            };
            let result = serde_json::to_string_pretty(result).unwrap_or_default();
            format!("{patch}\n\n{result}")
        },
        |_| describe_patch(ops),
    );
    output::print_output(&out, global.quiet);
}

/// `Some("")` clears a field, `None` keeps what was loaded.
pub fn overlay(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}
