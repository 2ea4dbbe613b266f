//! `marquee permissions`: what the configured token claims to allow.

use std::fmt::Write;

use marquee_core::{Catalog, Permissions};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Scopes the backend checks. Movie and cast routes are open.
const KNOWN: [&str; 4] = ["read:actors", "create:actors", "modify:actors", "delete:actors"];

fn detail(perms: &Permissions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Subject: {}", perms.sub.as_deref().unwrap_or("(anonymous)"));
    for permission in KNOWN {
        let mark = if perms.allows(permission) { "yes" } else { "no" };
        let _ = writeln!(out, "  {permission:<14} {mark}");
    }
    out.trim_end().to_owned()
}

pub fn handle(catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    let perms = catalog.permissions()?;
    let out = output::render_single(&global.output, &perms, detail, |p| p.permissions.join("\n"));
    output::print_output(&out, global.quiet);
    Ok(())
}
