//! CLI configuration: thin wrapper around `marquee_config`.
//!
//! Re-exports the shared types and layers `GlobalOpts` flag overrides
//! (--base-url, --token, --insecure, --timeout) on top of the profile.

use secrecy::SecretString;

use marquee_config::ConfigError;
use marquee_core::{ClientConfig, Credentials};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use marquee_config::{
    Config, Profile, config_path, load_config, save_config, store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Comma-separated profile names, for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the `ClientConfig` for this invocation.
///
/// A profile named explicitly with `--profile` must exist. The implicit
/// default profile may be absent, in which case built-in defaults apply.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let config = load_config()?;
    let name = active_profile_name(global, &config);

    let profile = match config.profile(&name) {
        Ok(profile) => profile.clone(),
        Err(_) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&config),
                name,
            });
        }
        Err(_) => Profile::default(),
    };

    resolve_profile(&profile, &name, &config, global)
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    config: &Config,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut merged = profile.clone();
    if let Some(ref url) = global.base_url {
        merged.base_url.clone_from(url);
    }
    if global.insecure {
        merged.insecure = Some(true);
    }
    if global.timeout.is_some() {
        merged.timeout = global.timeout;
    }

    let mut client =
        marquee_config::profile_to_client_config(&merged, profile_name, &config.defaults)
            .map_err(|err| match err {
                ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
                other => CliError::Config(other),
            })?;

    // --token beats token_env, keyring and plaintext
    if let Some(ref token) = global.token {
        client.credentials = Credentials::Bearer {
            token: SecretString::from(token.clone()),
        };
    }
    Ok(client)
}
