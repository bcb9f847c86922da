use std::env;
use eventbrite_cetd::config::{BASE_URL_VARIABLE, TIMEOUT_VARIABLE, TOKEN_VARIABLE};

const PACKAGES: &[(&str, &str)] = &[
    ("eventbrite-cetd", env!("CARGO_PKG_VERSION")),
];

/// Version, system, environment and package information for bug reports.
///
/// The token value is never shown, only whether it is set.
pub fn debug_info<F: Fn(&str) -> Option<String>>(lookup: F) -> String {
    let mut lines = vec![
        format!("- __System__: {} ({}, {})", env::consts::OS, env::consts::ARCH, env::consts::FAMILY),
        "- __Environment variables__:".to_owned(),
    ];
    let token = match lookup(TOKEN_VARIABLE) {
        Some(ref value) if !value.trim().is_empty() => "<set>".to_owned(),
        _ => "<unset>".to_owned()
    };
    lines.push(format!("  - `{}`: {}", TOKEN_VARIABLE, token));
    for &variable in &[BASE_URL_VARIABLE, TIMEOUT_VARIABLE, "RUST_LOG"] {
        if let Some(value) = lookup(variable) {
            lines.push(format!("  - `{}`: `{}`", variable, value));
        }
    }
    lines.push("- __Installed packages__:".to_owned());
    for (name, version) in PACKAGES {
        lines.push(format!("  - `{}` v{}", name, version));
    }
    lines.join("\n")
}
