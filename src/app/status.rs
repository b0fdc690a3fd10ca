use cartolink::config::SdkConfig;

pub fn render_status(config: &SdkConfig) -> String {
    let telemetry = &config.telemetry;
    let lines = [
        format!("◆ cartolink {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        format!("config          {}", display_path(&config.config_path)),
        format!("api_url         {}", config.api_url),
        format!(
            "access_token    {}",
            config.access_token().map_or_else(|| "(unset)".into(), mask_token)
        ),
        format!("require_token   {}", config.require_access_token),
        format!("scheme          {}:", config.first_party_scheme),
        format!("domains         {}", config.first_party_domains.join(", ")),
        format!(
            "sku_token       {}",
            config.sku_token.as_deref().unwrap_or("(unset)")
        ),
        String::new(),
        format!("events_url      {}", telemetry.events_url),
        format!(
            "sdk             {} {}",
            telemetry.sdk_identifier, telemetry.sdk_version
        ),
        format!(
            "state           {}",
            telemetry
                .resolved_state_path()
                .map_or_else(|| "(in memory)".into(), |p| p.display().to_string())
        ),
    ];
    lines.join("\n")
}

fn display_path(path: &std::path::Path) -> String {
    if path.as_os_str().is_empty() {
        "(defaults)".into()
    } else {
        path.display().to_string()
    }
}

/// Keep the token type prefix (`pk.`, `sk.`, `tk.`) and hide the rest.
fn mask_token(token: &str) -> String {
    match token.split_once('.') {
        Some((kind, _)) => format!("{kind}.****"),
        None => "****".into(),
    }
}
