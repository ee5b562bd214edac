use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use stacksync_env::{HostEnvironment, SystemHost};
use std::collections::BTreeMap;
use std::path::PathBuf;

const ENV_PREFIX: &str = "STACKSYNC_";

/// What the bootstrap would see, before any interpretation.
#[derive(Serialize)]
struct HostReport {
    os_name: String,
    pointer_width: String,
    user_home: Option<PathBuf>,
    user_name: Option<String>,
    current_dir: Option<PathBuf>,
    hostname: Option<String>,
    variables: BTreeMap<String, String>,
}

impl HostReport {
    fn probe(host: &dyn HostEnvironment) -> Self {
        Self {
            os_name: host.os_name(),
            pointer_width: host.pointer_width(),
            user_home: host.user_home(),
            user_name: host.user_name(),
            current_dir: host.current_dir().ok(),
            hostname: host.hostname().ok(),
            variables: std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
                .filter(|(key, _)| key.starts_with(ENV_PREFIX))
                .collect(),
        }
    }
}

pub fn execute(json: bool) -> Result<()> {
    let report = HostReport::probe(&SystemHost);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let missing = || "(unavailable)".dimmed().to_string();
    let path = |p: &Option<PathBuf>| p.as_ref().map_or_else(missing, |p| p.display().to_string());

    println!("{}", "Host Probes".bold());
    println!();
    println!("  os.name:       {}", report.os_name);
    println!("  pointer width: {}", report.pointer_width);
    println!("  user home:     {}", path(&report.user_home));
    println!("  user name:     {}", report.user_name.clone().unwrap_or_else(missing));
    println!("  current dir:   {}", path(&report.current_dir));
    println!("  hostname:      {}", report.hostname.clone().unwrap_or_else(missing));
    println!();
    println!("{}:", "Environment Variables".cyan());
    if report.variables.is_empty() {
        println!("  (none set)");
    }
    for (key, value) in &report.variables {
        println!("  {key}={value}");
    }
    Ok(())
}
