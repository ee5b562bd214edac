use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use stacksync_env::Environment;
use std::path::Path;

/// Every accessor the rest of the client reads, flattened.
#[derive(Serialize)]
struct Snapshot<'a> {
    operating_system: String,
    os_name: &'a str,
    architecture: &'static str,
    app_dir: &'a Path,
    app_bin_dir: &'a Path,
    app_res_dir: &'a Path,
    app_conf_dir: &'a Path,
    user_home: &'a Path,
    user_config_dir: &'a Path,
    user_config_file: &'a Path,
    device_name: String,
    device_name_with_timestamp: String,
    user_name: &'a str,
}

impl<'a> Snapshot<'a> {
    fn of(env: &'a Environment) -> Self {
        Self {
            operating_system: env.operating_system().to_string(),
            os_name: &env.platform().os_name,
            architecture: env.architecture().as_str(),
            app_dir: env.app_dir(),
            app_bin_dir: env.app_bin_dir(),
            app_res_dir: env.app_res_dir(),
            app_conf_dir: env.app_conf_dir(),
            user_home: env.default_user_home(),
            user_config_dir: env.default_user_config_dir(),
            user_config_file: env.default_user_config_file(),
            device_name: env.device_name(),
            device_name_with_timestamp: env.device_name_with_timestamp(),
            user_name: env.user_name(),
        }
    }
}

pub fn execute(json: bool) -> Result<()> {
    let env = stacksync_env::global().context("Environment initialization failed")?;
    let snapshot = Snapshot::of(env);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{}", "Stacksync Environment".bold());
    println!();
    println!("{}:", "Platform".cyan());
    println!(
        "  Operating system: {} ({})",
        snapshot.operating_system, snapshot.os_name
    );
    println!("  Architecture:     {}", snapshot.architecture);
    println!();
    println!("{}:", "Directories".cyan());
    for (label, path) in [
        ("Application", snapshot.app_dir),
        ("Binaries", snapshot.app_bin_dir),
        ("Resources", snapshot.app_res_dir),
        ("Configuration", snapshot.app_conf_dir),
        ("User home", snapshot.user_home),
        ("User config", snapshot.user_config_dir),
        ("Config file", snapshot.user_config_file),
    ] {
        println!("  {label:<16} {}", path.display());
    }
    println!();
    println!("{}:", "Identity".cyan());
    println!("  Device name: {}", snapshot.device_name);
    println!("  User name:   {}", snapshot.user_name);
    Ok(())
}
