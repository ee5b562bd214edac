use anyhow::{Context, Result};

pub fn execute(timestamp: bool) -> Result<()> {
    let env = stacksync_env::global().context("Environment initialization failed")?;
    if timestamp {
        println!("{}", env.device_name_with_timestamp());
    } else {
        println!("{}", env.device_name());
    }
    Ok(())
}
