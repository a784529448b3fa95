use anyhow::Context;
use owns_dns_domain::{CliOverrides, Config};

/// Layered configuration: file (explicit, local, system or none) then CLI overrides.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}
