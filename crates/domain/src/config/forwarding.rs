use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the forward zones and the local hosts table live.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardingConfig {
    #[serde(default = "default_conf_dir")]
    pub conf_dir: String,

    #[serde(default = "default_forward_file")]
    pub forward_file: String,

    #[serde(default = "default_hosts_file")]
    pub hosts_file: String,
}

impl ForwardingConfig {
    pub fn forward_path(&self) -> PathBuf {
        PathBuf::from(&self.conf_dir).join(&self.forward_file)
    }

    pub fn hosts_path(&self) -> PathBuf {
        PathBuf::from(&self.conf_dir).join(&self.hosts_file)
    }
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            conf_dir: default_conf_dir(),
            forward_file: default_forward_file(),
            hosts_file: default_hosts_file(),
        }
    }
}

fn default_conf_dir() -> String {
    "/etc/owns".to_string()
}

fn default_forward_file() -> String {
    "forward.yaml".to_string()
}

fn default_hosts_file() -> String {
    "hosts.txt".to_string()
}
