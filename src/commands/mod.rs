pub mod client;
pub mod serve;

pub use client::{ask_once, interactive, list_providers};
pub use serve::start_server;

use crate::config::Config;
use crate::error::{BridgeError, Result};
use colored::*;
use std::path::Path;

/// 기본 설정 파일 생성
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(BridgeError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::init(path)?;
    eprintln!("{} Wrote {}", "[OK]".green(), path.display());
    Ok(())
}
