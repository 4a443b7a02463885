use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// askbridge 설정
///
/// 설정 파일은 ~/.askbridge/config.toml에 저장됩니다.
/// 환경 변수(HOST, PORT, DEFAULT_PROVIDER, API_URL)가 파일 값을 덮어씁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 서버 바인드 주소
    #[serde(default = "default_host")]
    pub host: String,

    /// 서버 포트
    #[serde(default = "default_port")]
    pub port: u16,

    /// 요청에 provider가 없을 때 사용할 provider
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// 클라이언트 명령이 접속할 서버 URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// provider별 실행 설정
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// 내장 provider 세 개의 실행 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub claude: ToolConfig,
    #[serde(default)]
    pub gemini: ToolConfig,
    #[serde(default)]
    pub codex: ToolConfig,
}

/// 단일 CLI 도구 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// 실행 파일 이름 또는 경로 (미지정시 기본 이름)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// 실행 제한 시간 (초). 미지정시 제한 없음
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ToolConfig {
    pub fn command_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.command.as_deref().unwrap_or(fallback)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_provider() -> String {
    "claude".to_string()
}

fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_provider: default_provider(),
            api_url: default_api_url(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// 설정 디렉토리 경로 (~/.askbridge)
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".askbridge")
    }

    /// 기본 설정 파일 경로
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// 기본 경로에서 설정 로드 후 환경 변수 적용
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// 지정된 경로에서 설정 로드 (없으면 기본값 사용) 후 환경 변수 적용
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read_file(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// 설정 파일만 읽기 (환경 변수 미적용)
    pub fn read_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// 환경 변수 덮어쓰기
    ///
    /// 조회 함수를 주입받아 테스트에서 프로세스 환경을 건드리지 않습니다.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.port = port.trim().parse().map_err(|e| {
                BridgeError::ConfigError(format!("invalid PORT {:?}: {}", port, e))
            })?;
        }

        if let Some(provider) = lookup("DEFAULT_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(url) = lookup("API_URL") {
            self.api_url = url;
        }

        Ok(())
    }

    /// 서버 바인드 주소 ("host:port")
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 설정을 파일에 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| BridgeError::ConfigError(e.to_string()))?;

        fs::write(path, toml_string)?;

        Ok(())
    }

    /// 설정 파일 초기화 (기본값으로)
    pub fn init(path: &Path) -> Result<()> {
        Self::default().save_to(path)
    }
}
