use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "askbridge")]
#[command(version)]
#[command(about = "Unified HTTP gateway for command-line AI assistants", long_about = None)]
pub struct Cli {
    /// 로그 상세도 (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 설정 파일 경로 (기본: ~/.askbridge/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// HTTP 서버 실행
    Serve {
        /// 바인드 주소 (기본: 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// 포트 (기본: 5000)
        #[arg(long)]
        port: Option<u16>,

        /// provider 미지정 요청에 사용할 provider (claude, gemini, codex)
        #[arg(long)]
        default_provider: Option<String>,
    },

    /// 실행 중인 서버에 프롬프트 전송
    Ask {
        /// 프롬프트
        #[arg(required = true)]
        prompt: Vec<String>,

        /// AI 제공자 선택 (claude, gemini, codex). 미지정시 서버 기본값
        #[arg(short = 'p', long)]
        provider: Option<String>,

        /// 서버 URL (기본: 설정의 api_url)
        #[arg(long)]
        url: Option<String>,
    },

    /// provider 목록과 설치 상태 출력
    Providers {
        #[arg(long)]
        url: Option<String>,
    },

    /// 대화형 모드
    Interactive {
        #[arg(short = 'p', long)]
        provider: Option<String>,

        #[arg(long)]
        url: Option<String>,
    },

    /// 기본 설정 파일 생성
    InitConfig {
        /// 기존 파일 덮어쓰기
        #[arg(long)]
        force: bool,
    },
}

/// 여러 단어로 나뉜 프롬프트 합치기
pub fn prompt_text(words: &[String]) -> String {
    words.join(" ")
}
