use crate::client::BridgeClient;
use crate::error::{BridgeError, Result};
use crate::server::protocol::{PromptResponse, ProviderInfo};
use crate::ui::{create_spinner, Question, QuestionPrompt};
use colored::*;

/// 프롬프트 한 번 전송 후 응답 출력
///
/// provider가 실패를 보고하면 `Ok(false)`를 반환합니다.
pub async fn ask_once(client: &BridgeClient, prompt: &str, provider: Option<&str>) -> Result<bool> {
    let spinner = create_spinner(&format!("Asking {}...", provider.unwrap_or("default provider")));
    let result = client.ask(prompt, provider).await;
    spinner.finish_and_clear();

    let response = result?;
    print_response(&response);
    Ok(response.success)
}

fn print_response(response: &PromptResponse) {
    if response.success {
        print!("{}", response.response);
        if !response.response.ends_with('\n') {
            println!();
        }
    } else {
        eprintln!(
            "{} {}",
            "Error:".red().bold(),
            response.error.as_deref().unwrap_or("Unknown error")
        );
    }
}

/// provider 목록과 상태 출력
pub async fn list_providers(client: &BridgeClient) -> Result<()> {
    let spinner = create_spinner("Checking providers...");
    let result = client.list_providers().await;
    spinner.finish_and_clear();

    let listing = result?;

    println!("\n{}", "Available Providers:".bold());
    println!("{}", "-".repeat(60));
    for info in &listing.providers {
        println!("{}", format_provider_line(info));
        if !info.status.available {
            if let Some(error) = &info.status.error {
                println!("    {} {}", "Error:".red(), error);
            }
        }
    }
    println!("{}", "-".repeat(60));

    Ok(())
}

fn format_provider_line(info: &ProviderInfo) -> String {
    let status = if info.status.available {
        "[OK] Available".green()
    } else {
        "[NG] Not Available".red()
    };
    let version = info
        .status
        .version
        .as_ref()
        .map(|v| format!(" ({})", v))
        .unwrap_or_default();

    format!(
        "  - {:<20} [{}] {}{}",
        info.display_name, info.name, status, version
    )
}

/// 대화형 모드
pub async fn interactive(client: &BridgeClient, provider: Option<&str>) -> Result<()> {
    println!("askbridge interactive mode (quit: type 'quit' or 'exit')");
    println!("{}", "-".repeat(50));
    if let Some(provider) = provider {
        println!("Default provider: {}", provider.cyan());
    }

    let prompt = QuestionPrompt::new();
    loop {
        let question = match prompt.read().await {
            Ok(q) => q,
            Err(BridgeError::UserCancelled) => break,
            Err(e) => return Err(e),
        };

        match question {
            Question::Quit => break,
            Question::Skip => continue,
            Question::Ask(text) => {
                println!("\n{}", "Response:".cyan().bold());
                // 연결 오류가 나도 대화형 모드는 계속
                if let Err(e) = ask_once(client, &text, provider).await {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                }
                println!();
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
