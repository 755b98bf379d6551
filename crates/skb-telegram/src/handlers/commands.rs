use std::sync::Arc;

use teloxide::{prelude::*, types::ParseMode};

use skb_core::formatting::{format_stats, help_text};

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let is_group = msg.chat.is_group() || msg.chat.is_supergroup();
    if is_group && !state.cfg.chat_allowed(msg.chat.id.0) {
        return Ok(());
    }

    let (cmd, _args) = parse_command(msg.text().unwrap_or(""));

    let reply = match cmd.as_str() {
        "start" | "help" => help_text(),
        "stats" => match state.store.stats().await {
            Ok(stats) => format_stats(&stats),
            Err(e) => {
                tracing::warn!(error = %e, "stats command failed");
                return Ok(());
            }
        },
        // Unknown commands in a group are probably meant for another bot.
        _ => return Ok(()),
    };

    bot.send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parsing_strips_bot_mention_and_case() {
        assert_eq!(parse_command("/Stats@society_bot"), ("stats".to_string(), "".to_string()));
        assert_eq!(
            parse_command("/help extra words"),
            ("help".to_string(), "extra words".to_string())
        );
    }
}
