//! Logging setup utilities for the VoiceVibe chat client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are enabled by the default filter.
const LIBRARY_TARGETS: [&str; 2] = ["voicevibe_chat", "voicevibe_shared"];

/// Build the default filter directive for the given binary and level.
///
/// Binary names may contain `-`; tracing targets use `_`.
pub fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut directives: Vec<String> = LIBRARY_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect();

    if !LIBRARY_TARGETS.contains(&binary_target.as_str()) {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }

    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "voicevibe-chat")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use voicevibe_shared::logger::setup_logger;
///
/// setup_logger("voicevibe-chat", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_includes_library_and_binary() {
        // テスト項目: デフォルトのフィルタにライブラリとバイナリのターゲットが含まれる
        // given (前提条件):
        let binary_name = "chat-probe";

        // when (操作):
        let directive = default_directive(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            directive,
            "voicevibe_chat=debug,voicevibe_shared=debug,chat_probe=debug"
        );
    }

    #[test]
    fn test_default_directive_does_not_duplicate_library_target() {
        // テスト項目: バイナリ名がライブラリと同じ場合、ターゲットが重複しない
        // given (前提条件):
        let binary_name = "voicevibe-chat";

        // when (操作):
        let directive = default_directive(binary_name, "info");

        // then (期待する結果):
        assert_eq!(directive, "voicevibe_chat=info,voicevibe_shared=info");
    }
}
