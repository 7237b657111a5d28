use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use lingo_core::{Msg, TargetLanguage};

use super::AppEvent;

pub const HELP: &str = "\
Type text and press enter to send it.
  /summarize N   summarize message N
  /translate N   translate message N into the target language
  /lang CODE     set the target language (en, pt, es, ru, tr, fr)
  /clear         delete every message
  /dismiss       hide the current error
  /help          show this help
  /quit          exit";

/// Turns one input line into the event it stands for.
pub fn parse_line(line: &str) -> AppEvent {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return AppEvent::Msgs(vec![Msg::InputChanged(line.to_string()), Msg::SendClicked]);
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("summarize", Some(arg)) => match arg.parse() {
            Ok(index) => AppEvent::Msgs(vec![Msg::SummarizeClicked { index }]),
            Err(_) => AppEvent::Invalid(format!("not a message number: {arg}")),
        },
        ("translate", Some(arg)) => match arg.parse() {
            Ok(index) => AppEvent::Msgs(vec![Msg::TranslateClicked { index }]),
            Err(_) => AppEvent::Invalid(format!("not a message number: {arg}")),
        },
        ("lang", Some(code)) => match TargetLanguage::from_code(code) {
            Some(target) => AppEvent::Msgs(vec![Msg::TargetLanguageChanged(target)]),
            None => AppEvent::Invalid(format!("unsupported language: {code}")),
        },
        ("clear", None) => AppEvent::Msgs(vec![Msg::ClearAllClicked]),
        ("dismiss", None) => AppEvent::Msgs(vec![Msg::ErrorDismissed]),
        ("help", _) => AppEvent::Help,
        ("quit" | "exit", _) => AppEvent::Quit,
        _ => AppEvent::Invalid(format!("unknown command: /{command}")),
    }
}

/// Reads stdin line by line on its own thread. End of input quits.
pub fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(parse_line(&line)).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}

#[cfg(test)]
mod tests {
    use lingo_core::{Msg, TargetLanguage};
    use pretty_assertions::assert_eq;

    use super::parse_line;
    use crate::platform::AppEvent;

    #[test]
    fn plain_text_is_sent() {
        assert_eq!(
            parse_line("Bonjour le monde"),
            AppEvent::Msgs(vec![
                Msg::InputChanged("Bonjour le monde".to_string()),
                Msg::SendClicked
            ])
        );
    }

    #[test]
    fn blank_line_still_goes_through_send_validation() {
        assert_eq!(
            parse_line("   "),
            AppEvent::Msgs(vec![Msg::InputChanged("   ".to_string()), Msg::SendClicked])
        );
    }

    #[test]
    fn commands_parse() {
        assert_eq!(
            parse_line("/summarize 2"),
            AppEvent::Msgs(vec![Msg::SummarizeClicked { index: 2 }])
        );
        assert_eq!(
            parse_line(" /translate 0 "),
            AppEvent::Msgs(vec![Msg::TranslateClicked { index: 0 }])
        );
        assert_eq!(
            parse_line("/lang ES"),
            AppEvent::Msgs(vec![Msg::TargetLanguageChanged(TargetLanguage::Spanish)])
        );
        assert_eq!(parse_line("/clear"), AppEvent::Msgs(vec![Msg::ClearAllClicked]));
        assert_eq!(parse_line("/help"), AppEvent::Help);
        assert_eq!(parse_line("/quit"), AppEvent::Quit);
    }

    #[test]
    fn bad_commands_are_invalid() {
        assert!(matches!(parse_line("/summarize x"), AppEvent::Invalid(_)));
        assert!(matches!(parse_line("/translate"), AppEvent::Invalid(_)));
        assert!(matches!(parse_line("/lang de"), AppEvent::Invalid(_)));
        assert!(matches!(parse_line("/dance"), AppEvent::Invalid(_)));
    }
}
