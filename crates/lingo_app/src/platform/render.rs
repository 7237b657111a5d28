use std::fmt::Write;

use lingo_core::{AppViewModel, MessageRowView};

/// Renders the whole chat as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.messages.is_empty() {
        out.push_str("(no messages)\n");
    }
    for row in &view.messages {
        render_row(&mut out, row);
    }

    let _ = writeln!(out, "target: {}", view.target_language);
    if let Some(download) = view.download {
        let _ = writeln!(
            out,
            "downloading summarizer model: {}/{} bytes",
            download.loaded, download.total
        );
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }
    out
}

fn render_row(out: &mut String, row: &MessageRowView) {
    let _ = writeln!(out, "[{}] {}", row.index, row.text);
    let _ = writeln!(out, "    Language: {}", row.language);

    let mut actions = Vec::new();
    if row.show_summarize {
        actions.push(action(row.summarize_label, row.summarize_enabled));
    }
    actions.push(action(row.translate_label, row.translate_enabled));
    let _ = writeln!(out, "    {}", actions.join("  "));

    if let Some(summary) = &row.summary {
        let _ = writeln!(out, "    Summary: {summary}");
    }
    if let Some(translation) = &row.translation {
        let _ = writeln!(out, "    Translation: {translation}");
    }
}

fn action(label: &str, enabled: bool) -> String {
    if enabled {
        format!("<{label}>")
    } else {
        format!("({label})")
    }
}

#[cfg(test)]
mod tests {
    use lingo_core::{update, AppState, ChatMessage, Msg};

    use super::render;

    #[test]
    fn empty_chat_renders_placeholder() {
        let text = render(&AppState::new().view());
        assert!(text.starts_with("(no messages)\n"));
        assert!(text.contains("target: English (en)"));
    }

    #[test]
    fn rows_show_actions_results_and_errors() {
        let long = "An English paragraph that keeps going and going. ".repeat(4);
        let hello = ChatMessage::restore(
            "Hello".to_string(),
            Some("en".to_string()),
            String::new(),
            "Hola".to_string(),
            false,
        );
        let (state, _) = update(
            AppState::new(),
            Msg::RestoreMessages(vec![hello, ChatMessage::new(long, Some("en".to_string()))]),
        );
        let (state, _) = update(state, Msg::SummarizeClicked { index: 1 });

        let text = render(&state.view());
        assert!(text.contains("[0] Hello\n    Language: en\n    (Translate)\n    Translation: Hola\n"));
        assert!(text.contains("(Summarizing...)  (Translate)"));

        let (state, _) = update(AppState::new(), Msg::SendClicked);
        assert!(render(&state.view()).contains("error: Please enter text before sending."));
    }
}
