//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for fenced
//! code. Backend replies are plain text that may carry markdown (lists of
//! time slots, bold dates), so every reply goes through `render_final`.

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

use calbook_types::chat::{ChatRole, ChatTurn};
use calbook_types::error::GatewayError;

const THEME: &str = "base16-ocean.dark";

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a complete markdown reply.
    ///
    /// Code fences are highlighted via syntect; everything else is rendered
    /// through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") {
                if in_code_block {
                    in_code_block = false;
                    output.push_str(&self.highlight_code(&code_buf, &code_lang));
                    output.push('\n');
                } else {
                    in_code_block = true;
                    code_lang = line.trim_start_matches('`').trim().to_string();
                    code_buf.clear();
                }
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Print the assistant's reply with a role label.
    pub fn print_reply(&self, text: &str) {
        println!();
        println!("  {}", style(ChatRole::Assistant.label()).cyan().bold());
        for line in self.render_final(text).trim_end().lines() {
            println!("  {line}");
        }
    }

    /// Print a failed exchange. The text matches the assistant turn that
    /// was stored in the transcript.
    pub fn print_error(&self, error: &GatewayError) {
        println!();
        println!("  {}", style(ChatRole::Assistant.label()).cyan().bold());
        println!("  {} {}", style("!").red().bold(), style(error).red());
    }

    /// Reprint a transcript for `/history`.
    pub fn print_history(&self, turns: &[ChatTurn]) {
        println!();
        if turns.is_empty() {
            println!("  {}", style("No messages yet.").dim());
            println!();
            return;
        }
        for turn in turns {
            let label = match turn.role() {
                ChatRole::User => style(turn.role().label()).green().bold(),
                ChatRole::Assistant => style(turn.role().label()).cyan().bold(),
            };
            println!("  {label}: {}", preview(turn.content(), 100));
        }
        println!();
    }

    /// Print the timing footer after a reply.
    pub fn print_footer(&self, response_ms: u64, turn_count: usize) {
        let seconds = response_ms as f64 / 1000.0;
        println!(
            "\n  {} {:.1}s {} {} messages\n",
            style("|").dim(),
            style(seconds).dim(),
            style("\u{00b7}").dim(),
            style(turn_count).dim(),
        );
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = String::new();
        let Some(theme) = self.theme_set.themes.get(THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };
        let mut h = HighlightLines::new(syntax, theme);

        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));
        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorten `text` to at most `max` characters, on a char boundary.
fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_prose() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("Tomorrow at **2 PM** is free.");
        assert!(out.contains("Tomorrow at"));
        assert!(out.contains("2 PM"));
    }

    #[test]
    fn test_render_highlights_code_fence() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("Here:\n```json\n{\"slot\": 14}\n```\n");
        assert!(out.contains("--- json ---"));
        assert!(out.contains("slot"));
    }

    #[test]
    fn test_unclosed_fence_still_rendered() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("```\nraw text");
        assert!(out.contains("raw text"));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let short = preview(&long, 100);
        assert_eq!(short.chars().count(), 100);
        assert!(short.ends_with("..."));
        assert_eq!(preview("a\nb", 100), "a b");
    }
}
