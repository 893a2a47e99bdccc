//! Server-rendered chat page.
//!
//! The whole page is rebuilt from the session's transcript on every request.
//! All user and assistant text passes through [`escape_html`].

use std::fmt::Write;

use calbook_core::session::SessionState;
use calbook_types::chat::{ChatRole, ChatTurn};
use calbook_types::status::BackendStatus;

const STYLE: &str = r#"
    * { box-sizing: border-box; }
    body {
        margin: 0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        color: #31333f;
        display: flex;
        min-height: 100vh;
    }
    .sidebar {
        width: 300px;
        background-color: #f0f2f6;
        padding: 1.5rem;
    }
    .main {
        flex: 1;
        padding: 2rem 3rem;
    }
    .chat-message {
        padding: 1rem;
        border-radius: 0.5rem;
        margin-bottom: 1rem;
        display: flex;
        flex-direction: column;
    }
    .user-message {
        background-color: #007bff;
        color: white;
        align-self: flex-end;
        max-width: 80%;
        margin-left: auto;
    }
    .assistant-message {
        background-color: #f8f9fa;
        color: #333;
        align-self: flex-start;
        max-width: 80%;
        border: 1px solid #dee2e6;
    }
    .chat-container {
        height: 400px;
        overflow-y: auto;
        padding: 1rem;
        border: 1px solid #dee2e6;
        border-radius: 0.5rem;
        background-color: white;
        display: flex;
        flex-direction: column;
    }
    .chat-form {
        display: flex;
        gap: 0.5rem;
        margin-top: 1rem;
    }
    .chat-form input[type=text] {
        flex: 4;
        padding: 0.6rem;
        border: 1px solid #dee2e6;
        border-radius: 0.5rem;
    }
    .chat-form button {
        flex: 1;
    }
    button {
        padding: 0.6rem 1rem;
        border: 1px solid #dee2e6;
        border-radius: 0.5rem;
        background-color: white;
        cursor: pointer;
    }
    .status {
        padding: 0.75rem;
        border-radius: 0.5rem;
    }
    .status-ok { background-color: #d4edda; color: #155724; }
    .status-bad { background-color: #f8d7da; color: #721c24; }
    footer {
        margin-top: 2rem;
        border-top: 1px solid #dee2e6;
        padding-top: 1rem;
        color: #6c757d;
    }
"#;

const SIDEBAR_HELP: &str = r#"
        <h2>ℹ️ How to use</h2>
        <p><strong>I can help you with:</strong></p>
        <ul>
            <li>📅 Check available time slots</li>
            <li>➕ Book new appointments</li>
            <li>👀 View existing events</li>
            <li>📋 Get current date</li>
        </ul>
        <p><strong>Example requests:</strong></p>
        <ul>
            <li>"What's available tomorrow?"</li>
            <li>"Book a meeting with John at 2 PM"</li>
            <li>"Schedule a doctor appointment for Friday"</li>
            <li>"Show me my events for today"</li>
        </ul>
"#;

const WELCOME: &str = "Welcome! I'm your AI assistant for booking appointments. \
    I can help you check availability and schedule meetings on your Google Calendar.";

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render one transcript entry.
fn render_turn(out: &mut String, turn: &ChatTurn) {
    let class = match turn.role() {
        ChatRole::User => "user-message",
        ChatRole::Assistant => "assistant-message",
    };
    let body = escape_html(turn.content()).replace('\n', "<br>");
    let _ = write!(
        out,
        "            <div class=\"chat-message {class}\">\n                \
         <strong>{}:</strong><br>\n                {body}\n            </div>\n",
        turn.role().label()
    );
}

fn render_status(out: &mut String, status: BackendStatus) {
    let (class, icon) = if status.is_connected() {
        ("status-ok", "✅")
    } else {
        ("status-bad", "❌")
    };
    let _ = writeln!(
        out,
        "        <div class=\"status {class}\" data-state=\"{status}\">{icon} {}</div>",
        status.label()
    );
}

/// Render the full chat page. `None` renders a browser that has not sent
/// anything yet.
pub fn render_page(title: &str, session: Option<&SessionState>, status: BackendStatus) -> String {
    let title = escape_html(title);
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"utf-8\">\n");
    out.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    let _ = writeln!(out, "    <title>{title}</title>");
    let _ = writeln!(out, "    <style>{STYLE}    </style>");
    out.push_str("</head>\n<body>\n");

    // Sidebar
    out.push_str("    <aside class=\"sidebar\">");
    out.push_str(SIDEBAR_HELP);
    out.push_str("        <h2>🔧 System Status</h2>\n");
    render_status(&mut out, status);
    match session {
        Some(session) => {
            let _ = writeln!(
                out,
                "        <p><strong>Session ID:</strong> <code>{}...</code></p>",
                escape_html(&session.id().short())
            );
        }
        None => out.push_str("        <p><strong>Session ID:</strong> <em>new</em></p>\n"),
    }
    out.push_str(
        "        <form method=\"post\" action=\"/clear\">\n            \
         <button type=\"submit\">🗑️ Clear Chat</button>\n        </form>\n",
    );
    out.push_str("    </aside>\n");

    // Main column
    out.push_str("    <main class=\"main\">\n");
    let _ = writeln!(out, "        <h1>📅 {title}</h1>");
    let _ = writeln!(out, "        <p>{}</p>", escape_html(WELCOME));
    out.push_str("        <h3>💬 Chat with your booking assistant</h3>\n");
    out.push_str("        <div class=\"chat-container\" id=\"chat\">\n");
    for turn in session.map(SessionState::list).unwrap_or_default() {
        render_turn(&mut out, turn);
    }
    out.push_str("        </div>\n");
    out.push_str(
        "        <form class=\"chat-form\" method=\"post\" action=\"/send\">\n            \
         <input type=\"text\" name=\"message\" aria-label=\"Type your message here...\" \
         placeholder=\"e.g., &#x27;I want to book a meeting for tomorrow at 2 PM&#x27;\" \
         autocomplete=\"off\" autofocus>\n            \
         <button type=\"submit\">Send</button>\n        </form>\n",
    );
    out.push_str(
        "        <footer>Built with ❤️ using Rust and axum</footer>\n",
    );
    out.push_str("    </main>\n");
    out.push_str(
        "    <script>const c = document.getElementById('chat'); c.scrollTop = c.scrollHeight;</script>\n",
    );
    out.push_str("</body>\n</html>\n");
    out
}
