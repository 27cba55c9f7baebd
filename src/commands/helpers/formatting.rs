const TELEGRAM_MESSAGE_LIMIT: usize = 4096;
const OVERFLOW_NOTE: &str = "\n… (truncated)";

/// Bold title over a preformatted body, escaped for HTML parse mode and kept
/// within one Telegram message.
pub(crate) fn as_html_block(title: &str, body: &str) -> String {
    let title = html_escape::encode_text(title);
    let frame_len = format!("<b>{}</b>\n<pre></pre>", title).len();
    let body = escape_within(body, TELEGRAM_MESSAGE_LIMIT.saturating_sub(frame_len));
    format!("<b>{}</b>\n<pre>{}</pre>", title, body)
}

/// Escapes `text`; when the result would exceed `budget` bytes it is cut at a
/// character boundary (never inside an entity) and the overflow note appended.
fn escape_within(text: &str, budget: usize) -> String {
    let escaped = html_escape::encode_text(text);
    if escaped.len() <= budget {
        return escaped.into_owned();
    }

    let room = budget.saturating_sub(OVERFLOW_NOTE.len());
    let mut out = String::with_capacity(budget);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let piece = html_escape::encode_text(ch.encode_utf8(&mut buf));
        if out.len() + piece.len() > room {
            break;
        }
        out.push_str(&piece);
    }
    out.push_str(OVERFLOW_NOTE);
    out
}
