//! HTML-entity escaping for untrusted text interpolated into the outgoing
//! email body. Applied after validation, never to the reply address.

/// Trims the value and escapes the six characters that carry meaning in
/// HTML markup. A single pass over the input means entities produced for
/// one character are never escaped again.
pub fn escape_html(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());

    for ch in trimmed.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_the_six_special_characters() {
        assert_eq!(
            escape_html(r#"<script>&'"/"#),
            "&lt;script&gt;&amp;&#x27;&quot;&#x2F;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("Bolsas industriales 40x60"), "Bolsas industriales 40x60");
        assert_eq!(escape_html("Quito"), "Quito");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(escape_html("  Acme  "), "Acme");
        assert_eq!(escape_html("   "), "");
    }

    #[test]
    fn ampersands_in_entities_are_not_special_cased() {
        // Escaping is applied exactly once in the pipeline; feeding an
        // already-escaped value back in re-escapes its ampersands.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("Acme & Cía"), "Acme &amp; Cía");
    }

    #[test]
    fn breaks_markup_injection() {
        assert_eq!(
            escape_html("<img src=x onerror=alert(1)>"),
            "&lt;img src=x onerror=alert(1)&gt;"
        );
    }
}
