/// Entity-escape untrusted text for both element content and quoted
/// attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_html`]. Only the five entities it produces are
/// recognised; anything else is copied through.
pub fn unescape_html(text: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `escape_html` for optional server fields; absent renders as empty.
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape_html).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "report.pdf",
        "<script>alert(1)</script>.txt",
        "\"><img src=x onerror=alert(1)>",
        "Tom & Jerry's <b>file</b>",
        "&amp; already escaped",
        "&#39;&quot;",
        "naïve résumé ✓.docx",
        "trailing &",
    ];

    #[test]
    fn escapes_markup_significant_characters() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn escaped_output_never_contains_raw_markup() {
        for sample in SAMPLES {
            let escaped = escape_html(sample);
            assert!(!escaped.contains('<'), "{escaped}");
            assert!(!escaped.contains('>'), "{escaped}");
            assert!(!escaped.contains('"'), "{escaped}");
            assert!(!escaped.contains('\''), "{escaped}");
        }
    }

    #[test]
    fn unescape_inverts_escape() {
        for sample in SAMPLES {
            let escaped = escape_html(sample);
            assert_eq!(unescape_html(&escaped), *sample);
            assert_eq!(escape_html(&unescape_html(&escaped)), escaped);
        }
    }

    #[test]
    fn unescape_leaves_unknown_entities_alone() {
        assert_eq!(unescape_html("&nbsp;&lt;&"), "&nbsp;<&");
    }

    #[test]
    fn missing_fields_render_empty() {
        assert_eq!(escape_opt(None), "");
        assert_eq!(escape_opt(Some("<")), "&lt;");
    }
}
