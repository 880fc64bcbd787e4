// ============================================================================
// SANITIZER - Escape de texto para interpolar en HTML
// ============================================================================

/// Escapar texto arbitrario para insertarlo en markup o en valores de atributo
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup_and_attribute_delimiters() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('x')">"#),
            "&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(escape_html("Educação para Todos"), "Educação para Todos");
        assert_eq!(escape_html(""), "");
    }
}
