//! HTML escaping for diff reports.
//!
//! Finding data comes from remote instances and may contain markup; every
//! piece of it is escaped before being embedded in a report.

/// Escape a string for safe inclusion in HTML content.
///
/// ```
/// use dt_compare::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>"),
///     "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
/// assert_eq!(escape_html("safe text"), "safe text");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_json_diff_line() {
        assert_eq!(
            escape_html(r#"-      "title": "<img src=x onerror=alert(1)>","#),
            "-      &quot;title&quot;: &quot;&lt;img src=x onerror=alert(1)&gt;&quot;,"
        );
    }

    #[test]
    fn test_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_unicode_preservation() {
        assert_eq!(escape_html("libX – 日本語"), "libX – 日本語");
    }
}
