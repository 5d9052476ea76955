//! Markup helpers shared by the views

use html_escape::{encode_double_quoted_attribute, encode_text};
use petshop_core::{RequestStatus, Tracked};
use std::fmt::Write;

/// Escape text content
pub(crate) fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

/// Escape a double-quoted attribute value
pub(crate) fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

/// `<img>` tag, or nothing when there is no image
pub(crate) fn image(src: Option<&str>, alt: &str) -> String {
    src.map(|src| {
        format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            attr(src),
            attr(alt)
        )
    })
    .unwrap_or_default()
}

/// Loading indicator or error banner for a tracked slot
pub(crate) fn status_notice<T>(slot: &Tracked<T>, what: &str) -> String {
    let mut out = String::new();
    match slot.status() {
        RequestStatus::Pending => {
            let _ = write!(
                out,
                r#"<p class="status status-pending">Loading {}...</p>"#,
                text(what)
            );
        },
        RequestStatus::Failed => {
            let _ = write!(
                out,
                r#"<p class="status status-failed" role="alert">Could not load {}: {}</p>"#,
                text(what),
                text(slot.error().unwrap_or("unknown error"))
            );
        },
        RequestStatus::Idle | RequestStatus::Succeeded => {},
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaping() {
        assert_eq!(text("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
        assert_eq!(attr(r#"a"b"#), "a&quot;b");
    }

    #[test]
    fn test_status_notice() {
        let mut slot: Tracked<Vec<u32>> = Tracked::default();
        assert_eq!(status_notice(&slot, "brands"), "");

        let request = slot.begin();
        assert!(status_notice(&slot, "brands").contains("status-pending"));

        let _ = slot.reject(request, "<timeout>");
        let notice = status_notice(&slot, "brands");
        assert!(notice.contains("role=\"alert\""));
        assert!(notice.contains("&lt;timeout&gt;"));
    }
}
