//! Reload script injection for HTML pages.

use std::borrow::Cow;

/// Closing tag the script is inserted in front of.
const BODY_CLOSE: &str = "</body>";

/// Script that polls the status endpoint once per second.
///
/// Network errors are ignored so the page keeps polling while the server
/// restarts.
pub(crate) const RELOAD_SCRIPT: &str = r#"<script>
    setInterval(() => {
        fetch("/reload-status")
            .then(r => r.json())
            .then(d => d.reload && location.reload())
            .catch(() => {})
    }, 1000)
</script>"#;

/// Insert [`RELOAD_SCRIPT`] right before the first `</body>`.
///
/// Pages without a closing body tag are returned unchanged and will not
/// reload on their own.
pub(crate) fn inject_reload_script(html: &str) -> Cow<'_, str> {
    let Some(pos) = html.find(BODY_CLOSE) else {
        return Cow::Borrowed(html);
    };

    let mut out = String::with_capacity(html.len() + RELOAD_SCRIPT.len());
    out.push_str(&html[..pos]);
    out.push_str(RELOAD_SCRIPT);
    out.push_str(&html[pos..]);
    Cow::Owned(out)
}
