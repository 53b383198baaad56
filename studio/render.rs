/// Template renderer for the ViewWear studio.
///
/// The studio serves a single HTML page (`studio/assets/studio.html`) with
/// placeholder tokens like `{{TOKEN}}`.  The template is embedded at compile
/// time; globals are resolved here and page-specific placeholders are filled
/// by the caller's closure.  Unfilled tokens are blanked so raw `{{TOKEN}}`
/// strings never reach the browser.

use viewwear::MAX_UPLOAD_BYTES;

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Renders the studio page, letting `fill` substitute page-specific tokens.
pub fn render_page<F>(fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();

    html = html.replace(
        "{{MAX_UPLOAD_MB}}",
        &(MAX_UPLOAD_BYTES / (1024 * 1024)).to_string(),
    );

    html = fill(html);

    blank_remaining(html)
}

/// Replaces any `{{TOKEN}}` that wasn't substituted with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}
