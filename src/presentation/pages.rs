// HTML page rendering from embedded templates
use crate::application::upload_service::Preview;
use crate::infrastructure::flash::FlashMessage;

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const ABOUT_HTML: &str = include_str!("../../templates/about.html");
const CONTACT_HTML: &str = include_str!("../../templates/contact.html");
const UPLOAD_HTML: &str = include_str!("../../templates/upload.html");
const DASHBOARD_HTML: &str = include_str!("../../templates/dashboard.html");

pub fn index_page() -> &'static str {
    INDEX_HTML
}

pub fn about_page() -> &'static str {
    ABOUT_HTML
}

pub fn contact_page() -> &'static str {
    CONTACT_HTML
}

pub fn dashboard_page() -> &'static str {
    DASHBOARD_HTML
}

/// Render the upload form with its flashed messages and, after a successful
/// upload, the preview table.
pub fn upload_page(messages: &[FlashMessage], preview: Option<(&Preview, usize)>) -> String {
    let preview_html = preview
        .map(|(preview, total)| preview_table(preview, total))
        .unwrap_or_default();
    render(
        UPLOAD_HTML,
        &[
            ("flash_messages", flash_block(messages)),
            ("preview", preview_html),
        ],
    )
}

/// Replace `${key}` template variables with their values.
fn render(template: &str, vars: &[(&str, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

fn flash_block(messages: &[FlashMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            format!(
                "<div class=\"flash flash-{}\">{}</div>\n",
                message.level.as_str(),
                html_escape(&message.text)
            )
        })
        .collect()
}

/// The first-rows preview as a table, with every header and cell escaped.
fn preview_table(preview: &Preview, total_rows: usize) -> String {
    let mut html = String::from("<section class=\"preview\">\n<h2>Preview</h2>\n");
    html.push_str(&format!(
        "<p>Showing first {} of {} rows</p>\n",
        preview.rows.len(),
        total_rows
    ));
    html.push_str("<table>\n<thead><tr>");
    for column in &preview.columns {
        html.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &preview.rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", html_escape(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
    html
}

/// Minimal HTML entity escaping for values that came from an upload.
fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
