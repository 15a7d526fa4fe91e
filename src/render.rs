use crate::config::SiteConfig;
use crate::router::PageId;

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; color: #262730; display: flex; min-height: 100vh; }
.sidebar { width: 240px; background: #f0f2f6; padding: 1.5rem 1rem; flex-shrink: 0; }
.sidebar fieldset { border: none; padding: 0; margin: 0; }
.sidebar label { display: block; padding: 0.3rem 0; cursor: pointer; }
main { flex: 1; padding: 2rem 3rem; max-width: 1100px; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #e6e9ef; padding: 0.4rem 0.8rem; text-align: left; }
th { background: #fafafa; }
label { display: block; margin: 0.8rem 0 0.2rem; }
select, input[type=text] { padding: 0.35rem; min-width: 260px; }
.alert { padding: 0.8rem 1rem; border-radius: 0.4rem; margin-top: 1rem; }
.alert.success { background: #dff5e3; color: #176f2c; }
.alert.warning { background: #fffbe0; color: #8a6d00; }
.banner { max-width: 100%; }
"#;

/// Escapes text for use in element content and quoted attribute values.
pub fn esc<S: AsRef<str>>(s: S) -> String {
    let mut out = String::with_capacity(s.as_ref().len() + 8);
    for ch in s.as_ref().chars() {
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

/// Wraps a page body in the full document with the navigation sidebar.
pub fn page_shell(site: &SiteConfig, current: PageId, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 4096);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    out.push_str(&format!("<title>{} | {}</title>", esc(current.label()), esc(&site.title)));
    out.push_str("<style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body>");
    out.push_str(&nav(current));
    out.push_str("<main>");
    out.push_str(body);
    out.push_str("</main></body></html>");
    out
}

/// Sidebar radio group; choosing an entry submits its slug to `/go`.
fn nav(current: PageId) -> String {
    let mut out = String::from(
        "<nav class=\"sidebar\"><h2>📂 Navigate</h2><form method=\"get\" action=\"/go\">\
         <fieldset><legend>Go to</legend>",
    );
    for page in PageId::ALL {
        out.push_str(&format!(
            "<label><input type=\"radio\" name=\"page\" value=\"{}\"{} onchange=\"this.form.submit()\"> {} {}</label>",
            page.slug(),
            if page == current { " checked" } else { "" },
            esc(page.label()),
            page.icon(),
        ));
    }
    out.push_str("</fieldset><noscript><button type=\"submit\">Go</button></noscript></form></nav>");
    out
}

/// A labelled single-select whose `selected` option is pre-chosen.
pub fn select_control(name: &str, label: &str, options: &[String], selected: &str) -> String {
    let id = format!("select-{}", name);
    let mut out = format!(
        "<label for=\"{id}\">{}</label><select id=\"{id}\" name=\"{}\" onchange=\"this.form.submit()\">",
        esc(label),
        esc(name),
    );
    for option in options {
        out.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            esc(option),
            if option == selected { " selected" } else { "" },
        ));
    }
    out.push_str("</select>");
    out
}

pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table><thead><tr>");
    for header in headers {
        out.push_str(&format!("<th>{}</th>", esc(header)));
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", esc(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Alert box for a user-visible success or warning message.
pub fn alert(success: bool, message: &str) -> String {
    format!(
        "<div class=\"alert {}\" role=\"status\">{}</div>",
        if success { "success" } else { "warning" },
        esc(message)
    )
}
