// src/views/mod.rs
//
// Server-rendered HTML. Every dynamic value goes through `escape`.

pub mod chart;
pub mod earnings;
pub mod stock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

const STYLE: &str = r#"
:root { --bg: #fafafa; --card: #ffffff; --text: #18181b; --muted: #71717a; --border: #e4e4e7; --accent: #2563eb; --up: #16a34a; --down: #dc2626; }
body.dark { --bg: #09090b; --card: #18181b; --text: #fafafa; --muted: #a1a1aa; --border: #27272a; --up: #4ade80; --down: #f87171; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
.container { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 0.75rem; padding: 1.5rem; margin-bottom: 1.5rem; }
.muted { color: var(--muted); }
.empty { text-align: center; padding: 3rem; }
.notice { border-color: #fbbf24; }
table { width: 100%; border-collapse: collapse; font-size: 0.875rem; }
th { text-align: left; font-size: 0.75rem; text-transform: uppercase; color: var(--muted); padding: 0.75rem 1.5rem; }
td { padding: 1rem 1.5rem; border-top: 1px solid var(--border); }
.num { text-align: right; font-family: ui-monospace, monospace; }
.badge { display: inline-block; padding: 0.125rem 0.625rem; border-radius: 9999px; border: 1px solid var(--border); font-size: 0.75rem; }
.badge.bmo { color: #1d4ed8; border-color: #bfdbfe; }
.badge.amc { color: #4338ca; border-color: #c7d2fe; }
.group-head { display: flex; justify-content: space-between; align-items: center; }
.filter { display: flex; gap: 1rem; align-items: flex-end; flex-wrap: wrap; }
.pager { display: flex; gap: 1rem; align-items: center; justify-content: space-between; }
.up { color: var(--up); }
.down { color: var(--down); }
.stat { display: flex; justify-content: space-between; padding: 0.5rem 0; }
.grid { display: grid; grid-template-columns: 2fr 1fr; gap: 1.5rem; }
a { color: var(--accent); text-decoration: none; }
"#;

/// Wraps a page body in the shared document shell.
pub fn layout(title: &str, theme: Theme, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<style>{style}</style>\n</head>\n\
<body class=\"{theme}\">\n<div class=\"container\">\n{body}\n</div>\n</body>\n</html>\n",
        title = escape(title),
        style = STYLE,
        theme = theme.as_str(),
        body = body,
    )
}
