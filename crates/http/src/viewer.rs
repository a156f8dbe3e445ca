//! Index page - embedded HTML describing the datasource
//!
//! Lists the loaded dataset names so the page doubles as a quick check that
//! the data file was picked up. Grafana's "Save & Test" also hits `/`.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use std::fmt::Write as _;
use std::sync::Arc;

use crate::AppState;

pub const PAGE_TITLE: &str = "Grafana SimpleJSON Value Mapper";

/// Embedded HTML template for the index page
const INDEX_HTML: &str = include_str!("index.html");

pub async fn serve_index(State(state): State<Arc<AppState>>) -> Response {
    let page = render_index(&state.resolver.datasets().names());
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(page))
        .into_response()
}

fn render_index(names: &[&str]) -> String {
    let mut items = String::new();
    for name in names {
        let _ = writeln!(items, "      <li><code>{}</code></li>", escape_html(name));
    }
    if items.is_empty() {
        items.push_str("      <li>No datasets loaded</li>\n");
    }
    INDEX_HTML.replace("{{title}}", PAGE_TITLE).replace("{{datasets}}", items.trim_end())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
