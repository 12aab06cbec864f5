use rama::http::service::web::{extract::State, response::Html};

use super::{AppState, ServiceInfo};

pub(super) async fn index(State(AppState { info, .. }): State<AppState>) -> Html<String> {
    Html(render_index_html(&info))
}

fn render_index_html(info: &ServiceInfo) -> String {
    let version = escape_html(&info.version);
    let hostname = escape_html(&info.hostname);
    format!(
        r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Chaos Edge DevOps</title>
<style>
body{{font-family:Arial,sans-serif;background:linear-gradient(135deg,#667eea,#764ba2);color:#fff;display:flex;justify-content:center;align-items:center;height:100vh;margin:0}}
.container{{text-align:center;padding:3rem;border-radius:20px;background:rgba(255,255,255,.1);backdrop-filter:blur(10px)}}
h1{{font-size:3rem;margin:0}}
.emoji{{font-size:4rem}}
a{{color:#fff}}
</style>
</head>
<body>
<div class="container">
<div class="emoji">🚀</div>
<h1>Chaos Edge DevOps</h1>
<p>Version: {version} | Host: {hostname}</p>
<p><a href="/health">Health Check</a></p>
<p><a href="/chaos/latency">Latency Chaos</a> | <a href="/chaos/fail">Failure Chaos</a></p>
</div>
</body>
</html>
"##
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
