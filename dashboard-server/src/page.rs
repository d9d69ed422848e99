//! HTML rendering of the dashboard index page.

use std::fmt::Write;

use vmix_integration::{ConnectionStatus, InputRecord, Mode};

use crate::clock::ClockReading;

/// Everything the index page shows
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub clock: ClockReading,
    pub status: ConnectionStatus,
    pub inputs: Vec<InputRecord>,
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn input_rows(inputs: &[InputRecord]) -> String {
    if inputs.is_empty() {
        return r#"<tr><td colspan="5" class="empty">Geen inputs beschikbaar</td></tr>"#.to_string();
    }

    let mut rows = String::new();
    for input in inputs {
        let class = match (input.selected, input.preview) {
            (true, true) => "active preview",
            (true, false) => "active",
            (false, true) => "preview",
            (false, false) => "",
        };
        let _ = write!(
            rows,
            r#"<tr class="{class}"><td>{number}</td><td>{name}</td><td>{short}</td><td>{kind}</td><td>{state}</td></tr>"#,
            number = input.number,
            name = escape_html(&input.name),
            short = escape_html(&input.short_title),
            kind = escape_html(&input.kind),
            state = escape_html(&input.state),
        );
    }
    rows
}

/// Render the full index page
pub fn render_dashboard(view: &DashboardView) -> String {
    let (connection_class, connection_label) = if view.status.connected {
        ("connected", "Verbonden")
    } else {
        ("disconnected", "Niet verbonden")
    };
    let target_mode = view.status.mode.flipped();

    format!(
        r#"<!DOCTYPE html>
<html lang="nl">
<head>
<meta charset="utf-8">
<title>vMix Dashboard</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; background: #111; color: #eee; }}
.clock {{ font-size: 2.5rem; }}
.weekday {{ font-size: 1.5rem; text-transform: capitalize; }}
.connected {{ color: #4caf50; }}
.disconnected {{ color: #f44336; }}
table {{ border-collapse: collapse; margin-top: 1rem; }}
td, th {{ border: 1px solid #444; padding: 0.3rem 0.8rem; }}
tr.active {{ background: #7a1c1c; }}
tr.preview {{ background: #1c5a1c; }}
tr.active.preview {{ background: #7a6a1c; }}
</style>
</head>
<body>
<div class="clock">{time}</div>
<div class="weekday">{weekday}</div>
<p>vMix: <span class="{connection_class}">{connection_label}</span> &middot; {mode} &middot; <code>{endpoint}</code></p>
<form id="connect"><input name="endpoint" value="{endpoint}"> <button type="submit">Verbinden</button></form>
<button id="toggle" data-mode="{target_mode}">Schakel naar {target_mode}</button>
<table>
<thead><tr><th>#</th><th>Naam</th><th>Kort</th><th>Type</th><th>Status</th></tr></thead>
<tbody>{rows}</tbody>
</table>
<script>
document.getElementById("toggle").addEventListener("click", async (e) => {{
  await fetch("/api/toggle-mode", {{ method: "POST", headers: {{ "Content-Type": "application/json" }}, body: JSON.stringify({{ mode: e.target.dataset.mode }}) }});
  location.reload();
}});
document.getElementById("connect").addEventListener("submit", async (e) => {{
  e.preventDefault();
  const endpoint = new FormData(e.target).get("endpoint");
  const res = await fetch("/api/connect", {{ method: "POST", headers: {{ "Content-Type": "application/json" }}, body: JSON.stringify({{ endpoint }}) }});
  const body = await res.json();
  alert(body.message);
  location.reload();
}});
</script>
</body>
</html>
"#,
        time = escape_html(&view.clock.time),
        weekday = view.clock.weekday,
        connection_class = connection_class,
        connection_label = connection_label,
        mode = mode_label(view.status.mode),
        endpoint = escape_html(&view.status.endpoint),
        target_mode = target_mode,
        rows = input_rows(&view.inputs),
    )
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Demo => "Demo modus",
        Mode::Live => "Live modus",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(connected: bool, inputs: Vec<InputRecord>) -> DashboardView {
        DashboardView {
            clock: ClockReading {
                time: "2024-03-15 09:05:07".to_string(),
                weekday: "vrijdag",
            },
            status: ConnectionStatus {
                connected,
                mode: Mode::Live,
                endpoint: "10.0.0.5:8088".to_string(),
            },
            inputs,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_marks_active_and_preview_rows() {
        let mut camera = InputRecord::new(1);
        camera.name = "Camera <1>".to_string();
        camera.selected = true;
        let mut clip = InputRecord::new(2);
        clip.preview = true;

        let html = render_dashboard(&view(true, vec![camera, clip]));

        assert!(html.contains("2024-03-15 09:05:07"));
        assert!(html.contains("vrijdag"));
        assert!(html.contains(r#"<span class="connected">Verbonden</span>"#));
        assert!(html.contains(r#"<tr class="active"><td>1</td><td>Camera &lt;1&gt;</td>"#));
        assert!(html.contains(r#"<tr class="preview"><td>2</td>"#));
        assert!(html.contains(r#"data-mode="Demo""#));
    }

    #[test]
    fn test_render_disconnected_without_inputs() {
        let html = render_dashboard(&view(false, Vec::new()));

        assert!(html.contains("Niet verbonden"));
        assert!(html.contains("Geen inputs beschikbaar"));
        assert!(html.contains("<code>10.0.0.5:8088</code>"));
    }
}
