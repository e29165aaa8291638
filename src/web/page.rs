//! HTML for the form / result page.
//!
//! Server-rendered, no JavaScript. Everything user-supplied goes through
//! [`escape_html`]; the summary goes through [`render_markdown`], which
//! neutralises raw HTML in the model output.

use pulldown_cmark::{Event, Options, Parser, html};

use crate::roi::{self, Metric, RoiEstimate};
use crate::scenarios::{self, Scenario};
use crate::summary::validate;
use crate::summary::{ExportFormat, SummaryResult};

/// What the output section shows.
pub(super) enum Outcome<'a> {
    /// Nothing submitted yet; show instructions.
    Idle,
    /// Submission refused before any provider call.
    Rejected(&'a str),
    Generated(&'a SummaryResult),
}

pub(super) struct PageView<'a> {
    pub app_name: &'a str,
    pub provider: &'a str,
    pub model: &'a str,
    pub scenario: &'a Scenario,
    pub notes: &'a str,
    pub roi: RoiEstimate,
    pub outcome: Outcome<'a>,
}

const STYLE: &str = r#"
    *, *::before, *::after { box-sizing: border-box; }
    body {
      margin: 0; font-family: system-ui, -apple-system, sans-serif;
      background: #f7f7fa; color: #222;
      display: grid; grid-template-columns: 320px 1fr; min-height: 100vh;
    }
    aside { background: #eef0f6; padding: 1.5rem; border-right: 1px solid #dde; }
    main { padding: 2rem 3rem; max-width: 1100px; }
    h1 { margin-top: 0; }
    hr { border: none; border-top: 1px solid #dde; margin: 1.5rem 0; }
    .metric-card {
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      padding: 1rem; border-radius: 10px; color: white; text-align: center;
      margin-bottom: 0.75rem;
    }
    .metric-card .value { font-size: 1.6em; font-weight: bold; }
    .metric-card .delta { font-size: 0.8em; opacity: 0.85; }
    .metrics { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 0.75rem; }
    .success-box { padding: 1rem; border-radius: 10px; background: #d4edda; border: 1px solid #c3e6cb; color: #155724; margin: 0.75rem 0; }
    .error-box { padding: 1rem; border-radius: 10px; background: #f8d7da; border: 1px solid #f5c6cb; color: #721c24; margin: 0.75rem 0; white-space: pre-wrap; }
    .info-box { padding: 1rem; border-radius: 10px; background: #e7f1fb; border: 1px solid #b8daff; color: #004085; margin: 0.75rem 0; }
    .compare { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
    .compare div { padding: 1rem; border-radius: 10px; }
    .compare .manual { background: #f8d7da; border: 2px solid #f5c6cb; color: #721c24; }
    .compare .assisted { background: #d4edda; border: 2px solid #c3e6cb; color: #155724; }
    .compare .big { font-size: 2em; font-weight: bold; margin: 0.5rem 0; }
    textarea { width: 100%; height: 300px; font-family: ui-monospace, monospace; font-size: 0.9rem; padding: 0.75rem; }
    button { padding: 0.6rem 1.2rem; border-radius: 8px; border: 1px solid #667eea; background: #667eea; color: white; cursor: pointer; }
    button.primary { width: 100%; font-size: 1.05rem; margin-top: 0.75rem; }
    .exports { display: flex; gap: 0.75rem; }
    .summary { background: white; border: 1px solid #dde; border-radius: 10px; padding: 1rem 1.5rem; }
    label { display: block; margin: 0.5rem 0 0.25rem; }
    footer { text-align: center; color: #666; font-size: 0.9em; padding: 1.5rem 0; }
"#;

/// Render the whole page.
pub(super) fn render(view: &PageView<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(&format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\" />\n  \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n  \
         <title>{} — Discharge Assistant</title>\n  <style>{STYLE}</style>\n</head>\n<body>\n",
        escape_html(view.app_name)
    ));

    render_sidebar(&mut out, view);

    out.push_str("<main>\n<h1>🏥 AI Discharge Summary Generator</h1>\n");
    out.push_str(&format!(
        "<p>Powered by <code>{}</code> via {}</p>\n<hr />\n",
        escape_html(view.model),
        escape_html(view.provider)
    ));

    render_input(&mut out, view);
    out.push_str("<hr />\n<h2>📄 AI-Generated Discharge Summary</h2>\n");
    render_output(&mut out, view);

    out.push_str(
        "<hr />\n<footer><b>Discharge Assistant</b><br />\
         <i>Drafts are generated by a language model and must be reviewed by a clinician.</i></footer>\n\
         </main>\n</body>\n</html>\n",
    );
    out
}

fn render_sidebar(out: &mut String, view: &PageView<'_>) {
    out.push_str("<aside>\n<h2>📊 Impact Metrics</h2>\n");
    push_metrics(out, &roi::IMPACT_METRICS);

    let r = &view.roi;
    out.push_str("<hr />\n<h2>💰 ROI Calculator</h2>\n<form method=\"get\" action=\"/\">\n");
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"scenario\" value=\"{}\" />\n",
        escape_html(view.scenario.id)
    ));
    out.push_str(&format!(
        "<label>Summaries per day: {spd}</label>\
         <input type=\"range\" name=\"summaries_per_day\" min=\"{smin}\" max=\"{smax}\" value=\"{spd}\" />\n\
         <label>Number of physicians: {ph}</label>\
         <input type=\"range\" name=\"physicians\" min=\"{pmin}\" max=\"{pmax}\" value=\"{ph}\" />\n\
         <button type=\"submit\">Recalculate</button>\n</form>\n",
        spd = r.summaries_per_day,
        smin = roi::SUMMARIES_PER_DAY_RANGE.0,
        smax = roi::SUMMARIES_PER_DAY_RANGE.1,
        ph = r.physicians,
        pmin = roi::PHYSICIANS_RANGE.0,
        pmax = roi::PHYSICIANS_RANGE.1,
    ));

    out.push_str("<div class=\"metrics\">\n");
    for (label, value) in [
        ("Daily Time Saved", r.daily_display()),
        ("Annual Time Saved", r.annual_hours_display()),
        ("Annual Cost Savings", r.cost_display()),
    ] {
        out.push_str(&format!(
            "<div class=\"metric-card\"><div>{label}</div><div class=\"value\">{}</div></div>\n",
            escape_html(&value)
        ));
    }
    out.push_str("</div>\n");

    out.push_str(&format!(
        "<hr />\n<div class=\"info-box\"><b>Built with:</b><ul><li>{}</li><li>Rust / axum</li></ul></div>\n</aside>\n",
        escape_html(view.model)
    ));
}

fn render_input(out: &mut String, view: &PageView<'_>) {
    out.push_str("<h2>📝 Clinical Notes Input</h2>\n<h3>Select Patient Scenario</h3>\n");

    // Scenario picker reloads the page with the preset notes.
    out.push_str("<form method=\"get\" action=\"/\">\n<label for=\"scenario\">Choose a scenario or create custom:</label>\n<select id=\"scenario\" name=\"scenario\">\n");
    for s in scenarios::all() {
        let selected = if s.id == view.scenario.id { " selected" } else { "" };
        out.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            escape_html(s.id),
            escape_html(s.title)
        ));
    }
    out.push_str("</select>\n");
    push_roi_hidden(out, &view.roi);
    out.push_str("<button type=\"submit\">Load</button>\n</form>\n");

    out.push_str("<form method=\"post\" action=\"/generate\">\n");
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"scenario\" value=\"{}\" />\n",
        escape_html(view.scenario.id)
    ));
    push_roi_hidden(out, &view.roi);
    if view.scenario.is_custom() {
        out.push_str(
            "<label for=\"notes\">Enter custom clinical notes:</label>\n\
             <textarea id=\"notes\" name=\"notes\" placeholder=\"Enter patient information, chief complaint, \
             vitals, hospital course, medications, etc.\">\n",
        );
    } else {
        out.push_str(
            "<label for=\"notes\">Clinical notes (editable):</label>\n\
             <textarea id=\"notes\" name=\"notes\" title=\"You can edit the scenario or use as-is\">\n",
        );
    }
    out.push_str(&escape_html(view.notes));
    out.push_str("</textarea>\n");

    let hints = validate::suggestions(view.notes);
    if !hints.is_empty() {
        out.push_str("<details>\n<summary>📋 Input Suggestions</summary>\n<ul>\n");
        for hint in hints {
            let icon = if hint.is_warning() { "⚠️" } else { "💡" };
            out.push_str(&format!("<li>{icon} {}</li>\n", hint.message()));
        }
        out.push_str("</ul>\n</details>\n");
    }

    out.push_str("<button class=\"primary\" type=\"submit\">🚀 Generate Summary</button>\n</form>\n");
}

fn render_output(out: &mut String, view: &PageView<'_>) {
    match view.outcome {
        Outcome::Idle => {
            out.push_str(
                "<div class=\"info-box\">👆 <b>Instructions:</b><ol>\
                 <li>Select a patient scenario or enter custom notes</li>\
                 <li>Click 'Generate Summary'</li>\
                 <li>Review the AI-generated discharge summary</li>\
                 <li>Export it as TXT or Markdown</li></ol></div>\n",
            );
            out.push_str(
                "<details open>\n<summary>✨ Why use AI for discharge summaries?</summary>\n<ul>\
                 <li>⚡ Drafts in seconds instead of half an hour of typing</li>\
                 <li>📋 Standardized section layout on every summary</li>\
                 <li>😊 More physician time for patient care</li></ul>\n</details>\n",
            );
        }
        Outcome::Rejected(message) => {
            out.push_str(&format!(
                "<div class=\"error-box\">⚠️ {}</div>\n",
                escape_html(message)
            ));
        }
        Outcome::Generated(result) => render_result(out, result),
    }
}

fn render_result(out: &mut String, result: &SummaryResult) {
    out.push_str(
        "<h3>⏱️ Time Comparison</h3>\n<div class=\"compare\">\n\
         <div class=\"manual\"><b>❌ Manual Process</b><div class=\"big\">30 min</div>Physician time</div>\n\
         <div class=\"assisted\"><b>✅ AI-Assisted</b><div class=\"big\">3 min</div>Review time</div>\n\
         </div>\n<hr />\n",
    );

    if result.is_error() {
        out.push_str(&format!(
            "<div class=\"error-box\">❌ {}</div>\n",
            escape_html(&result.summary)
        ));
        return;
    }

    out.push_str("<div class=\"success-box\">✅ Summary Generated Successfully!</div>\n");
    out.push_str(&format!(
        "<div class=\"summary\">\n{}</div>\n",
        render_markdown(&result.summary)
    ));

    out.push_str("<hr />\n<h3>💾 Export Options</h3>\n<div class=\"exports\">\n");
    // The HTML parser drops one LF right after `<textarea>`; emit it so a
    // leading LF in the summary survives the round trip.
    for format in ExportFormat::ALL {
        out.push_str(&format!(
            "<form method=\"post\" action=\"/download\">\
             <input type=\"hidden\" name=\"format\" value=\"{}\" />\
             <textarea name=\"summary\" hidden>\n{}</textarea>\
             <button type=\"submit\">{}</button></form>\n",
            format.extension(),
            escape_html(&result.summary),
            format.label()
        ));
    }
    out.push_str("</div>\n");

    out.push_str("<hr />\n<h3>📊 Performance Metrics</h3>\n<div class=\"metrics\">\n");
    let processing_time = format!("{}s", result.metadata.processing_time);
    out.push_str(&metric_card("Processing Time", &processing_time, "Real-time"));
    out.push_str(&metric_card("Model", &result.metadata.model, "generation service"));
    for m in &roi::PERFORMANCE_METRICS {
        out.push_str(&metric_card(m.label, m.value, m.delta));
    }
    out.push_str("</div>\n");
}

fn push_metrics(out: &mut String, metrics: &[Metric]) {
    out.push_str("<div class=\"metrics\">\n");
    for m in metrics {
        out.push_str(&metric_card(m.label, m.value, m.delta));
    }
    out.push_str("</div>\n");
}

fn metric_card(label: &str, value: &str, delta: &str) -> String {
    format!(
        "<div class=\"metric-card\"><div>{}</div><div class=\"value\">{}</div><div class=\"delta\">{}</div></div>\n",
        escape_html(label),
        escape_html(value),
        escape_html(delta)
    )
}

fn push_roi_hidden(out: &mut String, r: &RoiEstimate) {
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"summaries_per_day\" value=\"{}\" />\
         <input type=\"hidden\" name=\"physicians\" value=\"{}\" />\n",
        r.summaries_per_day, r.physicians
    ));
}

/// Escape text for use in HTML element content and quoted attributes.
pub(super) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
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

/// Markdown → HTML. Raw HTML blocks and inline tags from the model are
/// emitted as escaped text, never as markup.
pub(super) fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
