use serde::Serialize;

/// Page shell and stylesheet.
///
/// Templates use `{{page_title}}`, `{{site_title}}`, `{{content}}` and
/// `{{date}}` placeholders.
#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub page_template: &'static str,
    pub css: &'static str,
}

impl Theme {
    pub fn render_page(&self, page_title: &str, site_title: &str, content: &str, date: &str) -> String {
        self.page_template
            .replace("{{page_title}}", page_title)
            .replace("{{site_title}}", site_title)
            .replace("{{date}}", date)
            .replace("{{content}}", content)
    }
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "print" => theme_print(),
        _ => theme_minimal(),
    }
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["minimal", "print"]
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{page_title}} | {{site_title}}</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <nav class="top-nav">
    <a href="/" class="site-name">{{site_title}}</a>
  </nav>
  <main>
{{content}}
  </main>
  <footer>Generated {{date}}</footer>
</body>
</html>"#;

// ---------------------------------------------------------------------------
// Minimal Theme
// ---------------------------------------------------------------------------
fn theme_minimal() -> Theme {
    Theme {
        name: "minimal",
        page_template: PAGE_TEMPLATE,
        css: r#"*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
  line-height: 1.6;
  color: #222;
  background: #f3f4f6;
  max-width: 56rem;
  margin: 0 auto;
  padding: 2rem 1.5rem;
}
.top-nav { margin-bottom: 2rem; }
.site-name { color: #1d4ed8; text-decoration: none; font-weight: 700; font-size: 1.1rem; }
h1 { font-size: 2rem; color: #1d4ed8; text-align: center; margin-bottom: 0.5rem; }
h2 { font-size: 1.4rem; color: #374151; text-align: center; margin-bottom: 2rem; }
a { color: #2563eb; }
.back { display: block; margin-bottom: 1rem; text-decoration: none; }
.lead { text-align: center; color: #4b5563; margin-bottom: 2rem; }
.card-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1.5rem; list-style: none; }
.card-grid li { background: #fff; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); padding: 1.25rem; }
.card-grid .title { display: block; font-size: 1.15rem; font-weight: 600; color: #1f2937; text-decoration: none; }
.card-grid .meta { font-size: 0.85rem; color: #16a34a; }
.empty { text-align: center; color: #ef4444; }
.question { background: #fff; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,0.1); margin-bottom: 1rem; }
.question summary { padding: 1rem; cursor: pointer; font-weight: 500; }
.question summary:hover { background: #f9fafb; }
.qid { font-weight: 700; color: #2563eb; }
.marks { font-size: 0.85rem; color: #4b5563; }
.question-body { border-top: 1px solid #e5e7eb; padding: 1rem; }
.question-body > * + * { margin-top: 0.75rem; }
.answer { font-weight: 600; color: #16a34a; }
.answer-text { white-space: pre-wrap; font-family: inherit; font-weight: 400; color: #374151; }
.chapter, .formula, .repeats { font-size: 0.9rem; }
.diagram { font-size: 0.9rem; font-style: italic; color: #b45309; }
.formula-card { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1.25rem; }
.formula-card h3 { font-size: 1.1rem; margin-bottom: 0.5rem; }
.latex { background: #f9fafb; padding: 1rem; border-radius: 6px; font-family: "SF Mono", "Fira Code", monospace; font-size: 0.9rem; overflow-x: auto; }
.used-in { font-size: 0.8rem; color: #6b7280; margin-top: 0.75rem; }
.formula-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(20rem, 1fr)); gap: 1.5rem; }
.bottom-link { text-align: center; margin-top: 2.5rem; font-size: 0.9rem; }
footer { margin-top: 3rem; text-align: center; font-size: 0.75rem; color: #9ca3af; }
"#,
    }
}

// ---------------------------------------------------------------------------
// Print Theme
// ---------------------------------------------------------------------------
fn theme_print() -> Theme {
    Theme {
        name: "print",
        page_template: PAGE_TEMPLATE,
        css: r#"*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: Georgia, "Times New Roman", serif;
  line-height: 1.5;
  color: #000;
  background: #fff;
  max-width: 48rem;
  margin: 0 auto;
  padding: 1.5rem;
}
.top-nav, footer, .back, .bottom-link { display: none; }
h1 { font-size: 1.6rem; text-align: center; }
h2 { font-size: 1.2rem; text-align: center; margin-bottom: 1.5rem; }
a { color: #000; }
.card-grid { list-style: none; }
.card-grid li { margin-bottom: 0.5rem; }
.empty { text-align: center; font-style: italic; }
.question { border-bottom: 1px solid #999; padding: 0.75rem 0; break-inside: avoid; }
.question summary { list-style: none; font-weight: 600; }
.qid { margin-right: 0.25rem; }
.question-body { padding: 0.5rem 0 0 1.5rem; }
.answer-text { white-space: pre-wrap; font-family: inherit; }
.diagram { font-style: italic; }
.formula-card { border: 1px solid #000; padding: 0.75rem; margin-bottom: 1rem; break-inside: avoid; }
.latex { font-family: "Courier New", monospace; }
.used-in { font-size: 0.8rem; }
"#,
    }
}
