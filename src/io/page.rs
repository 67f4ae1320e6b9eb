use crate::models::Engine;
use crate::stages::escape_html;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Text Humanizer</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; color: #222; }
textarea { width: 100%; min-height: 14rem; font: inherit; padding: .5rem; box-sizing: border-box; }
.controls { margin: .75rem 0; display: flex; gap: 1rem; align-items: center; }
.result { border-top: 1px solid #ccc; margin-top: 1.5rem; padding-top: 1rem; line-height: 1.6; }
</style>
</head>
<body>
<h1>Text Humanizer</h1>
<form method="post" action="/">
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// What the page shows around the form
#[derive(Debug, Clone, Default)]
pub struct PageView<'a> {
    /// Text to pre-fill the textarea with
    pub input: &'a str,
    /// Rendered result markup, already escaped paragraph by paragraph
    pub output_markup: &'a str,
    /// Engine selected for the last submission
    pub engine: Engine,
    /// Whether the LLM engine can be offered
    pub llm_available: bool,
}

/// Render the single-page form
pub fn render_page(view: &PageView<'_>) -> String {
    let mut page = String::from(PAGE_HEAD);

    page.push_str("<label for=\"input_text\">Paste your text</label>\n");
    page.push_str(&format!(
        "<textarea id=\"input_text\" name=\"input_text\">{}</textarea>\n",
        escape_html(view.input)
    ));

    page.push_str("<div class=\"controls\">\n");
    if view.llm_available {
        page.push_str("<select name=\"engine\">\n");
        page.push_str(&engine_option(Engine::Rules, "Rule-based", view.engine));
        page.push_str(&engine_option(Engine::Llm, "Language model", view.engine));
        page.push_str("</select>\n");
    }
    page.push_str("<button type=\"submit\">Humanize</button>\n");
    page.push_str("</div>\n</form>\n");

    if !view.output_markup.is_empty() {
        page.push_str("<section class=\"result\">\n");
        page.push_str(view.output_markup);
        page.push_str("\n</section>\n");
    }

    page.push_str(PAGE_TAIL);
    page
}

fn engine_option(engine: Engine, label: &str, selected: Engine) -> String {
    let value = match engine {
        Engine::Rules => "rules",
        Engine::Llm => "llm",
    };
    let selected = if engine == selected { " selected" } else { "" };
    format!("<option value=\"{value}\"{selected}>{label}</option>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_page() {
        let page = render_page(&PageView::default());

        assert!(page.contains("<form method=\"post\" action=\"/\">"));
        assert!(page.contains("name=\"input_text\""));
        assert!(!page.contains("class=\"result\""));
        assert!(!page.contains("<select"));
    }

    #[test]
    fn test_render_page_escapes_input_not_output() {
        let page = render_page(&PageView {
            input: "<script>alert(1)</script>",
            output_markup: "<p>Result.</p>",
            ..Default::default()
        });

        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("<section class=\"result\">\n<p>Result.</p>"));
    }

    #[test]
    fn test_render_page_engine_selector() {
        let page = render_page(&PageView {
            engine: Engine::Llm,
            llm_available: true,
            ..Default::default()
        });

        assert!(page.contains("<option value=\"llm\" selected>"));
        assert!(page.contains("<option value=\"rules\">"));
    }
}
