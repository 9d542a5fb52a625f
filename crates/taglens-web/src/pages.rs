//! Server-rendered HTML pages
//!
//! The demo renders plain HTML: a home page, the classify form, the result
//! table, and an about page. User-submitted text is escaped before it is
//! echoed back.

use taglens_core::{ClassificationResult, Error};

const STYLE: &str = r#"
  body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #1a1a1a; }
  nav a { margin-right: 1rem; }
  textarea { width: 100%; min-height: 9rem; font: inherit; padding: 0.5rem; }
  button { padding: 0.5rem 1.25rem; font: inherit; cursor: pointer; }
  table { border-collapse: collapse; margin-top: 1rem; }
  th, td { border: 1px solid #ccc; padding: 0.4rem 0.9rem; text-align: left; }
  .error { color: #a33; }
  blockquote { border-left: 3px solid #ccc; margin-left: 0; padding-left: 1rem; color: #444; }
"#;

/// Escape text for safe interpolation into HTML body content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} | taglens</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a><a href=\"/classify\">Classify</a><a href=\"/about\">About</a></nav>\n\
         {body}\n</body>\n</html>"
    )
}

pub fn render_home() -> String {
    page_shell(
        "Home",
        "<h1>taglens</h1>\n\
         <p>Paste the abstract of a computer-science research article and get the\n\
         most likely subject categories, scored by a hosted SciBERT-based\n\
         classifier.</p>\n\
         <p><a href=\"/classify\">Classify an abstract</a></p>",
    )
}

pub fn render_classify_form() -> String {
    page_shell(
        "Classify",
        "<h1>Classify an abstract</h1>\n\
         <form method=\"post\" action=\"/classify\">\n\
         <textarea name=\"abstract\" placeholder=\"Enter research paper abstract here...\"></textarea>\n\
         <p><button type=\"submit\">Classify</button></p>\n\
         </form>",
    )
}

pub fn render_result(input_text: &str, result: &ClassificationResult) -> String {
    let mut rows = String::new();
    for score in &result.labels {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}%</td></tr>\n",
            escape_html(&score.label),
            score.confidence
        ));
    }

    let body = format!(
        "<h1>Top subjects</h1>\n\
         <blockquote>{}</blockquote>\n\
         <table>\n<tr><th>Subject</th><th>Confidence</th></tr>\n{}</table>\n\
         <p><a href=\"/classify\">Classify another abstract</a></p>",
        escape_html(input_text),
        rows
    );
    page_shell("Result", &body)
}

pub fn render_error(input_text: &str, error: &Error) -> String {
    let body = format!(
        "<h1>Classification failed</h1>\n\
         <p class=\"error\">{}</p>\n\
         <blockquote>{}</blockquote>\n\
         <p><a href=\"/classify\">Try again</a></p>",
        user_message(error),
        escape_html(input_text)
    );
    page_shell("Error", &body)
}

pub fn render_about() -> String {
    page_shell(
        "About",
        "<h1>About</h1>\n\
         <p>This demo forwards abstracts to a hosted multi-label subject\n\
         classifier and shows the top five categories. Identical abstracts are\n\
         answered from a local result cache, and concurrent duplicate requests\n\
         share a single call to the hosted model.</p>",
    )
}

/// Human-readable message per error kind
pub fn user_message(error: &Error) -> &'static str {
    match error {
        Error::InvalidInput => "Please enter a valid abstract.",
        Error::Timeout => "The classifier is taking longer than expected. Please try again in a moment.",
        Error::Upstream(_) | Error::MalformedResponse(_) => {
            "Unable to classify. Please try again."
        }
        Error::Internal(_) => "Something went wrong. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taglens_core::LabelScore;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_result_page_escapes_input() {
        let result = ClassificationResult {
            labels: vec![LabelScore {
                label: "cs.LG".to_string(),
                confidence: 91.5,
            }],
        };
        let page = render_result("<b>bold</b> abstract", &result);

        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt; abstract"));
        assert!(page.contains("cs.LG"));
        assert!(page.contains("91.5%"));
        assert!(!page.contains("<b>bold</b>"));
    }

    #[test]
    fn test_error_messages_per_kind() {
        assert_eq!(
            user_message(&Error::InvalidInput),
            "Please enter a valid abstract."
        );
        assert_eq!(
            user_message(&Error::Upstream("503".into())),
            "Unable to classify. Please try again."
        );
        assert!(user_message(&Error::Timeout).contains("try again"));
    }

    #[test]
    fn test_form_posts_abstract_field() {
        let page = render_classify_form();
        assert!(page.contains("name=\"abstract\""));
        assert!(page.contains("action=\"/classify\""));
    }
}
