//! Plain-text extraction from exported HTML email threads.

use scraper::{ElementRef, Html, Node};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} contains no text")]
    Empty { path: PathBuf },
}

/// Extract every visible text node, trimmed, one per line.
///
/// Headers such as `From:` and `Sent:` usually sit in their own elements, so
/// keeping one node per line preserves them for the structuring model.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    collect_text(document.root_element()).join("\n")
}

fn collect_text(element: ElementRef<'_>) -> Vec<&str> {
    if SKIP_TAGS.contains(&element.value().name()) {
        return Vec::new();
    }

    let mut parts = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t);
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    parts.extend(collect_text(child_el));
                }
            }
            _ => {}
        }
    }
    parts
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Read a thread file as audit input.
///
/// `.html`/`.htm` files are flattened to text; anything else is taken as
/// plain text.
pub fn load_thread(path: &Path) -> Result<String, InputError> {
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = if is_html(path) {
        html_to_text(&contents)
    } else {
        contents
    };

    if text.trim().is_empty() {
        return Err(InputError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const THREAD: &str = r#"
<html>
  <head><title>RE: Quote</title><style>.x { color: red; }</style></head>
  <body>
    <div><b>From:</b> Dana Agent &lt;dana@travel.example&gt;</div>
    <div><b>Sent:</b> Monday, May 5, 2025 10:00 AM</div>
    <script>track();</script>
    <p>Hi Sam,
       here is your quote.</p>
  </body>
</html>"#;

    #[test]
    fn test_text_nodes_one_per_line() {
        let text = html_to_text(THREAD);
        assert_eq!(
            text,
            "RE: Quote\n\
             From:\n\
             Dana Agent <dana@travel.example>\n\
             Sent:\n\
             Monday, May 5, 2025 10:00 AM\n\
             Hi Sam,\n       here is your quote."
        );
        assert!(!text.contains("track()"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_empty_html() {
        assert!(html_to_text("").is_empty());
    }

    #[test]
    fn test_load_thread_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("thread.HTM");
        let plain = dir.path().join("thread.txt");
        fs::write(&html, "<p>From: a@example.com</p><p>Hello</p>").unwrap();
        fs::write(&plain, "<p>kept as is</p>").unwrap();

        assert_eq!(load_thread(&html).unwrap(), "From: a@example.com\nHello");
        assert_eq!(load_thread(&plain).unwrap(), "<p>kept as is</p>");
    }

    #[test]
    fn test_load_thread_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.html");
        assert!(matches!(
            load_thread(&missing),
            Err(InputError::Read { .. })
        ));

        let blank = dir.path().join("blank.html");
        fs::write(&blank, "<html><body><script>x()</script></body></html>").unwrap();
        assert!(matches!(load_thread(&blank), Err(InputError::Empty { .. })));
    }
}
