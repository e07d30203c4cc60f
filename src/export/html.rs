//! Standalone HTML page around rendered output.

use crate::highlight::escape_html;

const STYLESHEET: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; \
line-height: 1.6; color: #24292e; max-width: 800px; margin: 0 auto; padding: 2rem; }
h1, h2, h3, h4, h5, h6 { margin-top: 1.5em; margin-bottom: 0.5em; line-height: 1.25; }
h1, h2 { border-bottom: 1px solid #eaecef; padding-bottom: 0.3em; }
a { color: #7b2cbf; }
pre { padding: 1rem; border-radius: 6px; overflow-x: auto; }
code { font-family: SFMono-Regular, Consolas, 'Liberation Mono', Menlo, monospace; font-size: 0.9em; }
:not(pre) > code { background-color: rgba(27, 31, 35, 0.05); padding: 0.2em 0.4em; border-radius: 3px; }
blockquote { margin: 0; padding: 0 1em; color: #6a737d; border-left: 0.25em solid #dfe2e5; }
table { border-collapse: collapse; }
th, td { border: 1px solid #dfe2e5; padding: 6px 13px; }
img { max-width: 100%; }
";

/// Wrap rendered HTML in a complete page with a fixed inline stylesheet.
pub fn standalone_html(body: &str, title: Option<&str>) -> String {
    let title = escape_html(title.unwrap_or("Document"));
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>\n{STYLESHEET}</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}
