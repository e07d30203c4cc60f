use std::path::Path;

use mdshare::document::Document;
use mdshare::export::{self, ExportFormat};
use mdshare::link::{FixedPassword, LinkError, ShareLink, decode_link};
use mdshare::render;

const ORIGIN: &str = "http://localhost:5173";

fn fixture() -> Document {
    Document::load(Path::new("tests/fixtures/sample.md")).unwrap()
}

#[test]
fn test_fixture_survives_link_round_trip() {
    let document = fixture();
    let link = ShareLink::build(ORIGIN, document.source(), None).unwrap();

    let text = decode_link(link.as_str(), &mut FixedPassword::none()).unwrap();
    let reopened = Document::from_text(text);
    assert_eq!(reopened.source(), document.source());
    assert_eq!(
        render::render(&reopened).unwrap().html(),
        render::render(&document).unwrap().html()
    );
}

#[test]
fn test_protected_fixture_requires_password() {
    let document = fixture();
    let link = ShareLink::build(ORIGIN, document.source(), Some("abc123")).unwrap();

    let err = decode_link(link.as_str(), &mut FixedPassword::none()).unwrap_err();
    assert!(err.is_access_denied());
    let err = decode_link(link.as_str(), &mut FixedPassword::new("abc")).unwrap_err();
    assert!(matches!(err, LinkError::PasswordMismatch));

    let text = decode_link(link.as_str(), &mut FixedPassword::new("abc123")).unwrap();
    assert_eq!(text, document.source());
}

#[test]
fn test_fixture_renders_highlighted_code() {
    let rendered = render::render(&fixture()).unwrap();
    let html = rendered.html();
    assert!(html.contains("<code class=\"hljs language-rust\" data-language=\"Rust\">"));
    assert!(html.contains("<code class=\"hljs language-js\" data-language=\"JavaScript\">"));
    assert!(html.contains("<table>"));
    assert!(html.contains("<del>strike</del>"));
    assert!(html.contains("🚀"));
}

#[test]
fn test_fixture_exports_every_format() {
    let document = fixture();
    let rendered = render::render(&document).unwrap();
    let dir = tempfile::tempdir().unwrap();

    for format in ExportFormat::ALL {
        let path = export::export(format, &document, &rendered, dir.path()).unwrap();
        assert_eq!(path, dir.path().join(format.file_name()));
        let bytes = std::fs::read(&path).unwrap();
        match format {
            ExportFormat::Markdown => assert_eq!(bytes, document.source().as_bytes()),
            ExportFormat::Html => {
                let page = String::from_utf8(bytes).unwrap();
                assert!(page.contains("<title>Release notes</title>"));
                assert!(page.contains(rendered.html()));
            }
            ExportFormat::Pdf => assert!(bytes.starts_with(b"%PDF-")),
        }
    }
}
