use ammonia::{Builder, UrlRelative};
use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_html(&raw_html)
}

/// Strips unsafe HTML. Applied to every description that will be
/// rendered unescaped, whatever its source.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::Deny)
        .clean(content)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_becomes_html() {
        let html = safe_markdown_to_html("# Título\n\nUm **projeto**.");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>projeto</strong>"));
    }

    #[test]
    fn scripts_are_stripped() {
        let html = safe_markdown_to_html("texto <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("texto"));
    }
}
