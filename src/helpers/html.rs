//! HTML helper functions

pub use crate::content::markdown::html_escape;

/// Generate an anchor tag
pub fn link_to(path: &str, text: &str, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, c))
        .unwrap_or_default();
    format!(
        r#"<a{} href="{}">{}</a>"#,
        class_attr,
        path,
        html_escape(text)
    )
}

/// Generate an external anchor tag (opens in a new tab)
pub fn external_link_to(url: &str, text: &str) -> String {
    format!(
        r#"<a target="_blank" rel="noopener noreferrer" href="{}">{}</a>"#,
        url,
        html_escape(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_to() {
        assert_eq!(
            link_to("/a-post", "A <post>", None),
            r#"<a href="/a-post">A &lt;post&gt;</a>"#
        );
        assert_eq!(
            link_to("/", "home", Some("return-link")),
            r#"<a class="return-link" href="/">home</a>"#
        );
    }
}
