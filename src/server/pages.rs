//! HTML pages for the preview server

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::catalog::PostDescriptor;
use crate::config::BlogConfig;
use crate::helpers::{external_link_to, format_date, html_escape, link_to};
use crate::view::{ViewState, NOT_FOUND_TITLE};

/// Characters that must be escaped in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

const STYLE: &str = r#"
body { max-width: 46rem; margin: 0 auto; padding: 1rem; font-family: sans-serif; }
.error-banner { background: #fde8e8; border: 1px solid #c0392b; padding: 0.5rem 1rem; }
.markdown-image { max-width: 100%; height: auto; }
.highlight table { width: 100%; }
.highlight .code pre { white-space: pre-wrap; word-break: break-word; margin: 0; }
.highlight .gutter { user-select: none; padding-right: 0.75rem; text-align: right; }
.blog-post-header-badge { background: #2980b9; color: #fff; padding: 0 0.4rem; margin-left: 0.4rem; }
.blog-post-header-date, .blog-info-date { color: #777; margin-bottom: 0; }
.similar-post-name { margin-right: 0.75rem; }
.primary-footer { color: #777; margin-top: 3rem; }
"#;

/// Link target for a post, percent-encoded
pub fn post_href(post: &PostDescriptor) -> String {
    format!("/{}", utf8_percent_encode(post.identity(), PATH_SEGMENT))
}

/// Full page shell: header, dismissible error banner, content, footer
pub fn layout(config: &BlogConfig, title: &str, error: Option<&str>, body: &str) -> String {
    let banner = error
        .map(|message| {
            format!(
                r#"<div class="error-banner"><p>{}</p><form method="post" action="/__error/dismiss"><button type="submit">dismiss</button></form></div>"#,
                html_escape(message)
            )
        })
        .unwrap_or_default();

    let contact = if config.email.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span>email me at <a href="mailto:{0}">{0}</a></span>"#,
            config.email
        )
    };

    let repository = if config.repository.is_empty() {
        html_escape(&config.author)
    } else {
        external_link_to(&config.repository, &config.author)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<header class="primary-header">{brand}{contact}</header>
{banner}
<div class="content">
{body}
</div>
<footer class="primary-footer">
<p>version {version}</p>
<p>copyright (c) {author}</p>
</footer>
</body>
</html>"#,
        title = html_escape(title),
        style = STYLE,
        brand = link_to("/", &config.title, Some("primary-header-brand")),
        contact = contact,
        banner = banner,
        body = body,
        version = env!("CARGO_PKG_VERSION"),
        author = repository,
    )
}

/// The listing body: every post, newest first, with a "new" badge inside the
/// configured window
pub fn home(config: &BlogConfig, posts: &[PostDescriptor], today: NaiveDate) -> String {
    let mut body = String::new();
    for (index, post) in posts.iter().enumerate() {
        let badge = if post.is_new(today, config.new_post_window_days) {
            r#"<span class="blog-post-header-badge">new</span>"#
        } else {
            ""
        };
        body.push_str(&format!(
            r#"<div class="blog-post-header">
<p class="blog-post-header-date">{date}</p>
<a class="blog-post-header-link" href="{href}">{index}. {name}</a>{badge}
</div>
"#,
            date = format_date(post.date),
            href = post_href(post),
            index = index,
            name = html_escape(&post.name),
            badge = badge,
        ));
    }
    body
}

/// The post body for whatever state the view controller landed in
pub fn post(state: &ViewState) -> String {
    let inner = match state {
        ViewState::Idle | ViewState::Loading => r#"<div class="loading">loading...</div>"#.to_string(),
        ViewState::Found { post, html } => format!(
            r#"<p class="blog-info-date">{}</p>
{}"#,
            format_date(post.date),
            html
        ),
        ViewState::NotFound { suggestions, .. } => {
            let mut body = format!("<h1>{}</h1>\n", html_escape(NOT_FOUND_TITLE));
            if !suggestions.is_empty() {
                body.push_str("<span>Similar post names: ");
                for similar in suggestions {
                    body.push_str(&format!(
                        r#"<a class="similar-post-name" href="{}">{}</a>"#,
                        post_href(&similar.descriptor),
                        html_escape(&similar.descriptor.name)
                    ));
                }
                body.push_str("</span>\n");
            }
            body
        }
    };

    format!(
        r#"<div class="blog-post">
{}
{}
</div>"#,
        inner,
        link_to("/", "<- return to home", Some("return-link"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::SimilarPost;

    fn descriptor(name: &str, safe_name: Option<&str>, date: &str) -> PostDescriptor {
        PostDescriptor {
            name: name.to_string(),
            safe_name: safe_name.map(|s| s.to_string()),
            local_path: format!("{}.md", name),
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn test_home_lists_posts_in_given_order() {
        let config = BlogConfig::default();
        let posts = vec![
            descriptor("newest", None, "2022-06-01"),
            descriptor("older", None, "2022-01-01"),
        ];
        let today: NaiveDate = "2023-01-01".parse().unwrap();
        let body = home(&config, &posts, today);

        let newest_at = body.find("0. newest").unwrap();
        let older_at = body.find("1. older").unwrap();
        assert!(newest_at < older_at);
        // Both posts are well outside the new-post window
        assert!(!body.contains("badge\">new"));
    }

    #[test]
    fn test_home_new_badge() {
        let config = BlogConfig::default();
        let posts = vec![descriptor("fresh", None, "2022-06-01")];
        let today: NaiveDate = "2022-06-03".parse().unwrap();
        let body = home(&config, &posts, today);
        assert!(body.contains(r#"<span class="blog-post-header-badge">new</span>"#));
    }

    #[test]
    fn test_post_href_encodes_spaces() {
        let post = descriptor("hello world", None, "2022-01-01");
        assert_eq!(post_href(&post), "/hello%20world");
    }

    #[test]
    fn test_layout_error_banner() {
        let config = BlogConfig::default();
        let page = layout(&config, "t", Some("could not load \"x\""), "body");
        assert!(page.contains(r#"<div class="error-banner">"#));
        assert!(page.contains("/__error/dismiss"));

        // The stylesheet always mentions the banner class; only the markup
        // must be absent once the error is gone.
        let clean = layout(&config, "t", None, "body");
        assert!(!clean.contains(r#"<div class="error-banner">"#));
        assert!(!clean.contains("/__error/dismiss"));
    }

    #[test]
    fn test_not_found_page_links_suggestions() {
        let state = ViewState::NotFound {
            identity: "frist".to_string(),
            suggestions: vec![SimilarPost {
                descriptor: descriptor("first post", Some("first-post"), "2022-01-01"),
                score: 10,
            }],
        };
        let body = post(&state);
        assert!(body.contains("Could not find blog post"));
        assert!(body.contains(r#"href="/first-post""#));
        assert!(body.contains("first post"));
    }
}
