//! Markdown rendering with syntax highlighting
//!
//! GitHub-flavored tables and strikethrough plus gemoji shortcodes, with two
//! overrides on top of plain markdown: images get a CSS class for responsive
//! scaling, and fenced code blocks with a recognized language tag go through
//! syntect with a line-number gutter.

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

lazy_static! {
    static ref SHORTCODE_RE: Regex = Regex::new(r":([a-zA-Z0-9_+-]+):").unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer with default settings
    pub fn new() -> Self {
        Self::with_options("Solarized (light)", true)
    }

    /// Create with a specific syntect theme and line-number toggle
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();
        let mut in_image = false;
        let mut image_target: Option<(String, String)> = None;
        let mut image_alt = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(|l| l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let rendered = self.render_code_block(&code_content, code_lang.as_deref());
                    events.push(Event::Html(CowStr::from(rendered)));
                    code_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(&text);
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    in_image = true;
                    image_target = Some((dest_url.to_string(), title.to_string()));
                    image_alt.clear();
                }
                Event::End(TagEnd::Image) => {
                    in_image = false;
                    if let Some((dest, title)) = image_target.take() {
                        events.push(Event::Html(CowStr::from(image_tag(
                            &dest, &image_alt, &title,
                        ))));
                    }
                }
                // Alt text of the image being collected
                Event::Text(text) if in_image => {
                    image_alt.push_str(&text);
                }
                Event::Text(text) => {
                    events.push(Event::Text(CowStr::from(replace_shortcodes(&text))));
                }
                other => {
                    if !in_image {
                        events.push(other);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Render one fenced/indented code block.
    ///
    /// A recognized language tag goes through syntect; everything else
    /// degrades to a plain escaped `<code>` element.
    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        let code = code.trim_end_matches('\n');

        if let Some(lang) = lang {
            let syntax = self
                .syntax_set
                .find_syntax_by_token(lang)
                .or_else(|| self.syntax_set.find_syntax_by_extension(lang));

            if let Some(syntax) = syntax {
                match self.highlight(code, syntax, lang) {
                    Ok(highlighted) => return highlighted,
                    Err(e) => {
                        tracing::warn!("Highlighting failed for language {:?}: {}", lang, e);
                    }
                }
            }
        }

        format!("<code>{}</code>", html_escape(code))
    }

    fn highlight(
        &self,
        code: &str,
        syntax: &syntect::parsing::SyntaxReference,
        lang: &str,
    ) -> Result<String> {
        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| anyhow::anyhow!("no syntect themes available"))?;

        let highlighted = highlighted_html_for_string(code, &self.syntax_set, syntax, theme)?;
        // highlighted_html_for_string wraps its output in a styled <pre>;
        // strip it so the block can carry our own gutter markup.
        let inner = strip_pre_wrapper(&highlighted);

        if self.line_numbers {
            Ok(add_line_numbers(inner, lang))
        } else {
            Ok(format!(
                r#"<figure class="highlight {}"><pre>{}</pre></figure>"#,
                lang, inner
            ))
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the outer `<pre ...>` element syntect emits
fn strip_pre_wrapper(html: &str) -> &str {
    let html = html.trim_end();
    let html = html.strip_suffix("</pre>").unwrap_or(html);
    match html.find('>') {
        Some(pos) if html.starts_with("<pre") => html[pos + 1..].trim_matches('\n'),
        _ => html,
    }
}

/// Add a line-number gutter next to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let line_count = lines.len();

    let mut gutter = String::new();
    let mut code_lines = String::new();

    for (i, line) in lines.iter().enumerate() {
        gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
        code_lines.push_str(line);
        if i < line_count - 1 {
            gutter.push('\n');
            code_lines.push('\n');
        }
    }

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang, gutter, code_lines
    )
}

/// Image markup with the responsive-scaling class
fn image_tag(dest: &str, alt: &str, title: &str) -> String {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(title))
    };
    format!(
        r#"<img class="markdown-image" src="{}" alt="{}"{}>"#,
        dest,
        html_escape(alt),
        title_attr
    )
}

/// Replace `:shortcode:` gemoji references with their emoji.
///
/// Unknown shortcodes are left untouched.
fn replace_shortcodes(text: &str) -> String {
    SHORTCODE_RE
        .replace_all(text, |caps: &regex::Captures| {
            match emojis::get_by_shortcode(&caps[1]) {
                Some(emoji) => emoji.as_str().to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
