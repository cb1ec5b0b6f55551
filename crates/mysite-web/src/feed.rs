//! RSS 2.0 rendering for the blog feed.
//!
//! The document is small and fixed-shape, so it is written directly;
//! every text node goes through `escape_xml`.

use std::fmt::Write;

use mysite_core::model::Article;

pub const FEED_TITLE: &str = "Blog articles (latest)";
pub const FEED_DESCRIPTION: &str = "Updates on changes and addition blog articles";
/// Items in the feed.
pub const FEED_LEN: usize = 5;
/// Characters of content used as an item description.
pub const SUMMARY_CHARS: usize = 200;

const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

fn escape_xml(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for c in v.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

pub fn summary(content: &str) -> String {
    content.chars().take(SUMMARY_CHARS).collect()
}

/// Render `articles` (already newest first, already truncated) as RSS.
pub fn render_rss(base_url: &str, articles: &[Article]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut out = String::new();
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#);
    let _ = writeln!(out, r#"<rss version="2.0" xmlns:dc="{DC_NS}"><channel>"#);
    let _ = writeln!(out, "<title>{}</title>", escape_xml(FEED_TITLE));
    let _ = writeln!(out, "<link>{}</link>", escape_xml(&format!("{base}/blog/articles")));
    let _ = writeln!(out, "<description>{}</description>", escape_xml(FEED_DESCRIPTION));
    if let Some(latest) = articles.first() {
        let _ = writeln!(out, "<lastBuildDate>{}</lastBuildDate>", latest.pub_date.to_rfc2822());
    }
    for a in articles {
        let link = escape_xml(&format!("{base}/blog/articles/{}", a.id));
        let _ = writeln!(out, "<item>");
        let _ = writeln!(out, "<title>{}</title>", escape_xml(&a.title));
        let _ = writeln!(out, "<link>{link}</link>");
        let _ = writeln!(out, "<description>{}</description>", escape_xml(&summary(&a.content)));
        // RSS <author> must be an email address; a display name goes in dc:creator.
        let _ = writeln!(out, "<dc:creator>{}</dc:creator>", escape_xml(&a.author.name));
        let _ = writeln!(out, "<pubDate>{}</pubDate>", a.pub_date.to_rfc2822());
        let _ = writeln!(out, r#"<guid isPermaLink="true">{link}</guid>"#);
        let _ = writeln!(out, "</item>");
    }
    let _ = writeln!(out, "</channel></rss>");
    out
}
