use ammonia::Builder;
use std::collections::HashSet;

/// Cleans the HTML body of a country, program, post, page or FAQ answer.
/// Formatting tags, links, images and tables survive; scripts, event
/// handlers and inline styles do not.
pub fn sanitize_rich_content(html_input: &str) -> String {
    let tags_to_allow = [
        "h1", "h2", "h3", "h4", "h5", "h6", "b", "strong", "i", "em", "u", "p", "br", "span",
        "a", "ul", "ol", "li", "blockquote", "code", "pre", "hr", "img", "table", "thead",
        "tbody", "tr", "th", "td", "s", "del", "div",
    ];
    let safe_tags = tags_to_allow.iter().cloned().collect::<HashSet<_>>();

    let safe_attributes = ["src", "href", "alt", "title", "class", "width", "height"];
    let generic_attributes = safe_attributes.iter().cloned().collect::<HashSet<_>>();

    Builder::new()
        .tags(safe_tags)
        .generic_attributes(generic_attributes)
        .link_rel(Some("nofollow noopener"))
        .clean(html_input)
        .to_string()
}

/// Plain text with every tag removed. `&` is escaped before cleaning so the
/// only entities in the output are the ones the cleaner added, and those are
/// decoded again since templates escape on output.
pub fn strip_all_html(input: &str) -> String {
    Builder::new()
        .tags(HashSet::new())
        .clean(&input.replace('&', "&amp;"))
        .to_string()
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
