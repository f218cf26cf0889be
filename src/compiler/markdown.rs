//! Markdown rendering.
//!
//! GitHub-flavored rendering with a few fixed behaviours layered on top of
//! the base parser via an event rewrite pass:
//!
//! - bare URLs, `www.` hosts and email addresses in plain text become links
//! - soft line breaks render as hard breaks (`<br />`)
//! - headings get stable slug ids, disambiguated on collision
//!
//! Raw HTML passes through unescaped. Content authors are trusted, the
//! same stance the metadata header takes.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Fallback id for headings whose text slugifies to nothing.
const EMPTY_HEADING_ID: &str = "heading";

// ASCII constructs only. The crate builds `regex` without `unicode-perl`,
// so `\s` and a bare `\b` would fail to compile.
static AUTOLINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?-u:\b)https?://[^ \t\r\n<>]+|(?-u:\b)www\.[^ \t\r\n<>]+|(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}(?-u:\b)",
    )
    .unwrap()
});

/// Render a Markdown body to HTML.
pub fn render(body: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;

    let mut events = collect_events(Parser::new_ext(body, options));
    assign_heading_ids(&mut events);

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

/// First pass over the event stream: turn soft breaks into hard breaks and
/// linkify bare URLs in plain text. Consecutive text events are coalesced
/// into one run before matching; the parser splits text at emphasis
/// delimiter runs, which would otherwise cut URLs containing `_` or `*`
/// in half. Text inside links and code blocks stays untouched, and code
/// spans are their own event kind.
fn collect_events<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut pending = String::new();
    let mut link_depth = 0usize;
    let mut code_depth = 0usize;

    for event in events {
        match event {
            Event::Text(text) if link_depth == 0 && code_depth == 0 => {
                pending.push_str(&text);
            }
            event => {
                linkify_into(std::mem::take(&mut pending), &mut out);
                match event {
                    Event::SoftBreak => out.push(Event::HardBreak),
                    Event::Start(tag) => {
                        match &tag {
                            Tag::Link { .. } => link_depth += 1,
                            Tag::CodeBlock(_) => code_depth += 1,
                            _ => {}
                        }
                        out.push(Event::Start(tag));
                    }
                    Event::End(tag) => {
                        match tag {
                            TagEnd::Link => link_depth = link_depth.saturating_sub(1),
                            TagEnd::CodeBlock => code_depth = code_depth.saturating_sub(1),
                            _ => {}
                        }
                        out.push(Event::End(tag));
                    }
                    other => out.push(other),
                }
            }
        }
    }
    linkify_into(std::mem::take(&mut pending), &mut out);

    out
}

/// Replace autolink matches in a text run with link events, keeping the
/// surrounding text. Matches that no longer look like a URL or address
/// once trimmed stay plain text.
fn linkify_into<'a>(text: String, out: &mut Vec<Event<'a>>) {
    if text.is_empty() {
        return;
    }
    if !AUTOLINK.is_match(&text) {
        out.push(Event::Text(text.into()));
        return;
    }

    let mut last = 0;
    for m in AUTOLINK.find_iter(&text) {
        // Emails end on a word boundary; URLs may have swallowed trailing
        // punctuation from the sentence around them.
        let (target, end) = if m.as_str().contains('@') && !m.as_str().contains("://") {
            (m.as_str(), m.end())
        } else {
            let trimmed = trim_trailing_punctuation(m.as_str());
            (trimmed, m.start() + trimmed.len())
        };

        if !is_linkable(target) {
            continue;
        }

        if m.start() > last {
            out.push(Event::Text(text[last..m.start()].to_string().into()));
        }

        let href = if target.starts_with("www.") {
            format!("http://{target}")
        } else if target.contains("://") {
            target.to_string()
        } else {
            format!("mailto:{target}")
        };

        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: "".into(),
            id: "".into(),
        }));
        out.push(Event::Text(target.to_string().into()));
        out.push(Event::End(TagEnd::Link));

        last = end;
    }

    if last < text.len() {
        out.push(Event::Text(text[last..].to_string().into()));
    }
}

/// Trim sentence punctuation from the end of a URL match. A closing paren
/// only counts as punctuation when it has no opening partner inside the
/// URL, so wiki-style `..._(disambiguation)` links stay whole.
fn trim_trailing_punctuation(url: &str) -> &str {
    let mut end = url.len();
    while end > 0 {
        let trimmed = &url[..end];
        match trimmed.chars().next_back() {
            Some('.' | ',' | ':' | ';' | '!' | '?' | '*' | '_' | '~' | '\'' | '"') => end -= 1,
            Some(')') => {
                let opens = trimmed.matches('(').count();
                let closes = trimmed.matches(')').count();
                if closes > opens {
                    end -= 1;
                } else {
                    break;
                }
            }
            _ => break,
        }
    }
    &url[..end]
}

/// A trimmed match must still carry a scheme, a host after `www.`, or an
/// address to become a link; `www.,` trims down to a bare `www` that
/// stays text.
fn is_linkable(target: &str) -> bool {
    target.contains("://")
        || target.contains('@')
        || target.strip_prefix("www.").is_some_and(|host| !host.is_empty())
}

/// Second pass: give every heading a stable id derived from its text.
fn assign_heading_ids(events: &mut [Event]) {
    let mut used = FxHashSet::default();

    let mut i = 0;
    while i < events.len() {
        if matches!(events[i], Event::Start(Tag::Heading { .. })) {
            let text = heading_text(&events[i..]);
            let id = unique_heading_id(&text, &mut used);
            if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
                *slot = Some(id.into());
            }
        }
        i += 1;
    }
}

/// Concatenated text content of the heading starting at `events[0]`.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in &events[1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Slugify heading text and disambiguate against ids already handed out.
fn unique_heading_id(text: &str, used: &mut FxHashSet<String>) -> String {
    let base = slug::slugify(text);
    let base = if base.is_empty() {
        EMPTY_HEADING_ID.to_string()
    } else {
        base
    };

    let mut id = base.clone();
    let mut counter = 1;
    while !used.insert(id.clone()) {
        id = format!("{base}-{counter}");
        counter += 1;
    }
    id
}
