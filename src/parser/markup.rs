//! Minimal HTML node model for in-place editing.
//!
//! The document is kept as a flat list of nodes in source order. Nodes that
//! are never touched serialize back to their exact source text, so a parse
//! followed by `to_html` is lossless. Only start tags whose attributes were
//! changed get rebuilt.

use std::ops::RangeInclusive;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
    /// `"`, `'` or `None` for bare/unquoted attributes.
    quote: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Lower-cased tag name.
    pub name: String,
    pub attrs: Vec<Attr>,
    pub self_closing: bool,
    /// Source text; dropped once the tag is modified.
    raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `<!DOCTYPE ...>`, `<?...>` and other declarations.
    Declaration(String),
    Comment(String),
    Text(String),
    /// Body of a script or style element, never parsed.
    RawText(String),
    StartTag(StartTag),
    EndTag { name: String, raw: String },
}

impl StartTag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }

    /// Set (or add) an attribute. Returns true when the tag changed.
    pub fn set_attr(&mut self, name: &str, value: &str) -> bool {
        let value = value.replace('"', "&quot;");
        match self.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            Some(a) if a.value.as_deref() == Some(value.as_str()) => return false,
            Some(a) => {
                a.value = Some(value);
                if a.quote.is_none() {
                    a.quote = Some('"');
                }
            }
            None => self.attrs.push(Attr {
                name: name.to_string(),
                value: Some(value),
                quote: Some('"'),
            }),
        }
        self.raw = None;
        true
    }

    fn write_html(&self, out: &mut String) {
        if let Some(raw) = &self.raw {
            out.push_str(raw);
            return;
        }
        out.push('<');
        out.push_str(&self.name);
        for a in &self.attrs {
            out.push(' ');
            out.push_str(&a.name);
            if let Some(v) = &a.value {
                out.push('=');
                match a.quote {
                    Some(q) => {
                        out.push(q);
                        out.push_str(v);
                        out.push(q);
                    }
                    None => out.push_str(v),
                }
            }
        }
        if self.self_closing {
            out.push_str(" /");
        }
        out.push('>');
    }
}

impl Node {
    pub fn as_start_tag(&self) -> Option<&StartTag> {
        match self {
            Node::StartTag(t) => Some(t),
            _ => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Declaration(s) | Node::Comment(s) | Node::Text(s) | Node::RawText(s) => {
                out.push_str(s)
            }
            Node::StartTag(t) => t.write_html(out),
            Node::EndTag { raw, .. } => out.push_str(raw),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let bytes = html.as_bytes();
        let mut nodes = Vec::new();
        let mut text_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'<' {
                i += 1;
                continue;
            }
            let Some((node, end)) = read_markup(html, i) else {
                // Stray '<' stays part of the text run
                i += 1;
                continue;
            };
            if text_start < i {
                nodes.push(Node::Text(html[text_start..i].to_string()));
            }
            let raw_text_of = match &node {
                Node::StartTag(t) if !t.self_closing && RAW_TEXT_ELEMENTS.contains(&t.name.as_str()) => {
                    Some(t.name.clone())
                }
                _ => None,
            };
            nodes.push(node);
            i = end;

            if let Some(name) = raw_text_of {
                let close = find_close_tag(html, i, &name);
                if close > i {
                    nodes.push(Node::RawText(html[i..close].to_string()));
                }
                i = close;
            }
            text_start = i;
        }

        if text_start < bytes.len() {
            nodes.push(Node::Text(html[text_start..].to_string()));
        }
        Document { nodes }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_html(&mut out);
        }
        out
    }

    /// Index of the first start tag satisfying `pred`.
    pub fn find_start<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&StartTag) -> bool,
    {
        self.nodes
            .iter()
            .position(|n| n.as_start_tag().is_some_and(&pred))
    }

    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.find_start(|t| t.id() == Some(id))
    }

    /// Index of the first end tag named `name`.
    pub fn find_end_tag(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| matches!(n, Node::EndTag { name: tag, .. } if tag == name))
    }

    /// Node range covering the element opened at `start`. Void, self-closing
    /// and unclosed elements cover only their start tag.
    pub fn element_range(&self, start: usize) -> RangeInclusive<usize> {
        let Some(tag) = self.nodes.get(start).and_then(Node::as_start_tag) else {
            return start..=start;
        };
        if tag.self_closing || VOID_ELEMENTS.contains(&tag.name.as_str()) {
            return start..=start;
        }
        let mut depth = 0usize;
        for (i, node) in self.nodes.iter().enumerate().skip(start + 1) {
            match node {
                Node::StartTag(t) if t.name == tag.name && !t.self_closing => depth += 1,
                Node::EndTag { name, .. } if *name == tag.name => {
                    if depth == 0 {
                        return start..=i;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        start..=start
    }

    /// Remove the element opened at `start`, plus the following text node
    /// when it is exactly `trailing`. Returns the number of nodes removed.
    pub fn remove_element(&mut self, start: usize, trailing: Option<&str>) -> usize {
        let range = self.element_range(start);
        let mut end = *range.end();
        if let Some(sep) = trailing {
            if matches!(self.nodes.get(end + 1), Some(Node::Text(t)) if t == sep) {
                end += 1;
            }
        }
        self.nodes.drain(start..=end).count()
    }

    pub fn insert(&mut self, at: usize, fragment: Vec<Node>) {
        self.nodes.splice(at..at, fragment);
    }

    pub fn start_tags_mut(&mut self) -> impl Iterator<Item = &mut StartTag> {
        self.nodes.iter_mut().filter_map(|n| match n {
            Node::StartTag(t) => Some(t),
            _ => None,
        })
    }
}

/// Read one markup construct starting at `start` (which holds '<').
fn read_markup(html: &str, start: usize) -> Option<(Node, usize)> {
    let rest = &html[start..];
    let bytes = rest.as_bytes();

    if rest.starts_with("<!--") {
        let end = rest[4..].find("-->").map(|p| p + 4 + 3).unwrap_or(rest.len());
        return Some((Node::Comment(rest[..end].to_string()), start + end));
    }
    if rest.starts_with("<!") || rest.starts_with("<?") {
        let end = rest.find('>')? + 1;
        return Some((Node::Declaration(rest[..end].to_string()), start + end));
    }
    if rest.starts_with("</") {
        if !bytes.get(2).is_some_and(u8::is_ascii_alphabetic) {
            return None;
        }
        let end = rest.find('>')? + 1;
        let name: String = rest[2..end - 1]
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '>')
            .collect();
        return Some((
            Node::EndTag {
                name: name.to_ascii_lowercase(),
                raw: rest[..end].to_string(),
            },
            start + end,
        ));
    }
    if !bytes.get(1).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    let (tag, end) = read_start_tag(rest)?;
    Some((Node::StartTag(tag), start + end))
}

fn read_start_tag(rest: &str) -> Option<(StartTag, usize)> {
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b':') {
        i += 1;
    }
    let name = rest[1..i].to_ascii_lowercase();
    let mut attrs = Vec::new();
    let mut self_closing = false;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        match bytes.get(i)? {
            b'>' => {
                i += 1;
                break;
            }
            b'/' if bytes.get(i + 1) == Some(&b'>') => {
                self_closing = true;
                i += 2;
                break;
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'>' | b'/') {
            i += 1;
        }
        if i == name_start {
            i += 1;
            continue;
        }
        let attr_name = rest[name_start..i].to_string();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            attrs.push(Attr { name: attr_name, value: None, quote: None });
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let (value, quote) = match bytes.get(j)? {
            q @ (b'"' | b'\'') => {
                let close = rest[j + 1..].find(*q as char)? + j + 1;
                let v = rest[j + 1..close].to_string();
                j = close + 1;
                (v, Some(*q as char))
            }
            _ => {
                let v_start = j;
                while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                    j += 1;
                }
                (rest[v_start..j].to_string(), None)
            }
        };
        attrs.push(Attr { name: attr_name, value: Some(value), quote });
        i = j;
    }

    Some((
        StartTag {
            name,
            attrs,
            self_closing,
            raw: Some(rest[..i].to_string()),
        },
        i,
    ))
}

/// Byte offset of the `</name` that closes a raw-text element, or the end of
/// input when it is never closed.
fn find_close_tag(html: &str, from: usize, name: &str) -> usize {
    let needle = format!("</{}", name);
    html[from..]
        .to_ascii_lowercase()
        .find(&needle)
        .map(|p| from + p)
        .unwrap_or(html.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_lossless() {
        let html = std::fs::read_to_string("tests/fixtures/catalog.html").unwrap();
        assert_eq!(Document::parse(&html).to_html(), html);
    }

    #[test]
    fn round_trip_odd_input() {
        for html in [
            "",
            "plain text",
            "a < b and c > d",
            "<p>unclosed <b>bold",
            "<div class='x' hidden data-n=3>ok</div>",
            "<!-- never closed",
            "<input value=\"a>b\"/><br>",
            "<div class=\"broken",
        ] {
            assert_eq!(Document::parse(html).to_html(), html, "input: {html}");
        }
    }

    #[test]
    fn script_body_is_raw() {
        let doc = Document::parse("<script>if (a < b) { x = '<div>'; }</script><p>");
        assert!(matches!(&doc.nodes[1], Node::RawText(t) if t.contains("'<div>'")));
        assert!(matches!(&doc.nodes[2], Node::EndTag { name, .. } if name == "script"));
        assert_eq!(doc.nodes.len(), 4);
    }

    #[test]
    fn attributes_parsed() {
        let doc = Document::parse(r#"<div id="a" class="x repo-card" hidden data-n='1' data-u=2>"#);
        let tag = doc.nodes[0].as_start_tag().unwrap();
        assert_eq!(tag.id(), Some("a"));
        assert!(tag.has_class("repo-card"));
        assert!(!tag.has_class("repo"));
        assert_eq!(tag.attr("data-n"), Some("1"));
        assert_eq!(tag.attr("data-u"), Some("2"));
        assert_eq!(tag.attr("hidden"), None);
    }

    #[test]
    fn set_attr_rebuilds_only_when_changed() {
        let mut doc = Document::parse(r#"<div  id="a"   data-x="1">"#);
        let tag = doc.start_tags_mut().next().unwrap();
        assert!(!tag.set_attr("data-x", "1"));
        assert_eq!(doc.to_html(), r#"<div  id="a"   data-x="1">"#);

        let tag = doc.start_tags_mut().next().unwrap();
        assert!(tag.set_attr("data-x", "2"));
        assert!(tag.set_attr("data-y", "3"));
        assert_eq!(doc.to_html(), r#"<div id="a" data-x="2" data-y="3">"#);
    }

    #[test]
    fn element_range_nested() {
        let doc = Document::parse("<div id=\"o\"><div><br></div><img src=x></div><p>");
        let start = doc.find_by_id("o").unwrap();
        let range = doc.element_range(start);
        assert_eq!(*range.end(), 5);
        assert!(matches!(&doc.nodes[5], Node::EndTag { name, .. } if name == "div"));
    }

    #[test]
    fn remove_element_with_separator() {
        let mut doc = Document::parse("a<div id=\"x\"><b>b</b></div>\n<p>c");
        let start = doc.find_by_id("x").unwrap();
        assert_eq!(doc.remove_element(start, Some("\n")), 6);
        assert_eq!(doc.to_html(), "a<p>c");
    }

    #[test]
    fn find_end_tag_is_case_insensitive() {
        let doc = Document::parse("<BODY>x</BODY>");
        assert_eq!(doc.find_end_tag("body"), Some(2));
    }
}
