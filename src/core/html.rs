// src/core/html.rs
//
// Tolerant HTML parser. One pass, never fails: whatever the input looks
// like, we get a tree of typed nodes back and search it explicitly.
// Close tags without a matching open are dropped; open tags left dangling
// at EOF are closed from the inside out.

use crate::core::sanitize::decode_entities;

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Tag name, lowercased.
    pub tag: String,
    /// Attributes in source order, names lowercased, values entity-decoded.
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Parsed document. Roots are whatever top-level nodes the input had;
/// there is no synthetic <html> wrapper.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub roots: Vec<Node>,
}

/// Elements with no content and no close tag.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta",
    "param", "source", "track", "wbr",
];

/// Elements whose content is raw text, not markup.
const RAW_TEXT: &[&str] = &["script", "style"];

/// HTML's implicit-close rules for the subset that matters when pulling
/// rows and cells out of arbitrary documents.
fn implicitly_closed_by(open: &str, new_tag: &str) -> bool {
    match new_tag {
        "tr" => matches!(open, "td" | "th" | "tr"),
        "td" | "th" => matches!(open, "td" | "th"),
        "li" => open == "li",
        "p" => open == "p",
        _ => false,
    }
}

pub fn parse(input: &str) -> Document {
    let mut scanner = Scanner { src: input, pos: 0 };
    let mut roots: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    while let Some(token) = scanner.next_token() {
        match token {
            Token::Text(t) => attach(&mut roots, &mut stack, Node::Text(t)),
            Token::Open { tag, attrs, self_closing } => {
                while stack
                    .last()
                    .is_some_and(|open| implicitly_closed_by(&open.tag, &tag))
                {
                    close_top(&mut roots, &mut stack);
                }
                let mut el = Element { tag, attrs, children: Vec::new() };
                if self_closing || VOID.contains(&el.tag.as_str()) {
                    attach(&mut roots, &mut stack, Node::Element(el));
                } else if RAW_TEXT.contains(&el.tag.as_str()) {
                    let raw = scanner.read_raw_text(&el.tag);
                    if !raw.is_empty() {
                        el.children.push(Node::Text(raw));
                    }
                    attach(&mut roots, &mut stack, Node::Element(el));
                } else {
                    stack.push(el);
                }
            }
            Token::Close { tag } => {
                // Stray close (no matching open anywhere) is ignored.
                if stack.iter().any(|e| e.tag == tag) {
                    loop {
                        let found = stack.last().is_none_or(|e| e.tag == tag);
                        close_top(&mut roots, &mut stack);
                        if found {
                            break;
                        }
                    }
                }
            }
        }
    }
    while !stack.is_empty() {
        close_top(&mut roots, &mut stack);
    }
    Document { roots }
}

fn attach(roots: &mut Vec<Node>, stack: &mut Vec<Element>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn close_top(roots: &mut Vec<Node>, stack: &mut Vec<Element>) {
    if let Some(el) = stack.pop() {
        attach(roots, stack, Node::Element(el));
    }
}

impl Document {
    /// All elements with the given tag name, preorder document order,
    /// anywhere in the tree. Nested matches are included.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let want = tag.to_ascii_lowercase();
        let mut out = Vec::new();
        for node in &self.roots {
            collect(node, &want, &mut out);
        }
        out
    }
}

impl Element {
    /// Descendant elements with the given tag name, document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let want = tag.to_ascii_lowercase();
        let mut out = Vec::new();
        for node in &self.children {
            collect(node, &want, &mut out);
        }
        out
    }

    /// Concatenated descendant text, document order. Entities were decoded
    /// at parse time; whitespace is preserved as written.
    pub fn text(&self) -> String {
        let mut out = s!();
        push_text(self, &mut out);
        out
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        let want = name.to_ascii_lowercase();
        self.attrs.iter().find(|a| a.0 == want).map(|a| a.1.as_str())
    }
}

fn collect<'a>(node: &'a Node, want: &str, out: &mut Vec<&'a Element>) {
    if let Node::Element(el) = node {
        if el.tag == want {
            out.push(el);
        }
        for child in &el.children {
            collect(child, want, out);
        }
    }
}

fn push_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => push_text(e, out),
        }
    }
}

/* ---------------- Scanner ---------------- */

enum Token {
    Text(String),
    Open { tag: String, attrs: Vec<(String, String)>, self_closing: bool },
    Close { tag: String },
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn next_token(&mut self) -> Option<Token> {
        loop {
            let rest = &self.src[self.pos..];
            if rest.is_empty() {
                return None;
            }
            if !rest.starts_with('<') {
                let end = rest.find('<').unwrap_or(rest.len());
                self.pos += end;
                return Some(Token::Text(decode_entities(&rest[..end])));
            }
            let after = &rest[1..];
            if after.starts_with("!--") {
                // comment
                self.pos += match rest.find("-->") {
                    Some(i) => i + 3,
                    None => rest.len(),
                };
                continue;
            }
            if after.starts_with('!') || after.starts_with('?') {
                // doctype / processing instruction
                self.pos += match rest.find('>') {
                    Some(i) => i + 1,
                    None => rest.len(),
                };
                continue;
            }
            if let Some(close_rest) = after.strip_prefix('/') {
                let name = read_name(close_rest);
                self.pos += match rest.find('>') {
                    Some(i) => i + 1,
                    None => rest.len(),
                };
                if name.is_empty() {
                    continue; // "</>" and similar junk
                }
                return Some(Token::Close { tag: name });
            }
            if after.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
                return Some(self.read_open_tag());
            }
            // '<' that opens nothing: keep it as text
            self.pos += 1;
            return Some(Token::Text(s!('<')));
        }
    }

    fn read_open_tag(&mut self) -> Token {
        self.pos += 1; // '<'
        let tag = read_name(&self.src[self.pos..]);
        self.pos += tag.len();

        let mut attrs = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_ws();
            let rest = &self.src[self.pos..];
            let Some(ch) = rest.chars().next() else { break };
            if ch == '>' {
                self.pos += 1;
                break;
            }
            if ch == '/' {
                self.pos += 1;
                if self.src[self.pos..].starts_with('>') {
                    self.pos += 1;
                    self_closing = true;
                    break;
                }
                continue;
            }
            let name = read_attr_name(rest);
            if name.is_empty() {
                self.pos += ch.len_utf8();
                continue;
            }
            self.pos += name.len();
            self.skip_ws();
            let value = if self.src[self.pos..].starts_with('=') {
                self.pos += 1;
                self.skip_ws();
                self.read_attr_value()
            } else {
                s!()
            };
            attrs.push((name, decode_entities(&value)));
        }

        Token::Open { tag, attrs, self_closing }
    }

    fn read_attr_value(&mut self) -> String {
        let rest = &self.src[self.pos..];
        match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &rest[1..];
                match body.find(q) {
                    Some(i) => {
                        self.pos += 1 + i + 1;
                        body[..i].to_string()
                    }
                    None => {
                        // unterminated quote: take the rest
                        self.pos = self.src.len();
                        body.to_string()
                    }
                }
            }
            _ => {
                let v: String = rest
                    .chars()
                    .take_while(|c| !c.is_whitespace() && *c != '>')
                    .collect();
                self.pos += v.len();
                v
            }
        }
    }

    /// Content of <script>/<style>: everything up to the matching close tag,
    /// verbatim. The close tag itself is left for the token loop, which
    /// drops it as a stray.
    fn read_raw_text(&mut self, tag: &str) -> String {
        let rest = &self.src[self.pos..];
        let close = format!("</{tag}");
        match rest.to_ascii_lowercase().find(&close) {
            Some(i) => {
                self.pos += i;
                rest[..i].to_string()
            }
            None => {
                self.pos = self.src.len();
                rest.to_string()
            }
        }
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.src[self.pos..].chars().next() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }
}

fn read_name(s: &str) -> String {
    s.chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
        .collect::<String>()
        .to_ascii_lowercase()
}

fn read_attr_name(s: &str) -> String {
    s.chars()
        .take_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\''))
        .collect::<String>()
        .to_ascii_lowercase()
}
