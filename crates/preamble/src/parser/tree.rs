//! Prefix tree over a small fixed vocabulary of ASCII tokens.
//!
//! The trees for methods and versions are built once and then only read, so
//! they are shared by every parse without synchronisation.

use once_cell::sync::Lazy;

use crate::parser::Cursor;

/// Methods recognised without touching the buffer.
pub(crate) static METHODS: Lazy<TokenTree> =
    Lazy::new(|| TokenTree::build(&["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "CONNECT", "TRACE"]));

/// Protocol versions recognised without touching the buffer.
pub(crate) static VERSIONS: Lazy<TokenTree> = Lazy::new(|| TokenTree::build(&["HTTP/1.0", "HTTP/1.1"]));

/// Outcome of a fast-path token match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Match {
    /// Exactly one vocabulary entry matched and was consumed.
    Matched(&'static str),
    /// No entry, or more than one, matched; the cursor is untouched.
    Unmatched,
}

#[derive(Debug)]
struct Node {
    ch: u8,
    exact: Vec<&'static str>,
    children: Vec<Node>,
}

impl Node {
    fn new(ch: u8) -> Self {
        Self { ch, exact: Vec::new(), children: Vec::new() }
    }

    fn child(&self, ch: u8) -> Option<&Node> {
        self.children.iter().find(|node| node.ch == ch)
    }
}

/// An immutable trie of `&'static str` tokens.
#[derive(Debug)]
pub(crate) struct TokenTree {
    root: Node,
}

impl TokenTree {
    pub(crate) fn build(tokens: &[&'static str]) -> Self {
        let mut root = Node::new(0);
        for token in tokens {
            let mut node = &mut root;
            for ch in token.bytes() {
                let idx = match node.children.iter().position(|child| child.ch == ch) {
                    Some(idx) => idx,
                    None => {
                        node.children.push(Node::new(ch));
                        node.children.len() - 1
                    }
                };
                node = &mut node.children[idx];
            }
            node.exact.push(*token);
        }
        Self { root }
    }

    /// Walks the tree along `text[from..to]` until `stop` accepts a byte.
    ///
    /// Returns every token ending exactly where the walk stopped, or an empty
    /// slice as soon as a byte leaves the tree.
    pub(crate) fn search(&self, text: &str, from: usize, to: usize, stop: impl Fn(u8) -> bool) -> &[&'static str] {
        let mut node = &self.root;
        for ch in text.as_bytes()[from..to].iter().copied() {
            if stop(ch) {
                break;
            }
            match node.child(ch) {
                Some(next) => node = next,
                None => return &[],
            }
        }
        &node.exact
    }

    /// Consumes a vocabulary token ending at a space or the end of the window.
    pub(crate) fn match_token(&self, text: &str, cursor: &mut Cursor) -> Match {
        match self.search(text, cursor.start, cursor.end, |ch| ch == b' ') {
            [exact] => {
                cursor.start += exact.len();
                Match::Matched(*exact)
            }
            _ => Match::Unmatched,
        }
    }
}
