//! Arena element tree built from parsed HTML.

use scraper::{ElementRef, Html};

/// Elements whose rendered text starts and ends on its own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "footer", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub kind: NodeKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl Node {
    pub fn attr(&self, name: &str) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }
}

/// Owned copy of a parsed document. Index 0 is the root element.
#[derive(Debug, Clone, Default)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut tree = Self::default();
        tree.import(document.root_element(), None);
        tree
    }

    fn import(&mut self, element: ElementRef<'_>, parent: Option<usize>) -> usize {
        let value = element.value();
        let index = self.push(
            NodeKind::Element {
                tag: value.name().to_ascii_lowercase(),
                attrs: value
                    .attrs()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            },
            parent,
        );

        for child in element.children() {
            if let Some(child_element) = ElementRef::wrap(child) {
                self.import(child_element, Some(index));
            } else if let Some(text) = child.value().as_text() {
                let content: &str = text;
                self.push(NodeKind::Text(content.to_string()), Some(index));
            }
        }
        index
    }

    fn push(&mut self, kind: NodeKind, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        index
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes.get(index)?.parent
    }

    /// Strict descendants of `index` in document order.
    pub fn descendants(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = match self.nodes.get(index) {
            Some(node) => node.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }

    /// First strict descendant of `index` satisfying `predicate`.
    pub fn find_descendant(&self, index: usize, predicate: impl Fn(&Node) -> bool) -> Option<usize> {
        self.descendants(index)
            .into_iter()
            .find(|&i| predicate(&self.nodes[i]))
    }

    /// First node in the whole document satisfying `predicate`.
    pub fn find(&self, predicate: impl Fn(&Node) -> bool) -> Option<usize> {
        if self.nodes.first().is_some_and(&predicate) {
            return Some(0);
        }
        self.find_descendant(0, predicate)
    }

    /// `index` and its ancestors, innermost first.
    pub fn ancestors_inclusive(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = self.nodes.get(index).map(|_| index);
        while let Some(i) = current {
            chain.push(i);
            current = self.nodes[i].parent;
        }
        chain
    }

    /// Rendered text: block elements and `<br>` break lines, runs of
    /// blank lines collapse, and each line is trimmed.
    pub fn inner_text(&self, index: usize) -> String {
        let mut raw = String::new();
        self.collect_text(index, &mut raw);
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn collect_text(&self, index: usize, out: &mut String) {
        let Some(node) = self.nodes.get(index) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&text.replace('\n', " ")),
            NodeKind::Element { tag, .. } => {
                if tag == "br" {
                    out.push('\n');
                    return;
                }
                if matches!(tag.as_str(), "script" | "style" | "head") {
                    return;
                }
                let block = BLOCK_TAGS.contains(&tag.as_str());
                if block {
                    out.push('\n');
                }
                for &child in &node.children {
                    self.collect_text(child, out);
                }
                if block {
                    out.push('\n');
                }
            }
        }
    }
}
