//! Pre-order traversal.
//!
//! Both helpers use an explicit stack, so deeply nested documents do not
//! grow the call stack.

use crate::types::Node;

/// Call `visit` on `node` and then on every descendant, parents before
/// children and siblings in document order.
///
/// ```
/// let document = laxml::parse("<ul><li>a</li><li>b</li></ul>").unwrap();
/// let mut names = Vec::new();
/// laxml::walk(&document.root, |node| {
///     if let Some(name) = node.name() {
///         names.push(name.to_string());
///     }
/// });
/// assert_eq!(names, ["", "ul", "li", "li"]);
/// ```
pub fn walk<'a>(node: &'a Node, mut visit: impl FnMut(&'a Node)) {
    for node in PreOrder::new(node) {
        visit(node);
    }
}

/// Like [`walk`], also passing each node's depth. `node` itself is at
/// depth 0.
pub fn walk_with_depth<'a>(node: &'a Node, mut visit: impl FnMut(&'a Node, usize)) {
    let mut stack = vec![(node, 0)];
    while let Some((node, depth)) = stack.pop() {
        visit(node, depth);
        stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
    }
}

/// Pre-order iterator returned by [`Node::descendants`].
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, Element, Position, Text};

    fn element(name: &str, children: Vec<Node>) -> Node {
        let mut element = Element::root(children);
        element.name = name.into();
        element.pos_open = Some(Position::default());
        Node::Element(element)
    }

    fn text(value: &str) -> Node {
        Node::Text(Text {
            value: value.into(),
            position: Position::default(),
        })
    }

    fn label(node: &Node) -> String {
        match node {
            Node::Element(e) => e.name.clone(),
            Node::Text(t) => format!("#{}", t.value),
            Node::Comment(c) => format!("!{}", c.value),
        }
    }

    fn sample() -> Node {
        Node::Element(Element::root(vec![
            element("a", vec![element("b", vec![text("1")]), text("2")]),
            Node::Comment(Comment {
                value: "c".into(),
                position: Position::default(),
            }),
            element("d", vec![]),
        ]))
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = sample();
        let mut seen = Vec::new();
        walk(&tree, |node| seen.push(label(node)));
        assert_eq!(seen, ["", "a", "b", "#1", "#2", "!c", "d"]);
    }

    #[test]
    fn test_descendants_matches_walk() {
        let tree = sample();
        let mut walked = Vec::new();
        walk(&tree, |node| walked.push(label(node)));
        let iterated: Vec<String> = tree.descendants().map(label).collect();
        assert_eq!(walked, iterated);
    }

    #[test]
    fn test_walk_with_depth() {
        let tree = sample();
        let mut depths = Vec::new();
        walk_with_depth(&tree, |node, depth| depths.push((label(node), depth)));
        let expected: Vec<(String, usize)> = [
            ("", 0),
            ("a", 1),
            ("b", 2),
            ("#1", 3),
            ("#2", 2),
            ("!c", 1),
            ("d", 1),
        ]
        .into_iter()
        .map(|(l, d)| (l.to_string(), d))
        .collect();
        assert_eq!(depths, expected);
    }

    #[test]
    fn test_walk_leaf() {
        let leaf = text("only");
        assert_eq!(leaf.descendants().count(), 1);
    }

    #[test]
    fn test_walk_deep_tree() {
        let mut node = text("leaf");
        for _ in 0..100_000 {
            node = element("x", vec![node]);
        }
        assert_eq!(node.descendants().count(), 100_001);
        let mut deepest = 0;
        walk_with_depth(&node, |_, depth| deepest = deepest.max(depth));
        assert_eq!(deepest, 100_000);
    }
}
