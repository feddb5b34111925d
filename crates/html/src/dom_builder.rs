use crate::dom_utils::assign_node_ids;
use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};

/// Parse markup into a document tree with ids assigned in document order.
pub fn parse_document(input: &str) -> Node {
    let mut root = build_dom(&tokenize(input));
    assign_node_ids(&mut root);
    root
}

/// Build a tree from tokens. Unmatched end tags are ignored; elements still open at the end
/// of input are closed implicitly.
pub fn build_dom(tokens: &[Token]) -> Node {
    // open[0] is always the document.
    let mut open: Vec<Node> = vec![Node::Document {
        id: Id(0),
        doctype: None,
        children: Vec::new(),
    }];

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                if let Node::Document { doctype, .. } = &mut open[0] {
                    *doctype = Some(s.clone());
                }
            }
            Token::Comment(c) => append_to_current(
                &mut open,
                Node::Comment {
                    id: Id(0),
                    text: c.clone(),
                },
            ),
            Token::Text(t) => append_to_current(&mut open, Node::text(t.clone())),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let style = attributes
                    .iter()
                    .find(|(k, _)| k == "style")
                    .and_then(|(_, v)| v.as_deref())
                    .map(parse_inline_style)
                    .unwrap_or_default();
                let element = Node::Element {
                    id: Id(0),
                    name: name.clone(),
                    attributes: attributes.clone(),
                    style,
                    children: Vec::new(),
                };
                if *self_closing {
                    append_to_current(&mut open, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let matched = open
                    .iter()
                    .skip(1)
                    .rposition(|n| n.name() == Some(name.as_str()));
                let Some(pos) = matched.map(|p| p + 1) else {
                    continue;
                };
                while open.len() > pos {
                    close_current(&mut open);
                }
            }
        }
    }

    while open.len() > 1 {
        close_current(&mut open);
    }
    open.pop().unwrap_or(Node::Document {
        id: Id(0),
        doctype: None,
        children: Vec::new(),
    })
}

fn append_to_current(open: &mut [Node], node: Node) {
    if let Some(children) = open.last_mut().and_then(Node::children_mut) {
        children.push(node);
    }
}

fn close_current(open: &mut Vec<Node>) {
    if let Some(done) = open.pop() {
        append_to_current(open, done);
    }
}

/// Split a `style` attribute into `(property, value)` pairs. Property names are lowercased,
/// values are trimmed; empty declarations are dropped.
pub fn parse_inline_style(input: &str) -> Vec<(String, String)> {
    input
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let k = k.trim();
            let v = v.trim();
            (!k.is_empty() && !v.is_empty()).then(|| (k.to_ascii_lowercase(), v.to_string()))
        })
        .collect()
}
