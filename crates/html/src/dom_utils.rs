use crate::{Id, Node};

/// Attribute lookup. A present attribute without a value reads as `Some("")`.
pub fn get_attr<'a>(node: &'a Node, name: &str) -> Option<&'a str> {
    match node {
        Node::Element { attributes, .. } => attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or("")),
        _ => None,
    }
}

pub fn has_attr(node: &Node, name: &str) -> bool {
    get_attr(node, name).is_some()
}

/// Insert or overwrite an attribute. Returns `false` for non-element nodes.
pub fn set_attr(node: &mut Node, name: &str, value: &str) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };
    match attributes
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
    {
        Some((_, v)) => *v = Some(value.to_string()),
        None => attributes.push((name.to_ascii_lowercase(), Some(value.to_string()))),
    }
    true
}

/// Returns `true` if the attribute was present.
pub fn remove_attr(node: &mut Node, name: &str) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };
    let before = attributes.len();
    attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    attributes.len() != before
}

pub fn is_non_rendering_element(node: &Node) -> bool {
    match node {
        Node::Element { name, .. } => matches!(
            name.as_str(),
            "head" | "style" | "script" | "title" | "meta" | "link" | "template"
        ),
        _ => false,
    }
}

pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id(0) {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = max_node_id(root).0.saturating_add(1).max(1);
    walk(root, &mut next);
}

pub fn max_node_id(root: &Node) -> Id {
    root.children()
        .iter()
        .map(max_node_id)
        .fold(root.id(), |a, b| a.max(b))
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children().iter().find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// The chain of nodes from `root` down to the node with `id`, both inclusive.
pub fn ancestors(root: &Node, id: Id) -> Option<Vec<&Node>> {
    fn walk<'a>(node: &'a Node, id: Id, path: &mut Vec<&'a Node>) -> bool {
        path.push(node);
        if node.id() == id {
            return true;
        }
        for c in node.children() {
            if walk(c, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// Nearest element at or above `id` that carries `attr`, like `Element.closest("[attr]")`.
pub fn closest_with_attr(root: &Node, id: Id, attr: &str) -> Option<Id> {
    ancestors(root, id)?
        .into_iter()
        .rev()
        .find(|n| has_attr(n, attr))
        .map(Node::id)
}

/// First element in document order carrying `attr`, like `querySelector("[attr]")`.
pub fn find_first_with_attr(root: &Node, attr: &str) -> Option<Id> {
    if has_attr(root, attr) {
        return Some(root.id());
    }
    root.children()
        .iter()
        .find_map(|c| find_first_with_attr(c, attr))
}

/// First element whose `attr` equals `value`, like `querySelector("[attr=value]")`.
pub fn find_first_with_attr_value(root: &Node, attr: &str, value: &str) -> Option<Id> {
    if get_attr(root, attr) == Some(value) {
        return Some(root.id());
    }
    root.children()
        .iter()
        .find_map(|c| find_first_with_attr_value(c, attr, value))
}

/// Append `child` to the node with id `parent`. Returns `false` if the parent is missing or
/// cannot hold children.
pub fn append_child(root: &mut Node, parent: Id, child: Node) -> bool {
    match find_node_by_id_mut(root, parent).and_then(Node::children_mut) {
        Some(children) => {
            children.push(child);
            true
        }
        None => false,
    }
}

/// Detach the node with `id` (and its subtree). The root itself cannot be removed.
pub fn remove_node(root: &mut Node, id: Id) -> Option<Node> {
    let children = root.children_mut()?;
    if let Some(pos) = children.iter().position(|c| c.id() == id) {
        return Some(children.remove(pos));
    }
    children.iter_mut().find_map(|c| remove_node(c, id))
}

/// Replace all children of `id` with a single text node.
pub fn set_text_content(root: &mut Node, id: Id, text: &str) -> bool {
    let Some(children) = find_node_by_id_mut(root, id).and_then(Node::children_mut) else {
        return false;
    };
    children.clear();
    if !text.is_empty() {
        children.push(Node::text(text));
    }
    true
}

/// Concatenated descendant text.
pub fn text_content(node: &Node) -> String {
    fn walk(node: &Node, out: &mut String) {
        match node {
            Node::Text { text, .. } => out.push_str(text),
            _ => node.children().iter().for_each(|c| walk(c, out)),
        }
    }
    let mut out = String::new();
    walk(node, &mut out);
    out
}
