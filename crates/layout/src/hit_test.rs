use crate::{BoxKind, LayoutBox};
use core_types::{Point, Rect};
use html::Id;

#[derive(Clone, Debug, PartialEq)]
pub struct HitResult {
    pub node_id: Id,
    pub rect: Rect,        // in layout (document) coords
    pub local_pos: Point,  // point - rect.min
}

/// Engine hit-test in *layout coordinates* (same coordinate system as `LayoutBox::rect`).
///
/// Returns the topmost element box under `point`. Text boxes resolve to their element, boxes
/// with `pointer-events: none` are transparent, and the document box never matches.
pub fn hit_test(root: &LayoutBox, point: Point) -> Option<HitResult> {
    // out-of-flow boxes paint last, so they are checked first
    let (floating, flow): (Vec<&LayoutBox>, Vec<&LayoutBox>) =
        root.children.iter().partition(|c| c.out_of_flow);
    floating
        .into_iter()
        .rev()
        .chain(flow.into_iter().rev())
        .find_map(|c| hit_test_box(c, point))
}

fn hit_test_box(node: &LayoutBox, point: Point) -> Option<HitResult> {
    // Children are not clipped to their parent, so descend before testing our own rect.
    // Reverse order = later painted on top.
    for child in node.children.iter().rev() {
        if child.kind == BoxKind::Text {
            continue;
        }
        if let Some(hit) = hit_test_box(child, point) {
            return Some(hit);
        }
    }

    if node.kind == BoxKind::Viewport || !node.pointer_events || !node.rect.contains(point) {
        return None;
    }
    Some(HitResult {
        node_id: node.node_id,
        rect: node.rect,
        local_pos: Point::new(point.x - node.rect.x, point.y - node.rect.y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedAdvanceMeasurer, layout_document};
    use html::{Node, dom_utils::get_attr, parse_document};

    fn html_id(dom: &Node, id: Id) -> Option<String> {
        html::dom_utils::find_node_by_id(dom, id)
            .and_then(|n| get_attr(n, "id"))
            .map(str::to_string)
    }

    fn hit(markup: &str, p: Point) -> Option<String> {
        let dom = parse_document(markup);
        let root = layout_document(&dom, 400.0, &FixedAdvanceMeasurer::default());
        hit_test(&root, p).and_then(|h| html_id(&dom, h.node_id))
    }

    const PAGE: &str = r#"
        <div id="outer" style="height:100px">
          <div id="row" style="display:flex;height:40px">
            <div id="a" style="width:40px;height:40px"><span id="a-inner">x</span></div>
            <div id="b" style="width:40px;height:40px"></div>
          </div>
        </div>
        <div id="tip" style="position:absolute;width:400px;height:400px;pointer-events:none"></div>"#;

    #[test]
    fn deepest_element_wins() {
        assert_eq!(hit(PAGE, Point::new(50.0, 10.0)).as_deref(), Some("b"));
        assert_eq!(hit(PAGE, Point::new(200.0, 10.0)).as_deref(), Some("row"));
        assert_eq!(hit(PAGE, Point::new(200.0, 80.0)).as_deref(), Some("outer"));
    }

    #[test]
    fn text_resolves_to_its_element() {
        assert_eq!(hit(PAGE, Point::new(2.0, 2.0)).as_deref(), Some("a-inner"));
    }

    #[test]
    fn pointer_events_none_is_transparent() {
        // #tip covers everything but must never be the target
        assert_eq!(hit(PAGE, Point::new(10.0, 30.0)).as_deref(), Some("a"));
        assert_eq!(hit(PAGE, Point::new(10.0, 300.0)), None);
    }

    #[test]
    fn local_pos_is_relative_to_box() {
        let dom = parse_document(PAGE);
        let root = layout_document(&dom, 400.0, &FixedAdvanceMeasurer::default());
        let h = hit_test(&root, Point::new(45.0, 5.0)).unwrap();
        assert_eq!(h.local_pos, Point::new(5.0, 5.0));
    }
}
