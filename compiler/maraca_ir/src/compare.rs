//! Structural comparison between trees.
//!
//! Two trees are observationally equivalent when they have the same shape
//! and the same literal payloads. Node ids and spans are ignored, so a tree
//! can be compared with the result of re-parsing its formatted output.

use crate::{NodeArena, NodeId, NodeKind};

/// Compare the subtree at `a` in `left` with the subtree at `b` in `right`.
///
/// Dangling ids compare equal only to other dangling ids.
pub fn structurally_equal(left: &NodeArena, a: NodeId, right: &NodeArena, b: NodeId) -> bool {
    let (Some(x), Some(y)) = (left.kind(a), right.kind(b)) else {
        return left.kind(a).is_none() && right.kind(b).is_none();
    };

    let same = |p: NodeId, q: NodeId| structurally_equal(left, p, right, q);
    let same_opt = |p: Option<NodeId>, q: Option<NodeId>| match (p, q) {
        (Some(p), Some(q)) => same(p, q),
        (None, None) => true,
        _ => false,
    };

    match (x, y) {
        (
            NodeKind::Function { key, value, body },
            NodeKind::Function {
                key: k2,
                value: v2,
                body: b2,
            },
        ) => same_opt(*key, *k2) && same_opt(*value, *v2) && same(*body, *b2),
        (NodeKind::Assign { key, value }, NodeKind::Assign { key: k2, value: v2 }) => {
            same_opt(*key, *k2) && same_opt(*value, *v2)
        }
        (NodeKind::Push { value, target }, NodeKind::Push { value: v2, target: t2 }) => {
            same(*value, *v2) && same(*target, *t2)
        }
        (
            NodeKind::Trigger { trigger, action },
            NodeKind::Trigger {
                trigger: t2,
                action: a2,
            },
        ) => same(*trigger, *t2) && same(*action, *a2),
        (NodeKind::Interpret { level, body }, NodeKind::Interpret { level: l2, body: b2 }) => {
            level == l2 && same(*body, *b2)
        }
        (NodeKind::Unary { op, operand }, NodeKind::Unary { op: o2, operand: x2 }) => {
            op == o2 && same(*operand, *x2)
        }
        (
            NodeKind::Binary { op, left: l, right: r },
            NodeKind::Binary {
                op: o2,
                left: l2,
                right: r2,
            },
        ) => op == o2 && same(*l, *l2) && same(*r, *r2),
        (NodeKind::List { bracket, items }, NodeKind::List { bracket: b2, items: i2 }) => {
            bracket == b2
                && items.len() == i2.len()
                && items.iter().zip(i2).all(|(p, q)| same(*p, *q))
        }
        (NodeKind::Combine { dot, items }, NodeKind::Combine { dot: d2, items: i2 }) => {
            let last = items.len().saturating_sub(1);
            dot == d2
                && items.len() == i2.len()
                && items.iter().zip(i2).enumerate().all(|(i, (p, q))| {
                    // The bit after the final element carries no meaning.
                    (*dot || i == last || p.space_after == q.space_after) && same(p.node, q.node)
                })
        }
        (
            NodeKind::Part { text, first, last },
            NodeKind::Part {
                text: t2,
                first: f2,
                last: l2,
            },
        ) => text == t2 && first == f2 && last == l2,
        (NodeKind::Library(p), NodeKind::Library(q))
        | (NodeKind::Value(p), NodeKind::Value(q))
        | (NodeKind::Comment(p), NodeKind::Comment(q))
        | (NodeKind::Eval(p), NodeKind::Eval(q))
        | (NodeKind::Error(p), NodeKind::Error(q)) => p == q,
        (NodeKind::Nil, NodeKind::Nil)
        | (NodeKind::Context, NodeKind::Context)
        | (NodeKind::Identity, NodeKind::Identity) => true,
        _ => false,
    }
}
