// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The typed nodes of the view tree.

use log::debug;
use tendril::StrTendril;

use crate::tokenizer::{AttrKind, Attribute};
use crate::Name;

/// A stable handle into the tree's node arena.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Debug)]
pub struct NodeId(pub(crate) usize);

/// A node in the view tree. One variant per kind; fields only where
/// meaningful. Attribute-variant nodes appear as children of the
/// element that declared them, before any content children.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Node {
    /// A generic element; lower-case tag name.
    Element {
        name: Name,
        children: Vec<NodeId>,
        is_self_closing: bool,
    },
    /// A component; tag name opened with an upper-alpha code point.
    Component {
        name: Name,
        children: Vec<NodeId>,
        is_self_closing: bool,
    },
    /// Closes its element. The back-reference is a relation, not
    /// ownership, so it is a handle.
    EndElement { name: Name, element: NodeId },
    Comment { data: StrTendril },
    Text { data: StrTendril },
    /// `{ … }` in content position; `effect` is the unparsed host text.
    DynText { effect: StrTendril },
    /// `name="value"`.
    Attribute { name: Name, value: StrTendril },
    /// Name-only attribute; a component's positional argument name.
    ArgumentAttribute { name: Name },
    /// `name:value={effect}`.
    DynAttribute {
        name: Name,
        value: Name,
        effect: StrTendril,
    },
    /// `on:event={effect}`; `name` is always literally `on`.
    EventAttribute {
        name: Name,
        event: Name,
        effect: StrTendril,
    },
    /// `if`/`each`/`key` and friends; consumed by the emitter.
    KeywordAttribute { name: Name, effect: StrTendril },
}

impl Node {
    /// Convert a lexed attribute into its node form, using the kind the
    /// tokenizer classified it with.
    pub(crate) fn from_attribute(attr: &Attribute) -> Node {
        match attr.kind {
            AttrKind::Normal => Node::Attribute {
                name: attr.name.clone(),
                value: attr.value.clone(),
            },
            AttrKind::Argument => Node::ArgumentAttribute {
                name: attr.name.clone(),
            },
            AttrKind::Keyword => Node::KeywordAttribute {
                name: attr.name.clone(),
                effect: attr.value.clone(),
            },
            AttrKind::Event => {
                let (head, event) = split_at_colon(&attr.name);
                Node::EventAttribute {
                    name: Name::from(head),
                    event: Name::from(event),
                    effect: attr.value.clone(),
                }
            }
            AttrKind::Dynamic => {
                let (head, value) = split_at_colon(&attr.name);
                Node::DynAttribute {
                    name: Name::from(head),
                    value: Name::from(value),
                    effect: attr.value.clone(),
                }
            }
        }
    }

    /// Child handles, in source order. Empty for leaf kinds.
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Element { children, .. } | Node::Component { children, .. } => children,
            _ => &[],
        }
    }

    /// Log a one-line description at debug level, indented to `depth`.
    /// This is the default behavior of every visitor callback.
    pub fn dump(&self, depth: i32) {
        let indent = " ".repeat(depth.max(0) as usize);
        match self {
            Node::Element {
                name,
                children,
                is_self_closing,
            } => debug!(
                "{indent}StartElement    {name}    {} children{}",
                children.len(),
                self_closing_suffix(*is_self_closing)
            ),
            Node::Component {
                name,
                children,
                is_self_closing,
            } => debug!(
                "{indent}Component    {name}    {} children{}",
                children.len(),
                self_closing_suffix(*is_self_closing)
            ),
            Node::EndElement { name, element } => {
                debug!("{indent}EndElement    {name}    closes node {}", element.0)
            }
            Node::Comment { data } => debug!("{indent}Comment    {data}"),
            Node::Text { data } => debug!("{indent}Text    {data}"),
            Node::DynText { effect } => debug!("{indent}DynText    {{{effect}}}"),
            Node::Attribute { name, value } => debug!("{indent}Attribute    {name}    {value}"),
            Node::ArgumentAttribute { name } => debug!("{indent}ArgumentAttribute    {name}"),
            Node::DynAttribute {
                name,
                value,
                effect,
            } => debug!("{indent}DynAttribute    {name}    {value}    {{{effect}}}"),
            Node::EventAttribute { event, effect, .. } => {
                debug!("{indent}EventAttribute    on    {event}    {{{effect}}}")
            }
            Node::KeywordAttribute { name, effect } => {
                debug!("{indent}KeywordAttribute    {name}    {{{effect}}}")
            }
        }
    }
}

/// Split at the first colon; the remainder stays whole, so `a:b:c`
/// yields `("a", "b:c")`. No colon yields an empty tail.
fn split_at_colon(name: &Name) -> (&str, &str) {
    let name: &str = name;
    match name.split_once(':') {
        Some((head, rest)) => (head, rest),
        None => (name, ""),
    }
}

fn self_closing_suffix(is_self_closing: bool) -> &'static str {
    if is_self_closing {
        "    (SelfClosing)"
    } else {
        ""
    }
}
