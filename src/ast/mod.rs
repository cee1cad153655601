// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Builds the typed view tree from the token sequence and drives
//! visitors over it.

pub use self::nodes::{Node, NodeId};

use log::debug;

use crate::error::Error;
use crate::tokenizer::Token;

pub mod nodes;

/// The typed view tree: an arena of nodes plus the root handle. The
/// tree is immutable once built.
#[derive(Debug)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    /// Build the tree from a token sequence. The root is the first
    /// start tag; anything before it is discarded.
    pub fn build(tokens: Vec<Token>) -> Result<Ast, Error> {
        debug!("building tree from {} tokens", tokens.len());
        Builder {
            tokens,
            cursor: 0,
            nodes: Vec::new(),
        }
        .build()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Pre-order walk invoking the visitor's per-kind callbacks. The
    /// depth counter is incremented before recursing into an element
    /// and decremented after its end element (or directly after a
    /// self-closing element); it exists for diagnostic printing.
    pub fn process<V: Visit>(&self, visitor: &mut V) -> Result<(), Error> {
        debug!("processing tree");
        let mut depth = 0;
        self.process_node(self.root, &mut depth, visitor)
    }

    fn process_node<V: Visit>(
        &self,
        id: NodeId,
        depth: &mut i32,
        visitor: &mut V,
    ) -> Result<(), Error> {
        match self.node(id) {
            Node::Element { .. } => visitor.visit_element(self, id, *depth)?,
            Node::Component { .. } => visitor.visit_component(self, id, *depth)?,
            _ => unreachable!("the walk recurses into elements and components only"),
        }
        for &child in self.node(id).children() {
            match self.node(child) {
                Node::Element {
                    is_self_closing, ..
                }
                | Node::Component {
                    is_self_closing, ..
                } => {
                    *depth += 1;
                    self.process_node(child, depth, visitor)?;
                    if *is_self_closing {
                        *depth -= 1;
                    }
                }
                Node::EndElement { .. } => {
                    visitor.visit_end_element(self, child, *depth)?;
                    *depth -= 1;
                }
                Node::Comment { .. } => visitor.visit_comment(self, child, *depth)?,
                Node::Text { .. } => visitor.visit_text(self, child, *depth)?,
                Node::DynText { .. } => visitor.visit_dyn_text(self, child, *depth)?,
                Node::Attribute { .. } => visitor.visit_attribute(self, child, *depth)?,
                Node::ArgumentAttribute { .. } => {
                    visitor.visit_argument_attribute(self, child, *depth)?
                }
                Node::DynAttribute { .. } => visitor.visit_dyn_attribute(self, child, *depth)?,
                Node::EventAttribute { .. } => {
                    visitor.visit_event_attribute(self, child, *depth)?
                }
                Node::KeywordAttribute { .. } => {
                    visitor.visit_keyword_attribute(self, child, *depth)?
                }
            }
        }
        Ok(())
    }
}

/// Per-node-kind callbacks driven by [`Ast::process`]. Every method
/// defaults to logging an indented dump of the node, so a visitor only
/// overrides what it cares about.
pub trait Visit {
    fn visit_element(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_component(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_end_element(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_comment(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_text(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_dyn_text(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_attribute(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_argument_attribute(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_dyn_attribute(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_event_attribute(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }

    fn visit_keyword_attribute(&mut self, ast: &Ast, id: NodeId, depth: i32) -> Result<(), Error> {
        ast.node(id).dump(depth);
        Ok(())
    }
}

struct Builder {
    tokens: Vec<Token>,
    cursor: usize,
    nodes: Vec<Node>,
}

impl Builder {
    fn build(mut self) -> Result<Ast, Error> {
        while self.cursor < self.tokens.len() {
            if matches!(self.tokens[self.cursor], Token::StartTag { .. }) {
                let root = self.element()?;
                return Ok(Ast {
                    nodes: self.nodes,
                    root,
                });
            }
            self.cursor += 1;
        }
        Err(Error::NoRoot)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        match &mut self.nodes[parent.0] {
            Node::Element { children, .. } | Node::Component { children, .. } => {
                children.push(child)
            }
            _ => unreachable!("children can only be appended to elements"),
        }
    }

    /// Recursive construction; called only when positioned on a start
    /// tag token.
    fn element(&mut self) -> Result<NodeId, Error> {
        let (name, is_component, is_self_closing, attrs) = match &self.tokens[self.cursor] {
            Token::StartTag {
                name,
                is_component,
                is_self_closing,
                attrs,
                ..
            } => (name.clone(), *is_component, *is_self_closing, attrs.clone()),
            _ => unreachable!("element() is positioned on a start tag"),
        };
        self.cursor += 1;

        let id = if is_component {
            self.alloc(Node::Component {
                name: name.clone(),
                children: vec![],
                is_self_closing,
            })
        } else {
            self.alloc(Node::Element {
                name: name.clone(),
                children: vec![],
                is_self_closing,
            })
        };

        for attr in &attrs {
            let child = self.alloc(Node::from_attribute(attr));
            self.append_child(id, child);
        }

        if is_self_closing {
            return Ok(id);
        }

        while self.cursor < self.tokens.len() {
            let token = self.tokens[self.cursor].clone();
            match token {
                Token::StartTag { .. } => {
                    let child = self.element()?;
                    self.append_child(id, child);
                }
                Token::EndTag { name: end_name, .. } => {
                    if end_name != name {
                        return Err(Error::MismatchedEndTag {
                            expected: name,
                            found: end_name,
                        });
                    }
                    let end = self.alloc(Node::EndElement {
                        name: end_name,
                        element: id,
                    });
                    self.append_child(id, end);
                    self.cursor += 1;
                    return Ok(id);
                }
                Token::Comment { data, .. } => {
                    let child = self.alloc(Node::Comment { data });
                    self.append_child(id, child);
                    self.cursor += 1;
                }
                Token::Text { data, .. } => {
                    let child = self.alloc(Node::Text { data });
                    self.append_child(id, child);
                    self.cursor += 1;
                }
                Token::Code { data, .. } => {
                    let child = self.alloc(Node::DynText { effect: data });
                    self.append_child(id, child);
                    self.cursor += 1;
                }
                // A lone final EndOfFile is skipped; unterminated
                // constructs were already caught by the tokenizer.
                Token::EndOfFile { .. } => {
                    self.cursor += 1;
                }
            }
        }
        Err(Error::EofInElement { name })
    }
}
