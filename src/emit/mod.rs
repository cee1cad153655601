// Copyright 2026 The viewml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Emits the fluent view-construction expression.
//!
//! The emitter is a visitor over the tree. It keeps one partial
//! statement per open element on a stack; when an element closes, its
//! statement is popped and folded into the parent's (the squash).
//! Keyword attributes and the `each` view component never appear in
//! the output directly: they are gathered into per-element facts when
//! the element opens and spent on the wrapping forms.

use crate::ast::{Ast, Node, NodeId, Visit};
use crate::error::Error;

/// Per-element facts computed when the element opens, stacked parallel
/// to the statement stack.
#[derive(Default)]
struct NodeInfo {
    is_each: bool,
    has_if: bool,
    is_component: bool,
    is_self_closing: bool,
    /// Component already folded into an enclosing `system.Each` wrap;
    /// nothing was pushed for it and nothing must be popped.
    folded: bool,
    if_function: String,
    collect_function: String,
    key_function: String,
    view_component: String,
}

/// Walks the tree and assembles the final expression.
#[derive(Default)]
pub struct Emitter {
    statements: Vec<String>,
    infos: Vec<NodeInfo>,
    /// A run of Text/DynText children is assembled in its own
    /// statement and folded with `.Child(…)` when the run ends. At
    /// most one run is open at a time.
    text_run: bool,
}

/// Run the emitter over a tree and return the expression.
pub fn emit(ast: &Ast) -> Result<String, Error> {
    Emitter::new().emit(ast)
}

impl Emitter {
    pub fn new() -> Emitter {
        Emitter::default()
    }

    pub fn emit(mut self, ast: &Ast) -> Result<String, Error> {
        ast.process(&mut self)?;
        Ok(self.finish())
    }

    fn finish(mut self) -> String {
        assert!(
            !self.text_run && self.statements.len() == 1 && self.infos.len() == 1,
            "emitter stacks out of balance"
        );
        let mut result = self.statements.pop().expect("one statement remains");
        result.push('\r');
        result
    }

    fn top(&mut self) -> &mut String {
        self.statements.last_mut().expect("a statement is open")
    }

    /// Gather the per-element facts from its immediate children.
    fn scan(&self, ast: &Ast, id: NodeId) -> NodeInfo {
        let (is_component, is_self_closing) = match ast.node(id) {
            Node::Element {
                is_self_closing, ..
            } => (false, *is_self_closing),
            Node::Component {
                is_self_closing, ..
            } => (true, *is_self_closing),
            _ => unreachable!("only elements carry node info"),
        };
        let mut info = NodeInfo {
            is_component,
            is_self_closing,
            ..Default::default()
        };
        for &child in ast.node(id).children() {
            match ast.node(child) {
                Node::KeywordAttribute { name, effect } => match &**name {
                    "if" => info.if_function = effect.to_string(),
                    "each" => info.collect_function = effect.to_string(),
                    "key" => info.key_function = effect.to_string(),
                    _ => (),
                },
                Node::Component {
                    name,
                    is_self_closing: true,
                    ..
                } => info.view_component = name.to_string(),
                _ => (),
            }
        }
        info.is_each = !info.collect_function.is_empty()
            && !info.key_function.is_empty()
            && !info.view_component.is_empty();
        info.has_if = !info.if_function.is_empty();
        info
    }

    /// Fold an open text run into the enclosing statement.
    fn close_text_run(&mut self) {
        if !self.text_run {
            return;
        }
        self.text_run = false;
        let run = self.statements.pop().expect("a text run is open");
        let stmt = format!(".Child({run})");
        self.top().push_str(&stmt);
    }

    fn open_text_run(&mut self) {
        if !self.text_run {
            self.statements.push(String::new());
            self.text_run = true;
        }
    }

    /// Close the innermost element: end its text run, then squash its
    /// statement into the parent via `.Child` or `.DynChild`. The root
    /// statement stays put.
    fn close_element(&mut self) {
        let folded = self.infos.last().is_some_and(|info| info.folded);
        self.close_text_run();
        if folded {
            self.infos.pop();
            return;
        }
        if self.statements.len() < 2 {
            return;
        }
        let info = self.infos.pop().expect("node info is stacked");
        let stmt = self.statements.pop().expect("a statement is open");
        let squashed = if info.has_if {
            format!(".DynChild(cx, {}, {})", info.if_function, stmt)
        } else {
            format!(".Child({stmt})")
        };
        self.top().push_str(&squashed);
    }
}

impl Visit for Emitter {
    /*
        `<div>` => `(*Elem).New(nil, "div")`
        `<ul each={cF} key={kF}><Li /></ul>` =>
            `system.Each((*Elem).New(nil, "ul"), cx, cF, kF, Li.View)`
    */
    fn visit_element(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        self.close_text_run();
        let name = match ast.node(id) {
            Node::Element { name, .. } => name.clone(),
            _ => unreachable!("visit_element sees elements"),
        };
        let info = self.scan(ast, id);

        let mut stmt = format!("(*Elem).New(nil, \"{name}\")");
        if info.is_each {
            stmt = format!(
                "system.Each({stmt}, cx, {}, {}, {}.View)",
                info.collect_function, info.key_function, info.view_component
            );
        }
        if self.statements.is_empty() && info.has_if {
            stmt = format!("system.DynElem({stmt}, cx, {})", info.if_function);
        }

        let is_self_closing = info.is_self_closing;
        self.statements.push(stmt);
        self.infos.push(info);
        if is_self_closing {
            self.close_element();
        }
        Ok(())
    }

    /*
        `<Button arg1 arg2 />` => `Button.View(cx, arg1, arg2)`
    */
    fn visit_component(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        self.close_text_run();
        let name = match ast.node(id) {
            Node::Component { name, .. } => name.clone(),
            _ => unreachable!("visit_component sees components"),
        };
        let info = self.scan(ast, id);

        // The view component of an `each` element was already folded
        // into the `system.Each(…)` wrap when its parent opened.
        let view_marker = format!(", {name}.View)");
        if self
            .statements
            .last()
            .is_some_and(|stmt| stmt.contains(&view_marker))
        {
            self.infos.push(NodeInfo {
                is_component: true,
                is_self_closing: info.is_self_closing,
                folded: true,
                ..Default::default()
            });
            if info.is_self_closing {
                self.close_element();
            }
            return Ok(());
        }

        let mut stmt = format!("{name}.View(cx");
        for &child in ast.node(id).children() {
            match ast.node(child) {
                Node::Attribute { name: arg, .. } | Node::ArgumentAttribute { name: arg } => {
                    stmt.push_str(", ");
                    stmt.push_str(arg);
                }
                _ => (),
            }
        }
        stmt.push(')');
        if self.statements.is_empty() && info.has_if {
            stmt = format!("system.DynElem({stmt}, cx, {})", info.if_function);
        }

        let is_self_closing = info.is_self_closing;
        self.statements.push(stmt);
        self.infos.push(info);
        if is_self_closing {
            self.close_element();
        }
        Ok(())
    }

    /*
        `</...>`
    */
    fn visit_end_element(&mut self, _ast: &Ast, _id: NodeId, _depth: i32) -> Result<(), Error> {
        self.close_element();
        Ok(())
    }

    /*
        `Hello` => `.Text("Hello")`
    */
    fn visit_text(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        let data = match ast.node(id) {
            Node::Text { data } => data,
            _ => unreachable!("visit_text sees text"),
        };
        let call = format!(".Text(\"{data}\")");
        self.open_text_run();
        self.top().push_str(&call);
        Ok(())
    }

    /*
        `{count.Get()}` =>
            `.DynText(cx, func() string { return fmt.Sprintf("%v", count.Get()) })`
    */
    fn visit_dyn_text(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        let effect = match ast.node(id) {
            Node::DynText { effect } => effect,
            _ => unreachable!("visit_dyn_text sees dynamic text"),
        };
        let call = format!(
            ".DynText(cx, func() string {{ return fmt.Sprintf(\"%v\", {effect}) }})"
        );
        self.open_text_run();
        self.top().push_str(&call);
        Ok(())
    }

    /*
        `id="sub-button"` => `.Attr("id", "sub-button")`
    */
    fn visit_attribute(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        if self.infos.last().is_some_and(|info| info.is_component) {
            return Ok(());
        }
        let (name, value) = match ast.node(id) {
            Node::Attribute { name, value } => (name, value),
            _ => unreachable!("visit_attribute sees normal attributes"),
        };
        let call = format!(".Attr(\"{name}\", \"{value}\")");
        self.top().push_str(&call);
        Ok(())
    }

    /*
        `on:click={ func(e Event) {} }` => `.On("click", func(e Event) {})`
    */
    fn visit_event_attribute(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        let (event, effect) = match ast.node(id) {
            Node::EventAttribute { event, effect, .. } => (event, effect),
            _ => unreachable!("visit_event_attribute sees event attributes"),
        };
        let call = format!(".On(\"{event}\", {effect})");
        self.top().push_str(&call);
        Ok(())
    }

    /*
        `class:dark={isDark}` => `.DynAttr("class", "dark", isDark)`
    */
    fn visit_dyn_attribute(&mut self, ast: &Ast, id: NodeId, _depth: i32) -> Result<(), Error> {
        let (name, value, effect) = match ast.node(id) {
            Node::DynAttribute {
                name,
                value,
                effect,
            } => (name, value, effect),
            _ => unreachable!("visit_dyn_attribute sees dynamic attributes"),
        };
        let call = format!(".DynAttr(\"{name}\", \"{value}\", {effect})");
        self.top().push_str(&call);
        Ok(())
    }

    // Keyword attributes, argument attributes and comments keep their
    // default dump behavior: they are consumed when the element opens
    // and emit nothing themselves.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_runs_fold_into_the_open_statement() {
        let mut emitter = Emitter::new();
        emitter.statements.push("(*Elem).New(nil, \"div\")".to_string());
        emitter.infos.push(NodeInfo::default());
        emitter.open_text_run();
        emitter.top().push_str(".Text(\"x\")");
        emitter.close_text_run();
        assert_eq!(
            emitter.statements.last().unwrap(),
            "(*Elem).New(nil, \"div\").Child(.Text(\"x\"))"
        );
        assert!(!emitter.text_run);
    }

    #[test]
    fn squash_prefers_dyn_child_for_conditional_elements() {
        let mut emitter = Emitter::new();
        emitter.statements.push("parent".to_string());
        emitter.infos.push(NodeInfo::default());
        emitter.statements.push("child".to_string());
        emitter.infos.push(NodeInfo {
            has_if: true,
            if_function: "cond".to_string(),
            ..Default::default()
        });
        emitter.close_element();
        assert_eq!(
            emitter.statements.last().unwrap(),
            "parent.DynChild(cx, cond, child)"
        );
        assert_eq!(emitter.infos.len(), 1);
    }

    #[test]
    fn the_root_statement_is_never_squashed_away() {
        let mut emitter = Emitter::new();
        emitter.statements.push("root".to_string());
        emitter.infos.push(NodeInfo::default());
        emitter.close_element();
        assert_eq!(emitter.statements.len(), 1);
        assert_eq!(emitter.finish(), "root\r");
    }
}
