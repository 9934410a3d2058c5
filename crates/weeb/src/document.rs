//! The document: shared lookup tables plus head and body node lists.
use std::{
    cell::Ref,
    collections::BTreeMap,
};

use crate::{
    attr::{ClassId, ClassTable, Directive, encode_id, is_attr_name, normalize_class_name},
    content::{Appender, Args, Body, Fragment, Model},
    event::Listener,
    head::Head,
    node::{Element, Node, Tag, claim_all},
    str::Str,
    sync::Shared,
};

/// One logical page.
///
/// A `Document` owns the class table, the synthesized-id counter, the
/// id→element map and the id→listener registry, along with the page's
/// head and body nodes. Node constructors are methods on the document so
/// they can intern classes and register listeners as the tree is built.
///
/// `Document` is a handle: clones share the same state.
#[derive(Clone, Default)]
pub struct Document {
    head: Shared<Vec<Head>>,
    body: Shared<Vec<Node>>,
    classes: Shared<ClassTable>,
    assigned_ids: Shared<u64>,
    nodes_by_id: Shared<BTreeMap<Str, Element>>,
    listeners_by_id: Shared<BTreeMap<Str, Vec<Listener>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> Ref<'_, ClassTable> {
        self.classes.get()
    }

    /// Intern a class name, returning its id. Equal class sets in any
    /// order share one id.
    pub fn class_by_name(&self, name: &str) -> ClassId {
        self.classes.get_mut().intern(name)
    }

    /// The id of `element`, synthesizing one from the counter if it has
    /// none. Calling this again on the same element returns the same id.
    pub fn assign_id(&self, element: &Element) -> Str {
        if let Some(id) = element.id().filter(|id| !id.is_empty()) {
            return id;
        }
        let id = {
            let mut count = self.assigned_ids.get_mut();
            let id = encode_id(*count);
            *count += 1;
            id
        };
        log::trace!("assigned id {id:?} to <{}>", element.tag());
        element.attrs_mut().id = Some(id.clone());
        id
    }

    /// Record `element` in the id map under its current id, if it has one.
    pub fn anchor(&self, element: &Element) {
        if let Some(id) = element.id() {
            self.nodes_by_id.get_mut().insert(id, element.clone());
        }
    }

    /// Register `listeners` against `element`, assigning it an id if needed.
    pub fn add_event_listener(
        &self,
        element: &Element,
        listeners: impl IntoIterator<Item = Listener>,
    ) -> Str {
        let id = self.assign_id(element);
        let mut registry = self.listeners_by_id.get_mut();
        let list = registry.entry(id.clone()).or_default();
        let before = list.len();
        list.extend(listeners);
        log::debug!("{} listener(s) on #{id}", list.len() - before);
        id
    }

    /// Apply one attribute directive to `element`.
    ///
    /// An empty class or id is ignored, as is an attribute whose name can't
    /// be written as one. An id directive also records the element in the
    /// id map.
    pub fn apply_directive(&self, element: &Element, directive: Directive) {
        log::trace!("<{}> {directive:?}", element.tag());
        match directive {
            Directive::Class(name) => {
                if normalize_class_name(&name).is_empty() {
                    return;
                }
                let class = self.class_by_name(&name);
                element.attrs_mut().class = Some(class);
            }
            Directive::Id(id) => {
                if id.is_empty() {
                    return;
                }
                element.attrs_mut().id = Some(id);
                self.anchor(element);
            }
            Directive::Attr(name, value) => {
                if !is_attr_name(&name) {
                    log::warn!("<{}> dropping bad attribute name {name:?}", element.tag());
                    return;
                }
                element.attrs_mut().set(name, value)
            }
        }
    }

    /// Set an attribute on an existing element. Every non-empty `spec` is
    /// a directive here, a bare word being a boolean attribute.
    pub fn set_attr(&self, element: &Element, spec: &str) {
        let directive = Directive::parse(spec, &element.attrs(), true);
        if let Some(directive) = directive {
            self.apply_directive(element, directive);
        }
    }

    /// Restart id synthesis, so the next render pass assigns the same ids
    /// as the last one.
    ///
    /// The listener registry is kept; see [`Document::clear_listeners`].
    pub fn reset(&self) {
        log::debug!("reset id counter");
        self.assigned_ids.set(0);
    }

    /// Drop every registered listener.
    pub fn clear_listeners(&self) {
        self.listeners_by_id.get_mut().clear();
    }

    /// Forget every element recorded in the id map.
    pub fn clear_nodes(&self) {
        self.nodes_by_id.get_mut().clear();
    }

    pub fn head(&self) -> Ref<'_, Vec<Head>> {
        self.head.get()
    }

    pub fn set_head(&self, head: Vec<Head>) {
        self.head.set(head);
    }

    pub fn push_head(&self, head: impl Into<Head>) {
        self.head.get_mut().push(head.into());
    }

    pub fn body(&self) -> Ref<'_, Vec<Node>> {
        self.body.get()
    }

    /// Replace the body. The old body's elements are released, so they may
    /// be attached elsewhere.
    pub fn set_body(&self, body: Vec<Node>) {
        for node in self.body.get().iter() {
            node.release();
        }
        let body = claim_all("body", body);
        self.body.set(body);
    }

    /// Append to the body. An element that already has a parent is
    /// skipped with a warning.
    pub fn push_body(&self, node: impl Into<Node>) {
        let nodes = claim_all("body", [node.into()]);
        self.body.get_mut().extend(nodes);
    }

    pub fn node_by_id(&self, id: &str) -> Option<Element> {
        self.nodes_by_id.get().get(id).cloned()
    }

    /// The listeners registered against `id`, in registration order.
    pub fn listeners(&self, id: &str) -> Vec<Listener> {
        self.listeners_by_id
            .get()
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every id with registered listeners.
    pub fn listener_ids(&self) -> Vec<Str> {
        self.listeners_by_id.get().keys().cloned().collect()
    }

    /// The whole page: doctype, head nodes then body nodes.
    pub fn markup(&self) -> String {
        let classes = self.classes.get();
        let mut out = String::from("<!DOCTYPE html><html><head>");
        for head in self.head.get().iter() {
            out.push_str(&head.html_string());
        }
        out.push_str("</head><body>");
        for node in self.body.get().iter() {
            node.write_html(&classes, &mut out);
        }
        out.push_str("</body></html>");
        out
    }

    /// Call a body producer, keeping its listener with the output.
    pub fn fragment<B: Body + ?Sized>(&self, producer: &B) -> Fragment<B::Item> {
        Fragment {
            items: producer.body(self),
            listener: producer.listener(),
        }
    }

    /// Build an element of content model `C` from an argument list.
    ///
    /// In `force` mode every string argument is an attribute directive.
    /// Returns the element and the text the model could not hold.
    pub(crate) fn build<C: Model>(
        &self,
        tag: Tag,
        force: bool,
        args: impl Args<C>,
    ) -> (Element, Option<Str>) {
        let mut appender = Appender::new(self, Element::new(tag), force);
        args.append_all(&mut appender);
        appender.finish()
    }

    /// Like [`Document::build`], for models that drop stray text.
    pub(crate) fn element<C: Model>(&self, tag: Tag, force: bool, args: impl Args<C>) -> Element {
        let (element, leftover) = self.build(tag, force, args);
        if let Some(text) = leftover {
            log::warn!("<{tag}> holds no text, dropping {text:?}");
        }
        element
    }
}
