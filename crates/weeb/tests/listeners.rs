use std::{cell::RefCell, rc::Rc};

use weeb::prelude::*;

#[test]
fn listener_registers_on_synthesized_id() {
    let doc = Document::default();
    let (listener, _clicks) = clicks();
    let div = doc.div(("press me", listener.clone()));
    let id = div.id().expect("listener assigns an id");
    let registered = doc.listeners(&id);
    assert_eq!(registered.len(), 1);
    assert!(registered[0].same(&listener));
    assert_eq!(
        div.html_string(&doc),
        format!(r#"<div id="{id}">press me</div>"#)
    );
}

#[test]
fn listener_keeps_explicit_id() {
    let doc = Document::default();
    let listener = Listener::load(|_: &Event| {});
    let canvas = doc.div(("#canvas1", listener));
    assert_eq!(canvas.id().as_deref(), Some("canvas1"));
    assert_eq!(doc.listener_ids(), vec![Str::from("canvas1")]);
}

/// A body producer that carries a click listener, like a command console.
struct Console {
    prompt: &'static str,
    log: Rc<RefCell<Vec<u16>>>,
}

impl Body for Console {
    type Item = Node;

    fn body(&self, doc: &Document) -> Vec<Node> {
        let input = doc.input(InputType::Text);
        doc.set_attr(
            input.element().unwrap(),
            &format!("placeholder={}", self.prompt),
        );
        vec![doc.div((".console", input)).into(), doc.p("help").into()]
    }

    fn listener(&self) -> Option<Listener> {
        let log = self.log.clone();
        Some(Listener::click(move |event: &MouseEvent| {
            log.borrow_mut().push(event.button)
        }))
    }
}

#[test]
fn fragment_listener_goes_to_first_element() {
    let doc = Document::default();
    let console = Console {
        prompt: "Enter Command",
        log: Default::default(),
    };
    let form = doc.form(doc.fragment(&console));
    doc.push_body(form.clone());

    let first = form.children()[0].clone();
    let id = first.id().expect("first element is addressable");
    assert!(doc.node_by_id(&id).unwrap().same(first.element().unwrap()));
    assert_eq!(doc.listeners(&id).len(), 1);
    assert_eq!(form.id(), None);

    let mut dom = SsrDom::new();
    let Ok(bound) = doc.attach(&mut dom);
    assert_eq!(bound, 1);
    let source = serde_json::json!({"type": "click", "button": 0});
    assert_eq!(dom.fire(&Target::Element(id), EventType::Click, &source), 1);
    assert_eq!(*console.log.borrow(), vec![0]);
}

#[test]
fn attach_node_walks_descendants() {
    let doc = Document::default();
    let (outer, outer_clicks) = clicks();
    let (inner, inner_clicks) = clicks();
    let (elsewhere, _) = clicks();
    let section = doc.section((
        outer,
        doc.div(doc.ul(doc.li(doc.a(("href=#", "deep", inner))))),
    ));
    let other = doc.div(elsewhere);
    doc.set_body(vec![section.clone().into(), other.into()]);

    let mut dom = SsrDom::new();
    let Ok(bound) = doc.attach_node(&mut dom, &section);
    assert_eq!(bound, 2);

    let source = serde_json::json!({"type": "click"});
    for (target, _) in dom.bindings() {
        dom.fire(target, EventType::Click, &source);
    }
    assert_eq!(outer_clicks.pending(), 1);
    assert_eq!(inner_clicks.pending(), 1);
}

#[test]
fn load_listeners_bind_on_the_window() {
    let doc = Document::default();
    let loads = Rc::new(RefCell::new(0));
    let listener = Listener::load({
        let loads = loads.clone();
        move |event: &Event| {
            assert_eq!(event.kind, "load");
            *loads.borrow_mut() += 1;
        }
    });
    let canvas = doc.canvas("#c1");
    let panel = doc.div((".panel", canvas, listener));
    doc.push_body(panel);

    let mut dom = SsrDom::new();
    let Ok(_) = doc.attach(&mut dom);
    assert_eq!(dom.bound(&Target::Window, EventType::Load), 1);
    let fired = dom.fire(
        &Target::Window,
        EventType::Load,
        &serde_json::json!({"type": "load"}),
    );
    assert_eq!(fired, 1);
    assert_eq!(*loads.borrow(), 1);
}

#[test]
fn re_registration_accumulates_until_cleared() {
    let doc = Document::default();
    let (listener, _clicks) = clicks();
    let build = |doc: &Document| {
        doc.reset();
        doc.div(listener.clone())
    };
    let first = build(&doc);
    let second = build(&doc);
    assert_eq!(first.id(), second.id());
    let id = first.id().unwrap();
    assert_eq!(doc.listeners(&id).len(), 2);
    doc.clear_listeners();
    assert!(doc.listeners(&id).is_empty());
}
