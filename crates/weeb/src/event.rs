//! Typed events, listeners and their attachment to a live page.
//!
//! Listeners are registered in the [`Document`] while the tree is built.
//! Later an [`Attach`] implementation (the browser, or [`SsrDom`] in
//! memory) receives one [`Handler`] per listener and event, bound to a
//! [`Target`].
//!
//! [`SsrDom`]: crate::ssr::SsrDom
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{document::Document, node::Node, str::Str};

/// DOM event types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Load,
    Unload,
    Abort,
    Error,
    Select,
    Change,
    Submit,
    Reset,
    Focus,
    Blur,
    Resize,
    Scroll,
    Click,
    MouseDown,
    MouseUp,
    MouseOver,
    MouseMove,
    MouseOut,
}

impl EventType {
    pub const ALL: [EventType; 18] = [
        EventType::Load,
        EventType::Unload,
        EventType::Abort,
        EventType::Error,
        EventType::Select,
        EventType::Change,
        EventType::Submit,
        EventType::Reset,
        EventType::Focus,
        EventType::Blur,
        EventType::Resize,
        EventType::Scroll,
        EventType::Click,
        EventType::MouseDown,
        EventType::MouseUp,
        EventType::MouseOver,
        EventType::MouseMove,
        EventType::MouseOut,
    ];

    /// The DOM name, as passed to `addEventListener`.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Load => "load",
            EventType::Unload => "unload",
            EventType::Abort => "abort",
            EventType::Error => "error",
            EventType::Select => "select",
            EventType::Change => "change",
            EventType::Submit => "submit",
            EventType::Reset => "reset",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
            EventType::Resize => "resize",
            EventType::Scroll => "scroll",
            EventType::Click => "click",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::MouseOver => "mouseover",
            EventType::MouseMove => "mousemove",
            EventType::MouseOut => "mouseout",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key/value view of a native event.
pub trait EventSource {
    /// A boolean property, false when missing.
    fn flag(&self, key: &str) -> bool;

    /// A numeric property, zero when missing.
    fn number(&self, key: &str) -> f64;

    fn string(&self, key: &str) -> Option<String>;

    /// The id of the element the event was dispatched to.
    fn target_id(&self) -> Option<String>;
}

impl EventSource for serde_json::Value {
    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }

    fn number(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0)
    }

    fn string(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
    }

    fn target_id(&self) -> Option<String> {
        let target = self.get("target")?;
        target
            .as_str()
            .or_else(|| target.get("id").and_then(serde_json::Value::as_str))
            .map(str::to_string)
    }
}

/// A DOM event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The DOM event name, eg "click".
    pub kind: String,
    pub bubbles: bool,
    /// Id of the target element.
    pub target: Option<String>,
    /// Microseconds.
    pub timestamp: i64,
    pub phase: u16,
}

impl Event {
    pub fn from_source(source: &(impl EventSource + ?Sized)) -> Self {
        Event {
            kind: source.string("type").unwrap_or_default(),
            bubbles: source.flag("bubbles"),
            target: source.target_id(),
            timestamp: (source.number("timeStamp") * 1000.0) as i64,
            phase: source.number("eventPhase") as u16,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Modifier keys held during a mouse event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyModifier(pub u16);

impl KeyModifier {
    pub const CONTROL: KeyModifier = KeyModifier(1);
    pub const SHIFT: KeyModifier = KeyModifier(1 << 1);
    pub const ALT: KeyModifier = KeyModifier(1 << 2);
    pub const META: KeyModifier = KeyModifier(1 << 3);

    pub fn contains(self, other: KeyModifier) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for KeyModifier {
    type Output = KeyModifier;

    fn bitor(self, rhs: Self) -> Self::Output {
        KeyModifier(self.0 | rhs.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub event: Event,
    pub screen: Point,
    pub client: Point,
    pub modifiers: KeyModifier,
    pub button: u16,
}

impl MouseEvent {
    pub fn from_source(source: &(impl EventSource + ?Sized)) -> Self {
        let point = |prefix: &str| Point {
            x: source.number(&format!("{prefix}X")),
            y: source.number(&format!("{prefix}Y")),
        };
        let mut modifiers = KeyModifier::default();
        for (key, modifier) in [
            ("ctrlKey", KeyModifier::CONTROL),
            ("shiftKey", KeyModifier::SHIFT),
            ("altKey", KeyModifier::ALT),
            ("metaKey", KeyModifier::META),
        ] {
            if source.flag(key) {
                modifiers = modifiers | modifier;
            }
        }
        MouseEvent {
            event: Event::from_source(source),
            screen: point("screen"),
            client: point("client"),
            modifiers,
            button: source.number("button") as u16,
        }
    }
}

/// Something that handles clicks.
pub trait OnClick {
    fn click(&self, event: &MouseEvent);
}

impl<F: Fn(&MouseEvent)> OnClick for F {
    fn click(&self, event: &MouseEvent) {
        self(event)
    }
}

/// Something that handles page loads.
pub trait OnLoad {
    fn load(&self, event: &Event);
}

impl<F: Fn(&Event)> OnLoad for F {
    fn load(&self, event: &Event) {
        self(event)
    }
}

/// An event listener, by capability.
#[derive(Clone)]
pub enum Listener {
    Click(Rc<dyn OnClick>),
    Load(Rc<dyn OnLoad>),
    Both {
        click: Rc<dyn OnClick>,
        load: Rc<dyn OnLoad>,
    },
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Listener").field(&self.events()).finish()
    }
}

impl Listener {
    pub fn click(handler: impl OnClick + 'static) -> Self {
        Listener::Click(Rc::new(handler))
    }

    pub fn load(handler: impl OnLoad + 'static) -> Self {
        Listener::Load(Rc::new(handler))
    }

    /// A listener for both clicks and loads, backed by one value.
    pub fn both(handler: impl OnClick + OnLoad + 'static) -> Self {
        let handler = Rc::new(handler);
        Listener::Both {
            click: handler.clone(),
            load: handler,
        }
    }

    pub fn events(&self) -> &'static [EventType] {
        match self {
            Listener::Click(_) => &[EventType::Click],
            Listener::Load(_) => &[EventType::Load],
            Listener::Both { .. } => &[EventType::Click, EventType::Load],
        }
    }

    fn data_ptr(&self) -> *const () {
        match self {
            Listener::Click(click) | Listener::Both { click, .. } => {
                Rc::as_ptr(click) as *const ()
            }
            Listener::Load(load) => Rc::as_ptr(load) as *const (),
        }
    }

    /// Whether both listeners are the same object.
    pub fn same(&self, other: &Listener) -> bool {
        std::ptr::eq(self.data_ptr(), other.data_ptr())
    }

    /// The handlers binding this listener for an element with `id`.
    ///
    /// Clicks bind on the element, loads on the window.
    pub fn handlers(&self, id: &Str) -> Vec<(Target, Handler)> {
        self.events()
            .iter()
            .map(|event| {
                let target = match event {
                    EventType::Load => Target::Window,
                    _ => Target::Element(id.clone()),
                };
                let handler = Handler {
                    event: *event,
                    listener: self.clone(),
                };
                (target, handler)
            })
            .collect()
    }
}

/// Where a handler is bound.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Element(Str),
    Window,
}

/// One listener bound to one event type.
#[derive(Clone, Debug)]
pub struct Handler {
    event: EventType,
    listener: Listener,
}

impl Handler {
    pub fn event(&self) -> EventType {
        self.event
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    /// Build the typed event from `source` and invoke the listener.
    pub fn handle(&self, source: &dyn EventSource) {
        match (self.event, &self.listener) {
            (EventType::Click, Listener::Click(click) | Listener::Both { click, .. }) => {
                click.click(&MouseEvent::from_source(source))
            }
            (EventType::Load, Listener::Load(load) | Listener::Both { load, .. }) => {
                load.load(&Event::from_source(source))
            }
            (event, listener) => log::warn!("{listener:?} does not handle {event}"),
        }
    }
}

/// A live page that handlers can be bound to.
pub trait Attach {
    type Error;

    fn bind(&mut self, target: &Target, handler: Handler) -> Result<(), Self::Error>;
}

fn bind_listeners<A: Attach>(
    dom: &mut A,
    id: &Str,
    listeners: &[Listener],
) -> Result<usize, A::Error> {
    let mut bound = 0;
    for listener in listeners {
        for (target, handler) in listener.handlers(id) {
            log::trace!("binding {} on {target:?}", handler.event());
            dom.bind(&target, handler)?;
            bound += 1;
        }
    }
    Ok(bound)
}

impl Document {
    /// Bind every registered listener. Returns the number of handlers bound.
    pub fn attach<A: Attach>(&self, dom: &mut A) -> Result<usize, A::Error> {
        let mut bound = 0;
        for id in self.listener_ids() {
            bound += bind_listeners(dom, &id, &self.listeners(&id))?;
        }
        log::debug!("attached {bound} handler(s)");
        Ok(bound)
    }

    /// Bind the listeners of `node` and its descendants, after `node` has
    /// replaced part of a live page.
    pub fn attach_node<A: Attach>(&self, dom: &mut A, node: &Node) -> Result<usize, A::Error> {
        let Some(element) = node.element() else {
            return Ok(0);
        };
        let mut bound = 0;
        if let Some(id) = element.id() {
            bound += bind_listeners(dom, &id, &self.listeners(&id))?;
        }
        let children = element.children().clone();
        for child in children.iter() {
            bound += self.attach_node(dom, child)?;
        }
        Ok(bound)
    }
}

/// A stream of clicks delivered to the listener returned by [`clicks`].
pub struct Clicks {
    rx: async_channel::Receiver<MouseEvent>,
}

impl Clicks {
    /// Wait for the next click.
    pub async fn next(&self) -> Option<MouseEvent> {
        self.rx.recv().await.ok()
    }

    pub fn try_next(&self) -> Option<MouseEvent> {
        self.rx.try_recv().ok()
    }

    /// Clicks delivered but not yet received.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// A click listener and the stream of its clicks.
pub fn clicks() -> (Listener, Clicks) {
    let (tx, rx) = async_channel::unbounded();
    let listener = Listener::click(move |event: &MouseEvent| {
        if tx.try_send(event.clone()).is_err() {
            log::trace!("click stream is closed");
        }
    });
    (listener, Clicks { rx })
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn event_names_roundtrip_through_serde() {
        for kind in EventType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::from(kind.as_str()));
            assert_eq!(EventType::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn mouse_events_read_their_source() {
        let source = serde_json::json!({
            "type": "click",
            "bubbles": true,
            "target": {"id": "7"},
            "timeStamp": 1.5,
            "eventPhase": 2,
            "clientX": 10.0,
            "clientY": 20.0,
            "shiftKey": true,
            "metaKey": true,
            "button": 1
        });
        let event = MouseEvent::from_source(&source);
        assert_eq!(event.event.kind, "click");
        assert!(event.event.bubbles);
        assert_eq!(event.event.target.as_deref(), Some("7"));
        assert_eq!(event.event.timestamp, 1500);
        assert_eq!(event.event.phase, 2);
        assert_eq!(event.client, Point { x: 10.0, y: 20.0 });
        assert_eq!(event.screen, Point::default());
        assert!(event.modifiers.contains(KeyModifier::SHIFT | KeyModifier::META));
        assert!(!event.modifiers.contains(KeyModifier::CONTROL));
        assert_eq!(event.button, 1);
    }

    struct Both {
        clicks: Cell<u32>,
        loads: Cell<u32>,
    }

    impl OnClick for Both {
        fn click(&self, _: &MouseEvent) {
            self.clicks.set(self.clicks.get() + 1);
        }
    }

    impl OnLoad for Both {
        fn load(&self, _: &Event) {
            self.loads.set(self.loads.get() + 1);
        }
    }

    #[test]
    fn both_binds_click_on_element_and_load_on_window() {
        let listener = Listener::both(Both {
            clicks: Cell::new(0),
            loads: Cell::new(0),
        });
        let handlers = listener.handlers(&"x".into());
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].0, Target::Element("x".into()));
        assert_eq!(handlers[0].1.event(), EventType::Click);
        assert_eq!(handlers[1].0, Target::Window);
        assert_eq!(handlers[1].1.event(), EventType::Load);
        assert!(listener.same(&listener.clone()));
        assert!(!listener.same(&Listener::load(|_: &Event| {})));
    }

    #[test]
    fn click_stream() {
        let (listener, clicks) = clicks();
        let handler = listener.handlers(&"b".into()).remove(0).1;
        handler.handle(&serde_json::json!({"type": "click", "button": 2}));
        assert_eq!(clicks.pending(), 1);
        let click = futures_lite::future::block_on(clicks.next()).unwrap();
        assert_eq!(click.button, 2);
        assert!(clicks.try_next().is_none());
    }
}
