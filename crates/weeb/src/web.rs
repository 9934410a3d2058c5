//! Binding registered listeners in the browser (through web-sys).
use snafu::OptionExt;
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

use crate::{
    error::{Error, MissingElementSnafu, NoWindowSnafu, Result},
    event::{Attach, EventSource, Handler, Target},
};

fn property(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

impl EventSource for JsValue {
    fn flag(&self, key: &str) -> bool {
        property(self, key).as_bool().unwrap_or(false)
    }

    fn number(&self, key: &str) -> f64 {
        property(self, key).as_f64().unwrap_or(0.0)
    }

    fn string(&self, key: &str) -> Option<String> {
        property(self, key).as_string()
    }

    fn target_id(&self) -> Option<String> {
        let target = property(self, "target");
        property(&target, "id")
            .as_string()
            .filter(|id| !id.is_empty())
    }
}

/// The live page.
///
/// Closures handed to `addEventListener` live as long as the `WebDom`.
pub struct WebDom {
    window: web_sys::Window,
    document: web_sys::Document,
    callbacks: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl WebDom {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().context(NoWindowSnafu)?;
        let document = window.document().context(NoWindowSnafu)?;
        Ok(Self {
            window,
            document,
            callbacks: vec![],
        })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Attach for WebDom {
    type Error = Error;

    fn bind(&mut self, target: &Target, handler: Handler) -> Result<()> {
        let event_target: web_sys::EventTarget = match target {
            Target::Element(id) => self
                .document
                .get_element_by_id(id)
                .context(MissingElementSnafu { id: id.as_str() })?
                .unchecked_into(),
            Target::Window => self.window.clone().unchecked_into(),
        };
        let event = handler.event();
        let callback = Closure::wrap(Box::new(move |native: JsValue| {
            handler.handle(&native);
        }) as Box<dyn FnMut(JsValue)>);
        event_target
            .add_event_listener_with_callback(event.as_str(), callback.as_ref().unchecked_ref())
            .map_err(|err| Error::Js {
                message: format!("{err:?}"),
            })?;
        log::trace!("bound {event} on {target:?}");
        self.callbacks.push(callback);
        Ok(())
    }
}
