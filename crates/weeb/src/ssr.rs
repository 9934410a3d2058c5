//! In-memory attachment, for rendering and exercising pages off the browser.
use std::convert::Infallible;

use crate::event::{Attach, EventSource, EventType, Handler, Target};

/// Records bound handlers so events can be fired at them later.
#[derive(Default)]
pub struct SsrDom {
    bindings: Vec<(Target, Handler)>,
}

impl SsrDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &[(Target, Handler)] {
        &self.bindings
    }

    /// Number of handlers bound for `event` on `target`.
    pub fn bound(&self, target: &Target, event: EventType) -> usize {
        self.matching(target, event).count()
    }

    fn matching<'a>(
        &'a self,
        target: &'a Target,
        event: EventType,
    ) -> impl Iterator<Item = &'a Handler> + 'a {
        self.bindings
            .iter()
            .filter(move |(bound, handler)| bound == target && handler.event() == event)
            .map(|(_, handler)| handler)
    }

    /// Deliver an event built from `source` to every matching handler.
    /// Returns how many handlers ran.
    pub fn fire(&self, target: &Target, event: EventType, source: &dyn EventSource) -> usize {
        let mut count = 0;
        for handler in self.matching(target, event) {
            handler.handle(source);
            count += 1;
        }
        log::trace!("fired {event} at {target:?} into {count} handler(s)");
        count
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl Attach for SsrDom {
    type Error = Infallible;

    fn bind(&mut self, target: &Target, handler: Handler) -> Result<(), Self::Error> {
        self.bindings.push((target.clone(), handler));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::{cell::Cell, rc::Rc};

    use crate::prelude::*;

    #[test]
    fn fires_bound_listeners() {
        let doc = Document::default();
        let count = Rc::new(Cell::new(0));
        let listener = Listener::click({
            let count = count.clone();
            move |_: &MouseEvent| count.set(count.get() + 1)
        });
        let button = doc.div(("Press", listener.clone(), listener));
        doc.push_body(button.clone());
        let id = button.id().unwrap();

        let mut dom = SsrDom::new();
        let Ok(bound) = doc.attach(&mut dom);
        assert_eq!(bound, 1);

        let target = Target::Element(id);
        let source = serde_json::json!({"type": "click"});
        assert_eq!(dom.fire(&target, EventType::Click, &source), 1);
        assert_eq!(dom.fire(&target, EventType::Load, &source), 0);
        assert_eq!(dom.fire(&Target::Window, EventType::Click, &source), 0);
        assert_eq!(count.get(), 1);
    }
}
