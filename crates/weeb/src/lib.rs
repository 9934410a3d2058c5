//! Server-side HTML documents.
//!
//! `weeb` builds a page as an in-memory tree owned by a [`Document`], then
//! serializes it to markup. Node constructors are methods on the document
//! and take a flat argument list mixing attribute directives, literal text,
//! child nodes and event listeners:
//!
//! ```
//! use weeb::prelude::*;
//!
//! let doc = Document::default();
//! let (listener, clicks) = clicks();
//! let nav = doc.nav((
//!     ".top-bar",
//!     "role=navigation",
//!     doc.ul(doc.li(doc.a(("href=/", "Home")))),
//!     doc.div(("Clicks:", 0, listener)),
//! ));
//! doc.push_body(nav);
//! doc.reset();
//!
//! assert!(doc.markup().contains(r#"<nav class="top-bar" role="navigation">"#));
//! assert!(clicks.try_next().is_none());
//! ```
//!
//! ## Lazy ids
//!
//! Elements only get an `id` when something needs to find them again: an
//! explicit `#id` directive, an event listener, or a canvas drawer.
//! Synthesized ids come from a per-document counter, so calling
//! [`Document::reset`] before each render pass keeps them stable.
//!
//! ## Content models
//!
//! Each constructor accepts the children its element may hold. Passing a
//! table row to a paragraph does not compile. See [`content`].
//!
//! ## Listeners
//!
//! [`Listener`](event::Listener)s registered during construction are kept
//! in the document by element id. [`Document::attach`] hands them to an
//! [`Attach`](event::Attach) implementation: [`ssr::SsrDom`] records them in
//! memory, and `web::WebDom` (feature `web`) binds them in the browser.

macro_rules! constructors {
    ($(
        $(#[$meta:meta])*
        $name:ident: $tag:ident, $model:ty $(, force = $force:literal)? => $wrap:ident;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self, args: impl $crate::content::Args<$model>) -> $wrap {
                let force = false $(|| $force)?;
                $wrap($crate::node::Node::Element(self.element::<$model>(
                    $crate::node::Tag::$tag,
                    force,
                    args,
                )))
            }
        )*
    };
}

pub mod attr;
mod block;
pub mod content;
pub mod document;
pub mod error;
pub mod event;
mod form;
pub mod head;
mod inline;
pub mod node;
pub mod site;
pub mod ssr;
pub mod str;
mod svg;
pub mod sync;
mod table;
#[cfg(feature = "web")]
pub mod web;

pub use document::Document;
pub use error::{Error, Result};
pub use form::{FormMethod, InputType};

pub mod prelude {
    //! Everything needed to build and render documents.
    pub use crate::{
        Document, Error, FormMethod, InputType, Result,
        attr::{AttrSpec, ClassId, Directive},
        content::{Args, Body, Content, Fragment, Leaf, Literal, Raw, literal, raw},
        event::{
            Attach, Clicks, Event, EventSource, EventType, Handler, KeyModifier, Listener,
            MouseEvent, OnClick, OnLoad, Point, Target, clicks,
        },
        head::{Head, Meta, Script},
        node::{
            Block, Canvas, Cell, Col, Element, Inline, Node, Row, SelectOption, Shape, TablePart,
            Tag,
        },
        site::{ContentSource, Page, Site, StaticContent},
        ssr::SsrDom,
        str::Str,
    };
}
