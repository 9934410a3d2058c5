//! Body nodes and their markup.
use std::cell::{Ref, RefMut};

use crate::{
    attr::{Attrs, ClassTable},
    document::Document,
    head::Script,
    str::Str,
    sync::Shared,
};

/// Element variants. The tag name and closing rule are fixed per variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    P,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Ul,
    Ol,
    Li,
    Pre,
    Div,
    Nav,
    Section,
    Blockquote,
    Hr,
    Address,
    Canvas,
    A,
    Span,
    Tt,
    I,
    B,
    Big,
    Small,
    Br,
    Table,
    Caption,
    Colgroup,
    Col,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
    Form,
    Label,
    Input,
    Select,
    Option,
    Textarea,
    Svg,
    Circle,
}

enum Closing {
    /// `<tag attrs>children</tag>`
    Container,
    /// `<tag attrs>`
    Void,
    /// `<tag attrs/>`
    SelfClosing,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::P => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Pre => "pre",
            Tag::Div => "div",
            Tag::Nav => "nav",
            Tag::Section => "section",
            Tag::Blockquote => "blockquote",
            Tag::Hr => "hr",
            Tag::Address => "address",
            Tag::Canvas => "canvas",
            Tag::A => "a",
            Tag::Span => "span",
            Tag::Tt => "tt",
            Tag::I => "i",
            Tag::B => "b",
            Tag::Big => "big",
            Tag::Small => "small",
            Tag::Br => "br",
            Tag::Table => "table",
            Tag::Caption => "caption",
            Tag::Colgroup => "colgroup",
            Tag::Col => "col",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tfoot => "tfoot",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Form => "form",
            Tag::Label => "label",
            Tag::Input => "input",
            Tag::Select => "select",
            Tag::Option => "option",
            Tag::Textarea => "textarea",
            Tag::Svg => "svg",
            Tag::Circle => "circle",
        }
    }

    fn closing(self) -> Closing {
        match self {
            Tag::Hr | Tag::Br | Tag::Col => Closing::Void,
            Tag::Input | Tag::Circle => Closing::SelfClosing,
            _ => Closing::Container,
        }
    }

    /// Attributes that always render after the user attributes.
    pub fn trailing_attributes(self) -> &'static [&'static str] {
        match self {
            Tag::A => &["href"],
            Tag::Form => &["method", "action"],
            Tag::Label => &["for"],
            Tag::Input => &["type"],
            _ => &[],
        }
    }
}

impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A run of literal text.
///
/// Consecutive literal arguments of one constructor call are separated by
/// a single space; `spaced` records whether this run is preceded by one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub spaced: bool,
    pub text: Str,
}

/// Escape literal text for use as element content.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Anything that can sit inside a document body.
#[derive(Clone)]
pub enum Node {
    /// Literal text, escaped on output.
    Text(Text),
    /// Markup emitted verbatim.
    Raw(Str),
    Element(Element),
    Script(Script),
}

impl Node {
    pub fn element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// The text of a text node.
    pub fn text(&self) -> Option<&Str> {
        match self {
            Node::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// The id of an element node.
    pub fn id(&self) -> Option<Str> {
        self.element().and_then(Element::id)
    }

    /// A snapshot of an element node's children.
    pub fn children(&self) -> Vec<Node> {
        self.element()
            .map(|element| element.children().clone())
            .unwrap_or_default()
    }

    pub fn html_string(&self, doc: &Document) -> String {
        let mut out = String::new();
        self.write_html(&doc.classes(), &mut out);
        out
    }

    /// Mark an element node as having a parent. Returns false if it already
    /// had one. Other nodes are plain values and can always be placed.
    pub(crate) fn claim(&self) -> bool {
        match self {
            Node::Element(element) => !element.attached.set(true),
            _ => true,
        }
    }

    /// Undo [`Node::claim`] after the node was removed from its parent.
    pub(crate) fn release(&self) {
        if let Node::Element(element) = self {
            element.attached.set(false);
        }
    }

    pub(crate) fn write_html(&self, classes: &ClassTable, out: &mut String) {
        match self {
            Node::Text(Text { spaced, text }) => {
                if *spaced {
                    out.push(' ');
                }
                out.push_str(&escape_text(text));
            }
            Node::Raw(html) => out.push_str(html),
            Node::Element(element) => element.write_html(classes, out),
            Node::Script(script) => out.push_str(&script.html_string()),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<Script> for Node {
    fn from(script: Script) -> Self {
        Node::Script(script)
    }
}

/// Claim every node in `nodes` for `parent`, skipping elements that
/// already have a parent.
pub(crate) fn claim_all(parent: &str, nodes: impl IntoIterator<Item = Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .filter(|node| {
            let claimed = node.claim();
            if !claimed {
                log::warn!(
                    "{parent}: <{}> already has a parent, skipping it",
                    node.element().map(|element| element.tag().name()).unwrap_or("?")
                );
            }
            claimed
        })
        .collect()
}

/// A body element.
///
/// `Element` is a handle: clones share attributes and children. The
/// document's id map holds such clones to find elements by id later.
/// An element is placed under at most one parent; placing it again is
/// refused.
#[derive(Clone)]
pub struct Element {
    tag: Tag,
    attrs: Shared<Attrs>,
    children: Shared<Vec<Node>>,
    attached: Shared<bool>,
}

impl Element {
    pub(crate) fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Default::default(),
            children: Default::default(),
            attached: Default::default(),
        }
    }

    /// Whether the element has been placed under a parent.
    pub fn has_parent(&self) -> bool {
        *self.attached.get()
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn attrs(&self) -> Ref<'_, Attrs> {
        self.attrs.get()
    }

    pub(crate) fn attrs_mut(&self) -> RefMut<'_, Attrs> {
        self.attrs.get_mut()
    }

    pub fn children(&self) -> Ref<'_, Vec<Node>> {
        self.children.get()
    }

    pub(crate) fn children_mut(&self) -> RefMut<'_, Vec<Node>> {
        self.children.get_mut()
    }

    pub fn id(&self) -> Option<Str> {
        self.attrs.get().id.clone()
    }

    /// The normalized class name, resolved through `doc`'s class table.
    pub fn class(&self, doc: &Document) -> Option<Str> {
        let class = self.attrs.get().class?;
        doc.classes().name(class).cloned()
    }

    /// Look up a user attribute. See [`Attrs::get`].
    pub fn attr(&self, name: &str) -> Option<Option<Str>> {
        self.attrs.get().get(name).map(|value| value.cloned())
    }

    /// Whether both handles refer to the same element.
    pub fn same(&self, other: &Element) -> bool {
        self.attrs.ptr_eq(&other.attrs)
    }

    pub fn html_string(&self, doc: &Document) -> String {
        let mut out = String::new();
        self.write_html(&doc.classes(), &mut out);
        out
    }

    pub(crate) fn write_html(&self, classes: &ClassTable, out: &mut String) {
        let name = self.tag.name();
        let atts = self
            .attrs
            .get()
            .html_string(classes, self.tag.trailing_attributes());
        let sep = if atts.is_empty() { "" } else { " " };
        match self.tag.closing() {
            Closing::Void => out.push_str(&format!("<{name}{sep}{atts}>")),
            Closing::SelfClosing => out.push_str(&format!("<{name}{sep}{atts}/>")),
            Closing::Container => {
                out.push_str(&format!("<{name}{sep}{atts}>"));
                for child in self.children.get().iter() {
                    child.write_html(classes, out);
                }
                out.push_str(&format!("</{name}>"));
            }
        }
    }
}

macro_rules! node_wrapper {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(pub(crate) Node);

        impl From<$name> for Node {
            fn from(value: $name) -> Node {
                value.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = Node;

            fn deref(&self) -> &Node {
                &self.0
            }
        }
    };
}

node_wrapper!(
    /// Phrasing content: text and character-level elements.
    Inline
);
node_wrapper!(
    /// Block-level content: paragraphs, lists, divisions and friends.
    Block
);
node_wrapper!(
    /// A direct child of a table: caption, colgroup, thead, tbody or tfoot.
    TablePart
);
node_wrapper!(
    /// A table row.
    Row
);
node_wrapper!(
    /// A table header or data cell.
    Cell
);
node_wrapper!(
    /// A column of a colgroup.
    Col
);
node_wrapper!(
    /// An option of a select control.
    SelectOption
);
node_wrapper!(
    /// A shape inside an svg element.
    Shape
);

/// A canvas placeholder.
///
/// Drawing happens elsewhere; this only reserves the element and exposes
/// its id so a drawer can find it.
#[derive(Clone)]
pub struct Canvas(pub(crate) Element);

impl Canvas {
    /// The canvas element's id, synthesizing one if necessary.
    ///
    /// The element is registered in `doc`'s id map.
    pub fn element_id(&self, doc: &Document) -> Str {
        let id = doc.assign_id(&self.0);
        doc.anchor(&self.0);
        id
    }

    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl From<Canvas> for Node {
    fn from(canvas: Canvas) -> Self {
        Node::Element(canvas.0)
    }
}

impl From<Canvas> for Block {
    fn from(canvas: Canvas) -> Self {
        Block(Node::Element(canvas.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closing_rules() {
        let doc = Document::default();
        let hr = Element::new(Tag::Hr);
        assert_eq!(hr.html_string(&doc), "<hr>");
        let input = Element::new(Tag::Input);
        input.attrs_mut().set("type", Some("text".into()));
        assert_eq!(input.html_string(&doc), r#"<input type="text"/>"#);
        let canvas = Element::new(Tag::Canvas);
        assert_eq!(canvas.html_string(&doc), "<canvas></canvas>");
    }

    #[test]
    fn text_is_escaped_and_raw_is_not() {
        let doc = Document::default();
        let div = Element::new(Tag::Div);
        div.children_mut().push(Node::Text(Text {
            spaced: false,
            text: "1 < 2 & 3".into(),
        }));
        div.children_mut().push(Node::Raw("<b>bold</b>".into()));
        assert_eq!(
            div.html_string(&doc),
            "<div>1 &lt; 2 &amp; 3<b>bold</b></div>"
        );
    }

    #[test]
    fn trailing_attributes_render_last() {
        let doc = Document::default();
        let a = Element::new(Tag::A);
        a.attrs_mut().set("href", Some("/".into()));
        a.attrs_mut().set("replace", Some("page_body".into()));
        assert_eq!(
            a.html_string(&doc),
            r#"<a replace="page_body" href="/"></a>"#
        );
    }

    #[test]
    fn elements_are_claimed_once() {
        let span = Node::Element(Element::new(Tag::Span));
        let text = Node::Text(Text {
            spaced: false,
            text: "t".into(),
        });
        let claimed = claim_all("div", [span.clone(), text.clone(), span.clone(), text]);
        assert_eq!(claimed.len(), 3);
        assert!(span.element().unwrap().has_parent());
        span.release();
        assert!(!span.element().unwrap().has_parent());
        assert!(span.claim());
    }

    #[test]
    fn clones_are_handles() {
        let a = Element::new(Tag::Span);
        let b = a.clone();
        b.attrs_mut().set("title", Some("shared".into()));
        assert!(a.same(&b));
        assert_eq!(a.attr("title"), Some(Some("shared".into())));
        assert!(!a.same(&Element::new(Tag::Span)));
    }
}
