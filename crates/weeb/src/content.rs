//! Content models and the argument lists node constructors accept.
//!
//! Every constructor on [`Document`] takes one argument list: `()`, a single
//! argument, a tuple of arguments, or a `Vec`, array or `Option` of them.
//! Each argument implements [`Content`] for the constructor's content model,
//! which decides what may be passed:
//!
//! * strings are directives (`.class`, `#id`, `name=value`) or literal text,
//! * [`literal`] text is never read as a directive, [`raw`] markup is
//!   emitted verbatim,
//! * integers are literal text,
//! * [`Listener`]s register against the node under construction,
//! * [`Fragment`]s splice the output of a [`Body`] producer,
//! * child nodes must belong to the model: a [`Row`] fits a table section,
//!   not a paragraph.
use crate::{
    attr::{AttrSpec, Directive},
    document::Document,
    event::Listener,
    node::{
        Block, Canvas, Cell, Col, Element, Inline, Node, Row, SelectOption, Shape, TablePart, Text,
        claim_all,
    },
    head::Script,
    str::Str,
};

/// The child type of a content model.
pub trait Model: Clone + Into<Node> {
    /// Wrap a literal text run, or hand it back if the model holds no text.
    fn from_text(text: Text) -> Result<Self, Text>;

    /// Wrap raw markup, or hand it back if the model holds no markup.
    fn from_raw(html: Str) -> Result<Self, Str>;
}

/// The model of elements without child nodes.
///
/// Text handed to a leaf is collected instead; some leaves (`option`,
/// `textarea`) render it as their content.
#[derive(Clone, Copy, Debug)]
pub enum Leaf {}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        match leaf {}
    }
}

impl Model for Leaf {
    fn from_text(text: Text) -> Result<Self, Text> {
        Err(text)
    }

    fn from_raw(html: Str) -> Result<Self, Str> {
        Err(html)
    }
}

macro_rules! text_model {
    ($($model:ident => $wrap:expr),*) => {
        $(
            impl Model for $model {
                fn from_text(text: Text) -> Result<Self, Text> {
                    Ok($wrap(Node::Text(text)))
                }

                fn from_raw(html: Str) -> Result<Self, Str> {
                    Ok($wrap(Node::Raw(html)))
                }
            }
        )*
    };
}

text_model!(Inline => Inline, Block => Block, Node => std::convert::identity);

macro_rules! element_model {
    ($($model:ident),*) => {
        $(
            impl Model for $model {
                fn from_text(text: Text) -> Result<Self, Text> {
                    Err(text)
                }

                fn from_raw(html: Str) -> Result<Self, Str> {
                    Err(html)
                }
            }
        )*
    };
}

element_model!(TablePart, Row, Cell, Col, SelectOption, Shape);

/// Collects the arguments of one constructor call into an element.
pub struct Appender<'a, C> {
    doc: &'a Document,
    element: Element,
    children: Vec<C>,
    leftover: Option<String>,
    separate: bool,
    listeners: Vec<Listener>,
    force: bool,
}

impl<'a, C: Model> Appender<'a, C> {
    pub(crate) fn new(doc: &'a Document, element: Element, force: bool) -> Self {
        Self {
            doc,
            element,
            children: vec![],
            leftover: None,
            separate: false,
            listeners: vec![],
            force,
        }
    }

    pub fn document(&self) -> &Document {
        self.doc
    }

    /// The element under construction.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Interpret `spec` as a directive, falling back to literal text.
    pub fn directive_or_text(&mut self, spec: &str) {
        let directive = Directive::parse(spec, &self.element.attrs(), self.force);
        match directive {
            Some(directive) => self.directive(directive),
            None => self.text(Str::copied(spec)),
        }
    }

    pub fn directive(&mut self, directive: Directive) {
        self.doc.apply_directive(&self.element, directive);
    }

    /// Append literal text, separated from earlier text by a space.
    pub fn text(&mut self, text: Str) {
        let text = Text {
            spaced: self.separate,
            text,
        };
        self.separate = true;
        match C::from_text(text) {
            Ok(child) => self.children.push(child),
            Err(Text { text, .. }) => {
                let leftover = self.leftover.get_or_insert_with(String::new);
                if !leftover.is_empty() {
                    leftover.push(' ');
                }
                leftover.push_str(&text);
            }
        }
    }

    pub fn raw(&mut self, html: Str) {
        match C::from_raw(html) {
            Ok(child) => self.children.push(child),
            Err(html) => log::warn!(
                "<{}> holds no markup, dropping {html:?}",
                self.element.tag()
            ),
        }
    }

    pub fn child(&mut self, child: C) {
        self.children.push(child);
    }

    /// Register `listener` against the element, once per call.
    pub fn listener(&mut self, listener: Listener) {
        if !self.listeners.iter().any(|known| known.same(&listener)) {
            self.listeners.push(listener);
        }
    }

    /// Splice a fragment. A fragment listener registers against the
    /// fragment's first element, which is anchored in the id map.
    pub fn fragment<T: Into<C>>(&mut self, fragment: Fragment<T>) {
        let Fragment { items, listener } = fragment;
        let first = self.children.len();
        self.children.extend(items.into_iter().map(Into::into));
        let Some(listener) = listener else {
            return;
        };
        let target = self
            .children
            .get(first)
            .and_then(|child| Into::<Node>::into(child.clone()).element().cloned());
        match target {
            Some(element) => {
                self.doc.add_event_listener(&element, [listener]);
                self.doc.anchor(&element);
            }
            None => log::warn!(
                "fragment in <{}> does not start with an element, dropping its listener",
                self.element.tag()
            ),
        }
    }

    /// Register the collected listeners and move the children into the
    /// element. Children that already have a parent are skipped. Returns
    /// the element and any text the model could not hold.
    pub(crate) fn finish(self) -> (Element, Option<Str>) {
        let Appender {
            doc,
            element,
            children,
            leftover,
            listeners,
            ..
        } = self;
        if !listeners.is_empty() {
            doc.add_event_listener(&element, listeners);
        }
        let children = claim_all(element.tag().name(), children.into_iter().map(Into::into));
        element.children_mut().extend(children);
        (element, leftover.map(Str::from))
    }
}

/// One constructor argument of content model `C`.
pub trait Content<C: Model> {
    fn append(self, appender: &mut Appender<'_, C>);
}

/// A constructor's whole argument list.
pub trait Args<C: Model> {
    fn append_all(self, appender: &mut Appender<'_, C>);
}

impl<C: Model> Args<C> for () {
    fn append_all(self, _: &mut Appender<'_, C>) {}
}

/// Literal text that is never read as a directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal(pub Str);

pub fn literal(text: impl Into<Str>) -> Literal {
    Literal(text.into())
}

/// Markup emitted verbatim, without escaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raw(pub Str);

pub fn raw(html: impl Into<Str>) -> Raw {
    Raw(html.into())
}

impl<C: Model> Content<C> for &str {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive_or_text(self);
    }
}

impl<C: Model> Content<C> for &String {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive_or_text(self);
    }
}

impl<C: Model> Content<C> for String {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive_or_text(&self);
    }
}

impl<C: Model> Content<C> for Str {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive_or_text(&self);
    }
}

impl<C: Model> Content<C> for Directive {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive(self);
    }
}

impl<C: Model> Content<C> for AttrSpec {
    fn append(self, appender: &mut Appender<'_, C>) {
        for directive in self.directives() {
            appender.directive(directive);
        }
    }
}

impl<C: Model> Content<C> for Literal {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.text(self.0);
    }
}

impl<C: Model> Content<C> for Raw {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.raw(self.0);
    }
}

impl<C: Model> Content<C> for Listener {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.listener(self);
    }
}

impl<C: Model, T: Into<C>> Content<C> for Fragment<T> {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.fragment(self);
    }
}

impl<C: Model, T: Content<C>> Content<C> for Vec<T> {
    fn append(self, appender: &mut Appender<'_, C>) {
        for item in self {
            item.append(appender);
        }
    }
}

impl<C: Model, T: Content<C>, const N: usize> Content<C> for [T; N] {
    fn append(self, appender: &mut Appender<'_, C>) {
        for item in self {
            item.append(appender);
        }
    }
}

impl<C: Model, T: Content<C>> Content<C> for Option<T> {
    fn append(self, appender: &mut Appender<'_, C>) {
        if let Some(item) = self {
            item.append(appender);
        }
    }
}

macro_rules! integer_content {
    ($($int:ty),*) => {
        $(
            impl<C: Model> Content<C> for $int {
                fn append(self, appender: &mut Appender<'_, C>) {
                    appender.text(Str::from(self.to_string()));
                }
            }
        )*
    };
}

integer_content!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! child_content {
    ($($child:ty => [$($model:ty),*]);* $(;)?) => {
        $($(
            impl Content<$model> for $child {
                fn append(self, appender: &mut Appender<'_, $model>) {
                    appender.child(self.into());
                }
            }
        )*)*
    };
}

child_content! {
    Inline => [Inline, Node];
    Block => [Block, Node];
    Canvas => [Block, Node];
    TablePart => [TablePart, Node];
    Row => [Row, Node];
    Cell => [Cell, Node];
    Col => [Col, Node];
    SelectOption => [SelectOption, Node];
    Shape => [Shape, Node];
    Script => [Node];
    Node => [Node];
}

macro_rules! single_args {
    ($($arg:ty),*) => {
        $(
            impl<Child: Model> Args<Child> for $arg
            where
                $arg: Content<Child>,
            {
                fn append_all(self, appender: &mut Appender<'_, Child>) {
                    self.append(appender);
                }
            }
        )*
    };
}

single_args!(
    String, Str, Directive, AttrSpec, Literal, Raw, Listener, Inline, Block, Canvas, TablePart,
    Row, Cell, Col, SelectOption, Shape, Script, Node, i8, i16, i32, i64, isize, u8, u16, u32,
    u64, usize
);

impl<Child: Model> Args<Child> for &str {
    fn append_all(self, appender: &mut Appender<'_, Child>) {
        self.append(appender);
    }
}

impl<Child: Model> Args<Child> for &String {
    fn append_all(self, appender: &mut Appender<'_, Child>) {
        self.append(appender);
    }
}

impl<Child: Model, T: Into<Child>> Args<Child> for Fragment<T> {
    fn append_all(self, appender: &mut Appender<'_, Child>) {
        self.append(appender);
    }
}

impl<Child: Model, T: Content<Child>> Args<Child> for Vec<T> {
    fn append_all(self, appender: &mut Appender<'_, Child>) {
        self.append(appender);
    }
}

impl<Child: Model, T: Content<Child>, const N: usize> Args<Child> for [T; N] {
    fn append_all(self, appender: &mut Appender<'_, Child>) {
        self.append(appender);
    }
}

impl<Child: Model, T: Content<Child>> Args<Child> for Option<T> {
    fn append_all(self, appender: &mut Appender<'_, Child>) {
        self.append(appender);
    }
}

macro_rules! tuple_args {
    ($($i:ident),*) => {
        #[allow(non_snake_case)]
        impl<Child: Model, $($i: Content<Child>),*> Args<Child> for ($($i,)*) {
            fn append_all(self, appender: &mut Appender<'_, Child>) {
                let ($($i,)*) = self;
                $($i.append(appender);)*
            }
        }
    };
}

tuple_args!(A);
tuple_args!(A, B);
tuple_args!(A, B, C);
tuple_args!(A, B, C, D);
tuple_args!(A, B, C, D, E);
tuple_args!(A, B, C, D, E, F);
tuple_args!(A, B, C, D, E, F, G);
tuple_args!(A, B, C, D, E, F, G, H);
tuple_args!(A, B, C, D, E, F, G, H, I);
tuple_args!(A, B, C, D, E, F, G, H, I, J);
tuple_args!(A, B, C, D, E, F, G, H, I, J, K);
tuple_args!(A, B, C, D, E, F, G, H, I, J, K, L);
tuple_args!(A, B, C, D, E, F, G, H, I, J, K, L, M);
tuple_args!(A, B, C, D, E, F, G, H, I, J, K, L, M, N);
tuple_args!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O);
tuple_args!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);

/// Produces a body fragment on demand.
///
/// Producers may be called any number of times per render, so `body`
/// should build fresh nodes on every call. Any `Fn(&Document) -> Vec<T>`
/// is a producer without a listener.
pub trait Body {
    type Item;

    fn body(&self, doc: &Document) -> Vec<Self::Item>;

    /// A listener for the first element of every produced fragment.
    fn listener(&self) -> Option<Listener> {
        None
    }
}

impl<T, F: Fn(&Document) -> Vec<T>> Body for F {
    type Item = T;

    fn body(&self, doc: &Document) -> Vec<T> {
        self(doc)
    }
}

/// The output of one [`Body`] call, ready to be passed to a constructor.
#[derive(Clone)]
pub struct Fragment<T> {
    pub items: Vec<T>,
    pub listener: Option<Listener>,
}

impl<T> Fragment<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listener = Some(listener);
        self
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn literal_text_is_separated() {
        let doc = Document::default();
        let p = doc.p(("hello", "world", literal("#not-an-id"), 7));
        assert_eq!(
            p.html_string(&doc),
            "<p>hello world #not-an-id 7</p>"
        );
    }

    #[test]
    fn directives_mix_with_text() {
        let doc = Document::default();
        let div = doc.div(("class=a b", "hello", 42));
        let element = div.element().unwrap();
        assert_eq!(element.class(&doc).as_deref(), Some("a b"));
        let texts = div
            .children()
            .iter()
            .map(|child| child.text().cloned().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec![Str::from("hello"), Str::from("42")]);
        assert_eq!(
            div.html_string(&doc),
            r#"<div class="a b">hello 42</div>"#
        );
    }

    #[test]
    fn sequences_and_options_flatten() {
        let doc = Document::default();
        let items = vec!["one", "two"]
            .into_iter()
            .map(|text| doc.li(text))
            .collect::<Vec<_>>();
        let ul = doc.ul((".list", items, None::<&str>, Some(doc.li("three"))));
        assert_eq!(
            ul.html_string(&doc),
            r#"<ul class="list"><li>one</li><li>two</li><li>three</li></ul>"#
        );
    }

    #[test]
    fn raw_markup_is_opt_in() {
        let doc = Document::default();
        let p = doc.p(("<i>", raw("<i>x</i>")));
        assert_eq!(p.html_string(&doc), "<p>&lt;i&gt;<i>x</i></p>");
    }

    #[test]
    fn leaves_collect_text() {
        let doc = Document::default();
        let option = doc.option(("value=2", "second", "choice"));
        assert_eq!(
            option.html_string(&doc),
            r#"<option value="2">second choice</option>"#
        );
    }

    #[test]
    fn elements_take_one_parent() {
        let doc = Document::default();
        let canvas = doc.canvas(());
        let div = doc.div((canvas.clone(), doc.section(canvas.clone())));
        let id = canvas.element_id(&doc);
        assert_eq!(
            div.html_string(&doc),
            format!(r#"<div><section><canvas id="{id}"></canvas></section></div>"#)
        );
        assert!(canvas.element().has_parent());
    }

    #[test]
    fn closure_bodies_make_fragments() {
        let doc = Document::default();
        let items = |doc: &Document| vec![doc.li("a"), doc.li("b")];
        let ol = doc.ol(doc.fragment(&items));
        assert_eq!(ol.html_string(&doc), "<ol><li>a</li><li>b</li></ol>");
        // producers are safe to call again
        let again = doc.ol(doc.fragment(&items));
        assert_eq!(again.html_string(&doc), ol.html_string(&doc));
    }
}
