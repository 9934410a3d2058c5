//! Element attributes: ids, the class table and user attributes.
//!
//! Every body element carries an [`Attrs`]. The id is optional and is only
//! assigned when something needs to address the element (an event
//! listener, a `#id` directive, a canvas drawer). The class is a
//! [`ClassId`] into the document's [`ClassTable`], so equal class sets are
//! stored once per document.
use std::collections::HashMap;

use crate::str::Str;

/// Symbols of synthesized element ids, one per 6-bit digit.
const ID_DIGITS: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz$_";

/// Encode a counter value as a synthesized element id.
///
/// Radix-64, most significant digit first, at least one digit.
pub fn encode_id(mut value: u64) -> Str {
    let mut digits = Vec::with_capacity(11);
    loop {
        digits.push(char::from(ID_DIGITS[(value & 0x3f) as usize]));
        value >>= 6;
        if value == 0 {
            break;
        }
    }
    Str::from(digits.into_iter().rev().collect::<String>())
}

/// Canonical form of a class attribute value.
///
/// Class names are split on whitespace, sorted and joined with single
/// spaces, so `"b a"` and `"a b"` name the same class.
pub fn normalize_class_name(name: &str) -> String {
    let mut classes = name.split_whitespace().collect::<Vec<_>>();
    classes.sort_unstable();
    classes.join(" ")
}

/// Index of a normalized class name in a [`ClassTable`].
///
/// Ids start at 1. "No class" is represented by `Option::<ClassId>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Two-way mapping between normalized class names and [`ClassId`]s.
#[derive(Debug, Default)]
pub struct ClassTable {
    names: Vec<Str>,
    ids: HashMap<Str, ClassId>,
}

impl ClassTable {
    /// Returns the id of `name`, allocating the next id if it is new.
    pub fn intern(&mut self, name: &str) -> ClassId {
        let name = normalize_class_name(name);
        if let Some(id) = self.ids.get(name.as_str()) {
            return *id;
        }
        let name = Str::from(name);
        self.names.push(name.clone());
        let id = ClassId(self.names.len() as u32);
        log::trace!("class {id:?} = {name:?}");
        self.ids.insert(name, id);
        id
    }

    /// The normalized name of `id`.
    pub fn name(&self, id: ClassId) -> Option<&Str> {
        let index = (id.0 as usize).checked_sub(1)?;
        self.names.get(index)
    }

    /// The id of `name`, if it has been interned.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        self.ids.get(normalize_class_name(name).as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The attribute set of one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs {
    pub(crate) id: Option<Str>,
    pub(crate) class: Option<ClassId>,
    /// User attributes in insertion order. `None` values render as bare
    /// (boolean) attributes.
    pub(crate) user: Vec<(Str, Option<Str>)>,
}

impl Attrs {
    pub fn id(&self) -> Option<&Str> {
        self.id.as_ref()
    }

    pub fn class(&self) -> Option<ClassId> {
        self.class
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_class(&self) -> bool {
        self.class.is_some()
    }

    /// Set a user attribute, replacing the value of an existing one.
    pub fn set(&mut self, name: impl Into<Str>, value: Option<Str>) {
        let name = name.into();
        for (prev_name, prev_value) in self.user.iter_mut() {
            if *prev_name == name {
                *prev_value = value;
                return;
            }
        }
        self.user.push((name, value));
    }

    /// Look up a user attribute.
    ///
    /// The outer `Option` is whether the attribute is present, the inner
    /// one is its value (`None` for boolean attributes).
    pub fn get(&self, name: &str) -> Option<Option<&Str>> {
        self.user
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value.as_ref())
    }

    /// Remove a user attribute, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Option<Str>> {
        let index = self.user.iter().position(|(key, _)| key.as_str() == name)?;
        Some(self.user.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.class.is_none() && self.user.is_empty()
    }

    /// Render as `name="value"` pairs separated by single spaces.
    ///
    /// The order is id, class, user attributes, and finally the attributes
    /// named in `trailing` (in that order) that the element carries.
    pub fn html_string(&self, classes: &ClassTable, trailing: &[&str]) -> String {
        fn pair(name: &str, value: Option<&Str>) -> String {
            match value {
                Some(value) => format!(r#"{}="{}""#, name, escape_attr(value)),
                None => name.to_string(),
            }
        }

        let mut atts = vec![];
        if let Some(id) = self.id.as_ref() {
            atts.push(pair("id", Some(id)));
        }
        if let Some(class) = self.class.and_then(|id| classes.name(id)) {
            atts.push(pair("class", Some(class)));
        }
        for (name, value) in self.user.iter() {
            if !trailing.contains(&name.as_str()) {
                atts.push(pair(name, value.as_ref()));
            }
        }
        for name in trailing {
            if let Some(value) = self.get(name) {
                atts.push(pair(name, value));
            }
        }
        atts.join(" ")
    }
}

/// Escape an attribute value for use inside double quotes.
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Whether `name` can be written as an attribute name as is.
///
/// Names are non-empty and hold no whitespace, control characters, quotes,
/// `<`, `>`, `/` or `=`.
pub fn is_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// One attribute assignment.
///
/// Directives are usually parsed from strings handed to a node
/// constructor (see [`Directive::parse`]), but may be built directly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Set the class. The name is normalized through the class table.
    Class(Str),
    /// Set the explicit id and register the element under it.
    Id(Str),
    /// Set a user attribute. `None` is a boolean attribute.
    Attr(Str, Option<Str>),
}

impl Directive {
    /// Interpret `spec` as a directive for an element whose attributes are
    /// currently `attrs`.
    ///
    /// * `.NAME` sets the class, but only while the element has none.
    /// * `#ID` sets the id, but only while the element has none.
    /// * `NAME=VALUE` sets an attribute (split on the first `=`);
    ///   `class=NAME` sets the class. An empty value makes a boolean
    ///   attribute.
    ///
    /// Any other string is literal text and yields `None`, unless `force`
    /// is set, in which case the whole string is a boolean attribute name.
    /// A string whose name part is not an attribute name (see
    /// [`is_attr_name`]) is always literal text.
    pub fn parse(spec: &str, attrs: &Attrs, force: bool) -> Option<Directive> {
        if let Some(class) = spec.strip_prefix('.') {
            if !attrs.has_class() {
                return Some(Directive::Class(Str::copied(class)));
            }
        }
        if let Some(id) = spec.strip_prefix('#') {
            if !attrs.has_id() {
                return Some(Directive::Id(Str::copied(id)));
            }
        }
        let (name, value) = match spec.split_once('=') {
            Some(pair) => pair,
            None if force => (spec, ""),
            None => return None,
        };
        if !is_attr_name(name) {
            return None;
        }
        let value = (!value.is_empty()).then(|| Str::copied(value));
        if name == "class" {
            return Some(Directive::Class(value.unwrap_or_default()));
        }
        Some(Directive::Attr(Str::copied(name), value))
    }
}

/// Explicit attribute configuration for a node constructor.
///
/// The typed alternative to directive strings:
///
/// ```
/// use weeb::prelude::*;
///
/// let doc = Document::default();
/// let link = doc.a((
///     AttrSpec::new().id("home").class("nav link").attr("href", "/"),
///     "Home",
/// ));
/// assert_eq!(
///     link.html_string(&doc),
///     r#"<a id="home" class="link nav" href="/">Home</a>"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrSpec {
    pub id: Option<Str>,
    pub class: Option<Str>,
    pub attrs: Vec<(Str, Option<Str>)>,
}

impl AttrSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<Str>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<Str>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<Str>, value: impl Into<Str>) -> Self {
        self.attrs.push((name.into(), Some(value.into())));
        self
    }

    /// Add a boolean attribute, like `disabled`.
    pub fn flag(mut self, name: impl Into<Str>) -> Self {
        self.attrs.push((name.into(), None));
        self
    }

    /// The directives this configuration applies, id first.
    pub fn directives(self) -> impl Iterator<Item = Directive> {
        let AttrSpec { id, class, attrs } = self;
        id.map(Directive::Id)
            .into_iter()
            .chain(class.map(Directive::Class))
            .chain(
                attrs
                    .into_iter()
                    .map(|(name, value)| Directive::Attr(name, value)),
            )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn class_names_normalize() {
        assert_eq!(normalize_class_name("b a"), "a b");
        assert_eq!(normalize_class_name("  large-3   columns "), "columns large-3");
        assert_eq!(normalize_class_name("solo"), "solo");
    }

    #[test]
    fn class_ids_start_at_one_and_dedupe() {
        let mut table = ClassTable::default();
        let ab = table.intern("a b");
        assert_eq!(ab.get(), 1);
        assert_eq!(table.intern("b a"), ab);
        let c = table.intern("c");
        assert_eq!(c.get(), 2);
        assert_eq!(table.name(ab).map(Str::as_str), Some("a b"));
        assert_eq!(table.lookup("b   a"), Some(ab));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn ids_are_radix_64() {
        assert_eq!(encode_id(0), "0");
        assert_eq!(encode_id(9), "9");
        assert_eq!(encode_id(10), "A");
        assert_eq!(encode_id(63), "_");
        assert_eq!(encode_id(64), "10");
        assert_eq!(encode_id(64 * 64 + 37), "10b");
    }

    #[test]
    fn directives_parse() {
        let empty = Attrs::default();
        assert_eq!(
            Directive::parse(".foo", &empty, false),
            Some(Directive::Class("foo".into()))
        );
        assert_eq!(
            Directive::parse("#bar", &empty, false),
            Some(Directive::Id("bar".into()))
        );
        assert_eq!(
            Directive::parse("href=/a=b", &empty, false),
            Some(Directive::Attr("href".into(), Some("/a=b".into())))
        );
        assert_eq!(
            Directive::parse("data-topbar=", &empty, false),
            Some(Directive::Attr("data-topbar".into(), None))
        );
        assert_eq!(
            Directive::parse("class=b a", &empty, false),
            Some(Directive::Class("b a".into()))
        );
        assert_eq!(Directive::parse("hello world", &empty, false), None);
        assert_eq!(Directive::parse("", &empty, false), None);
        assert_eq!(
            Directive::parse("disabled", &empty, true),
            Some(Directive::Attr("disabled".into(), None))
        );
    }

    #[test]
    fn attribute_names_are_validated() {
        let empty = Attrs::default();
        assert!(is_attr_name("data-topbar"));
        assert!(is_attr_name("aria-label"));
        assert!(!is_attr_name(""));
        assert!(!is_attr_name("a b"));
        assert!(!is_attr_name("\"><script>"));
        assert!(!is_attr_name("x/y"));
        assert_eq!(
            Directive::parse("\"><script>alert(1)</script><x y=z", &empty, false),
            None
        );
        assert_eq!(Directive::parse("a b=c", &empty, false), None);
        assert_eq!(Directive::parse("=value", &empty, false), None);
        // force mode only turns valid names into flags
        assert_eq!(Directive::parse("not a name", &empty, true), None);
        assert_eq!(Directive::parse("<b>", &empty, true), None);
    }

    #[test]
    fn shorthand_applies_once() {
        let mut table = ClassTable::default();
        let attrs = Attrs {
            id: Some("x".into()),
            class: Some(table.intern("foo")),
            user: vec![],
        };
        // Already classed and identified: both read as literal text.
        assert_eq!(Directive::parse(".bar", &attrs, false), None);
        assert_eq!(Directive::parse("#y", &attrs, false), None);
        // `class=` always applies.
        assert_eq!(
            Directive::parse("class=bar", &attrs, false),
            Some(Directive::Class("bar".into()))
        );
    }

    #[test]
    fn attrs_render_in_order() {
        let mut table = ClassTable::default();
        let mut attrs = Attrs {
            id: Some("top".into()),
            class: Some(table.intern("row")),
            user: vec![],
        };
        attrs.set("href", Some("/x?a=1&b=2".into()));
        attrs.set("role", Some("navigation".into()));
        attrs.set("data-topbar", None);
        attrs.set("role", Some("banner".into()));
        assert_eq!(
            attrs.html_string(&table, &["href"]),
            r#"id="top" class="row" role="banner" data-topbar href="/x?a=1&amp;b=2""#
        );
        assert_eq!(attrs.remove("role"), Some(Some("banner".into())));
        assert_eq!(attrs.get("role"), None);
        assert_eq!(attrs.get("data-topbar"), Some(None));
    }

    #[test]
    fn attr_specs_yield_directives() {
        let attrs = AttrSpec::new()
            .class("panel")
            .id("main")
            .attr("role", "main")
            .flag("hidden");
        assert_eq!(
            attrs.directives().collect::<Vec<_>>(),
            vec![
                Directive::Id("main".into()),
                Directive::Class("panel".into()),
                Directive::Attr("role".into(), Some("main".into())),
                Directive::Attr("hidden".into(), None),
            ]
        );
    }
}
