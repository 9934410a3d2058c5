//! Form constructors.
use crate::{
    attr::Directive,
    content::{Appender, Args, Content, Leaf, Model},
    document::Document,
    node::{Block, Element, Inline, Node, SelectOption, Tag, Text},
    str::Str,
};

/// The `type` of an input control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Checkbox,
    Radio,
    Submit,
    Reset,
    File,
    Hidden,
    Image,
    Button,
    Number,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Checkbox => "checkbox",
            InputType::Radio => "radio",
            InputType::Submit => "submit",
            InputType::Reset => "reset",
            InputType::File => "file",
            InputType::Hidden => "hidden",
            InputType::Image => "image",
            InputType::Button => "button",
            InputType::Number => "number",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "text" => InputType::Text,
            "password" => InputType::Password,
            "checkbox" => InputType::Checkbox,
            "radio" => InputType::Radio,
            "submit" => InputType::Submit,
            "reset" => InputType::Reset,
            "file" => InputType::File,
            "hidden" => InputType::Hidden,
            "image" => InputType::Image,
            "button" => InputType::Button,
            "number" => InputType::Number,
            _ => return None,
        })
    }
}

/// The submission `method` of a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            FormMethod::Get => "GET",
            FormMethod::Post => "POST",
        }
    }

    /// Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("get") {
            Some(FormMethod::Get)
        } else if name.eq_ignore_ascii_case("post") {
            Some(FormMethod::Post)
        } else {
            None
        }
    }
}

impl<C: Model> Content<C> for InputType {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive(Directive::Attr("type".into(), Some(self.as_str().into())));
    }
}

impl<C: Model> Args<C> for InputType {
    fn append_all(self, appender: &mut Appender<'_, C>) {
        self.append(appender);
    }
}

impl<C: Model> Content<C> for FormMethod {
    fn append(self, appender: &mut Appender<'_, C>) {
        appender.directive(Directive::Attr("method".into(), Some(self.as_str().into())));
    }
}

impl<C: Model> Args<C> for FormMethod {
    fn append_all(self, appender: &mut Appender<'_, C>) {
        self.append(appender);
    }
}

/// Move leftover text into `element` as its only content.
fn text_content(element: &Element, text: Option<Str>) {
    if let Some(text) = text {
        element
            .children_mut()
            .push(Node::Text(Text { spaced: false, text }));
    }
}

impl Document {
    constructors! {
        /// A label. `for` always renders last.
        label: Label, Inline => Inline;
        select: Select, SelectOption => Inline;
    }

    /// A form. `method` and `action` render last; the method is upper cased,
    /// and dropped if it is neither GET nor POST.
    pub fn form(&self, args: impl Args<Node>) -> Block {
        let element = self.element::<Node>(Tag::Form, false, args);
        if let Some(method) = element.attr("method") {
            let parsed = method.as_deref().and_then(FormMethod::from_name);
            let mut attrs = element.attrs_mut();
            match parsed {
                Some(parsed) => attrs.set("method", Some(parsed.as_str().into())),
                None => {
                    log::warn!("unknown form method {method:?}");
                    attrs.remove("method");
                }
            }
        }
        Block(Node::Element(element))
    }

    /// An input control: `<input .../>`. The type defaults to text.
    pub fn input(&self, args: impl Args<Leaf>) -> Inline {
        let element = self.element::<Leaf>(Tag::Input, false, args);
        let kind = match element.attr("type") {
            None => InputType::Text,
            Some(name) => name
                .as_deref()
                .and_then(InputType::from_name)
                .unwrap_or_else(|| {
                    log::warn!("unknown input type {name:?}, using text");
                    InputType::Text
                }),
        };
        element
            .attrs_mut()
            .set("type", Some(kind.as_str().into()));
        Inline(Node::Element(element))
    }

    /// An option of a select. Literal text becomes the option's label.
    pub fn option(&self, args: impl Args<Leaf>) -> SelectOption {
        let (element, text) = self.build::<Leaf>(Tag::Option, false, args);
        text_content(&element, text);
        SelectOption(Node::Element(element))
    }

    /// A text area. Literal text becomes its initial content.
    pub fn textarea(&self, args: impl Args<Leaf>) -> Inline {
        let (element, text) = self.build::<Leaf>(Tag::Textarea, false, args);
        text_content(&element, text);
        Inline(Node::Element(element))
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn form_attributes_render_last() {
        let doc = Document::default();
        let form = doc.form((
            "action=/search",
            "method=post",
            ".search",
            doc.label(("for=q", "Query")),
            doc.input(("#q", "name=q")),
            doc.input(InputType::Submit),
        ));
        assert_eq!(
            form.html_string(&doc),
            concat!(
                r#"<form class="search" method="POST" action="/search">"#,
                r#"<label for="q">Query</label>"#,
                r#"<input id="q" name="q" type="text"/>"#,
                r#"<input type="submit"/></form>"#
            )
        );
    }

    #[test]
    fn unknown_values_fall_back() {
        let doc = Document::default();
        let input = doc.input("type=bogus");
        assert_eq!(input.html_string(&doc), r#"<input type="text"/>"#);
        let form = doc.form("method=put");
        assert_eq!(form.html_string(&doc), "<form></form>");
        let form = doc.form(FormMethod::Get);
        assert_eq!(form.html_string(&doc), r#"<form method="GET"></form>"#);
    }

    #[test]
    fn selects_hold_options() {
        let doc = Document::default();
        let select = doc.select((
            "name=size",
            doc.option(("value=s", "Small")),
            doc.option(("value=l", "selected=", "Large")),
        ));
        assert_eq!(
            select.html_string(&doc),
            concat!(
                r#"<select name="size"><option value="s">Small</option>"#,
                r#"<option value="l" selected>Large</option></select>"#
            )
        );
        let area = doc.textarea(("rows=2", "a < b"));
        assert_eq!(
            area.html_string(&doc),
            r#"<textarea rows="2">a &lt; b</textarea>"#
        );
    }
}
