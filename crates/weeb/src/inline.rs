//! Inline (phrasing) constructors.
use crate::{
    content::Leaf,
    document::Document,
    node::Inline,
};

impl Document {
    constructors! {
        /// An anchor. `href` always renders last.
        a: A, Inline => Inline;
        span: Span, Inline => Inline;
        tt: Tt, Inline => Inline;
        i: I, Inline => Inline;
        b: B, Inline => Inline;
        big: Big, Inline => Inline;
        small: Small, Inline => Inline;
        /// A line break: `<br>`.
        br: Br, Leaf => Inline;
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn anchors_render_href_last() {
        let doc = Document::default();
        let a = doc.a(("href=/page/", "replace=page_body", "Page", doc.i("one")));
        assert_eq!(
            a.html_string(&doc),
            r#"<a replace="page_body" href="/page/">Page<i>one</i></a>"#
        );
    }

    #[test]
    fn breaks_are_void() {
        let doc = Document::default();
        let span = doc.span(("one", doc.br(()), "two"));
        assert_eq!(span.html_string(&doc), "<span>one<br> two</span>");
    }
}
