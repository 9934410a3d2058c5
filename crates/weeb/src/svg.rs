use crate::{
    content::Leaf,
    document::Document,
    node::{Block, Shape},
};

impl Document {
    constructors! {
        /// An inline svg image. Strings are attributes.
        svg: Svg, Shape, force = true => Block;
        /// `<circle .../>`
        circle: Circle, Leaf, force = true => Shape;
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn svg_shapes() {
        let doc = Document::default();
        let svg = doc.svg((
            "width=100",
            "height=100",
            doc.circle(("cx=50", "cy=50", "r=40", "fill=yellow")),
        ));
        assert_eq!(
            svg.html_string(&doc),
            r#"<svg width="100" height="100"><circle cx="50" cy="50" r="40" fill="yellow"/></svg>"#
        );
    }
}
