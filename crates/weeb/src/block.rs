//! Block-level constructors.
use crate::{
    content::{Args, Leaf},
    document::Document,
    node::{Block, Canvas, Inline, Node, Tag},
};

impl Document {
    constructors! {
        /// A paragraph.
        p: P, Inline => Block;
        h1: H1, Inline => Block;
        h2: H2, Inline => Block;
        h3: H3, Inline => Block;
        h4: H4, Inline => Block;
        h5: H5, Inline => Block;
        h6: H6, Inline => Block;
        /// Preformatted text. Literal text is still escaped.
        pre: Pre, Inline => Block;
        address: Address, Inline => Block;
        ul: Ul, Node => Block;
        ol: Ol, Node => Block;
        /// A list item. Usable outside of lists too, eg. in top-bar menus.
        li: Li, Node => Block;
        div: Div, Node => Block;
        nav: Nav, Node => Block;
        section: Section, Node => Block;
        blockquote: Blockquote, Block => Block;
        /// A horizontal rule: `<hr ...>`.
        hr: Hr, Leaf => Block;
    }

    /// A canvas placeholder: `<canvas ...></canvas>`.
    ///
    /// See [`Canvas::element_id`] for handing it to a drawer.
    pub fn canvas(&self, args: impl Args<Leaf>) -> Canvas {
        Canvas(self.element::<Leaf>(Tag::Canvas, false, args))
    }
}
