//! Table constructors.
//!
//! Tables, their sections, rows, colgroups and cols read every string
//! argument as an attribute: `"border"` is `border`, not text.
use crate::{
    content::Leaf,
    document::Document,
    node::{Block, Cell, Col, Inline, Node, Row, TablePart},
};

impl Document {
    constructors! {
        table: Table, TablePart, force = true => Block;
        caption: Caption, Inline => TablePart;
        colgroup: Colgroup, Col, force = true => TablePart;
        col: Col, Leaf, force = true => Col;
        thead: Thead, Row, force = true => TablePart;
        tbody: Tbody, Row, force = true => TablePart;
        tfoot: Tfoot, Row, force = true => TablePart;
        tr: Tr, Cell, force = true => Row;
        /// A header cell, holding any body content.
        th: Th, Node => Cell;
        /// A data cell, holding any body content.
        td: Td, Node => Cell;
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn tables_nest_by_model() {
        let doc = Document::default();
        let rows = (1..=2)
            .map(|n| doc.tr((doc.th(n), doc.td(("cell", n * 10)))))
            .collect::<Vec<_>>();
        let table = doc.table((
            "border",
            doc.caption("Numbers"),
            doc.colgroup(doc.col("span=2")),
            doc.tbody((".rows", rows)),
        ));
        assert_eq!(
            table.html_string(&doc),
            concat!(
                r#"<table border><caption>Numbers</caption>"#,
                r#"<colgroup><col span="2"></colgroup>"#,
                r#"<tbody class="rows"><tr><th>1</th><td>cell 10</td></tr>"#,
                r#"<tr><th>2</th><td>cell 20</td></tr></tbody></table>"#
            )
        );
    }
}
