//! A small example site: a home page, a path-echoing page under `/page/`,
//! a command console and a canvas page, all sharing one navigation body.
use weeb::prelude::*;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Maecenas rutrum blandit purus, sed sollicitudin augue elementum at. Donec \
congue enim in mauris finibus congue.";

const SUBHEADER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing \
elit. Aliquam tristique lacus sed ex viverra, quis bibendum mauris vehicula.";

pub fn head() -> Vec<Head> {
    vec![
        Head::charset("utf-8"),
        Head::http_equiv("X-UA-Compatible", "IE=edge"),
        Head::meta("viewport", "width=device-width, initial-scale=1"),
        Head::stylesheet("/css/eg.min.css"),
        Script::src("/js/foundation.min.js")
            .with_type("text/javascript")
            .into(),
        Script::src("/js/app.js").with_type("text/javascript").into(),
        Head::title("Weeb Title"),
    ]
}

/// A sidebar link that replaces the page body.
fn nav_link(doc: &Document, href: &str, text: &str) -> Block {
    doc.li(doc.a((
        format!("href={href}"),
        "replace=page_body",
        literal(text.to_string()),
    )))
}

/// Wrap `content` in the top bar and sidebar every page shares.
pub fn standard_body(doc: &Document, content: Vec<Node>) -> Vec<Node> {
    let page_body = doc.div(("#page_body", content));
    let side_bar = doc.div((
        ".large-3 columns",
        doc.div((
            ".hide-for-small",
            doc.div((
                ".sidebar",
                doc.ul((
                    ".side-nav",
                    doc.li((".heading", "Heading One")),
                    nav_link(doc, "/page/1", "Link 1"),
                    nav_link(doc, "/page/2", "Link 2"),
                    nav_link(doc, "/notfound", "Link 3"),
                    doc.li(".divider"),
                    doc.li((".heading", "Heading Two")),
                    nav_link(doc, "/exec", "Exec"),
                    nav_link(doc, "/canvas", "Canvas"),
                )),
            )),
        )),
    ));
    vec![
        doc.div((
            ".contain-to-grid fixed",
            doc.nav((
                ".top-bar",
                "data-topbar=",
                "role=navigation",
                doc.ul((
                    ".title-area",
                    doc.li((
                        ".name",
                        doc.h1(doc.a(("href=/", "replace=page_body", "My Site"))),
                    )),
                    doc.li((
                        ".toggle-topbar menu-icon",
                        doc.a(("href=#", doc.span("My Site"))),
                    )),
                )),
            )),
        ))
        .into(),
        doc.div((".row", side_bar, doc.div((".large-9 columns", page_body))))
            .into(),
        Script::inline("$(document).foundation();").into(),
    ]
}

/// A labelled input on one grid row.
fn inline_label(doc: &Document, id: &str, kind: InputType) -> Block {
    doc.div((
        ".row",
        doc.div((
            ".large-3 columns",
            doc.label((".right inline", format!("for={id}"), literal(id.to_string()))),
        )),
        doc.div((".large-9 columns", doc.input((format!("#{id}"), kind)))),
    ))
}

/// A circle that reports clicks.
struct Badge {
    clicked: Listener,
}

impl Body for Badge {
    type Item = Block;

    fn body(&self, doc: &Document) -> Vec<Block> {
        vec![doc.svg((
            "width=100",
            "height=100",
            doc.circle((
                "cx=50",
                "cy=50",
                "r=40",
                "stroke=black",
                "stroke-width=3",
                "fill=red",
            )),
        ))]
    }

    fn listener(&self) -> Option<Listener> {
        Some(self.clicked.clone())
    }
}

fn home_page(_: &str, doc: &Document) -> Vec<Node> {
    let badge = Badge {
        clicked: Listener::click(|event: &MouseEvent| {
            log::info!("badge clicked at {:?}", event.client)
        }),
    };
    let table = doc.table((
        doc.colgroup((doc.col(("a=1", "b=2")), doc.col(("a=1", "b=2")))),
        doc.thead(doc.tr((doc.th("Foo"), doc.th("Bar")))),
        doc.tbody((
            doc.tr((doc.th("1"), doc.th("2"))),
            doc.tr((doc.th(3), doc.th(4))),
        )),
    ));
    let address = doc.address((
        "Written by",
        doc.a(("href=mailto:webmaster@example.com", "Jon Doe")),
        literal("."),
        doc.br(()),
        "Visit us at:",
        doc.br(()),
        "Example.com",
        doc.br(()),
        "Box 564, Disneyland",
    ));
    let content = vec![
        doc.h1("Root Title").into(),
        doc.h3((".subheader", SUBHEADER)).into(),
        doc.hr(()).into(),
        doc.div((
            ".row",
            doc.div((".large-12 columns", doc.fragment(&badge))),
            doc.div((
                ".large-12 columns",
                doc.blockquote(LOREM),
                doc.hr(()),
                address,
                doc.hr(()),
                table,
                doc.hr(()),
                doc.div((
                    ".panel",
                    doc.form((
                        doc.div((
                            ".row",
                            inline_label(doc, "A", InputType::Number),
                            inline_label(doc, "B", InputType::Number),
                            inline_label(doc, "C", InputType::Text),
                        )),
                        doc.div((
                            ".row",
                            doc.div((
                                ".large-12 columns",
                                doc.a((".large radius button submit_on_click", "SUBMIT")),
                            )),
                        )),
                    )),
                )),
            )),
        ))
        .into(),
    ];
    standard_body(doc, content)
}

fn path_page(path: &str, doc: &Document) -> Vec<Node> {
    let content = vec![
        doc.h1(literal(format!("Path {path}"))).into(),
        doc.h3((".subheader", SUBHEADER)).into(),
    ];
    standard_body(doc, content)
}

/// A command prompt. Clicks on the console go to `listener`.
pub struct ExecCommand {
    pub prompt: String,
    pub listener: Listener,
}

impl Body for ExecCommand {
    type Item = Block;

    fn body(&self, doc: &Document) -> Vec<Block> {
        let input = doc.input(InputType::Text);
        if let Some(element) = input.element().filter(|_| !self.prompt.is_empty()) {
            doc.set_attr(element, &format!("placeholder={}", self.prompt));
        }
        vec![doc.div((
            ".ExecCommand",
            doc.div((".row", doc.div((".large-12 columns submit_on_enter", input)))),
            doc.div((
                ".row hide",
                doc.div((".large-12 columns", doc.div(".ExecResult panel"))),
            )),
        ))]
    }

    fn listener(&self) -> Option<Listener> {
        Some(self.listener.clone())
    }
}

/// A canvas placeholder announcing itself when the page loads.
struct GreetingCanvas {
    id: &'static str,
    greeting: &'static str,
}

impl Body for GreetingCanvas {
    type Item = Block;

    fn body(&self, doc: &Document) -> Vec<Block> {
        vec![doc.div((".panel", doc.canvas((format!("#{}", self.id), "aspect=2"))))]
    }

    fn listener(&self) -> Option<Listener> {
        let (id, greeting) = (self.id, self.greeting);
        Some(Listener::load(move |_: &Event| {
            log::info!("{id} loaded: {greeting}")
        }))
    }
}

fn canvas_page(_: &str, doc: &Document) -> Vec<Node> {
    let canvases = [
        GreetingCanvas {
            id: "canvas1",
            greeting: "Hello 1",
        },
        GreetingCanvas {
            id: "canvas2",
            greeting: "Hello 2",
        },
    ];
    let mut content: Vec<Node> = vec![doc.h2("Canvas").into()];
    for canvas in canvases.iter() {
        content.push(doc.div(doc.fragment(canvas)).into());
    }
    standard_body(doc, content)
}

/// The demo site and the clicks its console receives.
pub struct Demo {
    pub site: Site,
    pub exec_clicks: Clicks,
}

impl Demo {
    pub fn new() -> Self {
        let mut site = Site::new(head());
        site.add_page("/", home_page);
        site.add_page("/page/", path_page);
        site.add_page("/canvas", canvas_page);

        let (listener, exec_clicks) = clicks();
        let exec = ExecCommand {
            prompt: "Enter Command".into(),
            listener,
        };
        site.add_page("/exec", move |_: &str, doc: &Document| {
            let content = vec![
                doc.h2("Exec Command").into(),
                doc.div((".panel", doc.form(doc.fragment(&exec)))).into(),
            ];
            standard_body(doc, content)
        });

        site.add_content(StaticContent::inline(
            "/js/app.js",
            "text/javascript",
            "console.log('weeb');",
        ));
        Demo { site, exec_clicks }
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}
