//! Document head nodes.
use crate::{
    attr::escape_attr,
    node::escape_text,
    str::Str,
};

/// Metadata about the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Meta {
    /// `<meta charset="..."/>`
    Charset(Str),
    /// `<meta http-equiv="..." content="..."/>`
    HttpEquiv { name: Str, content: Str },
    /// `<meta name="..." content="..."/>`
    Name { name: Str, content: Str },
}

/// A script, in the head or the body.
///
/// The content is emitted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    pub content_type: Option<Str>,
    pub src: Option<Str>,
    pub is_async: bool,
    pub defer: bool,
    pub content: Str,
}

impl Script {
    /// An external script.
    pub fn src(src: impl Into<Str>) -> Self {
        Self {
            src: Some(src.into()),
            ..Default::default()
        }
    }

    /// An inline script.
    pub fn inline(content: impl Into<Str>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, content_type: impl Into<Str>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_async(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_defer(mut self) -> Self {
        self.defer = true;
        self
    }

    pub fn html_string(&self) -> String {
        let mut atts = vec![];
        if let Some(content_type) = self.content_type.as_ref() {
            atts.push(format!(r#"type="{}""#, escape_attr(content_type)));
        }
        if let Some(src) = self.src.as_ref() {
            atts.push(format!(r#"src="{}""#, escape_attr(src)));
        }
        if self.defer {
            atts.push("defer".to_string());
        }
        if self.is_async {
            atts.push("async".to_string());
        }
        let atts = atts.join(" ");
        let sep = if atts.is_empty() { "" } else { " " };
        format!("<script{sep}{atts}>{}</script>", self.content)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    Title(Str),
    /// The document base URI.
    Base(Str),
    Meta(Meta),
    Link { rel: Str, content_type: Str, href: Str },
    Script(Script),
}

impl Head {
    pub fn title(title: impl Into<Str>) -> Self {
        Head::Title(title.into())
    }

    pub fn base(href: impl Into<Str>) -> Self {
        Head::Base(href.into())
    }

    pub fn charset(charset: impl Into<Str>) -> Self {
        Head::Meta(Meta::Charset(charset.into()))
    }

    pub fn meta(name: impl Into<Str>, content: impl Into<Str>) -> Self {
        Head::Meta(Meta::Name {
            name: name.into(),
            content: content.into(),
        })
    }

    pub fn http_equiv(name: impl Into<Str>, content: impl Into<Str>) -> Self {
        Head::Meta(Meta::HttpEquiv {
            name: name.into(),
            content: content.into(),
        })
    }

    /// A stylesheet link.
    pub fn stylesheet(href: impl Into<Str>) -> Self {
        Head::Link {
            rel: "stylesheet".into(),
            content_type: "text/css".into(),
            href: href.into(),
        }
    }

    pub fn html_string(&self) -> String {
        match self {
            Head::Title(title) => format!("<title>{}</title>", escape_text(title)),
            Head::Base(href) => format!(r#"<base href="{}"/>"#, escape_attr(href)),
            Head::Meta(Meta::Charset(charset)) => {
                format!(r#"<meta charset="{}"/>"#, escape_attr(charset))
            }
            Head::Meta(Meta::HttpEquiv { name, content }) => format!(
                r#"<meta http-equiv="{}" content="{}"/>"#,
                escape_attr(name),
                escape_attr(content)
            ),
            Head::Meta(Meta::Name { name, content }) => format!(
                r#"<meta name="{}" content="{}"/>"#,
                escape_attr(name),
                escape_attr(content)
            ),
            Head::Link {
                rel,
                content_type,
                href,
            } => format!(
                r#"<link rel="{}" type="{}" href="{}"/>"#,
                escape_attr(rel),
                escape_attr(content_type),
                escape_attr(href)
            ),
            Head::Script(script) => script.html_string(),
        }
    }
}

impl From<Meta> for Head {
    fn from(meta: Meta) -> Self {
        Head::Meta(meta)
    }
}

impl From<Script> for Head {
    fn from(script: Script) -> Self {
        Head::Script(script)
    }
}
