//! Sites: pages routed by path, plus a registry of static content.
use std::{collections::BTreeMap, path::PathBuf};

use snafu::OptionExt;

use crate::{
    document::Document,
    error::{MissingContentSnafu, NotFoundSnafu, Result},
    head::Head,
    node::Node,
};

/// A page whose body depends on the request path.
pub trait Page {
    fn page_body(&self, path: &str, doc: &Document) -> Vec<Node>;
}

impl<F: Fn(&str, &Document) -> Vec<Node>> Page for F {
    fn page_body(&self, path: &str, doc: &Document) -> Vec<Node> {
        self(path, doc)
    }
}

/// Whether `path` is routed to `pattern`.
///
/// A pattern ending in `/` (other than `/` itself) matches every path it
/// prefixes. Any other pattern matches only itself.
pub fn path_match(pattern: &str, path: &str) -> bool {
    if pattern.len() > 1 && pattern.ends_with('/') {
        path.starts_with(pattern)
    } else {
        pattern == path
    }
}

/// The canonical form of `path`: rooted, without `.`, `..` or repeated
/// slashes. A trailing slash is kept.
pub fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    let mut parts: Vec<&str> = vec![];
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            part => parts.push(part),
        }
    }
    let mut clean = format!("/{}", parts.join("/"));
    if path.ends_with('/') && clean != "/" {
        clean.push('/');
    }
    clean
}

struct Route {
    page: Box<dyn Page>,
    doc: Document,
}

/// Where static content bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSource {
    Inline(Vec<u8>),
    File(PathBuf),
}

/// Static content served at a fixed URL path: scripts, stylesheets and the
/// like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticContent {
    pub url_path: String,
    pub source: ContentSource,
    /// Seconds since the unix epoch.
    pub last_modified: i64,
    pub content_type: String,
    pub content_encoding: Option<String>,
}

impl StaticContent {
    pub fn inline(
        url_path: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            url_path: url_path.into(),
            source: ContentSource::Inline(data.into()),
            last_modified: 0,
            content_type: content_type.into(),
            content_encoding: None,
        }
    }

    pub fn file(
        url_path: impl Into<String>,
        content_type: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            url_path: url_path.into(),
            source: ContentSource::File(file.into()),
            last_modified: 0,
            content_type: content_type.into(),
            content_encoding: None,
        }
    }
}

/// The application context: every page's document and the static content.
#[derive(Default)]
pub struct Site {
    head: Vec<Head>,
    routes: BTreeMap<String, Route>,
    content: BTreeMap<String, StaticContent>,
}

impl Site {
    /// A site whose pages all share `head`.
    pub fn new(head: Vec<Head>) -> Self {
        Self {
            head,
            ..Default::default()
        }
    }

    pub fn head(&self) -> &[Head] {
        &self.head
    }

    /// Route `pattern` to `page`. The page's document is created and its
    /// body built once, with `pattern` as the path.
    pub fn add_page(&mut self, pattern: impl Into<String>, page: impl Page + 'static) -> Document {
        let pattern = pattern.into();
        let doc = Document::default();
        doc.set_head(self.head.clone());
        doc.set_body(page.page_body(&pattern, &doc));
        log::debug!("added page {pattern}");
        self.routes.insert(
            pattern,
            Route {
                page: Box::new(page),
                doc: doc.clone(),
            },
        );
        doc
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    fn matching(&self, path: &str) -> Option<(&str, &Route)> {
        self.routes
            .iter()
            .filter(|(pattern, _)| path_match(pattern, path))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(pattern, route)| (pattern.as_str(), route))
    }

    /// The pattern and document `path` routes to. The longest matching
    /// pattern wins.
    pub fn route(&self, path: &str) -> Option<(&str, &Document)> {
        let path = clean_path(path);
        self.matching(&path)
            .map(|(pattern, route)| (pattern, &route.doc))
    }

    /// Render the page at `path`. The document's id counter, id map and
    /// listeners are reset before the body is rebuilt for this path.
    pub fn render(&self, path: &str) -> Result<String> {
        let path = clean_path(path);
        let (pattern, route) = self
            .matching(&path)
            .context(NotFoundSnafu { path: path.clone() })?;
        log::debug!("rendering {path} with {pattern}");
        route.doc.reset();
        route.doc.clear_listeners();
        route.doc.clear_nodes();
        route.doc.set_body(route.page.page_body(&path, &route.doc));
        Ok(route.doc.markup())
    }

    pub fn add_content(&mut self, content: StaticContent) {
        log::debug!("content {} ({})", content.url_path, content.content_type);
        self.content.insert(content.url_path.clone(), content);
    }

    pub fn content(&self, path: &str) -> Result<&StaticContent> {
        self.content
            .get(path)
            .context(MissingContentSnafu { path })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Error, content::literal};

    #[test]
    fn paths_are_cleaned() {
        assert_eq!(clean_path(""), "/");
        assert_eq!(clean_path("page"), "/page");
        assert_eq!(clean_path("/a/./b/../c"), "/a/c");
        assert_eq!(clean_path("//a//b/"), "/a/b/");
        assert_eq!(clean_path("/.."), "/");
        assert_eq!(clean_path("/"), "/");
    }

    #[test]
    fn patterns_match() {
        assert!(path_match("/", "/"));
        assert!(!path_match("/", "/other"));
        assert!(path_match("/page/", "/page/1"));
        assert!(path_match("/page/", "/page/"));
        assert!(!path_match("/page/", "/page"));
        assert!(path_match("/exec", "/exec"));
        assert!(!path_match("/exec", "/exec/"));
    }

    fn titled(path: &str, doc: &Document) -> Vec<Node> {
        vec![doc.h1(format!("Path {path}")).into()]
    }

    #[test]
    fn longest_pattern_wins() {
        let mut site = Site::new(vec![Head::title("Site")]);
        site.add_page("/", titled);
        site.add_page("/page/", titled);
        site.add_page("/page/deep/", titled);
        assert_eq!(site.route("/page/x").map(|(p, _)| p), Some("/page/"));
        assert_eq!(site.route("/page/deep/x").map(|(p, _)| p), Some("/page/deep/"));
        assert_eq!(site.route("/page/deep/../y").map(|(p, _)| p), Some("/page/"));
        assert!(site.route("/nowhere").is_none());
    }

    #[test]
    fn render_rebuilds_for_the_path() {
        let mut site = Site::new(vec![Head::title("Site")]);
        site.add_page("/page/", titled);
        let html = site.render("page/2").unwrap();
        assert_eq!(
            html,
            "<!DOCTYPE html><html><head><title>Site</title></head><body><h1>Path /page/2</h1></body></html>"
        );
        assert!(matches!(
            site.render("/missing"),
            Err(Error::NotFound { path }) if path == "/missing"
        ));
    }

    #[test]
    fn render_forgets_stale_ids() {
        let mut site = Site::default();
        site.add_page("/page/", |path: &str, doc: &Document| {
            let name = path.trim_start_matches("/page/");
            vec![doc.div((format!("#{name}"), literal(name.to_string()))).into()]
        });
        site.render("/page/a").unwrap();
        let (_, doc) = site.route("/page/a").unwrap();
        assert!(doc.node_by_id("a").is_some());
        site.render("/page/b").unwrap();
        assert!(doc.node_by_id("a").is_none());
        assert!(doc.node_by_id("b").unwrap().has_parent());
    }

    #[test]
    fn content_registry() {
        let mut site = Site::default();
        site.add_content(StaticContent::inline("/css/app.css", "text/css", "body{}"));
        let found = site.content("/css/app.css").unwrap();
        assert_eq!(found.source, ContentSource::Inline(b"body{}".to_vec()));
        assert!(matches!(
            site.content("/js/app.js"),
            Err(Error::MissingContent { .. })
        ));
    }
}
