//! Render a page of the demo site, optionally clicking on it first.
//!
//! Run `weeb-ssr --help` for more info.
use anyhow::Context;
use clap::Parser;
use demo::Demo;
use weeb::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The path of the page to render.
    #[arg(long, default_value = "/")]
    path: String,

    /// How many times to click every clickable element after attaching.
    #[arg(long, default_value_t = 0)]
    clicks: usize,

    /// Print static content registered at this path instead of a page.
    #[arg(long)]
    content: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().init();
    let cli = Cli::parse();
    let demo = Demo::new();

    if let Some(path) = cli.content {
        let content = demo.site.content(&path)?;
        log::info!("{path} is {}", content.content_type);
        match &content.source {
            ContentSource::Inline(data) => println!("{}", String::from_utf8_lossy(data)),
            ContentSource::File(file) => {
                let data = std::fs::read_to_string(file)
                    .with_context(|| format!("could not read {}", file.display()))?;
                println!("{data}");
            }
        }
        return Ok(());
    }

    let html = demo.site.render(&cli.path)?;
    let (pattern, doc) = demo
        .site
        .route(&cli.path)
        .context("rendered page has no route")?;
    log::info!("rendered {} with {pattern}", cli.path);

    let mut dom = SsrDom::new();
    let Ok(bound) = doc.attach(&mut dom);
    log::debug!("bound {bound} handler(s)");

    let targets = dom
        .bindings()
        .iter()
        .filter(|(_, handler)| handler.event() == EventType::Click)
        .map(|(target, _)| target.clone())
        .collect::<Vec<_>>();
    let source = serde_json::json!({"type": "click", "bubbles": true, "button": 0});
    for _ in 0..cli.clicks {
        for target in targets.iter() {
            dom.fire(target, EventType::Click, &source);
        }
    }
    if cli.clicks > 0 {
        dom.fire(
            &Target::Window,
            EventType::Load,
            &serde_json::json!({"type": "load"}),
        );
    }

    let mut received = 0;
    while demo.exec_clicks.pending() > 0 {
        if futures_lite::future::block_on(demo.exec_clicks.next()).is_some() {
            received += 1;
        }
    }

    println!("{html}");
    println!();
    println!("console clicks: {received}");
    Ok(())
}
