//! Markdown front end built on pulldown-cmark event streams.
//!
//! Folds the flat event stream into the nested [`Element`] tree. Reference
//! link definitions are resolved by pulldown-cmark and produce no elements,
//! so `[1.0.0]`-style release headings arrive as ordinary links.

use pulldown_cmark::{Event, Options, Parser, Tag};

use super::tree::Element;

/// Parse markdown text into an element tree. Never fails; constructs the
/// vocabulary does not cover become [`Element::Other`] nodes.
pub fn parse_document(text: &str) -> Vec<Element> {
    let parser = Parser::new_ext(text, Options::empty());
    let mut builder = TreeBuilder::default();
    for event in parser {
        builder.push_event(event);
    }
    builder.finish()
}

/// An open container on the build stack.
enum Frame {
    Header(u8),
    Para,
    Em,
    Link(String),
    List {
        ordered: bool,
        items: Vec<Vec<Element>>,
    },
    Item,
    Other(String),
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Element>,
    stack: Vec<(Frame, Vec<Element>)>,
}

impl TreeBuilder {
    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.stack.push((frame_for(tag), Vec::new())),
            Event::End(_) => self.close(),
            Event::Text(text) => self.push_element(Element::Text(text.into_string())),
            Event::Code(code) => self.push_element(Element::InlineCode(code.into_string())),
            Event::SoftBreak | Event::HardBreak => {
                self.push_element(Element::Text("\n".to_string()));
            }
            Event::Rule => self.push_element(Element::Other {
                tag: "hrule".to_string(),
                content: Vec::new(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => self.push_element(Element::Other {
                tag: "html".to_string(),
                content: vec![Element::Text(html.into_string())],
            }),
            // Extension events (footnotes, task lists, math) are never
            // produced with Options::empty()
            _ => {}
        }
    }

    fn close(&mut self) {
        let Some((frame, children)) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Header(level) => self.push_element(Element::Header {
                level,
                content: children,
            }),
            Frame::Para => self.push_element(Element::Para(children)),
            Frame::Em => self.push_element(Element::Em(children)),
            Frame::Link(href) => self.push_element(Element::Link {
                href,
                content: children,
            }),
            Frame::Item => {
                // List items collapse into their parent list's item slots
                if let Some((Frame::List { items, .. }, _)) = self.stack.last_mut() {
                    items.push(children);
                } else {
                    self.push_element(Element::Other {
                        tag: "listitem".to_string(),
                        content: children,
                    });
                }
            }
            Frame::List {
                ordered: false,
                items,
            } => self.push_element(Element::BulletList(items)),
            Frame::List {
                ordered: true,
                items,
            } => self.push_element(Element::Other {
                tag: "numberlist".to_string(),
                content: items.into_iter().flatten().collect(),
            }),
            Frame::Other(tag) => self.push_element(Element::Other {
                tag,
                content: children,
            }),
        }
    }

    fn push_element(&mut self, element: Element) {
        match self.stack.last_mut() {
            Some((_, children)) => children.push(element),
            None => self.root.push(element),
        }
    }

    fn finish(self) -> Vec<Element> {
        self.root
    }
}

fn frame_for(tag: Tag<'_>) -> Frame {
    match tag {
        Tag::Heading { level, .. } => Frame::Header(level as u8),
        Tag::Paragraph => Frame::Para,
        Tag::Emphasis => Frame::Em,
        Tag::Link { dest_url, .. } => Frame::Link(dest_url.into_string()),
        Tag::List(start) => Frame::List {
            ordered: start.is_some(),
            items: Vec::new(),
        },
        Tag::Item => Frame::Item,
        Tag::Strong => Frame::Other("strong".to_string()),
        Tag::BlockQuote(_) => Frame::Other("blockquote".to_string()),
        Tag::CodeBlock(_) => Frame::Other("code_block".to_string()),
        Tag::Image { .. } => Frame::Other("img".to_string()),
        Tag::HtmlBlock => Frame::Other("html".to_string()),
        _ => Frame::Other("unsupported".to_string()),
    }
}
