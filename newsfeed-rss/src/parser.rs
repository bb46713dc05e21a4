//! RSS 2.0 `channel/item` extraction
//!
//! Walks the document with a streaming reader, keeps a stack of open element
//! names and picks up every `item` that sits directly under a `channel` that
//! sits directly under the root element. The root element's own name is not
//! checked.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use newsfeed_core::{FeedError, FeedResult, NewsItem};

/// Depth of an `item` element: root / channel / item
const ITEM_DEPTH: usize = 3;
/// Depth of an item's direct children
const FIELD_DEPTH: usize = ITEM_DEPTH + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

/// Child texts collected for one `<item>`. Only the first child of each name counts.
#[derive(Debug, Default)]
struct ItemBuilder {
    title: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
}

impl ItemBuilder {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::PubDate => &mut self.pub_date,
        }
    }

    fn set_if_absent(&mut self, field: Field, text: String) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(text);
        }
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Title => self.title.is_some(),
            Field::Link => self.link.is_some(),
            Field::PubDate => self.pub_date.is_some(),
        }
    }

    fn build(self) -> NewsItem {
        NewsItem::from_fields(self.title, self.link, self.pub_date)
    }
}

/// Text being captured from a field element. Text after the field's first
/// nested element is not part of the field's own text.
#[derive(Debug)]
struct Capture {
    field: Field,
    text: String,
    closed: bool,
}

/// Parse an RSS document and return its `channel/item` entries in document order.
///
/// A well-formed document without that path yields an empty vec. Anything that
/// is not a single well-formed XML element tree is a [`FeedError::Parse`].
pub fn parse_channel_items(xml: &[u8]) -> FeedResult<Vec<NewsItem>> {
    let mut reader = Reader::from_reader(xml);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut root_seen = false;
    let mut current_item: Option<ItemBuilder> = None;
    let mut capture: Option<Capture> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            FeedError::parse(format!(
                "{} (at byte {})",
                e,
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(e) => {
                check_attributes(&e)?;
                if stack.is_empty() {
                    open_root(&mut root_seen)?;
                }
                let name = e.name().as_ref().to_vec();

                if let Some(cap) = capture.as_mut() {
                    cap.closed = true;
                } else if is_item_path(&stack, &name) {
                    current_item = Some(ItemBuilder::default());
                } else if stack.len() == ITEM_DEPTH {
                    if let (Some(item), Some(field)) =
                        (current_item.as_mut(), Field::from_tag(&name))
                    {
                        if !item.has(field) {
                            capture = Some(Capture {
                                field,
                                text: String::new(),
                                closed: false,
                            });
                        }
                    }
                }

                stack.push(name);
            }
            Event::Empty(e) => {
                check_attributes(&e)?;
                let name = e.name();
                let name = name.as_ref();

                if stack.is_empty() {
                    open_root(&mut root_seen)?;
                } else if let Some(cap) = capture.as_mut() {
                    cap.closed = true;
                } else if is_item_path(&stack, name) {
                    items.push(ItemBuilder::default().build());
                } else if stack.len() == ITEM_DEPTH {
                    if let (Some(item), Some(field)) =
                        (current_item.as_mut(), Field::from_tag(name))
                    {
                        item.set_if_absent(field, String::new());
                    }
                }
            }
            Event::End(_) => {
                let depth = stack.len();
                stack.pop();

                if depth == FIELD_DEPTH {
                    if let (Some(cap), Some(item)) = (capture.take(), current_item.as_mut()) {
                        item.set_if_absent(cap.field, cap.text);
                    }
                } else if depth == ITEM_DEPTH {
                    if let Some(item) = current_item.take() {
                        items.push(item.build());
                    }
                }
            }
            Event::Text(e) => {
                if stack.is_empty() {
                    if e.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(FeedError::parse(
                            "text content outside of the root element",
                        ));
                    }
                } else {
                    // Every text node must decode, captured or not
                    let text = e.unescape().map_err(|err| {
                        FeedError::parse(format!(
                            "invalid character data at byte {}: {}",
                            reader.buffer_position(),
                            err
                        ))
                    })?;
                    if let Some(cap) = capture.as_mut() {
                        if !cap.closed && stack.len() == FIELD_DEPTH {
                            cap.text.push_str(&text);
                        }
                    }
                }
            }
            Event::CData(e) => {
                if stack.is_empty() {
                    return Err(FeedError::parse("CDATA section outside of the root element"));
                }
                let text = std::str::from_utf8(&e).map_err(|err| {
                    FeedError::parse(format!(
                        "invalid UTF-8 in CDATA section at byte {}: {}",
                        reader.buffer_position(),
                        err
                    ))
                })?;
                if let Some(cap) = capture.as_mut() {
                    if !cap.closed && stack.len() == FIELD_DEPTH {
                        cap.text.push_str(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::parse(format!(
            "unclosed element `{}` at end of document",
            String::from_utf8_lossy(open)
        )));
    }
    if !root_seen {
        return Err(FeedError::parse("no root element found"));
    }

    Ok(items)
}

/// An `item` opening directly under `<root>/channel`
fn is_item_path(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.len() == ITEM_DEPTH - 1 && stack[1] == b"channel" && name == b"item"
}

fn open_root(root_seen: &mut bool) -> FeedResult<()> {
    if *root_seen {
        return Err(FeedError::parse("junk after document element"));
    }
    *root_seen = true;
    Ok(())
}

fn check_attributes(start: &BytesStart<'_>) -> FeedResult<()> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| FeedError::parse(format!("malformed attribute: {}", e)))?;
        attr.unescape_value()
            .map_err(|e| FeedError::parse(format!("invalid attribute value: {}", e)))?;
    }
    Ok(())
}
