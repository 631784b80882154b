use html_escape::decode_html_entities;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::app::{GatorError, Result};
use crate::fetcher::{FeedDocument, FetchedEntry};

const CHANNEL: [&str; 2] = ["rss", "channel"];
const ITEM: [&str; 3] = ["rss", "channel", "item"];

/// Parse an RSS 2.0 document into its channel header and items.
///
/// Only `rss > channel > item` structure is recognised; any other root
/// element is rejected. Markup nested inside a field (unescaped HTML in a
/// description, for instance) contributes its text to that field.
pub fn parse_rss(body: &[u8]) -> Result<FeedDocument> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut doc = FeedDocument::default();
    let mut current: Option<FetchedEntry> = None;
    let mut saw_channel = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if path.is_empty() && name != "rss" {
                    return Err(GatorError::FeedParse(format!(
                        "expected <rss> root element, found <{}>",
                        name
                    )));
                }
                path.push(name);

                if at(&path, &CHANNEL) {
                    saw_channel = true;
                } else if at(&path, &ITEM) {
                    current = Some(FetchedEntry::default());
                }
            }
            Ok(Event::Empty(e)) => {
                if path.is_empty() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(GatorError::FeedParse(format!(
                        "empty <{}> root element",
                        name
                    )));
                }
            }
            Ok(Event::End(_)) => {
                if at(&path, &ITEM) {
                    if let Some(entry) = current.take() {
                        doc.entries.push(finish_entry(entry));
                    }
                }
                path.pop();
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map(|t| t.into_owned())
                    .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                append_text(&path, &mut doc, current.as_mut(), &text);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                append_text(&path, &mut doc, current.as_mut(), &text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(GatorError::FeedParse(format!("XML parse error: {}", e)));
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_channel {
        return Err(GatorError::FeedParse(
            "document has no <rss><channel> element".to_string(),
        ));
    }

    doc.title = decode(&doc.title);
    doc.description = decode(&doc.description);
    doc.link = doc.link.trim().to_string();

    Ok(doc)
}

fn at(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn append_text(path: &[String], doc: &mut FeedDocument, entry: Option<&mut FetchedEntry>, text: &str) {
    if path.len() > ITEM.len() && at(&path[..ITEM.len()], &ITEM) {
        if let Some(entry) = entry {
            match path[ITEM.len()].as_str() {
                "title" => entry.title.push_str(text),
                "link" => entry.link.push_str(text),
                "description" => entry.description.push_str(text),
                "pubDate" => entry.raw_pub_date.push_str(text),
                _ => {}
            }
        }
    } else if path.len() > CHANNEL.len() && at(&path[..CHANNEL.len()], &CHANNEL) {
        match path[CHANNEL.len()].as_str() {
            "title" => doc.title.push_str(text),
            "link" => doc.link.push_str(text),
            "description" => doc.description.push_str(text),
            _ => {}
        }
    }
}

fn finish_entry(entry: FetchedEntry) -> FetchedEntry {
    FetchedEntry {
        title: decode(&entry.title),
        link: entry.link.trim().to_string(),
        description: decode(&entry.description),
        raw_pub_date: entry.raw_pub_date.trim().to_string(),
    }
}

fn decode(s: &str) -> String {
    decode_html_entities(s.trim()).into_owned()
}
