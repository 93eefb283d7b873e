//! RSS headline feed parsing.

use market_core::types::{STRING_LENGTH, TEXT_LENGTH, bounded};
use market_core::{Headline, MarketError, Result, ServiceError};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Item fields collected from a feed, by element name.
#[derive(Clone, Copy)]
enum Field {
    Title,
    Link,
    Guid,
    PubDate,
    Description,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"guid" => Some(Self::Guid),
            b"pubDate" => Some(Self::PubDate),
            b"description" => Some(Self::Description),
            _ => None,
        }
    }

    fn store(self, item: &mut Headline, text: &str) {
        let (slot, max) = match self {
            Self::Title => (&mut item.title, TEXT_LENGTH),
            Self::Link => (&mut item.link, TEXT_LENGTH),
            Self::Guid => (&mut item.guid, TEXT_LENGTH),
            Self::PubDate => (&mut item.pub_date, STRING_LENGTH),
            Self::Description => (&mut item.description, TEXT_LENGTH),
        };
        slot.push_str(text);
        *slot = bounded(slot, max);
    }
}

/// Parses an RSS 2.0 document into its `channel/item` entries, in feed order.
///
/// A well-formed document whose root element is not `rss` is reported as a
/// service error; malformed XML is a parse error.
pub fn parse(xml: &str) -> Result<Vec<Headline>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut items = Vec::new();
    let mut item: Option<Headline> = None;
    let mut field: Option<Field> = None;
    let mut seen_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| MarketError::Parse(format!("rss at {}: {e}", reader.buffer_position())))?;
        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if path.is_empty() {
                    check_root(&name)?;
                    seen_root = true;
                }
                path.push(name);
                match path.as_slice() {
                    [rss, channel, i] if rss == b"rss" && channel == b"channel" && i == b"item" => {
                        item = Some(Headline::default());
                    }
                    [_, _, _, leaf] if item.is_some() => field = Field::from_name(leaf),
                    _ => {}
                }
            }
            Event::Empty(e) if path.is_empty() => {
                check_root(e.name().as_ref())?;
                seen_root = true;
            }
            Event::End(_) => {
                if path.len() == 4 {
                    field = None;
                }
                if path.len() == 3 {
                    items.extend(item.take());
                }
                path.pop();
            }
            Event::Text(t) => {
                if let (Some(f), Some(item)) = (field, item.as_mut()) {
                    let text = t
                        .unescape()
                        .map_err(|e| MarketError::Parse(format!("rss text: {e}")))?;
                    f.store(item, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(f), Some(item)) = (field, item.as_mut()) {
                    f.store(item, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(MarketError::Parse("rss: document has no root element".to_string()));
    }
    if !path.is_empty() {
        return Err(MarketError::Parse("rss: unexpected end of document".to_string()));
    }
    Ok(items)
}

fn check_root(name: &[u8]) -> Result<()> {
    if name == b"rss" {
        return Ok(());
    }
    Err(ServiceError::new(
        "rss",
        bounded(&String::from_utf8_lossy(name), STRING_LENGTH),
        "Document root is not an RSS feed",
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_core::ErrorKind;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Yahoo! Finance: GME News</title>
    <item>
      <title>GameStop &amp; the meme rally</title>
      <link>https://finance.yahoo.com/news/gme-1.html</link>
      <guid isPermaLink="false">gme-1</guid>
      <pubDate>Mon, 13 May 2024 14:00:00 +0000</pubDate>
      <description><![CDATA[Shares <b>surged</b>.]]></description>
    </item>
    <item>
      <title>Second</title>
      <guid>gme-2</guid>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_items() {
        let items = parse(FEED).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "GameStop & the meme rally");
        assert_eq!(items[0].link, "https://finance.yahoo.com/news/gme-1.html");
        assert_eq!(items[0].guid, "gme-1");
        assert_eq!(items[0].pub_date, "Mon, 13 May 2024 14:00:00 +0000");
        assert_eq!(items[0].description, "Shares <b>surged</b>.");
        assert_eq!(items[1].title, "Second");
        assert!(items[1].link.is_empty());
    }

    #[test]
    fn test_channel_title_is_not_an_item() {
        let items = parse(FEED).unwrap();
        assert!(items.iter().all(|i| !i.title.starts_with("Yahoo!")));
    }

    #[test]
    fn test_wrong_root_is_service_error() {
        let err = parse("<html><body>Will be right back</body></html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let err = parse("<rss><channel><item></channel></rss>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = parse("<rss><channel>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_empty_feed() {
        let items = parse("<rss><channel></channel></rss>").unwrap();
        assert!(items.is_empty());
        assert!(parse(r#"<?xml version="1.0"?><rss version="2.0"/>"#).unwrap().is_empty());
    }

    #[test]
    fn test_no_root_is_parse_error() {
        for body in ["Service Unavailable", r#"<?xml version="1.0"?>"#, "", "<!-- down -->"] {
            let err = parse(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "body {body:?}");
        }
    }

    #[test]
    fn test_empty_wrong_root_is_service_error() {
        let err = parse("<html/>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.service().unwrap().code, "html");
    }
}
