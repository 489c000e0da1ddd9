//! RSS 2.0 feed for published posts.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::blog::Post;
use crate::domain::foundation::{DomainError, ErrorCode};

pub const FEED_TITLE: &str = "Tamm Sjödin";
pub const FEED_DESCRIPTION: &str = "Web Sorceress, Engineering Leader, and Founder of Queer Run Club. Thoughts on tech, creativity, and building inclusive communities.";

/// Channel-level feed metadata.
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    /// Absolute site origin without a trailing slash.
    pub site: String,
}

impl FeedChannel {
    pub fn for_site(site: &str) -> Self {
        Self {
            title: FEED_TITLE.to_string(),
            description: FEED_DESCRIPTION.to_string(),
            site: site.trim_end_matches('/').to_string(),
        }
    }

    fn post_link(&self, post: &Post) -> String {
        format!("{}/blog/{}/", self.site, post.slug.as_str())
    }
}

fn xml_error(e: quick_xml::Error) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("Failed to write feed: {}", e))
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_feed(channel: &FeedChannel, posts: &[&Post]) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", "2.0")]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(&mut writer, "title", &channel.title)?;
    text_element(&mut writer, "description", &channel.description)?;
    text_element(&mut writer, "link", &format!("{}/", channel.site))?;

    for post in posts {
        let link = channel.post_link(post);
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &post.title)?;
        text_element(&mut writer, "link", &link)?;
        text_element(&mut writer, "guid", &link)?;
        text_element(&mut writer, "pubDate", &post.created_at.to_rfc2822())?;
        if let Some(description) = &post.description {
            text_element(&mut writer, "description", description)?;
        }
        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner())
}

/// Renders published posts, newest first.
pub fn render_feed(channel: &FeedChannel, posts: &[Post]) -> Result<String, DomainError> {
    let mut published: Vec<&Post> = posts.iter().filter(|p| p.is_published()).collect();
    published.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let bytes = write_feed(channel, &published).map_err(xml_error)?;
    String::from_utf8(bytes)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Feed is not UTF-8: {}", e)))
}
