//! Data structures and types for Playmood
//!
//! Wire models returned by the Playmood API, organized by domain:
//! - **Content**: videos shown in sliders and the movie screen
//! - **Creators**: channel summaries and full channel pages
//! - **Channel sections**: feed posts, highlights, playlists, community posts
//! - **User**: the signed-in account with its likes and watchlist
//!
//! The API is lenient about nested fields, so anything that may be missing is
//! either `Option` or `#[serde(default)]`. Rendering never assumes presence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::focus::Navigable;

// =============================================================================
// Content
// =============================================================================

/// A piece of video content (movie, interview, show...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Media URL handed to the playback surface
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Raw category string as sent by the API (see `catalog::Category`)
    #[serde(default)]
    pub category: String,
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} [{}]", self.title, self.category)
        }
    }
}

// =============================================================================
// Creators
// =============================================================================

/// Creator entry from the channels slider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Full creator channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub subscribers: u64,
    #[serde(default)]
    pub content: Vec<Content>,
    #[serde(default)]
    pub about: String,
}

impl Creator {
    /// Subscriber line shown under the channel name
    pub fn subscribers_label(&self) -> String {
        format!("{} subscribers", self.subscribers)
    }
}

// =============================================================================
// Channel Sections
// =============================================================================

/// Media attachment of a feed post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
}

/// Author block embedded in posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Feed post (image grid entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<serde_json::Value>,
    #[serde(default)]
    pub user: Option<PostAuthor>,
}

impl FeedPost {
    /// First media URL, if the post has any media at all
    pub fn cover_url(&self) -> Option<&str> {
        self.media.first().map(|m| m.url.as_str())
    }
}

/// Content referenced by a highlight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightContent {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

/// Creator highlight ("story")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: Option<HighlightContent>,
}

impl Highlight {
    pub fn title(&self) -> &str {
        self.content.as_ref().map(|c| c.title.as_str()).unwrap_or("")
    }
}

/// Video inside a playlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistVideo {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// Public playlist of a creator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub videos: Vec<PlaylistVideo>,
}

/// Author of a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub name: String,
}

/// Comment under a community post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: Option<CommentAuthor>,
}

/// Community (text) post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user: Option<PostAuthor>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl CommunityPost {
    /// Post date in local time as `YYYY-MM-DD`; raw string if unparseable
    pub fn date_label(&self) -> String {
        let Some(raw) = self.timestamp.as_deref() else {
            return String::new();
        };
        chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| {
                dt.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .unwrap_or_else(|_| raw.to_string())
    }

    pub fn author_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or("")
    }
}

// =============================================================================
// User
// =============================================================================

/// Signed-in user as returned by the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub token: String,
    /// Content ids the user liked
    #[serde(default)]
    pub likes: Vec<String>,
    /// Content ids in the user's watchlist
    #[serde(default)]
    pub watchlist: Vec<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

// =============================================================================
// Navigable keys
// =============================================================================

impl Navigable for Content {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Navigable for CreatorSummary {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Navigable for FeedPost {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Navigable for Highlight {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Navigable for Playlist {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Navigable for PlaylistVideo {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Navigable for CommunityPost {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_tolerates_missing_fields() {
        let content: Content = serde_json::from_str(r#"{"_id": "c1"}"#).unwrap();
        assert_eq!(content.id, "c1");
        assert!(content.title.is_empty());
        assert!(content.category.is_empty());
    }

    #[test]
    fn test_creator_camel_case_fields() {
        let json = r#"{
            "_id": "u1",
            "name": "Ana",
            "profileImage": "https://img/ana.png",
            "bannerImage": null,
            "subscribers": 42,
            "about": "Designer"
        }"#;
        let creator: Creator = serde_json::from_str(json).unwrap();
        assert_eq!(creator.profile_image.as_deref(), Some("https://img/ana.png"));
        assert!(creator.banner_image.is_none());
        assert!(creator.content.is_empty());
        assert_eq!(creator.subscribers_label(), "42 subscribers");
    }

    #[test]
    fn test_feed_post_without_media() {
        let post: FeedPost = serde_json::from_str(r#"{"_id": "p1", "caption": "hi"}"#).unwrap();
        assert!(post.cover_url().is_none());
        assert!(post.user.is_none());
    }

    #[test]
    fn test_highlight_without_content() {
        let highlight: Highlight = serde_json::from_str(r#"{"_id": "h1"}"#).unwrap();
        assert_eq!(highlight.title(), "");
    }

    #[test]
    fn test_community_date_label() {
        let post = CommunityPost {
            id: "p".into(),
            content: String::new(),
            user: None,
            comments: vec![],
            likes: vec![],
            timestamp: Some("not a date".into()),
        };
        assert_eq!(post.date_label(), "not a date");

        let none = CommunityPost {
            timestamp: None,
            ..post
        };
        assert_eq!(none.date_label(), "");
    }
}
