//! Posts as delivered by the upstream posts API.

use serde::{Deserialize, Serialize};

/// A single listed post. Immutable once decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub post_number: i64,
    pub title: String,
    /// Body text; carried through but never shown in the listing.
    pub content: String,
    pub writer: String,
    pub write_date: String,
    pub data_type: String,
}

impl Post {
    pub fn data_type_kind(&self) -> DataType {
        DataType::from_tag(&self.data_type)
    }
}

/// One page of posts plus the authoritative total count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsPage {
    pub post_count: u64,
    pub posts: Vec<Post>,
}

impl PostsPage {
    /// The zeroed result that stands in for any failed fetch.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Closed set of attachment kinds a post can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Movie,
    Picture,
    Text,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataTypeIcon {
    Video,
    Image,
    Text,
}

impl DataTypeIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            DataTypeIcon::Video => "video",
            DataTypeIcon::Image => "image",
            DataTypeIcon::Text => "text",
        }
    }
}

impl DataType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "icon_movie" => DataType::Movie,
            "icon_pic" => DataType::Picture,
            "icon_txt" => DataType::Text,
            _ => DataType::Unknown,
        }
    }

    pub fn icon(self) -> Option<DataTypeIcon> {
        match self {
            DataType::Movie => Some(DataTypeIcon::Video),
            DataType::Picture => Some(DataTypeIcon::Image),
            DataType::Text => Some(DataTypeIcon::Text),
            DataType::Unknown => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataType::Movie => "동영상",
            DataType::Picture => "이미지",
            DataType::Text => "텍스트",
            DataType::Unknown => "기타",
        }
    }
}
