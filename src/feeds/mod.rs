pub mod fixture;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub is_photographer: bool,
    #[serde(default)]
    pub following: Vec<String>,
    #[serde(default)]
    pub followers: Vec<String>,
}

/// A photographer card in the feed. Read-only once loaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photographer {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub specialty: String,
    pub location: String,
    pub likes: u64,
    /// Comment count shown by the source; the feed's own comments live in the tracker.
    #[serde(default)]
    pub comments: u64,
    pub price: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub portfolio: Vec<String>,
    #[serde(default)]
    pub about: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureData {
    pub current_user: User,
    pub photographers: Vec<Photographer>,
}

#[async_trait]
pub trait PhotographerSource: Send + Sync {
    async fn fetch(&self) -> Result<FixtureData>;
}
