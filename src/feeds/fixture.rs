use super::{FixtureData, Photographer, PhotographerSource, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;

const IMAGE_BASE: &str = "https://api.a0.dev/assets/image";

fn image_url(text: &str, aspect: &str, seed: u32) -> String {
    format!(
        "{}?text={}&aspect={}&seed={}",
        IMAGE_BASE,
        urlencoding::encode(text),
        aspect,
        seed
    )
}

/// The bundled sample data: two photographers and the viewing user.
pub fn builtin_fixture() -> FixtureData {
    let current_user = User {
        id: "current".to_string(),
        name: "John Doe".to_string(),
        email: "john@example.com".to_string(),
        avatar: image_url("professional headshot portrait", "1:1", 789),
        bio: None,
        is_photographer: false,
        following: vec!["1".to_string(), "2".to_string()],
        followers: vec!["1".to_string()],
    };

    let photographers = vec![
        Photographer {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            avatar: image_url("professional female photographer headshot portrait", "1:1", 123),
            images: vec![
                image_url("stunning wedding photography dramatic lighting", "4:5", 456),
                image_url("elegant wedding ceremony", "4:5", 457),
            ],
            specialty: "Wedding Photography".to_string(),
            location: "New York, NY".to_string(),
            likes: 1234,
            comments: 89,
            price: "$200/hr".to_string(),
            is_verified: true,
            rating: 4.8,
            reviews: 156,
            portfolio: vec![
                image_url("wedding portrait", "4:5", 458),
                image_url("wedding ceremony", "4:5", 459),
            ],
            about: "Specializing in capturing life's most precious moments with an artistic touch."
                .to_string(),
        },
        Photographer {
            id: "2".to_string(),
            name: "Marcus Chen".to_string(),
            avatar: image_url("asian male photographer headshot professional", "1:1", 789),
            images: vec![
                image_url("urban street photography neon lights", "4:5", 101),
                image_url("city life night", "4:5", 102),
            ],
            specialty: "Street Photography".to_string(),
            location: "Los Angeles, CA".to_string(),
            likes: 2341,
            comments: 156,
            price: "$150/hr".to_string(),
            is_verified: true,
            rating: 4.9,
            reviews: 203,
            portfolio: vec![
                image_url("street photography", "4:5", 103),
                image_url("urban life", "4:5", 104),
            ],
            about: "Capturing the raw energy and authenticity of urban life through my lens."
                .to_string(),
        },
    ];

    FixtureData {
        current_user,
        photographers,
    }
}

pub struct BuiltinSource;

#[async_trait]
impl PhotographerSource for BuiltinSource {
    async fn fetch(&self) -> Result<FixtureData> {
        Ok(builtin_fixture())
    }
}

/// Loads fixture data from a JSON file with `currentUser` and `photographers` keys.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl PhotographerSource for FileSource {
    async fn fetch(&self) -> Result<FixtureData> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read fixture file {}", self.path.display()))?;
        let data: FixtureData = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fixture file {}", self.path.display()))?;
        validate(&data)?;
        Ok(data)
    }
}

fn validate(data: &FixtureData) -> Result<()> {
    let mut seen = HashSet::new();
    for photographer in &data.photographers {
        if !seen.insert(photographer.id.as_str()) {
            return Err(anyhow::anyhow!(
                "Duplicate photographer id in fixture: {}",
                photographer.id
            ));
        }
    }
    Ok(())
}

/// Picks the file source when a fixture path is configured, the bundled data otherwise.
pub fn source_for(path: Option<PathBuf>) -> Box<dyn PhotographerSource> {
    match path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(BuiltinSource),
    }
}
