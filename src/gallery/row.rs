use serde::{Deserialize, Serialize};

use super::{Artwork, ArtworkId, UserId};

/// Attribution used when a record has no joined profile
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub artist_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Joined profile as returned by the backend.
///
/// Depending on the query shape the join comes back as one object, a list or
/// nothing at all; [`ProfileJoin::artist_name`] flattens the three cases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileJoin {
    Many(Vec<ArtistRef>),
    One(ArtistRef),
    #[default]
    Missing,
}

impl ProfileJoin {
    pub fn artist_name(&self) -> Option<&str> {
        let artist = match self {
            Self::Many(list) => list.first(),
            Self::One(artist) => Some(artist),
            Self::Missing => None,
        };
        artist.and_then(|artist| artist.artist_name.as_deref())
    }
}

/// A doodle row joined with its owner's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoodleRow {
    pub id: ArtworkId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub votes_count: Option<u64>,
    pub created_at: u64,
    #[serde(default)]
    pub profiles: ProfileJoin,
}

impl From<DoodleRow> for Artwork {
    fn from(row: DoodleRow) -> Self {
        let artist = row
            .profiles
            .artist_name()
            .unwrap_or(UNKNOWN_ARTIST)
            .to_owned();
        Self {
            id: row.id,
            owner: row.user_id,
            title: row.title,
            artist,
            image_url: row.image_url,
            description: row.description.filter(|text| !text.is_empty()),
            votes: row.votes_count.unwrap_or(0),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_json(profiles: &str) -> String {
        format!(
            r#"{{
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "user_id": "a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8",
                "title": "Blob",
                "description": "",
                "image_url": "file:///tmp/blob.png",
                "votes_count": null,
                "created_at": 1700000000000,
                "profiles": {profiles}
            }}"#
        )
    }

    #[test]
    fn test_join_as_list() {
        let row: DoodleRow =
            serde_json::from_str(&row_json(r#"[{"artist_name": "Mia", "avatar_url": null}]"#))
                .unwrap();
        let artwork = Artwork::from(row);
        assert_eq!(artwork.artist, "Mia");
        assert_eq!(artwork.votes, 0);
        assert_eq!(artwork.description, None);
    }

    #[test]
    fn test_join_as_object() {
        let row: DoodleRow =
            serde_json::from_str(&row_json(r#"{"artist_name": "Mia"}"#)).unwrap();
        assert_eq!(Artwork::from(row).artist, "Mia");
    }

    #[test]
    fn test_missing_join_defaults_to_unknown() {
        for profiles in ["null", "[]", r#"{"artist_name": null}"#] {
            let row: DoodleRow = serde_json::from_str(&row_json(profiles)).unwrap();
            assert_eq!(Artwork::from(row).artist, UNKNOWN_ARTIST, "profiles = {profiles}");
        }
    }
}
