use super::Artwork;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub total_artworks: usize,
    pub total_votes: u64,
    /// Mean votes per artwork, rounded to the nearest whole vote
    pub avg_votes: u64,
}

impl ProfileStats {
    pub fn from_artworks<'a>(artworks: impl IntoIterator<Item = &'a Artwork>) -> Self {
        let (total_artworks, total_votes) = artworks
            .into_iter()
            .fold((0usize, 0u64), |(count, votes), artwork| {
                (count + 1, votes + artwork.votes)
            });
        let avg_votes = if total_artworks > 0 {
            (total_votes as f64 / total_artworks as f64).round() as u64
        } else {
            0
        };
        Self {
            total_artworks,
            total_votes,
            avg_votes,
        }
    }

    /// Stats for the artworks attributed to `artist_name`.
    ///
    /// Attribution is by display name, so a renamed artist loses older work.
    pub fn for_artist(artworks: &[Artwork], artist_name: &str) -> Self {
        Self::from_artworks(artworks.iter().filter(|a| a.artist == artist_name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

pub fn badges(artworks: &[Artwork], artist_name: &str) -> [Badge; 4] {
    let own: Vec<&Artwork> = artworks.iter().filter(|a| a.artist == artist_name).collect();
    let stats = ProfileStats::from_artworks(own.iter().copied());
    [
        Badge {
            id: "first_doodle",
            name: "First Doodle",
            description: "Uploaded your first painting",
            unlocked: stats.total_artworks > 0,
        },
        Badge {
            id: "trending",
            name: "Trending Artist",
            description: "One artwork reached 10 votes",
            unlocked: own.iter().any(|a| a.votes >= 10),
        },
        Badge {
            id: "gallery_builder",
            name: "Gallery Builder",
            description: "Uploaded 5 artworks",
            unlocked: stats.total_artworks >= 5,
        },
        Badge {
            id: "star",
            name: "Super Star",
            description: "Received 50 total votes",
            unlocked: stats.total_votes >= 50,
        },
    ]
}

/// The `limit` most voted artworks, most votes first
pub fn trending(artworks: &[Artwork], limit: usize) -> Vec<&Artwork> {
    let mut sorted: Vec<&Artwork> = artworks.iter().collect();
    sorted.sort_by(|a, b| b.votes.cmp(&a.votes));
    sorted.truncate(limit);
    sorted
}
