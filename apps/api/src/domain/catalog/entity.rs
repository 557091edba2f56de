/// A themed set of artworks shown to reviewers.
///
/// Artwork identifiers are derived from the category prefix and a 1-based
/// index (`abs-1`, `abs-2`, ...), so the catalog never stores the id list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub title: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// Identifier prefix including the trailing dash, e.g. `"book-"`.
    pub prefix: &'static str,
    pub image_count: u32,
}

/// Title used for artwork ids that match no catalog prefix.
pub const FALLBACK_CATEGORY: &str = "Other";

pub const CATEGORIES: &[Category] = &[
    Category {
        slug: "books-as-art",
        title: "Books as Art",
        color: "amber",
        description: "Sculptural book pieces and literary-inspired artworks that honor the firm's intellectual heritage.",
        prefix: "book-",
        image_count: 30,
    },
    Category {
        slug: "delaware-artists",
        title: "Delaware Artists",
        color: "emerald",
        description: "Works by contemporary Delaware artists, connecting the firm to its local creative community.",
        prefix: "de-",
        image_count: 42,
    },
    Category {
        slug: "freestanding-sculpture",
        title: "Freestanding Sculpture",
        color: "sky",
        description: "Three-dimensional works for lobbies, conference areas, and circulation spaces.",
        prefix: "free-",
        image_count: 18,
    },
    Category {
        slug: "dimensional-relief",
        title: "Dimensional Relief",
        color: "rose",
        description: "Wall-mounted sculptural pieces adding depth and texture to key locations.",
        prefix: "dim-",
        image_count: 32,
    },
    Category {
        slug: "grid-modular",
        title: "Grid & Modular",
        color: "violet",
        description: "Systematic arrangements and repeating compositions for larger wall expanses.",
        prefix: "grid-",
        image_count: 30,
    },
    Category {
        slug: "abstract-paintings",
        title: "Abstract Paintings",
        color: "orange",
        description: "Contemporary abstract works in various scales for office and common areas.",
        prefix: "abs-",
        image_count: 32,
    },
    Category {
        slug: "surrealism",
        title: "Surrealism",
        color: "indigo",
        description: "Dream-like imagery and unexpected juxtapositions that spark curiosity and conversation.",
        prefix: "surr-",
        image_count: 33,
    },
    Category {
        slug: "impressionist",
        title: "Impressionist",
        color: "teal",
        description: "Light-filled landscapes and atmospheric scenes in the impressionist tradition.",
        prefix: "impr-",
        image_count: 18,
    },
];

impl Category {
    /// Ordered artwork identifiers belonging to this category.
    pub fn artwork_ids(&self) -> Vec<String> {
        (1..=self.image_count)
            .map(|index| format!("{}{}", self.prefix, index))
            .collect()
    }

    pub fn owns(&self, artwork_id: &str) -> bool {
        artwork_id.starts_with(self.prefix)
    }
}

pub fn find_by_artwork(artwork_id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.owns(artwork_id))
}

pub fn find_by_slug(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|category| category.slug == slug)
}

/// Category title for an artwork id, falling back to [`FALLBACK_CATEGORY`].
pub fn category_title(artwork_id: &str) -> &'static str {
    find_by_artwork(artwork_id).map_or(FALLBACK_CATEGORY, |category| category.title)
}
