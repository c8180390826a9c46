//! Home catalog bucketing
//!
//! Pure functions that turn the full content catalog into the Home screen's
//! shelves. Item order inside a shelf is always the server's order.

use serde::Serialize;

use crate::models::Content;

/// Items shown in the hero banner
pub const FEATURED_LIMIT: usize = 5;
/// Items in "New on Playmood"
pub const NEW_LIMIT: usize = 15;
/// Items per category shelf
pub const BUCKET_LIMIT: usize = 10;

/// Content categories the backend knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Teen,
    FashionShow,
    Documentary,
    Interview,
    Social,
    BehindTheCamera,
    Soon,
    OnlyOnPlaymood,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Teen,
        Category::FashionShow,
        Category::Documentary,
        Category::Interview,
        Category::Social,
        Category::BehindTheCamera,
        Category::Soon,
        Category::OnlyOnPlaymood,
    ];

    /// Exact string the backend stores in `category`
    pub fn as_wire(self) -> &'static str {
        match self {
            Category::Teen => "Teen",
            Category::FashionShow => "Fashion Show",
            // Backend spelling, matched as-is
            Category::Documentary => "Documentarie",
            Category::Interview => "Interview",
            Category::Social => "Social",
            Category::BehindTheCamera => "Behind the camera",
            Category::Soon => "Soon",
            Category::OnlyOnPlaymood => "Only on Playmood",
        }
    }

    /// Parse the wire string; unknown categories are `None`
    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_wire() == s)
    }
}

/// Shelves of the Home screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShelfKind {
    TopTen,
    New,
    MyLikes,
    MyWatchlist,
    Recommended,
    Interviews,
    FashionShows,
    Social,
    Documentaries,
    BehindTheCameras,
    Soon,
    Teens,
    OnlyOnPlaymood,
}

impl ShelfKind {
    pub const ORDER: [ShelfKind; 13] = [
        ShelfKind::TopTen,
        ShelfKind::New,
        ShelfKind::MyLikes,
        ShelfKind::MyWatchlist,
        ShelfKind::Recommended,
        ShelfKind::Interviews,
        ShelfKind::FashionShows,
        ShelfKind::Social,
        ShelfKind::Documentaries,
        ShelfKind::BehindTheCameras,
        ShelfKind::Soon,
        ShelfKind::Teens,
        ShelfKind::OnlyOnPlaymood,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ShelfKind::TopTen => "Top 10",
            ShelfKind::New => "New on Playmood",
            ShelfKind::MyLikes => "My Likes",
            ShelfKind::MyWatchlist => "My Watchlist",
            ShelfKind::Recommended => "Recommended for you",
            ShelfKind::Interviews => "Interviews",
            ShelfKind::FashionShows => "Fashion Shows",
            ShelfKind::Social => "Social",
            ShelfKind::Documentaries => "Documentaries and Reports",
            ShelfKind::BehindTheCameras => "Behind the Cameras",
            ShelfKind::Soon => "Soon in Playmood",
            ShelfKind::Teens => "Teens",
            ShelfKind::OnlyOnPlaymood => "Only in Playmood",
        }
    }

    /// Category the shelf draws from, if it is a category shelf
    pub fn category(self) -> Option<Category> {
        match self {
            ShelfKind::Recommended | ShelfKind::Teens => Some(Category::Teen),
            ShelfKind::Interviews => Some(Category::Interview),
            ShelfKind::FashionShows => Some(Category::FashionShow),
            ShelfKind::Social => Some(Category::Social),
            ShelfKind::Documentaries => Some(Category::Documentary),
            ShelfKind::BehindTheCameras => Some(Category::BehindTheCamera),
            ShelfKind::Soon => Some(Category::Soon),
            ShelfKind::OnlyOnPlaymood => Some(Category::OnlyOnPlaymood),
            ShelfKind::TopTen | ShelfKind::New | ShelfKind::MyLikes | ShelfKind::MyWatchlist => None,
        }
    }

    /// Shelves that only exist for a signed-in user
    pub fn requires_session(self) -> bool {
        matches!(self, ShelfKind::MyLikes | ShelfKind::MyWatchlist)
    }
}

/// One titled row of content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shelf {
    pub kind: ShelfKind,
    pub title: &'static str,
    pub items: Vec<Content>,
}

/// Home screen data derived from the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeCatalog {
    pub featured: Vec<Content>,
    pub top_ten: Vec<Content>,
    pub new: Vec<Content>,
    /// Category shelves in display order
    pub shelves: Vec<Shelf>,
}

impl HomeCatalog {
    /// Bucket `all` into the Home shelves. `top_ten` is used as returned.
    pub fn build(all: &[Content], top_ten: Vec<Content>) -> Self {
        let shelves = ShelfKind::ORDER
            .into_iter()
            .filter_map(|kind| {
                let category = kind.category()?;
                Some(Shelf {
                    kind,
                    title: kind.title(),
                    items: bucket(all, category, BUCKET_LIMIT),
                })
            })
            .collect();

        Self {
            featured: all.iter().take(FEATURED_LIMIT).cloned().collect(),
            top_ten,
            new: all.iter().take(NEW_LIMIT).cloned().collect(),
            shelves,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_empty() && self.top_ten.is_empty()
    }

    pub fn shelf(&self, kind: ShelfKind) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.kind == kind)
    }
}

/// First `limit` items of `category`, in catalog order
pub fn bucket(all: &[Content], category: Category, limit: usize) -> Vec<Content> {
    all.iter()
        .filter(|c| c.category == category.as_wire())
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(i: usize, category: &str) -> Content {
        Content {
            id: format!("c{}", i),
            title: format!("Title {}", i),
            description: String::new(),
            video: String::new(),
            thumbnail: String::new(),
            category: category.to_string(),
        }
    }

    fn ids(items: &[Content]) -> Vec<String> {
        items.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_home_scenario_twenty_items() {
        let all: Vec<Content> = (0..20).map(|i| item(i, "Interview")).collect();
        let top: Vec<Content> = (100..110).map(|i| item(i, "Social")).collect();

        let home = HomeCatalog::build(&all, top.clone());

        assert_eq!(ids(&home.new), ids(&all[..15]));
        assert_eq!(home.top_ten.len(), 10);
        assert_eq!(home.top_ten, top);
        assert_eq!(ids(&home.featured), ids(&all[..5]));
        assert_eq!(
            ids(&home.shelf(ShelfKind::Interviews).unwrap().items),
            ids(&all[..10])
        );
    }

    #[test]
    fn test_buckets_keep_catalog_order() {
        let all = vec![
            item(0, "Social"),
            item(1, "Teen"),
            item(2, "Social"),
            item(3, "Documentarie"),
            item(4, "Teen"),
        ];
        let home = HomeCatalog::build(&all, vec![]);

        assert_eq!(ids(&home.shelf(ShelfKind::Social).unwrap().items), vec!["c0", "c2"]);
        assert_eq!(ids(&home.shelf(ShelfKind::Documentaries).unwrap().items), vec!["c3"]);
        // Both shelves draw on the same category
        assert_eq!(
            home.shelf(ShelfKind::Recommended).unwrap().items,
            home.shelf(ShelfKind::Teens).unwrap().items
        );
    }

    #[test]
    fn test_category_shelves_in_display_order() {
        let home = HomeCatalog::build(&[], vec![]);
        let titles: Vec<&str> = home.shelves.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Recommended for you",
                "Interviews",
                "Fashion Shows",
                "Social",
                "Documentaries and Reports",
                "Behind the Cameras",
                "Soon in Playmood",
                "Teens",
                "Only in Playmood",
            ]
        );
        assert!(home.is_empty());
    }

    #[test]
    fn test_category_wire_strings() {
        assert_eq!(Category::from_wire("Documentarie"), Some(Category::Documentary));
        assert_eq!(Category::from_wire("Documentary"), None);
        assert_eq!(Category::from_wire("Behind the camera"), Some(Category::BehindTheCamera));
        for c in Category::ALL {
            assert_eq!(Category::from_wire(c.as_wire()), Some(c));
        }
    }
}
