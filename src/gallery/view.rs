use crate::service::image::{ImageId, ImageRecord};
use super::util::{format_date, format_file_size};

/// What a card's controls ask the gallery to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Delete(ImageId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub src: String,
    pub alt: String,
}

/// Display description of one image record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ImageId,
    pub preview: Preview,
    pub filename: String,
    pub size: String,
    pub uploaded: String,
    pub download_href: String,
    pub delete: Action,
}

pub fn build_card(record: &ImageRecord) -> CardView {
    CardView {
        id: record.id.clone(),
        preview: Preview {
            src: record.url.clone(),
            alt: record.filename.clone(),
        },
        filename: record.filename.clone(),
        size: format_file_size(record.size),
        uploaded: format_date(&record.created_at),
        download_href: format!("/api/images/{}/download", record.id),
        delete: Action::Delete(record.id.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Nothing loaded yet.
    Blank,
    /// Loaded, and the service has no images.
    Placeholder,
    Cards(Vec<CardView>),
}

/// The gallery container. Only ever replaced wholesale or shortened by one
/// card at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    content: Content,
}

impl GalleryView {
    pub fn new() -> Self {
        GalleryView { content: Content::Blank }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn cards(&self) -> &[CardView] {
        match &self.content {
            Content::Cards(cards) => cards.as_slice(),
            _ => &[],
        }
    }

    pub fn shows_placeholder(&self) -> bool {
        self.content == Content::Placeholder
    }

    pub fn replace(&mut self, records: &[ImageRecord]) {
        self.content = if records.is_empty() {
            Content::Placeholder
        } else {
            Content::Cards(records.iter().map(build_card).collect())
        };
    }

    /// Drops the card for `id`. Returns whether one was there. An emptied
    /// gallery falls back to the placeholder.
    pub fn remove(&mut self, id: &ImageId) -> bool {
        match &mut self.content {
            Content::Cards(cards) => {
                let before = cards.len();
                cards.retain(|card| &card.id != id);
                let removed = cards.len() != before;
                if cards.is_empty() {
                    self.content = Content::Placeholder;
                }
                removed
            },
            Content::Blank => {
                self.content = Content::Placeholder;
                false
            },
            Content::Placeholder => false,
        }
    }

    /// Finds a card by its position (1-based, as drawn) or by its id.
    pub fn lookup(&self, key: &str) -> Option<&CardView> {
        let cards = self.cards();
        if let Some(card) = cards.iter().find(|card| card.id.as_str() == key) {
            return Some(card);
        }
        key.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| cards.get(index))
    }
}

impl Default for GalleryView {
    fn default() -> Self {
        GalleryView::new()
    }
}
