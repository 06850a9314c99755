use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use strum_macros::Display;
use uuid::Uuid;

use crate::modality::Modality;
use crate::persona::{Persona, PersonaSynth};
use crate::verdict::Verdict;

/// Items kept per refresh, and the per-category fetch limit.
pub const FEED_PAGE_SIZE: usize = 10;
/// The two fixed source categories fetched on every refresh.
pub const FEED_CATEGORIES: [&str; 2] = ["pics", "videos"];

/// Wire shape of one `GET /feed` entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedSource {
    pub title: String,
    pub url: String,
    pub media_type: MediaKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Modality used when resubmitting the referenced binary for analysis.
    pub fn modality(self) -> Modality {
        match self {
            MediaKind::Image => Modality::Image,
            MediaKind::Video => Modality::Video,
        }
    }

    /// Placeholder filename for the rewrapped multipart payload.
    pub fn upload_name(self) -> &'static str {
        match self {
            MediaKind::Image => "image.jpg",
            MediaKind::Video => "video.mp4",
        }
    }
}

/// One fully decorated feed post. Lives until the next refresh replaces the
/// whole collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: String,
    pub author: String,
    pub avatar_url: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub source_url: String,
    pub like_count: u32,
    pub comment_count: u32,
    pub share_count: u32,
    pub timestamp_label: String,
    pub is_flagged: bool,
    pub confidence: f64,
    pub is_hidden: bool,
}

impl MediaItem {
    fn from_source(source: FeedSource, persona: Persona) -> Self {
        // Invariant: at most one of image_url/video_url is ever set.
        let (image_url, video_url) = match source.media_type {
            MediaKind::Image => (Some(source.url.clone()), None),
            MediaKind::Video => (None, Some(source.url.clone())),
        };
        MediaItem {
            id: Uuid::new_v4().to_string(),
            author: persona.author,
            avatar_url: persona.avatar_url,
            content: source.title,
            image_url,
            video_url,
            source_url: source.url,
            like_count: persona.like_count,
            comment_count: persona.comment_count,
            share_count: persona.share_count,
            timestamp_label: persona.timestamp_label,
            is_flagged: false,
            confidence: 0.0,
            is_hidden: false,
        }
    }

    /// The media reference to analyze, if the item carries one.
    pub fn media_ref(&self) -> Option<(MediaKind, &str)> {
        if let Some(url) = &self.image_url {
            Some((MediaKind::Image, url.as_str()))
        } else {
            self.video_url
                .as_deref()
                .map(|url| (MediaKind::Video, url))
        }
    }
}

/// Merges the two category batches into one decorated sequence. Order is
/// pictures then videos; the final shuffle erases it anyway.
pub fn normalize_batches(
    pictures: Vec<FeedSource>,
    videos: Vec<FeedSource>,
    synth: &mut impl PersonaSynth,
) -> Vec<MediaItem> {
    pictures
        .into_iter()
        .chain(videos)
        .map(|source| MediaItem::from_source(source, synth.next_persona()))
        .collect()
}

/// Best-effort enrichment: a verdict lands as-is, any failure downgrades
/// the item to not-flagged with zero confidence so the batch keeps going.
pub fn apply_verdict(item: &mut MediaItem, outcome: Result<Verdict, String>) {
    match outcome {
        Ok(verdict) => {
            item.is_flagged = verdict.is_deepfake;
            item.confidence = verdict.confidence;
        }
        Err(_) => {
            item.is_flagged = false;
            item.confidence = 0.0;
        }
    }
}

/// Shuffles and caps the annotated set before it becomes the visible feed.
pub fn finalize_feed<R: Rng>(mut items: Vec<MediaItem>, rng: &mut R) -> Vec<MediaItem> {
    items.shuffle(rng);
    items.truncate(FEED_PAGE_SIZE);
    items
}

/// Aggregate counters, recomputed from item state on every read so they
/// cannot drift from the items themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProtectionSummary {
    pub detected: usize,
    pub removed: usize,
    pub safe: usize,
}

/// Moderated feed state: the installed items plus the presentation toggles.
/// Moderation actions are purely local; no network effect.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedBoard {
    items: Vec<MediaItem>,
    show_hidden: bool,
    protection_on: bool,
    generation: u64,
}

impl Default for FeedBoard {
    fn default() -> Self {
        FeedBoard::new()
    }
}

impl FeedBoard {
    pub fn new() -> Self {
        FeedBoard {
            items: Vec::new(),
            show_hidden: false,
            protection_on: true,
            generation: 0,
        }
    }

    /// Starts a refresh cycle and returns its generation token. Results
    /// only install while their generation is still current, so a stale
    /// refresh finishing late loses to the newer one (last-write-wins).
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Replaces the feed atomically; stale generations are dropped.
    pub fn install(&mut self, generation: u64, items: Vec<MediaItem>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.items = items;
        true
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn hide(&mut self, id: &str) {
        self.set_hidden(id, true);
    }

    pub fn unhide(&mut self, id: &str) {
        self.set_hidden(id, false);
    }

    fn set_hidden(&mut self, id: &str, hidden: bool) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.is_hidden = hidden;
        }
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn protection_on(&self) -> bool {
        self.protection_on
    }

    pub fn toggle_show_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
    }

    pub fn toggle_protection(&mut self) {
        self.protection_on = !self.protection_on;
    }

    /// Pure view filter; never mutates the underlying items.
    pub fn visible(&self) -> impl Iterator<Item = &MediaItem> {
        self.items
            .iter()
            .filter(|item| !item.is_hidden || self.show_hidden)
    }

    pub fn summary(&self) -> ProtectionSummary {
        ProtectionSummary {
            detected: self.items.iter().filter(|item| item.is_flagged).count(),
            removed: self.items.iter().filter(|item| item.is_hidden).count(),
            safe: self.items.iter().filter(|item| !item.is_flagged).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::Persona;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    struct FixedSynth(u32);

    impl PersonaSynth for FixedSynth {
        fn next_persona(&mut self) -> Persona {
            self.0 += 1;
            Persona {
                author: format!("User_{}", self.0),
                avatar_url: "https://i.pravatar.cc/150?img=1".into(),
                like_count: 10,
                comment_count: 2,
                share_count: 1,
                timestamp_label: "3 hours ago".into(),
            }
        }
    }

    fn source(url: &str, media_type: MediaKind) -> FeedSource {
        FeedSource {
            title: format!("post about {url}"),
            url: url.into(),
            media_type,
        }
    }

    fn board_with(items: Vec<MediaItem>) -> FeedBoard {
        let mut board = FeedBoard::new();
        let generation = board.begin_refresh();
        assert!(board.install(generation, items));
        board
    }

    fn sample_items(flagged: usize, clean: usize) -> Vec<MediaItem> {
        let mut synth = FixedSynth(0);
        let sources = (0..flagged + clean)
            .map(|i| source(&format!("https://cdn.example/{i}.jpg"), MediaKind::Image))
            .collect();
        let mut items = normalize_batches(sources, Vec::new(), &mut synth);
        for item in items.iter_mut().take(flagged) {
            item.is_flagged = true;
            item.confidence = 90.0;
        }
        items
    }

    #[test]
    fn normalize_sets_exactly_one_media_url() {
        let mut synth = FixedSynth(0);
        let items = normalize_batches(
            vec![source("https://cdn.example/a.jpg", MediaKind::Image)],
            vec![source("https://cdn.example/b.mp4", MediaKind::Video)],
            &mut synth,
        );
        assert_eq!(items.len(), 2);
        assert!(items[0].image_url.is_some() && items[0].video_url.is_none());
        assert!(items[1].image_url.is_none() && items[1].video_url.is_some());
        assert_eq!(items[0].media_ref().unwrap().0, MediaKind::Image);
        assert_eq!(items[1].media_ref().unwrap().0, MediaKind::Video);
    }

    #[test]
    fn normalize_assigns_unique_ids_and_personas() {
        let mut synth = FixedSynth(0);
        let sources = vec![
            source("https://cdn.example/a.jpg", MediaKind::Image),
            source("https://cdn.example/a.jpg", MediaKind::Image),
        ];
        let items = normalize_batches(sources, Vec::new(), &mut synth);
        assert_ne!(items[0].id, items[1].id);
        assert_eq!(items[0].author, "User_1");
        assert_eq!(items[1].author, "User_2");
    }

    #[test]
    fn failed_annotation_downgrades_item_only() {
        let mut items = sample_items(0, 2);
        apply_verdict(
            &mut items[0],
            Ok(Verdict {
                is_deepfake: true,
                confidence: 87.5,
                summary: "FAKE".into(),
            }),
        );
        apply_verdict(&mut items[1], Err("connection reset".into()));

        assert!(items[0].is_flagged);
        assert_eq!(items[0].confidence, 87.5);
        assert!(!items[1].is_flagged);
        assert_eq!(items[1].confidence, 0.0);
    }

    #[test]
    fn finalize_caps_at_page_size() {
        let items = sample_items(0, 25);
        let mut rng = SmallRng::seed_from_u64(1);
        let feed = finalize_feed(items.clone(), &mut rng);
        assert_eq!(feed.len(), FEED_PAGE_SIZE);
        for item in &feed {
            assert!(items.contains(item));
        }
    }

    #[test]
    fn finalize_keeps_small_batches_whole() {
        let items = sample_items(1, 2);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(finalize_feed(items, &mut rng).len(), 3);
    }

    #[test]
    fn hide_touches_only_the_named_item_and_is_idempotent() {
        let mut board = board_with(sample_items(1, 3));
        let target = board.items()[1].id.clone();
        let before: Vec<MediaItem> = board.items().to_vec();

        board.hide(&target);
        let after_once: Vec<MediaItem> = board.items().to_vec();
        board.hide(&target);
        let after_twice: Vec<MediaItem> = board.items().to_vec();

        assert_eq!(after_once, after_twice);
        for (old, new) in before.iter().zip(&after_once) {
            if old.id == target {
                assert!(new.is_hidden);
            } else {
                assert_eq!(old, new);
            }
        }

        board.unhide(&target);
        assert!(!board.items()[1].is_hidden);
    }

    #[test]
    fn hiding_unknown_id_is_a_no_op() {
        let mut board = board_with(sample_items(0, 2));
        let before: Vec<MediaItem> = board.items().to_vec();
        board.hide("no-such-id");
        assert_eq!(board.items(), before.as_slice());
    }

    #[test]
    fn summary_counters_always_partition_the_feed() {
        let mut board = board_with(sample_items(3, 5));
        let target = board.items()[0].id.clone();
        board.hide(&target);

        let summary = board.summary();
        assert_eq!(summary.detected + summary.safe, board.items().len());
        assert_eq!(summary.detected, 3);
        assert_eq!(summary.removed, 1);
        assert!(summary.removed <= board.items().len());
    }

    #[test]
    fn visibility_toggle_never_changes_counts() {
        let mut board = board_with(sample_items(2, 4));
        let target = board.items()[2].id.clone();
        board.hide(&target);

        let before = board.summary();
        assert_eq!(board.visible().count(), 5);
        board.toggle_show_hidden();
        assert_eq!(board.visible().count(), 6);
        assert_eq!(board.summary(), before);
        board.toggle_show_hidden();
        assert_eq!(board.summary(), before);
    }

    #[test]
    fn protection_toggle_leaves_data_untouched() {
        let mut board = board_with(sample_items(2, 2));
        let before: Vec<MediaItem> = board.items().to_vec();
        board.toggle_protection();
        assert!(!board.protection_on());
        assert_eq!(board.items(), before.as_slice());
        assert_eq!(board.summary(), {
            let mut clean = board.clone();
            clean.toggle_protection();
            clean.summary()
        });
    }

    #[test]
    fn failed_refresh_leaves_prior_feed_in_place() {
        let mut board = board_with(sample_items(1, 1));
        let before: Vec<MediaItem> = board.items().to_vec();

        // Both category fetches failing means install is never called for
        // this generation; the board must be unchanged.
        let _generation = board.begin_refresh();
        assert_eq!(board.items(), before.as_slice());
    }

    #[test]
    fn stale_refresh_loses_to_the_newer_one() {
        let mut board = FeedBoard::new();
        let stale = board.begin_refresh();
        let current = board.begin_refresh();

        assert!(!board.install(stale, sample_items(0, 1)));
        assert!(board.items().is_empty());
        assert!(board.install(current, sample_items(0, 2)));
        assert_eq!(board.items().len(), 2);
        assert!(!board.is_current(stale));
    }
}
