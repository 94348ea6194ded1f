//! Built-in file catalog.
//!
//! Serves two purposes: it *is* the backend in mock mode, and it is the
//! fallback data source when the real backend cannot be reached after the
//! retry budget is spent. Everything here is pure and deterministic — the
//! same query always returns the same page.

use once_cell::sync::Lazy;

use crate::api::{FileCategory, FileCounts, FileEntry, FilePage, IdentityRequest, Pagination, UserStatus};
use crate::config::pagination::{FILES_PER_PAGE, MAX_PAGES};

fn entry(
    file_id: u64,
    name: &str,
    description: &str,
    file_type: FileCategory,
    file_size: u64,
    created_at: &str,
    download_count: u32,
) -> FileEntry {
    FileEntry {
        file_id,
        name: name.to_string(),
        description: description.to_string(),
        file_type,
        file_size,
        created_at: created_at.to_string(),
        download_count,
    }
}

/// The fixed catalog: 8 free and 10 premium entries. The per-tier sizes
/// back the counts reported by [`counts`], so the home-screen numbers and
/// the browsable lists cannot drift apart.
static CATALOG: Lazy<Vec<FileEntry>> = Lazy::new(|| {
    use FileCategory::{Free, Premium};
    vec![
        entry(1, "Free Beat Pack Vol.1", "High-quality free beats for your productions", Free, 15_728_640, "2025-08-20", 245),
        entry(2, "Free VST Presets Collection", "Collection of free synthesizer presets", Free, 8_388_608, "2025-08-19", 189),
        entry(3, "Free Drum Samples Pack", "Essential drum samples for hip-hop and trap", Free, 12_582_912, "2025-08-18", 312),
        entry(4, "Free Melody Loops Starter", "Catchy melody loops to inspire your tracks", Free, 9_437_184, "2025-08-17", 156),
        entry(5, "Free Bass Samples", "808s and bass sounds for modern production", Free, 7_340_032, "2025-08-16", 278),
        entry(6, "Free Vocal Chops Pack", "Processed vocal samples for creative use", Free, 11_534_336, "2025-08-15", 203),
        entry(7, "Free Lo-Fi Drum Loops", "Dusty drum loops for lo-fi and chillhop", Free, 10_485_760, "2025-08-14", 167),
        entry(8, "Free Ambient Textures", "Atmospheric pads and textures for intros", Free, 13_631_488, "2025-08-13", 134),
        entry(9, "Premium Drum Kit Deluxe", "Exclusive premium drum samples with stems", Premium, 52_428_800, "2025-08-20", 89),
        entry(10, "Premium Melody Loops Pro", "Professional melody loops with MIDI files", Premium, 31_457_280, "2025-08-19", 67),
        entry(11, "Premium Vocal Pack Elite", "High-quality vocal samples and harmonies", Premium, 45_088_768, "2025-08-18", 45),
        entry(12, "Premium Synth Presets Bundle", "Exclusive synthesizer presets for all genres", Premium, 18_874_368, "2025-08-17", 78),
        entry(13, "Premium Construction Kit", "Complete song construction with all elements", Premium, 67_108_864, "2025-08-16", 34),
        entry(14, "Premium FX & Transitions", "Professional sound effects and transitions", Premium, 23_068_672, "2025-08-15", 56),
        entry(15, "Premium Guitar Licks", "Live-recorded guitar phrases with stems", Premium, 27_262_976, "2025-08-14", 41),
        entry(16, "Premium 808 Bass Kit", "Tuned 808s with glide presets and MIDI", Premium, 20_971_520, "2025-08-13", 62),
        entry(17, "Premium Ambient Keys", "Cinematic keys and pads with macro controls", Premium, 35_651_584, "2025-08-12", 29),
        entry(18, "Premium Percussion Loops", "Organic percussion loops with drum one-shots", Premium, 16_777_216, "2025-08-11", 53),
    ]
});

/// Looks up a catalog entry by id.
pub fn find(file_id: u64) -> Option<&'static FileEntry> {
    CATALOG.iter().find(|f| f.file_id == file_id)
}

/// Per-tier catalog sizes, derived from the catalog itself.
pub fn counts() -> FileCounts {
    let free_count = CATALOG.iter().filter(|f| f.file_type == FileCategory::Free).count() as u32;
    let premium_count = CATALOG.len() as u32 - free_count;
    FileCounts {
        free_count,
        premium_count,
    }
}

/// Returns one page of the catalog for a tier.
///
/// `page` is 1-based; values below 1 are clamped to 1 and values above
/// `MAX_PAGES` to `MAX_PAGES`. `search` is matched case-insensitively
/// against both name and description. A page past the end of the result
/// set yields an empty file list with `has_next = false` (but `has_prev`
/// still reflects the page number, so the UI can offer a way back).
pub fn query(category: FileCategory, page: u32, search: &str) -> FilePage {
    let page = page.clamp(1, MAX_PAGES);
    let needle = search.trim().to_lowercase();

    let matches: Vec<&FileEntry> = CATALOG
        .iter()
        .filter(|f| f.file_type == category)
        .filter(|f| {
            needle.is_empty()
                || f.name.to_lowercase().contains(&needle)
                || f.description.to_lowercase().contains(&needle)
        })
        .collect();

    let total_files = matches.len() as u32;
    let total_pages = total_files.div_ceil(FILES_PER_PAGE);
    let start = ((page - 1) * FILES_PER_PAGE) as usize;

    let files: Vec<FileEntry> = matches
        .into_iter()
        .skip(start)
        .take(FILES_PER_PAGE as usize)
        .cloned()
        .collect();

    FilePage {
        files,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_files,
            files_per_page: FILES_PER_PAGE,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
    }
}

/// Fallback account status used in mock mode and in degraded mode.
///
/// Keeps whatever identity the Telegram bridge supplied and fills the
/// rest with the free-tier defaults (3 premium downloads available).
pub fn fallback_user_status(identity: &IdentityRequest) -> UserStatus {
    UserStatus {
        user_id: identity.user_id.unwrap_or(123_456_789),
        username: identity.username.clone().unwrap_or_else(|| "testuser".to_string()),
        is_premium: false,
        premium_downloads_used: 0,
        premium_downloads_remaining: 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_match_catalog_contents() {
        let counts = counts();
        assert_eq!(counts.free_count, 8);
        assert_eq!(counts.premium_count, 10);
        assert_eq!(counts.total(), 18);
    }

    #[test]
    fn free_tier_paginates_8_items_over_2_pages() {
        let page1 = query(FileCategory::Free, 1, "");
        assert_eq!(page1.files.len(), 6);
        assert_eq!(page1.pagination.total_pages, 2);
        assert_eq!(page1.pagination.total_files, 8);
        assert!(page1.pagination.has_next);
        assert!(!page1.pagination.has_prev);

        let page2 = query(FileCategory::Free, 2, "");
        assert_eq!(page2.files.len(), 2);
        assert!(!page2.pagination.has_next);
        assert!(page2.pagination.has_prev);
    }

    #[test]
    fn out_of_range_page_is_empty_without_next() {
        let page3 = query(FileCategory::Free, 3, "");
        assert!(page3.files.is_empty());
        assert!(!page3.pagination.has_next);
        assert!(page3.pagination.has_prev);
    }

    #[test]
    fn page_below_one_is_clamped() {
        let page = query(FileCategory::Premium, 0, "");
        assert_eq!(page.pagination.current_page, 1);
        assert_eq!(page.files.len(), 6);
    }

    #[test]
    fn search_matches_name_and_description_case_insensitively() {
        let result = query(FileCategory::Free, 1, "DRUM");
        assert!(!result.files.is_empty());
        for file in &result.files {
            let name = file.name.to_lowercase();
            let desc = file.description.to_lowercase();
            assert!(
                name.contains("drum") || desc.contains("drum"),
                "unexpected match: {}",
                file.name
            );
        }
        // "Free Drum Samples Pack" and "Free Lo-Fi Drum Loops"
        assert_eq!(result.pagination.total_files, 2);
    }

    #[test]
    fn search_with_no_matches_yields_empty_page() {
        let result = query(FileCategory::Premium, 1, "banjo");
        assert!(result.files.is_empty());
        assert_eq!(result.pagination.total_pages, 0);
        assert!(!result.pagination.has_next);
    }

    #[test]
    fn queries_are_deterministic() {
        let a = query(FileCategory::Premium, 2, "");
        let b = query(FileCategory::Premium, 2, "");
        assert_eq!(a, b);
    }

    #[test]
    fn fallback_status_keeps_bridge_identity() {
        let identity = IdentityRequest {
            user_id: Some(42),
            username: Some("producer".to_string()),
            ..Default::default()
        };
        let status = fallback_user_status(&identity);
        assert_eq!(status.user_id, 42);
        assert_eq!(status.username, "producer");
        assert!(!status.is_premium);
        assert_eq!(status.premium_downloads_remaining, 3);

        let anon = fallback_user_status(&IdentityRequest::default());
        assert_eq!(anon.user_id, 123_456_789);
        assert_eq!(anon.username, "testuser");
    }
}
