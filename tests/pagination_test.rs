// Pagination properties and scenarios

use practice_sheet_wasm::models::{BlockKind, GridStyle, LayoutParameters, TopSpacing, TraceOpacity};
use practice_sheet_wasm::renderers::layout_engine::{BlockMetrics, CONTENT_HEIGHT_PT};
use practice_sheet_wasm::renderers::{paginate, LayoutEngine};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn hanzi() -> impl Strategy<Value = char> {
    (0x4E00u32..=0x9FFF).prop_map(|cp| char::from_u32(cp).unwrap_or('一'))
}

fn params() -> impl Strategy<Value = LayoutParameters> {
    (
        0u8..=10,
        1u8..=5,
        any::<bool>(),
        prop_oneof![
            Just(GridStyle::DiamondGuide),
            Just(GridStyle::SquareGuide),
            Just(GridStyle::Blank)
        ],
        prop_oneof![
            Just(TopSpacing::Small),
            Just(TopSpacing::Medium),
            Just(TopSpacing::Large)
        ],
        prop_oneof![
            Just(TraceOpacity::Low),
            Just(TraceOpacity::Medium),
            Just(TraceOpacity::High)
        ],
    )
        .prop_map(|(trace_count, rows, header, grid, spacing, opacity)| LayoutParameters {
            trace_count,
            rows_per_character: rows,
            show_pronunciation_header: header,
            grid_style: grid,
            top_spacing: spacing,
            trace_opacity: opacity,
        })
}

proptest! {
    #[test]
    fn prop_characters_kept_in_order(chars in prop::collection::vec(hanzi(), 0..60), params in params()) {
        let pages = paginate(&chars, &BTreeMap::new(), &params);
        let laid_out: Vec<char> = pages.iter().flat_map(|p| p.characters()).collect();
        prop_assert_eq!(laid_out, chars);
    }

    #[test]
    fn prop_pages_respect_height_budget(chars in prop::collection::vec(hanzi(), 0..60), params in params()) {
        let metrics = BlockMetrics::from_params(&params);
        let pages = paginate(&chars, &BTreeMap::new(), &params);
        for page in &pages {
            prop_assert!(!page.is_empty());
            let used = page.len() as f64 * metrics.block_height;
            prop_assert!(used <= CONTENT_HEIGHT_PT + 1e-9 || page.len() == 1,
                "page of {} blocks uses {}pt", page.len(), used);
        }
    }

    #[test]
    fn prop_pagination_is_deterministic(chars in prop::collection::vec(hanzi(), 0..30), params in params()) {
        let first = paginate(&chars, &BTreeMap::new(), &params);
        let second = paginate(&chars, &BTreeMap::new(), &params);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_blanks_only_pad_the_last_page(chars in prop::collection::vec(hanzi(), 1..60), params in params()) {
        let pages = paginate(&chars, &BTreeMap::new(), &params);
        for page in &pages[..pages.len() - 1] {
            prop_assert!(page.blocks.iter().all(|b| b.kind == BlockKind::Character));
        }
    }
}

#[test]
fn test_empty_input_is_one_page_of_blanks() {
    for spacing in [TopSpacing::Small, TopSpacing::Medium, TopSpacing::Large] {
        let params = LayoutParameters {
            top_spacing: spacing,
            ..LayoutParameters::default()
        };
        let metrics = BlockMetrics::from_params(&params);
        let pages = paginate(&[], &BTreeMap::new(), &params);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].blocks.iter().all(|b| b.kind == BlockKind::Blank));
        assert_eq!(
            pages[0].len(),
            (CONTENT_HEIGHT_PT / metrics.block_height).floor() as usize
        );
    }
}

#[test]
fn test_ni_hao_default_params() {
    let chars: Vec<char> = "你好".chars().collect();
    let layout = LayoutEngine::new().compute_layout(&chars, &BTreeMap::new(), &LayoutParameters::default());
    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.page_count_label(), "1 Page");

    let blocks = &layout.pages[0].blocks;
    assert_eq!(blocks.len(), 6);
    assert_eq!(blocks[0].glyph(), Some('你'));
    assert_eq!(blocks[1].glyph(), Some('好'));
    assert!(blocks[2..].iter().all(|b| b.kind == BlockKind::Blank));
    assert_eq!(blocks[0].key.to_string(), "char-你-0");
    assert_eq!(blocks[2].key.to_string(), "empty-0-0");
}

#[test]
fn test_seventh_character_starts_a_new_page() {
    let chars: Vec<char> = "一二三四五六七".chars().collect();
    let layout = LayoutEngine::new().compute_layout(&chars, &BTreeMap::new(), &LayoutParameters::default());
    assert_eq!(layout.page_count_label(), "2 Pages");
    assert_eq!(layout.pages[0].len(), 6);
    assert_eq!(layout.pages[1].blocks[0].glyph(), Some('七'));
    assert_eq!(layout.pages[1].len(), 6);
}

#[test]
fn test_oversized_block_gets_its_own_page() {
    let engine = LayoutEngine::with_content_height(50.0);
    let chars: Vec<char> = "你好".chars().collect();
    let layout = engine.compute_layout(&chars, &BTreeMap::new(), &LayoutParameters::default());
    assert_eq!(layout.page_count(), 2);
    assert!(layout.pages.iter().all(|p| p.len() == 1));
}

#[test]
fn test_non_hanzi_are_skipped() {
    let chars: Vec<char> = "a你,好1".chars().collect();
    let pages = paginate(&chars, &BTreeMap::new(), &LayoutParameters::default());
    let laid_out: String = pages.iter().flat_map(|p| p.characters()).collect();
    assert_eq!(laid_out, "你好");
}
