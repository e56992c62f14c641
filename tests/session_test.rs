// Session scenarios: debounce, composition, stale results, input cap, export guard

use practice_sheet_wasm::models::{AnnotatedText, LayoutParameters};
use practice_sheet_wasm::pronunciation::Annotator;
use practice_sheet_wasm::session::{SheetSession, DEBOUNCE_MS};
use practice_sheet_wasm::text::{EditOutcome, Notice};

fn settle(session: &mut SheetSession, now: u64) -> bool {
    match session.poll(now) {
        Some(request) => {
            let annotated = Annotator::with_default_dictionary().annotate(&request.text);
            session.commit_annotation(request.generation, annotated)
        }
        None => false,
    }
}

#[test]
fn test_only_latest_value_is_annotated() {
    let mut session = SheetSession::default();
    session.edit("你", 0);
    session.edit("你好", 100);
    session.edit("你好吗", 200);
    assert_eq!(session.poll(600), None);

    let request = session.poll(200 + DEBOUNCE_MS).unwrap();
    assert_eq!(request.text, "你好吗");
    assert_eq!(request.generation, 1);
}

#[test]
fn test_composition_defers_recompute() {
    let mut session = SheetSession::default();
    session.composition_start();
    session.edit("n", 0);
    session.edit("ni", 50);
    assert!(!session.is_preview_updating());
    assert_eq!(session.poll(10_000), None);

    session.composition_end("你", 10_000);
    assert!(session.is_preview_updating());
    assert_eq!(session.poll(10_000 + DEBOUNCE_MS - 1), None);
    assert_eq!(session.poll(10_000 + DEBOUNCE_MS).unwrap().text, "你");
}

#[test]
fn test_stale_annotation_is_dropped() {
    let mut session = SheetSession::default();
    session.edit("我的书", 0);
    let old = session.poll(DEBOUNCE_MS).unwrap();

    session.edit("好", 1_000);
    let new = session.poll(1_000 + DEBOUNCE_MS).unwrap();
    assert!(new.generation > old.generation);

    let annotator = Annotator::with_default_dictionary();
    assert!(session.is_annotating());
    assert!(session.commit_annotation(new.generation, annotator.annotate(&new.text)));
    assert!(!session.commit_annotation(old.generation, annotator.annotate(&old.text)));

    assert!(session.annotation().get('的').is_none());
    assert!(session.annotation().get('好').is_some());
    assert!(!session.is_annotating());
}

#[test]
fn test_fifty_first_character_rejected_once_per_keystroke() {
    let mut session = SheetSession::default();
    let mut typed = String::new();
    let mut notices = 0;
    for i in 0..51u64 {
        typed.push('字');
        if let EditOutcome::Rejected { notice: Some(notice) } = session.edit(&typed, i * 10) {
            assert_eq!(notice, Notice::limit_reached());
            notices += 1;
        }
    }
    assert_eq!(notices, 1);
    assert_eq!(session.input().len(), 50);
    assert_eq!(session.input().counter_label(), "50 / 50 Characters");
    assert_eq!(session.notice().map(|n| n.text.as_str()), Some("50 Characters Max"));

    // A second offending keystroke raises it again
    typed.push('字');
    assert!(matches!(
        session.edit(&typed, 1_000),
        EditOutcome::Rejected { notice: Some(_) }
    ));
}

#[test]
fn test_layout_uses_applied_annotation() {
    let mut session = SheetSession::default();
    session.edit("好", 0);
    assert!(settle(&mut session, DEBOUNCE_MS));

    let layout = session.layout();
    assert_eq!(layout.page_count_label(), "1 Page");
    assert_eq!(layout.pages[0].blocks[0].header_text(), Some("hǎo, hào"));
}

#[test]
fn test_export_is_single_flight() {
    let mut session = SheetSession::new(LayoutParameters::default());
    session.edit("你好", 0);
    settle(&mut session, DEBOUNCE_MS);

    let ticket = session.begin_export().unwrap();
    assert!(session.is_exporting());
    assert_eq!(session.export_button_label(), "Generating...");
    assert!(session.begin_export().is_none());

    session.finish_export(ticket);
    assert!(!session.is_exporting());
    assert!(session.begin_export().is_some());
}

#[test]
fn test_blank_sheet_can_be_exported() {
    // Empty input still lays out one page of practice blanks
    let mut session = SheetSession::default();
    let ticket = session.begin_export().unwrap();
    assert_eq!(ticket.pages.len(), 1);
    assert!(!ticket.pages[0].has_glyphs());
}

#[test]
fn test_commit_of_empty_result_clears_annotation() {
    let mut session = SheetSession::default();
    session.edit("好", 0);
    settle(&mut session, DEBOUNCE_MS);
    session.edit("", 1_000);
    let request = session.poll(1_000 + DEBOUNCE_MS).unwrap();
    assert!(session.commit_annotation(request.generation, AnnotatedText::default()));
    assert!(session.annotation().is_empty());
}
