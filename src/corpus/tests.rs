use super::*;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use crate::corpus::cache::Cached;
use crate::corpus::mock::{mock_arabic, mock_audio_url, mock_english, MockSource};
use crate::reference::{first_verse, last_verse, next};
use crate::settings::DataPaths;

fn at(chapter: u16, verse: u16) -> Reference {
    Reference::new(chapter, verse)
}

#[test]
fn verse_joins_text_and_translation() {
    let corpus = Corpus::new(MockSource::new());
    let verse = corpus.verse(at(2, 255)).unwrap().unwrap();
    assert_eq!(verse.arabic, mock_arabic(at(2, 255)));
    assert_eq!(verse.english, mock_english(at(2, 255)));
    assert_eq!((verse.chapter(), verse.verse()), (2, 255));
}

#[test]
fn missing_translation_is_empty() {
    let corpus = Corpus::new(MockSource::new().without_translation(at(1, 1)));
    let verse = corpus.verse(at(1, 1)).unwrap().unwrap();
    assert_eq!(verse.arabic, mock_arabic(at(1, 1)));
    assert_eq!(verse.english, "");
}

#[test]
fn missing_arabic_is_absent() {
    let corpus = Corpus::new(MockSource::new().without_arabic(at(1, 2)));
    assert_eq!(corpus.verse(at(1, 2)).unwrap(), None);
    assert_eq!(corpus.verse(at(2, 300)).unwrap(), None);
    assert!(corpus.verses(&[at(1, 1), at(1, 2)]).unwrap().is_none());
    assert_eq!(corpus.verses(&[at(1, 1), at(1, 3)]).unwrap().unwrap().len(), 2);
}

#[test]
fn each_source_is_fetched_once() {
    let source = MockSource::new();
    let corpus = Corpus::new(source.clone());
    assert!(!corpus.is_loaded(Resource::ArabicText));
    for verse in 1..=7 {
        corpus.verse(at(1, verse)).unwrap();
    }
    let copy = corpus.clone();
    copy.verse(at(2, 1)).unwrap();
    assert!(corpus.is_loaded(Resource::ArabicText));
    assert_eq!(source.fetch_count(Resource::ArabicText), 1);
    assert_eq!(source.fetch_count(Resource::Translation), 1);
    assert_eq!(source.fetch_count(Resource::Timestamps), 0);
}

#[test]
fn failed_load_is_retried() {
    let source = MockSource::new();
    source.fail(Resource::Translation);
    let corpus = Corpus::new(source.clone());
    match corpus.verse(at(1, 1)) {
        Err(Error::DataLoad { resource, .. }) => assert_eq!(resource, Resource::Translation),
        other => panic!("unexpected result {:?}", other),
    }
    assert!(!corpus.is_loaded(Resource::Translation));

    source.recover(Resource::Translation);
    assert!(corpus.verse(at(1, 1)).unwrap().is_some());
    assert_eq!(source.fetch_count(Resource::Translation), 2);
    assert_eq!(source.fetch_count(Resource::ArabicText), 1);
}

#[test]
fn concurrent_loads_share_one_fetch() {
    let source = MockSource::new().with_fetch_delay(Duration::from_millis(50));
    let corpus = Corpus::new(source.clone());
    let handles: Vec<_> = (1..=8)
        .map(|verse| {
            let corpus = corpus.clone();
            thread::spawn(move || corpus.verse(at(1, verse % 7 + 1)).unwrap())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().is_some());
    }
    assert_eq!(source.fetch_count(Resource::ArabicText), 1);
    assert_eq!(source.fetch_count(Resource::Translation), 1);
}

#[test]
fn concurrent_callers_share_a_failed_load() {
    let source = MockSource::new().with_fetch_delay(Duration::from_millis(100));
    source.fail(Resource::Sections);
    let corpus = Corpus::new(source.clone());
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let corpus = corpus.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                corpus.sections().map(|sections| sections.len())
            })
        })
        .collect();
    for handle in handles {
        match handle.join().unwrap() {
            Err(Error::DataLoad { resource, cause }) => {
                assert_eq!(resource, Resource::Sections);
                assert!(cause.to_string().contains("unavailable"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
    assert_eq!(source.fetch_count(Resource::Sections), 1);

    assert!(corpus.sections().is_err());
    assert_eq!(source.fetch_count(Resource::Sections), 2);
    source.recover(Resource::Sections);
    assert_eq!(corpus.sections().unwrap().len(), 30);
    assert_eq!(source.fetch_count(Resource::Sections), 3);
}

#[test]
fn panicking_loader_does_not_block_later_loads() {
    let cache: Cached<u32> = Cached::new();
    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        cache.get_or_load(|| -> anyhow::Result<u32> { panic!("loader crashed") })
    }));
    assert!(unwound.is_err());
    assert!(!cache.is_loaded());
    assert_eq!(*cache.get_or_load(|| -> anyhow::Result<u32> { Ok(5) }).unwrap(), 5);
    assert!(cache.is_loaded());
}

#[test]
fn preload_fetches_text_and_sections() {
    let source = MockSource::new();
    let corpus = Corpus::new(source.clone());
    corpus.preload().unwrap();
    assert!(corpus.is_loaded(Resource::ArabicText));
    assert!(corpus.is_loaded(Resource::Translation));
    assert!(corpus.is_loaded(Resource::Sections));
    assert!(!corpus.is_loaded(Resource::AudioSources));
}

#[test]
fn juz_boundaries() {
    let corpus = Corpus::new(MockSource::new());
    let first = corpus.section_range(1).unwrap();
    assert_eq!((first.start, first.end), (at(1, 1), at(2, 141)));
    let last = corpus.section_range(30).unwrap();
    assert_eq!((last.start, last.end), (at(78, 1), Reference::LAST));

    let sections = corpus.sections().unwrap();
    assert_eq!(sections.len(), 30);
    for pair in sections.windows(2) {
        assert_eq!(next(pair[0].end), Some(pair[1].start));
    }

    assert!(matches!(corpus.section_range(0), Err(Error::NotFound(_))));
    assert!(matches!(corpus.section_range(31), Err(Error::NotFound(_))));
}

#[test]
fn audio_needs_url_and_timestamp() {
    let source = MockSource::new()
        .with_recitation(at(2, 5))
        .with_timestamp_only(at(3, 3));
    let corpus = Corpus::new(source);
    let segment = corpus.audio_segment(at(2, 5)).unwrap().unwrap();
    assert_eq!(segment.audio_url, mock_audio_url(2));
    assert_eq!((segment.start_millis, segment.end_millis), (50_000, 59_000));
    assert_eq!(corpus.audio_segment(at(2, 6)).unwrap(), None);
    assert_eq!(corpus.audio_segment(at(3, 3)).unwrap(), None);
}

#[test]
fn random_reference_stays_in_scope() {
    let corpus = Corpus::new(MockSource::new());
    let mut rng = StdRng::seed_from_u64(3);
    let surah = Scope::Chapter(36).resolve(None, &corpus).unwrap();
    assert_eq!((surah.start, surah.end), (first_verse(36), last_verse(36)));
    for _ in 0..200 {
        let reference = corpus
            .random_reference(Scope::Chapter(36), None, &mut rng)
            .unwrap();
        assert!(surah.contains(reference));

        let reference = corpus
            .random_reference(Scope::Section(1), None, &mut rng)
            .unwrap();
        assert!(at(1, 1) <= reference && reference <= at(2, 141));

        let reference = corpus
            .random_reference(Scope::Chapter(2), Some(SubRange::new(250, 260)), &mut rng)
            .unwrap();
        assert!(at(2, 250) <= reference && reference <= at(2, 260));
    }
}

#[test]
fn random_reference_reaches_every_verse() {
    let corpus = Corpus::new(MockSource::new());
    let mut rng = StdRng::seed_from_u64(5);
    let seen: HashSet<Reference> = (0..300)
        .map(|_| corpus.random_reference(Scope::Chapter(1), None, &mut rng).unwrap())
        .collect();
    assert_eq!(seen.len(), 7);

    let span = Scope::Section(30).resolve(None, &corpus).unwrap();
    let seen: HashSet<u16> = (0..2000).map(|_| span.choose(&mut rng).chapter).collect();
    assert!(seen.contains(&78));
    assert!(seen.contains(&114));
    assert!(seen.iter().all(|c| (78..=114).contains(c)));
}

#[test]
fn ayah_range_is_clamped_to_surah() {
    let corpus = Corpus::new(MockSource::new());
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let reference = corpus
            .random_reference(Scope::Chapter(1), Some(SubRange::new(6, 40)), &mut rng)
            .unwrap();
        assert!(reference == at(1, 6) || reference == at(1, 7));
    }
}

#[test]
fn malformed_documents_are_rejected() {
    assert!(tables::parse_arabic("not json").is_err());
    assert!(tables::parse_arabic(r#"{"1:2": {"surah": 1, "ayah": 3, "text": "x"}}"#).is_err());
    assert!(tables::parse_translation(r#"{"one": {"t": "x"}}"#).is_err());
    assert!(tables::parse_sections("juz,a,b,c,d\n1,2,10,2,5").is_err());
    assert!(tables::parse_audio_sources(r#"{"115": {"audio_url": "x"}}"#).is_err());

    let sections = tables::parse_sections("juz,a,b,c,d\n2, 2,142, 2,252\n1,1,1,2,141\n").unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].number, 1);
    assert_eq!(sections[1].start, at(2, 142));
}

#[test]
fn reads_data_directory() {
    let dir = std::env::temp_dir().join(format!("hifz-quiz-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let paths = DataPaths::in_directory(&dir);
    fs::write(
        &paths.arabic_text,
        r#"{"1:1": {"id": 1, "verse_key": "1:1", "surah": 1, "ayah": 1, "text": "bismillah"}}"#,
    )
    .unwrap();
    fs::write(&paths.translation, r#"{"1:1": {"t": "In the name of Allah"}}"#).unwrap();

    let corpus = Corpus::new(FileSource::new(paths));
    let verse = corpus.verse(at(1, 1)).unwrap().unwrap();
    assert_eq!(verse.arabic, "bismillah");
    assert_eq!(verse.english, "In the name of Allah");
    match corpus.sections() {
        Err(Error::DataLoad { resource, .. }) => assert_eq!(resource, Resource::Sections),
        other => panic!("unexpected result {:?}", other),
    }

    fs::remove_dir_all(&dir).unwrap();
}
