use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};
use vsm_core::persist::{load_model, save_model, IndexPaths};
use vsm_core::{build_model, load_or_build, BuildError, BuildOptions, Identity, Model, SearchEngine};

/// Three speeches with title lines, plus a stopword list.
fn economy_corpus() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("speech");
    fs::create_dir(&corpus).unwrap();
    fs::write(corpus.join("speech_0.txt"), "Growth\nThe economy grew steadily\n").unwrap();
    fs::write(corpus.join("speech_1.txt"), "People\nThe economy and the people\n").unwrap();
    fs::write(corpus.join("speech_2.txt"), "Weather\nWeather was mild today\n").unwrap();
    let stop = dir.path().join("stopword_list.txt");
    fs::write(&stop, "the and\nwas\n").unwrap();
    (dir, corpus, stop)
}

fn build(corpus: &Path, stop: &Path, block: usize) -> Model {
    build_model(corpus, stop, &Identity, BuildOptions { column_block: block }).unwrap()
}

fn engine(model: Model) -> SearchEngine {
    SearchEngine::new(model, Box::new(Identity))
}

#[test]
fn economy_scenario() {
    let (_dir, corpus, stop) = economy_corpus();
    let model = build(&corpus, &stop, 7000);
    assert_eq!(model.num_docs(), 3);
    // economy grew steadily people weather mild today
    assert_eq!(model.vocabulary().len(), 7);
    assert_eq!(model.vocabulary().get("economy"), Some(0));
    assert_eq!(model.vocabulary().get("the"), None);

    let hits = engine(model).calculate("economy", 0.0);
    let ids: Vec<u32> = hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, vec![1, 0, 2]);
    assert!(hits[0].score > hits[1].score);
    assert!(hits[1].score > 0.0);
    assert_eq!(hits[2].score, 0.0);

    // idf(economy) = log10(3/2), idf(other) = log10(3)
    let e = 1.5f64.log10();
    let o = 3f64.log10();
    let doc1 = e / (e * e + o * o).sqrt();
    let doc0 = e / (e * e + 2.0 * o * o).sqrt();
    assert!((hits[0].score - doc1).abs() < 1e-12);
    assert!((hits[1].score - doc0).abs() < 1e-12);
}

#[test]
fn positive_threshold_drops_non_matching_documents() {
    let (_dir, corpus, stop) = economy_corpus();
    let hits = engine(build(&corpus, &stop, 7000)).calculate("economy", 0.0005);
    let ids: Vec<u32> = hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, vec![1, 0]);
}

#[test]
fn degenerate_queries_return_nothing() {
    let (_dir, corpus, stop) = economy_corpus();
    let engine = engine(build(&corpus, &stop, 7000));
    for threshold in [0.0, 0.5, 1.0] {
        assert!(engine.calculate("", threshold).is_empty());
        assert!(engine.calculate("   ", threshold).is_empty());
        assert!(engine.calculate("xyzzy", threshold).is_empty());
        // stopwords never made it into the vocabulary
        assert!(engine.calculate("the and was", threshold).is_empty());
    }
}

#[test]
fn threshold_filtering_is_monotonic() {
    let (_dir, corpus, stop) = economy_corpus();
    let engine = engine(build(&corpus, &stop, 7000));
    let thresholds = [0.0, 0.1, 0.2, 0.4, 0.8, 1.0];
    for pair in thresholds.windows(2) {
        let low: Vec<u32> = engine.calculate("economy weather mild", pair[0]).iter().map(|h| h.doc_id).collect();
        let high: Vec<u32> = engine.calculate("economy weather mild", pair[1]).iter().map(|h| h.doc_id).collect();
        assert!(high.iter().all(|d| low.contains(d)), "{high:?} not within {low:?}");
    }
}

#[test]
fn ties_keep_document_order() {
    let dir = tempdir().unwrap();
    let corpus = dir.path().join("c");
    fs::create_dir(&corpus).unwrap();
    for (i, body) in ["apple pie", "zebra", "apple pie", "apple pie"].iter().enumerate() {
        fs::write(corpus.join(format!("doc{i}.txt")), format!("title\n{body}\n")).unwrap();
    }
    let stop = dir.path().join("stop.txt");
    fs::write(&stop, "").unwrap();

    let hits = engine(build(&corpus, &stop, 7000)).calculate("apple", 0.0);
    let ids: Vec<u32> = hits.iter().map(|h| h.doc_id).collect();
    assert_eq!(ids, vec![0, 2, 3, 1]);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn small_blocks_match_large_blocks() {
    let (_dir, corpus, stop) = economy_corpus();
    assert_eq!(build(&corpus, &stop, 1), build(&corpus, &stop, 7000));
}

#[test]
fn rebuilds_are_identical() {
    let (dir, corpus, stop) = economy_corpus();
    let a = IndexPaths::new(dir.path().join("a"));
    let b = IndexPaths::new(dir.path().join("b"));
    save_model(&a, &build(&corpus, &stop, 7000), &Identity).unwrap();
    save_model(&b, &build(&corpus, &stop, 7000), &Identity).unwrap();
    assert_eq!(fs::read(a.matrix()).unwrap(), fs::read(b.matrix()).unwrap());
    assert_eq!(fs::read(a.idf()).unwrap(), fs::read(b.idf()).unwrap());
    assert_eq!(fs::read(a.vocabulary()).unwrap(), fs::read(b.vocabulary()).unwrap());
}

#[test]
fn counts_are_non_negative_integers() {
    let (_dir, corpus, stop) = economy_corpus();
    let model = build(&corpus, &stop, 2);
    let m = model.matrix();
    for d in 0..m.rows() as u32 {
        for &v in m.row(d) {
            assert!(v >= 0.0 && v.fract() == 0.0);
        }
    }
}

#[test]
fn load_or_build_persists_then_reuses() {
    let (dir, corpus, stop) = economy_corpus();
    let paths = IndexPaths::new(dir.path().join("files"));
    let built = load_or_build(&paths, &corpus, &stop, &Identity, BuildOptions::default()).unwrap();
    assert!(paths.is_complete());
    assert_eq!(load_model(&paths).as_ref(), Some(&built));

    // The corpus is no longer consulted once the artifacts exist.
    fs::remove_dir_all(&corpus).unwrap();
    let loaded = load_or_build(&paths, &corpus, &stop, &Identity, BuildOptions::default()).unwrap();
    assert_eq!(loaded, built);

    // A partial artifact set forces a rebuild, which now fails on the missing corpus.
    fs::remove_file(paths.idf()).unwrap();
    let err = load_or_build(&paths, &corpus, &stop, &Identity, BuildOptions::default()).unwrap_err();
    assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::MissingCorpus(_))));
}

#[test]
fn missing_stopwords_abort_the_build() {
    let (dir, corpus, _stop) = economy_corpus();
    let err = build_model(&corpus, &dir.path().join("none.txt"), &Identity, BuildOptions::default()).unwrap_err();
    assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::MissingStopwords(_))));
}

#[test]
fn unreadable_document_aborts_the_build() {
    let (_dir, corpus, stop) = economy_corpus();
    fs::write(corpus.join("speech_3.txt"), [0xffu8, 0xfe, 0x00, 0x80]).unwrap();
    let err = build_model(&corpus, &stop, &Identity, BuildOptions::default()).unwrap_err();
    assert!(matches!(err.downcast_ref::<BuildError>(), Some(BuildError::UnreadableDocument { .. })));
}

// Query tokens are not checked against the stopword list while document tokens
// are. A stopword can only score if it entered the vocabulary some other way,
// which it cannot, so such queries stay empty. Confirm before changing.
#[test]
fn query_side_stopwords_are_not_filtered() {
    let (_dir, corpus, stop) = economy_corpus();
    let engine = engine(build(&corpus, &stop, 7000));
    let with_stop = engine.calculate("the economy", 0.0);
    let without = engine.calculate("economy", 0.0);
    assert_eq!(with_stop, without);
}
