use vsm_core::tokenizer::{index_terms, query_terms, EnglishStemmer};
use vsm_core::StopwordSet;

#[test]
fn it_normalizes_and_stems() {
    let stop = StopwordSet::default();
    let stemmer = EnglishStemmer::new();
    let words: Vec<String> = index_terms("Running Runners RUN! The café's menu.", &stemmer, &stop).collect();
    assert!(words.contains(&"run".to_string()));
    assert!(words.contains(&"menu".to_string()));
    assert!(!words.iter().any(|w| w.is_empty()));
}

#[test]
fn it_filters_stopwords_at_index_time_only() {
    let stop = StopwordSet::parse("the and");
    let stemmer = EnglishStemmer::new();
    let indexed: Vec<String> = index_terms("The quick brown fox and the lazy dog", &stemmer, &stop).collect();
    assert!(!indexed.contains(&"the".to_string()));
    assert!(!indexed.contains(&"and".to_string()));

    let queried: Vec<String> = query_terms("The quick fox", &stemmer).collect();
    assert_eq!(queried[0], "the");
}
