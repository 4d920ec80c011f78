//! Filter engine tests
//!
//! Language derivation and name/language filtering over voice catalogs

mod common;

use common::{ava_milena, sample_voices, voice};
use voice_selector::catalog::{filtered, languages, FilterCriteria, LanguageFilter, Voice};

fn catalogs() -> Vec<Vec<Voice>> {
    vec![
        Vec::new(),
        ava_milena(),
        sample_voices(),
        vec![voice("Zed", "en-US"), voice("Zed Two", "en-US")],
    ]
}

fn queries() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::default(),
        FilterCriteria::new("a", LanguageFilter::All),
        FilterCriteria::new("AM", LanguageFilter::All),
        FilterCriteria::new("", LanguageFilter::Only("en-US".into())),
        FilterCriteria::new("x", LanguageFilter::Only("fr-FR".into())),
        FilterCriteria::new("", LanguageFilter::Only("xx-XX".into())),
    ]
}

/// `sub` appears in `all` in the same relative order
fn is_subsequence(sub: &[&Voice], all: &[Voice]) -> bool {
    let mut rest = all.iter();
    sub.iter().all(|wanted| rest.any(|v| v == *wanted))
}

#[test]
fn test_filtered_is_ordered_subsequence() {
    for catalog in catalogs() {
        for criteria in queries() {
            let result = filtered(&catalog, &criteria);
            assert!(
                is_subsequence(&result, &catalog),
                "{:?} is not a subsequence for {:?}",
                result,
                criteria
            );
        }
    }
}

#[test]
fn test_empty_criteria_keeps_everything() {
    for catalog in catalogs() {
        let result: Vec<Voice> = filtered(&catalog, &FilterCriteria::default())
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(result, catalog);
    }
}

#[test]
fn test_languages_sorted_and_distinct() {
    for catalog in catalogs() {
        let langs = languages(&catalog);
        assert!(langs.windows(2).all(|pair| pair[0] < pair[1]), "{:?}", langs);
        for v in &catalog {
            assert!(langs.contains(&v.lang));
        }
    }
}

#[test]
fn test_languages_of_sample_catalog() {
    assert_eq!(
        languages(&sample_voices()),
        vec!["de-DE", "en-GB", "en-US", "fr-CA", "fr-FR", "ru-RU"]
    );
}

#[test]
fn test_search_is_case_insensitive() {
    for catalog in catalogs() {
        let upper = filtered(&catalog, &FilterCriteria::new("AB", LanguageFilter::All));
        let lower = filtered(&catalog, &FilterCriteria::new("ab", LanguageFilter::All));
        assert_eq!(upper, lower);

        let upper = filtered(&catalog, &FilterCriteria::new("SAM", LanguageFilter::All));
        let lower = filtered(&catalog, &FilterCriteria::new("sam", LanguageFilter::All));
        assert_eq!(upper, lower);
    }
}

#[test]
fn test_ava_milena_scenario() {
    let catalog = ava_milena();

    assert_eq!(languages(&catalog), vec!["en-US", "ru-RU"]);

    // "a" matches "Ava" (case-insensitive) and "Milena" ends in "a"
    let result = filtered(&catalog, &FilterCriteria::new("a", LanguageFilter::All));
    let names: Vec<&str> = result.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Ava", "Milena"]);

    let result = filtered(&catalog, &FilterCriteria::new("av", LanguageFilter::All));
    let names: Vec<&str> = result.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Ava"]);

    let result = filtered(
        &catalog,
        &FilterCriteria::new("", LanguageFilter::Only("ru-RU".into())),
    );
    let names: Vec<&str> = result.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Milena"]);
}

#[test]
fn test_search_and_language_combine() {
    let catalog = sample_voices();
    let result = filtered(
        &catalog,
        &FilterCriteria::new("a", LanguageFilter::Only("en-US".into())),
    );
    let names: Vec<&str> = result.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Samantha", "Alex"]);
}

#[test]
fn test_unknown_language_yields_nothing() {
    let catalog = sample_voices();
    let result = filtered(
        &catalog,
        &FilterCriteria::new("", LanguageFilter::Only("xx-XX".into())),
    );
    assert!(result.is_empty());
}
