use email_features::*;

fn only(configure: fn(NormalizationConfigBuilder) -> NormalizationConfigBuilder) -> Normalizer {
    let builder = NormalizationConfig::builder()
        .lower_case(false)
        .remove_punctuation(false)
        .replace_urls(false)
        .replace_numbers(false)
        .remove_stopwords(false)
        .stemming(false);
    Normalizer::new(configure(builder).build().unwrap())
}

// --- End to end ---

#[test]
fn test_spam_body_end_to_end() {
    let raw = b"From: promo@example.com\r\n\
                Subject: Deal\r\n\
                \r\n\
                Buy NOW! Visit http://x.com, price $100.00";
    let message = extract_message(raw).unwrap();
    let config = NormalizationConfig::builder()
        .lower_case(true)
        .replace_urls(true)
        .replace_numbers(true)
        .remove_punctuation(true)
        .stemming(true)
        .build()
        .unwrap();

    let tokens = Normalizer::new(config).normalize_message(&message);

    assert!(tokens.get("url") >= 1);
    assert!(tokens.get("number") >= 1);
    assert!(tokens.iter().all(|(word, _)| !word.contains("100")));
    assert!(tokens.iter().all(|(word, _)| !word.contains("x.com")));
    assert_eq!(tokens.get("now"), 1);
}

#[test]
fn test_batch_normalize_preserves_order() {
    let first = extract_message(b"Subject: a\r\n\r\nalpha alpha").unwrap();
    let second = extract_message(b"Subject: b\r\n\r\nbeta").unwrap();

    let docs = normalize(&[first, second], &NormalizationConfig::default());

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].get("alpha"), 2);
    assert_eq!(docs[1].get("beta"), 1);
}

#[test]
fn test_message_without_body_is_empty() {
    let raw = b"Content-Type: multipart/mixed; boundary=\"B\"\r\n\
\r\n\
--B\r\n\
Content-Type: image/gif\r\n\
\r\n\
GIF89a\r\n\
--B--\r\n";
    let message = extract_message(raw).unwrap();

    let tokens = Normalizer::default().normalize_message(&message);

    assert!(tokens.is_empty());
    assert!(Normalizer::default().normalize_text("").is_empty());
}

// --- URL replacement ---

#[test]
fn test_nested_urls_fully_replaced() {
    let normalizer = only(|b| b.replace_urls(true));

    let tokens = normalizer.normalize_text("see http://a.com/x and http://a.com");

    assert_eq!(tokens.get("URL"), 2);
    assert_eq!(tokens.get("see"), 1);
    assert_eq!(tokens.get("and"), 1);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_find_urls_longest_first() {
    let urls = find_urls("http://a.com then http://a.com/x/y, www.b.org.");

    assert_eq!(urls, vec!["http://a.com/x/y", "http://a.com", "www.b.org"]);
}

#[test]
fn test_find_urls_deduplicates() {
    let urls = find_urls("http://a.com http://a.com http://a.com");

    assert_eq!(urls, vec!["http://a.com"]);
    assert_eq!(replace_urls("go http://a.com now"), "go  URL  now");
}

#[test]
fn test_find_urls_bare_domains() {
    let urls = find_urls("order at cheap-pills.biz/buy or Mail.Example.co.uk today");

    assert_eq!(urls, vec!["cheap-pills.biz/buy", "Mail.Example.co.uk"]);
    assert_eq!(replace_urls("go cheap-pills.biz/buy now"), "go  URL  now");
}

#[test]
fn test_find_urls_ignores_versions_files_and_addresses() {
    assert!(find_urls("version 3.5 of file.txt, e.g. this").is_empty());
    assert!(find_urls("write to sales@example.com").is_empty());
}

// --- Numbers and punctuation ---

#[test]
fn test_numbers_replaced() {
    let normalizer = only(|b| b.replace_numbers(true));

    let tokens = normalizer.normalize_text("pay 3.5e10 now or 42 later");

    assert_eq!(tokens.get("NUMBER"), 2);
    assert_eq!(tokens.get("pay"), 1);
}

#[test]
fn test_punctuation_runs_become_spaces() {
    let normalizer = only(|b| b.remove_punctuation(true));

    let tokens = normalizer.normalize_text("free!!!money...now?? snake_case");

    assert_eq!(tokens.get("free"), 1);
    assert_eq!(tokens.get("money"), 1);
    assert_eq!(tokens.get("now"), 1);
    assert_eq!(tokens.get("snake_case"), 1);
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_case_preserved_when_lower_case_disabled() {
    let normalizer = only(|b| b);

    let tokens = normalizer.normalize_text("Free FREE free");

    assert_eq!(tokens.get("Free"), 1);
    assert_eq!(tokens.get("FREE"), 1);
    assert_eq!(tokens.get("free"), 1);
}

// --- Stopwords and stemming ---

#[test]
fn test_stopwords_removed() {
    let normalizer = only(|b| b.lower_case(true).remove_punctuation(true).remove_stopwords(true));

    let tokens = normalizer.normalize_text("The quick fox is on the run, isn't it?");

    assert!(!tokens.contains("the"));
    assert!(!tokens.contains("is"));
    assert!(!tokens.contains("on"));
    assert_eq!(tokens.get("quick"), 1);
    assert_eq!(tokens.get("fox"), 1);
    assert_eq!(tokens.get("run"), 1);
}

#[test]
fn test_stemming_merges_counts() {
    let counts: TokenMultiset = [("running", 2), ("run", 1)].into_iter().collect();

    let stemmed = stem_counts(counts);

    assert_eq!(stemmed.get("run"), 3);
    assert_eq!(stemmed.len(), 1);
}

#[test]
fn test_stemming_step_in_normalizer() {
    let normalizer = only(|b| b.stemming(true));

    let tokens = normalizer.normalize_text("running runs run");

    assert_eq!(tokens.get("run"), 3);
}

// --- Headers ---

#[test]
fn test_headers_included_when_not_stripped() {
    let raw = b"Subject: Cheap pills\r\n\r\nhello";
    let message = extract_message(raw).unwrap();
    let config = NormalizationConfig::builder()
        .strip_headers(false)
        .stemming(false)
        .build()
        .unwrap();

    let tokens = Normalizer::new(config).normalize_message(&message);

    assert_eq!(tokens.get("subject"), 1);
    assert_eq!(tokens.get("cheap"), 1);
    assert_eq!(tokens.get("hello"), 1);
}

#[test]
fn test_headers_ignored_by_default() {
    let message = extract_message(b"Subject: Cheap pills\r\n\r\nhello").unwrap();

    let tokens = Normalizer::default().normalize_message(&message);

    assert!(!tokens.contains("cheap"));
    assert_eq!(tokens.get("hello"), 1);
}
