use email_features::*;

fn leaf(mimetype: &str, text: &str) -> Message {
    Message::leaf(
        Vec::new(),
        ContentType::new(mimetype, "utf-8"),
        Payload {
            raw: text.as_bytes().to_vec(),
            decoded: Ok(text.to_string()),
        },
    )
}

// --- ContentType ---

#[test]
fn test_content_type_lower_cases_mimetype() {
    let ct = ContentType::new("Text/HTML", "utf-8");

    assert_eq!(ct.mimetype, "text/html");
    assert!(ct.is_html());
    assert!(!ct.is_plain_text());
    assert!(!ct.is_multipart());
    assert_eq!(ct.to_string(), "text/html; charset=utf-8");
}

#[test]
fn test_content_type_multipart_kinds() {
    assert!(ContentType::new("multipart/mixed", "us-ascii").is_multipart());
    assert!(ContentType::new("multipart/alternative", "us-ascii").is_multipart());
    assert!(!ContentType::new("message/rfc822", "us-ascii").is_multipart());
}

// --- Message ---

#[test]
fn test_leaf_and_multipart_are_exclusive() {
    let plain = leaf("text/plain", "hi");
    let tree = Message::multipart(
        vec![("Subject".into(), "x".into())],
        ContentType::new("multipart/mixed", "us-ascii"),
        vec![plain.clone()],
    );

    assert!(plain.is_leaf());
    assert!(plain.children().is_empty());
    assert_eq!(plain.content().unwrap(), Some("hi"));
    assert!(!tree.is_leaf());
    assert_eq!(tree.children().len(), 1);
    assert_eq!(tree.content().unwrap(), None);
}

#[test]
fn test_decode_error_surfaces_on_content() {
    let broken = Message::leaf(
        Vec::new(),
        ContentType::new("text/plain", "utf-8"),
        Payload {
            raw: b"=?bad".to_vec(),
            decoded: Err(DecodeError {
                content_type: "text/plain".into(),
                details: "bad input".into(),
            }),
        },
    );

    let err = broken.content().unwrap_err();

    assert_eq!(err.details, "bad input");
    assert_eq!(broken.raw_text().unwrap(), "=?bad");
    assert!(Error::from(err).to_string().contains("text/plain"));
}

#[test]
fn test_walk_visits_children_in_order() {
    let inner = Message::multipart(
        Vec::new(),
        ContentType::new("multipart/alternative", "us-ascii"),
        vec![leaf("text/plain", "a"), leaf("text/html", "b")],
    );
    let root = Message::multipart(
        Vec::new(),
        ContentType::new("multipart/mixed", "us-ascii"),
        vec![inner, leaf("image/png", "c")],
    );

    let leaves: Vec<&str> = root
        .walk()
        .filter(|m| m.is_leaf())
        .map(|m| m.content_type.mimetype.as_str())
        .collect();

    assert_eq!(leaves, vec!["text/plain", "text/html", "image/png"]);
    assert_eq!(root.walk().count(), 5);
}

// --- TokenMultiset ---

#[test]
fn test_multiset_add_sums() {
    let mut tokens = TokenMultiset::new();
    tokens.add("spam", 2);
    tokens.add("spam", 3);
    tokens.add("ham", 1);

    assert_eq!(tokens.get("spam"), 5);
    assert_eq!(tokens.get("missing"), 0);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.total(), 6);
}

#[test]
fn test_multiset_from_iter_merges_duplicates() {
    let tokens: TokenMultiset = [("a", 1), ("b", 2), ("a", 4)].into_iter().collect();

    assert_eq!(tokens.get("a"), 5);
    assert_eq!(tokens.iter().collect::<Vec<_>>(), vec![("a", 5), ("b", 2)]);
}

#[test]
fn test_multiset_serializes_as_map() {
    let tokens: TokenMultiset = [("url", 2)].into_iter().collect();

    assert_eq!(serde_json::to_string(&tokens).unwrap(), r#"{"url":2}"#);
}
