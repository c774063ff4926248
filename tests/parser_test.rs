use email_features::*;

const ALTERNATIVE: &[u8] = b"From: sender@example.com\r\n\
Subject: Offer\r\n\
Content-Type: multipart/alternative; boundary=\"XYZ\"\r\n\
\r\n\
--XYZ\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
\r\n\
plain body\r\n\
--XYZ\r\n\
Content-Type: text/html\r\n\
\r\n\
<p>html body</p>\r\n\
--XYZ--\r\n";

#[test]
fn test_extract_simple_email() {
    let raw = b"From: John Doe <john@example.com>\r\n\
                Subject: Test Email\r\n\
                \r\n\
                Hello, this is a test email.";

    let message = extract_message(raw).unwrap();

    assert!(message.is_leaf());
    assert_eq!(message.content_type.mimetype, "text/plain");
    assert_eq!(message.header("subject"), Some("Test Email"));
    assert!(message.content().unwrap().unwrap().contains("test email"));
}

#[test]
fn test_extract_multipart_keeps_child_order() {
    let message = extract_message(ALTERNATIVE).unwrap();

    assert!(!message.is_leaf());
    assert_eq!(message.content_type.mimetype, "multipart/alternative");
    assert!(message.content().unwrap().is_none());
    assert!(message.raw_text().is_none());

    let children = message.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].content_type.mimetype, "text/plain");
    assert_eq!(children[0].content_type.charset, "utf-8");
    assert_eq!(children[1].content_type.mimetype, "text/html");
    assert!(children.iter().all(Message::is_leaf));
}

#[test]
fn test_walk_is_pre_order() {
    let raw = b"Content-Type: multipart/mixed; boundary=\"OUTER\"\r\n\
\r\n\
--OUTER\r\n\
Content-Type: multipart/alternative; boundary=\"INNER\"\r\n\
\r\n\
--INNER\r\n\
Content-Type: text/plain\r\n\
\r\n\
inner plain\r\n\
--INNER\r\n\
Content-Type: text/html\r\n\
\r\n\
<b>inner html</b>\r\n\
--INNER--\r\n\
--OUTER\r\n\
Content-Type: image/png\r\n\
\r\n\
not really a png\r\n\
--OUTER--\r\n";

    let message = extract_message(raw).unwrap();
    let order: Vec<&str> = message
        .walk()
        .map(|m| m.content_type.mimetype.as_str())
        .collect();

    assert_eq!(
        order,
        vec![
            "multipart/mixed",
            "multipart/alternative",
            "text/plain",
            "text/html",
            "image/png",
        ]
    );
}

#[test]
fn test_quoted_printable_is_decoded() {
    let raw = b"Content-Type: text/plain; charset=utf-8\r\n\
                Content-Transfer-Encoding: quoted-printable\r\n\
                \r\n\
                caf=C3=A9 au lait";

    let message = extract_message(raw).unwrap();

    assert!(message.content().unwrap().unwrap().contains("caf\u{e9} au lait"));
    assert!(message.raw_text().unwrap().contains("caf=C3=A9"));
}

#[test]
fn test_undecodable_leaf_keeps_raw_payload() {
    let raw = b"Content-Type: text/plain\r\n\
                Content-Transfer-Encoding: base64\r\n\
                \r\n\
                @@@@ not base64 @@@@";

    let message = extract_message(raw).unwrap();

    let err = message.content().unwrap_err();
    assert_eq!(err.content_type, "text/plain");
    assert!(message.raw_text().unwrap().contains("not base64"));
}

#[test]
fn test_empty_input_is_parse_error() {
    assert!(matches!(extract_message(b""), Err(Error::Parse(_))));
    assert!(matches!(extract_message(b"  \r\n "), Err(Error::Parse(_))));
}

#[test]
fn test_batch_failures_are_isolated() {
    let good = b"Subject: one\r\n\r\nfirst".as_slice();
    let bad = b"".as_slice();
    let also_good = b"Subject: two\r\n\r\nsecond".as_slice();

    let results = extract_messages(&[good, bad, also_good]);

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(Error::Parse(_))));
    assert_eq!(results[2].as_ref().unwrap().header("Subject"), Some("two"));
}

#[test]
fn test_header_lookup_is_case_insensitive() {
    let message = extract_message(b"X-Mailer: Bulk 2.0\r\n\r\nbody").unwrap();

    assert_eq!(message.header("x-mailer"), Some("Bulk 2.0"));
    assert_eq!(message.header("X-MAILER"), Some("Bulk 2.0"));
    assert!(message.header("reply-to").is_none());
}
