use genrecli::types::Genre;
use genrecli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA256 digest in URL-safe base64 without padding
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_genre_new_trims_and_rejects_blank() {
    assert_eq!(Genre::new("  lo-fi beats ").unwrap().as_str(), "lo-fi beats");
    assert!(Genre::new("").is_none());
    assert!(Genre::new("   \t").is_none());
}

#[test]
fn test_genre_deserialize_rejects_blank() {
    let ok: Result<Genre, _> = serde_json::from_str("\" vaporwave \"");
    assert_eq!(ok.unwrap().as_str(), "vaporwave");

    let blank: Result<Genre, _> = serde_json::from_str("\"  \"");
    assert!(blank.is_err());
}

#[test]
fn test_genre_query() {
    let genre = Genre::new("lo-fi beats").unwrap();
    assert_eq!(genre_query(&genre), "genre:\"lo-fi beats\"");

    // Embedded quotes would end the phrase early
    let quoted = Genre::new("rock \"n\" roll").unwrap();
    assert_eq!(genre_query(&quoted), "genre:\"rock n roll\"");
}

#[test]
fn test_distinct_genres() {
    let genres = distinct_genres(["jazz", " jazz ", "", "blues", "  ", "jazz", "ambient"]);
    let labels: Vec<&str> = genres.iter().map(|g| g.as_str()).collect();

    // First occurrences win, blanks are dropped
    assert_eq!(labels, vec!["jazz", "blues", "ambient"]);
}

#[test]
fn test_distinct_genres_empty() {
    let genres = distinct_genres(Vec::<String>::new());
    assert!(genres.is_empty());
}

#[test]
fn test_preview_tags() {
    let tags = vec![
        "chillhop".to_string(),
        "lo-fi".to_string(),
        "jazzhop".to_string(),
        "study beats".to_string(),
    ];

    assert_eq!(preview_tags(&tags, 3), "chillhop,lo-fi,jazzhop");
    assert_eq!(preview_tags(&tags, 10), "chillhop,lo-fi,jazzhop,study beats");
    assert_eq!(preview_tags(&[], 3), "");
}
