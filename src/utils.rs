use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Genre;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Search query restricting results to one genre, e.g. `genre:"lo-fi beats"`.
pub fn genre_query(genre: &Genre) -> String {
    format!("genre:\"{}\"", genre.as_str().replace('"', ""))
}

/// Turns raw labels into genres, dropping blanks and keeping first occurrences.
pub fn distinct_genres<I, S>(labels: I) -> Vec<Genre>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter_map(|label| Genre::new(label.as_ref()))
        .filter(|genre| seen.insert(genre.clone()))
        .collect()
}

/// Short, comma separated preview of an artist's own tags for table output.
pub fn preview_tags(tags: &[String], take: usize) -> String {
    tags.iter().take(take).cloned().collect::<Vec<_>>().join(",")
}
