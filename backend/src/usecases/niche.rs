//! Handle-based niche guess used to word the profile-analysis fallback.
//!
//! An ordered keyword table, not a classifier: the first keyword found as a
//! case-insensitive substring of the handle decides the niche.

pub const DEFAULT_NICHE: &str = "lifestyle";

const NICHE_KEYWORDS: &[(&str, &str)] = &[
    ("fit", "fitness"),
    ("gym", "fitness"),
    ("treino", "fitness"),
    ("academia", "fitness"),
    ("food", "culinária"),
    ("chef", "culinária"),
    ("receita", "culinária"),
    ("cozinha", "culinária"),
    ("beauty", "beleza"),
    ("beleza", "beleza"),
    ("makeup", "beleza"),
    ("fashion", "moda"),
    ("moda", "moda"),
    ("style", "moda"),
    ("travel", "viagens"),
    ("viagem", "viagens"),
    ("tech", "tecnologia"),
    ("game", "games"),
    ("music", "música"),
    ("musica", "música"),
];

pub fn detect_niche(handle: &str) -> &'static str {
    let handle = handle.to_lowercase();
    NICHE_KEYWORDS
        .iter()
        .find(|(keyword, _)| handle.contains(keyword))
        .map(|(_, niche)| *niche)
        .unwrap_or(DEFAULT_NICHE)
}
