//! Search filter over a roster.

use crate::models::Participant;

/// Participants whose name, email, or github handle contains `query` (case-insensitive).
///
/// Empty query keeps everyone. Order of the roster is preserved.
/// Case folding is `to_lowercase` only; accents are not stripped.
pub fn filter_participants(roster: &[Participant], query: &str) -> Vec<Participant> {
    if query.is_empty() {
        return roster.to_vec();
    }
    let search = query.to_lowercase();
    roster
        .iter()
        .filter(|p| matches_search(p, &search))
        .cloned()
        .collect()
}

/// `search` must already be lowercase.
fn matches_search(p: &Participant, search: &str) -> bool {
    [&p.name, &p.email, &p.github]
        .into_iter()
        .any(|field| field.to_lowercase().contains(search))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_are_not_normalized() {
        let roster = vec![Participant::new("José", "j@x.com", "jose")];
        assert_eq!(filter_participants(&roster, "JOSÉ").len(), 1);
        assert_eq!(filter_participants(&roster, "josé@").len(), 0);
        let no_accent = vec![Participant::new("José", "j@x.com", "zz")];
        assert!(filter_participants(&no_accent, "jose").is_empty());
    }
}
