//! Most-recent job title.

use crate::dates::{DateKey, DateLexicon};
use crate::record::ExperienceEntry;

/// Picks the job title of the most recent experience entry.
///
/// Entries are ranked by [`DateKey`] descending, with the raw date string as
/// a stability tiebreak only. When no entry carries any usable date signal
/// the resolver degrades to the first entry in document order — a weaker
/// heuristic than sorting, kept deliberately distinct from the primary path.
#[must_use]
pub fn resolve_current_position(entries: &[ExperienceEntry], lexicon: &DateLexicon) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let keyed: Vec<(DateKey, &ExperienceEntry)> = entries
        .iter()
        .map(|entry| (DateKey::parse(&entry.date, lexicon), entry))
        .collect();

    if keyed.iter().all(|(key, _)| *key == DateKey::Unknown) {
        return entries[0].job_title.clone();
    }

    keyed
        .iter()
        .max_by(|(a_key, a), (b_key, b)| {
            a_key
                .cmp(b_key)
                .then_with(|| a.date.cmp(&b.date))
        })
        .map(|(_, entry)| entry.job_title.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateLexicon;

    fn entry(title: &str, date: &str) -> ExperienceEntry {
        ExperienceEntry {
            company: String::new(),
            job_title: title.to_owned(),
            date: date.to_owned(),
            descriptions: Vec::new(),
        }
    }

    #[test]
    fn test_current_beats_concrete_year() {
        let lexicon = DateLexicon::english().unwrap();
        let entries = vec![entry("A", "2020"), entry("B", "Present")];

        assert_eq!(resolve_current_position(&entries, &lexicon), "B");
    }

    #[test]
    fn test_latest_year_wins() {
        let lexicon = DateLexicon::english().unwrap();
        let entries = vec![entry("A", "2022"), entry("B", "2019")];

        assert_eq!(resolve_current_position(&entries, &lexicon), "A");
    }

    #[test]
    fn test_range_end_is_compared() {
        let lexicon = DateLexicon::english().unwrap();
        let entries = vec![
            entry("A", "2018 - Present"),
            entry("B", "Jan 2020 - Dec 2021"),
        ];

        assert_eq!(resolve_current_position(&entries, &lexicon), "A");
    }

    #[test]
    fn test_no_date_signal_falls_back_to_first() {
        let lexicon = DateLexicon::english().unwrap();
        let entries = vec![entry("First", ""), entry("Second", "sometime")];

        assert_eq!(resolve_current_position(&entries, &lexicon), "First");
    }

    #[test]
    fn test_empty_input() {
        let lexicon = DateLexicon::english().unwrap();
        assert_eq!(resolve_current_position(&[], &lexicon), "");
    }

    #[test]
    fn test_hungarian_current_word() {
        let lexicon = DateLexicon::hungarian().unwrap();
        let entries = vec![entry("A", "2021"), entry("B", "2015 - jelenleg")];

        assert_eq!(resolve_current_position(&entries, &lexicon), "B");
    }
}
