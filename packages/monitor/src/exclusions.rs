//! Post-fetch exclusion filtering.
//!
//! The upstream query is deliberately broad; exclusions narrow the result
//! after the fact and record why each publication was dropped.

use std::collections::BTreeMap;

use djen_client::Publication;

use crate::rules::{ExclusionField, ExclusionRule};

/// Publications removed per exclusion name.
pub type ExclusionCounts = BTreeMap<String, usize>;

/// Split `publications` into kept and excluded, attributing each removal to
/// the first enabled exclusion that matched.
///
/// Evaluation stops at the first hit, so a publication matching several
/// exclusions is counted once, under the earliest. Exclusion order shapes
/// the attribution, never the kept set.
pub fn apply_exclusions(
    publications: Vec<Publication>,
    exclusions: &[ExclusionRule],
) -> (Vec<Publication>, ExclusionCounts) {
    if exclusions.is_empty() {
        return (publications, ExclusionCounts::new());
    }

    let mut counts = ExclusionCounts::new();
    let mut kept = Vec::with_capacity(publications.len());

    for publication in publications {
        let hit = exclusions
            .iter()
            .filter(|exclusion| exclusion.enabled)
            .find(|exclusion| matches(&publication, exclusion));

        match hit {
            Some(exclusion) => *counts.entry(exclusion.name.clone()).or_insert(0) += 1,
            None => kept.push(publication),
        }
    }

    (kept, counts)
}

/// Whether `exclusion` matches `publication` under its field's comparison
/// rule. Absent fields never match.
fn matches(publication: &Publication, exclusion: &ExclusionRule) -> bool {
    match &exclusion.field {
        ExclusionField::OabNumber => {
            let wanted = exclusion.value.trim();
            publication.lawyers.iter().any(|association| {
                association
                    .lawyer
                    .as_ref()
                    .and_then(|lawyer| lawyer.registration_number.as_deref())
                    .is_some_and(|oab| oab.trim() == wanted)
            })
        }
        ExclusionField::PartyName => {
            let wanted = exclusion.value.to_lowercase();
            publication.recipients.iter().any(|recipient| {
                recipient
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&wanted))
            })
        }
        ExclusionField::ProcessNumber => publication
            .masked_process_number
            .as_deref()
            .is_some_and(|number| number.contains(&exclusion.value)),
        ExclusionField::LawyerName => {
            let wanted = exclusion.value.to_lowercase();
            publication.lawyers.iter().any(|association| {
                association
                    .lawyer
                    .as_ref()
                    .and_then(|lawyer| lawyer.name.as_deref())
                    .is_some_and(|name| name.to_lowercase().contains(&wanted))
            })
        }
        // Unrecognized fields (a typo in a stored rule, or a name from a
        // newer version) never match, so a bad exclusion weakens filtering
        // instead of dropping records.
        ExclusionField::Other(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{publication, with_lawyer, with_recipient};

    #[test]
    fn test_empty_exclusion_list_keeps_everything() {
        let input = vec![publication(1, Some("aa")), publication(2, Some("bb"))];
        let (kept, counts) = apply_exclusions(input, &[]);

        assert_eq!(kept.len(), 2);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_oab_number_matches_exactly_after_trimming() {
        let keep = with_lawyer(publication(1, None), "Maria Souza", "98765");
        let drop_exact = with_lawyer(publication(2, None), "João Lima", "8773");
        let drop_padded = with_lawyer(publication(3, None), "Ana Reis", "  8773  ");
        let keep_prefix = with_lawyer(publication(4, None), "Rui Dias", "87731");

        let exclusion = ExclusionRule::new("OAB interna", ExclusionField::OabNumber, " 8773 ");
        let (kept, counts) = apply_exclusions(
            vec![keep, drop_exact, drop_padded, keep_prefix],
            &[exclusion],
        );

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].id, Some(1));
        assert_eq!(kept[1].id, Some(4));
        assert_eq!(counts["OAB interna"], 2);
    }

    #[test]
    fn test_oab_exclusion_over_a_mixed_batch() {
        // Leading zeros matter: OAB numbers are strings, not integers.
        let mut batch: Vec<_> = (1..=7)
            .map(|id| with_lawyer(publication(id, None), "Outro Advogado", "99999"))
            .collect();
        for id in 8..=10 {
            batch.push(with_lawyer(publication(id, None), "Maria Souza", "014072"));
        }

        let exclusion = ExclusionRule::new("OAB interna", ExclusionField::OabNumber, "014072");
        let (kept, counts) = apply_exclusions(batch, &[exclusion]);

        assert_eq!(kept.len(), 7);
        assert_eq!(counts["OAB interna"], 3);
    }

    #[test]
    fn test_party_name_is_case_insensitive_substring() {
        let drop = with_recipient(publication(1, None), "SINALES SINALIZACAO LTDA", "P");
        let keep = with_recipient(publication(2, None), "Outra Empresa SA", "A");

        let exclusion = ExclusionRule::new("Homônimo", ExclusionField::PartyName, "sinales");
        let (kept, counts) = apply_exclusions(vec![drop, keep], &[exclusion]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, Some(2));
        assert_eq!(counts["Homônimo"], 1);
    }

    #[test]
    fn test_process_number_is_case_sensitive_substring() {
        let mut target = publication(1, None);
        target.masked_process_number = Some("0001234-56.2025.8.08.0024".to_string());
        let mut other = publication(2, None);
        other.masked_process_number = Some("0009999-99.2025.8.08.0024".to_string());

        let exclusion =
            ExclusionRule::new("Processo arquivado", ExclusionField::ProcessNumber, "0001234-56");
        let (kept, _) = apply_exclusions(vec![target, other], &[exclusion]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, Some(2));
    }

    #[test]
    fn test_lawyer_name_is_case_insensitive_substring() {
        let drop = with_lawyer(publication(1, None), "Dra. Maria Helena Souza", "111");
        let keep = with_lawyer(publication(2, None), "Dr. Pedro Alves", "222");

        let exclusion =
            ExclusionRule::new("Advogada da casa", ExclusionField::LawyerName, "maria helena");
        let (kept, _) = apply_exclusions(vec![drop, keep], &[exclusion]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, Some(2));
    }

    #[test]
    fn test_first_matching_exclusion_takes_the_credit() {
        let both = with_recipient(
            with_lawyer(publication(1, None), "Maria Souza", "8773"),
            "Sinales Ltda",
            "P",
        );

        let first = ExclusionRule::new("Por parte", ExclusionField::PartyName, "sinales");
        let second = ExclusionRule::new("Por OAB", ExclusionField::OabNumber, "8773");
        let (kept, counts) = apply_exclusions(vec![both], &[first, second]);

        assert!(kept.is_empty());
        assert_eq!(counts["Por parte"], 1);
        assert!(!counts.contains_key("Por OAB"));
    }

    #[test]
    fn test_disabled_exclusions_are_skipped() {
        let target = with_recipient(publication(1, None), "Sinales Ltda", "P");

        let disabled =
            ExclusionRule::new("Desligada", ExclusionField::PartyName, "sinales").disabled();
        let (kept, counts) = apply_exclusions(vec![target], &[disabled]);

        assert_eq!(kept.len(), 1);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_unrecognized_field_never_matches() {
        let target = with_recipient(publication(1, None), "Sinales Ltda", "P");

        let stale = ExclusionRule::new(
            "Campo antigo",
            ExclusionField::Other("situacaoProcesso".to_string()),
            "Sinales",
        );
        let (kept, counts) = apply_exclusions(vec![target], &[stale]);

        assert_eq!(kept.len(), 1);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_publication_without_probed_fields_is_kept() {
        let bare = publication(1, None);

        let exclusions = vec![
            ExclusionRule::new("a", ExclusionField::OabNumber, "8773"),
            ExclusionRule::new("b", ExclusionField::PartyName, "sinales"),
            ExclusionRule::new("c", ExclusionField::ProcessNumber, "0001234"),
            ExclusionRule::new("d", ExclusionField::LawyerName, "maria"),
        ];
        let (kept, counts) = apply_exclusions(vec![bare], &exclusions);

        assert_eq!(kept.len(), 1);
        assert!(counts.is_empty());
    }
}
