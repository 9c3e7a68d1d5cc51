//! Property tests across the whole rule family.

use prop_ranking::error::RankingError;
use prop_ranking::profile::ApprovalProfile;
use prop_ranking::quality::{justify, quality};
use prop_ranking::ranking::Ranking;
use prop_ranking::rules::{
    Av, BordaPav, Enestrom, IrvSum, JustifiedRanking, MaximizeQuality, PhragmenClassic,
    PhragmenDepile, PhragmenMinmax, RankingRule, ReversePav, ReverseSeqRav, ScorePav,
    SeqPhragmen, SeqRav, SeqScorePav, SeqX, SumLoads,
};
use proptest::prelude::*;

fn all_rules() -> Vec<Box<dyn RankingRule>> {
    vec![
        Box::new(Av::new()),
        Box::new(SeqRav::pav(0.0)),
        Box::new(SeqRav::pav(0.5)),
        Box::new(SeqRav::geometric(2.0)),
        Box::new(SeqRav::power(1.5)),
        Box::new(ReverseSeqRav::pav(0.0)),
        Box::new(ReversePav::new(0.0)),
        Box::new(PhragmenMinmax::new()),
        Box::new(PhragmenClassic::new()),
        Box::new(PhragmenDepile::new()),
        Box::new(SeqPhragmen::new()),
        Box::new(Enestrom::new()),
        Box::new(IrvSum::new()),
        Box::new(SumLoads::new()),
        Box::new(SeqX::new()),
        Box::new(SeqScorePav::default()),
        Box::new(BordaPav::new()),
        Box::new(ScorePav::new()),
        Box::new(MaximizeQuality::new()),
    ]
}

fn profile_rows() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(n, m)| {
        proptest::collection::vec(proptest::collection::vec(0u8..=1, m), n)
    })
}

proptest! {
    #[test]
    fn every_rule_returns_a_permutation(rows in profile_rows()) {
        let profile = ApprovalProfile::from_rows(&rows).unwrap();
        for mut rule in all_rules() {
            rule.bind_profile(profile.clone());
            let ranking = rule.ranking().unwrap();
            prop_assert!(
                ranking.is_permutation(),
                "{} produced {:?}",
                rule.name(),
                ranking
            );
            prop_assert_eq!(ranking.len(), profile.candidates());
        }
    }

    #[test]
    fn ranking_is_idempotent(rows in profile_rows()) {
        for mut rule in all_rules() {
            let profile = ApprovalProfile::from_rows(&rows).unwrap();
            rule.bind_profile(profile.clone());
            let first = rule.ranking().unwrap();
            let second = rule.ranking().unwrap();
            prop_assert_eq!(&first, &second);
            // Rebinding the same profile recomputes identically.
            rule.bind_profile(profile);
            prop_assert_eq!(&first, &rule.ranking().unwrap());
        }
    }

    #[test]
    fn quality_and_justify_agree(rows in profile_rows().prop_flat_map(|rows| {
        let m = rows[0].len();
        (Just(rows), Just((0..m).collect::<Vec<_>>()).prop_shuffle())
    })) {
        let (rows, order) = rows;
        let profile = ApprovalProfile::from_rows(&rows).unwrap();
        let ranking = Ranking::new(order);
        let q = quality(&profile, &ranking);
        prop_assert!(q >= 0.0);
        prop_assert_eq!(q >= 1.0, justify(&profile, &ranking));
    }

    #[test]
    fn justified_ranking_agrees_with_exhaustive_search(rows in profile_rows()) {
        let profile = ApprovalProfile::from_rows(&rows).unwrap();
        let mut rule = JustifiedRanking::new();
        rule.bind_profile(profile.clone());
        match rule.ranking() {
            Ok(ranking) => prop_assert!(justify(&profile, &ranking)),
            Err(RankingError::NoJustifiedRanking) => {
                // Then no permutation may satisfy every demand.
                let m = profile.candidates();
                let mut check = MaximizeQuality::new();
                check.bind_profile(profile.clone());
                prop_assert!(check.quality().unwrap() < 1.0, "m = {}", m);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}
