#[cfg(test)]
mod test {
    use p217::{plan_strategy, Preset, Strategy};
    use strum::IntoEnumIterator;

    /// Every pre-order split sequence of a tree with `leaves` leaves.
    fn all_strategies(leaves: usize) -> Vec<Vec<usize>> {
        if leaves == 1 {
            return vec![vec![]];
        }
        let mut out = vec![];
        for b in 1..leaves {
            for left in all_strategies(leaves - b) {
                for right in all_strategies(b) {
                    let mut s = vec![b];
                    s.extend(&left);
                    s.extend(&right);
                    out.push(s);
                }
            }
        }
        out
    }

    #[test]
    fn test_optimal_against_brute_force() {
        for (cost_p, cost_q) in [(1, 1), (1, 2), (2, 1), (3, 7), (1368, 1335), (1366, 1272), (0, 5)] {
            for n in 0..=6 {
                let strategy = plan_strategy(n, cost_p, cost_q).unwrap();
                let brute = all_strategies(n + 1)
                    .into_iter()
                    .map(|splits| Strategy::from_splits(splits, cost_p, cost_q).unwrap().cost())
                    .min()
                    .unwrap();

                assert_eq!(strategy.cost(), brute, "n = {}, p = {}, q = {}", n, cost_p, cost_q);
                assert_eq!(strategy.evaluate_cost(cost_p, cost_q).unwrap(), brute);
                assert_eq!(strategy.len(), n);
                assert_eq!(strategy.leaves().unwrap(), n + 1);
            }
        }
    }

    #[test]
    fn test_alice() {
        let strategy = plan_strategy(54, 1368, 1335).unwrap();
        assert_eq!(strategy.len(), 54);
        assert_eq!(strategy.leaves().unwrap(), 55);
        assert_eq!(strategy.cost(), 433452);
        assert!(strategy.splits().iter().all(|&b| b > 0));
        assert_eq!(
            strategy.splits(),
            &[
                24, 15, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 7, 4, 2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 9, 7, 4,
                2, 1, 1, 2, 1, 1, 3, 2, 1, 1, 1, 1, 4, 2, 1, 1, 1, 2, 1, 1
            ]
        );
        assert_eq!(Preset::Alice.plan().unwrap(), strategy);
    }

    #[test]
    fn test_bob() {
        let strategy = plan_strategy(66, 1366, 1272).unwrap();
        assert_eq!(strategy.len(), 66);
        assert_eq!(strategy.leaves().unwrap(), 67);
        assert_eq!(strategy.cost(), 537494);
        assert_eq!(
            strategy.splits(),
            &[
                32, 16, 8, 4, 3, 2, 1, 1, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1,
                1, 16, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1, 8, 4, 2, 1, 1, 2, 1, 1, 4, 2, 1, 1, 2, 1, 1
            ]
        );
        assert_eq!(Preset::Bob.plan().unwrap(), strategy);
    }

    #[test]
    fn test_presets_roundtrip_names() {
        for preset in Preset::iter() {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn test_large_tree() {
        let strategy = plan_strategy(300, 1000, 900).unwrap();
        assert_eq!(strategy.leaves().unwrap(), 301);
        assert_eq!(strategy.evaluate_cost(1000, 900).unwrap(), strategy.cost());
    }
}
