//! Optimal traversal strategies for isogeny trees.
//!
//! A strategy for an `(n + 1)`-leaf tree is the pre-order list of its `n`
//! split points: a subtree of size `i` split at `b` is written as
//! `[b] ++ S(i − b) ++ S(b)`. Going left costs `b` multiplication steps
//! (`cost_p` each), going right costs `i − b` isogeny steps (`cost_q` each).

use log::{debug, trace};
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Result, StrategyError};

/// Only built by [`plan_strategy`] or the validating [`Strategy::from_splits`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Strategy {
    splits: Vec<usize>,
    cost: u64,
}

impl Strategy {
    /// Validate a split sequence and price it.
    pub fn from_splits(splits: Vec<usize>, cost_p: u64, cost_q: u64) -> Result<Self> {
        let cost = evaluate(&splits, cost_p, cost_q)?;
        Ok(Strategy { splits, cost })
    }

    pub fn splits(&self) -> &[usize] { &self.splits }

    pub fn cost(&self) -> u64 { self.cost }

    pub fn len(&self) -> usize { self.splits.len() }

    pub fn is_empty(&self) -> bool { self.splits.is_empty() }

    /// Number of leaves the decomposition reconstructs.
    pub fn leaves(&self) -> Result<usize> {
        walk(&self.splits, |_, _| Ok(()))?;
        Ok(self.splits.len() + 1)
    }

    /// Price the same decomposition under different step costs.
    pub fn evaluate_cost(&self, cost_p: u64, cost_q: u64) -> Result<u64> { evaluate(&self.splits, cost_p, cost_q) }
}

/// Walk a pre-order split sequence, calling `visit(size, split)` for every
/// internal node. The root size is `splits.len() + 1`.
fn walk<V>(splits: &[usize], mut visit: V) -> Result<()>
where
    V: FnMut(usize, usize) -> Result<()>,
{
    let mut next = splits.iter();
    let mut stack = vec![splits.len() + 1];

    while let Some(size) = stack.pop() {
        if size == 1 {
            continue;
        }
        let &b = next
            .next()
            .ok_or(StrategyError::MalformedStrategy("sequence ends before the tree is complete"))?;
        if b == 0 || b >= size {
            return Err(StrategyError::MalformedStrategy("split point outside its subtree").into());
        }
        visit(size, b)?;
        stack.push(b);
        stack.push(size - b);
    }

    if next.next().is_some() {
        return Err(StrategyError::MalformedStrategy("trailing split points").into());
    }
    Ok(())
}

fn split_cost(size: usize, b: usize, cost_p: u64, cost_q: u64) -> Option<u64> {
    (b as u64).checked_mul(cost_p)?.checked_add(((size - b) as u64).checked_mul(cost_q)?)
}

fn evaluate(splits: &[usize], cost_p: u64, cost_q: u64) -> Result<u64> {
    let mut total = 0u64;
    walk(splits, |size, b| {
        total = split_cost(size, b, cost_p, cost_q)
            .and_then(|c| total.checked_add(c))
            .ok_or(StrategyError::CostOverflow { size })?;
        Ok(())
    })?;
    Ok(total)
}

/// Minimum-cost strategy for an `(n + 1)`-leaf tree.
///
/// Among equally cheap splits the smallest `b` wins, so the output is
/// reproducible. Only the winning split per size is kept and the sequence
/// is rebuilt afterwards.
pub fn plan_strategy(n: usize, cost_p: u64, cost_q: u64) -> Result<Strategy> {
    let size = n.checked_add(1).ok_or(StrategyError::TreeTooLarge { n })?;
    let table_len = n.checked_add(2).ok_or(StrategyError::TreeTooLarge { n })?;
    let mut costs: Vec<u64> = Vec::new();
    let mut best: Vec<usize> = Vec::new();
    costs
        .try_reserve_exact(table_len)
        .and_then(|_| best.try_reserve_exact(table_len))
        .map_err(|_| StrategyError::TreeTooLarge { n })?;
    costs.resize(table_len, 0);
    best.resize(table_len, 0);

    for i in 2..=size {
        let mut choice: Option<(usize, u64)> = None;
        for b in 1..i {
            let candidate = split_cost(i, b, cost_p, cost_q)
                .and_then(|c| c.checked_add(costs[i - b]))
                .and_then(|c| c.checked_add(costs[b]));
            if let Some(c) = candidate {
                if choice.map_or(true, |(_, min)| c < min) {
                    choice = Some((b, c));
                }
            }
        }
        let (b, c) = choice.ok_or(StrategyError::CostOverflow { size: i })?;
        trace!("size {}: split at {}, cost {}", i, b, c);
        best[i] = b;
        costs[i] = c;
    }

    let mut splits = Vec::with_capacity(n);
    let mut stack = vec![size];
    while let Some(i) = stack.pop() {
        if i < 2 {
            continue;
        }
        let b = best[i];
        splits.push(b);
        stack.push(b);
        stack.push(i - b);
    }

    debug!("planned strategy for {} leaves (p = {}, q = {}): cost {}", size, cost_p, cost_q, costs[size]);
    Ok(Strategy { splits, cost: costs[size] })
}

/// The two p217 parties. Alice walks 4-isogenies, Bob 3-isogenies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Preset {
    Alice,
    Bob,
}

impl Preset {
    /// `(n, cost_p, cost_q)`.
    pub fn parameters(self) -> (usize, u64, u64) {
        match self {
            // two xDBL against one 4-isogeny computation plus evaluation
            Preset::Alice => (54, 2 * 684, 430 + 905),
            Preset::Bob => (66, 1366, 618 + 654),
        }
    }

    pub fn plan(self) -> Result<Strategy> {
        let (n, cost_p, cost_q) = self.parameters();
        plan_strategy(n, cost_p, cost_q)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_small_strategies() {
        let cases: [(usize, u64, u64, &[usize], u64); 7] = [
            (0, 1, 1, &[], 0),
            (1, 1, 1, &[1], 2),
            (2, 1, 1, &[1, 1], 5),
            (3, 1, 2, &[2, 1, 1], 12),
            (4, 2, 1, &[2, 1, 1, 1], 17),
            (5, 3, 3, &[2, 2, 1, 1, 1], 48),
            (6, 1368, 1335, &[3, 2, 1, 1, 1, 1], 26997),
        ];
        for (n, p, q, splits, cost) in cases {
            let strategy = plan_strategy(n, p, q).unwrap();
            assert_eq!(strategy.splits(), splits);
            assert_eq!(strategy.cost(), cost);
            assert_eq!(strategy.leaves().unwrap(), n + 1);
            assert_eq!(strategy.evaluate_cost(p, q).unwrap(), cost);
        }
    }

    #[test]
    fn test_ties_pick_smallest_split() {
        // with equal costs every split of a 3-leaf tree costs the same
        assert_eq!(plan_strategy(2, 1, 1).unwrap().splits(), &[1, 1]);
        assert_eq!(plan_strategy(2, 0, 0).unwrap().splits(), &[1, 1]);
    }

    #[test]
    fn test_malformed_strategies() {
        for splits in [vec![0], vec![2], vec![1, 1, 1, 5], vec![3, 1]] {
            assert!(matches!(
                Strategy::from_splits(splits, 1, 1),
                Err(Error::Strategy(StrategyError::MalformedStrategy(_)))
            ));
        }
        assert_eq!(Strategy::from_splits(vec![2, 1, 1], 1, 2).unwrap().cost(), 12);
    }

    #[test]
    fn test_cost_overflow() {
        assert_eq!(
            plan_strategy(3, u64::MAX / 2, u64::MAX / 2),
            Err(Error::Strategy(StrategyError::CostOverflow { size: 3 }))
        );
        assert!(plan_strategy(1, u64::MAX / 2, u64::MAX / 2).is_ok());
    }

    #[test]
    fn test_tree_too_large() {
        for n in [usize::MAX, usize::MAX - 1] {
            assert_eq!(plan_strategy(n, 1, 1), Err(Error::Strategy(StrategyError::TreeTooLarge { n })));
        }
        // the tables alone would exceed the address space
        assert_eq!(
            plan_strategy(usize::MAX / 16, 1, 1),
            Err(Error::Strategy(StrategyError::TreeTooLarge { n: usize::MAX / 16 }))
        );
    }

    #[test]
    fn test_presets() {
        assert_eq!(Preset::Alice.parameters(), (54, 1368, 1335));
        assert_eq!(Preset::Bob.parameters(), (66, 1366, 1272));
        assert_eq!("bob".parse::<Preset>().unwrap(), Preset::Bob);
        assert_eq!(Preset::Alice.plan().unwrap().cost(), 433452);
    }

    #[test]
    fn test_serde() {
        let strategy = plan_strategy(3, 1, 2).unwrap();
        let json = serde_json::to_string(&strategy).unwrap();
        assert_eq!(json, r#"{"splits":[2,1,1],"cost":12}"#);
    }
}
