use std::cmp::Ordering;

use crate::model::{Direction, TickerSnapshot};

/// Sort snapshots by 24h change and keep the top `limit`. Descending for
/// gainers, ascending for losers. The sort is stable, so equal-change
/// entries keep their original relative order.
pub fn rank(
    mut snapshots: Vec<TickerSnapshot>,
    direction: Direction,
    limit: usize,
) -> Vec<TickerSnapshot> {
    snapshots.sort_by(|a, b| {
        let ord = a
            .pct24h
            .partial_cmp(&b.pct24h)
            .unwrap_or(Ordering::Equal);
        match direction {
            Direction::Gainers => ord.reverse(),
            Direction::Losers => ord,
        }
    });
    snapshots.truncate(limit);
    snapshots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snap(symbol: &str, pct24h: f64) -> TickerSnapshot {
        TickerSnapshot {
            symbol: symbol.to_string(),
            last_price: 1.0,
            pct24h,
            high_price24h: 1.1,
            low_price24h: 0.9,
            volume24h: 100.0,
            turnover24h: 1_000.0,
            captured_at: Utc::now(),
        }
    }

    fn symbols(list: &[TickerSnapshot]) -> Vec<&str> {
        list.iter().map(|s| s.symbol.as_str()).collect()
    }

    #[test]
    fn gainers_top3_scenario() {
        let universe = vec![
            snap("A", 0.10),
            snap("B", -0.05),
            snap("C", 0.20),
            snap("D", 0.00),
            snap("E", -0.30),
        ];
        let ranked = rank(universe, Direction::Gainers, 3);
        assert_eq!(symbols(&ranked), vec!["C", "A", "D"]);
    }

    #[test]
    fn losers_ascending() {
        let universe = vec![snap("A", 0.10), snap("B", -0.05), snap("E", -0.30)];
        let ranked = rank(universe, Direction::Losers, 10);
        assert_eq!(symbols(&ranked), vec!["E", "B", "A"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let universe = vec![
            snap("FIRST", 0.05),
            snap("SECOND", 0.05),
            snap("THIRD", 0.05),
        ];
        let ranked = rank(universe, Direction::Gainers, 3);
        assert_eq!(symbols(&ranked), vec!["FIRST", "SECOND", "THIRD"]);
        let ranked = rank(ranked, Direction::Losers, 3);
        assert_eq!(symbols(&ranked), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn reranking_is_idempotent() {
        let universe = vec![snap("A", 0.10), snap("B", 0.30), snap("C", -0.20)];
        let once = rank(universe, Direction::Gainers, 3);
        let twice = rank(once.clone(), Direction::Gainers, 3);
        assert_eq!(symbols(&once), symbols(&twice));
    }

    #[test]
    fn truncates_after_sorting() {
        let universe = vec![snap("A", 0.01), snap("B", 0.99)];
        let ranked = rank(universe, Direction::Gainers, 1);
        assert_eq!(symbols(&ranked), vec!["B"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank(Vec::new(), Direction::Gainers, 50).is_empty());
    }
}
