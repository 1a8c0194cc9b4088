// =========================================================================
// FALSIFY-RK: Ranking metrics contract
//
// MRR drives the training diagnostics and any held-out evaluation; these
// properties pin its range and its two extreme values.
// =========================================================================

use super::*;

/// FALSIFY-RK-001: Reciprocal rank is in [0, 1]
#[test]
fn falsify_rk_001_rr_bounded() {
    let ranking = vec![5, 3, 1, 4, 2];
    for target in 0..8 {
        let rr = reciprocal_rank(&ranking, &[target]);
        assert!(
            (0.0..=1.0).contains(&rr),
            "FALSIFIED RK-001: rr={rr} for target={target}, expected in [0,1]"
        );
    }
}

/// FALSIFY-RK-002: Reciprocal rank is non-increasing as the first hit moves down
#[test]
fn falsify_rk_002_rr_monotone_in_position() {
    let ranking = vec![10, 11, 12, 13, 14];
    let mut prev = f32::INFINITY;
    for &target in &ranking {
        let rr = reciprocal_rank(&ranking, &[target]);
        assert!(
            rr <= prev,
            "FALSIFIED RK-002: rr increased from {prev} to {rr} at target={target}"
        );
        prev = rr;
    }
}

/// FALSIFY-RK-003: MRR = 1 when every top-ranked item is relevant
#[test]
fn falsify_rk_003_mrr_perfect() {
    let predicted = vec![vec![2, 0, 1], vec![0, 1, 2], vec![1, 2, 0]];
    let relevant = vec![vec![2], vec![0, 2], vec![1]];
    let score = mean_reciprocal_rank(&predicted, &relevant);
    assert!(
        (score - 1.0).abs() < 1e-6,
        "FALSIFIED RK-003: MRR={score}, expected 1.0"
    );
}

/// FALSIFY-RK-004: MRR = 0 when no relevant set intersects its ranking
#[test]
fn falsify_rk_004_mrr_zero_without_hits() {
    let predicted = vec![vec![0, 1], vec![2, 3]];
    let disjoint = vec![vec![9], vec![8]];
    assert_eq!(mean_reciprocal_rank(&predicted, &disjoint), 0.0);

    let empty: Vec<Vec<usize>> = vec![vec![], vec![]];
    assert_eq!(mean_reciprocal_rank(&predicted, &empty), 0.0);
}

/// FALSIFY-RK-005: MRR is in [0, 1] for mixed inputs
#[test]
fn falsify_rk_005_mrr_bounded() {
    let predicted: Vec<Vec<usize>> = (0..6).map(|u| (0..6).map(|i| (i + u) % 6).collect()).collect();
    let relevant: Vec<Vec<usize>> = (0..6).map(|u| vec![u, (u * 2) % 6]).collect();
    let score = mean_reciprocal_rank(&predicted, &relevant);
    assert!(
        (0.0..=1.0).contains(&score),
        "FALSIFIED RK-005: MRR={score}, expected in [0,1]"
    );
}
