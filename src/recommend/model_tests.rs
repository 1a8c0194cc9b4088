use super::*;
use crate::recommend::DEFAULT_ORDER;

/// Two users, three items, K=2. User 0 prefers item 2, user 1 prefers item 0.
fn handcrafted() -> CLiMFModel {
    let users = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]).expect("valid");
    let items = Matrix::from_vec(3, 2, vec![0.9, 0.1, 0.5, 0.5, 0.2, 0.8]).expect("valid");
    CLiMFModel::from_factors(users, items, DEFAULT_ORDER).expect("consistent factors")
}

#[test]
fn test_accessors() {
    let model = handcrafted();
    assert_eq!(model.name(), "CLiMF");
    assert_eq!(model.shape(), (2, 3));
    assert_eq!(model.n_factors(), 2);
    assert_eq!(model.order(), DEFAULT_ORDER);
    assert_eq!(model.user_factors().shape(), (2, 2));
    assert_eq!(model.item_factors().shape(), (3, 2));
}

#[test]
fn test_predict_scores_are_dot_products() {
    let scores = handcrafted().predict_scores(0);
    let expected = [0.1, 0.5, 0.8];
    for (s, e) in scores.iter().zip(expected) {
        assert!((s - e).abs() < 1e-6);
    }
}

#[test]
fn test_predict_full_ranking() {
    let model = handcrafted();
    assert_eq!(model.predict(&[0, 1], None), vec![vec![2, 1, 0], vec![0, 1, 2]]);
}

#[test]
fn test_predict_top_k_is_prefix() {
    let model = handcrafted();
    let full = model.predict(&[0], None);
    let top = model.predict(&[0], Some(2));
    assert_eq!(top[0], full[0][..2].to_vec());
}

#[test]
fn test_top_k_larger_than_items_returns_all() {
    assert_eq!(handcrafted().predict(&[1], Some(10))[0].len(), 3);
}

#[test]
fn test_top_k_zero_is_empty() {
    assert!(handcrafted().predict(&[1], Some(0))[0].is_empty());
}

#[test]
fn test_predict_empty_users() {
    assert!(handcrafted().predict(&[], None).is_empty());
}

#[test]
fn test_predict_keeps_request_order_and_duplicates() {
    let model = handcrafted();
    let ranked = model.predict(&[1, 0, 1], Some(1));
    assert_eq!(ranked, vec![vec![0], vec![2], vec![0]]);
}

#[test]
fn test_out_of_range_user_gets_a_known_users_ranking() {
    let model = handcrafted();
    let known = model.predict(&[0, 1], None);
    let mut rng = StdRng::seed_from_u64(3);
    for ranking in model.predict_with_rng(&[7, 100, usize::MAX], None, &mut rng) {
        assert!(known.contains(&ranking), "{ranking:?} is not a known user's ranking");
    }
}

#[test]
fn test_out_of_range_substitution_is_seeded() {
    let model = handcrafted();
    let users = [5, 6, 7, 8, 9, 10];
    let a = model.predict_with_rng(&users, None, &mut StdRng::seed_from_u64(1));
    let b = model.predict_with_rng(&users, None, &mut StdRng::seed_from_u64(1));
    assert_eq!(a, b);
}

#[test]
fn test_recommend_matches_predict() {
    let model = handcrafted();
    assert_eq!(model.recommend(0, Some(2)), vec![2, 1]);
    assert_eq!(
        Recommender::recommend(&model, 1, None),
        model.predict(&[1], None)[0]
    );
}

#[test]
fn test_recommender_trait_dimensions() {
    let model = handcrafted();
    assert_eq!(Recommender::n_users(&model), 2);
    assert_eq!(Recommender::n_items(&model), 3);
}

#[test]
fn test_rank_by_score_ties_keep_index_order() {
    assert_eq!(rank_by_score(&[0.5, 0.9, 0.5, 0.9]), vec![1, 3, 0, 2]);
    assert_eq!(rank_by_score(&[1.0, 1.0, 1.0]), vec![0, 1, 2]);
}

#[test]
fn test_rank_by_score_negative_scores() {
    assert_eq!(rank_by_score(&[-1.0, -0.5, -2.0]), vec![1, 0, 2]);
}

#[test]
fn test_predict_batch_from_table() {
    let model = handcrafted();
    let table = Matrix::from_vec(2, 2, vec![1.0, 2.0, 0.0, 1.0]).expect("valid");
    let ranked = model.predict_batch(UserBatch::from(table), Some(1)).expect("valid batch");
    assert_eq!(ranked, vec![vec![0], vec![2]]);
}

#[test]
fn test_predict_batch_respects_user_column() {
    let users = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]).expect("valid");
    let items = Matrix::from_vec(3, 2, vec![0.9, 0.1, 0.5, 0.5, 0.2, 0.8]).expect("valid");
    let model = CLiMFModel::from_factors(users, items, (1, 0)).expect("valid");
    let table = Matrix::from_vec(1, 2, vec![2.0, 1.0]).expect("valid");
    let ranked = model.predict_batch(table.into(), Some(1)).expect("valid batch");
    assert_eq!(ranked, vec![vec![0]]);
}

#[test]
fn test_predict_batch_rejects_bad_cells() {
    let table = Matrix::from_vec(1, 2, vec![-1.0, 0.0]).expect("valid");
    assert!(handcrafted().predict_batch(table.into(), None).is_err());
}

#[test]
fn test_evaluate_mrr() {
    let model = handcrafted();
    // User 0 ranks [2, 1, 0]: item 1 at rank 2. User 1 ranks [0, 1, 2]: item 0 at rank 1.
    let held_out = Interactions::new(vec![(0, 1), (1, 0)], (2, 3)).expect("valid");
    let mrr = model.evaluate_mrr(&held_out).expect("same shape");
    assert!((mrr - 0.75).abs() < 1e-6);
}

#[test]
fn test_evaluate_mrr_skips_inactive_users() {
    let model = handcrafted();
    let held_out = Interactions::new(vec![(1, 2)], (2, 3)).expect("valid");
    let mrr = model.evaluate_mrr(&held_out).expect("same shape");
    assert!((mrr - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_evaluate_mrr_shape_mismatch() {
    let held_out = Interactions::new(vec![(0, 0)], (5, 3)).expect("valid");
    assert!(matches!(
        handcrafted().evaluate_mrr(&held_out),
        Err(ClimfError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_from_factors_rejects_mismatched_k() {
    let users = Matrix::zeros(2, 2);
    let items = Matrix::zeros(3, 4);
    assert!(CLiMFModel::from_factors(users, items, DEFAULT_ORDER).is_err());
}

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("climf.bin");
    let model = handcrafted();

    model.save(&path).expect("save succeeds");
    let loaded = CLiMFModel::load(&path).expect("load succeeds");

    assert_eq!(loaded, model);
    assert_eq!(loaded.predict(&[0, 1], None), model.predict(&[0, 1], None));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = CLiMFModel::load(dir.path().join("missing.bin")).unwrap_err();
    assert!(matches!(err, ClimfError::Io(_)));
}

#[test]
fn test_load_garbage_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("garbage.bin");
    fs::write(&path, b"not a model").expect("write");
    assert!(CLiMFModel::load(&path).is_err());
}
