//! End-to-end tests: table ingestion, training, ranking, persistence and the
//! JSON prediction boundary.

use aprender_climf::prelude::*;
use aprender_climf::recommend::DEFAULT_ORDER;
use serde_json::json;

fn scenario() -> Interactions {
    Interactions::new(vec![(0, 1), (0, 2), (1, 0), (2, 3)], (3, 4)).expect("valid scenario")
}

fn scenario_learner(seed: u64) -> CLiMF {
    CLiMF::new()
        .with_n_factors(2)
        .with_steps(50)
        .with_alpha(0.01)
        .with_beta(0.01)
        .with_random_state(seed)
}

#[test]
fn test_scenario_returns_permutation() {
    let model = scenario_learner(0).fit(&scenario()).expect("fit");
    let mut ranking = model.predict(&[0], None).remove(0);
    ranking.sort_unstable();
    assert_eq!(ranking, vec![0, 1, 2, 3]);
}

#[test]
fn test_scenario_prefers_observed_items() {
    let data = scenario();
    let seeds = 500;
    let mut wins = 0usize;
    let mut comparisons = 0usize;

    for seed in 0..seeds {
        let model = scenario_learner(seed).fit(&data).expect("fit");
        let ranking = model.recommend(0, None);
        let position = |item: usize| ranking.iter().position(|&i| i == item).expect("ranked");
        for relevant in [1, 2] {
            for other in [0, 3] {
                comparisons += 1;
                if position(relevant) < position(other) {
                    wins += 1;
                }
            }
        }
    }

    let rate = wins as f64 / comparisons as f64;
    assert!(rate > 0.5, "observed items ranked first in only {rate:.3} of comparisons");
}

#[test]
fn test_table_ingestion_matches_pairs() {
    // Columns: (item, user, rating); rating is ignored.
    let table = Matrix::from_vec(
        4,
        3,
        vec![1.0, 0.0, 5.0, 2.0, 0.0, 3.0, 0.0, 1.0, 4.0, 3.0, 2.0, 1.0],
    )
    .expect("valid table");
    let data = Interactions::from_table(&table, (1, 0)).expect("valid table");

    assert_eq!(data.shape(), (3, 4));
    assert_eq!(data.order(), (1, 0));
    assert_eq!(data.items_of(0), &[1, 2]);
    assert_eq!(data.items_of(1), &[0]);
    assert_eq!(data.items_of(2), &[3]);

    let model = scenario_learner(1).fit(&data).expect("fit");
    assert_eq!(model.order(), (1, 0));

    // A serving batch in the same layout is read from the user column.
    let batch = Matrix::from_vec(2, 3, vec![9.0, 2.0, 0.0, 9.0, 0.0, 0.0]).expect("valid");
    let via_table = model.predict_batch(batch.into(), None).expect("valid batch");
    assert_eq!(via_table, model.predict(&[2, 0], None));
}

#[test]
fn test_json_batch_boundary() {
    let model = scenario_learner(2).fit(&scenario()).expect("fit");

    let batch = UserBatch::try_from(&json!([0, 1, 2])).expect("index array");
    let ranked = model.predict_batch(batch, Some(2)).expect("valid batch");
    assert_eq!(ranked, model.predict(&[0, 1, 2], Some(2)));

    let err = UserBatch::try_from(&json!({"users": [0]})).unwrap_err();
    assert_eq!(err.to_string(), "Unrecognized argument (instance of 'object')");
}

#[test]
fn test_unknown_users_are_served() {
    let model = scenario_learner(3).fit(&scenario()).expect("fit");
    let ranked = model.predict(&[0, 3, 1_000], Some(3));
    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|r| r.len() == 3));
}

#[test]
fn test_persistence_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("model.bin");

    let model = scenario_learner(4).fit(&scenario()).expect("fit");
    model.save(&path).expect("save");
    let loaded = CLiMFModel::load(&path).expect("load");

    assert_eq!(loaded.shape(), model.shape());
    assert_eq!(loaded.order(), DEFAULT_ORDER);
    assert_eq!(loaded.predict(&[0, 1, 2], None), model.predict(&[0, 1, 2], None));
}

#[test]
fn test_config_file_drives_training() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("climf.json");
    std::fs::write(
        &path,
        r#"{"K": 3, "steps": 20, "alpha": 0.01, "beta": 0.01, "random_state": 8}"#,
    )
    .expect("write config");

    let config = ClimfConfig::from_json_file(&path).expect("valid config");
    let learner = CLiMF::from_config(config).expect("valid config");
    let a = learner.fit(&scenario()).expect("fit");
    let b = learner.fit(&scenario()).expect("fit");

    assert_eq!(a.n_factors(), 3);
    assert_eq!(a, b);
}

#[test]
fn test_held_out_evaluation() {
    let model = scenario_learner(5).fit(&scenario()).expect("fit");
    let mrr = model.evaluate_mrr(&scenario()).expect("same shape");
    assert!((0.25..=1.0).contains(&mrr), "MRR {mrr} below the 1/num_items floor");
}

#[test]
fn test_generic_learner_interface() {
    fn top1<L: Learner>(learner: &L, data: &Interactions) -> Vec<usize> {
        learner.fit(data).expect("fit").recommend(0, Some(1))
    }
    assert_eq!(top1(&scenario_learner(6), &scenario()).len(), 1);
}
