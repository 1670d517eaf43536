//! Property tests over seeded random forests and mutation sequences.
//!
//! Every property runs against several seeds; a failure names the seed and
//! the mutation so it can be replayed with `RUST_LOG=debug`.

use orgtree_core::EngineConfig;
use orgtree_mutation::{Mutation, MutationEngine};
use orgtree_search::SearchIndex;
use orgtree_session::OrgSession;
use orgtree_snapshot::export_forest;
use orgtree_testkit::{check_invariants, init_tracing, ForestConfig, ForestGenerator, MutationGenerator};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SEEDS: [u64; 5] = [1, 7, 42, 1234, 9001];

fn forest(seed: u64, config: &EngineConfig) -> (MutationEngine, StdRng, MutationGenerator) {
    let forest = ForestConfig::new().with_seed(seed);
    let mut rng = StdRng::seed_from_u64(forest.seed);
    let engine = ForestGenerator::new(forest.clone())
        .generate(config, &mut rng)
        .unwrap();
    (engine, rng, MutationGenerator::new(forest.users as u64 + 1))
}

// ========== TEST: invariants hold after every mutation ==========

#[test]
fn test_random_sequences_keep_invariants() {
    init_tracing();
    let config = EngineConfig::default();

    for seed in SEEDS {
        // GIVEN a random forest
        let (mut engine, mut rng, mut mutations) = forest(seed, &config);
        let (mut applied, mut rejected) = (0, 0);

        // WHEN a long random sequence is applied
        for step in 0..ForestConfig::new().mutations {
            let mutation = mutations.next(engine.store(), &mut rng);
            let before = export_forest(engine.store());

            match engine.apply(mutation.clone()) {
                Ok(result) => {
                    applied += 1;
                    // THEN an empty change set means nothing moved
                    if result.is_noop() {
                        assert_eq!(
                            export_forest(engine.store()),
                            before,
                            "seed {seed} step {step}: no-op {mutation:?} changed the forest"
                        );
                    }
                }
                Err(err) => {
                    // THEN a rejected mutation changes nothing
                    rejected += 1;
                    assert_eq!(
                        export_forest(engine.store()),
                        before,
                        "seed {seed} step {step}: {mutation:?} failed with {err} but changed the forest"
                    );
                }
            }

            // THEN every derived field is consistent
            if let Err(message) = check_invariants(engine.store(), &config.path_separator) {
                panic!("seed {seed} step {step}: {mutation:?} broke an invariant: {message}");
            }
        }

        assert!(applied > 0 && rejected > 0, "seed {seed}: {applied} applied, {rejected} rejected");
    }
}

// ========== TEST: renaming to the current name changes nothing ==========

#[test]
fn test_same_name_rename_leaves_forest_untouched() {
    let config = EngineConfig::default();

    for seed in SEEDS {
        // GIVEN a random forest that has already seen mutations
        let (mut engine, mut rng, mut mutations) = forest(seed, &config);
        for _ in 0..50 {
            let mutation = mutations.next(engine.store(), &mut rng);
            let _ = engine.apply(mutation);
        }
        let before = export_forest(engine.store());

        // WHEN every node is renamed to its own name
        for id in engine.store().walk() {
            let name = engine.store().get(id).unwrap().name.clone();
            let applied = engine.rename(id, name).unwrap();
            assert!(applied.is_noop(), "seed {seed}: renaming {id} changed {:?}", applied.changes);
        }

        // THEN every path, level and total is as it was
        assert_eq!(export_forest(engine.store()), before, "seed {seed}");
    }
}

// ========== TEST: moves into the own subtree always fail ==========

#[test]
fn test_moves_into_subtree_are_cycles() {
    let config = EngineConfig::default();

    for seed in SEEDS {
        let (mut engine, ..) = forest(seed, &config);
        let before = export_forest(engine.store());

        for id in engine.store().walk() {
            for target in engine.store().subtree(id) {
                let err = engine.move_node(id, Some(target), None).unwrap_err();
                assert!(
                    err.to_string().contains("would create a cycle"),
                    "seed {seed}: moving {id} under {target} gave {err}"
                );
            }
        }

        assert_eq!(export_forest(engine.store()), before);
    }
}

// ========== TEST: undo walks back to the starting forest ==========

#[test]
fn test_undo_restores_starting_forest() {
    init_tracing();
    let config = EngineConfig::default();

    for seed in SEEDS {
        // GIVEN a session over a random forest
        let (engine, mut rng, mut mutations) = forest(seed, &config);
        let start = export_forest(engine.store());
        let mut session = OrgSession::from_records(start.clone(), config.clone()).unwrap();

        // WHEN reversible mutations are applied
        let mut journaled = 0;
        while journaled < 50 {
            let mutation = mutations.next(session.store(), &mut rng);
            if matches!(mutation, Mutation::Delete { .. }) {
                continue;
            }
            if let Ok(changes) = session.apply(mutation) {
                if !changes.is_empty() {
                    journaled += 1;
                }
            }
        }
        assert_eq!(session.journal().len(), journaled);

        // THEN undoing all of them restores the start
        while session.can_undo() {
            session.undo().unwrap();
        }
        assert_eq!(export_forest(session.store()), start, "seed {seed}");
        check_invariants(session.store(), &config.path_separator).unwrap();
    }
}

// ========== TEST: incremental index matches a rebuild ==========

#[test]
fn test_index_refresh_matches_rebuild() {
    let config = EngineConfig::default().with_min_query_chars(2);
    let queries = ["sales", "west 1", "lead", "user1", "squad", "@acme", "unit"];

    for seed in SEEDS {
        // GIVEN an index that follows every change set
        let (mut engine, mut rng, mut mutations) = forest(seed, &config);
        let mut index = SearchIndex::build(engine.store(), &config);

        // WHEN random mutations are applied
        for _ in 0..100 {
            let mutation = mutations.next(engine.store(), &mut rng);
            if let Ok(applied) = engine.apply(mutation) {
                index.refresh(engine.store(), &applied.changes);
            }
        }

        // THEN it answers every query like a fresh index
        let rebuilt = SearchIndex::build(engine.store(), &config);
        assert_eq!(index.len(), rebuilt.len(), "seed {seed}");
        for query in queries {
            assert_eq!(
                index.compute_visible_set(query, engine.store()),
                rebuilt.compute_visible_set(query, engine.store()),
                "seed {seed} query {query:?}"
            );
        }
    }
}

// ========== TEST: totals equal the users placed below ==========

#[test]
fn test_totals_count_subtree_users() {
    let config = EngineConfig::default();

    for seed in SEEDS {
        let (engine, ..) = forest(seed, &config);
        let store = engine.store();

        for id in store.walk() {
            let placed: usize = store
                .subtree(id)
                .into_iter()
                .filter_map(|n| store.get(n))
                .map(|n| n.users.len())
                .sum();
            assert_eq!(store.get(id).unwrap().total_users, placed, "seed {seed} node {id}");
        }
        let roots: usize = store
            .roots()
            .iter()
            .filter_map(|r| store.get(*r))
            .map(|r| r.total_users)
            .sum();
        assert_eq!(roots, store.user_count());
    }
}
