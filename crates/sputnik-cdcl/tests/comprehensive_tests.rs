//! Comprehensive unit tests for the sputnik-cdcl crate.

use sputnik_cdcl::{CdclConfig, CdclSolver, SatResult};
use sputnik_format::DimacsCnf;

fn cnf(num_vars: usize, clauses: &[&[i64]]) -> DimacsCnf {
    DimacsCnf {
        num_vars,
        clauses: clauses.iter().map(|c| c.to_vec()).collect(),
    }
}

fn solve(problem: &DimacsCnf) -> SatResult {
    CdclSolver::new(problem).solve()
}

/// True when `model` (indexed by `var - 1`) satisfies every clause.
fn satisfies(problem: &DimacsCnf, model: &[bool]) -> bool {
    problem.clauses.iter().all(|clause| {
        clause.iter().any(|&lit| {
            let value = model[(lit.unsigned_abs() - 1) as usize];
            if lit > 0 { value } else { !value }
        })
    })
}

/// Exhaustive satisfiability check, usable for small variable counts only.
fn brute_force_sat(problem: &DimacsCnf) -> bool {
    assert!(problem.num_vars <= 16, "brute force explodes past 16 vars");
    (0..1u32 << problem.num_vars).any(|bits| {
        let model: Vec<bool> = (0..problem.num_vars).map(|i| bits >> i & 1 == 1).collect();
        satisfies(problem, &model)
    })
}

fn assert_sat_model(problem: &DimacsCnf) -> Vec<bool> {
    match solve(problem) {
        SatResult::Sat(model) => {
            assert!(
                satisfies(problem, &model),
                "returned model does not satisfy the formula"
            );
            model
        }
        other => panic!("expected SAT, got {other:?}"),
    }
}

fn assert_unsat(problem: &DimacsCnf) {
    match solve(problem) {
        SatResult::Unsat => (),
        other => panic!("expected UNSAT, got {other:?}"),
    }
}

/// Pigeonhole principle PHP(3, 2): three pigeons, two holes, at most one
/// pigeon per hole. Unsatisfiable.
fn pigeonhole_3_2() -> DimacsCnf {
    cnf(
        6,
        &[
            // pigeon p sits in some hole: vars (p-1)*2 + h
            &[1, 2],
            &[3, 4],
            &[5, 6],
            // at most one pigeon per hole 1 (vars 1, 3, 5)
            &[-1, -3],
            &[-1, -5],
            &[-3, -5],
            // at most one pigeon per hole 2 (vars 2, 4, 6)
            &[-2, -4],
            &[-2, -6],
            &[-4, -6],
        ],
    )
}

// =============================================================================
// Boundary behaviors
// =============================================================================

#[test]
fn test_empty_formula_is_sat_with_empty_model() {
    match solve(&cnf(0, &[])) {
        SatResult::Sat(model) => assert!(model.is_empty()),
        other => panic!("expected SAT, got {other:?}"),
    }
}

#[test]
fn test_empty_clause_is_immediately_unsat() {
    assert_unsat(&cnf(2, &[&[], &[1, 2]]));
}

#[test]
fn test_single_unit_clause() {
    let model = assert_sat_model(&cnf(1, &[&[1]]));
    assert_eq!(model, vec![true]);

    let model = assert_sat_model(&cnf(1, &[&[-1]]));
    assert_eq!(model, vec![false]);
}

#[test]
fn test_contradicting_units_are_unsat_at_root() {
    let mut solver = CdclSolver::new(&cnf(1, &[&[1], &[-1]]));
    match solver.solve() {
        SatResult::Unsat => (),
        other => panic!("expected UNSAT, got {other:?}"),
    }
    assert_eq!(solver.stats().decisions, 0);
}

#[test]
fn test_unassigned_variables_get_default_values() {
    // Variable 2 occurs in no clause; the model must still cover it.
    let model = assert_sat_model(&cnf(3, &[&[1], &[3]]));
    assert_eq!(model.len(), 3);
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_scenario_single_positive_unit() {
    // p cnf 1 1 / 1 0
    let model = assert_sat_model(&cnf(1, &[&[1]]));
    assert_eq!(model, vec![true]);
}

#[test]
fn test_scenario_opposite_units() {
    // p cnf 1 2 / 1 0 / -1 0
    assert_unsat(&cnf(1, &[&[1], &[-1]]));
}

#[test]
fn test_scenario_three_var_chain() {
    // p cnf 3 3 / 1 2 0 / -1 3 0 / -2 -3 0
    assert_sat_model(&cnf(3, &[&[1, 2], &[-1, 3], &[-2, -3]]));
}

#[test]
fn test_scenario_pigeonhole() {
    assert_unsat(&pigeonhole_3_2());
}

#[test]
fn test_scenario_forced_tail_variable() {
    // p cnf 4 4 / 1 2 0 / -1 3 0 / -2 3 0 / -3 4 0
    let problem = cnf(4, &[&[1, 2], &[-1, 3], &[-2, 3], &[-3, 4]]);
    let model = assert_sat_model(&problem);
    // Variable 3 comes out true under the first-free policy, forcing 4.
    assert!(model[3]);
}

#[test]
fn test_scenario_all_assignments_excluded() {
    // p cnf 2 4: every assignment over two variables is excluded.
    assert_unsat(&cnf(2, &[&[1, 2], &[1, -2], &[-1, 2], &[-1, -2]]));
}

// =============================================================================
// Completeness laws
// =============================================================================

#[test]
fn test_tautology_and_permutation_do_not_change_the_verdict() {
    let base = cnf(3, &[&[1, 2], &[-1, 3], &[-2, -3]]);
    let noisy = cnf(
        3,
        &[&[2, 1], &[3, -1], &[1, -1], &[-3, -2], &[2, 1, 2]],
    );
    assert_sat_model(&base);
    assert_sat_model(&noisy);

    let base = pigeonhole_3_2();
    let mut clauses: Vec<Vec<i64>> = base.clauses.iter().rev().cloned().collect();
    clauses.push(vec![6, -6]);
    assert_unsat(&DimacsCnf {
        num_vars: 6,
        clauses,
    });
}

#[test]
fn test_blocking_the_unique_model_makes_the_formula_unsat() {
    let problem = cnf(3, &[&[1], &[-1, 2], &[-2, 3]]);
    let model = assert_sat_model(&problem);
    assert_eq!(model, vec![true, true, true]);

    let blocking: Vec<i64> = model
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let var = (i + 1) as i64;
            if v { -var } else { var }
        })
        .collect();
    let mut clauses = problem.clauses.clone();
    clauses.push(blocking);
    assert_unsat(&DimacsCnf {
        num_vars: 3,
        clauses,
    });
}

#[test]
fn test_blocking_loop_enumerates_every_model() {
    // Repeatedly block the returned model; the number of iterations until
    // UNSAT must equal the exhaustive model count.
    let mut problem = cnf(3, &[&[1, 2], &[-1, 3], &[-2, -3]]);
    let exhaustive = (0..1u32 << 3)
        .filter(|bits| {
            let model: Vec<bool> = (0..3).map(|i| bits >> i & 1 == 1).collect();
            satisfies(&problem, &model)
        })
        .count();

    let mut found = 0;
    loop {
        match solve(&problem) {
            SatResult::Sat(model) => {
                found += 1;
                assert!(found <= exhaustive, "solver repeated a blocked model");
                let blocking: Vec<i64> = model
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        let var = (i + 1) as i64;
                        if v { -var } else { var }
                    })
                    .collect();
                problem.clauses.push(blocking);
            }
            SatResult::Unsat => break,
            other => panic!("unexpected result {other:?}"),
        }
    }
    assert_eq!(found, exhaustive);
}

#[test]
fn test_verdicts_agree_with_brute_force_on_random_instances() {
    // Deterministic xorshift64 stream; 3-SAT instances dense enough to mix
    // SAT and UNSAT outcomes.
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for round in 0..60 {
        let num_vars = 5;
        let num_clauses = 14 + round % 16;
        let mut clauses = Vec::with_capacity(num_clauses);
        for _ in 0..num_clauses {
            let mut clause = Vec::with_capacity(3);
            for _ in 0..3 {
                let var = (next() % num_vars as u64) as i64 + 1;
                let lit = if next() & 1 == 1 { var } else { -var };
                clause.push(lit);
            }
            clauses.push(clause);
        }
        let problem = DimacsCnf {
            num_vars,
            clauses,
        };

        match solve(&problem) {
            SatResult::Sat(model) => {
                assert!(satisfies(&problem, &model));
                assert!(brute_force_sat(&problem));
            }
            SatResult::Unsat => {
                assert!(!brute_force_sat(&problem));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    let problem = cnf(4, &[&[1, 2], &[-1, 3], &[-2, 3], &[-3, 4]]);
    let first = assert_sat_model(&problem);
    let second = assert_sat_model(&problem);
    assert_eq!(first, second);

    let mut a = CdclSolver::new(&problem);
    let mut b = CdclSolver::new(&problem);
    let _ = a.solve();
    let _ = b.solve();
    assert_eq!(a.stats().decisions, b.stats().decisions);
    assert_eq!(a.stats().conflicts, b.stats().conflicts);
    assert_eq!(a.stats().propagations, b.stats().propagations);
}

// =============================================================================
// Clause learning
// =============================================================================

#[test]
fn test_unsat_search_learns_clauses() {
    let problem = pigeonhole_3_2();
    let mut solver = CdclSolver::new(&problem);
    let original = solver.num_clauses();
    match solver.solve() {
        SatResult::Unsat => (),
        other => panic!("expected UNSAT, got {other:?}"),
    }
    assert!(solver.stats().conflicts > 0);
    assert_eq!(
        solver.num_clauses() - original,
        solver.stats().learned_clauses as usize
    );
}

#[test]
fn test_learning_survives_backjumps() {
    // A formula that forces at least one non-trivial backjump before the
    // satisfying region is found: the first-free policy walks into a
    // conflict on the early variables.
    let problem = cnf(
        5,
        &[
            &[-1, -2, 3],
            &[-1, -3, 4],
            &[-1, -4, -3],
            &[1, 5],
            &[-5, 2],
        ],
    );
    let model = assert_sat_model(&problem);
    assert!(satisfies(&problem, &model));
}

// =============================================================================
// Conflict analyzer
// =============================================================================

#[test]
fn test_first_uip_resolution_on_a_diamond_graph() {
    use sputnik_base::{Lit, Value};
    use sputnik_cdcl::clause_db::ClauseDatabase;
    use sputnik_cdcl::conflict::{ConflictAnalyzer, ImplicationGraph};

    let lit = Lit::from_dimacs;

    // Two decisions feed two forced assignments which clash in the last
    // clause; the first UIP is the second decision itself.
    let mut db = ClauseDatabase::new();
    let c0 = db.add_original(&[lit(1), lit(2), lit(-3)]).unwrap();
    let c1 = db.add_original(&[lit(1), lit(2), lit(-4)]).unwrap();
    let c2 = db.add_original(&[lit(3), lit(4), lit(-5)]).unwrap();
    let c3 = db.add_original(&[lit(3), lit(4), lit(5)]).unwrap();

    let mut graph = ImplicationGraph::new(5);
    graph.on_decision(lit(-1));
    graph.on_decision(lit(-2));
    graph.on_propagation(lit(-3), c0);
    graph.on_propagation(lit(-4), c1);
    graph.on_propagation(lit(-5), c2);

    // Every literal of the conflicting clause is false.
    assert!(db.get(c3).lits().iter().all(|&l| graph.value_of(l) == Value::False));

    let mut analyzer = ConflictAnalyzer::new(5);
    let (learnt, backjump) = analyzer.analyze(c3, &db, &graph);

    assert_eq!(learnt, vec![lit(2), lit(1)]);
    assert_eq!(backjump, 1);

    // Exactly one literal of the learned clause sits at the conflict level,
    // and the clause is false under the assignment that produced it.
    let current = graph.current_level();
    let at_current = learnt
        .iter()
        .filter(|l| graph.level(l.var()) == current)
        .count();
    assert_eq!(at_current, 1);
    assert!(learnt.iter().all(|&l| graph.value_of(l) == Value::False));
}

#[test]
fn test_analysis_produces_a_unit_clause_when_the_uip_stands_alone() {
    use sputnik_base::Lit;
    use sputnik_cdcl::clause_db::ClauseDatabase;
    use sputnik_cdcl::conflict::{ConflictAnalyzer, ImplicationGraph};

    let lit = Lit::from_dimacs;

    // A single decision forces both polarities of variable 3.
    let mut db = ClauseDatabase::new();
    let c0 = db.add_original(&[lit(-1), lit(2)]).unwrap();
    let c1 = db.add_original(&[lit(-2), lit(3)]).unwrap();
    let c2 = db.add_original(&[lit(-2), lit(-3)]).unwrap();

    let mut graph = ImplicationGraph::new(3);
    graph.on_decision(lit(1));
    graph.on_propagation(lit(2), c0);
    graph.on_propagation(lit(3), c1);

    let mut analyzer = ConflictAnalyzer::new(3);
    let (learnt, backjump) = analyzer.analyze(c2, &db, &graph);

    assert_eq!(learnt, vec![lit(-2)]);
    assert_eq!(backjump, 0);
}

// =============================================================================
// Cancellation and limits
// =============================================================================

#[test]
fn test_abort_flag_yields_unknown() {
    let problem = pigeonhole_3_2();
    let mut solver = CdclSolver::new(&problem);
    solver.abort_flag().store(true, std::sync::atomic::Ordering::Relaxed);
    match solver.solve() {
        SatResult::Unknown(reason) => assert!(reason.contains("abort")),
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[test]
fn test_conflict_limit_yields_unknown() {
    let problem = pigeonhole_3_2();
    let config = CdclConfig {
        conflict_limit: Some(1),
        ..CdclConfig::default()
    };
    let mut solver = CdclSolver::with_config(&problem, config);
    match solver.solve() {
        SatResult::Unknown(reason) => assert!(reason.contains("conflict limit")),
        other => panic!("expected Unknown, got {other:?}"),
    }
    assert_eq!(solver.stats().conflicts, 1);
}

#[test]
fn test_false_default_polarity_still_finds_models() {
    let problem = cnf(3, &[&[1, 2], &[-1, 3], &[-2, -3]]);
    let config = CdclConfig {
        default_polarity: false,
        ..CdclConfig::default()
    };
    let mut solver = CdclSolver::with_config(&problem, config);
    match solver.solve() {
        SatResult::Sat(model) => assert!(satisfies(&problem, &model)),
        other => panic!("expected SAT, got {other:?}"),
    }
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn test_stats_reflect_the_search() {
    let problem = cnf(3, &[&[1, 2], &[-1, 3], &[-2, -3]]);
    let mut solver = CdclSolver::new(&problem);
    let _ = solver.solve();
    let stats = solver.stats();
    assert!(stats.decisions >= 1);
    assert!(stats.propagations >= 1);
}
