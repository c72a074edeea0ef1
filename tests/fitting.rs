//! End-to-end fitting runs.

use std::sync::Arc;
use u_epifit::epidemic::{simulate, Compartment, SeirArgs, SeirFitness, SeirParams};
use u_epifit::ga::{Crossover, GaConfig, Individual, Mutation, Optimisation, Population};
use u_epifit::random::create_rng;

type Objective = fn(&[f64]) -> f64;

fn distance_to_half(params: &[f64]) -> f64 {
    params.iter().map(|x| (x - 0.5) * (x - 0.5)).sum()
}

fn scenario() -> GaConfig {
    GaConfig::new(5)
        .with_size_population(20)
        .with_bounds(0.0, 1.0)
        .with_crossover(Crossover::OnePoint)
        .with_mutation(Mutation::Normal)
        .with_pressure(0.2)
        .with_prob_mutation(0.5)
        .with_num_generations(10)
        .with_optimisation(Optimisation::Minimise)
}

fn final_chromosomes<F: u_epifit::ga::FitnessFunction>(population: Population<F>) -> Vec<Vec<f64>> {
    population
        .into_individuals()
        .into_iter()
        .map(Individual::into_chromosome)
        .collect()
}

#[test]
fn test_best_of_run_improves_on_first_generation() {
    let trials = 20;
    let mut improved = 0;
    for seed in 0..trials {
        let mut population =
            Population::new(scenario(), Arc::new(distance_to_half as Objective), ()).unwrap();
        let mut rng = create_rng(seed);
        population.initialise_population(&mut rng);

        let report = population.optimise(&mut rng).unwrap();
        if report.best_cost < report.history[0].best_cost {
            improved += 1;
        }
    }
    assert!(
        improved >= 15,
        "expected most seeded runs to beat generation 0, got {improved}/{trials}"
    );
}

#[test]
fn test_seeded_runs_reproduce() {
    let run = || {
        let config = scenario().with_seed(2024);
        let mut population =
            Population::new(config, Arc::new(distance_to_half as Objective), ()).unwrap();
        let report = population.run().unwrap();
        (report, final_chromosomes(population))
    };

    let (report_a, genes_a) = run();
    let (report_b, genes_b) = run();
    assert_eq!(genes_a, genes_b);
    assert_eq!(report_a, report_b);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_scoring_matches_sequential() {
    let run = |parallel: bool| {
        let config = scenario().with_parallel(parallel);
        let mut population =
            Population::new(config, Arc::new(distance_to_half as Objective), ()).unwrap();
        let mut rng = create_rng(99);
        population.initialise_population(&mut rng);
        population.optimise(&mut rng).unwrap();
        final_chromosomes(population)
    };
    assert_eq!(run(false), run(true));
}

#[test]
fn test_seir_fit_without_mutation_stays_in_bounds() {
    let truth = SeirParams::new(0.5, 0.1, 0.3, 0.1, 0.01);
    let initial = [995.0, 0.0, 5.0, 0.0, 0.0];
    let observed: Vec<f64> = simulate(&initial, &truth, 1.0, 30)
        .iter()
        .map(|s| s[Compartment::Infected.index()])
        .collect();
    let args = SeirArgs::new(initial, 1.0, Compartment::Infected, observed);

    let config = GaConfig::new(SeirParams::LEN)
        .with_size_population(30)
        .with_bounds(0.0, 1.0)
        .with_prob_mutation(0.0)
        .with_num_generations(15);
    let mut population = Population::new(config, Arc::new(SeirFitness), args).unwrap();
    let mut rng = create_rng(5);
    population.initialise_population(&mut rng);

    let report = population.optimise(&mut rng).unwrap();
    assert_eq!(report.history.len(), 15);
    assert!(report.best_cost.is_finite());
    assert!(report
        .history
        .iter()
        .all(|s| s.best_cost.is_finite() && s.best_cost <= s.mean_cost));

    // Crossover only recombines loci, so every gene stays in the sampling range.
    for ind in population.individuals() {
        assert_eq!(ind.num_genes(), SeirParams::LEN);
        assert!(ind.chromosome().iter().all(|g| (0.0..=1.0).contains(g)));
    }
}

#[test]
fn test_seir_run_with_wrong_gene_count_fails() {
    let args = SeirArgs::new([995.0, 0.0, 5.0, 0.0, 0.0], 1.0, Compartment::Infected, vec![5.0; 3]);
    let config = GaConfig::new(4);
    let mut population = Population::new(config, Arc::new(SeirFitness), args).unwrap();
    let mut rng = create_rng(1);
    population.initialise_population(&mut rng);

    let err = population.optimise(&mut rng).unwrap_err();
    assert_eq!(
        err,
        u_epifit::GaError::DimensionMismatch {
            expected: 5,
            actual: 4
        }
    );
}
