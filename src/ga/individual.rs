//! Chromosome carrier.

use super::operators::{Crossover, Mutation};
use super::types::{FitnessArgs, FitnessFunction};
use crate::error::GaError;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// One candidate parameter vector bound to its operators and objective.
///
/// The chromosome is owned; offspring always receive fresh copies, so a
/// parent and its children never alias. The fitness function is shared
/// read-only across the whole population.
pub struct Individual<F: FitnessFunction> {
    chromosome: Vec<f64>,
    crossover: Crossover,
    mutation: Mutation,
    fitness_fn: Arc<F>,
}

impl<F: FitnessFunction> Individual<F> {
    /// Creates an individual. Operator tags are not checked here; an
    /// unimplemented tag fails when it is first applied.
    pub fn new(
        fitness_fn: Arc<F>,
        crossover: Crossover,
        mutation: Mutation,
        chromosome: Vec<f64>,
    ) -> Self {
        Self {
            chromosome,
            crossover,
            mutation,
            fitness_fn,
        }
    }

    /// Gene values, one per model parameter.
    pub fn chromosome(&self) -> &[f64] {
        &self.chromosome
    }

    /// Consumes the individual, returning its genes.
    pub fn into_chromosome(self) -> Vec<f64> {
        self.chromosome
    }

    /// Chromosome length.
    pub fn num_genes(&self) -> usize {
        self.chromosome.len()
    }

    /// Crossover operator used when this individual is the first parent.
    pub fn crossover(&self) -> Crossover {
        self.crossover
    }

    /// Mutation operator applied by [`mutate`](Self::mutate).
    pub fn mutation(&self) -> Mutation {
        self.mutation
    }

    /// Shared objective.
    pub fn fitness_fn(&self) -> &Arc<F> {
        &self.fitness_fn
    }

    /// Evaluates this individual.
    ///
    /// Writes the chromosome into `args.params`, overwriting whatever was
    /// there, then calls the fitness function with the whole record.
    pub fn fitness_function(&self, args: &mut FitnessArgs<F::Args>) -> Result<f64, GaError> {
        args.params.clear();
        args.params.extend_from_slice(&self.chromosome);
        self.fitness_fn.evaluate(args)
    }

    /// Produces two children with `second_parent` using this individual's
    /// crossover operator.
    ///
    /// The first child inherits this individual's objective and operator
    /// tags; the second inherits `second_parent`'s. Neither parent is
    /// modified.
    pub fn offspring<R: Rng>(
        &self,
        second_parent: &Self,
        rng: &mut R,
    ) -> Result<(Self, Self), GaError> {
        let (genes1, genes2) =
            self.crossover
                .apply(&self.chromosome, &second_parent.chromosome, rng)?;

        let child1 = Self::new(
            Arc::clone(&self.fitness_fn),
            self.crossover,
            self.mutation,
            genes1,
        );
        let child2 = Self::new(
            Arc::clone(&second_parent.fitness_fn),
            second_parent.crossover,
            second_parent.mutation,
            genes2,
        );
        Ok((child1, child2))
    }

    /// Mutates the chromosome in place using this individual's mutation
    /// operator. `pressure` is the fraction of genes targeted.
    pub fn mutate<R: Rng>(&mut self, pressure: f64, rng: &mut R) -> Result<(), GaError> {
        self.mutation.apply(&mut self.chromosome, pressure, rng)
    }
}

impl<F: FitnessFunction> Clone for Individual<F> {
    fn clone(&self) -> Self {
        Self {
            chromosome: self.chromosome.clone(),
            crossover: self.crossover,
            mutation: self.mutation,
            fitness_fn: Arc::clone(&self.fitness_fn),
        }
    }
}

impl<F: FitnessFunction> fmt::Debug for Individual<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Individual")
            .field("chromosome", &self.chromosome)
            .field("crossover", &self.crossover)
            .field("mutation", &self.mutation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    type Objective = fn(&[f64]) -> f64;

    fn sum_of_squares(params: &[f64]) -> f64 {
        params.iter().map(|x| x * x).sum()
    }

    fn individual(genes: Vec<f64>) -> Individual<Objective> {
        Individual::new(
            Arc::new(sum_of_squares as Objective),
            Crossover::OnePoint,
            Mutation::Normal,
            genes,
        )
    }

    #[test]
    fn test_construction() {
        let ind = individual(vec![1.0, 2.0, 3.0]);
        assert_eq!(ind.num_genes(), 3);
        assert_eq!(ind.chromosome(), &[1.0, 2.0, 3.0]);
        assert_eq!(ind.crossover(), Crossover::OnePoint);
        assert_eq!(ind.mutation(), Mutation::Normal);
    }

    #[test]
    fn test_fitness_overwrites_params() {
        let ind = individual(vec![1.0, 2.0]);
        let mut args = FitnessArgs::new(());
        args.params = vec![9.0, 9.0, 9.0];
        assert_eq!(ind.fitness_function(&mut args).unwrap(), 5.0);
        assert_eq!(args.params, vec![1.0, 2.0]);
    }

    #[test]
    fn test_offspring_inherit_parent_identity() {
        let mut rng = create_rng(42);
        let a = individual(vec![0.0; 6]);
        let b = Individual::new(
            Arc::new(sum_of_squares as Objective),
            Crossover::MultiplePoints,
            Mutation::Uniform,
            vec![1.0; 6],
        );

        let (c1, c2) = a.offspring(&b, &mut rng).unwrap();
        assert_eq!(c1.crossover(), Crossover::OnePoint);
        assert_eq!(c1.mutation(), Mutation::Normal);
        assert_eq!(c2.crossover(), Crossover::MultiplePoints);
        assert_eq!(c2.mutation(), Mutation::Uniform);
        assert!(Arc::ptr_eq(c1.fitness_fn(), a.fitness_fn()));
        assert!(Arc::ptr_eq(c2.fitness_fn(), b.fitness_fn()));
    }

    #[test]
    fn test_offspring_do_not_alias_parents() {
        let mut rng = create_rng(7);
        let a = individual(vec![0.1, 0.2, 0.3, 0.4]);
        let b = individual(vec![0.5, 0.6, 0.7, 0.8]);
        let (before_a, before_b) = (a.chromosome().to_vec(), b.chromosome().to_vec());

        let (mut c1, mut c2) = a.offspring(&b, &mut rng).unwrap();
        c1.mutate(1.0, &mut rng).unwrap();
        c2.mutate(1.0, &mut rng).unwrap();

        assert_eq!(a.chromosome(), before_a.as_slice());
        assert_eq!(b.chromosome(), before_b.as_slice());
    }

    #[test]
    fn test_offspring_uses_first_parent_operator() {
        let mut rng = create_rng(1);
        let a = Individual::new(
            Arc::new(sum_of_squares as Objective),
            Crossover::MultiplePoints,
            Mutation::Normal,
            vec![1.0, 2.0],
        );
        let b = individual(vec![3.0, 4.0]);

        assert!(matches!(
            a.offspring(&b, &mut rng),
            Err(GaError::UnsupportedOperator { .. })
        ));
        assert!(b.offspring(&a, &mut rng).is_ok());
    }

    #[test]
    fn test_offspring_length_mismatch() {
        let mut rng = create_rng(1);
        let a = individual(vec![1.0, 2.0, 3.0]);
        let b = individual(vec![1.0, 2.0]);
        assert!(matches!(
            a.offspring(&b, &mut rng),
            Err(GaError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_mutate_in_place() {
        let mut rng = create_rng(42);
        let mut ind = individual(vec![0.1, 0.5, 0.9, 0.3]);
        let before = ind.chromosome().to_vec();
        ind.mutate(0.5, &mut rng).unwrap();
        assert_eq!(ind.num_genes(), 4);
        assert_ne!(ind.chromosome(), before.as_slice());
    }

    #[test]
    fn test_mutate_zero_pressure() {
        let mut rng = create_rng(42);
        let mut ind = individual(vec![0.1, 0.5, 0.9]);
        ind.mutate(0.0, &mut rng).unwrap();
        assert_eq!(ind.chromosome(), &[0.1, 0.5, 0.9]);
    }

    #[test]
    fn test_uniform_mutation_fails_lazily() {
        let mut rng = create_rng(42);
        let mut ind = Individual::new(
            Arc::new(sum_of_squares as Objective),
            Crossover::OnePoint,
            Mutation::Uniform,
            vec![0.1, 0.2],
        );
        let err = ind.mutate(0.5, &mut rng).unwrap_err();
        assert!(err.is_configuration());
    }
}
