//! Fixed-step numerical integration.

use super::model::{seir_model, SeirParams, States};

/// Advances `states` by one step of the classical fourth-order
/// Runge-Kutta method.
///
/// `model(n, states, params)` returns the time derivative of `states`.
/// `n` is forwarded untouched; the SEIR-D model uses it as the total
/// population.
pub fn runge_kutta_4<const N: usize, P, M>(
    model: M,
    n: f64,
    states: &[f64; N],
    params: &P,
    step: f64,
) -> [f64; N]
where
    M: Fn(f64, &[f64; N], &P) -> [f64; N],
{
    let k1 = model(n, states, params);
    let k2 = model(n, &advance(states, &k1, step / 2.0), params);
    let k3 = model(n, &advance(states, &k2, step / 2.0), params);
    let k4 = model(n, &advance(states, &k3, step), params);

    std::array::from_fn(|i| {
        states[i] + step / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i])
    })
}

/// `states + h * slope`.
fn advance<const N: usize>(states: &[f64; N], slope: &[f64; N], h: f64) -> [f64; N] {
    std::array::from_fn(|i| states[i] + h * slope[i])
}

/// Integrates the SEIR-D model from `initial`.
///
/// Returns `n_steps` states spaced `step` apart, the first being
/// `initial` itself. The total population is the sum of `initial`.
pub fn simulate(initial: &States, params: &SeirParams, step: f64, n_steps: usize) -> Vec<States> {
    let mut trajectory = Vec::with_capacity(n_steps);
    if n_steps == 0 {
        return trajectory;
    }

    let n: f64 = initial.iter().sum();
    let mut current = *initial;
    trajectory.push(current);
    for _ in 1..n_steps {
        current = runge_kutta_4(seir_model, n, &current, params, step);
        trajectory.push(current);
    }
    trajectory
}
