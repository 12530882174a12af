use num_bigint::{BigUint, RandBigInt};
use rand::Rng;

/// Poids cumulés (sommes exactes).
pub(super) fn cumulative(weights: &[BigUint]) -> Vec<BigUint> {
    weights
        .iter()
        .scan(BigUint::default(), |acc, w| {
            *acc += w;
            Some(acc.clone())
        })
        .collect()
}

/// Premier indice dont le cumul dépasse strictement `x`.
pub(super) fn pick_index(cum: &[BigUint], x: &BigUint) -> usize {
    cum.partition_point(|c| c <= x)
}

/// Tirage par inversion de la fonction de répartition : un seul tirage
/// uniforme dans `[0, total)`. `None` si `weights` est vide.
pub(super) fn weighted_draw<R: Rng>(weights: &[BigUint], rng: &mut R) -> Option<usize> {
    let cum = cumulative(weights);
    let total = cum.last()?;
    if total.bits() == 0 {
        return None;
    }
    let x = rng.gen_biguint_below(total);
    Some(pick_index(&cum, &x))
}
