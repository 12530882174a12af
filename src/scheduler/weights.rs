use crate::model::OperatorId;
use num_bigint::BigUint;
use std::collections::BTreeMap;

/// Facteur appliqué à toute personne non tirée.
pub const COOLING_FACTOR: u32 = 10;

/// Poids relatifs entiers (précision arbitraire), alignés sur l'ordre du roster.
///
/// Un poids élevé signifie « en retard » : plus de chances d'être tiré.
/// Après chaque mise à jour le minimum vaut exactement 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelWeights {
    values: Vec<BigUint>,
}

impl RelWeights {
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![BigUint::from(1u32); len],
        }
    }

    pub fn get(&self, idx: usize) -> &BigUint {
        &self.values[idx]
    }

    pub fn as_slice(&self) -> &[BigUint] {
        &self.values
    }

    pub fn min(&self) -> Option<&BigUint> {
        self.values.iter().min()
    }

    /// ×10 pour tous sauf `selected`, puis division entière par le minimum.
    pub fn update(&mut self, selected: usize) {
        for (idx, w) in self.values.iter_mut().enumerate() {
            if idx != selected {
                *w *= COOLING_FACTOR;
            }
        }
        let Some(lo) = self.min().cloned() else {
            return;
        };
        for w in self.values.iter_mut() {
            *w /= &lo;
        }
    }

    pub fn snapshot(&self, names: &[OperatorId]) -> BTreeMap<OperatorId, BigUint> {
        names.iter().cloned().zip(self.values.iter().cloned()).collect()
    }
}
