use crate::model::{OperatorId, ScheduleRow, ShiftId};
use chrono::NaiveDate;
use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use thiserror::Error;

/// Options d'assignation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOptions {
    /// Évite d'affecter deux créneaux consécutifs à la même personne
    /// (sauf si elle est seule candidate).
    pub no_repeat: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self { no_repeat: true }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("unknown shift: {0}")]
    UnknownShift(ShiftId),
    #[error("no eligible operator for {shift} on {date}")]
    NoEligibleOperator { date: NaiveDate, shift: ShiftId },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Photo de l'état au moment du tirage (avant mise à jour des poids).
///
/// Sert uniquement à vérifier l'algorithme ; rien n'est relu par le tirage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub date: NaiveDate,
    pub shift: ShiftId,
    pub counts: BTreeMap<OperatorId, u32>,
    pub rel_weights: BTreeMap<OperatorId, BigUint>,
    pub pool: Vec<OperatorId>,
    pub pool_weights: Vec<BigUint>,
}

/// Résultat complet d'un passage d'assignation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Assignment {
    pub rows: Vec<ScheduleRow>,
    /// Comptes finaux, dans l'ordre du roster.
    pub counts: Vec<(OperatorId, u32)>,
    /// Poids relatifs après le dernier tirage, dans l'ordre du roster.
    #[serde(serialize_with = "weights_as_decimal")]
    pub final_weights: Vec<(OperatorId, BigUint)>,
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Assignment {
    pub fn count_of(&self, operator: &OperatorId) -> Option<u32> {
        self.counts
            .iter()
            .find(|(name, _)| name == operator)
            .map(|(_, c)| *c)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

/// Poids en chaînes décimales : pas de perte au-delà de 2^53 côté JSON.
fn weights_as_decimal<S: Serializer>(
    weights: &[(OperatorId, BigUint)],
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_seq(weights.iter().map(|(name, w)| (name, w.to_str_radix(10))))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapKind {
    /// Le créneau n'apparaît dans aucune disponibilité
    UnknownShift,
    /// Tous les candidats sont exclus ce jour-là
    NoCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGap {
    pub date: NaiveDate,
    pub shift: ShiftId,
    pub kind: GapKind,
}
