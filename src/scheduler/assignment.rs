use super::{types::SchedError, util, weights::RelWeights, AssignOptions, Assignment, Diagnostic};
use crate::model::{OperatorId, Roster, ScheduleRow, ShiftId};
use chrono::NaiveDate;
use num_bigint::BigUint;
use rand::Rng;
use std::collections::BTreeMap;

/// Candidats pour (date, créneau) après application des exceptions, dans
/// l'ordre de disponibilité. La règle anti-répétition n'est pas appliquée ici.
pub(super) fn resolve_pool<'r>(
    roster: &'r Roster,
    date: NaiveDate,
    shift: &ShiftId,
) -> Result<Vec<&'r OperatorId>, SchedError> {
    let available = roster
        .available_for(shift)
        .ok_or_else(|| SchedError::UnknownShift(shift.clone()))?;
    let excluded = roster.exceptions().excluded(date, shift);

    Ok(available
        .iter()
        .filter(|name| excluded.map_or(true, |set| !set.contains(*name)))
        .collect())
}

/// Un passage d'assignation : possède les poids et comptes, jetés à la fin.
#[derive(Debug, Clone)]
pub struct AssignRun<'r> {
    roster: &'r Roster,
    opts: AssignOptions,
    weights: RelWeights,
    counts: Vec<u32>,
    last: Option<usize>,
    rows: Vec<ScheduleRow>,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> AssignRun<'r> {
    pub(super) fn new(roster: &'r Roster, opts: AssignOptions) -> Self {
        Self {
            roster,
            opts,
            weights: RelWeights::new(roster.len()),
            counts: vec![0; roster.len()],
            last: None,
            rows: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Assigne un créneau : un tirage pondéré puis mise à jour de tous les poids.
    pub fn assign<R: Rng>(
        &mut self,
        date: NaiveDate,
        shift: &ShiftId,
        rng: &mut R,
    ) -> Result<&ScheduleRow, SchedError> {
        let roster = self.roster;
        let mut pool: Vec<usize> = resolve_pool(roster, date, shift)?
            .into_iter()
            .filter_map(|name| roster.position(name))
            .collect();

        if self.opts.no_repeat && pool.len() > 1 {
            if let Some(last) = self.last {
                pool.retain(|&idx| idx != last);
            }
        }

        let pool_weights: Vec<BigUint> = pool
            .iter()
            .map(|&idx| self.weights.get(idx).clone())
            .collect();
        let Some(drawn) = util::weighted_draw(&pool_weights, rng) else {
            #[cfg(feature = "logging")]
            tracing::warn!(%date, %shift, "no eligible operator");
            return Err(SchedError::NoEligibleOperator {
                date,
                shift: shift.clone(),
            });
        };
        let selected = pool[drawn];
        let names = roster.names();

        self.diagnostics.push(Diagnostic {
            date,
            shift: shift.clone(),
            counts: self.counts_snapshot(),
            rel_weights: self.weights.snapshot(names),
            pool: pool.iter().map(|&idx| names[idx].clone()).collect(),
            pool_weights,
        });

        #[cfg(feature = "logging")]
        tracing::debug!(%date, %shift, operator = %names[selected], pool = pool.len(), "assigned");

        self.weights.update(selected);
        self.counts[selected] += 1;
        self.last = Some(selected);
        self.rows.push(ScheduleRow {
            date,
            shift: shift.clone(),
            operator: names[selected].clone(),
        });

        Ok(&self.rows[self.rows.len() - 1])
    }

    pub fn weights(&self) -> &RelWeights {
        &self.weights
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn last_assigned(&self) -> Option<&OperatorId> {
        self.last.map(|idx| &self.roster.names()[idx])
    }

    fn counts_snapshot(&self) -> BTreeMap<OperatorId, u32> {
        self.roster
            .names()
            .iter()
            .cloned()
            .zip(self.counts.iter().copied())
            .collect()
    }

    pub fn finish(self) -> Assignment {
        let names = self.roster.names();
        Assignment {
            rows: self.rows,
            counts: names.iter().cloned().zip(self.counts).collect(),
            final_weights: names
                .iter()
                .cloned()
                .zip(self.weights.as_slice().iter().cloned())
                .collect(),
            diagnostics: self.diagnostics,
        }
    }
}
