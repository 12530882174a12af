mod assignment;
mod gaps;
mod types;
mod util;
mod weights;

pub use assignment::AssignRun;
pub use gaps::detect_gaps;
pub use types::{AssignOptions, Assignment, CoverageGap, Diagnostic, GapKind, SchedError};
pub use weights::{RelWeights, COOLING_FACTOR};

use crate::calendar::ShiftCalendar;
use crate::model::{Roster, ShiftId};
use chrono::NaiveDate;
use rand::Rng;

/// Assignation équitable : tirage pondéré auto-équilibré sur un roster figé.
#[derive(Debug, Clone, Copy)]
pub struct FairAssigner<'r> {
    roster: &'r Roster,
    opts: AssignOptions,
}

impl<'r> FairAssigner<'r> {
    pub fn new(roster: &'r Roster, opts: AssignOptions) -> Self {
        Self { roster, opts }
    }

    /// Démarre un passage : poids à 1, comptes à 0.
    pub fn start(&self) -> AssignRun<'r> {
        AssignRun::new(self.roster, self.opts)
    }

    /// Assigne chaque paire dans l'ordre. Toute erreur interrompt le passage
    /// et le planning partiel est abandonné.
    pub fn assign_all<'s, I, R>(&self, slots: I, rng: &mut R) -> Result<Assignment, SchedError>
    where
        I: IntoIterator<Item = (NaiveDate, &'s ShiftId)>,
        R: Rng,
    {
        let mut run = self.start();
        for (date, shift) in slots {
            run.assign(date, shift, rng)?;
        }
        Ok(run.finish())
    }

    pub fn schedule<R: Rng>(
        &self,
        calendar: &ShiftCalendar,
        rng: &mut R,
    ) -> Result<Assignment, SchedError> {
        self.assign_all(calendar.generate(), rng)
    }

    pub fn detect_gaps(&self, calendar: &ShiftCalendar) -> Vec<CoverageGap> {
        gaps::detect_gaps(self.roster, calendar)
    }
}
