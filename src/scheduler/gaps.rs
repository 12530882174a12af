use super::{assignment::resolve_pool, CoverageGap, GapKind, SchedError};
use crate::calendar::ShiftCalendar;
use crate::model::Roster;

/// Parcourt le calendrier sans tirage et relève les créneaux impossibles à couvrir.
pub fn detect_gaps(roster: &Roster, calendar: &ShiftCalendar) -> Vec<CoverageGap> {
    let mut out = Vec::new();

    for (date, shift) in calendar.generate() {
        let kind = match resolve_pool(roster, date, shift) {
            Ok(pool) if pool.is_empty() => GapKind::NoCandidates,
            Ok(_) => continue,
            Err(SchedError::UnknownShift(_)) => GapKind::UnknownShift,
            Err(_) => continue,
        };
        out.push(CoverageGap {
            date,
            shift: shift.clone(),
            kind,
        });
    }

    out
}
