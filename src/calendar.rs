//! Énumération des créneaux à couvrir sur une période.
//!
//! Une période inversée (`first_date > last_date`) n'est pas une erreur :
//! elle produit simplement une séquence vide.

use crate::model::ShiftId;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

/// Période + créneaux par jour de la semaine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCalendar {
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    shifts: HashMap<Weekday, Vec<ShiftId>>,
}

impl ShiftCalendar {
    pub fn new(
        first_date: NaiveDate,
        last_date: NaiveDate,
        shifts: HashMap<Weekday, Vec<ShiftId>>,
    ) -> Self {
        Self {
            first_date,
            last_date,
            shifts,
        }
    }

    /// Créneaux prévus pour un jour de la semaine, dans l'ordre configuré.
    pub fn shifts_on(&self, weekday: Weekday) -> &[ShiftId] {
        self.shifts.get(&weekday).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Séquence paresseuse des paires (date, créneau), dates croissantes.
    pub fn generate(&self) -> Slots<'_> {
        Slots {
            calendar: self,
            current: Some(self.first_date),
            next_shift: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.generate().next().is_none()
    }
}

/// Itérateur fini, non redémarrable, produit par [`ShiftCalendar::generate`].
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    calendar: &'a ShiftCalendar,
    current: Option<NaiveDate>,
    next_shift: usize,
}

impl<'a> Iterator for Slots<'a> {
    type Item = (NaiveDate, &'a ShiftId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let date = self.current?;
            if date > self.calendar.last_date {
                self.current = None;
                return None;
            }
            let shifts = self.calendar.shifts_on(date.weekday());
            if let Some(shift) = shifts.get(self.next_shift) {
                self.next_shift += 1;
                return Some((date, shift));
            }
            self.next_shift = 0;
            self.current = date.succ_opt();
        }
    }
}

impl std::iter::FusedIterator for Slots<'_> {}
