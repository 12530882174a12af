use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Format d'affichage d'une date dans une ligne de planning (`Jan 07`).
pub const ROW_DATE_FORMAT: &str = "%b %d";

/// Identifiant fort pour un opérateur
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(String);

impl OperatorId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiant fort pour un créneau récurrent ("Sunday AM", ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exclusions ponctuelles : (date, créneau) → opérateurs retirés du tirage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exceptions {
    by_date: HashMap<NaiveDate, HashMap<ShiftId, HashSet<OperatorId>>>,
}

impl Exceptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retire `operator` du créneau `shift` le jour `date`.
    pub fn insert(&mut self, date: NaiveDate, shift: ShiftId, operator: OperatorId) {
        self.by_date
            .entry(date)
            .or_default()
            .entry(shift)
            .or_default()
            .insert(operator);
    }

    /// Journée entière : une exclusion par créneau prévu ce jour-là.
    pub fn insert_whole_day<'a, I>(&mut self, date: NaiveDate, shifts: I, operator: &OperatorId)
    where
        I: IntoIterator<Item = &'a ShiftId>,
    {
        for shift in shifts {
            self.insert(date, shift.clone(), operator.clone());
        }
    }

    pub fn excluded(&self, date: NaiveDate, shift: &ShiftId) -> Option<&HashSet<OperatorId>> {
        self.by_date.get(&date).and_then(|slots| slots.get(shift))
    }

    pub fn is_excluded(&self, date: NaiveDate, shift: &ShiftId, operator: &OperatorId) -> bool {
        self.excluded(date, shift)
            .is_some_and(|set| set.contains(operator))
    }

    /// Nombre de paires (date, créneau) concernées.
    pub fn len(&self) -> usize {
        self.by_date.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Roster immuable : opérateurs, disponibilités transposées, exceptions.
///
/// Invariant : tout opérateur présent dans `availability` figure dans `names`.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: Vec<OperatorId>,
    index: HashMap<OperatorId, usize>,
    availability: HashMap<ShiftId, Vec<OperatorId>>,
    exceptions: Exceptions,
}

impl Roster {
    /// Construit le roster en transposant `opérateur → créneaux` en
    /// `créneau → opérateurs`, dans l'ordre d'insertion.
    ///
    /// Un opérateur sans créneau ne participe pas au tirage. Un nom répété
    /// fusionne ses créneaux avec la première occurrence.
    pub fn from_availability<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (OperatorId, S)>,
        S: IntoIterator<Item = ShiftId>,
    {
        let mut roster = Roster::default();
        for (name, shifts) in entries {
            let mut shifts = shifts.into_iter().peekable();
            if shifts.peek().is_none() {
                continue;
            }
            if !roster.index.contains_key(&name) {
                roster.index.insert(name.clone(), roster.names.len());
                roster.names.push(name.clone());
            }
            for shift in shifts {
                let pool = roster.availability.entry(shift).or_default();
                if !pool.contains(&name) {
                    pool.push(name.clone());
                }
            }
        }
        roster
    }

    pub fn with_exceptions(mut self, exceptions: Exceptions) -> Self {
        self.exceptions = exceptions;
        self
    }

    pub fn names(&self) -> &[OperatorId] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &OperatorId) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// `None` : créneau inconnu. `Some(&[])` n'arrive pas par construction.
    pub fn available_for(&self, shift: &ShiftId) -> Option<&[OperatorId]> {
        self.availability.get(shift).map(Vec::as_slice)
    }

    pub fn exceptions(&self) -> &Exceptions {
        &self.exceptions
    }
}

/// Ligne du planning produit : une par (date, créneau), dans l'ordre du calendrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    pub shift: ShiftId,
    pub operator: OperatorId,
}

impl ScheduleRow {
    pub fn display_date(&self) -> String {
        self.date.format(ROW_DATE_FORMAT).to_string()
    }

    /// Les trois chaînes consommées par les rendus.
    pub fn cells(&self) -> [String; 3] {
        [
            self.display_date(),
            self.shift.as_str().to_owned(),
            self.operator.as_str().to_owned(),
        ]
    }
}
