use crate::calendar::ShiftCalendar;
use crate::model::{Exceptions, OperatorId, Roster, ShiftId};
use crate::scheduler::AssignOptions;
use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Configuration complète d'un planning (document JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Jour de la semaine (`Monday`, `Mon`, ...) → créneaux, dans l'ordre.
    #[serde(default)]
    pub shifts: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub operators: Vec<OperatorConfig>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default = "default_no_repeat")]
    pub no_repeat: bool,
}

fn default_no_repeat() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub shifts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<ExceptionEntry>,
}

/// `[date]` : journée entière ; `[date, shift]` : un seul créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExceptionEntry {
    WholeDay([NaiveDate; 1]),
    Shift(NaiveDate, String),
}

impl ExceptionEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            ExceptionEntry::WholeDay([date]) => *date,
            ExceptionEntry::Shift(date, _) => *date,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("title cannot be empty");
        }
        let by_weekday = self.weekday_shifts()?;

        let mut seen = HashSet::new();
        for op in &self.operators {
            if op.name.trim().is_empty() {
                bail!("operator name cannot be empty");
            }
            if !seen.insert(op.name.as_str()) {
                bail!("duplicate operator name: {}", op.name);
            }
            for entry in &op.exceptions {
                if let ExceptionEntry::Shift(date, shift) = entry {
                    let planned = by_weekday
                        .get(&date.weekday())
                        .is_some_and(|list| list.iter().any(|s| s.as_str() == shift));
                    if !planned {
                        bail!(
                            "exception for {} on {date}: shift {shift} is not scheduled on {}",
                            op.name,
                            date.weekday()
                        );
                    }
                }
            }
        }
        Ok(())
    }

    fn weekday_shifts(&self) -> Result<HashMap<Weekday, Vec<ShiftId>>> {
        let mut out = HashMap::new();
        for (day, shifts) in &self.shifts {
            let weekday: Weekday = day
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("unknown weekday: {day}"))?;
            if out
                .insert(weekday, shifts.iter().map(ShiftId::new).collect())
                .is_some()
            {
                bail!("weekday {weekday} configured twice");
            }
        }
        Ok(out)
    }

    pub fn calendar(&self) -> Result<ShiftCalendar> {
        Ok(ShiftCalendar::new(
            self.start_date,
            self.end_date,
            self.weekday_shifts()?,
        ))
    }

    /// Roster transposé, exceptions journée entière étendues aux créneaux du jour.
    pub fn roster(&self) -> Result<Roster> {
        let calendar = self.calendar()?;
        let mut exceptions = Exceptions::new();
        for op in &self.operators {
            let name = OperatorId::new(&op.name);
            for entry in &op.exceptions {
                match entry {
                    ExceptionEntry::WholeDay([date]) => {
                        exceptions.insert_whole_day(
                            *date,
                            calendar.shifts_on(date.weekday()),
                            &name,
                        );
                    }
                    ExceptionEntry::Shift(date, shift) => {
                        exceptions.insert(*date, ShiftId::new(shift), name.clone());
                    }
                }
            }
        }

        let roster = Roster::from_availability(self.operators.iter().map(|op| {
            (
                OperatorId::new(&op.name),
                op.shifts.iter().map(ShiftId::new).collect::<Vec<_>>(),
            )
        }));
        Ok(roster.with_exceptions(exceptions))
    }

    pub fn assign_options(&self) -> AssignOptions {
        AssignOptions {
            no_repeat: self.no_repeat,
        }
    }

    /// `2024` ou `2024/2025` si la période chevauche deux années.
    pub fn year_label(&self) -> String {
        let (start, end) = (self.start_date.year(), self.end_date.year());
        if start == end {
            start.to_string()
        } else {
            format!("{start}/{end}")
        }
    }
}

pub fn load_config_from_str(raw: &str) -> Result<Config> {
    let config: Config = serde_json::from_str(raw).context("parsing configuration")?;
    config.validate()?;
    Ok(config)
}

pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    load_config_from_str(&data).with_context(|| format!("loading {}", path.display()))
}
