#![forbid(unsafe_code)]
//! Fairrota — répartition équitable d'opérateurs sur des créneaux récurrents.
//!
//! - Calendrier : paires (date, créneau) sur une période, selon le jour de la semaine.
//! - Tirage pondéré auto-équilibré : ×10 pour les non-tirés, puis renormalisation.
//! - Exceptions ponctuelles, anti-répétition optionnelle.
//! - Configuration JSON, rendus texte/HTML (gabarit `$champ` optionnel), exports CSV/JSON en dehors du cœur.

pub mod calendar;
pub mod config;
pub mod io;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod storage;
pub mod template;

pub use calendar::{ShiftCalendar, Slots};
pub use config::{load_config_from_file, load_config_from_str, Config, ExceptionEntry, OperatorConfig};
pub use model::{Exceptions, OperatorId, Roster, ScheduleRow, ShiftId};
pub use render::{HtmlRenderer, ScheduleDocument, ScheduleRenderer, TextRenderer};
pub use scheduler::{
    detect_gaps, AssignOptions, AssignRun, Assignment, CoverageGap, Diagnostic, FairAssigner,
    GapKind, SchedError,
};
pub use storage::OutputStore;
pub use template::{load_template_from_file, HtmlTemplate, TemplateError};
