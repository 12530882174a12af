use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Champs substituables d'un gabarit HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Subtitle,
    ScheduleTable,
    ContactsTable,
    Notes,
    Css,
    Version,
}

impl Field {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "title" => Self::Title,
            "subtitle" => Self::Subtitle,
            "schedule_table" => Self::ScheduleTable,
            "contacts_table" => Self::ContactsTable,
            "notes" => Self::Notes,
            "css" => Self::Css,
            "version" => Self::Version,
            _ => return None,
        })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("invalid placeholder at byte {offset}")]
    InvalidPlaceholder { offset: usize },
    #[error("unknown placeholder: ${0}")]
    UnknownPlaceholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(Field),
}

/// Gabarit HTML à `$champ` / `${champ}` ; `$$` produit un `$` littéral.
///
/// Les champs sont validés au chargement : un nom inconnu est une erreur,
/// pas une chaîne laissée telle quelle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlTemplate {
    segments: Vec<Segment>,
}

impl HtmlTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '$' {
                text.push(c);
                continue;
            }
            let braced = match chars.peek() {
                Some((_, '$')) => {
                    chars.next();
                    text.push('$');
                    continue;
                }
                Some((_, '{')) => {
                    chars.next();
                    true
                }
                _ => false,
            };

            let mut name = String::new();
            while let Some(&(_, n)) = chars.peek() {
                let ident = n == '_'
                    || n.is_ascii_alphabetic()
                    || (!name.is_empty() && n.is_ascii_digit());
                if !ident {
                    break;
                }
                name.push(n);
                chars.next();
            }
            if braced && chars.next_if(|&(_, n)| n == '}').is_none() {
                return Err(TemplateError::InvalidPlaceholder { offset });
            }
            if name.is_empty() {
                return Err(TemplateError::InvalidPlaceholder { offset });
            }
            let field = Field::from_name(&name).ok_or(TemplateError::UnknownPlaceholder(name))?;

            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Field(field));
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    /// Champs utilisés, dans l'ordre d'apparition.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(f) => Some(*f),
            Segment::Text(_) => None,
        })
    }

    /// Remplit le gabarit ; `value` fournit le contenu (déjà échappé) de chaque champ.
    pub fn substitute<F>(&self, mut value: F) -> String
    where
        F: FnMut(Field) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Field(f) => out.push_str(&value(*f)),
            }
        }
        out
    }
}

pub fn load_template_from_file<P: AsRef<Path>>(path: P) -> Result<HtmlTemplate> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("reading template {}", path.display()))?;
    let template = HtmlTemplate::parse(&source)
        .with_context(|| format!("parsing template {}", path.display()))?;
    Ok(template)
}
