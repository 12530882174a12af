use crate::config::Config;
use crate::model::{OperatorId, ScheduleRow};
use crate::scheduler::Assignment;
use crate::template::{Field, HtmlTemplate};
use std::fmt::Write as _;

/// Nom + version du générateur, affichés en pied de page.
pub const GENERATOR: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Tout ce qu'un rendu consomme : lignes, comptes, contacts, notes.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDocument {
    pub title: String,
    pub subtitle: String,
    pub rows: Vec<ScheduleRow>,
    pub counts: Vec<(OperatorId, u32)>,
    pub contacts: Vec<(String, String)>,
    pub notes: Vec<String>,
}

impl ScheduleDocument {
    pub fn new(config: &Config, assignment: &Assignment) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.year_label(),
            rows: assignment.rows.clone(),
            counts: assignment.counts.clone(),
            contacts: config
                .operators
                .iter()
                .map(|op| (op.name.clone(), op.phone.clone().unwrap_or_default()))
                .collect(),
            notes: config.notes.clone(),
        }
    }
}

/// Permet de choisir le format de sortie (texte, HTML, ...).
pub trait ScheduleRenderer {
    fn render(&self, doc: &ScheduleDocument) -> String;
    /// Extension du fichier produit.
    fn extension(&self) -> &'static str;
}

/// Tableau texte aligné, suivi des comptes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl ScheduleRenderer for TextRenderer {
    fn render(&self, doc: &ScheduleDocument) -> String {
        let cells: Vec<[String; 3]> = doc.rows.iter().map(ScheduleRow::cells).collect();
        let mut widths = [0usize; 2];
        for row in &cells {
            widths[0] = widths[0].max(row[0].chars().count());
            widths[1] = widths[1].max(row[1].chars().count());
        }

        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", doc.title, doc.subtitle);
        out.push('\n');
        for [date, shift, operator] in &cells {
            let _ = writeln!(
                out,
                "{date:<w0$}  {shift:<w1$}  {operator}",
                w0 = widths[0],
                w1 = widths[1]
            );
        }
        if !doc.counts.is_empty() {
            out.push_str("\nCounts:\n");
            for (name, count) in &doc.counts {
                let _ = writeln!(out, "- {name}: {count}");
            }
        }
        out
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

/// Page HTML autonome (styles intégrés), ou gabarit fourni par l'utilisateur.
#[derive(Debug, Default, Clone)]
pub struct HtmlRenderer {
    template: Option<HtmlTemplate>,
}

const HTML_STYLE: &str = "body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-bottom: 1.5em; }
td { border: 1px solid #999; padding: 0.3em 0.8em; }
footer { color: #666; font-size: 0.8em; }";

impl HtmlRenderer {
    pub fn with_template(template: HtmlTemplate) -> Self {
        Self {
            template: Some(template),
        }
    }

    /// Contenu HTML d'un champ de gabarit.
    fn field(doc: &ScheduleDocument, field: Field) -> String {
        match field {
            Field::Title => escape(&doc.title),
            Field::Subtitle => escape(&doc.subtitle),
            Field::ScheduleTable => schedule_table(doc),
            Field::ContactsTable => contacts_table(doc),
            Field::Notes => notes(doc),
            Field::Css => HTML_STYLE.to_string(),
            Field::Version => escape(GENERATOR),
        }
    }
}

impl ScheduleRenderer for HtmlRenderer {
    fn render(&self, doc: &ScheduleDocument) -> String {
        if let Some(template) = &self.template {
            return template.substitute(|f| Self::field(doc, f));
        }

        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n\t<head>\n\t\t<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "\t\t<title>{}</title>", escape(&doc.title));
        let _ = writeln!(out, "\t\t<style>\n{HTML_STYLE}\n\t\t</style>");
        out.push_str("\t</head>\n\t<body>\n");
        let _ = writeln!(out, "\t\t<h1>{}</h1>", escape(&doc.title));
        let _ = writeln!(out, "\t\t<h2>{}</h2>", escape(&doc.subtitle));
        out.push_str(&schedule_table(doc));

        if !doc.contacts.is_empty() {
            out.push_str("\t\t<h3>Contacts</h3>\n");
            out.push_str(&contacts_table(doc));
        }

        if !doc.notes.is_empty() {
            out.push_str("\t\t<ul>\n");
            out.push_str(&notes(doc));
            out.push_str("\t\t</ul>\n");
        }

        let _ = writeln!(out, "\t\t<footer>{}</footer>", escape(GENERATOR));
        out.push_str("\t</body>\n</html>\n");
        out
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

fn schedule_table(doc: &ScheduleDocument) -> String {
    let rows: Vec<[String; 3]> = doc.rows.iter().map(ScheduleRow::cells).collect();
    table(rows.iter().map(|r| r.as_slice()))
}

fn contacts_table(doc: &ScheduleDocument) -> String {
    let rows: Vec<[String; 2]> = doc
        .contacts
        .iter()
        .map(|(name, phone)| [name.clone(), phone.clone()])
        .collect();
    table(rows.iter().map(|r| r.as_slice()))
}

fn notes(doc: &ScheduleDocument) -> String {
    let mut out = String::new();
    for note in &doc.notes {
        let _ = writeln!(out, "\t\t\t<li>{}</li>", escape(note));
    }
    out
}

fn table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut out = String::new();
    out.push_str("\t\t<table>\n");
    for row in rows {
        out.push_str("\t\t\t<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape(cell));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("\t\t</table>\n");
    out
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
