#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fairrota::{
    config::{load_config_from_file, Config},
    io,
    render::{HtmlRenderer, ScheduleDocument, ScheduleRenderer, TextRenderer},
    scheduler::{Assignment, FairAssigner, GapKind},
    storage::OutputStore,
    template::load_template_from_file,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition équitable des créneaux
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Text,
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un ou plusieurs plannings
    Generate {
        /// Fichier JSON de configuration
        config: PathBuf,
        /// Nombre de plannings indépendants
        #[arg(short = 'n', default_value_t = 1)]
        n: u32,
        /// Graine du tirage ; le planning i utilise seed + i
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,
        /// Répertoire de sortie (par défaut : celui de la configuration)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Écrire sur la sortie standard au lieu d'un fichier
        #[arg(long)]
        stdout: bool,
        /// Afficher les comptes par opérateur (CSV) après chaque planning
        #[arg(long)]
        counts: bool,
        /// Gabarit HTML à champs `$title`, `$schedule_table`, ... (format html)
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Lister les paires (date, créneau) à couvrir
    Calendar {
        config: PathBuf,
    },

    /// Valider la configuration et détecter les créneaux impossibles à couvrir
    Check {
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }
    #[cfg(not(feature = "logging"))]
    let _ = cli.log;

    let code = match cli.cmd {
        Commands::Generate {
            config,
            n,
            seed,
            format,
            out_dir,
            stdout,
            counts,
            template,
        } => {
            if n == 0 {
                bail!("-n must be at least 1");
            }
            let html = match template {
                Some(path) => HtmlRenderer::with_template(load_template_from_file(path)?),
                None => HtmlRenderer::default(),
            };
            let cfg = load_config_from_file(&config)?;
            let dir = out_dir.unwrap_or_else(|| parent_dir(&config));
            let store = OutputStore::for_config(dir, &config);

            for i in 0..n {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(s.wrapping_add(u64::from(i))),
                    None => StdRng::from_entropy(),
                };
                let assignment = generate(&cfg, &mut rng)?;
                let (ext, content) = render(&cfg, &assignment, format, &html)?;
                if stdout {
                    print!("{}", String::from_utf8_lossy(&content));
                } else {
                    let path = store.save(ext, &content)?;
                    println!("{} has been written", path.display());
                }
                if counts {
                    io::write_counts_csv(std::io::stdout().lock(), &assignment.counts)?;
                }
            }
            0
        }
        Commands::Calendar { config } => {
            let cfg = load_config_from_file(&config)?;
            for (date, shift) in cfg.calendar()?.generate() {
                println!("{date} | {} | {shift}", date.format("%A"));
            }
            0
        }
        Commands::Check { config } => {
            let cfg = load_config_from_file(&config)?;
            let roster = cfg.roster()?;
            let calendar = cfg.calendar()?;
            let gaps = FairAssigner::new(&roster, cfg.assign_options()).detect_gaps(&calendar);
            if gaps.is_empty() {
                println!("OK: every shift can be covered");
                0
            } else {
                eprintln!("Found {} coverage gap(s)", gaps.len());
                for gap in &gaps {
                    let reason = match gap.kind {
                        GapKind::UnknownShift => "nobody is available for this shift",
                        GapKind::NoCandidates => "every candidate has an exception",
                    };
                    eprintln!("{} | {} | {reason}", gap.date, gap.shift);
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn generate(cfg: &Config, rng: &mut StdRng) -> Result<Assignment> {
    let roster = cfg.roster()?;
    let calendar = cfg.calendar()?;
    let assigner = FairAssigner::new(&roster, cfg.assign_options());
    Ok(assigner.schedule(&calendar, rng)?)
}

fn render(
    cfg: &Config,
    assignment: &Assignment,
    format: Format,
    html: &HtmlRenderer,
) -> Result<(&'static str, Vec<u8>)> {
    let doc = ScheduleDocument::new(cfg, assignment);
    Ok(match format {
        Format::Html => (html.extension(), html.render(&doc).into_bytes()),
        Format::Text => (TextRenderer.extension(), TextRenderer.render(&doc).into_bytes()),
        Format::Csv => ("csv", io::export_schedule_csv(&assignment.rows)?),
        Format::Json => ("json", io::export_assignment_json(assignment)?),
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
