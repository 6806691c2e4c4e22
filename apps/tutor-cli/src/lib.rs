//! Shared startup for the tutor binaries: logging, flag overrides, and the
//! config → sources → corpus → index sequence.

use anyhow::{bail, Context};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tutor_core::config::{Backend, Config, Settings};
use tutor_core::source::CorpusSources;
use tutor_fallback::QueryService;
use tutor_text::AnyIndex;

/// Command-line values that take precedence over config.
#[derive(Debug, Default, PartialEq)]
pub struct Overrides {
    pub curriculum: Option<PathBuf>,
    pub help: Option<PathBuf>,
    pub backend: Option<Backend>,
    pub threshold: Option<f64>,
}

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

pub fn parse_backend(s: &str) -> Option<Backend> {
    match s {
        "approx" => Some(Backend::Approx),
        "tantivy" => Some(Backend::Tantivy),
        _ => None,
    }
}

/// Pull the shared flags out of `args`; everything else is returned in order.
pub fn take_overrides(args: Vec<String>) -> anyhow::Result<(Overrides, Vec<String>)> {
    let mut overrides = Overrides::default();
    let mut rest = Vec::new();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--curriculum" => {
                overrides.curriculum = Some(PathBuf::from(value(&mut it, &arg)?));
            }
            "--help-file" => overrides.help = Some(PathBuf::from(value(&mut it, &arg)?)),
            "--backend" => {
                let v = value(&mut it, &arg)?;
                let backend = parse_backend(&v)
                    .with_context(|| format!("unknown backend '{v}' (approx|tantivy)"))?;
                overrides.backend = Some(backend);
            }
            "--threshold" => {
                let v = value(&mut it, &arg)?;
                let threshold = v
                    .parse()
                    .with_context(|| format!("--threshold expects a number, got '{v}'"))?;
                overrides.threshold = Some(threshold);
            }
            _ => rest.push(arg),
        }
    }
    Ok((overrides, rest))
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    match it.next() {
        Some(v) => Ok(v),
        None => bail!("{flag} requires a value"),
    }
}

/// Effective settings plus the resolved source paths.
pub struct Startup {
    pub settings: Settings,
    pub curriculum_path: PathBuf,
    pub help_path: PathBuf,
}

pub fn startup(overrides: &Overrides) -> anyhow::Result<Startup> {
    let config = Config::load().context("loading config")?;
    let mut settings = config.settings()?;
    if let Some(b) = overrides.backend {
        settings.search.backend = b;
    }
    if let Some(t) = overrides.threshold {
        settings.search.threshold = t;
    }
    settings.search.match_options().validate()?;
    info!(
        backend = ?settings.search.backend,
        threshold = settings.search.threshold,
        min_term_len = settings.search.min_term_len,
        min_term_share = settings.search.min_term_share,
        "search settings"
    );
    let curriculum_path = overrides
        .curriculum
        .clone()
        .unwrap_or_else(|| config.resolve(&settings.data.curriculum_path));
    let help_path = overrides
        .help
        .clone()
        .unwrap_or_else(|| config.resolve(&settings.data.help_path));
    Ok(Startup { settings, curriculum_path, help_path })
}

impl Startup {
    pub fn load_sources(&self) -> anyhow::Result<CorpusSources> {
        CorpusSources::load(&self.curriculum_path, &self.help_path)
            .with_context(|| {
                format!(
                    "loading content from {} and {}",
                    self.curriculum_path.display(),
                    self.help_path.display()
                )
            })
    }

    pub fn build_service(&self) -> anyhow::Result<QueryService<AnyIndex>> {
        let corpus = self.load_sources()?.into_corpus();
        Ok(QueryService::build(corpus, &self.settings.search)?)
    }
}
