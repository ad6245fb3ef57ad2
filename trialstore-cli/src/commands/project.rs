//! Project command implementation
use super::load_params;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use trialstore_core::{Config, FilterRequest, MatchMode, MemoryStore, Subscription};
use trialstore_types::TrialSample;

#[derive(Debug, Clone)]
pub struct ProjectOptions {
    pub params: PathBuf,
    pub samples: PathBuf,
    pub trial: Option<String>,
    pub actor_names: Vec<String>,
    pub actor_classes: Vec<String>,
    pub actor_implementations: Vec<String>,
    pub fields: Vec<String>,
    pub glob: bool,
    pub pretty: bool,
    pub report: bool,
}

impl ProjectOptions {
    /// Merge command-line flags with configuration defaults
    fn request(&self, config: &Config) -> FilterRequest {
        let fields = if self.fields.is_empty() {
            config.default_fields.clone()
        } else {
            self.fields.clone()
        };

        FilterRequest {
            actor_names: self.actor_names.clone(),
            actor_classes: self.actor_classes.clone(),
            actor_implementations: self.actor_implementations.clone(),
            fields,
        }
    }

    fn match_mode(&self, config: &Config) -> MatchMode {
        if self.glob {
            MatchMode::Glob
        } else {
            config.matching
        }
    }
}

/// Project every sample of one trial and write the results to stdout
pub fn project_samples(config_path: &Path, opts: ProjectOptions) -> Result<()> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let params = load_params(&opts.params)?;
    let samples = read_samples(&opts.samples)?;

    let trial_id = match opts
        .trial
        .clone()
        .or_else(|| samples.first().map(|sample| sample.trial_id.clone()))
    {
        Some(id) => id,
        None => {
            info!(path = %opts.samples.display(), "no samples to project");
            return Ok(());
        }
    };

    let store = MemoryStore::new();
    store.create_trial(trial_id.as_str(), params)?;

    let mut skipped = 0usize;
    for sample in samples {
        if sample.trial_id != trial_id {
            skipped += 1;
            continue;
        }
        let tick = sample.tick;
        store
            .add_sample(sample)
            .with_context(|| format!("Failed to load sample at tick {tick}"))?;
    }
    if skipped > 0 {
        warn!(trial_id = %trial_id, skipped, "ignoring samples of other trials");
    }

    let request = opts.request(&config);
    let subscription =
        Subscription::for_trial(&request, &store, &trial_id, opts.match_mode(&config))
            .context("Invalid filter request")?;

    let pretty = opts.pretty || config.output.pretty;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for projected in subscription.stream(&store, &trial_id)? {
        let sample = projected.context("Failed to project sample")?;
        if pretty {
            serde_json::to_writer_pretty(&mut out, &sample)?;
        } else {
            serde_json::to_writer(&mut out, &sample)?;
        }
        writeln!(out)?;
    }
    out.flush()?;

    if opts.report || config.output.report {
        eprint!("{}", subscription.metrics().snapshot());
    }

    Ok(())
}

/// Read samples from a JSON lines file, skipping blank lines
fn read_samples(path: &Path) -> Result<Vec<TrialSample>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open samples {}", path.display()))?;

    let mut samples = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: TrialSample = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse sample on line {}", number + 1))?;
        samples.push(sample);
    }
    Ok(samples)
}
