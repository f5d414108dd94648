mod catalog;
mod classify;
mod error;
mod files;
mod parser;
mod patch;
mod recommend;
mod report;
mod settings;
mod table;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use catalog::{ClassifiedRecord, RawRecord};
use classify::rules::RuleSet;
use classify::Classifier;
use error::SyncError;
use settings::Settings;

#[derive(Parser)]
#[command(name = "quiz_sync", about = "Classify the tool catalog and regenerate the quiz recommendation data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Catalog markup (default: index.html)
    #[arg(long)]
    html_file: Option<PathBuf>,
    /// Rule set: standard or audit
    #[arg(long)]
    rules: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, classify, regenerate the quiz table and patch the catalog
    Sync {
        #[command(flatten)]
        source: Source,
        /// Recommendation engine source (default: recommendation_engine.js)
        #[arg(long)]
        js_file: Option<PathBuf>,
        /// Write a JSON preview instead of touching any file
        #[arg(long)]
        dry_run: bool,
        /// Regenerate the table but leave the catalog markup alone
        #[arg(long)]
        no_patch: bool,
    },
    /// Print the classification report only
    Report {
        #[command(flatten)]
        source: Source,
    },
    /// Show what the quiz would recommend for a set of answers
    Recommend {
        #[command(flatten)]
        source: Source,
        /// Teaching level (k12, university, corporate, self_directed)
        #[arg(long)]
        q1: Option<String>,
        /// Subject area (technology, business, communication, general)
        #[arg(long)]
        q2: Option<String>,
        /// Technical level (beginner, intermediate, advanced, expert)
        #[arg(long)]
        q3: Option<String>,
        /// Content focus (interactive, analysis, technical, ai_powered)
        #[arg(long)]
        q4: Option<String>,
        /// Engagement style (realtime, project_based, tutoring, self_paced)
        #[arg(long)]
        q5: Option<String>,
        /// Assessment approach (data_analysis, ai_insights, realtime_feedback, project_outcomes)
        #[arg(long)]
        q6: Option<String>,
        /// Time investment (minimal, moderate, significant, ongoing)
        #[arg(long)]
        q7: Option<String>,
        /// Educational goal (engaging, technical_skills, real_world, personalized)
        #[arg(long)]
        q8: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync {
            source,
            js_file,
            dry_run,
            no_patch,
        } => {
            let mut settings = resolve(source)?;
            if let Some(js) = js_file {
                settings.js_file = js;
            }
            sync(&settings, dry_run, no_patch)
        }
        Commands::Report { source } => {
            let settings = resolve(source)?;
            let (_, records) = load_records(&settings)?;
            println!("{}", report::Distribution::from_records(&records).render());
            Ok(())
        }
        Commands::Recommend {
            source,
            q1,
            q2,
            q3,
            q4,
            q5,
            q6,
            q7,
            q8,
        } => {
            let settings = resolve(source)?;
            let (_, records) = load_records(&settings)?;
            let answers = recommend::Answers { q1, q2, q3, q4, q5, q6, q7, q8 };
            print_recommendation(&recommend::recommend(&records, &answers));
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Configuration with command-line overrides applied.
fn resolve(source: Source) -> anyhow::Result<Settings> {
    let mut settings = Settings::load().context("loading configuration")?;
    if let Some(html) = source.html_file {
        settings.html_file = html;
    }
    if let Some(rules) = source.rules {
        settings.rules = rules;
    }
    debug!(?settings, "settings resolved");
    Ok(settings)
}

/// Read and classify the catalog. Returns the markup alongside the records.
fn load_records(settings: &Settings) -> anyhow::Result<(String, Vec<ClassifiedRecord>)> {
    let rules = settings.rule_set()?;
    println!("Extracting tools from {}...", settings.html_file.display());
    let markup = files::read_catalog(&settings.html_file)?;
    let raw = parser::extract_records(&markup, &settings.html_file)?;
    println!("Found {} tools", raw.len());

    println!("Categorizing tools ({} rules)...", rules.name);
    let records = classify_records(&rules, &raw)?;
    Ok((markup, records))
}

fn sync(settings: &Settings, dry_run: bool, no_patch: bool) -> anyhow::Result<()> {
    let (markup, records) = load_records(settings)?;
    let distribution = report::Distribution::from_records(&records);

    if dry_run {
        println!("DRY RUN - no catalog or engine files will be modified");
        files::write_preview(&settings.preview_file, &settings.rules, &records)?;
        println!("{}", distribution.render());
        println!("\nPreview saved to {}", settings.preview_file.display());
        return Ok(());
    }

    // Everything is read and computed before the first write.
    let js = files::read_text(&settings.js_file)?;
    let object = table::render_tools_object(&records);
    let new_js = match table::replace_tools_object(&js, &object) {
        Ok(updated) => Some(updated),
        Err(e @ SyncError::AnchorNotFound(_)) => {
            warn!(path = %settings.js_file.display(), "{e}; engine file left unchanged");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = (!no_patch).then(|| patch::apply(&markup, &records));
    if let Some(outcome) = &outcome {
        for anchor in &outcome.missing_anchors {
            warn!(%anchor, "insertion point missing; block not inserted");
        }
        if !outcome.unmatched.is_empty() {
            warn!(
                count = outcome.unmatched.len(),
                names = %outcome.unmatched.join(", "),
                "records with no card element"
            );
        }
        if outcome.nav_removed {
            info!("removed legacy quiz navigation");
        }
    }

    let mut updated = Vec::new();
    if let Some(new_js) = new_js {
        files::write_text(&settings.js_file, &new_js)?;
        updated.push(&settings.js_file);
    }
    if let Some(outcome) = &outcome {
        if outcome.markup != markup {
            files::write_text(&settings.html_file, &outcome.markup)?;
            updated.push(&settings.html_file);
        }
        println!("Patched {} cards", outcome.cards_updated);
    }

    println!("{}", distribution.render());
    println!("\nFILES UPDATED:");
    if updated.is_empty() {
        println!("  (none)");
    }
    for path in updated {
        println!("  - {}", path.display());
    }
    Ok(())
}

fn classify_records(rules: &RuleSet, raw: &[RawRecord]) -> anyhow::Result<Vec<ClassifiedRecord>> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(raw.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let classifier = Classifier::new(rules);
    let mut records = Vec::with_capacity(raw.len());
    for r in raw {
        let record = classifier.classify(r);
        debug!(
            name = %record.slug,
            category = %record.category,
            role = %record.primary_role(),
            priority = %record.priority,
            "classified"
        );
        records.push(record);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(records)
}

fn print_recommendation(rec: &recommend::Recommendation) {
    println!("\n{}", rec.profile.title);
    println!("  {}", rec.profile.description);

    println!("\nTop categories:");
    for (i, cw) in rec.top_categories.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, recommend::category_label(cw.category), cw.weight);
    }

    if rec.tools.is_empty() {
        println!("\nNo suitable tools.");
        return;
    }
    println!("\n{:>3} | {:<28} | {:<22} | {:<6} | {}", "#", "Tool", "Category", "Prio", "Description");
    println!("{}", "-".repeat(100));
    for (i, (_, tool)) in rec.tools.iter().enumerate() {
        println!(
            "{:>3} | {:<28} | {:<22} | {:<6} | {}",
            i + 1,
            truncate(&tool.display_name, 28),
            tool.category.as_str(),
            tool.priority.as_str(),
            truncate(&tool.description, 40)
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
