use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use playbill::{load, model, render, view, Records};
use std::{fs, path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Festival schedule CSV file
    data_csv: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the per-class overview
    Overview {
        /// Emit the view model as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one class's day-by-day schedule
    Schedule {
        /// Bare class number, e.g. 3
        class: String,
        /// Emit the view model as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write the overview page and one page per class as static HTML
    Render {
        /// Output directory, created if missing
        out_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .try_init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let records = load(cli.data_csv)?;

    match cli.command {
        Commands::Overview { json } => overview(&records, json),
        Commands::Schedule { class, json } => schedule(&records, &class, json),
        Commands::Render { out_dir } => render_site(&records, out_dir),
    }
}

fn overview(records: &Records, json: bool) -> Result<()> {
    let summaries = view::class_summaries(records);
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in &summaries {
        println!(
            "{}  {}  公演{}回  キャスト延べ{}名",
            model::class_label(&summary.class_id),
            summary.title,
            summary.performances,
            summary.cast_total
        );
    }
    Ok(())
}

fn schedule(records: &Records, class: &str, json: bool) -> Result<()> {
    let Some(schedule) = view::schedule_view(records, class) else {
        bail!("{}のデータが見つかりません", model::class_label(class));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!("{} 上演スケジュール", model::class_label(class));
    println!("{}", schedule.title);
    for (day, rows) in [
        (model::Day::Day1, &schedule.day1),
        (model::Day::Day2, &schedule.day2),
    ] {
        if rows.is_empty() {
            continue;
        }
        println!("\n{}", day.label());
        for record in rows {
            println!(
                "  {}  {}  キャスト{}名 / スタッフ{}名",
                record.time,
                record.title,
                record.cast().len(),
                record.staff().len()
            );
        }
    }
    Ok(())
}

fn render_site(records: &Records, out_dir: PathBuf) -> Result<()> {
    let summaries = view::class_summaries(records);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;

    fs::write(out_dir.join("index.html"), render::render_overview(&summaries))?;
    for summary in &summaries {
        // Every summarized class has records, so the view is always present.
        if let Some(schedule) = view::schedule_view(records, &summary.class_id) {
            fs::write(
                out_dir.join(model::class_page(&summary.class_id)),
                render::render_schedule(&schedule),
            )?;
        }
    }

    println!("Wrote {} pages to {:?}", summaries.len() + 1, out_dir);
    Ok(())
}
