use std::{path::PathBuf, time::Duration};

use tabled::Table;

use crate::{
    error,
    harvest::{Collector, HarvestSummary, Harvester, Progress},
    info,
    management::{Checkpoint, CheckpointSink, CsvGenreSource, GenreSource, HarvestState, RunMode},
    spotify::catalog::{Credentials, SpotifyCatalogClient},
    success,
    types::GenreSummaryRow,
    warning,
};

use super::progress_bar;

pub struct HarvestOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub limit: usize,
    pub pool_size: usize,
    pub page_size: u32,
    pub throttle: Duration,
    pub resume: bool,
}

pub async fn harvest_artists(opts: HarvestOptions) {
    info!("Loading genres from {}...", opts.input.display());
    let genres = match CsvGenreSource::new(&opts.input).load().await {
        Ok(g) => g,
        Err(e) => error!("{}\nRun genrecli genres validate first.", e),
    };

    if genres.is_empty() {
        error!("No genres loaded. Please check the input file.");
    }
    info!("Found {} genres", genres.len());

    let Checkpoint { pending, mut sink } =
        match CheckpointSink::open(&opts.output, HarvestState::new(), genres, opts.resume).await {
            Ok(c) => c,
            Err(e) => error!("{}", e),
        };
    if let RunMode::Resumed { completed } = sink.mode() {
        info!(
            "Resuming: {} genres already done, {} left",
            completed,
            pending.len()
        );
    }

    if pending.is_empty() {
        success!("Nothing to update here.");
        if let Err(e) = sink.finish(&HarvestSummary::default()).await {
            warning!("Cannot clear harvest state. Err: {}", e);
        }
        return;
    }

    let client = match Credentials::from_env() {
        Ok(c) => SpotifyCatalogClient::new(c),
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let collector = Collector::new(&client)
        .page_size(opts.page_size)
        .throttle(opts.throttle);
    let harvester = Harvester::new(collector).pool_size(opts.pool_size);

    let pb = progress_bar(pending.len(), "Collecting artists...");
    let result = harvester
        .run_into(&pending, opts.limit, &mut sink, |event| match event {
            Progress::Started {
                index,
                total,
                genre,
            } => pb.set_message(format!("Processing genre {}/{}: {}", index, total, genre)),
            Progress::Finished { report, .. } => {
                pb.inc(1);
                pb.println(format!(
                    "Found {} artists for genre '{}'",
                    report.found, report.genre
                ));
            }
        })
        .await;
    pb.finish_and_clear();

    let summary = match result {
        Ok(s) => s,
        Err(e) => error!(
            "Harvest aborted, {} holds the genres finished so far. Err: {}",
            opts.output.display(),
            e
        ),
    };

    let incomplete: Vec<GenreSummaryRow> = summary
        .failed()
        .map(|r| GenreSummaryRow {
            genre: r.genre.to_string(),
            artists: r.found,
            status: r.status().to_string(),
        })
        .collect();
    if !incomplete.is_empty() {
        warning!("{} genres did not complete:", incomplete.len());
        println!("{}", Table::new(incomplete));
    }

    if sink.csv().written() == 0 {
        warning!("No artists data collected");
    } else {
        success!("Total artists collected: {}", summary.records);
        success!("Artists data saved to {}", sink.csv().path().display());
    }

    match sink.finish(&summary).await {
        Ok(true) => info!("Run again with --resume to retry the skipped genres."),
        Ok(false) => {}
        Err(e) => warning!("Cannot clear harvest state. Err: {}", e),
    }
}
