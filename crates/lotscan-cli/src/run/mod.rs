//! Run orchestration for the CLI.
//!
//! A full run collects detail links from every configured listing, then
//! extracts each link in sorted order on the same browser page, writing one
//! CSV row per success. Per-listing and per-URL failures are logged and
//! skipped; only browser launch and output errors abort the run.

mod output;

use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;

use lotscan_core::{AppConfig, Pacing};
use lotscan_scraper::{
    is_detail_url, BrowserPage, ChromiumPage, DetailExtractor, LaunchOptions, LinkCollector,
};

use self::output::CsvSink;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub links: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Full pipeline: collect, extract, write CSV.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written, or the
/// browser fails to launch.
pub(crate) async fn run_inventory(config: &AppConfig) -> anyhow::Result<()> {
    let mut sink = CsvSink::create(&config.output_path)?;
    let mut page = ChromiumPage::launch(&LaunchOptions::from_config(config)).await?;

    let result = async {
        let links = collect_all(&mut page, config).await;
        extract_all(&mut page, &config.pacing, links.iter().map(String::as_str), &mut sink).await
    }
    .await;
    close_browser(page).await;

    let summary = result?;
    sink.finish()?;
    report(summary, &config.output_path)
}

/// Link collection only; prints one detail URL per line.
///
/// # Errors
///
/// Returns an error if the browser fails to launch.
pub(crate) async fn run_links(config: &AppConfig) -> anyhow::Result<()> {
    let mut page = ChromiumPage::launch(&LaunchOptions::from_config(config)).await?;
    let links = collect_all(&mut page, config).await;
    close_browser(page).await;

    for link in &links {
        println!("{link}");
    }
    tracing::info!(links = links.len(), "link collection complete");
    Ok(())
}

/// Extraction only, for the given detail URLs.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written, or the
/// browser fails to launch.
pub(crate) async fn run_extract(config: &AppConfig, urls: &[String]) -> anyhow::Result<()> {
    let mut sink = CsvSink::create(&config.output_path)?;
    let mut page = ChromiumPage::launch(&LaunchOptions::from_config(config)).await?;

    let result = extract_all(
        &mut page,
        &config.pacing,
        urls.iter().map(String::as_str),
        &mut sink,
    )
    .await;
    close_browser(page).await;

    let summary = result?;
    sink.finish()?;
    report(summary, &config.output_path)
}

/// Collects detail links from every configured listing into one sorted set.
///
/// A listing whose first page fails to load is skipped with a warning.
pub(crate) async fn collect_all<P: BrowserPage>(
    page: &mut P,
    config: &AppConfig,
) -> BTreeSet<String> {
    let collector = LinkCollector::new(config.base_url.clone(), config.pacing.clone());
    let mut all = BTreeSet::new();

    for listing in &config.listing_urls {
        match collector.collect(page, listing.as_str()).await {
            Ok(links) => all.extend(links),
            Err(e) => tracing::warn!(url = %listing, error = %e, "listing skipped"),
        }
    }

    all.retain(|url| is_detail_url(url));
    all
}

/// Extracts every URL in order, pausing after each full batch.
///
/// # Errors
///
/// Returns an error only if a row cannot be written.
pub(crate) async fn extract_all<'a, P, W>(
    page: &mut P,
    pacing: &Pacing,
    urls: impl IntoIterator<Item = &'a str>,
    sink: &mut CsvSink<W>,
) -> anyhow::Result<RunSummary>
where
    P: BrowserPage,
    W: io::Write,
{
    let extractor = DetailExtractor::new(pacing.detail_settle);
    let mut summary = RunSummary::default();

    for url in urls {
        summary.links += 1;
        match extractor.extract(page, url).await {
            Ok(record) => {
                sink.write(&record)?;
                summary.written += 1;
            }
            Err(skip) => {
                tracing::warn!(url = %skip.url, error = %skip.source, "detail page skipped");
                summary.skipped += 1;
            }
        }

        if summary.links % pacing.batch_size == 0 {
            page.pause(pacing.batch_pause).await;
        }
    }

    Ok(summary)
}

async fn close_browser(page: ChromiumPage) {
    if let Err(e) = page.close().await {
        tracing::warn!(error = %e, "browser did not shut down cleanly");
    }
}

fn report(summary: RunSummary, output_path: &std::path::Path) -> anyhow::Result<()> {
    let saved: PathBuf = std::path::absolute(output_path)?;
    tracing::info!(
        links = summary.links,
        written = summary.written,
        skipped = summary.skipped,
        "run complete"
    );
    println!("Saved -> {}", saved.display());
    Ok(())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
