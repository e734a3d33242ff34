//! Command implementations for the lookup CLI
//!
//! Wires the session to the terminal: optional preload, one-shot searches
//! for identifiers given as arguments, or an interactive prompt loop.

use crate::cli::{Args, setup_logging};
use crate::config::{LookupConfig, ReportFormat};
use crate::constants::messages;
use crate::models::Record;
use crate::report::{Notice, ScoreReport};
use crate::session::{SearchOutcome, Session};
use crate::source::{DataSource, Source};
use anyhow::Context;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// Outcome counts of one CLI run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub searches: usize,
    pub found: usize,
    pub not_found: usize,
    pub empty_queries: usize,
    pub load_failures: usize,
    /// Identifiers came from the prompt rather than the command line
    pub interactive: bool,
}

impl RunSummary {
    /// Whether every search produced a report
    pub fn all_found(&self) -> bool {
        self.found == self.searches
    }

    /// Process exit code for a one-shot run
    ///
    /// 1 when the score sheet could not be loaded, 2 when an identifier had
    /// no report. Interactive runs always exit with 0.
    pub fn exit_code(&self) -> i32 {
        if self.interactive || self.all_found() {
            0
        } else if self.load_failures > 0 {
            1
        } else {
            2
        }
    }

    fn record(&mut self, status: SearchStatus) {
        self.searches += 1;
        match status {
            SearchStatus::Found => self.found += 1,
            SearchStatus::NotFound => self.not_found += 1,
            SearchStatus::EmptyQuery => self.empty_queries += 1,
            SearchStatus::LoadFailed => self.load_failures += 1,
        }
    }
}

/// What a single search ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Found,
    NotFound,
    EmptyQuery,
    LoadFailed,
}

/// Main command runner
pub async fn run(args: Args) -> anyhow::Result<RunSummary> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config().context("Invalid configuration")?;
    if !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(Source::from_location(&config.data));

    if config.preload {
        preload(&mut session, &config).await;
    }

    let mut stdout = std::io::stdout();
    let summary = if args.is_interactive() {
        run_interactive(&mut session, &config, &mut stdout).await?
    } else {
        let mut summary = RunSummary::default();
        for sbd in &args.sbd {
            let status = search_and_print(&mut session, sbd, &config, &mut stdout).await?;
            summary.record(status);
        }
        summary
    };

    info!(
        "{} searches: {} found, {} not found, {} load failures",
        summary.searches, summary.found, summary.not_found, summary.load_failures
    );
    Ok(summary)
}

/// Load the score sheet ahead of the first search; failures are only logged
pub async fn preload<S: DataSource>(session: &mut Session<S>, config: &LookupConfig) {
    let spinner = config
        .show_progress
        .then(|| loading_spinner(&session.source().describe()));
    let result = session.load().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if let Err(e) = result {
        warn!("Preload failed: {}", e);
    }
}

/// Run one search and print the report or notice to `out`
pub async fn search_and_print<S, W>(
    session: &mut Session<S>,
    query: &str,
    config: &LookupConfig,
    out: &mut W,
) -> anyhow::Result<SearchStatus>
where
    S: DataSource,
    W: Write,
{
    let needs_load = !session.is_loaded() && !query.trim().is_empty();
    let spinner = (needs_load && config.show_progress)
        .then(|| loading_spinner(&session.source().describe()));

    let outcome = session.search(query).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let (rendered, status) = match outcome {
        Ok(SearchOutcome::Found(record)) => {
            (render_record(record, config.format), SearchStatus::Found)
        }
        Ok(SearchOutcome::NotFound(sbd)) => (
            render_notice(&Notice::NotFound(sbd), config.format),
            SearchStatus::NotFound,
        ),
        Ok(SearchOutcome::EmptyQuery) => (
            render_notice(&Notice::EmptyQuery, config.format),
            SearchStatus::EmptyQuery,
        ),
        Err(e) => {
            warn!("Could not load score sheet: {}", e);
            (
                render_notice(&Notice::LoadFailed, config.format),
                SearchStatus::LoadFailed,
            )
        }
    };

    out.write_all(rendered.as_bytes())
        .context("Failed to write report")?;
    out.flush().context("Failed to flush output")?;
    Ok(status)
}

/// Prompt for identifiers until end of input or `:q`
///
/// `:reload` fetches the score sheet again.
async fn run_interactive<S, W>(
    session: &mut Session<S>,
    config: &LookupConfig,
    out: &mut W,
) -> anyhow::Result<RunSummary>
where
    S: DataSource,
    W: Write,
{
    let mut summary = RunSummary {
        interactive: true,
        ..Default::default()
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        write!(out, "{} ", format!("{}:", messages::PROMPT).bright_white().bold())
            .context("Failed to write prompt")?;
        out.flush().context("Failed to flush output")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            writeln!(out).context("Failed to write output")?;
            break;
        };

        match line.trim() {
            ":q" | ":quit" => break,
            ":reload" => match session.reload().await {
                Ok(count) => writeln!(out, "{} records", count).context("Failed to write output")?,
                Err(e) => {
                    warn!("Reload failed: {}", e);
                    out.write_all(render_notice(&Notice::LoadFailed, config.format).as_bytes())
                        .context("Failed to write output")?;
                }
            },
            query => {
                let status = search_and_print(session, query, config, out).await?;
                summary.record(status);
            }
        }
    }

    Ok(summary)
}

fn render_record(record: &Record, format: ReportFormat) -> String {
    let report = ScoreReport::from_record(record);
    if let Some(diff) = report.total_divergence() {
        debug!(
            "Report total {} differs from stored total by {}",
            report.total, diff
        );
    }
    match format {
        ReportFormat::Text => report.render_text(),
        ReportFormat::Html => report.render_html(),
    }
}

fn render_notice(notice: &Notice, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => notice.render_text(),
        ReportFormat::Html => notice.render_html(),
    }
}

fn loading_spinner(location: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );
    pb.set_message(format!("Loading {}", location));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::{CountingSource, create_lookup_sheet};

    fn quiet_config(format: ReportFormat) -> LookupConfig {
        colored::control::set_override(false);
        LookupConfig::default()
            .with_format(format)
            .without_color()
            .without_progress()
    }

    #[tokio::test]
    async fn test_search_and_print_found() {
        let mut session = Session::new(CountingSource::new(&create_lookup_sheet()));
        let config = quiet_config(ReportFormat::Text);
        let mut out = Vec::new();

        let status = search_and_print(&mut session, "00123", &config, &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(status, SearchStatus::Found);
        assert!(text.contains("Nguyễn Văn A"));
        assert!(text.contains("TỔNG ĐIỂM 530"));
    }

    #[tokio::test]
    async fn test_search_and_print_notices_in_html() {
        let mut session = Session::new(CountingSource::new(&create_lookup_sheet()));
        let config = quiet_config(ReportFormat::Html);
        let mut out = Vec::new();

        let empty = search_and_print(&mut session, "  ", &config, &mut out).await.unwrap();
        let missing = search_and_print(&mut session, "99999", &config, &mut out).await.unwrap();

        let html = String::from_utf8(out).unwrap();
        assert_eq!(empty, SearchStatus::EmptyQuery);
        assert_eq!(missing, SearchStatus::NotFound);
        assert!(html.contains("<p style=\"color:red;\">Vui lòng nhập SBD.</p>"));
        assert!(html.contains("Không tìm thấy SBD <strong>99999</strong>"));
    }

    #[tokio::test]
    async fn test_search_and_print_load_failure() {
        let source = CountingSource::failing();
        let mut session = Session::new(source.clone());
        let config = quiet_config(ReportFormat::Text);
        let mut out = Vec::new();

        let status = search_and_print(&mut session, "00123", &config, &mut out)
            .await
            .unwrap();

        assert_eq!(status, SearchStatus::LoadFailed);
        assert_eq!(String::from_utf8(out).unwrap(), "Không thể tải dữ liệu.\n");
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_search_and_print_blank_sheet() {
        let mut session = Session::new(CountingSource::new("\n\n"));
        let config = quiet_config(ReportFormat::Text);
        let mut out = Vec::new();

        let status = search_and_print(&mut session, "00123", &config, &mut out)
            .await
            .unwrap();

        assert_eq!(status, SearchStatus::LoadFailed);
        assert_eq!(String::from_utf8(out).unwrap(), "Không thể tải dữ liệu.\n");
    }

    #[tokio::test]
    async fn test_preload_then_search_fetches_once() {
        let source = CountingSource::new(&create_lookup_sheet());
        let mut session = Session::new(source.clone());
        let config = quiet_config(ReportFormat::Text);
        let mut out = Vec::new();

        preload(&mut session, &config).await;
        search_and_print(&mut session, "00456", &config, &mut out).await.unwrap();
        search_and_print(&mut session, "00123", &config, &mut out).await.unwrap();

        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn test_run_summary() {
        let mut summary = RunSummary::default();
        summary.record(SearchStatus::Found);
        assert!(summary.all_found());

        summary.record(SearchStatus::NotFound);
        summary.record(SearchStatus::LoadFailed);
        assert!(!summary.all_found());
        assert_eq!(summary.searches, 3);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.load_failures, 1);
        assert_eq!(summary.exit_code(), 1);

        summary.interactive = true;
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_run_summary_missing_identifier_exits_with_2() {
        let mut summary = RunSummary::default();
        summary.record(SearchStatus::Found);
        summary.record(SearchStatus::NotFound);
        summary.record(SearchStatus::EmptyQuery);

        assert_eq!(summary.exit_code(), 2);
        assert_eq!(RunSummary::default().exit_code(), 0);
    }
}
