use std::collections::BTreeMap;

use chrono::Utc;
use log::{info, warn};

use crate::{
    config::Config,
    extract::Extractor,
    leaderboard::PetLeaderboard,
    members::load_members,
    output::OutputSink,
    source::{CollectionLogSource, FetchOutcome},
};

/// Per-run counters, logged once at the end.
///
/// Never written to the output file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Members read from the member list
    pub members: usize,

    /// Blocks appended to the output file
    pub written: usize,

    /// Non-success status codes, by code
    pub rejected: BTreeMap<u16, usize>,

    /// Connection / body read failures
    pub transport_errors: usize,

    /// Extraction failures, by `ExtractError::kind`
    pub extract_errors: BTreeMap<&'static str, usize>,
}

impl RunStats {
    pub fn skipped(&self) -> usize {
        self.rejected.values().sum::<usize>()
            + self.transport_errors
            + self.extract_errors.values().sum::<usize>()
    }
}

/// Runs one full collection pass.
///
/// Order of operations:
/// 1. Load the member list
/// 2. Open the output file (append mode)
/// 3. For each member: fetch -> extract -> append
///
/// FATAL (returned as Err):
/// - Output file cannot be opened or written
/// - Member list cannot be read
///
/// PER MEMBER (logged, then skipped):
/// - Non-success status
/// - Transport failure
/// - Any extraction error
///
/// Members are processed strictly one after another. There is no
/// retry and no checkpoint: re-running appends every block again.
///
pub async fn run(cfg: &Config, source: &dyn CollectionLogSource) -> anyhow::Result<RunStats> {
    let started = Utc::now();

    let members = load_members(&cfg.members_path).await?;
    let mut sink = OutputSink::open(&cfg.output_path).await?;

    info!(
        "Collecting {} members from {} into {}",
        members.len(),
        source.name(),
        sink.path().display()
    );

    let extractor = Extractor::new(cfg);
    let mut board = PetLeaderboard::default();

    let stats = collect_members(&members, source, &extractor, &mut sink, &mut board).await?;

    let elapsed = Utc::now() - started;
    info!(
        "Run started {} finished in {}.{:03}s: members={} written={} skipped={} rejected={:?} transport={} extract={:?}",
        started.format("%Y-%m-%d %H:%M:%S UTC"),
        elapsed.num_seconds(),
        elapsed.num_milliseconds() % 1000,
        stats.members,
        stats.written,
        stats.skipped(),
        stats.rejected,
        stats.transport_errors,
        stats.extract_errors,
    );

    if cfg.leaderboard.enabled && !board.is_empty() {
        info!("Pet hiscores:");
        for rank in board.top(cfg.leaderboard.size) {
            info!("{}", rank.line());
        }
    }

    Ok(stats)
}

/// Sequential fetch/extract/append loop over an already loaded
/// member list.
pub async fn collect_members(
    members: &[String],
    source: &dyn CollectionLogSource,
    extractor: &Extractor,
    sink: &mut OutputSink,
    board: &mut PetLeaderboard,
) -> anyhow::Result<RunStats> {
    let total = members.len();
    let mut stats = RunStats {
        members: total,
        ..RunStats::default()
    };

    for (i, member) in members.iter().enumerate() {
        info!("{}/{} {}", i + 1, total, member);

        let body = match source.fetch(member).await {
            Ok(FetchOutcome::Document(body)) => body,

            // No data for this member; not an error for the run
            Ok(FetchOutcome::Rejected(status)) => {
                warn!("{member}: skipped, service answered {status}");
                *stats.rejected.entry(status).or_default() += 1;
                continue;
            }

            Err(e) => {
                warn!("{member}: skipped, {e}");
                stats.transport_errors += 1;
                continue;
            }
        };

        let record = match extractor.extract(&body) {
            Ok(record) => record,
            Err(e) => {
                let cause = if e.is_shape_change() {
                    "unexpected response shape"
                } else {
                    "no matching log section"
                };
                warn!("{member}: skipped, {cause}: {e}");
                *stats.extract_errors.entry(e.kind()).or_default() += 1;
                continue;
            }
        };

        // A failing sink cannot honor append-on-success
        sink.append(&record).await?;
        board.record(&record.username, record.pet_count());
        stats.written += 1;
    }

    Ok(stats)
}
