/// Collector module
///
/// Orchestrates one collection run:
/// - Open the output sink
/// - Load the member list
/// - Fetch, extract and append, one member at a time
///
/// The collector layer sits between:
/// - A `CollectionLogSource` (input)
/// - The `OutputSink` (output)
///
/// Design notes:
/// - Service-specific request logic lives in `source`
/// - Document navigation lives in `extract`
/// - This module only sequences the steps and decides what a
///   failure means for the run
pub mod runner;
