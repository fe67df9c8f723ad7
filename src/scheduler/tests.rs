use super::*;
use crate::config::PricingConfig;
use crate::test_helpers::{CallMark, ScriptedExecutor, card_payload, graphql_error};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct RecordingSink {
    batches: Vec<(usize, usize, usize)>,
    progress: Vec<Progress>,
    records: Vec<(usize, CardRecord)>,
}

impl ProgressSink for RecordingSink {
    fn on_batch_started(&mut self, batch: usize, batches: usize, size: usize) {
        self.batches.push((batch, batches, size));
    }

    fn on_progress(&mut self, progress: Progress) {
        self.progress.push(progress);
    }

    fn on_record_ready(&mut self, slot: usize, record: CardRecord) {
        self.records.push((slot, record));
    }
}

fn scheduler(executor: ScriptedExecutor, pipeline: PipelineConfig) -> (BatchScheduler, Arc<ScriptedExecutor>) {
    let executor = Arc::new(executor);
    let enricher = DetailEnricher::new(executor.clone(), PricingConfig::default());
    (BatchScheduler::new(enricher, &pipeline), executor)
}

fn identifiers(count: usize) -> Vec<ItemIdentifier> {
    (0..count)
        .map(|i| ItemIdentifier::new(format!("card-{i}"), None))
        .collect()
}

#[tokio::test]
async fn twenty_five_cards_run_in_three_bounded_batches() {
    let (scheduler, executor) = scheduler(
        ScriptedExecutor::new(|_, _| Ok(card_payload(None))).with_delay(Duration::from_millis(20)),
        PipelineConfig::default(),
    );
    let mut sink = RecordingSink::default();

    let summary = scheduler.run(&identifiers(25), &mut sink).await;

    assert_eq!(
        summary,
        RunSummary {
            total: 25,
            succeeded: 25,
            failed: 0,
            batches: 3
        }
    );
    assert_eq!(sink.batches, vec![(1, 3, 10), (2, 3, 10), (3, 3, 5)]);
    assert!(executor.peak_in_flight() <= 10);
    assert!(executor.peak_in_flight() > 1, "batch members should overlap");
    assert_eq!(executor.call_count("GetCardDetails"), 25);
}

#[tokio::test]
async fn in_flight_cap_below_batch_size_is_honoured() {
    let pipeline = PipelineConfig {
        batch_size: 10,
        max_in_flight: 3,
        ..Default::default()
    };
    let (scheduler, executor) = scheduler(
        ScriptedExecutor::new(|_, _| Ok(card_payload(None))).with_delay(Duration::from_millis(10)),
        pipeline,
    );

    scheduler.run(&identifiers(10), &mut RecordingSink::default()).await;
    assert!(executor.peak_in_flight() <= 3);
}

#[tokio::test]
async fn progress_reaches_total_exactly_once_and_never_decreases() {
    let (scheduler, _) = scheduler(
        ScriptedExecutor::new(|_, _| Ok(card_payload(None))),
        PipelineConfig {
            batch_size: 4,
            ..Default::default()
        },
    );
    let mut sink = RecordingSink::default();

    scheduler.run(&identifiers(9), &mut sink).await;

    assert_eq!(sink.progress.len(), 9);
    assert!(sink.progress.windows(2).all(|w| w[0].completed < w[1].completed));
    assert!(sink.progress.iter().all(|p| p.total == 9));
    let done: Vec<_> = sink.progress.iter().filter(|p| p.completed == 9).collect();
    assert_eq!(done.len(), 1);
}

#[tokio::test]
async fn failed_card_becomes_failed_record_and_still_counts() {
    let (scheduler, _) = scheduler(
        ScriptedExecutor::new(|_, vars| {
            if vars["cardSlug"] == "x" {
                graphql_error("timeout")
            } else {
                Ok(card_payload(None))
            }
        }),
        PipelineConfig::default(),
    );
    let ids = vec![
        ItemIdentifier::new("a", None),
        ItemIdentifier::new("x", None),
        ItemIdentifier::new("b", None),
    ];
    let mut sink = RecordingSink::default();

    let summary = scheduler.run(&ids, &mut sink).await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    let (slot, failed) = sink
        .records
        .iter()
        .find(|(_, r)| r.slug() == "x")
        .unwrap();
    assert_eq!(*slot, 1);
    assert_eq!(
        *failed,
        CardRecord::Failed {
            identifier: ItemIdentifier::new("x", None),
            error: "timeout".into()
        }
    );
    assert_eq!(sink.progress.last().unwrap().completed, 3);
}

#[tokio::test]
async fn every_slot_settles_exactly_once_even_with_duplicate_slugs() {
    let (scheduler, _) = scheduler(
        ScriptedExecutor::new(|_, _| Ok(card_payload(None))),
        PipelineConfig {
            batch_size: 2,
            ..Default::default()
        },
    );
    let ids = vec![
        ItemIdentifier::new("a", None),
        ItemIdentifier::new("a", None),
        ItemIdentifier::new("b", None),
    ];
    let mut sink = RecordingSink::default();

    scheduler.run(&ids, &mut sink).await;

    let mut slots: Vec<usize> = sink.records.iter().map(|(slot, _)| *slot).collect();
    slots.sort_unstable();
    assert_eq!(slots, vec![0, 1, 2]);
    assert!(sink.records.iter().all(|(_, r)| r.is_terminal()));
    assert_eq!(sink.records.iter().filter(|(_, r)| r.slug() == "a").count(), 2);
}

#[tokio::test]
async fn next_batch_waits_for_the_slowest_card_of_the_previous_one() {
    // card-0 is far slower than its batch mates; an unbatched stream would
    // start card-3 and card-4 while card-0 is still out
    let (scheduler, executor) = scheduler(
        ScriptedExecutor::new(|_, _| Ok(card_payload(None))).with_delay_for(|vars| {
            if vars["cardSlug"] == "card-0" {
                Duration::from_millis(80)
            } else {
                Duration::from_millis(5)
            }
        }),
        PipelineConfig {
            batch_size: 3,
            max_in_flight: 10,
            ..Default::default()
        },
    );

    scheduler.run(&identifiers(7), &mut RecordingSink::default()).await;

    let timeline = executor.timeline();
    let position = |mark: CallMark| timeline.iter().position(|m| *m == mark).unwrap();
    let batches: [&[usize]; 3] = [&[0, 1, 2], &[3, 4, 5], &[6]];
    for pair in batches.windows(2) {
        let last_finish = pair[0]
            .iter()
            .map(|i| position(CallMark::Finished(format!("card-{i}"))))
            .max()
            .unwrap();
        let first_start = pair[1]
            .iter()
            .map(|i| position(CallMark::Started(format!("card-{i}"))))
            .min()
            .unwrap();
        assert!(
            last_finish < first_start,
            "batch starting with card-{} began before the previous batch settled: {timeline:?}",
            pair[1][0]
        );
    }
    assert_eq!(executor.peak_in_flight(), 3);
}

#[tokio::test]
async fn empty_input_reports_completion_once() {
    let (scheduler, executor) = scheduler(
        ScriptedExecutor::new(|_, _| Ok(card_payload(None))),
        PipelineConfig::default(),
    );
    let mut sink = RecordingSink::default();

    let summary = scheduler.run(&[], &mut sink).await;

    assert_eq!(summary, RunSummary::default());
    assert_eq!(sink.progress, vec![Progress { completed: 0, total: 0 }]);
    assert!(sink.batches.is_empty());
    assert!(executor.calls().is_empty());
}
