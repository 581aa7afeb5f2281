//! Reconciliation engine
//!
//! Pairs the zones of both stores by id, diffs the records of every pair and
//! emits the tasks that bring both stores into agreement:
//!
//! | field                | owner         | mirrored to   |
//! |----------------------|---------------|---------------|
//! | name, type, value    | authoritative | annotation    |
//! | ttl                  | authoritative | annotation    |
//! | comment, account     | annotation    | authoritative |
//!
//! Records are paired by their `(name, type, value)` triple. When the
//! annotation store holds the same triple more than once, the row listed first
//! is the one paired; later duplicates are neither updated nor deleted.
//!
//! The authoritative store is only ever updated in place: records it lacks are
//! not created there, and records it holds are not removed.

use std::collections::{HashMap, HashSet};

use zone_sync_connector::{Record, RecordKey, StoreRole, Task, Zone};

use crate::error::{CoreError, CoreResult};
use crate::types::SyncPhase;

/// Tasks computed for one run, in application order per store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub tasks_for_authoritative: Vec<Task>,
    pub tasks_for_annotation: Vec<Task>,
    /// Zones only the annotation store knows about; left untouched
    pub skipped_zones: Vec<String>,
}

impl ReconcilePlan {
    pub fn task_count(&self) -> usize {
        self.tasks_for_authoritative.len() + self.tasks_for_annotation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_count() == 0
    }
}

/// Compute the tasks that converge both stores.
///
/// Fails before emitting anything when either zone list is empty or when an
/// authoritative zone has no annotation counterpart. Zones are processed in
/// authoritative order; within a zone, tasks follow authoritative record order,
/// then annotation-only deletions in annotation order.
pub fn reconcile(authoritative: &[Zone], annotation: &[Zone]) -> CoreResult<ReconcilePlan> {
    if authoritative.is_empty() {
        return Err(CoreError::MissingZones(StoreRole::Authoritative));
    }
    if annotation.is_empty() {
        return Err(CoreError::MissingZones(StoreRole::Annotation));
    }

    let mut annotation_by_id: HashMap<&str, &Zone> = HashMap::with_capacity(annotation.len());
    for zone in annotation {
        annotation_by_id.entry(zone.id.as_str()).or_insert(zone);
    }

    let pairs = authoritative
        .iter()
        .map(|zone| {
            annotation_by_id
                .get(zone.id.as_str())
                .map(|counterpart| (zone, *counterpart))
                .ok_or_else(|| CoreError::UnmatchedZone {
                    zone_id: zone.id.clone(),
                })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let mut plan = ReconcilePlan::default();

    let authoritative_ids: HashSet<&str> = authoritative.iter().map(|z| z.id.as_str()).collect();
    for zone in annotation {
        if !authoritative_ids.contains(zone.id.as_str()) && !plan.skipped_zones.contains(&zone.id) {
            log::warn!(
                "[{}] Zone {} exists only in the annotation store, skipped",
                SyncPhase::Reconcile,
                zone.id
            );
            plan.skipped_zones.push(zone.id.clone());
        }
    }

    for (authoritative_zone, annotation_zone) in pairs {
        reconcile_zone(authoritative_zone, annotation_zone, &mut plan);
    }

    Ok(plan)
}

fn reconcile_zone(authoritative: &Zone, annotation: &Zone, plan: &mut ReconcilePlan) {
    let before_authoritative = plan.tasks_for_authoritative.len();
    let before_annotation = plan.tasks_for_annotation.len();

    // First occurrence of each triple wins
    let mut annotated: HashMap<RecordKey<'_>, &Record> =
        HashMap::with_capacity(annotation.records.len());
    for record in &annotation.records {
        annotated.entry(record.key()).or_insert(record);
    }

    for record in &authoritative.records {
        let Some(existing) = annotated.get(&record.key()) else {
            plan.tasks_for_annotation
                .push(Task::add(&authoritative.id, record.clone()));
            continue;
        };

        let ttl_differs = existing.ttl != record.ttl;
        let comment_differs = existing.comment != record.comment;
        if !ttl_differs && !comment_differs {
            continue;
        }

        // Authoritative identity and ttl, annotation comment
        let merged = record.clone().with_comment(existing.comment.clone());
        if ttl_differs {
            plan.tasks_for_annotation
                .push(Task::update(&authoritative.id, merged.clone()));
        }
        if comment_differs {
            plan.tasks_for_authoritative
                .push(Task::update(&authoritative.id, merged));
        }
    }

    let live: HashSet<RecordKey<'_>> = authoritative.records.iter().map(Record::key).collect();
    for record in &annotation.records {
        if !live.contains(&record.key()) {
            plan.tasks_for_annotation
                .push(Task::delete(&annotation.id, record.clone()));
        }
    }

    log::debug!(
        "[{}] Zone {}: {} authoritative task(s), {} annotation task(s)",
        SyncPhase::Reconcile,
        authoritative.id,
        plan.tasks_for_authoritative.len() - before_authoritative,
        plan.tasks_for_annotation.len() - before_annotation
    );
}

#[cfg(test)]
mod tests {
    use zone_sync_connector::{Comment, TaskKind};

    use super::*;
    use crate::test_utils::apply_to_zones;

    fn a(name: &str, value: &str, ttl: &str) -> Record {
        Record::new(name, "A", value, ttl)
    }

    fn annotated(record: Record, content: &str, account: &str) -> Record {
        record.with_comment(Comment::new(content, account))
    }

    fn zone(id: &str, records: Vec<Record>) -> Zone {
        Zone::new(id, records)
    }

    #[test]
    fn identical_records_emit_nothing() {
        let record = annotated(a("www", "1.2.3.4", "300"), "web", "alice");
        let plan = reconcile(
            &[zone("example.com.", vec![record.clone()])],
            &[zone("example.com.", vec![record])],
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn ttl_and_comment_differences_emit_one_task_per_store() {
        let plan = reconcile(
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "600"), "old", "alice")],
            )],
        )
        .unwrap();

        assert_eq!(plan.tasks_for_annotation.len(), 1);
        let task = &plan.tasks_for_annotation[0];
        assert_eq!(task.kind, TaskKind::Update);
        assert_eq!(task.zone_id, "example.com.");
        assert_eq!(task.record.ttl, "300");
        assert_eq!(task.record.comment, Comment::new("old", "alice"));

        // The authoritative side carries no comment, so it receives the annotation one
        assert_eq!(plan.tasks_for_authoritative.len(), 1);
        assert_eq!(
            plan.tasks_for_authoritative[0].record.comment,
            Comment::new("old", "alice")
        );
    }

    #[test]
    fn ttl_only_difference_targets_annotation_only() {
        let plan = reconcile(
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "300"), "old", "alice")],
            )],
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "600"), "old", "alice")],
            )],
        )
        .unwrap();

        assert_eq!(plan.tasks_for_annotation.len(), 1);
        assert_eq!(plan.tasks_for_annotation[0].record.ttl, "300");
        assert_eq!(
            plan.tasks_for_annotation[0].record.comment,
            Comment::new("old", "alice")
        );
        assert!(plan.tasks_for_authoritative.is_empty());
    }

    #[test]
    fn comment_difference_updates_authoritative() {
        let plan = reconcile(
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "300"), "stale", "bob")],
            )],
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "300"), "web", "alice")],
            )],
        )
        .unwrap();

        assert!(plan.tasks_for_annotation.is_empty());
        assert_eq!(plan.tasks_for_authoritative.len(), 1);
        let task = &plan.tasks_for_authoritative[0];
        assert_eq!(task.kind, TaskKind::Update);
        assert_eq!(task.record.name, "www");
        assert_eq!(task.record.value, "1.2.3.4");
        assert_eq!(task.record.ttl, "300");
        assert_eq!(task.record.comment, Comment::new("web", "alice"));
    }

    #[test]
    fn account_alone_counts_as_comment_difference() {
        let plan = reconcile(
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "300"), "web", "bob")],
            )],
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "300"), "web", "alice")],
            )],
        )
        .unwrap();
        assert_eq!(plan.tasks_for_authoritative.len(), 1);
    }

    #[test]
    fn missing_record_is_added_with_empty_comment() {
        let plan = reconcile(
            &[zone("example.com.", vec![a("new", "5.6.7.8", "300")])],
            &[zone("example.com.", vec![])],
        )
        .unwrap();

        assert_eq!(plan.tasks_for_annotation.len(), 1);
        let task = &plan.tasks_for_annotation[0];
        assert_eq!(task.kind, TaskKind::Add);
        assert_eq!(task.record.comment, Comment::new("", ""));
        assert!(plan.tasks_for_authoritative.is_empty());
    }

    #[test]
    fn added_record_carries_authoritative_comment() {
        let plan = reconcile(
            &[zone(
                "example.com.",
                vec![annotated(a("new", "5.6.7.8", "300"), "from dns", "ops")],
            )],
            &[zone("example.com.", vec![])],
        )
        .unwrap();
        assert_eq!(
            plan.tasks_for_annotation[0].record.comment,
            Comment::new("from dns", "ops")
        );
    }

    #[test]
    fn annotation_only_record_is_deleted() {
        let stale = annotated(a("gone", "9.9.9.9", "300"), "old host", "carol");
        let plan = reconcile(
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
            &[zone(
                "example.com.",
                vec![a("www", "1.2.3.4", "300"), stale.clone()],
            )],
        )
        .unwrap();

        assert_eq!(plan.tasks_for_annotation, vec![Task::delete("example.com.", stale)]);
        assert!(plan.tasks_for_authoritative.is_empty());
    }

    #[test]
    fn value_change_is_add_plus_delete() {
        let plan = reconcile(
            &[zone("example.com.", vec![a("www", "1.2.3.5", "300")])],
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
        )
        .unwrap();

        let kinds: Vec<_> = plan.tasks_for_annotation.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TaskKind::Add, TaskKind::Delete]);
        assert_eq!(plan.tasks_for_annotation[0].record.value, "1.2.3.5");
        assert_eq!(plan.tasks_for_annotation[1].record.value, "1.2.3.4");
    }

    #[test]
    fn type_is_part_of_identity() {
        let plan = reconcile(
            &[zone(
                "example.com.",
                vec![Record::new("www", "AAAA", "1.2.3.4", "300")],
            )],
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
        )
        .unwrap();
        assert_eq!(plan.tasks_for_annotation.len(), 2);
    }

    #[test]
    fn task_order_follows_zone_and_record_order() {
        let plan = reconcile(
            &[
                zone(
                    "b.example.",
                    vec![a("b1", "10.0.0.1", "60"), a("b2", "10.0.0.2", "60")],
                ),
                zone("a.example.", vec![a("a1", "10.0.1.1", "60")]),
            ],
            &[
                zone("a.example.", vec![a("a-stale", "10.0.1.9", "60")]),
                zone(
                    "b.example.",
                    vec![a("b-stale", "10.0.0.9", "60"), a("b2", "10.0.0.2", "120")],
                ),
            ],
        )
        .unwrap();

        let order: Vec<_> = plan
            .tasks_for_annotation
            .iter()
            .map(|t| (t.zone_id.as_str(), t.kind, t.record.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("b.example.", TaskKind::Add, "b1"),
                ("b.example.", TaskKind::Update, "b2"),
                ("b.example.", TaskKind::Delete, "b-stale"),
                ("a.example.", TaskKind::Add, "a1"),
                ("a.example.", TaskKind::Delete, "a-stale"),
            ]
        );
    }

    #[test]
    fn duplicate_annotation_triple_pairs_first_row() {
        let first = annotated(a("www", "1.2.3.4", "300"), "first", "alice");
        let second = annotated(a("www", "1.2.3.4", "900"), "second", "bob");
        let plan = reconcile(
            &[zone(
                "example.com.",
                vec![annotated(a("www", "1.2.3.4", "300"), "first", "alice")],
            )],
            &[zone("example.com.", vec![first, second])],
        )
        .unwrap();

        // Paired with the first row, which already agrees; the duplicate is left alone
        assert!(plan.is_empty());
    }

    #[test]
    fn duplicate_annotation_triple_uses_first_rows_comment() {
        let plan = reconcile(
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
            &[zone(
                "example.com.",
                vec![
                    annotated(a("www", "1.2.3.4", "300"), "first", "alice"),
                    annotated(a("www", "1.2.3.4", "300"), "second", "bob"),
                ],
            )],
        )
        .unwrap();

        assert_eq!(plan.tasks_for_authoritative.len(), 1);
        assert_eq!(
            plan.tasks_for_authoritative[0].record.comment,
            Comment::new("first", "alice")
        );
    }

    #[test]
    fn ttl_is_compared_as_trimmed_text() {
        let plan = reconcile(
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
            &[zone("example.com.", vec![a("www", "1.2.3.4", " 300 ")])],
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn empty_authoritative_list_is_fatal() {
        let result = reconcile(&[], &[zone("example.com.", vec![])]);
        assert!(matches!(
            result,
            Err(CoreError::MissingZones(StoreRole::Authoritative))
        ));
    }

    #[test]
    fn empty_annotation_list_is_fatal() {
        let result = reconcile(&[zone("example.com.", vec![])], &[]);
        assert!(matches!(
            result,
            Err(CoreError::MissingZones(StoreRole::Annotation))
        ));
    }

    #[test]
    fn unmatched_authoritative_zone_is_fatal_before_any_task() {
        // The first zone would produce tasks; the second has no counterpart
        let result = reconcile(
            &[
                zone("example.org.", vec![a("www", "1.2.3.4", "300")]),
                zone("example.com.", vec![a("www", "1.2.3.4", "300")]),
            ],
            &[zone("example.org.", vec![])],
        );
        assert!(matches!(
            result,
            Err(CoreError::UnmatchedZone { ref zone_id }) if zone_id == "example.com."
        ));
    }

    #[test]
    fn annotation_only_zone_is_skipped() {
        let plan = reconcile(
            &[zone("example.com.", vec![a("www", "1.2.3.4", "300")])],
            &[
                zone("example.com.", vec![a("www", "1.2.3.4", "300")]),
                zone("legacy.example.", vec![a("old", "10.0.0.1", "60")]),
            ],
        )
        .unwrap();

        assert!(plan.is_empty());
        assert_eq!(plan.skipped_zones, vec!["legacy.example.".to_string()]);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let authoritative = vec![zone("example.com.", vec![a("www", "1.2.3.4", "300")])];
        let annotation = vec![zone("example.com.", vec![a("old", "1.2.3.9", "300")])];
        let (auth_copy, annot_copy) = (authoritative.clone(), annotation.clone());

        let _plan = reconcile(&authoritative, &annotation).unwrap();

        assert_eq!(authoritative, auth_copy);
        assert_eq!(annotation, annot_copy);
    }

    #[test]
    fn second_pass_over_applied_plan_is_empty() {
        let mut authoritative = vec![
            zone(
                "example.com.",
                vec![
                    a("www", "1.2.3.4", "300"),
                    annotated(a("mail", "1.2.3.10", "3600"), "stale", "bob"),
                    a("new", "1.2.3.20", "60"),
                ],
            ),
            zone("example.org.", vec![a("www", "5.6.7.8", "300")]),
        ];
        let mut annotation = vec![
            zone(
                "example.com.",
                vec![
                    annotated(a("www", "1.2.3.4", "600"), "web", "alice"),
                    annotated(a("mail", "1.2.3.10", "3600"), "mx host", "carol"),
                    a("gone", "1.2.3.99", "300"),
                ],
            ),
            zone("example.org.", vec![]),
        ];

        let plan = reconcile(&authoritative, &annotation).unwrap();
        assert!(!plan.is_empty());
        for task in &plan.tasks_for_annotation {
            apply_to_zones(&mut annotation, task);
        }
        for task in &plan.tasks_for_authoritative {
            apply_to_zones(&mut authoritative, task);
        }

        let second = reconcile(&authoritative, &annotation).unwrap();
        assert!(second.is_empty(), "unexpected tasks: {second:?}");
    }
}
