use std::sync::Arc;

use chrono::{TimeZone, Utc};

use super::common::*;
use crate::notifications::RecordingTransport;
use crate::storage::RepositoryError;
use crate::workflows::leads::{
    ContactForm, LeadCategory, LeadRepository, LeadService, LeadServiceError, LeadStatus,
    LeadUpdate,
};

#[tokio::test]
async fn submit_persists_scores_and_notifies() {
    let (service, repository, transport) = build_service();

    let submitted = service.submit(&hot_form()).expect("submission succeeds");
    let report = submitted.notification.await.expect("dispatch task joins");

    let record = submitted.record;
    assert_eq!(record.lead_score, 100);
    assert_eq!(record.lead_category, LeadCategory::Hot);
    assert_eq!(record.lead_priority, LeadCategory::Hot);
    assert_eq!(record.status, LeadStatus::New);
    assert_eq!(record.follow_up_count, 0);
    assert_eq!(
        repository.fetch(&record.id).expect("fetch"),
        Some(record.clone())
    );

    assert_eq!(report.delivered, 2);
    let sent = transport.sent();
    assert_eq!(sent[0].template, "hot-lead");
    assert_eq!(sent[0].to, "priya@example.com");
    assert_eq!(sent[1].template, "admin-lead-alert");
    assert_eq!(sent[1].to, ADMIN_ADDRESS);
    assert!(sent[1].subject.starts_with("[URGENT] New HOT lead (100/100)"));
}

#[tokio::test]
async fn template_follows_category() {
    let (service, _, transport) = build_service();

    let submitted = service
        .submit(&cold_boundary_form())
        .expect("submission succeeds");
    submitted.notification.await.expect("dispatch task joins");

    assert_eq!(submitted.record.lead_category, LeadCategory::Cold);
    assert_eq!(transport.templates(), vec!["cold-lead", "admin-lead-alert"]);
    assert!(!transport.sent()[1].subject.contains("URGENT"));
}

#[tokio::test]
async fn transport_failure_does_not_change_the_outcome() {
    let repository = Arc::new(crate::workflows::leads::MemoryLeadRepository::default());
    let transport = Arc::new(RecordingTransport::failing());
    let service = LeadService::new(repository.clone(), dispatcher(transport.clone()));

    let submitted = service.submit(&hot_form()).expect("submission succeeds");
    let report = submitted.notification.await.expect("dispatch task joins");

    assert_eq!(report.failed, 2);
    assert_eq!(submitted.record.lead_score, 100);
    assert!(repository
        .fetch(&submitted.record.id)
        .expect("fetch")
        .is_some());
}

#[tokio::test]
async fn invalid_form_has_no_side_effects() {
    let (service, repository, transport) = build_service();

    let result = service.submit(&ContactForm::default());

    assert!(matches!(result, Err(LeadServiceError::Validation(_))));
    assert!(repository
        .list(&Default::default())
        .expect("list")
        .is_empty());
    tokio::task::yield_now().await;
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn storage_failure_aborts_before_dispatch() {
    let transport = Arc::new(RecordingTransport::new());
    let service = LeadService::new(Arc::new(UnavailableRepository), dispatcher(transport.clone()));

    let result = service.submit(&hot_form());

    assert!(matches!(
        result,
        Err(LeadServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
    tokio::task::yield_now().await;
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn status_only_moves_forward() {
    let (service, _, _) = build_service();
    let id = service.submit(&hot_form()).expect("submitted").record.id;

    let resolved = service
        .update(
            &id,
            LeadUpdate {
                status: Some(LeadStatus::Resolved),
                ..LeadUpdate::default()
            },
        )
        .expect("advance succeeds");
    assert_eq!(resolved.status, LeadStatus::Resolved);

    let regression = service.update(
        &id,
        LeadUpdate {
            status: Some(LeadStatus::InProgress),
            ..LeadUpdate::default()
        },
    );
    assert!(matches!(
        regression,
        Err(LeadServiceError::StatusRegression {
            from: LeadStatus::Resolved,
            to: LeadStatus::InProgress,
        })
    ));

    let same = service.update(
        &id,
        LeadUpdate {
            status: Some(LeadStatus::Resolved),
            ..LeadUpdate::default()
        },
    );
    assert!(same.is_ok());
}

#[tokio::test]
async fn manual_score_rederives_category_and_priority() {
    let (service, _, _) = build_service();
    let id = service.submit(&hot_form()).expect("submitted").record.id;

    let rescored = service
        .update(
            &id,
            LeadUpdate {
                lead_score: Some(55),
                ..LeadUpdate::default()
            },
        )
        .expect("rescore");
    assert_eq!(rescored.lead_category, LeadCategory::Warm);
    assert_eq!(rescored.lead_priority, LeadCategory::Warm);

    let overridden = service
        .update(
            &id,
            LeadUpdate {
                lead_score: Some(55),
                lead_category: Some(LeadCategory::Hot),
                ..LeadUpdate::default()
            },
        )
        .expect("override");
    assert_eq!(overridden.lead_category, LeadCategory::Hot);

    let out_of_range = service.update(
        &id,
        LeadUpdate {
            lead_score: Some(101),
            ..LeadUpdate::default()
        },
    );
    assert!(matches!(out_of_range, Err(LeadServiceError::Validation(_))));
}

#[tokio::test]
async fn follow_up_counts_and_advances_new_leads() {
    let (service, _, _) = build_service();
    let id = service.submit(&hot_form()).expect("submitted").record.id;
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).single().expect("valid");

    let first = service.record_follow_up(&id, at).expect("follow up");
    assert_eq!(first.follow_up_count, 1);
    assert_eq!(first.last_follow_up_date, Some(at));
    assert_eq!(first.status, LeadStatus::InProgress);

    service
        .update(
            &id,
            LeadUpdate {
                status: Some(LeadStatus::Responded),
                ..LeadUpdate::default()
            },
        )
        .expect("advance");
    let second = service.record_follow_up(&id, at).expect("follow up");
    assert_eq!(second.follow_up_count, 2);
    assert_eq!(second.status, LeadStatus::Responded);
}

#[tokio::test]
async fn notes_are_appended_in_order() {
    let (service, _, _) = build_service();
    let id = service.submit(&hot_form()).expect("submitted").record.id;

    service.add_note(&id, "Asha", "Called, left voicemail").expect("note");
    let record = service.add_note(&id, "Ravi", "Sent proposal").expect("note");

    let authors: Vec<_> = record.notes.iter().map(|n| n.author.as_str()).collect();
    assert_eq!(authors, vec!["Asha", "Ravi"]);
    assert!(matches!(
        service.add_note(&id, "Asha", "   "),
        Err(LeadServiceError::Validation(_))
    ));
}

#[tokio::test]
async fn missing_lead_is_not_found() {
    let (service, _, _) = build_service();
    let result = service.get(&crate::workflows::leads::LeadId("lead-missing".to_string()));
    assert!(matches!(
        result,
        Err(LeadServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_ticket_edits_keep_every_note_and_follow_up() {
    let (service, repository, _) = build_service();
    let id = service.submit(&hot_form()).expect("submitted").record.id;
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 9, 30, 0).single().expect("valid");

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let service = &service;
            let id = &id;
            scope.spawn(move || {
                for round in 0..50 {
                    service
                        .add_note(id, "ops", &format!("worker {worker} round {round}"))
                        .expect("note");
                }
            });
            scope.spawn(move || {
                for _ in 0..25 {
                    service.record_follow_up(id, at).expect("follow up");
                    service
                        .update(
                            id,
                            LeadUpdate {
                                lead_score: Some(60),
                                ..LeadUpdate::default()
                            },
                        )
                        .expect("update");
                }
            });
        }
    });

    let stored = repository.fetch(&id).expect("fetch").expect("lead exists");
    assert_eq!(stored.notes.len(), 8 * 50);
    assert_eq!(stored.follow_up_count, 8 * 25);
    assert_eq!(stored.status, LeadStatus::InProgress);
    assert_eq!(stored.lead_category, LeadCategory::Warm);
}
