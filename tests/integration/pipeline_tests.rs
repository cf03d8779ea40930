//! Pipeline integration tests
//!
//! Decode, validate, submit and report through the public API.

#[cfg(test)]
mod tests {
    use crate::common::{CsvBuilder, RecordingSubmitter};
    use litellm_user_import::{
        Batch, BatchReport, DecodeError, FailureKind, SubmissionConfig, SubmissionOrchestrator,
        SubmissionState, ValidationOutcome, export_results, template,
    };
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn orchestrator(concurrency: usize) -> SubmissionOrchestrator {
        SubmissionOrchestrator::new(SubmissionConfig::new().with_concurrency(concurrency))
    }

    #[tokio::test]
    async fn test_invalid_rows_are_reported_and_skipped() {
        let text = CsvBuilder::with_header(&["identifier", "role"])
            .row(&["a@x.com", "admin"])
            .row(&["", "admin"])
            .row(&["b@x.com", ""])
            .build();

        let batch = Batch::from_text(&text, ',').unwrap();
        let outcomes: Vec<_> = batch.entries().iter().map(|e| e.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                ValidationOutcome::Valid,
                ValidationOutcome::Invalid(vec!["identifier required".to_string()]),
                ValidationOutcome::Invalid(vec!["role required".to_string()]),
            ]
        );

        let submitter = RecordingSubmitter::new();
        let report = orchestrator(1)
            .run(&batch, &submitter, &CancellationToken::new(), None)
            .await;

        assert_eq!(submitter.calls(), vec!["a@x.com".to_string()]);
        assert_eq!(
            report,
            BatchReport {
                total: 3,
                valid_count: 1,
                invalid_count: 2,
                succeeded: 1,
                failed: 0,
                pending: 0,
                not_submitted: 0,
            }
        );
        assert_eq!(batch.view().state(1), Some(SubmissionState::NotSubmitted));
        assert_eq!(batch.view().state(2), Some(SubmissionState::NotSubmitted));
    }

    #[tokio::test]
    async fn test_rejection_is_recorded_per_row() {
        let text = CsvBuilder::new()
            .row(&["taken@x.com", "internal_user", "", ""])
            .row(&["fresh@x.com", "internal_user", "", ""])
            .build();
        let batch = Batch::from_text(&text, ',').unwrap();
        let submitter = RecordingSubmitter::new().reject("taken@x.com", "User already exists");

        let report = orchestrator(2)
            .run(&batch, &submitter, &CancellationToken::new(), None)
            .await;

        assert_eq!(report.total, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);

        match batch.view().state(0) {
            Some(SubmissionState::Failed(detail)) => {
                assert_eq!(detail.kind, FailureKind::Rejected);
                assert_eq!(detail.message, "User already exists");
            }
            other => panic!("expected failed row, got {:?}", other),
        }
        assert_eq!(batch.view().state(1), Some(SubmissionState::Succeeded));
    }

    #[tokio::test]
    async fn test_sequential_run_follows_file_order() {
        let text = CsvBuilder::new().users(6).build();
        let batch = Batch::from_text(&text, ',').unwrap();
        let submitter = RecordingSubmitter::new();

        orchestrator(1)
            .run(&batch, &submitter, &CancellationToken::new(), None)
            .await;

        let expected: Vec<String> = (0..6).map(|n| format!("user{}@example.com", n)).collect();
        assert_eq!(submitter.calls(), expected);
    }

    #[tokio::test]
    async fn test_spawned_run_streams_updates() {
        let text = CsvBuilder::new().users(4).row(&["", "", "", ""]).build();
        let batch = Batch::from_text(&text, ',').unwrap();
        assert_eq!(batch.len(), 5);

        let submitter = Arc::new(RecordingSubmitter::new());
        let mut run = orchestrator(2).spawn(batch, submitter.clone(), CancellationToken::new());

        let mut updates = Vec::new();
        while let Some(update) = run.next_update().await {
            updates.push(update);
        }
        let view = run.view().clone();
        let report = run.finish().await.unwrap();

        // A Pending and a terminal update for each valid row
        assert_eq!(updates.len(), 8);
        assert!(updates.iter().all(|u| u.index < 4));
        assert_eq!(report.succeeded, 4);
        assert_eq!(report.invalid_count, 1);
        assert_eq!(view.report(), report);
        assert_eq!(submitter.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_cancel_before_start_submits_nothing() {
        let text = CsvBuilder::new().users(3).build();
        let batch = Batch::from_text(&text, ',').unwrap();
        let submitter = RecordingSubmitter::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = orchestrator(2).run(&batch, &submitter, &cancel, None).await;

        assert!(submitter.calls().is_empty());
        assert_eq!(report.not_submitted, 3);
        assert_eq!(report.pending, 0);
        assert!(!report.is_settled());
    }

    #[tokio::test]
    async fn test_results_export_after_run() {
        let text = CsvBuilder::new()
            .row(&["ok@x.com", "internal_user", "team-a", ""])
            .row(&["bad", "internal_user", "", ""])
            .row(&["dup@x.com", "internal_user", "", ""])
            .build();
        let batch = Batch::from_text(&text, ',').unwrap();
        let submitter = RecordingSubmitter::new().reject("dup@x.com", "duplicate, see logs");

        orchestrator(1)
            .run(&batch, &submitter, &CancellationToken::new(), None)
            .await;

        let exported = export_results(&batch.view(), ',');
        let lines: Vec<&str> = exported.lines().collect();
        assert_eq!(lines[0], "line,identifier,role,validation,status,detail");
        assert_eq!(lines[1], "2,ok@x.com,internal_user,valid,succeeded,");
        assert_eq!(
            lines[2],
            "3,bad,internal_user,invalid,not_submitted,identifier must be an email address"
        );
        assert_eq!(
            lines[3],
            "4,dup@x.com,internal_user,valid,failed,\"duplicate, see logs\""
        );
    }

    #[test]
    fn test_template_round_trips_through_decoder() {
        for delimiter in [',', ';', '\t'] {
            let batch = Batch::from_text(&template(delimiter), delimiter).unwrap();
            assert_eq!(batch.len(), 1);
            assert_eq!(batch.valid_count(), 1);
            assert_eq!(batch.entries()[0].record.group_ref.as_deref(), Some("team-alpha"));
        }
    }

    #[test]
    fn test_alias_headers_and_semicolons() {
        let text = CsvBuilder::with_header(&["User_Email", "USER_ROLE", "teams"])
            .delimiter(';')
            .row(&["a@x.com", "proxy_admin", "core"])
            .build();
        let batch = Batch::from_text(&text, ';').unwrap();
        let record = &batch.entries()[0].record;
        assert_eq!(record.identifier, "a@x.com");
        assert_eq!(record.role, "proxy_admin");
        assert_eq!(record.group_ref.as_deref(), Some("core"));
    }

    #[test]
    fn test_unquoted_json_and_mid_field_quotes_decode() {
        let text = "identifier,role,metadata\n\
                    a@x.com,internal_user,{\"department\": \"eng\"}\n\
                    o\"brien@x.com,internal_user,\n\
                    \"broken,internal_user,\n";
        let err = Batch::from_text(text, ',').unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { line: 4, .. }));

        let text = "identifier,role,metadata\n\
                    a@x.com,internal_user,{\"department\": \"eng\"}\n\
                    o\"brien@x.com,internal_user,\n";
        let batch = Batch::from_text(text, ',').unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.entries()[0].record.metadata.as_deref(),
            Some("{\"department\": \"eng\"}")
        );
        assert_eq!(batch.entries()[1].record.identifier, "o\"brien@x.com");
        assert_eq!(batch.valid_count(), 2);
    }

    #[test]
    fn test_missing_columns_abort_decode() {
        let text = CsvBuilder::with_header(&["name", "team"])
            .row(&["a", "b"])
            .build();
        let err = Batch::from_text(&text, ',').unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingColumns(vec!["identifier".to_string(), "role".to_string()])
        );
    }
}
