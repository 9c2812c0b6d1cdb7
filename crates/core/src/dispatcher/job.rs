//! The dispatch sequence executed for each accepted ticket event.

use std::time::Instant;
use tracing::{info, warn};

use crate::metrics;
use crate::notifier::Notifier;
use crate::renderer::render;
use crate::ticket::{sort_by_creation, TicketEvent, GENERATION_FLAG_CLEARED};
use crate::ticketing::{AttachmentUpload, TicketingApi};

use super::types::{DispatchReport, StepKind, StepOutcome};

/// Run the full dispatch sequence for one ticket event.
///
/// Steps run in a fixed order and each failure is isolated: clearing the flag
/// or uploading may fail without stopping later steps. Only a render failure
/// aborts, since there is no document left to deliver. The report records the
/// outcome of every step that was reached.
pub async fn run_dispatch(
    event: &TicketEvent,
    api: &dyn TicketingApi,
    notifier: Option<&dyn Notifier>,
) -> DispatchReport {
    let started = Instant::now();
    let snapshot = &event.snapshot;
    let mut report = DispatchReport::new(snapshot.id, event.mode);

    if !event.mode.wants_document() {
        return report;
    }

    // Clear the flag first so the write-back does not re-trigger the webhook.
    match api
        .set_generation_flag(snapshot.id, GENERATION_FLAG_CLEARED)
        .await
    {
        Ok(()) => report.record(StepOutcome::ok(StepKind::ClearFlag)),
        Err(e) => {
            warn!(ticket_id = snapshot.id, error = %e, "Failed to clear generation flag");
            report.record(StepOutcome::failed(StepKind::ClearFlag, e));
        }
    }

    let mut entries = Vec::with_capacity(snapshot.article_ids.len());
    let mut fetch_error = None;
    for &entry_id in &snapshot.article_ids {
        match api.fetch_correspondence(entry_id).await {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                warn!(
                    ticket_id = snapshot.id,
                    entry_id = entry_id,
                    error = %e,
                    "Failed to fetch correspondence entry, skipping"
                );
                fetch_error.get_or_insert_with(|| e.to_string());
            }
        }
    }
    report.record(match fetch_error {
        None => StepOutcome::ok(StepKind::FetchEntries),
        Some(e) => StepOutcome::failed(StepKind::FetchEntries, e),
    });

    sort_by_creation(&mut entries);

    let document = match render(snapshot, &entries) {
        Ok(document) => {
            metrics::DOCUMENT_BYTES.observe(document.len() as f64);
            report.record(StepOutcome::ok(StepKind::Render));
            document
        }
        Err(e) => {
            warn!(ticket_id = snapshot.id, error = %e, "Failed to render document");
            report.record(StepOutcome::failed(StepKind::Render, e));
            finish(&mut report, started);
            return report;
        }
    };

    let upload = AttachmentUpload::for_ticket(snapshot.id, &snapshot.number, &document);
    let filename = upload.filename.clone();
    match api.upload_attachment(upload).await {
        Ok(()) => report.record(StepOutcome::ok(StepKind::Upload)),
        Err(e) => {
            warn!(ticket_id = snapshot.id, error = %e, "Failed to upload document");
            report.record(StepOutcome::failed(StepKind::Upload, e));
        }
    }

    if event.mode.wants_mail() {
        match notifier {
            Some(notifier) => match notifier.send_with_attachment(&document.bytes, &filename).await
            {
                Ok(()) => report.record(StepOutcome::ok(StepKind::Notify)),
                Err(e) => {
                    warn!(ticket_id = snapshot.id, error = %e, "Failed to send notification mail");
                    report.record(StepOutcome::failed(StepKind::Notify, e));
                }
            },
            None => {
                warn!(
                    ticket_id = snapshot.id,
                    "Mail delivery requested but no SMTP transport is configured"
                );
                report.record(StepOutcome::failed(
                    StepKind::Notify,
                    "mail delivery not configured",
                ));
            }
        }
    }

    finish(&mut report, started);
    report
}

fn finish(report: &mut DispatchReport, started: Instant) {
    metrics::DISPATCHES_TOTAL
        .with_label_values(&[report.mode.as_str()])
        .inc();
    metrics::DISPATCH_DURATION
        .with_label_values(&[report.mode.as_str()])
        .observe(started.elapsed().as_secs_f64());
    for outcome in &report.steps {
        let result = if outcome.succeeded() {
            "success"
        } else {
            "failed"
        };
        metrics::DISPATCH_STEPS
            .with_label_values(&[outcome.step.as_str(), result])
            .inc();
    }

    info!(
        ticket_id = report.ticket_id,
        mode = report.mode.as_str(),
        steps = report.steps.len(),
        succeeded = report.fully_succeeded(),
        "Dispatch finished"
    );
}
