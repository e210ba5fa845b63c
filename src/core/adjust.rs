use crate::core::audit_quietly;
use crate::core::ledger::DayLedger;
use crate::db::queries::{load_adjustments, load_days, save_adjustments};
use crate::db::store::KeyValueStore;
use crate::errors::{AppError, AppResult};
use crate::models::adjustment::{AdjustmentRequest, AdjustmentStatus, Attachment};
use crate::models::clock_event::EventId;
use crate::platform::{DocumentPicker, files};
use chrono::{Local, NaiveDate};
use std::path::Path;

/// Form data of the adjustment screen.
#[derive(Debug, Clone)]
pub struct AdjustmentForm {
    pub date: NaiveDate,
    pub reason: String,
    pub event_id: Option<EventId>,
}

pub struct AdjustLogic;

impl AdjustLogic {
    /// Validate and store a request. File and reason are both required.
    pub fn submit<S>(
        store: &mut S,
        ledger: &DayLedger,
        picker: &dyn DocumentPicker,
        form: &AdjustmentForm,
        attachment_dir: &Path,
    ) -> AppResult<AdjustmentRequest>
    where
        S: KeyValueStore + ?Sized,
    {
        let picked = picker.pick()?;
        let reason = form.reason.trim();

        let doc = match picked {
            Some(doc) if !reason.is_empty() => doc,
            _ => {
                return Err(AppError::ValidationFailed(
                    "please fill in all fields (file and reason)".into(),
                ));
            }
        };

        // a referenced punch must exist on that date
        if let Some(id) = &form.event_id {
            let days = load_days(store, ledger)?;
            let known = days
                .iter()
                .filter(|d| d.date() == form.date)
                .any(|d| d.position_of(id).is_some());
            if !known {
                return Err(AppError::NotFound(format!("event {} on {}", id, form.date)));
            }
        }

        let now = Local::now().fixed_offset();
        let stored = files::store_attachment(&doc.path, attachment_dir, &doc.name, &now)?;

        let request = AdjustmentRequest {
            id: EventId::new(),
            date: form.date,
            reason: reason.to_string(),
            attachment: Attachment {
                name: doc.name,
                uri: stored.to_string_lossy().to_string(),
            },
            event_id: form.event_id,
            created_at: now,
            status: AdjustmentStatus::Pending,
        };

        let mut all = load_adjustments(store)?;
        all.push(request.clone());
        save_adjustments(store, &all)?;

        audit_quietly(
            store,
            "adjust",
            &form.date.to_string(),
            &format!("{} ({})", request.reason, request.attachment.name),
        );

        Ok(request)
    }

    /// All requests, newest first.
    pub fn list<S>(store: &S) -> AppResult<Vec<AdjustmentRequest>>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut all = load_adjustments(store)?;
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use crate::platform::cli::PathPicker;

    fn form(reason: &str) -> AdjustmentForm {
        AdjustmentForm {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            reason: reason.into(),
            event_id: None,
        }
    }

    #[test]
    fn missing_file_or_reason_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("atestado.pdf");
        std::fs::write(&doc, b"%PDF").unwrap();
        let mut store = MemoryStore::new();
        let ledger = DayLedger::default();

        let cancelled = PathPicker { path: None };
        let err = AdjustLogic::submit(&mut store, &ledger, &cancelled, &form("médico"), tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));

        let picked = PathPicker { path: Some(doc) };
        let err = AdjustLogic::submit(&mut store, &ledger, &picked, &form("   "), tmp.path()).unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));

        assert!(AdjustLogic::list(&store).unwrap().is_empty());
    }

    #[test]
    fn valid_request_is_stored_pending() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("atestado.pdf");
        std::fs::write(&doc, b"%PDF").unwrap();
        let mut store = MemoryStore::new();

        let picker = PathPicker { path: Some(doc) };
        let req = AdjustLogic::submit(
            &mut store,
            &DayLedger::default(),
            &picker,
            &form("Consulta médica"),
            &tmp.path().join("attachments"),
        )
        .unwrap();

        assert_eq!(req.status, AdjustmentStatus::Pending);
        assert_eq!(req.attachment.name, "atestado.pdf");
        assert!(Path::new(&req.attachment.uri).is_file());
        assert_eq!(AdjustLogic::list(&store).unwrap(), vec![req]);
    }

    #[test]
    fn unknown_event_reference_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("a.txt");
        std::fs::write(&doc, b"x").unwrap();
        let mut store = MemoryStore::new();

        let mut f = form("esqueci de bater");
        f.event_id = Some(EventId::new());
        let err = AdjustLogic::submit(
            &mut store,
            &DayLedger::default(),
            &PathPicker { path: Some(doc) },
            &f,
            tmp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
