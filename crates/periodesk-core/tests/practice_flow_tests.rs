//! End-to-end exercise of the FFI surface: intake, charting, saving,
//! classification, export, scheduling and lab tracking against one store.

use periodesk_core::{
    chart_attachment_level, chart_set_mobility, chart_set_pocket_depth, chart_set_recession,
    chart_statistics, chart_toggle_flag, classify_chart, open_database_in_memory, FfiIntakeForm,
    PeriodeskError,
};

#[test]
fn test_full_examination_flow() {
    let core = open_database_in_memory().unwrap();

    // Front desk: register the patient and take the intake form.
    let patient = core.create_patient("Ada Okoye".into()).unwrap();
    let form = FfiIntakeForm {
        form_id: String::new(),
        patient_id: patient.patient_id.clone(),
        medications: vec!["Warfarin 5mg".into()],
        allergies: vec!["penicillin".into()],
        conditions: vec![],
        smoker: false,
        pregnant: false,
        last_dental_visit: Some("2024-11-02".into()),
        chief_complaint: Some("bleeding gums".into()),
        consent_signed: true,
        submitted_at: String::new(),
    };
    core.submit_intake_form(form).unwrap();

    let alerts = core.medical_alerts(patient.patient_id.clone()).unwrap();
    assert!(alerts.iter().any(|a| a.contains("penicillin")));
    assert!(alerts.iter().any(|a| a.starts_with("Anticoagulant")));

    // Operatory: chart the examination cell by cell.
    let chart = core
        .create_chart(patient.patient_id.clone(), "Dr. Okafor".into())
        .unwrap();
    let chart = chart_set_pocket_depth(chart, 19, "facial".into(), "distal".into(), 6).unwrap();
    let chart = chart_set_recession(chart, 19, "facial".into(), "distal".into(), 2).unwrap();
    let chart = chart_toggle_flag(chart, 19, "facial".into(), "distal".into(), "bleeding".into())
        .unwrap();
    let chart = chart_set_mobility(chart, 19, 2).unwrap();

    assert_eq!(
        chart_attachment_level(chart.clone(), 19, "facial".into(), "distal".into()).unwrap(),
        8
    );

    let stats = chart_statistics(chart.clone()).unwrap();
    assert_eq!(stats.total_sites, 192);
    assert_eq!(stats.bleeding_sites, 1);
    assert_eq!(stats.max_attachment_level_mm, 8);

    let assessment = classify_chart(chart.clone()).unwrap();
    assert_eq!(assessment.severity, "severe");

    // Save the examination whole, then read it back.
    let commit = core.save_chart(chart.clone()).unwrap();
    assert_eq!(commit.chart_id, chart.chart_id);
    assert_eq!(commit.content_hash.len(), 64);

    let loaded = core.get_chart(chart.chart_id.clone()).unwrap().unwrap();
    assert_eq!(
        chart_attachment_level(loaded, 19, "facial".into(), "distal".into()).unwrap(),
        8
    );

    let saved_assessment = core.classify_saved_chart(chart.chart_id.clone()).unwrap();
    assert_eq!(saved_assessment.severity, "severe");

    let commits = core.list_chart_commits(patient.patient_id.clone()).unwrap();
    assert_eq!(commits.len(), 1);

    // Records request: CSV carries the worked-example site.
    let csv = core.export_chart_csv(chart.chart_id.clone()).unwrap();
    assert!(csv.lines().count() > 192);
    assert!(csv.contains("19,36,facial,distal,6,2,8,true"));

    let json = core.export_patient_json(patient.patient_id).unwrap();
    assert!(json.contains("\"severity\": \"severe\""));
}

#[test]
fn test_edit_rejection_reports_invalid_input() {
    let core = open_database_in_memory().unwrap();
    let patient = core.create_patient("Leo Grant".into()).unwrap();
    let chart = core
        .create_chart(patient.patient_id, "Dr. Okafor".into())
        .unwrap();

    // Out-of-range measurement.
    let err = chart_set_pocket_depth(chart.clone(), 19, "facial".into(), "distal".into(), 16)
        .unwrap_err();
    assert!(matches!(err, PeriodeskError::InvalidInput(_)));

    // Tooth outside the closed dentition.
    let err =
        chart_set_pocket_depth(chart.clone(), 33, "facial".into(), "distal".into(), 4).unwrap_err();
    assert!(matches!(err, PeriodeskError::NotFound(_)));

    // Unknown surface keyword.
    let err =
        chart_set_pocket_depth(chart, 19, "occlusal".into(), "distal".into(), 4).unwrap_err();
    assert!(matches!(err, PeriodeskError::InvalidInput(_)));
}

#[test]
fn test_chart_for_unknown_patient_rejected() {
    let core = open_database_in_memory().unwrap();
    let err = core
        .create_chart("no-such-patient".into(), "Dr. Okafor".into())
        .unwrap_err();
    assert!(matches!(err, PeriodeskError::NotFound(_)));
}

#[test]
fn test_scheduling_flow() {
    let core = open_database_in_memory().unwrap();
    let patient = core.create_patient("Maya Lindqvist".into()).unwrap();

    let slots = core.open_slots("2026-03-14".into()).unwrap();
    assert_eq!(slots, vec![9, 10, 11, 12, 13, 14, 15, 16]);

    let appointment = core
        .book_appointment(
            patient.patient_id.clone(),
            "2026-03-14".into(),
            10,
            Some("hygiene recall".into()),
        )
        .unwrap();
    assert_eq!(appointment.status, "scheduled");

    // The slot is gone; double-booking fails.
    assert!(!core.open_slots("2026-03-14".into()).unwrap().contains(&10));
    let err = core
        .book_appointment(patient.patient_id.clone(), "2026-03-14".into(), 10, None)
        .unwrap_err();
    assert!(matches!(err, PeriodeskError::InvalidInput(_)));

    // Off-grid hours are rejected up front.
    let err = core
        .book_appointment(patient.patient_id.clone(), "2026-03-14".into(), 7, None)
        .unwrap_err();
    assert!(matches!(err, PeriodeskError::InvalidInput(_)));

    // Cancelling frees the slot again.
    assert!(core.cancel_appointment(appointment.appointment_id).unwrap());
    assert!(core.open_slots("2026-03-14".into()).unwrap().contains(&10));
    assert!(core
        .book_appointment(patient.patient_id, "2026-03-14".into(), 10, None)
        .is_ok());
}

#[test]
fn test_lab_case_flow() {
    let core = open_database_in_memory().unwrap();
    let patient = core.create_patient("Leo Grant".into()).unwrap();

    let case = core
        .create_lab_case(
            patient.patient_id,
            "crown".into(),
            "Summit Dental Lab".into(),
            Some("A2".into()),
            Some("2026-03-10".into()),
        )
        .unwrap();
    assert_eq!(case.status, "open");

    let overdue = core.overdue_lab_cases("2026-03-14".into()).unwrap();
    assert_eq!(overdue.len(), 1);

    assert!(core
        .set_lab_case_status(case.case_id.clone(), "sent".into())
        .unwrap());
    assert!(core
        .set_lab_case_status(case.case_id.clone(), "seated".into())
        .unwrap());
    assert!(core.open_lab_cases().unwrap().is_empty());
    assert!(core.overdue_lab_cases("2026-03-14".into()).unwrap().is_empty());

    let err = core
        .set_lab_case_status(case.case_id, "misplaced".into())
        .unwrap_err();
    assert!(matches!(err, PeriodeskError::InvalidInput(_)));
}
