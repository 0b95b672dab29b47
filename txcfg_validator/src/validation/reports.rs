//! Validation for report delivery documents

use super::error::{FieldPath, Violation, ViolationKind};
use crate::rules::patterns::{cron_regex, logo_path_regex};
use crate::schema::{ReportTenant, Schedule};

pub const MIN_DAYS_TO_COLLECT: i64 = 1;
pub const MAX_DAYS_TO_COLLECT: i64 = 366;

pub fn validate_report_tenant(record: &ReportTenant, path: &FieldPath, violations: &mut Vec<Violation>) {
    if record.tenant.is_empty() {
        violations.push(Violation::new(
            ViolationKind::MissingField { field: "tenant" },
            path.field("tenant"),
        ));
    }

    if let Some(logo_path) = &record.logo_path {
        if !logo_path_regex().is_match(logo_path) {
            violations.push(Violation::new(
                ViolationKind::PatternMismatch { field: "logo_path" },
                path.field("logo_path"),
            ));
        }
    }

    let emails_path = path.field("emails");
    if record.emails.is_empty() {
        violations.push(Violation::new(
            ViolationKind::MissingField { field: "emails" },
            emails_path,
        ));
    } else if let Some(index) = record.emails.iter().position(|email| !email.contains('@')) {
        // One violation for the list, located at the first bad entry
        violations.push(Violation::new(
            ViolationKind::IncorrectEntries { field: "emails" },
            emails_path.index(index),
        ));
    }

    let schedules_path = path.field("schedules");
    if record.schedules.is_empty() {
        violations.push(Violation::new(
            ViolationKind::MissingField { field: "schedules" },
            schedules_path,
        ));
        return;
    }

    for (index, schedule) in record.schedules.iter().enumerate() {
        validate_schedule(schedule, &schedules_path.index(index), violations);
    }
}

fn validate_schedule(schedule: &Schedule, path: &FieldPath, violations: &mut Vec<Violation>) {
    if !(MIN_DAYS_TO_COLLECT..=MAX_DAYS_TO_COLLECT).contains(&schedule.days_to_collect) {
        violations.push(Violation::new(
            ViolationKind::OutOfRange {
                field: "days_to_collect",
                min: MIN_DAYS_TO_COLLECT,
                max: MAX_DAYS_TO_COLLECT,
            },
            path.field("days_to_collect"),
        ));
    }

    if !cron_regex().is_match(&schedule.cron_to_send) {
        violations.push(Violation::new(
            ViolationKind::IncorrectFormat { field: "cron_to_send" },
            path.field("cron_to_send"),
        ));
    }
}

/// Every violation in a report document, in tenant order
pub fn collect_report_violations(records: &[ReportTenant]) -> Vec<Violation> {
    let root = FieldPath::root();
    let mut violations = Vec::new();
    for (index, record) in records.iter().enumerate() {
        validate_report_tenant(record, &root.index(index), &mut violations);
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error::messages;

    fn valid() -> ReportTenant {
        ReportTenant {
            tenant: "acme".into(),
            logo_path: Some("/srv/logos/acme.svg".into()),
            emails: vec!["ops@example.com".into()],
            schedules: vec![Schedule {
                days_to_collect: 7,
                cron_to_send: "0 8 * * MON".into(),
            }],
            features: None,
        }
    }

    #[test]
    fn test_valid_report_tenant() {
        assert!(collect_report_violations(&[valid()]).is_empty());
    }

    #[test]
    fn test_absent_logo_is_fine_but_bad_logo_is_not() {
        let mut record = valid();
        record.logo_path = None;
        assert!(collect_report_violations(&[record.clone()]).is_empty());

        record.logo_path = Some("logo.pdf".into());
        assert_eq!(
            messages(&collect_report_violations(&[record])),
            vec!["Field 'logo_path' does not match the expected format".to_string()]
        );
    }

    #[test]
    fn test_bad_emails_reported_once() {
        let mut record = valid();
        record.emails = vec!["ops@example.com".into(), "nobody".into(), "still-nobody".into()];
        let violations = collect_report_violations(&[record]);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message(), "Field 'emails' has incorrect entries");
        assert_eq!(violations[0].location.to_string(), "[0].emails[1]");
    }

    #[test]
    fn test_empty_schedules_skip_schedule_checks() {
        let record = ReportTenant::default();
        assert_eq!(
            messages(&collect_report_violations(&[record])),
            vec![
                "Field 'tenant' not found or empty".to_string(),
                "Field 'emails' not found or empty".to_string(),
                "Field 'schedules' not found or empty".to_string(),
            ]
        );
    }

    #[test]
    fn test_schedule_bounds_and_cron() {
        let mut record = valid();
        record.schedules = vec![
            Schedule { days_to_collect: 0, cron_to_send: "0 8 * * MON".into() },
            Schedule { days_to_collect: 366, cron_to_send: "daily".into() },
            Schedule { days_to_collect: 367, cron_to_send: "".into() },
        ];

        assert_eq!(
            messages(&collect_report_violations(&[record])),
            vec![
                "Field 'days_to_collect' can't be greater than 366 or less than 1".to_string(),
                "Field 'cron_to_send' has incorrect format".to_string(),
                "Field 'days_to_collect' can't be greater than 366 or less than 1".to_string(),
                "Field 'cron_to_send' has incorrect format".to_string(),
            ]
        );
    }
}
