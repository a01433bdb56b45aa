//! Property tests for the cached employee fields, leave bookkeeping and
//! duration formatting.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use hr_admin::calculation::{
    CalendarSpan, calendar_diff, current_contract_fields, format_duration, inclusive_days,
    select_latest_contract,
};
use hr_admin::config::AdminConfig;
use hr_admin::models::{
    Contract, ContractForm, EmployeeForm, LeaveForm, ProjectAssignmentForm, ReferenceForm,
    ReferenceKind,
};
use hr_admin::service::HrService;
use hr_admin::store::ContractFilter;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
}

fn offset(days: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(days)).unwrap()
}

/// A service with two of every reference and one employee (number 1).
fn service() -> HrService {
    let mut service = HrService::in_memory(AdminConfig::default()).unwrap();
    for kind in ReferenceKind::ALL {
        for label in ["First", "Second"] {
            service
                .create_reference(
                    kind,
                    &ReferenceForm {
                        label: Some(format!("{} {}", label, kind.entity_name())),
                    },
                )
                .unwrap();
        }
    }
    service
        .create_employee(&EmployeeForm {
            employee_number: Some(1),
            full_name: Some("Ahmed Al-Harbi".to_string()),
            country_id: Some(1),
            iqama_number: Some("2345678901".to_string()),
            iqama_expiration_hijri: Some("1448-03-01".to_string()),
            iqama_expiration_gregorian: NaiveDate::from_ymd_opt(2026, 8, 14),
            passport_number: Some("P1234567".to_string()),
            passport_expiration: NaiveDate::from_ymd_opt(2030, 1, 1),
            company_start_date: NaiveDate::from_ymd_opt(2015, 1, 1),
            birthdate: NaiveDate::from_ymd_opt(1990, 6, 15),
            insurance_class_id: Some(1),
            education_level_id: Some(1),
            iban_number: Some("SA0380000000608010167519".to_string()),
            ..Default::default()
        })
        .unwrap();
    service
}

fn contract_form(job: i64, start: u64, length: u64) -> ContractForm {
    ContractForm {
        employee_number: Some(1),
        employee_job_id: Some(job),
        start_date: Some(offset(start)),
        end_date: Some(offset(start + length)),
        paper_contract_end_date: None,
        basic_salary: Some(Decimal::from(1500)),
        housing_allowance: Some(Decimal::from(375)),
        transportation_allowance: Some(Decimal::from(150)),
        food_allowance: Some(Decimal::from(300)),
        remarks: None,
        file_link: None,
    }
}

#[derive(Debug, Clone)]
enum ContractOp {
    Create { job: i64, start: u64, length: u64 },
    Update { pick: usize, job: i64, start: u64, length: u64 },
    Delete { pick: usize },
    Restore { pick: usize },
    ForceDelete { pick: usize },
}

fn arb_contract_op() -> impl Strategy<Value = ContractOp> {
    // Small date ranges so end dates collide and exercise the id tie-break
    let job = 1i64..=2;
    let start = 0u64..60;
    let length = 0u64..30;
    prop_oneof![
        3 => (job.clone(), start.clone(), length.clone())
            .prop_map(|(job, start, length)| ContractOp::Create { job, start, length }),
        1 => (any::<usize>(), job, start, length)
            .prop_map(|(pick, job, start, length)| ContractOp::Update { pick, job, start, length }),
        1 => any::<usize>().prop_map(|pick| ContractOp::Delete { pick }),
        1 => any::<usize>().prop_map(|pick| ContractOp::Restore { pick }),
        1 => any::<usize>().prop_map(|pick| ContractOp::ForceDelete { pick }),
    ]
}

fn live_contracts(service: &HrService) -> Vec<Contract> {
    service
        .list_contracts(&ContractFilter {
            employee_number: Some(1),
            ..Default::default()
        })
        .unwrap()
        .into_iter()
        .map(|row| row.contract)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cached_contract_fields_follow_latest_live_contract(
        ops in prop::collection::vec(arb_contract_op(), 1..16)
    ) {
        let mut service = service();
        let mut ids: Vec<i64> = Vec::new();

        for op in ops {
            // Rejected operations (restoring a live contract, touching a
            // removed one) must leave the cache consistent too
            match op {
                ContractOp::Create { job, start, length } => {
                    let saved = service.create_contract(&contract_form(job, start, length)).unwrap();
                    ids.push(saved.record.id);
                }
                ContractOp::Update { pick, job, start, length } if !ids.is_empty() => {
                    let id = ids[pick % ids.len()];
                    let _ = service.update_contract(id, &contract_form(job, start, length));
                }
                ContractOp::Delete { pick } if !ids.is_empty() => {
                    let _ = service.delete_contract(ids[pick % ids.len()]);
                }
                ContractOp::Restore { pick } if !ids.is_empty() => {
                    let _ = service.restore_contract(ids[pick % ids.len()]);
                }
                ContractOp::ForceDelete { pick } if !ids.is_empty() => {
                    let _ = service.force_delete_contract(ids[pick % ids.len()]);
                }
                _ => {}
            }

            let live = live_contracts(&service);
            let expected = current_contract_fields(select_latest_contract(&live));
            let employee = service.get_employee(1).unwrap();
            prop_assert_eq!(employee.employee_job_id, expected.employee_job_id);
            prop_assert_eq!(
                employee.electronic_contract_start_date,
                expected.electronic_contract_start_date
            );
            prop_assert_eq!(
                employee.electronic_contract_end_date,
                expected.electronic_contract_end_date
            );
            prop_assert_eq!(employee.paper_contract_end_date, expected.paper_contract_end_date);
        }
    }

    #[test]
    fn contract_creation_accrues_rounded_years(lengths in prop::collection::vec(0u64..2500, 1..5)) {
        let mut service = service();
        let mut expected = 0i64;

        for (i, length) in lengths.into_iter().enumerate() {
            let start = i as u64 * 3000;
            service.create_contract(&contract_form(1, start, length)).unwrap();
            // Inclusive day count over 365, halves rounded up
            let days = length as i64 + 1;
            expected += (2 * days + 365) / 730;
            prop_assert_eq!(service.get_employee(1).unwrap().leave_balance, expected);
        }
    }

    #[test]
    fn deleting_every_leave_restores_the_balance(
        leaves in prop::collection::vec((0u64..300, 0u64..40), 1..6)
    ) {
        let mut service = service();
        service.create_contract(&contract_form(1, 0, 3000)).unwrap();
        let opening = service.get_employee(1).unwrap().leave_balance;

        let mut taken = 0i64;
        let mut ids = Vec::new();
        for (start, length) in leaves {
            let saved = service
                .create_leave(&LeaveForm {
                    employee_number: Some(1),
                    start_date: Some(offset(start)),
                    end_date: Some(offset(start + length)),
                    visa_expiration: Some(offset(start + length + 30)),
                    remarks: None,
                })
                .unwrap();
            taken += inclusive_days(offset(start), offset(start + length));
            prop_assert_eq!(saved.record.remaining_leave_days, opening - taken);
            prop_assert_eq!(
                saved.audit_trace.warnings.is_empty(),
                opening - taken >= 0
            );
            ids.push(saved.record.id);
        }

        for id in ids {
            service.delete_leave(id).unwrap();
        }
        prop_assert_eq!(service.get_employee(1).unwrap().leave_balance, opening);
    }

    #[test]
    fn current_project_is_latest_transfer(
        transfers in prop::collection::vec((1i64..=2, 0u64..500), 1..8)
    ) {
        let mut service = service();
        let mut latest: Option<(NaiveDate, i64, i64)> = None;

        for (project, day) in transfers {
            let saved = service
                .create_assignment(&ProjectAssignmentForm {
                    employee_number: Some(1),
                    from_project_id: None,
                    project_id: Some(project),
                    transfer_date: Some(offset(day)),
                    remarks: None,
                })
                .unwrap();
            let candidate = (offset(day), saved.record.id, project);
            if latest.is_none_or(|l| (candidate.0, candidate.1) > (l.0, l.1)) {
                latest = Some(candidate);
            }
            prop_assert_eq!(
                service.get_employee(1).unwrap().project_id,
                latest.map(|l| l.2)
            );
        }
    }

    #[test]
    fn calendar_diff_is_symmetric_and_normalized(a in 0u64..20000, b in 0u64..20000) {
        let (x, y) = (offset(a), offset(b));
        let span = calendar_diff(x, y);
        prop_assert_eq!(span, calendar_diff(y, x));
        prop_assert!(span.months < 12);
        prop_assert!(span.days < 31);
        prop_assert_eq!(span.is_zero(), a == b);
    }

    #[test]
    fn formatted_duration_lists_nonzero_parts(years in 0u32..60, months in 0u32..12, days in 0u32..31) {
        let text = format_duration(CalendarSpan { years, months, days });
        let parts: Vec<&str> = if text.is_empty() { Vec::new() } else { text.split(", ").collect() };

        let expected: Vec<String> = [(years, "year"), (months, "month"), (days, "day")]
            .into_iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, unit)| if n == 1 { format!("1 {}", unit) } else { format!("{} {}s", n, unit) })
            .collect();

        prop_assert_eq!(parts, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
