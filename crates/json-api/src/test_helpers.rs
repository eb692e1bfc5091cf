//! Test helpers.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp, civil::date};
use jsonwebtoken::{EncodingKey, Header, encode};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use tamweely_app::{
    clock::FixedClock,
    context::AppContext,
    domain::{
        departments::{
            MockDepartmentsService,
            records::{DepartmentId, DepartmentRecord},
        },
        employees::{
            MockEmployeesService,
            records::{EmployeeId, EmployeeRecord},
        },
        jobs::{
            MockJobsService,
            records::{JobId, JobRecord},
        },
    },
};

use crate::{
    auth::{Claims, Principal, Role, TokenVerifier},
    extensions::*,
    state::State,
};

pub(crate) const TEST_SECRET: &[u8] = b"tamweely-test-secret-0123456789abcdef";
pub(crate) const TEST_ISSUER: &str = "tamweely-hr";
pub(crate) const TEST_AUDIENCE: &str = "tamweely-hr-clients";

/// Instant reported by the test clock, 2026-04-19T12:00:00Z.
pub(crate) const TEST_NOW: Timestamp = Timestamp::constant(1_776_600_000, 0);

pub(crate) fn test_verifier() -> TokenVerifier {
    TokenVerifier::new(TEST_SECRET, TEST_ISSUER, TEST_AUDIENCE)
}

/// A token for `test-user` holding `roles`, valid for an hour.
pub(crate) fn token_for(roles: &[&str]) -> TestResult<String> {
    let claims = Claims {
        sub: "test-user".to_string(),
        exp: (Timestamp::now() + SignedDuration::from_hours(1)).as_second(),
        iss: TEST_ISSUER.to_string(),
        aud: TEST_AUDIENCE.to_string(),
        roles: roles.iter().map(ToString::to_string).collect(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )?)
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[salvo::handler]
pub(crate) async fn as_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(principal(Role::Admin));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn as_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(principal(Role::User));
    ctrl.call_next(req, depot, res).await;
}

fn principal(role: Role) -> Principal {
    Principal {
        subject: "test-user".to_string(),
        roles: vec![role],
    }
}

pub(crate) fn state_with(
    departments: MockDepartmentsService,
    jobs: MockJobsService,
    employees: MockEmployeesService,
) -> Arc<State> {
    let app = AppContext {
        departments: Arc::new(departments),
        jobs: Arc::new(jobs),
        employees: Arc::new(employees),
        clock: Arc::new(FixedClock::new(TEST_NOW, date(2026, 4, 19))),
    };

    State::from_app_context(app, test_verifier())
}

/// State whose services expect no calls at all.
pub(crate) fn strict_state() -> Arc<State> {
    state_with(
        MockDepartmentsService::new(),
        MockJobsService::new(),
        MockEmployeesService::new(),
    )
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(as_admin)
            .push(route),
    )
}

pub(crate) fn departments_service(departments: MockDepartmentsService, route: Router) -> Service {
    service(
        state_with(departments, MockJobsService::new(), MockEmployeesService::new()),
        route,
    )
}

pub(crate) fn jobs_service(jobs: MockJobsService, route: Router) -> Service {
    service(
        state_with(MockDepartmentsService::new(), jobs, MockEmployeesService::new()),
        route,
    )
}

pub(crate) fn employees_service(employees: MockEmployeesService, route: Router) -> Service {
    service(
        state_with(MockDepartmentsService::new(), MockJobsService::new(), employees),
        route,
    )
}

/// Same services, but the caller only holds the `User` role.
pub(crate) fn user_service(route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(strict_state()))
            .hoop(as_user)
            .push(route),
    )
}

pub(crate) fn make_department(id: i64, name: &str) -> DepartmentRecord {
    DepartmentRecord {
        id: DepartmentId::from_i64(id),
        name: name.to_string(),
        description: None,
        is_active: true,
        created_at: TEST_NOW,
        updated_at: TEST_NOW,
    }
}

pub(crate) fn make_job(id: i64, title: &str) -> JobRecord {
    JobRecord {
        id: JobId::from_i64(id),
        title: title.to_string(),
        description: None,
        is_active: true,
        created_at: TEST_NOW,
        updated_at: TEST_NOW,
    }
}

pub(crate) fn make_employee(id: i64, email: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: EmployeeId::from_i64(id),
        first_name: "Youssef".to_string(),
        last_name: "Kamal".to_string(),
        email: email.to_string(),
        phone_number: "01098765432".to_string(),
        date_of_birth: date(1992, 3, 14),
        hire_date: date(2023, 6, 1),
        department_id: DepartmentId::from_i64(1),
        department_name: "IT".to_string(),
        job_id: JobId::from_i64(1),
        job_name: "Developer".to_string(),
        is_active: true,
        created_at: TEST_NOW,
        updated_at: TEST_NOW,
    }
}
