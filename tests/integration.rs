//! Integration tests for the statutory payroll engine.
//!
//! This test suite drives the HTTP API end to end:
//! - Rate table read and update
//! - Salary breakdowns, including the ESI cliff and MLWF months
//! - Payslips
//! - Compliance reports for every scheme
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use statutory_payroll::api::{AppState, create_router};
use statutory_payroll::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config/rates.yaml").expect("Failed to load rates");
    AppState::from_loader(loader)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal encoded as string")).unwrap()
}

async fn send(
    router: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body.map_or_else(Body::empty, Body::from))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body.to_string())).await
}

fn create_employee(employee_id: &str, department_id: &str, salary: u32) -> Value {
    json!({
        "id": employee_id.to_lowercase(),
        "firstName": "Test",
        "lastName": employee_id,
        "employeeId": employee_id,
        "departmentId": department_id,
        "salary": salary,
        "isActive": true
    })
}

fn create_roster_request(roster: Vec<Value>, extra: Value) -> Value {
    let mut body = json!({
        "roster": roster,
        "units": [
            { "id": "u1", "name": "Pune Plant" },
            { "id": "u2", "name": "Nashik Depot" }
        ],
        "departments": [
            { "id": "d1", "name": "Assembly", "unitId": "u1" },
            { "id": "d2", "name": "Quality", "unitId": "u1" },
            { "id": "d3", "name": "Logistics", "unitId": "u2" },
            { "id": "d4", "name": "Stores", "unitId": "u2" }
        ]
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            body.insert(key.clone(), value.clone());
        }
    }
    body
}

// =============================================================================
// Rate table
// =============================================================================

#[tokio::test]
async fn test_get_rates_reflects_loaded_file() {
    let (status, json) = send(create_router_for_test(), "GET", "/rates", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&json["epf_wage_ceiling"]), Decimal::from(15000));
    assert_eq!(json["professional_tax"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_put_rates_replaces_table_for_later_requests() {
    let state = create_test_state();
    let update = json!({ "esiWageCeiling": 35000, "professionalTax": 200 });

    let (status, _) = send(
        create_router(state.clone()),
        "PUT",
        "/rates",
        Some(update.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({ "monthly_ctc": 30000, "month": "2025-01" });
    let (status, json) = post(create_router(state), "/breakdown", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["breakdown"]["esi_applicable"], true);
    assert_eq!(decimal(&json["display"]["esic"]), Decimal::from(225));
}

#[tokio::test]
async fn test_put_rates_rejects_uncovered_slab_table() {
    let update = json!({
        "professional_tax": [
            { "gross_below": 7500, "tax": 0 },
            { "gross_below": 10000, "tax": 175 }
        ]
    });

    let (status, json) = send(
        create_router_for_test(),
        "PUT",
        "/rates",
        Some(update.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
}

// =============================================================================
// Breakdown
// =============================================================================

#[tokio::test]
async fn test_breakdown_30000_end_to_end() {
    let body = json!({ "monthlyCTC": 30000, "month": "2025-01" });
    let (status, json) = post(create_router_for_test(), "/breakdown", body).await;

    assert_eq!(status, StatusCode::OK);
    let display = &json["display"];
    assert_eq!(decimal(&display["basic"]), Decimal::from(15000));
    assert_eq!(decimal(&display["hra"]), Decimal::from(7500));
    assert_eq!(decimal(&display["da"]), Decimal::from(1500));
    assert_eq!(decimal(&display["conveyance"]), Decimal::from(1600));
    assert_eq!(decimal(&display["medical"]), Decimal::from(1250));
    assert_eq!(decimal(&display["special_allowance"]), Decimal::from(3150));
    assert_eq!(decimal(&display["epf_employee"]), Decimal::from(1800));
    assert_eq!(decimal(&display["esic"]), Decimal::ZERO);
    assert_eq!(decimal(&display["professional_tax"]), Decimal::from(200));
    assert_eq!(decimal(&display["net"]), Decimal::from(28000));
}

#[tokio::test]
async fn test_breakdown_esi_cliff() {
    let at_ceiling = json!({ "monthly_ctc": 21000, "month": "2025-01" });
    let above_ceiling = json!({ "monthly_ctc": 21001, "month": "2025-01" });

    let (_, at) = post(create_router_for_test(), "/breakdown", at_ceiling).await;
    let (_, above) = post(create_router_for_test(), "/breakdown", above_ceiling).await;

    assert_eq!(decimal(&at["breakdown"]["esic"]), Decimal::from_str("157.5").unwrap());
    assert_eq!(decimal(&at["display"]["esic"]), Decimal::from(158));
    assert_eq!(decimal(&above["breakdown"]["esic"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_breakdown_mlwf_in_december_only() {
    let december = json!({ "monthly_ctc": 30000, "month": "2025-12" });
    let november = json!({ "monthly_ctc": 30000, "month": "2025-11" });

    let (_, dec) = post(create_router_for_test(), "/breakdown", december).await;
    let (_, nov) = post(create_router_for_test(), "/breakdown", november).await;

    assert_eq!(decimal(&dec["display"]["mlwf_employee"]), Decimal::from(25));
    assert_eq!(decimal(&dec["display"]["mlwf_employer"]), Decimal::from(75));
    assert_eq!(decimal(&nov["display"]["mlwf_employee"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_breakdown_uses_request_rates_override() {
    let body = json!({
        "monthly_ctc": 30000,
        "month": "2025-01",
        "rates": { "basicSalaryPercentage": 40 }
    });
    let (status, json) = post(create_router_for_test(), "/breakdown", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&json["display"]["basic"]), Decimal::from(12000));
    assert_eq!(decimal(&json["display"]["epf_employee"]), Decimal::from(1440));
}

#[tokio::test]
async fn test_breakdown_slab_pt_from_config() {
    let body = json!({ "monthly_ctc": 8000, "month": "2025-01" });
    let (_, json) = post(create_router_for_test(), "/breakdown", body).await;

    assert_eq!(decimal(&json["display"]["professional_tax"]), Decimal::from(175));
}

// =============================================================================
// Payslip
// =============================================================================

#[tokio::test]
async fn test_payslip_for_employee() {
    let mut employee = create_employee("EMP001", "d1", 30000);
    employee["uanNumber"] = json!("100200300400");
    let body = create_roster_request(vec![], json!({ "employee": employee, "month": "2025-06" }));

    let (status, json) = post(create_router_for_test(), "/payslip", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Salary Slip");
    assert_eq!(json["month"], "June 2025");
    assert_eq!(decimal(&json["net_pay"]), Decimal::from(27975));
    assert_eq!(
        json["net_pay_in_words"],
        "Rupees Twenty Seven Thousand Nine Hundred and Seventy Five Only"
    );

    let details = json["employee_details"].as_array().unwrap();
    let value_of = |label: &str| {
        details
            .iter()
            .find(|d| d["label"] == label)
            .map(|d| d["value"].as_str().unwrap().to_string())
    };
    assert_eq!(value_of("Department").as_deref(), Some("Assembly"));
    assert_eq!(value_of("Unit").as_deref(), Some("Pune Plant"));
    assert_eq!(value_of("UAN").as_deref(), Some("100200300400"));
    assert_eq!(value_of("PAN").as_deref(), Some("N/A"));
}

#[tokio::test]
async fn test_payslip_rejects_negative_salary() {
    let mut body = json!({
        "employee": create_employee("EMP001", "d1", 0),
        "month": "2025-06"
    });
    body["employee"]["salary"] = json!(-1);

    let (status, json) = post(create_router_for_test(), "/payslip", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Compliance reports
// =============================================================================

#[tokio::test]
async fn test_pf_report_grouped_by_unit_and_department() {
    let roster = vec![
        create_employee("E1", "d1", 30000),
        create_employee("E2", "d2", 30000),
        create_employee("E3", "d3", 60000),
        create_employee("E4", "d4", 60000),
    ];
    let body = create_roster_request(roster, json!({ "month": "2025-01" }));

    let (status, json) = post(create_router_for_test(), "/compliance/pf", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["scheme"], "pf");
    assert_eq!(json["period"], "January 2025");
    let groups = json["groups"].as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["Pune Plant"].as_object().unwrap().len(), 2);
    assert_eq!(groups["Nashik Depot"].as_object().unwrap().len(), 2);
    assert_eq!(json["totals"]["employees"], 4);
    assert_eq!(decimal(&json["totals"]["total"]), Decimal::from(13752));
}

#[tokio::test]
async fn test_esi_report_excludes_high_earners() {
    let roster = vec![
        create_employee("E1", "d1", 18000),
        create_employee("E2", "d1", 45000),
    ];
    let body = create_roster_request(roster, json!({ "month": "2025-01" }));

    let (status, json) = post(create_router_for_test(), "/compliance/esic", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totals"]["employees"], 1);
    let rows = json["groups"]["Pune Plant"]["Assembly"].as_array().unwrap();
    assert_eq!(rows[0]["employee_id"], "E1");
    assert_eq!(decimal(&rows[0]["employee_contribution"]), Decimal::from(135));
    assert_eq!(decimal(&rows[0]["employer_contribution"]), Decimal::from(585));
}

#[tokio::test]
async fn test_pt_report_carries_jurisdiction() {
    let roster = vec![create_employee("E1", "d1", 30000)];
    let body = create_roster_request(roster, json!({ "month": "2025-01" }));

    let (status, json) = post(create_router_for_test(), "/compliance/pt", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["jurisdiction"], "Maharashtra");
    assert_eq!(decimal(&json["totals"]["employee_contribution"]), Decimal::from(200));
}

#[tokio::test]
async fn test_mlwf_report_only_for_mlwf_periods() {
    let roster = vec![create_employee("E1", "d1", 30000)];

    let june = create_roster_request(
        roster.clone(),
        json!({ "period": { "type": "month", "month": "2025-06" } }),
    );
    let (status, json) = post(create_router_for_test(), "/compliance/mlwf", june).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&json["totals"]["total"]), Decimal::from(100));

    let march = create_roster_request(roster, json!({ "month": "2025-03" }));
    let (status, json) = post(create_router_for_test(), "/compliance/mlwf", march).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totals"]["employees"], 0);
    assert!(json["groups"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_bonus_report() {
    let roster = vec![create_employee("E1", "d1", 20000)];
    let body = create_roster_request(roster, json!({}));

    let (status, json) = post(create_router_for_test(), "/compliance/bonus", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"], "Annual");
    assert_eq!(decimal(&json["totals"]["employer_contribution"]), Decimal::from(833));
}

#[tokio::test]
async fn test_report_lists_skipped_employees() {
    let mut invalid = create_employee("E2", "d1", 0);
    invalid["salary"] = json!(-500);
    let mut inactive = create_employee("E3", "d1", 30000);
    inactive["isActive"] = json!(false);
    let roster = vec![create_employee("E1", "d1", 30000), invalid, inactive];
    let body = create_roster_request(roster, json!({ "month": "2025-01" }));

    let (status, json) = post(create_router_for_test(), "/compliance/pt", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totals"]["employees"], 1);
    let skipped = json["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["employee_id"], "E2");
}

#[tokio::test]
async fn test_empty_roster_gives_empty_report() {
    let body = json!({ "roster": [], "month": "2025-01" });

    let (status, json) = post(create_router_for_test(), "/compliance/esi", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totals"]["employees"], 0);
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, json) = send(
        create_router_for_test(),
        "POST",
        "/breakdown",
        Some("{ not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let body = json!({ "month": "2025-01" });
    let (status, json) = post(create_router_for_test(), "/breakdown", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("monthly_ctc"));
}

#[tokio::test]
async fn test_invalid_month_returns_validation_error() {
    let body = json!({ "monthly_ctc": 30000, "month": "2025-13" });
    let (status, json) = post(create_router_for_test(), "/breakdown", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_scheme_returns_404() {
    let body = json!({ "roster": [], "month": "2025-01" });
    let (status, json) = post(create_router_for_test(), "/compliance/gratuity", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "UNKNOWN_SCHEME");
}
