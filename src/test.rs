use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::ActivationScope;
use crate::db::{
    self, DbPool, agreement_store::AgreementStore, company_store::CompanyStore,
    letter_store::LetterStore, lorry_store::LorryStore, route_store::RouteStore,
};
use crate::models::agreement::Agreement;
use crate::models::company::Company;
use crate::models::letter::{FarEndAction, NewLetter};
use crate::models::lorry::LorryDetails;
use crate::models::route::Route;

// Helper function to set up a fresh in-memory database
async fn setup_test_pool(scope: ActivationScope) -> DbPool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Failed to parse database URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    db::setup_database(&pool, scope)
        .await
        .expect("Failed to create schema");

    pool
}

// Helper function to create a test company
async fn create_test_company(pool: &DbPool, name: &str) -> Company {
    CompanyStore::new(pool.clone())
        .insert(name, "1 Depot Road", "", "")
        .await
        .expect("Failed to create company")
}

// Helper function to create a test agreement
async fn create_test_agreement(pool: &DbPool, company_id: i64, loa_number: &str) -> Agreement {
    AgreementStore::new(pool.clone())
        .insert(company_id, loa_number, 12000.0, 4.25)
        .await
        .expect("Failed to create agreement")
}

// Helper function to create a test lorry
async fn create_test_lorry(pool: &DbPool) -> LorryDetails {
    LorryStore::new(pool.clone())
        .insert("20t", "40ft", Some(10), "")
        .await
        .expect("Failed to create lorry")
}

// Helper function to create a test route
async fn create_test_route(pool: &DbPool) -> Route {
    RouteStore::new(pool.clone())
        .insert("Depot - Yard", Some(120))
        .await
        .expect("Failed to create route")
}

fn sample_new_letter(lorry_id: i64, route_id: i64) -> NewLetter {
    NewLetter {
        lorry_id,
        route_id,
        is_for_home_depot: true,
        loading_at_home_depot: true,
        far_end_action: Some(FarEndAction::Unload),
        placement_date: None,
        remarks: None,
    }
}

mod booking_serial_tests {
    use super::*;
    use crate::models::letter::make_letter_number;

    #[test]
    fn letter_number_pads_serial_to_four_digits() {
        assert_eq!(make_letter_number("LOA-1234", 9, 7), "LOA-1234-0007");
        assert_eq!(make_letter_number("  LOA-1234  ", 9, 12345), "LOA-1234-12345");
    }

    #[test]
    fn letter_number_falls_back_to_agreement_id() {
        assert_eq!(make_letter_number("", 9, 1), "AG9-0001");
        assert_eq!(make_letter_number("   ", 42, 3), "AG42-0003");
    }

    #[tokio::test]
    async fn first_serial_is_one() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-77").await;

        let letters = LetterStore::new(pool);
        let serial = letters.next_booking_serial(agreement.id).await.unwrap();
        assert_eq!(serial, 1);
    }

    #[tokio::test]
    async fn serial_is_stable_without_insert() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-77").await;

        let letters = LetterStore::new(pool);
        let first = letters.next_booking_serial(agreement.id).await.unwrap();
        let second = letters.next_booking_serial(agreement.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn create_letter_assigns_incrementing_serials() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-77").await;
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;

        let letters = LetterStore::new(pool);

        let first = letters
            .create(&agreement, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap();
        assert_eq!(first.booking_serial, 1);
        assert_eq!(first.letter_number, "LOA-77-0001");
        assert_eq!(first.company_id, company.id);
        assert_eq!(first.agreement_id, Some(agreement.id));

        let second = letters
            .create(&agreement, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap();
        assert_eq!(second.booking_serial, 2);
        assert!(second.letter_number.ends_with("-0002"));
    }

    #[tokio::test]
    async fn serials_count_per_agreement() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let first_ag = create_test_agreement(&pool, company.id, "LOA-1").await;
        let second_ag = create_test_agreement(&pool, company.id, "LOA-2").await;
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;

        let letters = LetterStore::new(pool);
        letters
            .create(&first_ag, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap();

        let other = letters
            .create(&second_ag, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap();
        assert_eq!(other.booking_serial, 1);
        assert_eq!(other.letter_number, "LOA-2-0001");
    }

    #[tokio::test]
    async fn edit_never_changes_serial_or_number() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-77").await;
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;

        let letters = LetterStore::new(pool.clone());
        let letter = letters
            .create(&agreement, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap();

        let other_lorry = create_test_lorry(&pool).await;
        let updated = letters
            .update(
                letter.id,
                crate::models::letter::LetterUpdate {
                    lorry_id: Some(other_lorry.id),
                    remarks: Some(Some("rescheduled".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.lorry_id, other_lorry.id);
        assert_eq!(updated.booking_serial, letter.booking_serial);
        assert_eq!(updated.letter_number, letter.letter_number);
        assert_eq!(updated.remarks.as_deref(), Some("rescheduled"));
    }
}

mod pricing_tests {
    use super::*;
    use crate::db::material_store::MaterialStore;
    use crate::models::material::{ItemUpdate, PricingType, resolve_unit_amount};

    #[test]
    fn derives_amount_from_quantity_and_rate() {
        assert_eq!(resolve_unit_amount(Some(3.0), Some(150.0), None), Some(450.0));
    }

    #[test]
    fn explicit_amount_wins_over_derived() {
        assert_eq!(
            resolve_unit_amount(Some(3.0), Some(150.0), Some(500.0)),
            Some(500.0)
        );
    }

    #[test]
    fn no_amount_without_both_factors() {
        assert_eq!(resolve_unit_amount(Some(3.0), None, None), None);
        assert_eq!(resolve_unit_amount(None, Some(150.0), None), None);
        assert_eq!(resolve_unit_amount(None, None, None), None);
    }

    async fn setup_letter(pool: &DbPool) -> i64 {
        let company = create_test_company(pool, "Test Transport Co").await;
        let agreement = create_test_agreement(pool, company.id, "LOA-77").await;
        let lorry = create_test_lorry(pool).await;
        let route = create_test_route(pool).await;

        LetterStore::new(pool.clone())
            .create(&agreement, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn unit_item_insert_derives_missing_amount() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let letter_id = setup_letter(&pool).await;

        let store = MaterialStore::new(pool);
        let item = store
            .insert_unit_item(
                letter_id,
                Some(1),
                "Cement bags",
                Some(3.0),
                Some("bag".into()),
                Some(150.0),
                None,
            )
            .await
            .unwrap();

        assert_eq!(item.pricing_type, PricingType::Unit);
        assert_eq!(item.amount, Some(450.0));
    }

    #[tokio::test]
    async fn grouped_rows_carry_no_independent_amount() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let letter_id = setup_letter(&pool).await;

        let store = MaterialStore::new(pool);
        let group = store
            .insert_group(letter_id, 9000.0, Some(2.0), Some("lot".into()))
            .await
            .unwrap();

        let item = store
            .insert_grouped_item(letter_id, group.id, Some(1), "Steel rods", Some(40.0), None)
            .await
            .unwrap();

        assert_eq!(item.pricing_type, PricingType::GroupedDetail);
        assert_eq!(item.group_id, Some(group.id));
        assert_eq!(item.rate, None);
        assert_eq!(item.amount, None);
        assert_eq!(group.total_amount, 9000.0);
    }

    #[tokio::test]
    async fn switching_to_grouped_detail_clears_rate_and_amount() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let letter_id = setup_letter(&pool).await;

        let store = MaterialStore::new(pool);
        let item = store
            .insert_unit_item(letter_id, None, "Gravel", Some(2.0), None, Some(75.0), None)
            .await
            .unwrap();
        assert_eq!(item.amount, Some(150.0));

        let updated = store
            .update_item(
                item.id,
                ItemUpdate {
                    pricing_type: Some(PricingType::GroupedDetail),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.pricing_type, PricingType::GroupedDetail);
        assert_eq!(updated.rate, None);
        assert_eq!(updated.amount, None);
    }

    #[tokio::test]
    async fn unit_edit_rederives_amount_from_new_rate() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let letter_id = setup_letter(&pool).await;

        let store = MaterialStore::new(pool);
        let item = store
            .insert_unit_item(letter_id, None, "Gravel", Some(2.0), None, Some(75.0), None)
            .await
            .unwrap();

        let updated = store
            .update_item(
                item.id,
                ItemUpdate {
                    rate: Some(100.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.rate, Some(100.0));
        assert_eq!(updated.amount, Some(200.0));
    }
}

mod activation_tests {
    use super::*;

    #[tokio::test]
    async fn global_activation_deactivates_all_others() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let first_co = create_test_company(&pool, "First Co").await;
        let second_co = create_test_company(&pool, "Second Co").await;
        let first = create_test_agreement(&pool, first_co.id, "LOA-1").await;
        let second = create_test_agreement(&pool, second_co.id, "LOA-2").await;

        let store = AgreementStore::new(pool);
        store.set_active(first.id, ActivationScope::Global).await.unwrap();
        store.set_active(second.id, ActivationScope::Global).await.unwrap();

        let all = store.get_all().await.unwrap();
        let active: Vec<_> = all.iter().filter(|a| a.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);
    }

    #[tokio::test]
    async fn per_company_activation_keeps_other_companies_active() {
        let pool = setup_test_pool(ActivationScope::PerCompany).await;
        let first_co = create_test_company(&pool, "First Co").await;
        let second_co = create_test_company(&pool, "Second Co").await;
        let first = create_test_agreement(&pool, first_co.id, "LOA-1").await;
        let second = create_test_agreement(&pool, second_co.id, "LOA-2").await;
        let replacement = create_test_agreement(&pool, first_co.id, "LOA-3").await;

        let store = AgreementStore::new(pool);
        store.set_active(first.id, ActivationScope::PerCompany).await.unwrap();
        store.set_active(second.id, ActivationScope::PerCompany).await.unwrap();

        // Both companies keep their own active agreement
        assert!(store.get_by_id(first.id).await.unwrap().is_active);
        assert!(store.get_by_id(second.id).await.unwrap().is_active);

        // Activating a sibling replaces only within the company
        store
            .set_active(replacement.id, ActivationScope::PerCompany)
            .await
            .unwrap();
        assert!(!store.get_by_id(first.id).await.unwrap().is_active);
        assert!(store.get_by_id(replacement.id).await.unwrap().is_active);
        assert!(store.get_by_id(second.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn scope_switch_over_conflicting_actives_reports_clear_error() {
        let pool = setup_test_pool(ActivationScope::PerCompany).await;
        let first_co = create_test_company(&pool, "First Co").await;
        let second_co = create_test_company(&pool, "Second Co").await;
        let first = create_test_agreement(&pool, first_co.id, "LOA-1").await;
        let second = create_test_agreement(&pool, second_co.id, "LOA-2").await;

        let store = AgreementStore::new(pool.clone());
        store.set_active(first.id, ActivationScope::PerCompany).await.unwrap();
        store.set_active(second.id, ActivationScope::PerCompany).await.unwrap();

        // Two active rows are legal per company but violate global scope
        let err = db::setup_database(&pool, ActivationScope::Global)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("activation scope"), "{err:#}");
    }

    #[tokio::test]
    async fn find_active_returns_the_single_active_agreement() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-1").await;

        let store = AgreementStore::new(pool);
        assert!(store.find_active().await.unwrap().is_none());

        store.set_active(agreement.id, ActivationScope::Global).await.unwrap();
        let active = store.find_active().await.unwrap().unwrap();
        assert_eq!(active.id, agreement.id);
    }
}

mod form_parsing_tests {
    use chrono::NaiveDate;

    use crate::handlers::parse_form_date;

    #[test]
    fn accepts_plain_date() {
        assert_eq!(
            parse_form_date("2025-06-01"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn keeps_date_part_of_datetime_input() {
        assert_eq!(
            parse_form_date("2025-06-01T09:30"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(
            parse_form_date("2025-06-01T09:30:15"),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
    }

    #[test]
    fn unparsable_input_counts_as_absent() {
        assert_eq!(parse_form_date("junk"), None);
        assert_eq!(parse_form_date(""), None);
        assert_eq!(parse_form_date("2025-13-40"), None);
    }
}

mod company_tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::company::CompanyUpdate;

    #[tokio::test]
    async fn delete_with_dependent_agreement_is_rejected() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        create_test_agreement(&pool, company.id, "LOA-1").await;

        let store = CompanyStore::new(pool);
        let result = store.delete(company.id).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        // Row must remain intact
        assert!(store.find_by_id(company.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_unreferenced_company_succeeds() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;

        let store = CompanyStore::new(pool);
        store.delete(company.id).await.unwrap();
        assert!(store.find_by_id(company.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_fields_leave_stored_values_unchanged() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;

        let store = CompanyStore::new(pool);
        let updated = store
            .update(
                company.id,
                CompanyUpdate {
                    phone: Some("0123 456".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, company.name);
        assert_eq!(updated.address, company.address);
        assert_eq!(updated.phone, "0123 456");
    }
}

mod route_tests {
    use super::*;
    use crate::models::route::{StopType, StopUpdate};

    #[tokio::test]
    async fn stops_are_returned_in_stop_order() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let route = create_test_route(&pool).await;

        let store = RouteStore::new(pool);
        store
            .add_stop(route.id, "Midway Yard", StopType::Intermediate, 2, None)
            .await
            .unwrap();
        store
            .add_stop(route.id, "Home Depot", StopType::From, 1, None)
            .await
            .unwrap();
        store
            .add_stop(route.id, "Far End", StopType::To, 3, None)
            .await
            .unwrap();

        let stops = store.stops_for_route(route.id).await.unwrap();
        let locations: Vec<_> = stops.iter().map(|s| s.location.as_str()).collect();
        assert_eq!(locations, vec!["Home Depot", "Midway Yard", "Far End"]);
    }

    #[tokio::test]
    async fn stop_update_can_clear_authority() {
        let pool = setup_test_pool(ActivationScope::Global).await;
        let route = create_test_route(&pool).await;
        let authority = crate::db::authority_store::AuthorityStore::new(pool.clone())
            .insert("Far End", "Yard Office", "")
            .await
            .unwrap();

        let store = RouteStore::new(pool);
        let stop = store
            .add_stop(route.id, "Far End", StopType::To, 2, Some(authority.id))
            .await
            .unwrap();
        assert_eq!(stop.authority_id, Some(authority.id));

        let updated = store
            .update_stop(
                stop.id,
                StopUpdate {
                    authority_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.authority_id, None);
    }
}

mod handler_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::db::material_store::MaterialStore;
    use crate::handlers::{AppState, admin_router};

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn test_app(scope: ActivationScope) -> (axum::Router, DbPool) {
        let pool = setup_test_pool(scope).await;
        let state = AppState {
            pool: pool.clone(),
            activation_scope: scope,
        };
        (admin_router(state), pool)
    }

    #[tokio::test]
    async fn letter_add_without_active_agreement_returns_400() {
        let (app, pool) = test_app(ActivationScope::Global).await;
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;

        let response = app
            .oneshot(form_request(
                "/admin/letter/add",
                &format!("lorry_id={}&route_id={}", lorry.id, route.id),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn letter_add_with_active_agreement_creates_and_redirects() {
        let (app, pool) = test_app(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-5").await;
        AgreementStore::new(pool.clone())
            .set_active(agreement.id, ActivationScope::Global)
            .await
            .unwrap();
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;

        let response = app
            .oneshot(form_request(
                "/admin/letter/add",
                &format!(
                    "lorry_id={}&route_id={}&far_end_action=unload&placement_date=2025-06-01",
                    lorry.id, route.id
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let letters = LetterStore::new(pool).get_all().await.unwrap();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].booking_serial, 1);
        assert_eq!(letters[0].letter_number, "LOA-5-0001");
        assert_eq!(
            letters[0].placement_date,
            Some(chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
        );
    }

    #[tokio::test]
    async fn per_company_letter_add_uses_company_active_agreement() {
        let (app, pool) = test_app(ActivationScope::PerCompany).await;
        let billed_co = create_test_company(&pool, "Billed Co").await;
        let idle_co = create_test_company(&pool, "Idle Co").await;
        let agreement = create_test_agreement(&pool, billed_co.id, "LOA-9").await;
        create_test_agreement(&pool, idle_co.id, "LOA-10").await;
        AgreementStore::new(pool.clone())
            .set_active(agreement.id, ActivationScope::PerCompany)
            .await
            .unwrap();
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;

        // Omitting company_id cannot resolve an agreement
        let response = app
            .clone()
            .oneshot(form_request(
                "/admin/letter/add",
                &format!("lorry_id={}&route_id={}", lorry.id, route.id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // A company without an active agreement is rejected the same way
        let response = app
            .clone()
            .oneshot(form_request(
                "/admin/letter/add",
                &format!(
                    "lorry_id={}&route_id={}&company_id={}",
                    lorry.id, route.id, idle_co.id
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(form_request(
                "/admin/letter/add",
                &format!(
                    "lorry_id={}&route_id={}&company_id={}",
                    lorry.id, route.id, billed_co.id
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let letters = LetterStore::new(pool).get_all().await.unwrap();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].letter_number, "LOA-9-0001");
        assert_eq!(letters[0].company_id, billed_co.id);
        assert_eq!(letters[0].agreement_id, Some(agreement.id));
    }

    #[tokio::test]
    async fn letter_add_with_missing_lorry_redirects_without_effect() {
        let (app, pool) = test_app(ActivationScope::Global).await;
        let route = create_test_route(&pool).await;

        let response = app
            .oneshot(form_request(
                "/admin/letter/add",
                &format!("lorry_id=999&route_id={}", route.id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        assert!(LetterStore::new(pool).get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn company_delete_with_dependents_returns_409() {
        let (app, pool) = test_app(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        create_test_agreement(&pool, company.id, "LOA-1").await;

        let response = app
            .oneshot(form_request(
                &format!("/admin/company/delete/{}", company.id),
                "",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn material_item_add_derives_unit_amount() {
        let (app, pool) = test_app(ActivationScope::Global).await;
        let company = create_test_company(&pool, "Test Transport Co").await;
        let agreement = create_test_agreement(&pool, company.id, "LOA-5").await;
        let lorry = create_test_lorry(&pool).await;
        let route = create_test_route(&pool).await;
        let letter = LetterStore::new(pool.clone())
            .create(&agreement, sample_new_letter(lorry.id, route.id))
            .await
            .unwrap();

        let response = app
            .oneshot(form_request(
                "/admin/material-item/add",
                &format!(
                    "letter_id={}&description=Cement&quantity=3&rate=150",
                    letter.id
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let items = MaterialStore::new(pool)
            .items_for_letter(letter.id)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].amount, Some(450.0));
    }

    #[tokio::test]
    async fn material_group_add_requires_total_amount() {
        let (app, _pool) = test_app(ActivationScope::Global).await;

        let response = app
            .oneshot(form_request("/admin/material-group/add", "letter_id=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn api_authorities_returns_bare_array() {
        let (app, pool) = test_app(ActivationScope::Global).await;
        crate::db::authority_store::AuthorityStore::new(pool)
            .insert("Far End", "Yard Office", "12 Siding Lane")
            .await
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/api/authorities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["location"], "Far End");
    }
}
