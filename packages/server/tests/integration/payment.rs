use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use server::entity::{enrollment, payment};

use crate::common::{TestApp, routes};

mod order_creation {
    use super::*;

    #[tokio::test]
    async fn order_carries_price_in_minor_units_and_checkout_key() {
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let student = app.create_authenticated_user("alice", "securepass").await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        let res = app
            .post_with_token(&routes::payment(course_id), &json!({}), &student)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["amount"], 49900);
        assert_eq!(res.body["currency"], "INR");
        assert_eq!(res.body["key_id"], "rzp_test_mock");
        assert!(
            res.body["order_id"]
                .as_str()
                .unwrap()
                .starts_with("order_mock_")
        );
        assert_eq!(res.body["course_title"], "Premium");
    }

    #[tokio::test]
    async fn order_creation_requires_authentication() {
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        let res = app
            .post_without_token(&routes::payment(course_id), &json!({}))
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn order_creation_writes_no_records() {
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let student = app.create_authenticated_user("alice", "securepass").await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        app.post_with_token(&routes::payment(course_id), &json!({}), &student)
            .await;

        let payments = payment::Entity::find()
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(payments, 0);

        let enrollments = enrollment::Entity::find()
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(enrollments, 0);
    }
}

mod success_callback {
    use super::*;

    #[tokio::test]
    async fn missing_payment_id_redirects_to_catalog_and_writes_nothing() {
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let student = app.create_authenticated_user("alice", "securepass").await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        let res = app
            .get_with_token(&routes::payment_success(course_id, None), &student)
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/courses"));

        let payments = payment::Entity::find()
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(payments, 0);

        let enrollments = enrollment::Entity::find()
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(enrollments, 0);
    }

    #[tokio::test]
    async fn successful_callback_records_payment_and_enrolls() {
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let student = app.create_authenticated_user("alice", "securepass").await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        let res = app
            .get_with_token(
                &routes::payment_success(course_id, Some("pay_12345")),
                &student,
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/my-courses"));

        let payments = payment::Entity::find()
            .filter(payment::Column::CourseId.eq(course_id))
            .all(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].payment_id, "pay_12345");
        assert_eq!(payments[0].status, "Success");

        let my = app.get_with_token(routes::MY_COURSES, &student).await;
        assert_eq!(my.body["data"].as_array().unwrap().len(), 1);
        assert_eq!(my.body["data"][0]["course"]["id"], course_id);
    }

    #[tokio::test]
    async fn repeated_callbacks_append_payments_but_enroll_once() {
        // The payment table is an append-only audit log; enrollment stays
        // deduplicated by its composite key.
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let student = app.create_authenticated_user("alice", "securepass").await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        for pid in ["pay_1", "pay_2"] {
            let res = app
                .get_with_token(&routes::payment_success(course_id, Some(pid)), &student)
                .await;
            assert_eq!(res.status, 303);
        }

        let payments = payment::Entity::find()
            .filter(payment::Column::CourseId.eq(course_id))
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(payments, 2);

        let enrollments = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(enrollments, 1);
    }

    #[tokio::test]
    async fn callback_for_unknown_course_is_not_found() {
        let app = TestApp::spawn().await;
        let student = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .get_with_token(&routes::payment_success(31337, Some("pay_1")), &student)
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn empty_payment_id_counts_as_missing() {
        let app = TestApp::spawn().await;
        let teach = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let student = app.create_authenticated_user("alice", "securepass").await;
        let course_id = app.create_course(&teach, "Premium", true, 499.0).await;

        let res = app
            .get_with_token(&routes::payment_success(course_id, Some("")), &student)
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/courses"));
    }
}
