use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["username"], "alice");
    }

    #[tokio::test]
    async fn cannot_register_with_an_already_taken_username() {
        let app = TestApp::spawn().await;
        let body = json!({"username": "alice", "password": "securepass"});

        let first = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(first.status, 201, "First registration failed: {}", first.text);

        let res = app.post_without_token(routes::REGISTER, &body).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn duplicate_registration_does_not_create_a_second_account() {
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
        use server::entity::user;

        let app = TestApp::spawn().await;
        let body = json!({"username": "alice", "password": "securepass"});

        app.post_without_token(routes::REGISTER, &body).await;
        app.post_without_token(routes::REGISTER, &body).await;

        let count = user::Entity::find()
            .filter(user::Column::Username.eq("alice"))
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn cannot_register_with_a_password_that_is_too_short() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "alice", "password": "short"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn cannot_register_with_an_invalid_username() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "no spaces!", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_login_and_receives_token() {
        let app = TestApp::spawn().await;
        let body = json!({"username": "alice", "password": "securepass"});

        let reg = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);
        let res = app.post_without_token(routes::LOGIN, &body).await;

        assert_eq!(res.status, 200);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["username"], "alice");
        assert_eq!(res.body["role"], "student");
    }

    #[tokio::test]
    async fn cannot_login_with_wrong_password() {
        let app = TestApp::spawn().await;

        let reg = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "alice", "password": "wrongpass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn cannot_login_with_nonexistent_username() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "nobody", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logged_out_token_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.status, 200);

        let out = app
            .post_with_token(routes::LOGOUT, &json!({}), &token)
            .await;
        assert_eq!(out.status, 204);

        let res = app.get_with_token(routes::ME, &token).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn logout_is_idempotent_within_one_session() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let first = app
            .post_with_token(routes::LOGOUT, &json!({}), &token)
            .await;
        assert_eq!(first.status, 204);

        // The token is now revoked, so the second attempt fails auth rather
        // than double-inserting.
        let second = app
            .post_with_token(routes::LOGOUT, &json!({}), &token)
            .await;
        assert_eq!(second.status, 401);
    }

    #[tokio::test]
    async fn a_fresh_login_issues_a_usable_token_after_logout() {
        let app = TestApp::spawn().await;
        let body = json!({"username": "alice", "password": "securepass"});
        let token = app.create_authenticated_user("alice", "securepass").await;

        app.post_with_token(routes::LOGOUT, &json!({}), &token)
            .await;

        let res = app.post_without_token(routes::LOGIN, &body).await;
        assert_eq!(res.status, 200);
        let new_token = res.body["token"].as_str().unwrap();

        let me = app.get_with_token(routes::ME, new_token).await;
        assert_eq!(me.status, 200);
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn fresh_profile_has_empty_optional_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app.get_with_token(routes::PROFILE, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "alice");
        assert!(res.body["first_name"].is_null());
        assert!(res.body["last_name"].is_null());
        assert!(res.body["email"].is_null());
    }

    #[tokio::test]
    async fn profile_patch_updates_only_provided_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .patch_with_token(
                routes::PROFILE,
                &json!({"first_name": "Alice", "email": "alice@example.com"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["first_name"], "Alice");
        assert_eq!(res.body["email"], "alice@example.com");
        assert!(res.body["last_name"].is_null());

        // A later patch of a different field leaves earlier values alone.
        let res = app
            .patch_with_token(routes::PROFILE, &json!({"last_name": "Liddell"}), &token)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["first_name"], "Alice");
        assert_eq!(res.body["last_name"], "Liddell");
    }

    #[tokio::test]
    async fn explicit_null_clears_a_profile_field() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        app.patch_with_token(routes::PROFILE, &json!({"first_name": "Alice"}), &token)
            .await;

        let res = app
            .patch_with_token(routes::PROFILE, &json!({"first_name": null}), &token)
            .await;
        assert_eq!(res.status, 200);
        assert!(res.body["first_name"].is_null());
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .patch_with_token(routes::PROFILE, &json!({"email": "not-an-email"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod authenticated_access {
    use super::*;

    #[tokio::test]
    async fn request_without_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn request_with_malformed_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not-a-valid-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
