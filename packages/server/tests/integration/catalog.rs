use serde_json::json;

use crate::common::{TestApp, routes};

mod course_crud {
    use super::*;

    #[tokio::test]
    async fn instructor_can_create_a_course() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        let res = app
            .post_with_token(
                routes::COURSES,
                &json!({
                    "title": "Rust for Web",
                    "description": "Build services.",
                    "is_paid": true,
                    "price": 499.0,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Rust for Web");
        assert_eq!(res.body["is_paid"], true);
        assert_eq!(res.body["price"], 499.0);
    }

    #[tokio::test]
    async fn student_cannot_create_a_course() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::COURSES,
                &json!({"title": "Nope", "description": "Nope."}),
                &token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        let res = app
            .post_with_token(
                routes::COURSES,
                &json!({"title": "Bad", "description": "Bad.", "price": -1.0}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn instructor_can_patch_a_course() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let course_id = app.create_course(&token, "Original", false, 0.0).await;

        let res = app
            .patch_with_token(
                &routes::course(course_id),
                &json!({"title": "Renamed", "is_paid": true, "price": 99.0}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Renamed");
        assert_eq!(res.body["price"], 99.0);
    }

    #[tokio::test]
    async fn instructor_cannot_delete_a_course() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let course_id = app.create_course(&token, "Sticky", false, 0.0).await;

        let res = app.delete_with_token(&routes::course(course_id), &token).await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn admin_delete_cascades_to_all_course_data() {
        use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
        use server::entity::{course_module, enrollment, review, user_course_progress, video};

        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("boss", "securepass", "admin").await;
        let student = app.create_authenticated_user("alice", "securepass").await;

        let course_id = app.create_course(&admin, "Doomed", false, 0.0).await;
        let module_id = app.create_module(course_id, &admin, "Intro").await;
        app.create_video(
            course_id,
            module_id,
            &admin,
            "https://www.youtube.com/watch?v=abc",
        )
        .await;
        app.enroll(course_id, &student).await;
        let rev = app
            .post_with_token(
                &routes::reviews(course_id),
                &json!({"rating": 4, "comment": "fine"}),
                &student,
            )
            .await;
        assert_eq!(rev.status, 201, "{}", rev.text);

        let res = app.delete_with_token(&routes::course(course_id), &admin).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let detail = app.get_without_token(&routes::course(course_id)).await;
        assert_eq!(detail.status, 404);

        macro_rules! assert_empty {
            ($entity:ident, $column:expr) => {
                let count = $entity::Entity::find()
                    .filter($column.eq(course_id))
                    .count(&app.db)
                    .await
                    .expect("DB query failed");
                assert_eq!(count, 0, concat!(stringify!($entity), " rows remain"));
            };
        }
        assert_empty!(course_module, course_module::Column::CourseId);
        assert_empty!(review, review::Column::CourseId);
        assert_empty!(enrollment, enrollment::Column::CourseId);
        assert_empty!(user_course_progress, user_course_progress::Column::CourseId);

        let orphan_videos = video::Entity::find()
            .count(&app.db)
            .await
            .expect("DB query failed");
        assert_eq!(orphan_videos, 0);
    }
}

mod listings {
    use super::*;

    #[tokio::test]
    async fn featured_returns_at_most_four_oldest_courses() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        for i in 1..=6 {
            app.create_course(&token, &format!("Course {i}"), false, 0.0)
                .await;
        }

        let res = app.get_without_token(routes::FEATURED).await;

        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data[0]["title"], "Course 1");
        assert_eq!(data[3]["title"], "Course 4");
    }

    #[tokio::test]
    async fn listing_is_public_and_paginated() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        for i in 1..=3 {
            app.create_course(&token, &format!("Course {i}"), false, 0.0)
                .await;
        }

        let res = app
            .get_without_token(&format!("{}?page=1&per_page=2", routes::COURSES))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["pagination"]["total"], 3);
        assert_eq!(res.body["pagination"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn listing_supports_title_search() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        app.create_course(&token, "Rust Basics", false, 0.0).await;
        app.create_course(&token, "Advanced Cooking", false, 0.0).await;

        let res = app
            .get_without_token(&format!("{}?search=rust", routes::COURSES))
            .await;

        assert_eq!(res.status, 200);
        let data = res.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "Rust Basics");
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&format!("{}?sort_by=price_per_kilo", routes::COURSES))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod course_detail {
    use super::*;

    #[tokio::test]
    async fn detail_resolves_video_embed_and_thumbnail_urls() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        let course_id = app.create_course(&token, "Media", false, 0.0).await;
        let module_id = app.create_module(course_id, &token, "Watchables").await;
        app.create_video(
            course_id,
            module_id,
            &token,
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=43s",
        )
        .await;
        app.create_video(course_id, module_id, &token, "https://youtu.be/abc123")
            .await;
        app.create_video(course_id, module_id, &token, "https://vimeo.com/999")
            .await;

        let res = app.get_without_token(&routes::course(course_id)).await;
        assert_eq!(res.status, 200);

        let videos = res.body["modules"][0]["videos"].as_array().unwrap();
        assert_eq!(videos.len(), 3);

        assert_eq!(
            videos[0]["embed_url"],
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            videos[0]["thumbnail_url"],
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );

        assert_eq!(videos[1]["embed_url"], "https://www.youtube.com/embed/abc123");

        // Unrecognized URL passes through unchanged with an empty thumbnail.
        assert_eq!(videos[2]["embed_url"], "https://vimeo.com/999");
        assert_eq!(videos[2]["thumbnail_url"], "");
    }

    #[tokio::test]
    async fn detail_groups_videos_under_their_modules() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        let course_id = app.create_course(&token, "Structured", false, 0.0).await;
        let m1 = app.create_module(course_id, &token, "One").await;
        let m2 = app.create_module(course_id, &token, "Two").await;
        app.create_video(course_id, m1, &token, "https://youtu.be/v1").await;
        app.create_video(course_id, m2, &token, "https://youtu.be/v2").await;
        app.create_video(course_id, m2, &token, "https://youtu.be/v3").await;

        let res = app.get_without_token(&routes::course(course_id)).await;
        assert_eq!(res.status, 200);

        let modules = res.body["modules"].as_array().unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0]["title"], "One");
        assert_eq!(modules[0]["videos"].as_array().unwrap().len(), 1);
        assert_eq!(modules[1]["videos"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_course_returns_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::course(4242)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn empty_youtube_url_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let course_id = app.create_course(&token, "Media", false, 0.0).await;
        let module_id = app.create_module(course_id, &token, "Watchables").await;

        let res = app
            .post_with_token(
                &routes::videos(course_id, module_id),
                &json!({"title": "Lesson", "youtube_url": "   "}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn videos_can_be_updated_and_deleted() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;
        let course_id = app.create_course(&token, "Media", false, 0.0).await;
        let module_id = app.create_module(course_id, &token, "Watchables").await;
        let video_id = app
            .create_video(course_id, module_id, &token, "https://youtu.be/old")
            .await;

        let res = app
            .patch_with_token(
                &routes::video(course_id, module_id, video_id),
                &json!({"youtube_url": "https://www.youtube.com/watch?v=new", "allow_embed": false}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["embed_url"], "https://www.youtube.com/embed/new");
        assert_eq!(res.body["allow_embed"], false);

        let res = app
            .delete_with_token(&routes::video(course_id, module_id, video_id), &token)
            .await;
        assert_eq!(res.status, 204);

        let detail = app.get_without_token(&routes::course(course_id)).await;
        assert_eq!(
            detail.body["modules"][0]["videos"].as_array().unwrap().len(),
            0
        );
    }

    #[tokio::test]
    async fn module_paths_are_scoped_to_their_course() {
        let app = TestApp::spawn().await;
        let token = app
            .create_user_with_role("teach", "securepass", "instructor")
            .await;

        let course_a = app.create_course(&token, "A", false, 0.0).await;
        let course_b = app.create_course(&token, "B", false, 0.0).await;
        let module_in_a = app.create_module(course_a, &token, "Only in A").await;

        // Addressing A's module through B's path must not resolve.
        let res = app
            .patch_with_token(
                &routes::module(course_b, module_in_a),
                &json!({"title": "Hijacked"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}
