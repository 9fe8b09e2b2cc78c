use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/courses", course_routes())
        .merge(learner_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
        .routes(routes!(handlers::auth::profile, handlers::auth::update_profile))
}

fn course_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::course::list_courses,
            handlers::course::create_course
        ))
        .routes(routes!(handlers::course::featured_courses))
        .routes(routes!(
            handlers::course::get_course,
            handlers::course::update_course,
            handlers::course::delete_course
        ))
        .routes(routes!(handlers::course::create_module))
        .routes(routes!(
            handlers::course::update_module,
            handlers::course::delete_module
        ))
        .routes(routes!(handlers::course::create_video))
        .routes(routes!(
            handlers::course::update_video,
            handlers::course::delete_video
        ))
        .routes(routes!(handlers::course::create_review))
        .routes(routes!(handlers::enrollment::enroll))
        .routes(routes!(handlers::enrollment::update_progress))
        .routes(routes!(handlers::payment::create_order))
        .routes(routes!(handlers::payment::payment_success))
}

fn learner_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::dashboard::dashboard))
        .routes(routes!(handlers::dashboard::my_courses))
}
