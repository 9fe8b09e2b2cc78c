use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{payment, review, revoked_token, role, role_permission};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["admin", "instructor", "student"];

/// Default role-permission mappings seeded on startup. Students carry no
/// content permissions; enrollment, reviews, and payments only require
/// authentication.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: full catalog control
    ("admin", "course:create"),
    ("admin", "course:edit"),
    ("admin", "course:delete"),
    // Instructor: maintains content, cannot delete courses
    ("instructor", "course:create"),
    ("instructor", "course:edit"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Seed roles
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(role::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => roles_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    // Seed role-permission mappings
    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => perms_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the payment audit trail:
    // SELECT ... FROM payment WHERE user_id = ? ORDER BY created_at
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_payment_user_created")
        .table(payment::Entity)
        .col(payment::Column::UserId)
        .col(payment::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    let result = db.execute_unprepared(&stmt).await;

    match result {
        Ok(_) => {
            info!("Ensured index idx_payment_user_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_payment_user_created: {}", e);
        }
    }

    // Composite index for course-detail review listings:
    // SELECT ... FROM review WHERE course_id = ? ORDER BY created_at
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_review_course_created")
        .table(review::Entity)
        .col(review::Column::CourseId)
        .col(review::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    let result = db.execute_unprepared(&stmt).await;
    match result {
        Ok(_) => {
            info!("Ensured index idx_review_course_created exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_review_course_created: {}", e);
        }
    }

    Ok(())
}

/// Drop revocation rows for tokens that have expired on their own; the auth
/// extractor rejects those regardless of the deny-list.
pub async fn purge_expired_tokens(db: &DatabaseConnection) -> Result<(), DbErr> {
    let result = revoked_token::Entity::delete_many()
        .filter(revoked_token::Column::ExpiresAt.lt(chrono::Utc::now()))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("Purged {} expired token revocations", result.rows_affected);
    }

    Ok(())
}
