//! End-to-end: apply the `users.role` migration, then verify it.

use gearshare_core::verification::{CheckDetail, GroupCount, VerifyTargets};
use gearshare_db::batch::{execute_batch, ExecutionMode};
use sqlx::PgPool;

const ROLE_MIGRATION: &str = include_str!("fixtures/add_user_role.sql");
const BROKEN_MIGRATION: &str = include_str!("fixtures/broken_role.sql");

async fn seed_users(pool: &PgPool) {
    for (email, name) in [
        ("owner@gearshare.test", "Olive Owner"),
        ("renter1@gearshare.test", "Rita Renter"),
        ("renter2@gearshare.test", "Ravi Renter"),
    ] {
        sqlx::query("INSERT INTO users (email, full_name) VALUES ($1, $2)")
            .bind(email)
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }
}

#[sqlx::test(migrations = "tests/fixtures/migrations")]
async fn role_migration_passes_every_check(pool: PgPool) {
    seed_users(&pool).await;

    execute_batch(&pool, ROLE_MIGRATION, ExecutionMode::Transactional)
        .await
        .expect("migration should apply");

    let report = gearshare_db::verify::verify(&pool, &VerifyTargets::role_migration())
        .await
        .unwrap();

    assert_eq!(report.checks.len(), 4);
    assert!(report.all_passed(), "unexpected failures:\n{report}");

    match &report.checks[0].detail {
        Some(CheckDetail::Column { data_type, default }) => {
            assert_eq!(data_type, "user_role");
            assert_eq!(default.as_deref(), Some("'user'::user_role"));
        }
        other => panic!("unexpected column detail: {other:?}"),
    }

    assert_eq!(
        report.checks[1].detail,
        Some(CheckDetail::EnumLabels {
            labels: vec!["admin".into(), "user".into()],
        })
    );

    match &report.checks[2].detail {
        Some(CheckDetail::Index { definition }) => {
            assert!(
                definition.contains("idx_users_role") && definition.contains("(role)"),
                "unexpected index definition: {definition}"
            );
        }
        other => panic!("unexpected index detail: {other:?}"),
    }

    // Enum columns order by declaration order, not label text.
    assert_eq!(
        report.checks[3].detail,
        Some(CheckDetail::RowCounts {
            groups: vec![
                GroupCount {
                    value: Some("user".into()),
                    count: 2,
                },
                GroupCount {
                    value: Some("admin".into()),
                    count: 1,
                },
            ],
        })
    );
}

#[sqlx::test(migrations = "tests/fixtures/migrations")]
async fn failed_transactional_batch_leaves_no_trace(pool: PgPool) {
    let err = execute_batch(&pool, BROKEN_MIGRATION, ExecutionMode::Transactional)
        .await
        .expect_err("broken migration must fail");
    assert!(err.to_string().contains("userz"), "unexpected error: {err}");

    let report = gearshare_db::verify::verify(&pool, &VerifyTargets::role_migration())
        .await
        .unwrap();

    assert_eq!(report.failed_count(), 4, "partial migration left behind:\n{report}");
}

#[sqlx::test(migrations = "tests/fixtures/migrations")]
async fn autocommit_batch_applies_script(pool: PgPool) {
    execute_batch(&pool, ROLE_MIGRATION, ExecutionMode::Autocommit)
        .await
        .expect("migration should apply");

    let report = gearshare_db::verify::verify(&pool, &VerifyTargets::role_migration())
        .await
        .unwrap();
    assert!(report.all_passed(), "unexpected failures:\n{report}");

    // No users were seeded, so there is nothing to group.
    assert_eq!(
        report.checks[3].detail,
        Some(CheckDetail::RowCounts { groups: vec![] })
    );
}

#[sqlx::test(migrations = "tests/fixtures/migrations")]
async fn applying_twice_fails_on_existing_type(pool: PgPool) {
    execute_batch(&pool, ROLE_MIGRATION, ExecutionMode::Transactional)
        .await
        .unwrap();

    let err = execute_batch(&pool, ROLE_MIGRATION, ExecutionMode::Transactional)
        .await
        .expect_err("second run must fail");
    assert!(err.to_string().contains("already exists"), "unexpected error: {err}");
}
