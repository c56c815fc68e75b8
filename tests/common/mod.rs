#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use ndm_catalog::{
    db::{create_pool, run_migrations},
    entity::{
        brands::ActiveModel as BrandActive, categories::ActiveModel as CategoryActive,
        product_images::ActiveModel as ImageActive, products::ActiveModel as ProductActive,
    },
    middleware::auth::AuthUser,
    models::Visibility,
    state::AppState,
    uploads::LocalStorage,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use tempfile::TempDir;
use uuid::Uuid;

/// Integration tests need a database; they are skipped without one.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
            );
            None
        }
    }
}

/// Fresh schema contents plus an upload directory that lives as long as the
/// returned guard.
pub async fn setup_state(database_url: &str) -> anyhow::Result<(AppState, TempDir)> {
    let pool = create_pool(database_url).await?;
    let uploads = tempfile::tempdir()?;
    let storage = LocalStorage::new(uploads.path(), "/uploads");
    let state = AppState::new(pool, Arc::new(storage), "test-secret");

    run_migrations(&state.orm).await?;

    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE product_images, products, categories, brands, banners, site_settings, audit_logs, admin_users RESTART IDENTITY CASCADE",
        ))
        .await?;

    Ok((state, uploads))
}

pub fn admin() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        username: "admin".into(),
        role: "admin".into(),
    }
}

pub fn editor() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        username: "editor".into(),
        role: "editor".into(),
    }
}

pub fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

pub struct Fixture {
    pub beton: i32,
    pub aralashma: i32,
    pub metall: i32,
    pub ndm: i32,
    pub euro_mix: i32,
    pub metpro: i32,
}

pub async fn insert_category(
    state: &AppState,
    slug: &str,
    uz: &str,
    ru: &str,
    hours: i64,
) -> anyhow::Result<i32> {
    let model = CategoryActive {
        id: NotSet,
        slug: Set(slug.into()),
        name_uz: Set(uz.into()),
        name_ru: Set(ru.into()),
        description_uz: Set(None),
        description_ru: Set(None),
        image_url: Set(None),
        created_at: Set(at(hours).into()),
        updated_at: Set(at(hours).into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(model.id)
}

pub async fn insert_brand(
    state: &AppState,
    slug: &str,
    name: &str,
    hours: i64,
) -> anyhow::Result<i32> {
    let model = BrandActive {
        id: NotSet,
        slug: Set(slug.into()),
        name_uz: Set(name.into()),
        name_ru: Set(name.into()),
        logo_url: Set(None),
        created_at: Set(at(hours).into()),
        updated_at: Set(at(hours).into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(model.id)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_product(
    state: &AppState,
    slug: &str,
    name_uz: &str,
    name_ru: &str,
    visibility: Visibility,
    category_id: i32,
    brand_id: Option<i32>,
    hours: i64,
) -> anyhow::Result<i32> {
    let model = ProductActive {
        id: NotSet,
        slug: Set(slug.into()),
        name_uz: Set(name_uz.into()),
        name_ru: Set(name_ru.into()),
        description_uz: Set(None),
        description_ru: Set(None),
        specs: Set(Some("<ul><li>B60</li></ul>".into())),
        visibility: Set(visibility),
        category_id: Set(category_id),
        brand_id: Set(brand_id),
        created_at: Set(at(hours).into()),
        updated_at: Set(at(hours).into()),
    }
    .insert(&state.orm)
    .await?;

    ImageActive {
        id: NotSet,
        product_id: Set(model.id),
        url: Set(format!("https://cdn.example.com/{slug}.jpg")),
        alt_uz: Set(Some(name_uz.into())),
        alt_ru: Set(Some(name_ru.into())),
        order: Set(0),
    }
    .insert(&state.orm)
    .await?;

    Ok(model.id)
}

/// Three categories, three brands, four active products created one hour
/// apart and one hidden product that is newer than all of them.
pub async fn seed_catalog(state: &AppState) -> anyhow::Result<Fixture> {
    let beton = insert_category(
        state,
        "beton-va-temirbeton",
        "Beton va Temir-beton",
        "Бетон и железобетон",
        0,
    )
    .await?;
    let aralashma = insert_category(
        state,
        "qurilish-aralashmalari",
        "Qurilish aralashmalari",
        "Строительные смеси",
        0,
    )
    .await?;
    let metall = insert_category(
        state,
        "metall-konstruktsiyalar",
        "Metall konstruktsiyalar",
        "Металлоконструкции",
        0,
    )
    .await?;

    let ndm = insert_brand(state, "ndm-structural", "NDM Structural", 0).await?;
    let euro_mix = insert_brand(state, "euro-mix", "EuroMix", 0).await?;
    let metpro = insert_brand(state, "metpro", "MetPro Alliance", 0).await?;

    insert_product(
        state,
        "prefabrik-beton-panellar",
        "Prefabrik beton panellar",
        "Префабрикованные бетонные панели",
        Visibility::Active,
        beton,
        Some(ndm),
        1,
    )
    .await?;
    insert_product(
        state,
        "polimer-asosli-shtukaturka",
        "Polimer asosli shtukaturka",
        "Полимерная штукатурка",
        Visibility::Active,
        aralashma,
        Some(euro_mix),
        2,
    )
    .await?;
    insert_product(
        state,
        "ogir-metall-fermalar",
        "Og‘ir metall fermalar",
        "Стальные фермы",
        Visibility::Active,
        metall,
        Some(metpro),
        3,
    )
    .await?;
    insert_product(
        state,
        "beton-aralashtirgich-kompleksi",
        "Beton aralashtirgich kompleksi",
        "Бетонный смесительный комплекс",
        Visibility::Active,
        beton,
        Some(ndm),
        4,
    )
    .await?;
    insert_product(
        state,
        "yashirin-beton-blok",
        "Yashirin beton blok",
        "Скрытый бетонный блок",
        Visibility::Hidden,
        beton,
        Some(ndm),
        5,
    )
    .await?;

    Ok(Fixture {
        beton,
        aralashma,
        metall,
        ndm,
        euro_mix,
        metpro,
    })
}
