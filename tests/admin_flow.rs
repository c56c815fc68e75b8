mod common;

use ndm_catalog::{
    dto::{
        banners::BannerForm,
        brands::BrandForm,
        categories::CategoryForm,
        products::ProductForm,
        settings::UpdateLanguageOrderRequest,
    },
    entity::{
        banners::Entity as Banners,
        categories::{Column as CategoryCol, Entity as Categories},
        product_images::{Column as ImageCol, Entity as ProductImages},
        products::Entity as Products,
    },
    error::AppError,
    i18n::Locale,
    services::{
        banner_service, brand_service, category_service, catalog_service::get_language_order,
        dashboard_service, product_service, settings_service,
    },
    uploads::Upload,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tokio::task::JoinSet;

fn category_form(uz: &str, ru: &str) -> CategoryForm {
    CategoryForm {
        name_uz: uz.into(),
        name_ru: ru.into(),
        ..Default::default()
    }
}

// One sequential flow: every step shares the same seeded database.
#[tokio::test]
async fn admin_writes_respect_guards() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let (state, uploads) = common::setup_state(&database_url).await?;
    let fixture = common::seed_catalog(&state).await?;
    let admin = common::admin();
    let db = &state.orm;

    // Only admins may write.
    assert!(matches!(
        dashboard_service::get_stats(&state, &common::editor()).await,
        Err(AppError::Forbidden)
    ));
    let stats = dashboard_service::get_stats(&state, &admin).await?.data.expect("stats");
    assert_eq!((stats.products, stats.categories, stats.brands, stats.banners), (5, 3, 3, 0));
    assert_eq!(stats.recent_products[0].product.slug, "yashirin-beton-blok");

    // Referenced categories and brands are kept, the store untouched.
    assert!(matches!(
        category_service::delete_category(&state, &admin, fixture.beton).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        brand_service::delete_brand(&state, &admin, fixture.metpro).await,
        Err(AppError::Conflict(_))
    ));
    assert_eq!(Categories::find().count(db).await?, 3);
    assert_eq!(Products::find().count(db).await?, 5);

    // Slugs come from the Uzbek name and collisions get a numeric suffix.
    let section = || category_form("Yangi bo‘lim", "Новый раздел");
    let first = category_service::create_category(&state, &admin, section())
        .await?
        .data
        .expect("category");
    assert_eq!(first.slug, "yangi-bolim");
    let second = category_service::create_category(&state, &admin, section())
        .await?
        .data
        .expect("category");
    assert_eq!(second.slug, "yangi-bolim-2");
    let renamed = category_service::update_category(&state, &admin, first.id, section())
        .await?
        .data
        .expect("category");
    assert_eq!(renamed.slug, "yangi-bolim");

    assert!(matches!(
        category_service::create_category(&state, &admin, category_form("", "Пусто")).await,
        Err(AppError::BadRequest(_))
    ));

    // Clearing an image or logo only applies when no new file is sent.
    let pictured = category_service::create_category(
        &state,
        &admin,
        CategoryForm {
            image: Some(Upload::new("cat.png", vec![1_u8])),
            ..category_form("Rasmli", "С картинкой")
        },
    )
    .await?
    .data
    .expect("category");
    assert!(pictured.image_url.is_some());
    let replaced = category_service::update_category(
        &state,
        &admin,
        pictured.id,
        CategoryForm {
            image: Some(Upload::new("new.webp", vec![2_u8])),
            remove_image: true,
            ..category_form("Rasmli", "С картинкой")
        },
    )
    .await?
    .data
    .expect("category");
    assert!(replaced.image_url.as_deref().is_some_and(|url| url.ends_with(".webp")));
    let cleared = category_service::update_category(
        &state,
        &admin,
        pictured.id,
        CategoryForm {
            remove_image: true,
            ..category_form("Rasmli", "С картинкой")
        },
    )
    .await?
    .data
    .expect("category");
    assert!(cleared.image_url.is_none());
    category_service::delete_category(&state, &admin, pictured.id).await?;

    let logo_form = |remove_logo| BrandForm {
        name_uz: "NDM Structural".into(),
        name_ru: "NDM Structural".into(),
        slug: Some("ndm-structural".into()),
        logo: None,
        remove_logo,
    };
    let kept_logo = brand_service::update_brand(
        &state,
        &admin,
        fixture.ndm,
        BrandForm {
            logo: Some(Upload::new("ndm.svg", vec![3_u8])),
            ..logo_form(false)
        },
    )
    .await?
    .data
    .expect("brand");
    assert!(kept_logo.logo_url.is_some());
    let untouched = brand_service::update_brand(&state, &admin, fixture.ndm, logo_form(false))
        .await?
        .data
        .expect("brand");
    assert_eq!(untouched.logo_url, kept_logo.logo_url);
    let cleared = brand_service::update_brand(&state, &admin, fixture.ndm, logo_form(true))
        .await?
        .data
        .expect("brand");
    assert!(cleared.logo_url.is_none());
    assert_eq!(cleared.slug, "ndm-structural");

    // Concurrent creates with one name all succeed with distinct slugs.
    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let state = state.clone();
        let admin = admin.clone();
        let form = category_form("Parallel", "Параллель");
        tasks.spawn(async move { category_service::create_category(&state, &admin, form).await });
    }
    let mut slugs = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        slugs.push(joined??.data.expect("category").slug);
    }
    slugs.sort();
    let mut expected = vec!["parallel".to_string()];
    expected.extend((2..=8).map(|n| format!("parallel-{n}")));
    expected.sort();
    assert_eq!(slugs, expected);
    for slug in &slugs {
        let id = Categories::find()
            .filter(CategoryCol::Slug.eq(slug.as_str()))
            .one(db)
            .await?
            .map(|c| c.id)
            .expect("created");
        category_service::delete_category(&state, &admin, id).await?;
    }

    // A category without products can go.
    category_service::delete_category(&state, &admin, second.id).await?;
    assert!(matches!(
        category_service::delete_category(&state, &admin, second.id).await,
        Err(AppError::NotFound)
    ));

    // Banners need an image; a rejected banner writes nothing.
    assert!(matches!(
        banner_service::create_banner(&state, &admin, BannerForm::default()).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(Banners::find().count(db).await?, 0);
    let banner = banner_service::create_banner(
        &state,
        &admin,
        BannerForm {
            link_url: Some("/catalog".into()),
            image: Some(Upload::new("hero.png", vec![137_u8, 80, 78, 71])),
        },
    )
    .await?
    .data
    .expect("banner");
    assert!(banner.image_url.starts_with("/uploads/banners/"));
    assert!(banner.image_url.ends_with(".png"));
    let file_name = banner.image_url.rsplit('/').next().unwrap_or_default();
    assert!(uploads.path().join("banners").join(file_name).exists());

    // Unknown references are rejected before anything is stored.
    let bad = ProductForm {
        name_uz: "Armatura".into(),
        name_ru: "Арматура".into(),
        category_id: Some(9999),
        images: vec![Upload::new("a.jpg", vec![1_u8])],
        ..Default::default()
    };
    assert!(matches!(
        product_service::create_product(&state, &admin, bad).await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(Products::find().count(db).await?, 5);
    assert!(!uploads.path().join("products").exists());

    // Images keep a dense order through removal and appends.
    let created = product_service::create_product(
        &state,
        &admin,
        ProductForm {
            name_uz: "Armatura".into(),
            name_ru: "Арматура".into(),
            category_id: Some(fixture.metall),
            brand_id: Some(fixture.metpro),
            images: vec![
                Upload::new("a.jpg", vec![1_u8]),
                Upload::new("b.jpg", vec![2_u8]),
                Upload::new("c.jpg", vec![3_u8]),
            ],
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(created.product.slug, "armatura");
    let orders: Vec<i32> = created.images.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);

    let removed = created.images[0].id;
    let kept: Vec<String> = created.images[1..].iter().map(|i| i.url.clone()).collect();
    let updated = product_service::update_product(
        &state,
        &admin,
        created.product.id,
        ProductForm {
            name_uz: "Armatura".into(),
            name_ru: "Арматура".into(),
            category_id: Some(fixture.metall),
            remove_image: vec![removed],
            images: vec![Upload::new("d.webp", vec![4_u8])],
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("product");
    let orders: Vec<i32> = updated.images.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(updated.images[0].url, kept[0]);
    assert_eq!(updated.images[1].url, kept[1]);
    assert!(updated.images[2].url.ends_with(".webp"));
    assert!(updated.brand.is_none());

    product_service::delete_product(&state, &admin, created.product.id).await?;
    assert_eq!(
        ProductImages::find()
            .filter(ImageCol::ProductId.eq(created.product.id))
            .count(db)
            .await?,
        0
    );

    // Language order is normalized on write.
    settings_service::update_language_order(
        &state,
        &admin,
        UpdateLanguageOrderRequest {
            language_order: " ru , uz,ru".into(),
        },
    )
    .await?;
    assert_eq!(get_language_order(db).await?, vec![Locale::Ru, Locale::Uz]);
    assert!(matches!(
        settings_service::update_language_order(
            &state,
            &admin,
            UpdateLanguageOrderRequest {
                language_order: "en,de".into(),
            },
        )
        .await,
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(get_language_order(db).await?, vec![Locale::Ru, Locale::Uz]);

    Ok(())
}
