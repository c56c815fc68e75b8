mod common;

use ndm_catalog::{
    entity::site_settings::ActiveModel as SettingActive,
    error::AppError,
    i18n::{LANGUAGE_ORDER_KEY, Locale},
    pagination::CatalogFilters,
    services::{
        catalog_service::{
            ProductFilter, count_products, get_brands_with_count, get_categories_with_count,
            get_featured_products, get_language_order, get_product_by_slug, get_products,
            get_related_products,
        },
        storefront_service,
    },
};
use sea_orm::{ActiveModelTrait, Set};

fn slugs(items: &[ndm_catalog::models::ProductWithRelations]) -> Vec<&str> {
    items.iter().map(|p| p.product.slug.as_str()).collect()
}

// One sequential flow: every step shares the same seeded database.
#[tokio::test]
async fn public_catalog_follows_listing_rules() -> anyhow::Result<()> {
    let Some(database_url) = common::database_url() else {
        return Ok(());
    };
    let (state, _uploads) = common::setup_state(&database_url).await?;
    let fixture = common::seed_catalog(&state).await?;
    let db = &state.orm;

    // Hidden products never count.
    assert_eq!(count_products(db, &ProductFilter::default()).await?, 4);
    assert_eq!(
        count_products(db, &ProductFilter::default().category("beton-va-temirbeton")).await?,
        2
    );
    assert_eq!(count_products(db, &ProductFilter::default().brand("metpro")).await?, 1);
    assert_eq!(
        count_products(
            db,
            &ProductFilter::default()
                .category("beton-va-temirbeton")
                .brand("metpro")
        )
        .await?,
        0
    );
    assert_eq!(
        count_products(db, &ProductFilter::default().category("no-such-category")).await?,
        0
    );

    // Newest first.
    let all = get_products(db, &ProductFilter::default(), 0, 12).await?;
    assert_eq!(
        slugs(&all),
        vec![
            "beton-aralashtirgich-kompleksi",
            "ogir-metall-fermalar",
            "polimer-asosli-shtukaturka",
            "prefabrik-beton-panellar",
        ]
    );
    assert!(all.iter().all(|p| p.images.len() == 1 && p.brand.is_some()));

    let second_page = get_products(db, &ProductFilter::default(), 2, 2).await?;
    assert_eq!(
        slugs(&second_page),
        vec!["polimer-asosli-shtukaturka", "prefabrik-beton-panellar"]
    );

    // Search is case-insensitive over both names and treats `%` literally.
    let found = get_products(db, &ProductFilter::default().search("BETON"), 0, 12).await?;
    assert_eq!(
        slugs(&found),
        vec!["beton-aralashtirgich-kompleksi", "prefabrik-beton-panellar"]
    );
    let plaster = ProductFilter::default().search("штукатурка");
    let found = get_products(db, &plaster, 0, 12).await?;
    assert_eq!(slugs(&found), vec!["polimer-asosli-shtukaturka"]);
    assert_eq!(count_products(db, &ProductFilter::default().search("%")).await?, 0);

    // Counting and fetching agree for every filter combination.
    for filter in [
        ProductFilter::default(),
        ProductFilter::default().search("metall"),
        ProductFilter::default().category("beton-va-temirbeton"),
        ProductFilter::default().brand("ndm-structural").search("panel"),
    ] {
        let total = count_products(db, &filter).await?;
        let items = get_products(db, &filter, 0, 100).await?;
        assert_eq!(total as usize, items.len(), "{filter:?}");
    }

    // Product lookup.
    assert!(get_product_by_slug(db, "does-not-exist").await?.is_none());
    assert!(get_product_by_slug(db, "yashirin-beton-blok").await?.is_none());
    let panel = get_product_by_slug(db, "prefabrik-beton-panellar")
        .await?
        .expect("active product");
    assert_eq!(panel.category.id, fixture.beton);
    assert_eq!(panel.brand.as_ref().map(|b| b.id), Some(fixture.ndm));

    // Related: same category, active, the product itself excluded.
    let related = get_related_products(db, fixture.beton, panel.product.id, 4).await?;
    assert_eq!(slugs(&related), vec!["beton-aralashtirgich-kompleksi"]);

    let featured = get_featured_products(db, Some(2)).await?;
    assert_eq!(
        slugs(&featured),
        vec!["beton-aralashtirgich-kompleksi", "ogir-metall-fermalar"]
    );
    assert_eq!(get_featured_products(db, None).await?.len(), 4);

    // Directory counts only see active products.
    let categories = get_categories_with_count(db).await?;
    let counts: Vec<(i32, u64)> = categories
        .iter()
        .map(|c| (c.item.id, c.active_product_count))
        .collect();
    assert_eq!(
        counts,
        vec![(fixture.beton, 2), (fixture.aralashma, 1), (fixture.metall, 1)]
    );
    let brands = get_brands_with_count(db).await?;
    let ndm = brands.iter().find(|b| b.item.id == fixture.ndm).expect("brand");
    assert_eq!(ndm.active_product_count, 2);
    let euro_mix = brands.iter().find(|b| b.item.id == fixture.euro_mix).expect("brand");
    assert_eq!(euro_mix.active_product_count, 1);
    assert!(brands.iter().any(|b| b.item.id == fixture.metpro));

    // Out of range pages clamp onto the last page.
    let page = storefront_service::catalog(&state, Locale::Ru, CatalogFilters::default(), Some("5"))
        .await?
        .data
        .expect("catalog page");
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.items.len(), 4);
    assert_eq!(page.items[0].name, "Бетонный смесительный комплекс");
    assert!(page.links.prev.is_none() && page.links.next.is_none());

    let detail = storefront_service::product_page(&state, Locale::Uz, "ogir-metall-fermalar")
        .await?
        .data
        .expect("product page");
    assert_eq!(detail.product.name, "Og‘ir metall fermalar");
    assert!(detail.related.is_empty());
    assert!(matches!(
        storefront_service::product_page(&state, Locale::Uz, "yashirin-beton-blok").await,
        Err(AppError::NotFound)
    ));

    // Language order: default without a setting, deduplicated otherwise.
    assert_eq!(get_language_order(db).await?, vec![Locale::Uz, Locale::Ru]);
    SettingActive {
        key: Set(LANGUAGE_ORDER_KEY.to_string()),
        value: Set("ru, xx,ru".into()),
        updated_at: Set(common::at(0).into()),
    }
    .insert(db)
    .await?;
    assert_eq!(get_language_order(db).await?, vec![Locale::Ru]);

    Ok(())
}
