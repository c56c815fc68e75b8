use ndm_catalog::{
    config::AppConfig,
    db::create_pool,
    i18n::{LANGUAGE_ORDER_KEY, LOCALES, format_display_order},
    services::auth_service::hash_password,
};
use uuid::Uuid;

struct SeedCategory {
    slug: &'static str,
    name_uz: &'static str,
    name_ru: &'static str,
    description_uz: &'static str,
    description_ru: &'static str,
    image_url: &'static str,
}

struct SeedBrand {
    slug: &'static str,
    name_uz: &'static str,
    name_ru: &'static str,
    logo_url: &'static str,
}

struct SeedImage {
    url: &'static str,
    alt_uz: &'static str,
    alt_ru: &'static str,
}

struct SeedProduct {
    slug: &'static str,
    name_uz: &'static str,
    name_ru: &'static str,
    description_uz: &'static str,
    description_ru: &'static str,
    specs: &'static str,
    category_slug: &'static str,
    brand_slug: &'static str,
    images: &'static [SeedImage],
}

const CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        slug: "beton-va-temirbeton",
        name_uz: "Beton va Temir-beton",
        name_ru: "Бетон и железобетон",
        description_uz: "Yuqori mustahkamlikka ega, ilg‘or texnologiyalar asosida ishlab chiqarilgan temir-beton buyumlar.",
        description_ru: "Высокопрочные железобетонные изделия, созданные по современным технологиям.",
        image_url: "https://images.unsplash.com/photo-1600585154340-0ef3c08a84a3?auto=format&fit=crop&w=1200&q=80",
    },
    SeedCategory {
        slug: "qurilish-aralashmalari",
        name_uz: "Qurilish aralashmalari",
        name_ru: "Строительные смеси",
        description_uz: "Sifatli qoplama, betonlash va bezatish ishlari uchun professionallar tanlovi.",
        description_ru: "Профессиональный выбор для отделочных, бетонных и декоративных работ.",
        image_url: "https://images.unsplash.com/photo-1503387762-592deb58ef4e?auto=format&fit=crop&w=1200&q=80",
    },
    SeedCategory {
        slug: "metall-konstruktsiyalar",
        name_uz: "Metall konstruktsiyalar",
        name_ru: "Металлоконструкции",
        description_uz: "Har qanday masshtabdagi inshootlar uchun mustahkam va bardoshli metall yechimlar.",
        description_ru: "Надежные металлические решения для сооружений любого масштаба.",
        image_url: "https://images.unsplash.com/photo-1529429617124-aee4417cb4c7?auto=format&fit=crop&w=1200&q=80",
    },
];

const BRANDS: &[SeedBrand] = &[
    SeedBrand {
        slug: "ndm-structural",
        name_uz: "NDM Structural",
        name_ru: "NDM Structural",
        logo_url: "https://images.unsplash.com/photo-1489515217757-5fd1be406fef?auto=format&fit=crop&w=400&q=70",
    },
    SeedBrand {
        slug: "euro-mix",
        name_uz: "EuroMix",
        name_ru: "EuroMix",
        logo_url: "https://images.unsplash.com/photo-1437482078695-73f5ca6c96e8?auto=format&fit=crop&w=400&q=70",
    },
    SeedBrand {
        slug: "metpro",
        name_uz: "MetPro Alliance",
        name_ru: "MetPro Alliance",
        logo_url: "https://images.unsplash.com/photo-1565183928294-7063f23ce0f8?auto=format&fit=crop&w=400&q=70",
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        slug: "prefabrik-beton-panellar",
        name_uz: "Prefabrik beton panellar",
        name_ru: "Префабрикованные бетонные панели",
        description_uz: "Tezkor montaj va yuqori issiqlik izolyatsiyasiga ega sanoat darajadagi panellar.",
        description_ru: "Скоростной монтаж и высокая теплоизоляция для промышленных объектов.",
        specs: "<ul>\n  <li>Mustahkamlik darajasi: B60</li>\n  <li>Izolyatsiya koeffitsienti: 0.24 W/m²K</li>\n  <li>Panel o‘lchami: 3200 x 6000 mm</li>\n</ul>",
        category_slug: "beton-va-temirbeton",
        brand_slug: "ndm-structural",
        images: &[SeedImage {
            url: "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&w=1200&q=80",
            alt_uz: "Prefabrik beton panellar",
            alt_ru: "Панели из железобетона",
        }],
    },
    SeedProduct {
        slug: "polimer-asosli-shtukaturka",
        name_uz: "Polimer asosli shtukaturka",
        name_ru: "Полимерная штукатурка",
        description_uz: "Fasad va interyerlar uchun yuqori elastiklikka ega dekorativ qoplama.",
        description_ru: "Декоративное покрытие с высокой эластичностью для фасадов и интерьеров.",
        specs: "<ul>\n  <li>Qadoqlash: 25 kg qop</li>\n  <li>Yumshoq ishlov berish va tez qurish</li>\n  <li>Tavsiyaviy qatlam qalinligi: 2-5 mm</li>\n</ul>",
        category_slug: "qurilish-aralashmalari",
        brand_slug: "euro-mix",
        images: &[SeedImage {
            url: "https://images.unsplash.com/photo-1451976426598-a7593bd6d0b2?auto=format&fit=crop&w=1200&q=80",
            alt_uz: "Shtukaturka qoplamasi",
            alt_ru: "Нанесение штукатурки",
        }],
    },
    SeedProduct {
        slug: "ogir-metall-fermalar",
        name_uz: "Og‘ir metall fermalar",
        name_ru: "Стальные фермы",
        description_uz: "Uzoq xizmat muddati va yuqori yuk ko‘tarish qobiliyatiga ega sanoat fermalar.",
        description_ru: "Промышленные фермы с большим сроком службы и высокой несущей способностью.",
        specs: "<ul>\n  <li>Material: S355 konstruktsion po‘lat</li>\n  <li>Maksimal oralig‘i: 42 metr</li>\n  <li>Himoya qoplamasi: Issiq galvaniz</li>\n</ul>",
        category_slug: "metall-konstruktsiyalar",
        brand_slug: "metpro",
        images: &[SeedImage {
            url: "https://images.unsplash.com/photo-1489515217757-5fd1be406fef?auto=format&fit=crop&w=1200&q=80",
            alt_uz: "Metall fermalar",
            alt_ru: "Стальные фермы",
        }],
    },
    SeedProduct {
        slug: "beton-aralashtirgich-kompleksi",
        name_uz: "Beton aralashtirgich kompleksi",
        name_ru: "Бетонный смесительный комплекс",
        description_uz: "Avtomatlashtirilgan beton tayyorlash uchun yuqori unumdorlikdagi tizim.",
        description_ru: "Высокоэффективная система для автоматизированного приготовления бетона.",
        specs: "<ul>\n  <li>Ishlab chiqarish quvvati: 120 m³/soat</li>\n  <li>PLC boshqaruvi: Siemens S7</li>\n  <li>Energiya sarfi: 110 kW</li>\n</ul>",
        category_slug: "beton-va-temirbeton",
        brand_slug: "ndm-structural",
        images: &[SeedImage {
            url: "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?auto=format&fit=crop&w=1200&q=80",
            alt_uz: "Beton aralashtirgich",
            alt_ru: "Бетонный завод",
        }],
    },
];

const BANNERS: &[(&str, &str)] = &[
    (
        "https://images.unsplash.com/photo-1503387762-592deb58ef4e?auto=format&fit=crop&w=1600&q=80",
        "/catalog",
    ),
    (
        "https://images.unsplash.com/photo-1503389152951-9f343605f61e?auto=format&fit=crop&w=1600&q=80",
        "/contact",
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let username = std::env::var("INITIAL_ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let password = std::env::var("INITIAL_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    ensure_admin(&pool, &username, &password).await?;

    seed_categories(&pool).await?;
    seed_brands(&pool).await?;
    seed_banners(&pool).await?;
    seed_products(&pool).await?;
    seed_settings(&pool).await?;

    println!("Seed completed. Admin: {username}");
    Ok(())
}

/// Existing admins keep their password.
async fn ensure_admin(pool: &sqlx::PgPool, username: &str, password: &str) -> anyhow::Result<()> {
    let password_hash = hash_password(password)?;

    sqlx::query(
        r#"
        INSERT INTO admin_users (id, username, password_hash, role)
        VALUES ($1, $2, $3, 'admin')
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .execute(pool)
    .await?;

    println!("Ensured admin {username}");
    Ok(())
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for category in CATEGORIES {
        sqlx::query(
            r#"
            INSERT INTO categories (slug, name_uz, name_ru, description_uz, description_ru, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (slug) DO UPDATE SET
                name_uz = EXCLUDED.name_uz,
                name_ru = EXCLUDED.name_ru,
                description_uz = EXCLUDED.description_uz,
                description_ru = EXCLUDED.description_ru,
                image_url = EXCLUDED.image_url,
                updated_at = NOW()
            "#,
        )
        .bind(category.slug)
        .bind(category.name_uz)
        .bind(category.name_ru)
        .bind(category.description_uz)
        .bind(category.description_ru)
        .bind(category.image_url)
        .execute(pool)
        .await?;
    }

    println!("Seeded categories");
    Ok(())
}

async fn seed_brands(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for brand in BRANDS {
        sqlx::query(
            r#"
            INSERT INTO brands (slug, name_uz, name_ru, logo_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug) DO UPDATE SET
                name_uz = EXCLUDED.name_uz,
                name_ru = EXCLUDED.name_ru,
                logo_url = EXCLUDED.logo_url,
                updated_at = NOW()
            "#,
        )
        .bind(brand.slug)
        .bind(brand.name_uz)
        .bind(brand.name_ru)
        .bind(brand.logo_url)
        .execute(pool)
        .await?;
    }

    println!("Seeded brands");
    Ok(())
}

async fn seed_banners(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for (image_url, link_url) in BANNERS {
        sqlx::query(
            r#"
            INSERT INTO banners (image_url, link_url)
            VALUES ($1, $2)
            ON CONFLICT (image_url) DO UPDATE SET link_url = EXCLUDED.link_url
            "#,
        )
        .bind(*image_url)
        .bind(*link_url)
        .execute(pool)
        .await?;
    }

    println!("Seeded banners");
    Ok(())
}

/// Upserts each product and replaces its images, one transaction per product.
async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for product in PRODUCTS {
        let mut tx = pool.begin().await?;

        let (product_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO products
                (slug, name_uz, name_ru, description_uz, description_ru, specs, visibility, category_id, brand_id)
            VALUES (
                $1, $2, $3, $4, $5, $6, 'active',
                (SELECT id FROM categories WHERE slug = $7),
                (SELECT id FROM brands WHERE slug = $8)
            )
            ON CONFLICT (slug) DO UPDATE SET
                name_uz = EXCLUDED.name_uz,
                name_ru = EXCLUDED.name_ru,
                description_uz = EXCLUDED.description_uz,
                description_ru = EXCLUDED.description_ru,
                specs = EXCLUDED.specs,
                visibility = EXCLUDED.visibility,
                category_id = EXCLUDED.category_id,
                brand_id = EXCLUDED.brand_id,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(product.slug)
        .bind(product.name_uz)
        .bind(product.name_ru)
        .bind(product.description_uz)
        .bind(product.description_ru)
        .bind(product.specs)
        .bind(product.category_slug)
        .bind(product.brand_slug)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM product_images WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        for (order, image) in product.images.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO product_images (product_id, url, alt_uz, alt_ru, "order")
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(product_id)
            .bind(image.url)
            .bind(image.alt_uz)
            .bind(image.alt_ru)
            .bind(order as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_settings(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO site_settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
        "#,
    )
    .bind(LANGUAGE_ORDER_KEY)
    .bind(format_display_order(&LOCALES))
    .execute(pool)
    .await?;

    println!("Seeded settings");
    Ok(())
}
