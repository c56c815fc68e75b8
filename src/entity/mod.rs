pub mod admin_users;
pub mod banners;
pub mod brands;
pub mod categories;
pub mod product_images;
pub mod products;
pub mod site_settings;

pub use admin_users::Entity as AdminUsers;
pub use banners::Entity as Banners;
pub use brands::Entity as Brands;
pub use categories::Entity as Categories;
pub use product_images::Entity as ProductImages;
pub use products::Entity as Products;
pub use site_settings::Entity as SiteSettings;
