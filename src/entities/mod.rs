pub mod brands;
pub mod categories;
pub mod materials;
pub mod product_views;
pub mod products;
pub mod promotion_categories;
pub mod promotions;
pub mod size_stocks;
pub mod sizes;
pub mod users;

pub use brands as brand_entity;
pub use categories as category_entity;
pub use materials as material_entity;
pub use product_views as product_view_entity;
pub use products as product_entity;
pub use promotion_categories as promotion_category_entity;
pub use promotions as promotion_entity;
pub use size_stocks as size_stock_entity;
pub use sizes as size_entity;
pub use users as user_entity;

pub use categories::GenderTarget;
pub use promotions::PromotionTemplate;
pub use sizes::SizeSystem;
