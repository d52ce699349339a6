//! Starter catalog and store settings.
//!
//! Used by `alraqi-cli seed` on an empty database and as the fallback when
//! no settings document has been saved yet.

use crate::models::{Category, Product, StoreSettings};
use crate::types::{Price, ProductId};

/// Admin password seeded on first install. Change it right after seeding.
pub const DEFAULT_ADMIN_PASSWORD: &str = "5605";

/// Delivery location shown before the visitor picks one.
pub const DEFAULT_DELIVERY_LOCATION: &str = "الرياض، المملكة العربية السعودية";

/// Starter category list.
#[must_use]
pub fn initial_categories() -> Vec<Category> {
    [
        "دواجن ولحوم طازجة",
        "سلع تموينية",
        "صلصات وزيوت",
        "مجمدات سودانية",
        "بقوليات ومعلبات",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    category: &str,
    image: &str,
    stock: u32,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::new(price),
        original_price: None,
        category: category.to_owned(),
        image: image.to_owned(),
        stock,
        barcode: None,
        sizes: Vec::new(),
        reviews: Vec::new(),
    }
}

/// Starter products.
#[must_use]
pub fn initial_products() -> Vec<Product> {
    let mut chicken = product(
        "1",
        "كيلو فراخ طازج (نخب أول)",
        "دواجن طازجة من مزارعنا، ذبح اليوم، مغلفة بمعايير صحية عالية لضمان أفضل مذاق.",
        4500,
        "دواجن ولحوم طازجة",
        "https://images.unsplash.com/photo-1587593810167-a84920ea0781?auto=format&fit=crop&q=80&w=800",
        50,
    );
    chicken.original_price = Some(Price::new(5200));
    chicken.sizes = vec!["1 كجم".to_owned(), "2 كجم".to_owned()];

    vec![
        chicken,
        product(
            "2",
            "طبق بيض طازج (30 حبة)",
            "بيض مزارع طازج، حجم كبير، غني بالفيتامينات، يصلكم مغلفاً بعناية.",
            3800,
            "دواجن ولحوم طازجة",
            "https://images.unsplash.com/photo-1506976785307-8732e854ad03?auto=format&fit=crop&q=80&w=800",
            100,
        ),
        product(
            "3",
            "زيت طعام كريستال (1 لتر)",
            "زيت نباتي نقي، مثالي للقلي والطبخ، جودة مضمونة لمائدتكم.",
            2400,
            "سلع تموينية",
            "https://images.unsplash.com/photo-1471193945509-9ad0617afabf?auto=format&fit=crop&q=80&w=800",
            100,
        ),
        product(
            "4",
            "سكر كنانة نقي (1 كيلو)",
            "أجود أنواع السكر السوداني، نقي وسريع الذوبان.",
            1800,
            "سلع تموينية",
            "https://images.unsplash.com/photo-1581448670546-37016335168e?auto=format&fit=crop&q=80&w=800",
            200,
        ),
    ]
}

/// Starter store settings.
#[must_use]
pub fn initial_settings() -> StoreSettings {
    StoreSettings {
        name: "الراقي للمواد الغذائية".to_owned(),
        description: "الراقي هو وجهتكم الأولى في السودان للحصول على أجود أنواع الدواجن والسلع التموينية الفاخرة. نعتني بجودة مائدتكم لتصلكم طازجة وبأفضل الأسعار.".to_owned(),
        phone: "00249912345678".to_owned(),
        email: "info@alraqi-sd.com".to_owned(),
        admin_notification_email: None,
        address: "السودان، الخرطوم - حي الرياض، شارع المشتل".to_owned(),
        instagram: "#".to_owned(),
        twitter: "#".to_owned(),
        whatsapp: "https://wa.me/249912345678".to_owned(),
        bank_name: Some("بنك الخرطوم (BOK)".to_owned()),
        bank_account_name: Some("متجر الراقي للمواد الغذائية".to_owned()),
        bank_iban: Some("SD00 0000 0000 0000 0000 0000".to_owned()),
    }
}
