use crate::models::{auto, client};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

const DEMO_AUTOS: [(&str, f64, &str, &str); 2] = [
    ("Golden Ring of Russia", 50000.0, "10", "145"),
    ("Tour de France", 140000.0, "14", "556"),
];

const DEMO_CLIENTS: [(&str, &str, &str); 2] = [
    ("Ivanov Ivan Ivanovich", "88999999999", "0315367456"),
    ("Aleksandrova Aleksandra Aleksandrovna", "88888888888", "1232345654"),
];

/// Inserts the demo autos and clients. Rows whose unique code already exists are skipped,
/// so seeding twice is harmless. Returns the number of inserted rows.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let now = chrono::Utc::now().to_rfc3339();
    let mut inserted = 0;

    for (name, price, code, manufacturer) in DEMO_AUTOS {
        let model = auto::ActiveModel {
            name: Set(name.to_owned()),
            price: Set(price),
            code: Set(code.to_owned()),
            manufacturer: Set(manufacturer.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        inserted += auto::Entity::insert(model)
            .on_conflict(
                OnConflict::column(auto::Column::Code)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    for (name, phone, code) in DEMO_CLIENTS {
        // Phone and code are both unique; either match means the client is already there
        let existing = client::Entity::find()
            .filter(
                Condition::any()
                    .add(client::Column::Phone.eq(phone))
                    .add(client::Column::Code.eq(code)),
            )
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let model = client::ActiveModel {
            name: Set(name.to_owned()),
            phone: Set(phone.to_owned()),
            code: Set(code.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        model.insert(db).await?;
        inserted += 1;
    }

    Ok(inserted)
}
