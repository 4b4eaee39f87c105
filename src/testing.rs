use libsql::{Builder, Connection, Database, params};
use tempfile::NamedTempFile;

use crate::{
    db::{self, ADS_T, NEW_ADS_T},
    types::Ad,
};

/// (source_name, url, price, home_type, home_size, location). Ids are
/// assigned 1..N in insertion order; prices are distinct on purpose so the
/// ordered queries have a single correct answer.
pub const SEED_ADS: [(&str, &str, i64, &str, i64, &str); 10] = [
    ("luximmo", "https://luximmo.bg/23", 246_483, "Двустаен", 84, "Люлин 3"),
    ("bezkomisiona", "https://bezkomisiona.bg/61", 170_294, "Мезонет", 185, "Слатина"),
    ("superimoti", "https://superimoti.bg/64", 210_395, "Двустаен", 195, "Горубляне"),
    ("addressbg", "https://addressbg.bg/66", 57_644, "Едностаен", 142, "Младост 4"),
    ("avista", "https://avista.bg/96", 216_479, "Двустаен", 125, "Младост 2"),
    ("superimoti", "https://superimoti.bg/66", 61_497, "Студио", 193, "Илинден"),
    ("bezkomisiona", "https://bezkomisiona.bg/30", 98_228, "Тристаен", 99, "Овча купел 2"),
    ("bezkomisiona", "https://bezkomisiona.bg/57", 289_343, "Студио", 68, "Люлин"),
    ("era", "https://era.bg/69", 131_733, "Мезонет", 163, "Света троица"),
    ("home2u", "https://home2u.bg/64", 173_626, "Тристаен", 61, "Хиподрума"),
];

pub const SEED_IMAGE: &str = "some_image";
pub const SEED_DATE: &str = "2024-11-02";

pub fn sample_ads() -> Vec<Ad> {
    SEED_ADS
        .iter()
        .enumerate()
        .map(
            |(index, (source_name, url, price, home_type, home_size, location))| Ad {
                id: index as i32 + 1,
                source_name: source_name.to_string(),
                url: url.to_string(),
                price: *price,
                home_type: home_type.to_string(),
                home_size: *home_size,
                location: location.to_string(),
                image: SEED_IMAGE.into(),
                scraping_date: SEED_DATE.into(),
            },
        )
        .collect()
}

/// Migrated scratch database with the seed rows in both tables. The
/// temp file must outlive the returned handle.
pub async fn seeded_db() -> (Database, NamedTempFile) {
    let file = NamedTempFile::new().unwrap();
    let db = Builder::new_local(file.path()).build().await.unwrap();
    let conn = db.connect().unwrap();
    db::migrate_db(conn.clone()).await.unwrap();

    seed_table(&conn, ADS_T).await;
    seed_table(&conn, NEW_ADS_T).await;

    (db, file)
}

async fn seed_table(conn: &Connection, table: &str) {
    for (source_name, url, price, home_type, home_size, location) in SEED_ADS {
        conn.execute(
            &format!(
                "INSERT INTO {table}
                    (source_name, url, price, home_type, home_size, location, image, scraping_date)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "
            ),
            params![
                source_name,
                url,
                price,
                home_type,
                home_size,
                location,
                SEED_IMAGE,
                SEED_DATE
            ],
        )
        .await
        .unwrap();
    }
}
