use std::{env, fs, path::Path};

use libsql::{Builder, Connection, Database, OpenFlags};

use crate::types::StringError;

pub async fn get_database() -> Database {
    let use_local = env::var("USE_LOCAL").unwrap_or("true".into());
    if use_local == "false" {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let auth_key = env::var("DATABASE_AUTH_KEY").expect("DATABASE_AUTH_KEY must be set");
        Builder::new_remote(database_url, auth_key)
            .build()
            .await
            .unwrap()
    } else {
        let path = env::var("LOCAL_DB_URL").unwrap_or_else(|_| "./data/ads.db".into());
        if let Some(dir) = Path::new(&path).parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).expect("database directory must be creatable");
            }
        }
        Builder::new_local(path)
            .flags(OpenFlags::default())
            .build()
            .await
            .unwrap()
    }
}

pub const ADS_T: &str = "ads";
pub const NEW_ADS_T: &str = "new_ads";

pub const VERSION_T: &str = "db_version";

async fn v1(conn: Connection) -> anyhow::Result<()> {
    #[rustfmt::skip]
    let stmnts = [
        format!(
            "CREATE TABLE IF NOT EXISTS `{ADS_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `source_name` TEXT NOT NULL,
                `url` TEXT NOT NULL UNIQUE,
                `price` INTEGER NOT NULL,
                `home_type` TEXT NOT NULL,
                `home_size` INTEGER NOT NULL,
                `location` TEXT NOT NULL,
                `image` TEXT NOT NULL,
                `scraping_date` TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS `{NEW_ADS_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `source_name` TEXT NOT NULL,
                `url` TEXT NOT NULL UNIQUE,
                `price` INTEGER NOT NULL,
                `home_type` TEXT NOT NULL,
                `home_size` INTEGER NOT NULL,
                `location` TEXT NOT NULL,
                `image` TEXT NOT NULL,
                `scraping_date` TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS `{VERSION_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `version_number` INTEGER NOT NULL
            )"
        ),
    ];

    let mut _res = conn
        .execute_transactional_batch(&stmnts.join(";\n"))
        .await?;

    Ok(())
}

async fn get_version_number(conn: Connection) -> anyhow::Result<u32> {
    let mut res = conn
        .query(&format!("SELECT * FROM {VERSION_T} WHERE id = ?1"), [1])
        .await?;

    debug_assert_eq!(
        "version_number",
        res.column_name(1)
            .ok_or_else(|| StringError("Missing second column in version table".into()))?
    );

    let Some(row) = res.next().await? else {
        return Ok(1);
    };

    Ok(row.get(1)?)
}

async fn v2(conn: Connection) -> anyhow::Result<()> {
    #[rustfmt::skip]
    let stmnts = [
        format!("INSERT INTO {VERSION_T} (version_number) VALUES (2)"),
        format!("CREATE INDEX IF NOT EXISTS idx_ads_price ON {ADS_T} (price)"),
        format!("CREATE INDEX IF NOT EXISTS idx_ads_location ON {ADS_T} (location)"),
        format!("CREATE INDEX IF NOT EXISTS idx_ads_source_name ON {ADS_T} (source_name)"),
        format!("CREATE INDEX IF NOT EXISTS idx_new_ads_price ON {NEW_ADS_T} (price)"),
        format!("CREATE INDEX IF NOT EXISTS idx_new_ads_location ON {NEW_ADS_T} (location)"),
        format!("CREATE INDEX IF NOT EXISTS idx_new_ads_source_name ON {NEW_ADS_T} (source_name)"),
    ];

    let mut _res = conn
        .execute_transactional_batch(&stmnts.join(";\n"))
        .await?;

    Ok(())
}

pub async fn migrate_db(conn: Connection) -> anyhow::Result<()> {
    v1(conn.clone()).await?;

    let version_number = get_version_number(conn.clone()).await?;

    if version_number < 2 {
        v2(conn.clone()).await?;
    }

    Ok(())
}
