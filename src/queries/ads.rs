use libsql::{Connection, Value, de};

use crate::types::{Ad, AdQuery};

/// Browse order when no filter is given: cheapest first, ties broken by
/// location, size, source and type in that order.
pub async fn get_ordered_ads(db: Connection, table: &str, limit: u32) -> anyhow::Result<Vec<Ad>> {
    let mut result = db
        .query(
            &format!(
                "SELECT * FROM {table}
                ORDER BY price, location, home_size, source_name, home_type
                LIMIT ?1
                "
            ),
            [limit],
        )
        .await?;

    let mut ads = Vec::new();
    while let Some(row) = result.next().await? {
        let ad: Ad = de::from_row(&row)?;
        ads.push(ad);
    }

    Ok(ads)
}

/// Applies every present filter as an AND predicate. Equality on the
/// enumerated columns, strict less-than on price, strict greater-than on
/// home size. Row order is whatever the database returns.
pub async fn get_filtered_ads(
    db: Connection,
    table: &str,
    query: &AdQuery,
    limit: u32,
) -> anyhow::Result<Vec<Ad>> {
    let mut clauses = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if let Some(source_name) = &query.source_name {
        args.push(Value::Text(source_name.clone()));
        clauses.push(format!("source_name = ?{}", args.len()));
    }
    if let Some(location) = &query.location {
        args.push(Value::Text(location.clone()));
        clauses.push(format!("location = ?{}", args.len()));
    }
    if let Some(home_type) = &query.home_type {
        args.push(Value::Text(home_type.clone()));
        clauses.push(format!("home_type = ?{}", args.len()));
    }
    if let Some(price) = query.price {
        args.push(Value::Integer(price));
        clauses.push(format!("price < ?{}", args.len()));
    }
    if let Some(home_size) = query.home_size {
        args.push(Value::Integer(home_size));
        clauses.push(format!("home_size > ?{}", args.len()));
    }

    args.push(Value::Integer(i64::from(limit)));
    let sql = if clauses.is_empty() {
        format!("SELECT * FROM {table} LIMIT ?{}", args.len())
    } else {
        format!(
            "SELECT * FROM {table} WHERE {} LIMIT ?{}",
            clauses.join(" AND "),
            args.len()
        )
    };

    let mut result = db.query(&sql, args).await?;

    let mut ads = Vec::new();
    while let Some(row) = result.next().await? {
        let ad: Ad = de::from_row(&row)?;
        ads.push(ad);
    }

    Ok(ads)
}
