use actix_web::{HttpResponse, Responder, get, web};
use askama::Template;
use log::error;

use crate::{
    db::{ADS_T, NEW_ADS_T},
    queries::ads::{get_filtered_ads, get_ordered_ads},
    types::{Ad, AdQuery, AppData, Failure, SourceCount},
    utils::{ads_to_csv, build_summary},
};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage;

#[derive(Template)]
#[template(path = "data.html")]
struct DataPage<'a> {
    sources: &'a [String],
    locations: &'a [String],
    home_types: &'a [String],
}

#[derive(Template)]
#[template(path = "ads.html")]
struct AdsPage<'a> {
    ad_list: &'a [Ad],
    show_summary: bool,
    summary: Vec<SourceCount>,
}

fn render_page<T: Template>(page: T, ctx: &str) -> HttpResponse {
    match page.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            error!("[{ctx}] Rendering template failed with err: {err}");
            HttpResponse::InternalServerError().json(Failure {
                message: format!("Couldn't render page. Err: {err}"),
            })
        }
    }
}

/// Runs the translated query against `table` over a connection scoped to
/// this request; dropping it on any exit path gives the session back.
async fn read_ads(data: &AppData, query: &AdQuery, table: &str) -> anyhow::Result<Vec<Ad>> {
    let db = data.db.connect()?;
    let limit = query.limit.unwrap_or(data.catalog.default_limit);

    if query.has_filters() {
        get_filtered_ads(db, table, query, limit).await
    } else {
        get_ordered_ads(db, table, limit).await
    }
}

async fn ads_page(
    data: &AppData,
    query: AdQuery,
    table: &str,
    show_summary: bool,
    limit_cap: Option<u32>,
    ctx: &str,
) -> HttpResponse {
    if let Err(err) = query.validate(&data.catalog, limit_cap) {
        error!("[{ctx}] Rejecting request with err: {err}");
        return HttpResponse::UnprocessableEntity().json(Failure {
            message: err.to_string(),
        });
    }

    match read_ads(data, &query, table).await {
        Ok(ads) => {
            let summary = if show_summary {
                build_summary(&data.catalog, &ads)
            } else {
                Vec::new()
            };
            render_page(
                AdsPage {
                    ad_list: &ads,
                    show_summary,
                    summary,
                },
                ctx,
            )
        }
        Err(err) => {
            error!("[{ctx}] Reading ads failed with err: {err}");
            HttpResponse::InternalServerError().json(Failure {
                message: format!("Couldn't read ads. Err: {err}"),
            })
        }
    }
}

async fn export_ads(data: &AppData, query: AdQuery, table: &str, ctx: &str) -> HttpResponse {
    if let Err(err) = query.validate(&data.catalog, None) {
        error!("[{ctx}] Rejecting request with err: {err}");
        return HttpResponse::UnprocessableEntity().json(Failure {
            message: err.to_string(),
        });
    }

    let ads = match read_ads(data, &query, table).await {
        Ok(ads) => ads,
        Err(err) => {
            error!("[{ctx}] Reading ads failed with err: {err}");
            return HttpResponse::InternalServerError().json(Failure {
                message: format!("Couldn't read ads. Err: {err}"),
            });
        }
    };

    match ads_to_csv(&ads) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=export.csv"))
            .body(bytes),
        Err(err) => {
            error!("[{ctx}] Writing csv failed with err: {err}");
            HttpResponse::InternalServerError().json(Failure {
                message: format!("Couldn't write csv. Err: {err}"),
            })
        }
    }
}

#[get("/")]
pub async fn homepage() -> impl Responder {
    render_page(IndexPage, "Homepage")
}

#[get("/data")]
pub async fn additional_data(data: AppData) -> impl Responder {
    render_page(
        DataPage {
            sources: &data.catalog.sources,
            locations: &data.catalog.locations,
            home_types: &data.catalog.home_types,
        },
        "Data",
    )
}

#[get("/new-ads")]
pub async fn get_new_ads(query: web::Query<AdQuery>, data: AppData) -> impl Responder {
    ads_page(&data, query.into_inner(), NEW_ADS_T, true, None, "New Ads").await
}

#[get("/all-ads")]
pub async fn get_all_ads(query: web::Query<AdQuery>, data: AppData) -> impl Responder {
    let limit_cap = data.catalog.all_ads_limit_cap;
    ads_page(
        &data,
        query.into_inner(),
        ADS_T,
        false,
        limit_cap,
        "All Ads",
    )
    .await
}

#[get("/download-new-ads")]
pub async fn download_new_ads(query: web::Query<AdQuery>, data: AppData) -> impl Responder {
    export_ads(&data, query.into_inner(), NEW_ADS_T, "Download New Ads").await
}

#[get("/download-all-ads")]
pub async fn download_all_ads(query: web::Query<AdQuery>, data: AppData) -> impl Responder {
    export_ads(&data, query.into_inner(), ADS_T, "Download All Ads").await
}
