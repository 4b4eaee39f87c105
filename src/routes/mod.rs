use actix_web::{
    App, Error,
    dev::{ServiceFactory, ServiceRequest},
};

use crate::types::AppData;

pub mod gets;

pub fn build_app<T>(app: App<T>, data: AppData) -> App<T>
where
    T: ServiceFactory<ServiceRequest, Config = (), Error = Error, InitError = ()>,
{
    app.app_data(data)
        .service(gets::homepage)
        .service(gets::additional_data)
        .service(gets::get_new_ads)
        .service(gets::get_all_ads)
        .service(gets::download_new_ads)
        .service(gets::download_all_ads)
}
