use itertools::Itertools;

use crate::{
    config::Catalog,
    types::{Ad, SourceCount, StringError},
};

/// One entry per catalog source in registry order, zero for sources with
/// no hits, so the rendered summary always shows the full source list.
pub fn build_summary(catalog: &Catalog, ads: &[Ad]) -> Vec<SourceCount> {
    let counts = ads.iter().map(|ad| ad.source_name.as_str()).counts();

    catalog
        .sources
        .iter()
        .map(|source| SourceCount {
            source_name: source.clone(),
            count: counts.get(source.as_str()).copied().unwrap_or(0),
        })
        .collect()
}

pub const CSV_HEADER: [&str; 9] = [
    "id",
    "Свалено от",
    "Цена",
    "Квартал",
    "Големина в кв.м.",
    "Тип на имота",
    "URL",
    "Снимка",
    "Намерено на дата",
];

pub fn ads_to_csv(ads: &[Ad]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for ad in ads {
        writer.write_record([
            ad.id.to_string().as_str(),
            &ad.source_name,
            ad.price.to_string().as_str(),
            &ad.location,
            ad.home_size.to_string().as_str(),
            &ad.home_type,
            &ad.url,
            &ad.image,
            &ad.scraping_date,
        ])?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|err| StringError(format!("Couldn't finish csv buffer. Err: {err}")).into())
}
