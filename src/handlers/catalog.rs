use super::{PageContext, PageResult, html};
use crate::access_log::{AccessLog, record::query_pairs};
use crate::config::CatalogConfig;
use crate::error::AppError;
use crate::forms::{ProductFilter, ProductFilterForm};
use crate::services::{CatalogService, SortOrder};
use crate::utils::encode_query;
use crate::views::{catalog as catalog_view, pages};
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

/// Last value of `name` in the query string.
fn last_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn query_without(pairs: &[(String, String)], names: &[&str]) -> String {
    let kept: Vec<(String, String)> = pairs
        .iter()
        .filter(|(k, _)| !names.contains(&k.as_str()))
        .cloned()
        .collect();
    encode_query(&kept)
}

fn filter_form(pairs: &[(String, String)]) -> ProductFilterForm {
    let get = |name: &str| last_param(pairs, name).map(str::to_string);
    ProductFilterForm {
        nume: get("nume"),
        descriere: get("descriere"),
        culoare_principala: get("culoare_principala"),
        pret_min: get("pret_min"),
        pret_max: get("pret_max"),
        greutate_min: get("greutate_min"),
        greutate_max: get("greutate_max"),
        data_adaugarii_min: get("data_adaugarii_min"),
        in_stoc: get("in_stoc"),
        categorie: get("categorie"),
        brand: get("brand"),
        material: get("material"),
        items_pe_pagina: get("items_pe_pagina"),
    }
}

pub async fn product_list(
    req: HttpRequest,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
    settings: web::Data<CatalogConfig>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    let pairs = query_pairs(req.query_string());
    let form = filter_form(&pairs);

    let (filter, errors) = match form.clean(settings.page_size) {
        Ok(filter) => {
            let errors = catalog.check_references(&filter).await?;
            if errors.is_empty() {
                (filter, None)
            } else {
                (ProductFilter::unfiltered(filter.per_page), Some(errors))
            }
        }
        Err(errors) => (ProductFilter::unfiltered(settings.page_size), Some(errors)),
    };
    if let Some(errors) = &errors {
        log::warn!("Product filter rejected: {errors}");
    }

    let sort = SortOrder::from_param(last_param(&pairs, "sort"));
    let listing = catalog
        .list_products(&filter, sort, last_param(&pairs, "page"))
        .await?;
    let choices = catalog.filter_choices().await?;

    let page = catalog_view::ListingPage {
        base_path: "/produse",
        category: None,
        listing: &listing,
        sort,
        filter: Some(catalog_view::FilterSection {
            form: &form,
            errors: errors.as_ref(),
            choices: &choices,
        }),
        pagination_query: query_without(&pairs, &["page"]),
        sort_query: query_without(&pairs, &["page", "sort"]),
    };
    Ok(html(
        StatusCode::OK,
        catalog_view::listing_page(&ctx.layout(), &page),
    ))
}

pub async fn product_detail(
    req: HttpRequest,
    path: web::Path<i32>,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    match catalog.product_detail(path.into_inner()).await {
        Ok(detail) => Ok(html(
            StatusCode::OK,
            catalog_view::detail_page(&ctx.layout(), &detail),
        )),
        Err(AppError::NotFound(msg)) => Ok(html(
            StatusCode::NOT_FOUND,
            pages::not_found(&ctx.layout(), &msg),
        )),
        Err(e) => Err(e.into()),
    }
}

pub async fn category_products(
    req: HttpRequest,
    path: web::Path<String>,
    log: web::Data<AccessLog>,
    catalog: web::Data<CatalogService>,
    settings: web::Data<CatalogConfig>,
) -> PageResult {
    let ctx = PageContext::load(&req, &log, &catalog).await?;
    let category = match catalog.category_by_name(&path.into_inner()).await {
        Ok(category) => category,
        Err(AppError::NotFound(msg)) => {
            return Ok(html(
                StatusCode::NOT_FOUND,
                pages::not_found(&ctx.layout(), &msg),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let pairs = query_pairs(req.query_string());
    let sort = SortOrder::from_param(last_param(&pairs, "sort"));
    let listing = catalog
        .list_category_products(
            category.id,
            sort,
            last_param(&pairs, "page"),
            settings.page_size,
        )
        .await?;

    let base_path = format!(
        "/categorii/{}",
        crate::utils::html::encode_path_segment(&category.name)
    );
    let page = catalog_view::ListingPage {
        base_path: &base_path,
        category: Some(&category),
        listing: &listing,
        sort,
        filter: None,
        pagination_query: query_without(&pairs, &["page"]),
        sort_query: query_without(&pairs, &["page", "sort"]),
    };
    Ok(html(
        StatusCode::OK,
        catalog_view::listing_page(&ctx.layout(), &page),
    ))
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/produse", web::get().to(product_list))
        .route("/produse/{id}", web::get().to(product_detail))
        .route("/categorii/{nume}", web::get().to(category_products));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn links_drop_page_and_sort() {
        let q = pairs(&[("nume", "air max"), ("page", "2"), ("sort", "a")]);
        assert_eq!(query_without(&q, &["page"]), "nume=air+max&sort=a");
        assert_eq!(query_without(&q, &["page", "sort"]), "nume=air+max");
    }

    #[test]
    fn repeated_parameters_keep_the_last_value() {
        let q = pairs(&[("pret_min", "10"), ("pret_min", "20")]);
        assert_eq!(filter_form(&q).pret_min.as_deref(), Some("20"));
        assert_eq!(last_param(&q, "page"), None);
    }
}
