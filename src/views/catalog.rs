use super::{Layout, escape_html};
use crate::entities::category_entity as categories;
use crate::forms::{FormErrors, PAGE_SIZE_CHOICES, ProductFilterForm};
use crate::services::{FilterChoices, ProductCard, ProductDetail, ProductListing, SortOrder};

/// Listing page: `/produse` (with the filter form) or `/categorii/{nume}`.
pub struct ListingPage<'a> {
    pub base_path: &'a str,
    pub category: Option<&'a categories::Model>,
    pub listing: &'a ProductListing,
    pub sort: SortOrder,
    /// Filter form state; `None` on category pages.
    pub filter: Option<FilterSection<'a>>,
    /// Query string without `page`, used by the pagination links.
    pub pagination_query: String,
    /// Query string without `page` and `sort`, used by the sort links.
    pub sort_query: String,
}

pub struct FilterSection<'a> {
    pub form: &'a ProductFilterForm,
    pub errors: Option<&'a FormErrors>,
    pub choices: &'a FilterChoices,
}

fn with_query(base: &str, query: &str, extra: &str) -> String {
    match (query.is_empty(), extra.is_empty()) {
        (true, true) => base.to_string(),
        (true, false) => format!("{base}?{extra}"),
        (false, true) => format!("{base}?{query}"),
        (false, false) => format!("{base}?{query}&{extra}"),
    }
}

fn text_input(name: &str, label: &str, kind: &str, value: &Option<String>) -> String {
    format!(
        r#"<label>{label} <input type="{kind}" name="{name}" value="{}"></label>"#,
        escape_html(value.as_deref().unwrap_or_default())
    )
}

fn select(name: &str, label: &str, current: &Option<String>, options: &[(String, String)]) -> String {
    let current = current.as_deref().unwrap_or_default();
    let mut html = format!(r#"<label>{label} <select name="{name}"><option value="">---------</option>"#);
    for (value, text) in options {
        let selected = if value == current { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{selected}>{}</option>"#,
            escape_html(value),
            escape_html(text)
        ));
    }
    html.push_str("</select></label>");
    html
}

fn filter_form(section: &FilterSection) -> String {
    let form = section.form;
    let mut html = String::from("<form method=\"get\" action=\"/produse\" class=\"filtre\">\n");

    if let Some(errors) = section.errors {
        html.push_str("<ul class=\"erori\">\n");
        for (field, messages) in errors.iter() {
            for message in messages {
                html.push_str(&format!(
                    "<li><strong>{}</strong>: {}</li>\n",
                    escape_html(field),
                    escape_html(message)
                ));
            }
        }
        html.push_str("</ul>\n");
    }

    let fields = [
        text_input("nume", "Nume", "text", &form.nume),
        text_input("descriere", "Descriere", "text", &form.descriere),
        text_input("culoare_principala", "Culoare", "text", &form.culoare_principala),
        text_input("pret_min", "Preț minim", "number", &form.pret_min),
        text_input("pret_max", "Preț maxim", "number", &form.pret_max),
        text_input("greutate_min", "Greutate minimă", "number", &form.greutate_min),
        text_input("greutate_max", "Greutate maximă", "number", &form.greutate_max),
        text_input("data_adaugarii_min", "Adăugat după", "date", &form.data_adaugarii_min),
        select(
            "in_stoc",
            "În stoc",
            &form.in_stoc,
            &[("1".into(), "Da".into()), ("0".into(), "Nu".into())],
        ),
        select(
            "categorie",
            "Categorie",
            &form.categorie,
            &section
                .choices
                .categories
                .iter()
                .map(|c| (c.id.to_string(), c.display_name()))
                .collect::<Vec<_>>(),
        ),
        select(
            "brand",
            "Brand",
            &form.brand,
            &section
                .choices
                .brands
                .iter()
                .map(|b| (b.id.to_string(), b.name.clone()))
                .collect::<Vec<_>>(),
        ),
        select(
            "material",
            "Material",
            &form.material,
            &section
                .choices
                .materials
                .iter()
                .map(|m| (m.id.to_string(), m.name.clone()))
                .collect::<Vec<_>>(),
        ),
        select(
            "items_pe_pagina",
            "Produse pe pagină",
            &form.items_pe_pagina,
            &PAGE_SIZE_CHOICES
                .iter()
                .map(|n| (n.to_string(), n.to_string()))
                .collect::<Vec<_>>(),
        ),
    ];
    for field in fields {
        html.push_str(&field);
        html.push('\n');
    }
    html.push_str("<button type=\"submit\">Filtrează</button>\n</form>\n");
    html
}

fn product_card(card: &ProductCard) -> String {
    let p = &card.product;
    format!(
        r#"<article class="produs">
    <h3><a href="/produse/{id}">{name}</a></h3>
    <p>Brand: {brand} | Categorie: {category}</p>
    <p>Preț: <strong>{price} RON</strong></p>
    <p>Culoare: {color}</p>
    <p>{stock}</p>
</article>
"#,
        id = p.id,
        name = escape_html(&p.name),
        brand = escape_html(&card.brand),
        category = escape_html(&card.category),
        price = p.price.round_dp(2),
        color = escape_html(&p.primary_color),
        stock = if p.in_stock { "În stoc" } else { "Stoc epuizat" },
    )
}

pub fn listing_page(layout: &Layout, page: &ListingPage) -> String {
    let mut body = String::new();

    let title = match page.category {
        Some(category) => {
            body.push_str(&format!(
                r#"<section class="categorie" style="border-left: 4px solid {color};">
    <h2><i class="{icon}"></i> {name}</h2>
</section>
"#,
                color = escape_html(&category.color_code),
                icon = escape_html(&category.icon_class),
                name = escape_html(&category.display_name()),
            ));
            category.display_name()
        }
        None => {
            body.push_str("<h2>Produse</h2>\n");
            "Produse".to_string()
        }
    };

    if let Some(section) = &page.filter {
        body.push_str(&filter_form(section));
    }

    body.push_str("<p class=\"sortare\">Sortează după preț: ");
    for (param, label) in [("a", "crescător"), ("d", "descrescător")] {
        let href = with_query(page.base_path, &page.sort_query, &format!("sort={param}"));
        let marker = if page.sort.as_param() == param { " class=\"activ\"" } else { "" };
        body.push_str(&format!(r#"<a href="{}"{marker}>{label}</a> "#, escape_html(&href)));
    }
    body.push_str("</p>\n");

    if page.listing.items.is_empty() {
        body.push_str("<p>Nu există produse care să corespundă criteriilor.</p>\n");
    }
    for card in &page.listing.items {
        body.push_str(&product_card(card));
    }

    let info = &page.listing.page;
    body.push_str("<nav class=\"paginare\">");
    if info.has_previous() {
        let first = with_query(page.base_path, &page.pagination_query, "page=1");
        let prev = with_query(
            page.base_path,
            &page.pagination_query,
            &format!("page={}", info.number - 1),
        );
        body.push_str(&format!(
            r#"<a href="{}">&laquo; prima</a> <a href="{}">anterioara</a> "#,
            escape_html(&first),
            escape_html(&prev)
        ));
    }
    body.push_str(&format!(
        "<span>Pagina {} din {}</span>",
        info.number, info.num_pages
    ));
    if info.has_next() {
        let next = with_query(
            page.base_path,
            &page.pagination_query,
            &format!("page={}", info.number + 1),
        );
        let last = with_query(
            page.base_path,
            &page.pagination_query,
            &format!("page={}", info.num_pages),
        );
        body.push_str(&format!(
            r#" <a href="{}">următoarea</a> <a href="{}">ultima &raquo;</a>"#,
            escape_html(&next),
            escape_html(&last)
        ));
    }
    body.push_str("</nav>\n");

    layout.render(&title, &body)
}

pub fn detail_page(layout: &Layout, detail: &ProductDetail) -> String {
    let p = &detail.product;
    let mut sizes = String::new();
    for line in &detail.stocks {
        sizes.push_str(&format!(
            "<li>{}: {} buc.</li>\n",
            escape_html(&line.size.display_name()),
            line.quantity
        ));
    }
    if sizes.is_empty() {
        sizes.push_str("<li>Nu există mărimi înregistrate.</li>\n");
    }

    let body = format!(
        r#"<article class="produs-detaliu">
    <h2>{name}</h2>
    <p>{description}</p>
    <ul>
        <li>Preț: <strong>{price} RON</strong></li>
        <li>Categorie: <a href="/categorii/{category_href}">{category}</a></li>
        <li>Brand: {brand} ({country})</li>
        <li>Material: {material}</li>
        <li>Culoare principală: {color}</li>
        <li>Greutate: {weight}</li>
        <li>Disponibilitate: {stock}</li>
        <li>Adăugat la: {created}</li>
    </ul>
    <h3>Mărimi disponibile</h3>
    <ul>
{sizes}    </ul>
</article>
"#,
        name = escape_html(&p.name),
        description = escape_html(&p.description),
        price = p.price.round_dp(2),
        category_href = crate::utils::html::encode_path_segment(&detail.category.name),
        category = escape_html(&detail.category.display_name()),
        brand = escape_html(&detail.brand.name),
        country = escape_html(&detail.brand.country),
        material = detail
            .material
            .as_ref()
            .map(|m| escape_html(&m.name))
            .unwrap_or_else(|| "-".to_string()),
        color = escape_html(&p.primary_color),
        weight = p
            .weight
            .map(|w| format!("{w} g"))
            .unwrap_or_else(|| "-".to_string()),
        stock = if p.in_stock { "În stoc" } else { "Stoc epuizat" },
        created = p.created_at.format("%d.%m.%Y %H:%M"),
    );
    layout.render(&p.name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_joining() {
        assert_eq!(with_query("/produse", "", ""), "/produse");
        assert_eq!(with_query("/produse", "nume=a", "page=2"), "/produse?nume=a&page=2");
        assert_eq!(with_query("/produse", "", "sort=a"), "/produse?sort=a");
    }

    #[test]
    fn select_marks_current_option() {
        let html = select(
            "in_stoc",
            "În stoc",
            &Some("0".into()),
            &[("1".into(), "Da".into()), ("0".into(), "Nu".into())],
        );
        assert!(html.contains(r#"<option value="0" selected>Nu</option>"#));
        assert!(html.contains(r#"<option value="1">Da</option>"#));
    }
}
