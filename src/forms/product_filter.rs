use super::validators;
use super::{FormErrors, max_length, non_blank, parse_date, parse_float, parse_number};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE_CHOICES: [u64; 4] = [5, 10, 20, 100];

/// Raw catalog query string. Field names are the public URL parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductFilterForm {
    pub nume: Option<String>,
    pub descriere: Option<String>,
    pub culoare_principala: Option<String>,
    pub pret_min: Option<String>,
    pub pret_max: Option<String>,
    pub greutate_min: Option<String>,
    pub greutate_max: Option<String>,
    pub data_adaugarii_min: Option<String>,
    pub in_stoc: Option<String>,
    pub categorie: Option<String>,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub items_pe_pagina: Option<String>,
}

/// Cleaned filter. `None` means "do not filter on this".
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub added_after: Option<NaiveDate>,
    pub in_stock: Option<bool>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub material_id: Option<i32>,
    pub per_page: u64,
}

impl ProductFilter {
    pub fn unfiltered(per_page: u64) -> Self {
        Self {
            name: None,
            description: None,
            color: None,
            price_min: None,
            price_max: None,
            weight_min: None,
            weight_max: None,
            added_after: None,
            in_stock: None,
            category_id: None,
            brand_id: None,
            material_id: None,
            per_page,
        }
    }
}

const INVALID_CHOICE: &str = "Selectați o opțiune validă. Această opțiune nu se află printre opțiunile disponibile.";

fn min_zero(errors: &mut FormErrors, field: &str, negative: bool) {
    if negative {
        errors.add(
            field,
            "Asigurați-vă că această valoare este mai mare sau egală cu 0.",
        );
    }
}

fn foreign_id(errors: &mut FormErrors, field: &str, raw: &Option<String>) -> Option<i32> {
    parse_number(errors, field, raw, INVALID_CHOICE)
}

impl ProductFilterForm {
    /// Field-level and cross-field validation. Existence of the referenced
    /// category/brand/material is checked by the catalog service.
    pub fn clean(&self, default_per_page: u64) -> Result<ProductFilter, FormErrors> {
        let mut errors = FormErrors::new();
        let mut filter = ProductFilter::unfiltered(default_per_page);

        if let Some(nume) = non_blank(&self.nume)
            && max_length(&mut errors, "nume", nume, 150)
        {
            match validators::search_text(nume) {
                Ok(()) => filter.name = Some(nume.to_string()),
                Err(msg) => errors.add("nume", msg),
            }
        }
        if let Some(descriere) = non_blank(&self.descriere)
            && max_length(&mut errors, "descriere", descriere, 200)
        {
            filter.description = Some(descriere.to_string());
        }
        if let Some(culoare) = non_blank(&self.culoare_principala)
            && max_length(&mut errors, "culoare_principala", culoare, 50)
        {
            filter.color = Some(culoare.to_string());
        }

        filter.price_min = parse_number(&mut errors, "pret_min", &self.pret_min, "Introduceți un număr.");
        filter.price_max = parse_number(&mut errors, "pret_max", &self.pret_max, "Introduceți un număr.");
        min_zero(&mut errors, "pret_min", filter.price_min.is_some_and(|p| p < Decimal::ZERO));
        min_zero(&mut errors, "pret_max", filter.price_max.is_some_and(|p| p < Decimal::ZERO));

        filter.weight_min = parse_float(&mut errors, "greutate_min", &self.greutate_min);
        filter.weight_max = parse_float(&mut errors, "greutate_max", &self.greutate_max);
        min_zero(&mut errors, "greutate_min", filter.weight_min.is_some_and(|w| w < 0.0));
        min_zero(&mut errors, "greutate_max", filter.weight_max.is_some_and(|w| w < 0.0));

        filter.added_after = parse_date(&mut errors, "data_adaugarii_min", &self.data_adaugarii_min);

        filter.in_stock = match self.in_stoc.as_deref().unwrap_or("") {
            "" => None,
            "1" => Some(true),
            "0" => Some(false),
            _ => {
                errors.add("in_stoc", INVALID_CHOICE);
                None
            }
        };

        filter.category_id = foreign_id(&mut errors, "categorie", &self.categorie);
        filter.brand_id = foreign_id(&mut errors, "brand", &self.brand);
        filter.material_id = foreign_id(&mut errors, "material", &self.material);

        if let Some(raw) = non_blank(&self.items_pe_pagina) {
            match raw.parse::<u64>() {
                Ok(n) if PAGE_SIZE_CHOICES.contains(&n) => filter.per_page = n,
                _ => errors.add("items_pe_pagina", INVALID_CHOICE),
            }
        }

        // Cross-field rules only compare values that parsed cleanly.
        if let (Some(min), Some(max)) = (filter.price_min, filter.price_max)
            && max < min
        {
            errors.add(
                "pret_max",
                "Eroare logică: Prețul maxim nu poate fi mai mic decât prețul minim introdus!",
            );
        }
        if let (Some(min), Some(max)) = (filter.weight_min, filter.weight_max)
            && max < min
        {
            errors.add(
                "greutate_max",
                "Eroare logică: Ai setat o greutate maximă mai mică decât cea minimă!",
            );
        }

        errors.into_result(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn form() -> ProductFilterForm {
        ProductFilterForm::default()
    }

    #[test]
    fn test_empty_form_is_unfiltered() {
        let filter = form().clean(5).unwrap();
        assert_eq!(filter, ProductFilter::unfiltered(5));
    }

    #[test]
    fn test_max_price_below_min_is_rejected_on_max_field() {
        let f = ProductFilterForm {
            pret_min: Some("100".into()),
            pret_max: Some("99.99".into()),
            ..form()
        };
        let errors = f.clean(5).unwrap_err();
        assert!(errors.has("pret_max"));
        assert!(!errors.has("pret_min"));
    }

    #[test]
    fn test_equal_bounds_are_accepted() {
        let f = ProductFilterForm {
            pret_min: Some("250".into()),
            pret_max: Some("250.00".into()),
            greutate_min: Some("300".into()),
            greutate_max: Some("300".into()),
            ..form()
        };
        let filter = f.clean(5).unwrap();
        assert_eq!(filter.price_min, Some(Decimal::from_str("250").unwrap()));
        assert_eq!(filter.weight_max, Some(300.0));
    }

    #[test]
    fn test_weight_rule_attaches_to_max() {
        let f = ProductFilterForm {
            greutate_min: Some("500".into()),
            greutate_max: Some("100".into()),
            ..form()
        };
        let errors = f.clean(5).unwrap_err();
        assert!(errors.has("greutate_max"));
    }

    #[test]
    fn test_negative_and_garbage_numbers() {
        let f = ProductFilterForm {
            pret_min: Some("-1".into()),
            greutate_max: Some("abc".into()),
            ..form()
        };
        let errors = f.clean(5).unwrap_err();
        assert!(errors.has("pret_min"));
        assert!(errors.has("greutate_max"));
    }

    #[test]
    fn test_name_special_characters() {
        let f = ProductFilterForm {
            nume: Some("Air <Max>".into()),
            ..form()
        };
        assert!(f.clean(5).unwrap_err().has("nume"));

        let f = ProductFilterForm {
            nume: Some("Air Max".into()),
            ..form()
        };
        assert_eq!(f.clean(5).unwrap().name.as_deref(), Some("Air Max"));
    }

    #[test]
    fn test_choices() {
        let f = ProductFilterForm {
            in_stoc: Some("1".into()),
            items_pe_pagina: Some("20".into()),
            categorie: Some("3".into()),
            ..form()
        };
        let filter = f.clean(5).unwrap();
        assert_eq!(filter.in_stock, Some(true));
        assert_eq!(filter.per_page, 20);
        assert_eq!(filter.category_id, Some(3));

        let f = ProductFilterForm {
            in_stoc: Some("2".into()),
            items_pe_pagina: Some("7".into()),
            ..form()
        };
        let errors = f.clean(5).unwrap_err();
        assert!(errors.has("in_stoc"));
        assert!(errors.has("items_pe_pagina"));
    }

    #[test]
    fn test_date_field() {
        let f = ProductFilterForm {
            data_adaugarii_min: Some("2025-02-30".into()),
            ..form()
        };
        assert!(f.clean(5).unwrap_err().has("data_adaugarii_min"));
    }
}
