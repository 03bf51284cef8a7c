use super::validators;
use super::{FormErrors, REQUIRED, max_length};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest price that fits a `decimal(8, 2)` column.
const MAX_PRICE: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);
const MAX_MARKUP_PERCENT: i64 = 1000;
const MIN_SHOE_WEIGHT: f64 = 10.0;
const MAX_PAIR_WEIGHT_DIFFERENCE: f64 = 15.0;

/// Admin product form: the sale price is derived from the supplier price and
/// the markup, the stored weight from the two shoes of the pair.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ProductForm {
    #[schema(example = "Nike Air Max")]
    pub nume: Option<String>,
    pub descriere: Option<String>,
    pub categorie: Option<i32>,
    pub brand: Option<i32>,
    pub material: Option<i32>,
    #[schema(example = "Alb")]
    pub culoare_principala: Option<String>,
    pub in_stoc: Option<bool>,
    #[schema(value_type = Option<String>, example = "150.00")]
    pub pret_furnizor: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "40")]
    pub adaos_procent: Option<Decimal>,
    pub greutate_stang: Option<f64>,
    pub greutate_drept: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category_id: i32,
    pub brand_id: i32,
    pub material_id: Option<i32>,
    pub primary_color: String,
    pub in_stock: bool,
    pub price: Decimal,
    pub weight: f64,
}

/// `None` when the product does not fit in a `Decimal`.
pub fn sale_price(supplier_price: Decimal, markup_percent: Decimal) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(markup_percent.checked_div(Decimal::ONE_HUNDRED)?)?;
    supplier_price.checked_mul(factor).map(|p| p.round_dp(2))
}

fn shoe_weight(errors: &mut FormErrors, field: &str, value: Option<f64>) -> Option<f64> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(w) if !w.is_finite() || w < MIN_SHOE_WEIGHT => {
            errors.add(
                field,
                format!("Asigurați-vă că această valoare este mai mare sau egală cu {MIN_SHOE_WEIGHT}."),
            );
            None
        }
        Some(w) => Some(w),
    }
}

impl ProductForm {
    pub fn clean(&self) -> Result<NewProduct, FormErrors> {
        let mut errors = FormErrors::new();

        let name = match self.nume.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                errors.add("nume", REQUIRED);
                None
            }
            Some(v) if !max_length(&mut errors, "nume", v, 150) => None,
            Some(v) => {
                let checks: [fn(&str) -> Result<(), String>; 2] =
                    [validators::no_special_characters, validators::starts_uppercase];
                let mut ok = true;
                for check in checks {
                    if let Err(msg) = check(v) {
                        errors.add("nume", msg);
                        ok = false;
                    }
                }
                if ok && v.chars().count() < 3 {
                    errors.add("nume", "Denumirea este prea scurtă (minim 3 caractere).");
                    ok = false;
                }
                ok.then(|| v.to_string())
            }
        };

        let description = match self.descriere.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                errors.add("descriere", REQUIRED);
                None
            }
            Some(v) => match validators::no_special_characters(v) {
                Err(msg) => {
                    errors.add("descriere", msg);
                    None
                }
                Ok(()) => {
                    let n = validators::words(v).len();
                    if n < 5 {
                        errors.add(
                            "descriere",
                            format!("Descrierea este prea sumară. Trebuie să conțină minim 5 cuvinte (tu ai introdus {n})."),
                        );
                        None
                    } else {
                        Some(v.to_string())
                    }
                }
            },
        };

        if self.categorie.is_none() {
            errors.add("categorie", REQUIRED);
        }
        if self.brand.is_none() {
            errors.add("brand", REQUIRED);
        }

        let color = match self.culoare_principala.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                errors.add("culoare_principala", REQUIRED);
                None
            }
            Some(v) => max_length(&mut errors, "culoare_principala", v, 50).then(|| v.to_string()),
        };

        let supplier_price = match self.pret_furnizor {
            None => {
                errors.add("pret_furnizor", REQUIRED);
                None
            }
            Some(p) if p < Decimal::ONE => {
                errors.add(
                    "pret_furnizor",
                    "Asigurați-vă că această valoare este mai mare sau egală cu 1.",
                );
                None
            }
            Some(p) => Some(p),
        };

        let markup = match self.adaos_procent {
            None => {
                errors.add("adaos_procent", REQUIRED);
                None
            }
            Some(m) if m < Decimal::ZERO => {
                errors.add(
                    "adaos_procent",
                    "Asigurați-vă că această valoare este mai mare sau egală cu 0.",
                );
                None
            }
            Some(m) if m > Decimal::from(MAX_MARKUP_PERCENT) => {
                errors.add(
                    "adaos_procent",
                    "Eroare de sistem: Adaosul comercial nu poate depăși limita maximă admisă de 1000%.",
                );
                None
            }
            Some(m) => Some(m),
        };

        let left = shoe_weight(&mut errors, "greutate_stang", self.greutate_stang);
        let right = shoe_weight(&mut errors, "greutate_drept", self.greutate_drept);

        if let (Some(l), Some(r)) = (left, right) {
            let difference = (l - r).abs();
            if difference > MAX_PAIR_WEIGHT_DIFFERENCE {
                errors.add(
                    "greutate_drept",
                    format!(
                        "Diferența de greutate între pantofi este prea mare ({difference}g)! Pantoful stâng are {l}g, iar cel drept {r}g. Vă rugăm să verificați datele introduse."
                    ),
                );
            }
        }

        let price = match (supplier_price, markup) {
            (Some(p), Some(m)) => match sale_price(p, m) {
                Some(price) if price <= MAX_PRICE => Some(price),
                _ => {
                    errors.add(
                        "pret_furnizor",
                        "Prețul final depășește valoarea maximă admisă (999999.99 RON).",
                    );
                    None
                }
            },
            _ => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        match (name, description, self.categorie, self.brand, color, price, left, right) {
            (
                Some(name),
                Some(description),
                Some(category_id),
                Some(brand_id),
                Some(primary_color),
                Some(price),
                Some(l),
                Some(r),
            ) => Ok(NewProduct {
                name,
                description,
                category_id,
                brand_id,
                material_id: self.material,
                primary_color,
                in_stock: self.in_stoc.unwrap_or(true),
                price,
                weight: (l + r) / 2.0,
            }),
            _ => {
                errors.add("__all__", "Formular incomplet.");
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn valid() -> ProductForm {
        ProductForm {
            nume: Some("Nike Air Max".into()),
            descriere: Some("Pantof sport cu talpa moale si aerisire buna".into()),
            categorie: Some(1),
            brand: Some(1),
            material: None,
            culoare_principala: Some("Alb".into()),
            in_stoc: None,
            pret_furnizor: Some(dec("150.00")),
            adaos_procent: Some(dec("40")),
            greutate_stang: Some(320.0),
            greutate_drept: Some(330.0),
        }
    }

    #[test]
    fn test_price_and_weight_are_derived() {
        let product = valid().clean().unwrap();
        assert_eq!(product.price, dec("210.00"));
        assert_eq!(product.weight, 325.0);
        assert!(product.in_stock);
    }

    #[test]
    fn test_sale_price_rounds_to_cents() {
        assert_eq!(sale_price(dec("99.99"), dec("33.3")), Some(dec("133.29")));
    }

    #[test]
    fn test_huge_supplier_price_is_a_form_error() {
        assert_eq!(sale_price(Decimal::MAX, dec("1000")), None);
        let f = ProductForm {
            pret_furnizor: Some(Decimal::MAX),
            adaos_procent: Some(dec("1000")),
            ..valid()
        };
        assert!(f.clean().unwrap_err().has("pret_furnizor"));

        let f = ProductForm {
            pret_furnizor: Some(dec("100000")),
            adaos_procent: Some(dec("1000")),
            ..valid()
        };
        assert!(f.clean().unwrap_err().has("pret_furnizor"));
    }

    #[test]
    fn test_name_rules() {
        let f = ProductForm {
            nume: Some("nike".into()),
            ..valid()
        };
        assert!(f.clean().unwrap_err().has("nume"));

        let f = ProductForm {
            nume: Some("Ab".into()),
            ..valid()
        };
        assert_eq!(
            f.clean().unwrap_err().get("nume"),
            ["Denumirea este prea scurtă (minim 3 caractere).".to_string()]
        );
    }

    #[test]
    fn test_description_needs_five_words() {
        let f = ProductForm {
            descriere: Some("Prea scurt".into()),
            ..valid()
        };
        assert!(f.clean().unwrap_err().has("descriere"));
    }

    #[test]
    fn test_markup_limit_and_weight_difference() {
        let f = ProductForm {
            adaos_procent: Some(dec("1000.01")),
            greutate_drept: Some(340.0),
            ..valid()
        };
        let errors = f.clean().unwrap_err();
        assert!(errors.has("adaos_procent"));
        assert!(errors.has("greutate_drept"));
    }

    #[test]
    fn test_missing_relations() {
        let f = ProductForm {
            categorie: None,
            brand: None,
            ..valid()
        };
        let errors = f.clean().unwrap_err();
        assert!(errors.has("categorie"));
        assert!(errors.has("brand"));
    }
}
