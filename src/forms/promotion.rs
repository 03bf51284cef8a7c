use super::{FormErrors, REQUIRED, max_length, required};
use crate::entities::promotions::PromotionTemplate;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PromotionForm {
    #[schema(example = "Reduceri de iarnă")]
    pub nume: Option<String>,
    /// RFC 3339 or `YYYY-MM-DDTHH:MM` (UTC).
    #[schema(example = "2026-12-31T23:59")]
    pub data_expirare: Option<String>,
    #[schema(example = 20)]
    pub reducere: Option<i32>,
    pub subiect: Option<String>,
    #[serde(default)]
    pub categorii: Vec<i32>,
    #[schema(example = "promotie_generala.txt")]
    pub mesaj: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub name: String,
    pub expires_at: DateTime<Utc>,
    pub discount_percent: i32,
    pub email_subject: String,
    pub category_ids: Vec<i32>,
    pub template: PromotionTemplate,
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

impl PromotionForm {
    /// Category existence is checked by the admin service.
    pub fn clean(&self, now: DateTime<Utc>) -> Result<NewPromotion, FormErrors> {
        let mut errors = FormErrors::new();

        let name = required(&mut errors, "nume", &self.nume)
            .and_then(|v| max_length(&mut errors, "nume", v, 100).then(|| v.to_string()));

        let expires_at = required(&mut errors, "data_expirare", &self.data_expirare).and_then(|v| {
            match parse_datetime(v) {
                None => {
                    errors.add("data_expirare", "Introduceți o dată și o oră valide.");
                    None
                }
                Some(dt) if dt <= now => {
                    errors.add("data_expirare", "Data expirării trebuie să fie în viitor.");
                    None
                }
                Some(dt) => Some(dt),
            }
        });

        let discount = match self.reducere {
            None => {
                errors.add("reducere", REQUIRED);
                None
            }
            Some(d) if !(1..=100).contains(&d) => {
                errors.add("reducere", "Reducerea trebuie să fie între 1 și 100%.");
                None
            }
            Some(d) => Some(d),
        };

        let subject = required(&mut errors, "subiect", &self.subiect)
            .and_then(|v| max_length(&mut errors, "subiect", v, 200).then(|| v.to_string()));

        let mut category_ids = self.categorii.clone();
        category_ids.sort_unstable();
        category_ids.dedup();
        if category_ids.is_empty() {
            errors.add("categorii", "Selectați cel puțin o categorie.");
        }

        let template = required(&mut errors, "mesaj", &self.mesaj).and_then(|v| {
            let parsed = PromotionTemplate::from_file_name(v);
            if parsed.is_none() {
                errors.add(
                    "mesaj",
                    format!("Selectați o opțiune validă. {v} nu se află printre opțiunile disponibile."),
                );
            }
            parsed
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        match (name, expires_at, discount, subject, template) {
            (Some(name), Some(expires_at), Some(discount_percent), Some(email_subject), Some(template)) => {
                Ok(NewPromotion {
                    name,
                    expires_at,
                    discount_percent,
                    email_subject,
                    category_ids,
                    template,
                })
            }
            _ => {
                errors.add("__all__", "Formular incomplet.");
                Err(errors)
            }
        }
    }
}
