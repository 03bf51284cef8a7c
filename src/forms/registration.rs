use super::validators;
use crate::error::AppError;
use crate::utils::validate_password;
use super::{FormErrors, max_length, non_blank, parse_date, required};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RegistrationForm {
    #[schema(example = "ion.popescu")]
    pub username: Option<String>,
    #[schema(example = "ion@exemplu.ro")]
    pub email: Option<String>,
    pub password1: Option<String>,
    pub password2: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(example = "0722123456")]
    pub telefon: Option<String>,
    pub adresa: Option<String>,
    pub judet: Option<String>,
    #[schema(example = "1990315123456")]
    pub cnp: Option<String>,
    #[schema(example = "1999-03-15")]
    pub data_nasterii: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub county: Option<String>,
    pub cnp: Option<String>,
    pub birth_date: NaiveDate,
}

fn optional_text(errors: &mut FormErrors, field: &str, raw: &Option<String>, max: usize) -> Option<String> {
    let value = non_blank(raw)?;
    max_length(errors, field, value, max).then(|| value.to_string())
}

impl RegistrationForm {
    pub fn clean(&self, today: NaiveDate) -> Result<NewUser, FormErrors> {
        let mut errors = FormErrors::new();

        let username = required(&mut errors, "username", &self.username).and_then(|v| {
            if !max_length(&mut errors, "username", v, 150) {
                return None;
            }
            if !USERNAME_RE.is_match(v) {
                errors.add(
                    "username",
                    "Introduceți un nume de utilizator valid. Acesta poate conține doar litere, cifre și caracterele @/./+/-/_.",
                );
                return None;
            }
            Some(v.to_string())
        });

        let email = required(&mut errors, "email", &self.email).and_then(|v| match validators::email(v) {
            Ok(()) => Some(v.to_string()),
            Err(msg) => {
                errors.add("email", msg);
                None
            }
        });

        let password = required(&mut errors, "password1", &self.password1).map(str::to_string);
        let confirmation = required(&mut errors, "password2", &self.password2);
        if let (Some(p1), Some(p2)) = (&password, confirmation) {
            if p1 != p2 {
                errors.add("password2", "Cele două câmpuri pentru parolă nu coincid.");
            } else if let Err(AppError::ValidationError(msg)) = validate_password(p1) {
                errors.add("password2", msg);
            }
        }

        let first_name = optional_text(&mut errors, "first_name", &self.first_name, 150);
        let last_name = optional_text(&mut errors, "last_name", &self.last_name, 150);
        let address = optional_text(&mut errors, "adresa", &self.adresa, 255);
        let county = optional_text(&mut errors, "judet", &self.judet, 50);

        let phone = non_blank(&self.telefon).and_then(|v| {
            if !v.chars().all(|c| c.is_ascii_digit()) {
                errors.add("telefon", "Numărul de telefon trebuie să conțină exclusiv cifre.");
                None
            } else if v.len() < 10 {
                errors.add("telefon", "Numărul de telefon este prea scurt (minim 10 cifre).");
                None
            } else if !max_length(&mut errors, "telefon", v, 15) {
                None
            } else {
                Some(v.to_string())
            }
        });

        let cnp = non_blank(&self.cnp).and_then(|v| {
            if let Err(msg) = validators::digits_only(v, "CNP-ul trebuie să conțină doar cifre.") {
                errors.add("cnp", msg);
                None
            } else if v.len() != 13 {
                errors.add(
                    "cnp",
                    format!("CNP-ul trebuie să aibă exact 13 cifre (tu ai introdus {}).", v.len()),
                );
                None
            } else {
                Some(v.to_string())
            }
        });

        let birth_date = if required(&mut errors, "data_nasterii", &self.data_nasterii).is_some() {
            parse_date(&mut errors, "data_nasterii", &self.data_nasterii).filter(|d| {
                match validators::adult(
                    *d,
                    today,
                    "Trebuie să ai minim 18 ani pentru a te putea înregistra pe platformă.",
                ) {
                    Ok(()) => true,
                    Err(msg) => {
                        errors.add("data_nasterii", msg);
                        false
                    }
                }
            })
        } else {
            None
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        match (username, email, password, birth_date) {
            (Some(username), Some(email), Some(password), Some(birth_date)) => Ok(NewUser {
                username,
                email,
                password,
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                phone,
                address,
                county,
                cnp,
                birth_date,
            }),
            _ => {
                errors.add("__all__", "Formular incomplet.");
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Keep the session for 24 hours.
    pub ramai_logat: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn clean(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();
        let username = required(&mut errors, "username", &self.username).map(str::to_string);
        // passwords are not trimmed
        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => Some(p.to_string()),
            _ => {
                errors.add("password", super::REQUIRED);
                None
            }
        };
        match (username, password) {
            (Some(username), Some(password)) => Ok(Credentials {
                username,
                password,
                remember_me: self.ramai_logat.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn valid() -> RegistrationForm {
        RegistrationForm {
            username: Some("ion.popescu".into()),
            email: Some("ion@exemplu.ro".into()),
            password1: Some("Parola123".into()),
            password2: Some("Parola123".into()),
            first_name: Some("Ion".into()),
            last_name: Some("Popescu".into()),
            telefon: Some("0722123456".into()),
            adresa: Some("Str. Lunga 1".into()),
            judet: Some("Cluj".into()),
            cnp: Some("1990315123456".into()),
            data_nasterii: Some("1999-03-15".into()),
        }
    }

    #[test]
    fn test_valid_registration() {
        let user = valid().clean(today()).unwrap();
        assert_eq!(user.username, "ion.popescu");
        assert_eq!(user.phone.as_deref(), Some("0722123456"));
    }

    #[test]
    fn test_phone_rules() {
        let f = RegistrationForm {
            telefon: Some("07221".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("telefon"));
        let f = RegistrationForm {
            telefon: Some("07-22-123-456".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("telefon"));
    }

    #[test]
    fn test_cnp_length() {
        let f = RegistrationForm {
            cnp: Some("123".into()),
            ..valid()
        };
        assert_eq!(
            f.clean(today()).unwrap_err().get("cnp"),
            ["CNP-ul trebuie să aibă exact 13 cifre (tu ai introdus 3).".to_string()]
        );
    }

    #[test]
    fn test_passwords() {
        let f = RegistrationForm {
            password2: Some("Parola124".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("password2"));
        let f = RegistrationForm {
            password1: Some("parola".into()),
            password2: Some("parola".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("password2"));
    }

    #[test]
    fn test_minor_cannot_register() {
        let f = RegistrationForm {
            data_nasterii: Some("2010-05-05".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("data_nasterii"));
    }

    #[test]
    fn test_login_form() {
        let creds = LoginForm {
            username: Some("ion".into()),
            password: Some("x".into()),
            ramai_logat: Some(true),
        }
        .clean()
        .unwrap();
        assert!(creds.remember_me);
        assert!(LoginForm::default().clean().is_err());
    }
}
