use super::validators;
use super::{FormErrors, max_length, non_blank, parse_date, required};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Reclamatie,
    Intrebare,
    Review,
    Cerere,
    Programare,
}

impl MessageType {
    pub fn from_choice(value: &str) -> Option<Self> {
        match value {
            "reclamatie" => Some(Self::Reclamatie),
            "intrebare" => Some(Self::Intrebare),
            "review" => Some(Self::Review),
            "cerere" => Some(Self::Cerere),
            "programare" => Some(Self::Programare),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reclamatie => "reclamatie",
            Self::Intrebare => "intrebare",
            Self::Review => "review",
            Self::Cerere => "cerere",
            Self::Programare => "programare",
        }
    }

    /// Shortest waiting period the shop accepts for this kind of message.
    pub fn min_waiting_days(&self) -> i64 {
        match self {
            Self::Review | Self::Cerere => 4,
            Self::Intrebare => 2,
            Self::Reclamatie | Self::Programare => 1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactForm {
    #[schema(example = "Popescu")]
    pub nume: Option<String>,
    pub prenume: Option<String>,
    #[schema(example = "1990315123456")]
    pub cnp: Option<String>,
    #[schema(example = "1990-03-15")]
    pub data_nasterii: Option<String>,
    pub email: Option<String>,
    pub confirmare_email: Option<String>,
    #[schema(example = "intrebare")]
    pub tip_mesaj: Option<String>,
    pub subiect: Option<String>,
    #[schema(example = "3")]
    pub minim_zile_asteptare: Option<String>,
    pub mesaj: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ContactMessage {
    pub last_name: String,
    pub first_name: Option<String>,
    pub cnp: Option<String>,
    pub birth_date: NaiveDate,
    pub email: String,
    pub message_type: MessageType,
    pub subject: String,
    pub min_waiting_days: i64,
    pub message: String,
}

type Check = fn(&str) -> Result<(), String>;

fn person_name(errors: &mut FormErrors, field: &str, value: &str) -> Option<String> {
    if !max_length(errors, field, value, 10) {
        return None;
    }
    let checks: [Check; 2] = [validators::text_format, validators::uppercase_after_separator];
    let mut ok = true;
    for check in checks {
        if let Err(msg) = check(value) {
            errors.add(field, msg);
            ok = false;
        }
    }
    ok.then(|| value.to_string())
}

impl ContactForm {
    pub fn clean(&self, today: NaiveDate) -> Result<ContactMessage, FormErrors> {
        let mut errors = FormErrors::new();

        let last_name = required(&mut errors, "nume", &self.nume)
            .and_then(|v| person_name(&mut errors, "nume", v));
        let first_name = non_blank(&self.prenume).and_then(|v| person_name(&mut errors, "prenume", v));

        let cnp = non_blank(&self.cnp).and_then(|v| match validators::cnp(v) {
            Ok(()) => Some(v.to_string()),
            Err(msg) => {
                errors.add("cnp", msg);
                None
            }
        });

        let birth_date = if required(&mut errors, "data_nasterii", &self.data_nasterii).is_some() {
            parse_date(&mut errors, "data_nasterii", &self.data_nasterii).filter(|d| {
                match validators::adult(
                    *d,
                    today,
                    "Expeditorul trebuie să aibă peste 18 ani pentru a trimite un mesaj.",
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

        let email = required(&mut errors, "email", &self.email).and_then(|v| {
            match validators::email(v).and_then(|_| validators::email_domain(v)) {
                Ok(()) => Some(v.to_string()),
                Err(msg) => {
                    errors.add("email", msg);
                    None
                }
            }
        });
        let confirmation = required(&mut errors, "confirmare_email", &self.confirmare_email)
            .and_then(|v| match validators::email(v) {
                Ok(()) => Some(v.to_string()),
                Err(msg) => {
                    errors.add("confirmare_email", msg);
                    None
                }
            });

        let message_type = match non_blank(&self.tip_mesaj).unwrap_or("neselectat") {
            "neselectat" => {
                errors.add(
                    "tip_mesaj",
                    "Te rugăm să selectezi un tip de mesaj valid din listă.",
                );
                None
            }
            other => {
                let parsed = MessageType::from_choice(other);
                if parsed.is_none() {
                    errors.add(
                        "tip_mesaj",
                        format!("Selectați o opțiune validă. {other} nu se află printre opțiunile disponibile."),
                    );
                }
                parsed
            }
        };

        let subject = required(&mut errors, "subiect", &self.subiect).and_then(|v| {
            if !max_length(&mut errors, "subiect", v, 100) {
                return None;
            }
            let checks: [Check; 2] = [validators::text_format, validators::no_links];
            let mut ok = true;
            for check in checks {
                if let Err(msg) = check(v) {
                    errors.add("subiect", msg);
                    ok = false;
                }
            }
            ok.then(|| v.to_string())
        });

        let waiting_days = required(&mut errors, "minim_zile_asteptare", &self.minim_zile_asteptare)
            .and_then(|v| match v.parse::<i64>() {
                Ok(n) if !(1..=30).contains(&n) => {
                    errors.add(
                        "minim_zile_asteptare",
                        "Valoarea trebuie să fie între 1 și 30.",
                    );
                    None
                }
                Ok(n) => Some(n),
                Err(_) => {
                    errors.add("minim_zile_asteptare", "Introduceți un număr întreg.");
                    None
                }
            });

        let message = required(&mut errors, "mesaj", &self.mesaj).and_then(|v| {
            let checks: [Check; 3] = [
                |t| validators::word_count_between(t, 5, 100),
                |t| validators::word_length_at_most(t, 15),
                validators::no_links,
            ];
            let mut ok = true;
            for check in checks {
                if let Err(msg) = check(v) {
                    errors.add("mesaj", msg);
                    ok = false;
                }
            }
            ok.then(|| v.to_string())
        });

        // Cross-field rules, only between fields that passed on their own.
        if let (Some(email), Some(confirmation)) = (&email, &confirmation)
            && email != confirmation
        {
            errors.add(
                "confirmare_email",
                "Adresele de e-mail nu coincid! Te rugăm să verifici.",
            );
        }

        if let (Some(name), Some(text)) = (&last_name, &message)
            && let Some(last_word) = validators::words(text).last()
            && last_word.to_lowercase() != name.to_lowercase()
        {
            errors.add(
                "mesaj",
                format!("Mesajul trebuie să se încheie cu numele tău ('{name}') pe post de semnătură."),
            );
        }

        if let (Some(kind), Some(days)) = (message_type, waiting_days)
            && days < kind.min_waiting_days()
        {
            let msg = match kind {
                MessageType::Intrebare => {
                    "Pentru o întrebare numărul minim de zile de așteptare este de 2.".to_string()
                }
                other => format!(
                    "Pentru {} numărul minim de zile de așteptare este de {}.",
                    other.as_str(),
                    other.min_waiting_days()
                ),
            };
            errors.add("minim_zile_asteptare", msg);
        }

        if let (Some(cnp), Some(birth)) = (&cnp, birth_date)
            && validators::cnp_birth_date(cnp) != Some(birth)
        {
            errors.add(
                "cnp",
                "CNP-ul introdus nu corespunde cu data nașterii selectată în calendar.",
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every required value is present once no error was recorded.
        match (last_name, birth_date, email, message_type, subject, waiting_days, message) {
            (
                Some(last_name),
                Some(birth_date),
                Some(email),
                Some(message_type),
                Some(subject),
                Some(min_waiting_days),
                Some(message),
            ) => Ok(ContactMessage {
                last_name,
                first_name,
                cnp,
                birth_date,
                email,
                message_type,
                subject,
                min_waiting_days,
                message,
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn valid() -> ContactForm {
        ContactForm {
            nume: Some("Popescu".into()),
            prenume: Some("Ana-Maria".into()),
            cnp: Some("2990315123456".into()),
            data_nasterii: Some("1999-03-15".into()),
            email: Some("ana@exemplu.ro".into()),
            confirmare_email: Some("ana@exemplu.ro".into()),
            tip_mesaj: Some("intrebare".into()),
            subiect: Some("Marimi disponibile".into()),
            minim_zile_asteptare: Some("3".into()),
            mesaj: Some("Buna ziua, aveti marimea 38 disponibila? Multumesc, Popescu".into()),
        }
    }

    #[test]
    fn test_valid_message() {
        let msg = valid().clean(today()).unwrap();
        assert_eq!(msg.message_type, MessageType::Intrebare);
        assert_eq!(msg.first_name.as_deref(), Some("Ana-Maria"));
    }

    #[test]
    fn test_emails_must_match() {
        let f = ContactForm {
            confirmare_email: Some("alta@exemplu.ro".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("confirmare_email"));
    }

    #[test]
    fn test_signature_must_be_last_word() {
        let f = ContactForm {
            mesaj: Some("Buna ziua, aveti marimea 38 disponibila? Multumesc".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("mesaj"));
    }

    #[test]
    fn test_waiting_days_depend_on_type() {
        let f = ContactForm {
            tip_mesaj: Some("review".into()),
            ..valid()
        };
        let errors = f.clean(today()).unwrap_err();
        assert_eq!(
            errors.get("minim_zile_asteptare"),
            ["Pentru review numărul minim de zile de așteptare este de 4.".to_string()]
        );

        let f = ContactForm {
            minim_zile_asteptare: Some("1".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("minim_zile_asteptare"));
    }

    #[test]
    fn test_cnp_must_match_birth_date() {
        let f = ContactForm {
            data_nasterii: Some("1999-03-16".into()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap_err().has("cnp"));
    }

    #[test]
    fn test_unselected_type_and_minor_sender() {
        let f = ContactForm {
            tip_mesaj: Some("neselectat".into()),
            data_nasterii: Some("2010-01-01".into()),
            cnp: None,
            ..valid()
        };
        let errors = f.clean(today()).unwrap_err();
        assert!(errors.has("tip_mesaj"));
        assert!(errors.has("data_nasterii"));
    }

    #[test]
    fn test_optional_first_name_may_be_empty() {
        let f = ContactForm {
            prenume: Some(String::new()),
            ..valid()
        };
        assert!(f.clean(today()).unwrap().first_name.is_none());
    }
}
