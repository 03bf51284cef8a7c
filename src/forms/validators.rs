//! Single-value validators shared by the forms.
//!
//! Each returns `Err(message)` with the text shown next to the field.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9ăâîșțĂÂÎȘȚ]+").unwrap());
static SEARCH_SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@#$%^&*_{}\[\]<>/\\|]").unwrap());
static TEXT_SPECIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@#$%^&*_{}\[\]<>\\|]").unwrap());
static TEXT_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-ZĂÂÎȘȚ][a-zA-ZĂÂÎȘȚăâîșț \-]*$").unwrap());
static LOWER_AFTER_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \-][a-zăâîșț]").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bhttps?://").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

const TEMPORARY_EMAIL_DOMAINS: [&str; 2] = ["guerillamail.com", "yopmail.com"];

pub const ADULT_AGE: i32 = 18;

/// Alphanumeric words (Romanian diacritics included).
pub fn words(text: &str) -> Vec<&str> {
    WORD_RE.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let had_birthday = (today.month(), today.day()) >= (birth.month(), birth.day());
    today.year() - birth.year() - if had_birthday { 0 } else { 1 }
}

/// Search box text: blocks characters that have no place in a product name.
pub fn search_text(value: &str) -> Result<(), String> {
    if SEARCH_SPECIAL_RE.is_match(value) {
        return Err("Te rugăm să nu folosești caractere speciale (precum @, #, $, <, >) în numele produsului căutat.".to_string());
    }
    Ok(())
}

pub fn no_special_characters(value: &str) -> Result<(), String> {
    if TEXT_SPECIAL_RE.is_match(value) {
        return Err("Textul conține caractere speciale nepermise (ex: @, #, $, <, >). Te rugăm să folosești doar litere, cifre și punctuație normală.".to_string());
    }
    Ok(())
}

pub fn starts_uppercase(value: &str) -> Result<(), String> {
    match value.chars().next() {
        Some(c) if c.is_uppercase() => Ok(()),
        _ => Err("Acest câmp trebuie să înceapă obligatoriu cu literă mare!".to_string()),
    }
}

/// Capitalized text made only of letters, spaces and hyphens.
pub fn text_format(value: &str) -> Result<(), String> {
    if !TEXT_FORMAT_RE.is_match(value) {
        return Err("Textul trebuie să înceapă cu literă mare și să conțină doar litere, spații și cratime.".to_string());
    }
    Ok(())
}

pub fn uppercase_after_separator(value: &str) -> Result<(), String> {
    if LOWER_AFTER_SEPARATOR_RE.is_match(value) {
        return Err("După fiecare spațiu sau cratimă trebuie să urmeze o literă mare.".to_string());
    }
    Ok(())
}

pub fn no_links(value: &str) -> Result<(), String> {
    if LINK_RE.is_match(value) {
        return Err("Textul nu poate conține linkuri (http:// sau https://).".to_string());
    }
    Ok(())
}

pub fn word_count_between(value: &str, min: usize, max: usize) -> Result<(), String> {
    let n = words(value).len();
    if n < min || n > max {
        return Err(format!(
            "Mesajul trebuie să conțină între {min} și {max} de cuvinte. (Ai introdus {n})"
        ));
    }
    Ok(())
}

pub fn word_length_at_most(value: &str, max: usize) -> Result<(), String> {
    for word in words(value) {
        if word.chars().count() > max {
            return Err(format!(
                "Niciun cuvânt nu poate depăși {max} caractere. (Cuvântul '{word}' este prea lung)."
            ));
        }
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), String> {
    if !EMAIL_RE.is_match(value) {
        return Err("Introduceți o adresă de e-mail validă.".to_string());
    }
    Ok(())
}

pub fn email_domain(value: &str) -> Result<(), String> {
    let domain = value.rsplit('@').next().unwrap_or_default().to_lowercase();
    if TEMPORARY_EMAIL_DOMAINS.contains(&domain.as_str()) {
        return Err(format!("Nu acceptăm adrese de e-mail temporare ({domain})."));
    }
    Ok(())
}

pub fn adult(birth: NaiveDate, today: NaiveDate, message: &str) -> Result<(), String> {
    if age_on(birth, today) < ADULT_AGE {
        return Err(message.to_string());
    }
    Ok(())
}

pub fn digits_only(value: &str, message: &str) -> Result<(), String> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(message.to_string());
    }
    Ok(())
}

/// Birth date encoded in a CNP (`SAALLZZ...`). Sex digits 1/2 are 1900s,
/// 5/6 are 2000s; anything else has no date.
pub fn cnp_birth_date(cnp: &str) -> Option<NaiveDate> {
    if cnp.len() < 7 || !cnp.is_ascii() {
        return None;
    }
    let century = match &cnp[0..1] {
        "1" | "2" => 1900,
        "5" | "6" => 2000,
        _ => return None,
    };
    let year: i32 = cnp[1..3].parse().ok()?;
    let month: u32 = cnp[3..5].parse().ok()?;
    let day: u32 = cnp[5..7].parse().ok()?;
    NaiveDate::from_ymd_opt(century + year, month, day)
}

/// Full CNP check used by the contact form: digits, first digit, real date.
pub fn cnp(value: &str) -> Result<(), String> {
    digits_only(value, "CNP-ul trebuie să conțină doar cifre.")?;
    if value.len() != 13 {
        return Err(format!(
            "CNP-ul trebuie să aibă exact 13 cifre (tu ai introdus {}).",
            value.len()
        ));
    }
    if !matches!(&value[0..1], "1" | "2" | "5" | "6") {
        return Err("CNP-ul trebuie să înceapă cu 1, 2, 5 sau 6.".to_string());
    }
    if cnp_birth_date(value).is_none() {
        return Err(format!(
            "Cifrele {} din CNP nu formează o dată calendaristică validă.",
            &value[1..7]
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_age_counts_birthday_boundary() {
        assert_eq!(age_on(d(2000, 6, 15), d(2018, 6, 14)), 17);
        assert_eq!(age_on(d(2000, 6, 15), d(2018, 6, 15)), 18);
        assert!(adult(d(2008, 1, 1), d(2025, 12, 31), "x").is_err());
    }

    #[test]
    fn test_search_text_rejects_special_characters() {
        assert!(search_text("Air Max 90").is_ok());
        assert!(search_text("Air#Max").is_err());
        assert!(search_text("a/b").is_err());
        // slash is only forbidden in the search box
        assert!(no_special_characters("a/b").is_ok());
        assert!(no_special_characters("<script>").is_err());
    }

    #[test]
    fn test_text_format_rules() {
        assert!(text_format("Ana-Maria").is_ok());
        assert!(text_format("ana").is_err());
        assert!(text_format("Ana2").is_err());
        assert!(uppercase_after_separator("Ana Maria").is_ok());
        assert!(uppercase_after_separator("Ana maria").is_err());
        assert!(uppercase_after_separator("Ana-maria").is_err());
    }

    #[test]
    fn test_words_and_limits() {
        assert_eq!(words("Salut, ce mai faci? Bine"), vec!["Salut", "ce", "mai", "faci", "Bine"]);
        assert_eq!(words("mă-ntorc"), vec!["mă", "ntorc"]);
        assert!(word_count_between("unu doi trei patru cinci", 5, 100).is_ok());
        assert!(word_count_between("unu doi", 5, 100).is_err());
        assert!(word_length_at_most("scurt", 15).is_ok());
        assert!(word_length_at_most("extraordinarissimul", 15).is_err());
    }

    #[test]
    fn test_links_and_emails() {
        assert!(no_links("vezi https://exemplu.ro").is_err());
        assert!(no_links("fara linkuri").is_ok());
        assert!(email("ion@exemplu.ro").is_ok());
        assert!(email("ion.exemplu.ro").is_err());
        assert!(email_domain("x@YopMail.com").is_err());
        assert!(email_domain("x@gmail.com").is_ok());
    }

    #[test]
    fn test_cnp() {
        assert!(cnp("1990315123456").is_ok());
        assert!(cnp("5050229123456").is_err()); // 2005 is not a leap year
        assert!(cnp("3990315123456").is_err());
        assert!(cnp("19903151234").is_err());
        assert!(cnp("19903151234ab").is_err());
        assert_eq!(cnp_birth_date("6040229123456"), Some(d(2004, 2, 29)));
    }
}
