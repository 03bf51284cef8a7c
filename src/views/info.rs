use super::escape_html;
use crate::access_log::Access;
use chrono::{Datelike, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "Ianuarie",
    "Februarie",
    "Martie",
    "Aprilie",
    "Mai",
    "Iunie",
    "Iulie",
    "August",
    "Septembrie",
    "Octombrie",
    "Noiembrie",
    "Decembrie",
];

const WEEKDAYS: [&str; 7] = [
    "Luni",
    "Marți",
    "Miercuri",
    "Joi",
    "Vineri",
    "Sâmbătă",
    "Duminică",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// `?zi`
    Day,
    /// `?timp`
    Time,
    Both,
}

impl DateMode {
    pub fn from_params(access: &Access) -> Self {
        if access.has_param("zi") {
            DateMode::Day
        } else if access.has_param("timp") {
            DateMode::Time
        } else {
            DateMode::Both
        }
    }
}

/// `Luni, 3 Martie 2025`
pub fn romanian_date(now: &NaiveDateTime) -> String {
    format!(
        "{}, {} {} {}",
        WEEKDAYS[now.weekday().num_days_from_monday() as usize],
        now.day(),
        MONTHS[now.month0() as usize],
        now.year()
    )
}

pub fn date_fragment(now: &NaiveDateTime, mode: DateMode) -> String {
    let time = format!("{:02}:{:02}:{:02}", now.hour(), now.minute(), now.second());
    let (title, text) = match mode {
        DateMode::Day => ("Ziua curentă (Server)", romanian_date(now)),
        DateMode::Time => ("Ora curentă (Server)", time),
        DateMode::Both => (
            "Data și ora (Server)",
            format!("{}, ora {}", romanian_date(now), time),
        ),
    };
    format!(
        r#"<section class="data-server">
    <h2>{title}</h2>
    <p><strong>{text}</strong></p>
</section>"#
    )
}

pub fn info_page(access: &Access, date_html: Option<&str>) -> String {
    let names = access.param_names();
    let names_text = if names.is_empty() {
        "Niciunul".to_string()
    } else {
        escape_html(&names.join(", "))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ro">
<head>
    <meta charset="UTF-8">
    <title>Informații despre server</title>
</head>
<body>
    <h1>Informații despre server</h1>
    <section>
        <h2>Detalii accesare curentă</h2>
        <ul>
            <li><strong>ID Accesare:</strong> {id}</li>
            <li><strong>IP Client:</strong> {ip}</li>
            <li><strong>Pagina Accesată:</strong> {path}</li>
            <li><strong>URL Complet:</strong> {url}</li>
        </ul>
    </section>
    <section>
        <h2>Parametri</h2>
        <p>Număr parametri primiți: <strong>{count}</strong></p>
        <p>Numele acestora: <strong>{names_text}</strong></p>
    </section>
    {date}
</body>
</html>
"#,
        id = access.id,
        ip = escape_html(&access.ip),
        path = escape_html(&access.path),
        url = escape_html(&access.full_path),
        count = names.len(),
        date = date_html.unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate};

    fn moment() -> NaiveDateTime {
        // a Monday
        NaiveDate::from_ymd_opt(2025, 3, 3)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn romanian_names() {
        assert_eq!(romanian_date(&moment()), "Luni, 3 Martie 2025");
    }

    #[test]
    fn fragment_modes() {
        assert!(date_fragment(&moment(), DateMode::Time).contains("<strong>09:05:07</strong>"));
        assert!(
            date_fragment(&moment(), DateMode::Both)
                .contains("<strong>Luni, 3 Martie 2025, ora 09:05:07</strong>")
        );
        assert!(date_fragment(&moment(), DateMode::Day).contains("Ziua curentă"));
    }

    #[test]
    fn info_lists_parameter_names() {
        let access = Access {
            id: 4,
            ip: "127.0.0.1".into(),
            accessed_at: Local::now(),
            path: "/info".into(),
            full_path: "/info?a=1&b".into(),
            params: vec![("a".into(), Some("1".into())), ("b".into(), None)],
        };
        let html = info_page(&access, None);
        assert!(html.contains("<strong>2</strong>"));
        assert!(html.contains("<strong>a, b</strong>"));

        let bare = Access {
            params: vec![],
            ..access
        };
        assert!(info_page(&bare, None).contains("Niciunul"));
    }
}
