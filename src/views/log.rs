use super::escape_html;
use crate::access_log::report::DETAILS_DATE_FORMAT;
use crate::access_log::{LogReport, NoticeLevel};

pub fn log_page(report: &LogReport) -> String {
    let mut html = String::new();

    if report.show_count {
        html.push_str(&format!(
            r#"<section class="numar-accesari">
    <h2>Număr Total de Accesări</h2>
    <p>De la pornirea serverului, s-au înregistrat <strong>{}</strong> accesări.</p>
</section>
"#,
            report.total
        ));
    }

    for notice in &report.notices {
        let color = match notice.level {
            NoticeLevel::Error => "red",
            NoticeLevel::Warning => "orange",
        };
        html.push_str(&format!(
            "<p style='color:{color};'>{}</p>\n",
            escape_html(&notice.text)
        ));
    }

    if report.details {
        html.push_str("<div class=\"detalii\">\n<h2>Detalii Accesări (Dată și Oră)</h2>\n<ul>\n");
        for access in &report.selection {
            html.push_str(&format!(
                "<li>{}</li>\n",
                access.formatted_date(DETAILS_DATE_FORMAT)
            ));
        }
        html.push_str("</ul>\n</div>\n");
    }

    if let Some(table) = &report.table {
        html.push_str("<h2>Date Accesări (Tabel)</h2>\n<table><thead><tr>");
        for column in &table.columns {
            html.push_str(&format!("<th>{}</th>", column.header()));
        }
        html.push_str("</tr></thead><tbody>\n");
        for row in &table.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody></table>\n");
    }

    if let Some(stats) = &report.stats {
        let code_list = |paths: &[String]| {
            paths
                .iter()
                .map(|p| format!("<code>{}</code>", escape_html(p)))
                .collect::<Vec<_>>()
                .join(", ")
        };
        html.push_str(&format!(
            r#"<section class="statistici">
    <h3>Statistici de Accesare</h3>
    <ul>
        <li>Pagina <strong>cea mai puțin</strong> accesată: {} ({} accesări)</li>
        <li>Pagina <strong>cea mai mult</strong> accesată: {} ({} accesări)</li>
    </ul>
</section>
"#,
            code_list(&stats.least),
            stats.least_count,
            code_list(&stats.most),
            stats.most_count
        ));
    }

    if let Some(warning) = &report.final_warning {
        html.push_str(&format!(
            "<p style='color:orange; font-weight: bold;'>{}</p>\n",
            escape_html(warning)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="ro">
<head>
    <meta charset="UTF-8">
    <title>Jurnal de accesare (Log)</title>
</head>
<body>
    <h1>Jurnal de accesare ({total} cereri totale)</h1>
{html}
    <p><i>Această cerere curentă (ID: {current}) este inclusă în log.</i></p>
</body>
</html>
"#,
        total = report.total,
        current = report.current_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access_log::{Access, LogQuery};
    use chrono::Local;

    #[test]
    fn renders_header_table_and_footer() {
        let records = vec![Access {
            id: 1,
            ip: "127.0.0.1".into(),
            accessed_at: Local::now(),
            path: "/log".into(),
            full_path: "/log?tabel=id,pagina".into(),
            params: vec![],
        }];
        let query = LogQuery {
            tabel: Some("id,pagina".into()),
            ultimele: Some("5".into()),
            ..Default::default()
        };
        let html = log_page(&LogReport::build(&records, &query, 1));
        assert!(html.contains("Jurnal de accesare (1 cereri totale)"));
        assert!(html.contains("<th>ID</th><th>PAGINA</th>"));
        assert!(html.contains("<td>1</td><td>/log</td>"));
        assert!(html.contains("Exista doar 1 accesari fata de 5 accesari cerute"));
        assert!(html.contains("(ID: 1)"));
    }
}
