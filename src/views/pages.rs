use super::{Layout, escape_html};

pub const PROJECT_DESCRIPTION: &str = "Acest proiect implementează un magazin online de încălțăminte. \
Obiectivul principal este de a oferi o platformă de e-commerce funcțională.";

pub fn index(layout: &Layout) -> String {
    let body = format!(
        r#"<section>
    <h2>Bine ați venit!</h2>
    <p>{}</p>
</section>"#,
        escape_html(PROJECT_DESCRIPTION)
    );
    layout.render("Acasă", &body)
}

pub fn about(layout: &Layout) -> String {
    let body = r#"<section>
    <h2>Despre noi</h2>
    <p>Vindem încălțăminte pentru femei, bărbați și copii, de la branduri consacrate, în mărimi EU, US și UK.</p>
</section>"#;
    layout.render("Despre", body)
}

pub fn in_progress(layout: &Layout) -> String {
    let body = r#"<section>
    <h2>Pagină în lucru</h2>
    <p>Această secțiune este în curs de dezvoltare. Reveniți în curând!</p>
</section>"#;
    layout.render("În lucru", body)
}

pub fn not_found(layout: &Layout, message: &str) -> String {
    let body = format!(
        r#"<section class="eroare">
    <h2>Eroare 404</h2>
    <p>{}</p>
    <p><a href="/produse">Înapoi la produse</a></p>
</section>"#,
        escape_html(message)
    );
    layout.render("Pagina nu a fost găsită", &body)
}

pub fn server_error(layout: &Layout) -> String {
    let body = r#"<section class="eroare">
    <h2>Eroare 500</h2>
    <p>A apărut o problemă pe server. Vă rugăm să încercați din nou mai târziu.</p>
    <p><a href="/">Înapoi la pagina principală</a></p>
</section>"#;
    layout.render("Eroare de server", body)
}

pub fn email_confirmed(layout: &Layout, username: &str) -> String {
    let body = format!(
        r#"<section>
    <h2>E-mail confirmat</h2>
    <p>Mulțumim, {}! Adresa de e-mail a fost confirmată.</p>
</section>"#,
        escape_html(username)
    );
    layout.render("Confirmare e-mail", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_escapes_message() {
        let layout = Layout {
            client_ip: "::1",
            categories: &[],
        };
        let html = not_found(&layout, "<b>lipsă</b>");
        assert!(html.contains("Eroare 404"));
        assert!(html.contains("&lt;b&gt;lipsă&lt;/b&gt;"));
    }
}
