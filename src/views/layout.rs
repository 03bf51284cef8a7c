use super::escape_html;
use crate::entities::category_entity as categories;
use crate::utils::html::encode_path_segment;

pub const SITE_NAME: &str = "Magazin Încălțăminte";

/// Shared page chrome: navigation with the visible categories and the
/// client IP in the footer.
pub struct Layout<'a> {
    pub client_ip: &'a str,
    pub categories: &'a [categories::Model],
}

impl Layout<'_> {
    pub fn render(&self, title: &str, body: &str) -> String {
        let mut nav = String::new();
        for (href, label) in [
            ("/", "Acasă"),
            ("/despre", "Despre"),
            ("/produse", "Produse"),
            ("/cos_virtual", "Coș virtual"),
            ("/contact", "Contact"),
            ("/faq", "FAQ"),
            ("/termeni", "Termeni"),
        ] {
            nav.push_str(&format!(r#"<li><a href="{href}">{label}</a></li>"#));
        }

        let mut category_nav = String::new();
        for category in self.categories.iter().filter(|c| c.visible) {
            category_nav.push_str(&format!(
                r#"<li><a href="/categorii/{href}" style="color: {color};"><i class="{icon}"></i> {name}</a></li>"#,
                href = encode_path_segment(&category.name),
                color = escape_html(&category.color_code),
                icon = escape_html(&category.icon_class),
                name = escape_html(&category.display_name()),
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="ro">
<head>
    <meta charset="UTF-8">
    <title>{title} | {SITE_NAME}</title>
</head>
<body>
    <header>
        <h1>{SITE_NAME}</h1>
        <nav><ul>{nav}</ul></nav>
        <nav class="categorii"><ul>{category_nav}</ul></nav>
    </header>
    <main>
{body}
    </main>
    <footer>
        <p>Adresa ta IP: {ip}</p>
    </footer>
</body>
</html>
"#,
            title = escape_html(title),
            ip = escape_html(self.client_ip),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::GenderTarget;

    fn category(name: &str, visible: bool) -> categories::Model {
        categories::Model {
            id: 1,
            name: name.to_string(),
            gender_target: GenderTarget::Women,
            visible,
            color_code: "#004d99".to_string(),
            icon_class: "fa-solid fa-shoe-prints".to_string(),
        }
    }

    #[test]
    fn only_visible_categories_are_linked() {
        let cats = vec![category("Sandale de vara", true), category("Ascunsa", false)];
        let html = Layout {
            client_ip: "1.2.3.4",
            categories: &cats,
        }
        .render("Acasă", "<p>x</p>");
        assert!(html.contains(r#"href="/categorii/Sandale%20de%20vara""#));
        assert!(html.contains("Sandale de vara (Feminin)"));
        assert!(!html.contains("Ascunsa"));
        assert!(html.contains("Adresa ta IP: 1.2.3.4"));
    }
}
