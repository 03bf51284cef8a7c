use sea_orm::ColumnTrait;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};

/// Escapes the LIKE wildcards so `text` only matches literally.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Substring match on `column`. SQLite's LIKE ignores ASCII case.
pub fn icontains<C: ColumnTrait>(column: C, text: &str) -> SimpleExpr {
    Expr::col((column.entity_name(), column)).like(LikeExpr::new(like_pattern(text)).escape('\\'))
}
