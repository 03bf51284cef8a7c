/// Parameters understood by `/log`. Single-valued parameters keep their last
/// occurrence; `iduri` keeps every occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub accesari: Option<String>,
    pub ultimele: Option<String>,
    pub iduri: Vec<String>,
    pub dubluri: bool,
    pub tabel: Option<String>,
}

impl LogQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut query = LogQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "accesari" => query.accesari = Some(value.clone()),
                "ultimele" => query.ultimele = Some(value.clone()),
                "iduri" => query.iduri.push(value.clone()),
                "dubluri" => query.dubluri = value.eq_ignore_ascii_case("true"),
                "tabel" => query.tabel = Some(value.clone()),
                _ => {}
            }
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_ids_are_kept() {
        let q = LogQuery::from_pairs(&pairs(&[
            ("iduri", "1,2"),
            ("iduri", "3"),
            ("dubluri", "TRUE"),
            ("ultimele", "2"),
            ("ultimele", "4"),
        ]));
        assert_eq!(q.iduri, vec!["1,2", "3"]);
        assert!(q.dubluri);
        assert_eq!(q.ultimele.as_deref(), Some("4"));
    }

    #[test]
    fn duplicates_default_off() {
        let q = LogQuery::from_pairs(&pairs(&[("dubluri", "da"), ("tabel", "")]));
        assert!(!q.dubluri);
        assert_eq!(q.tabel.as_deref(), Some(""));
    }
}
